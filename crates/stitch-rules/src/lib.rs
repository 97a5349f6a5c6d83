//! Rule composition for the stitch engine.
//!
//! A [`Rule`] is one transformation step: it consumes the virtual tree and
//! produces the next one, staging its edits through `stitch-tree` recorders
//! and locating them through `stitch-syntax` queries. [`chain`] composes an
//! ordered list of rules into a single rule, threading the tree through
//! strictly in sequence.
//!
//! # Example
//!
//! ```
//! use stitch_rules::{Rule, RuleContext, RuleError, chain};
//! use stitch_tree::Tree;
//!
//! let touch = |mut tree: Tree, _ctx: &RuleContext| -> Result<Tree, RuleError> {
//!     tree.create("/generated.txt", "content")?;
//!     Ok(tree)
//! };
//!
//! let migration = chain(vec![Box::new(touch)]);
//! let ctx = RuleContext::new("/angular.json");
//! let tree = migration.apply(Tree::new(), &ctx)?;
//! assert!(tree.contains("/generated.txt"));
//! # Ok::<(), stitch_rules::RuleError>(())
//! ```

mod context;
mod error;
mod rule;

pub use context::RuleContext;
pub use error::RuleError;
pub use rule::{Chain, Rule, chain, merge_template};
