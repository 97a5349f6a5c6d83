//! Rule trait and functional composition.
//!
//! A rule consumes the tree and produces the next tree. [`chain`] threads
//! one tree through an ordered list of rules; a failing rule aborts the
//! chain immediately, with no later rules applied and no rollback of
//! mutations already committed by earlier rules — callers needing atomicity
//! snapshot the tree externally (it is `Clone`).

use tracing::debug;

use camino::Utf8PathBuf;
use stitch_tree::{TemplateFile, TemplateVars, Tree};

use crate::context::RuleContext;
use crate::error::RuleError;

/// One transformation step over the virtual tree.
pub trait Rule {
    /// Applies the rule, producing the tree the next rule receives.
    ///
    /// # Errors
    ///
    /// Returns an error to abort the enclosing chain.
    fn apply(&self, tree: Tree, ctx: &RuleContext) -> Result<Tree, RuleError>;
}

impl<F> Rule for F
where
    F: Fn(Tree, &RuleContext) -> Result<Tree, RuleError>,
{
    fn apply(&self, tree: Tree, ctx: &RuleContext) -> Result<Tree, RuleError> {
        self(tree, ctx)
    }
}

/// An ordered sequence of rules that is itself a rule.
pub struct Chain {
    rules: Vec<Box<dyn Rule>>,
}

impl Rule for Chain {
    fn apply(&self, tree: Tree, ctx: &RuleContext) -> Result<Tree, RuleError> {
        let mut current = tree;
        for (index, rule) in self.rules.iter().enumerate() {
            debug!(rule = index, total = self.rules.len(), "applying rule");
            current = rule.apply(current, ctx)?;
        }
        Ok(current)
    }
}

/// Composes rules into a single rule that applies them strictly in order.
///
/// Since [`Chain`] implements [`Rule`], a chain may itself be one element of
/// a larger chain. An empty chain is the identity transformation.
#[must_use]
pub fn chain(rules: Vec<Box<dyn Rule>>) -> Chain {
    Chain { rules }
}

/// A rule that renders `files` against `vars` and mounts them at `mount`.
///
/// Fails the chain when a rendered path collides with an existing file.
pub fn merge_template(
    mount: impl Into<Utf8PathBuf>,
    files: Vec<TemplateFile>,
    vars: TemplateVars,
) -> impl Rule {
    let mount = mount.into();
    move |mut tree: Tree, _ctx: &RuleContext| {
        tree.merge_template(&mount, &files, &vars)?;
        Ok(tree)
    }
}
