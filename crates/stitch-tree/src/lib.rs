//! Virtual file tree with recorder-based, source-position editing.
//!
//! This crate is the mutation layer of the stitch engine. It provides:
//!
//! - [`Tree`] - an in-memory path → content snapshot of the files being
//!   transformed; reads never reflect uncommitted edits
//! - [`Recorder`] - staged byte-offset inserts, replacements, and deletions
//!   scoped to one file, committed atomically in a deterministic order
//! - [`TemplateFile`] / [`render`] - plain `{{name}}` substitution templates
//!   merged into the tree at a mount path
//!
//! Offsets address the recorder's base buffer, captured at
//! [`Tree::begin_update`] time. Committing shifts offsets for subsequent
//! reads, so every edit computed from one read must be staged on the same
//! recorder. Stale recorders (the file changed underneath) are a
//! [`TreeError::StaleRecorder`] conflict, never a silent overwrite.
//!
//! # Example
//!
//! ```
//! use stitch_tree::Tree;
//!
//! let mut tree = Tree::from_files([("/src/main.ts", "export {};\n")]);
//! let mut recorder = tree.begin_update("/src/main.ts")?;
//! recorder.insert_left(0, "// generated\n")?;
//! tree.commit_update(recorder)?;
//! assert_eq!(tree.read("/src/main.ts"), Some("// generated\nexport {};\n"));
//! # Ok::<(), stitch_tree::TreeError>(())
//! ```

mod edit;
mod error;
mod recorder;
mod template;
mod tree;

pub use error::TreeError;
pub use recorder::Recorder;
pub use template::{TemplateFile, TemplateVars, render};
pub use tree::Tree;
