//! Shared configuration threaded explicitly through a rule chain.

use camino::{Utf8Path, Utf8PathBuf};

/// Configuration every rule receives alongside the tree.
///
/// Rules take everything they share through this value rather than through
/// ambient process-wide state, so a chain's behaviour is fully determined by
/// its inputs.
#[derive(Debug, Clone)]
pub struct RuleContext {
    workspace_path: Utf8PathBuf,
}

impl RuleContext {
    /// Creates a context with the path of the workspace configuration file.
    #[must_use]
    pub fn new(workspace_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            workspace_path: workspace_path.into(),
        }
    }

    /// Returns the path of the workspace configuration file in the tree.
    #[must_use]
    pub fn workspace_path(&self) -> &Utf8Path {
        &self.workspace_path
    }
}
