//! Error type for rule execution.

use thiserror::Error;

use stitch_syntax::SyntaxError;
use stitch_tree::TreeError;

/// Errors that abort a rule, and with it the whole chain.
///
/// Recoverable absence (a project without the expected builder, a symbol
/// already imported) is handled inside rules as a normal value; only
/// contract violations surface here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RuleError {
    /// A virtual tree operation failed.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Parsing a source file failed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A rule-specific contract was violated.
    #[error("rule failed: {message}")]
    Failed {
        /// Description of the violated contract.
        message: String,
    },
}

impl RuleError {
    /// Creates a rule-specific failure.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}
