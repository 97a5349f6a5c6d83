//! Error types for parsing operations.
//!
//! Query and locator functions signal absence with `Option`/empty results;
//! the variants here cover the cases with no fallback, such as a document
//! that cannot be parsed at all.

use thiserror::Error;

use crate::language::SourceLanguage;

/// Errors from parsing source text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser for a language.
    #[error("failed to initialise parser for {language}: {message}")]
    ParserInit {
        /// The language that failed to initialise.
        language: SourceLanguage,
        /// Description of the failure.
        message: String,
    },

    /// The document could not be parsed into a usable tree.
    #[error("failed to parse {language}: {message}")]
    Parse {
        /// The language that failed to parse.
        language: SourceLanguage,
        /// Description of the failure.
        message: String,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(language: SourceLanguage, message: impl Into<String>) -> Self {
        Self::ParserInit {
            language,
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(language: SourceLanguage, message: impl Into<String>) -> Self {
        Self::Parse {
            language,
            message: message.into(),
        }
    }
}
