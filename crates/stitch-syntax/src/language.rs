//! Grammar selection for the sources the engine reads.
//!
//! The engine consumes two grammars: loose JSON for workspace configuration
//! files and TypeScript for application sources. Both map to Tree-sitter
//! grammars whose nodes carry half-open byte ranges, which is what the
//! offset-addressed edit layer requires.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

/// Source languages the engine can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceLanguage {
    /// JSON configuration files (`.json`), parsed loosely: comments and
    /// recoverable syntax damage do not fail the parse.
    #[default]
    Json,
    /// TypeScript source files (`.ts`).
    TypeScript,
}

impl SourceLanguage {
    /// Detects the language from a file extension.
    ///
    /// Returns `None` if the extension is not recognised.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let normalised = ext.to_ascii_lowercase();
        match normalised.as_str() {
            "json" => Some(Self::Json),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            _ => None,
        }
    }

    /// Detects the language from a file path by examining its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns the Tree-sitter grammar for this language.
    #[must_use]
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::Json => tree_sitter_json::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        }
    }

    /// Returns the lower-case identifier for this language.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::TypeScript => "typescript",
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing a language identifier fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported language: '{0}'")]
pub struct LanguageParseError(String);

impl LanguageParseError {
    /// Returns the input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl FromStr for SourceLanguage {
    type Err = LanguageParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalised = input.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "json" => Ok(Self::Json),
            "typescript" | "ts" => Ok(Self::TypeScript),
            other => Err(LanguageParseError(other.to_owned())),
        }
    }
}
