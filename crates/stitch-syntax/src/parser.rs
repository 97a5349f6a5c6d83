//! Tree-sitter parsing wrapper.
//!
//! Parsing is deliberately loose: Tree-sitter recovers from comments,
//! trailing commas, and local syntax damage, leaving ERROR nodes behind
//! instead of failing. Queries skip those nodes, so position information
//! survives for files a strict parser would reject. A parse fails only when
//! no usable tree can be produced at all.

use crate::error::SyntaxError;
use crate::language::SourceLanguage;

/// Result of parsing source text.
///
/// Owns the source so that node byte ranges always address the exact buffer
/// they were computed from.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
    language: SourceLanguage,
}

impl ParseResult {
    /// Returns the root node of the syntax tree.
    #[must_use]
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Returns the source text that was parsed.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the language of the parsed source.
    #[must_use]
    pub const fn language(&self) -> SourceLanguage {
        self.language
    }

    /// Returns whether the tree contains any ERROR nodes.
    ///
    /// A tree with errors is still queryable; callers that require a fully
    /// well-formed document check this explicitly.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}

/// Parser for one source language.
pub struct Parser {
    inner: tree_sitter::Parser,
    language: SourceLanguage,
}

impl core::fmt::Debug for Parser {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Parser")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl Parser {
    /// Creates a parser for the given language.
    ///
    /// # Errors
    ///
    /// Returns an error if the Tree-sitter grammar cannot be loaded.
    pub fn new(language: SourceLanguage) -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&language.tree_sitter_language())
            .map_err(|error| SyntaxError::parser_init(language, error.to_string()))?;
        Ok(Self { inner, language })
    }

    /// Returns the language this parser is configured for.
    #[must_use]
    pub const fn language(&self) -> SourceLanguage {
        self.language
    }

    /// Parses source text into a position-annotated tree.
    ///
    /// # Errors
    ///
    /// Returns an error only when the whole document yields no usable tree;
    /// recoverable damage is tolerated and left as ERROR nodes.
    pub fn parse(&mut self, source: impl Into<String>) -> Result<ParseResult, SyntaxError> {
        let source = source.into();
        let tree = self
            .inner
            .parse(&source, None)
            .ok_or_else(|| SyntaxError::parse(self.language, "parser produced no tree"))?;
        if tree.root_node().kind() == "ERROR" {
            return Err(SyntaxError::parse(
                self.language,
                "document has no parsable structure",
            ));
        }
        Ok(ParseResult {
            tree,
            source,
            language: self.language,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Parser;
    use crate::language::SourceLanguage;

    #[test]
    fn parses_well_formed_json() {
        let mut parser = Parser::new(SourceLanguage::Json).expect("parser");
        let parsed = parser.parse(r#"{"a": 1}"#).expect("parse");
        assert!(!parsed.has_errors());
        assert_eq!(parsed.root_node().kind(), "document");
    }

    #[test]
    fn tolerates_loose_json() {
        let mut parser = Parser::new(SourceLanguage::Json).expect("parser");
        let parsed = parser
            .parse("{\n  // comment\n  \"a\": 1,\n}")
            .expect("parse");
        // The tree is still queryable even if recovery left error nodes.
        assert_eq!(parsed.root_node().kind(), "document");
    }

    #[test]
    fn parses_typescript_imports() {
        let mut parser = Parser::new(SourceLanguage::TypeScript).expect("parser");
        let parsed = parser
            .parse("import { NgModule } from '@angular/core';\n")
            .expect("parse");
        assert!(!parsed.has_errors());
        assert_eq!(parsed.root_node().kind(), "program");
    }

    #[test]
    fn node_byte_ranges_address_the_owned_source() {
        let mut parser = Parser::new(SourceLanguage::Json).expect("parser");
        let parsed = parser.parse(r#"{"key": "value"}"#).expect("parse");
        let root = parsed.root_node();
        assert_eq!(
            parsed.source().get(root.byte_range()),
            Some(r#"{"key": "value"}"#)
        );
    }
}
