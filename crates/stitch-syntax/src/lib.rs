//! Position-addressed structure queries for the stitch engine.
//!
//! This crate reads parsed structures and computes byte-offset edit points;
//! it never mutates a parse tree or a file. It provides:
//!
//! - [`Parser`] / [`ParseResult`] - loose Tree-sitter parsing for JSON
//!   configuration and TypeScript sources, yielding nodes that carry
//!   half-open byte ranges into the original buffer
//! - [`workspace`] - queries over workspace configuration JSON:
//!   [`workspace::find_property`], [`workspace::find_targets`],
//!   [`workspace::collect_option_sets`]
//! - [`imports`] - import inspection and insertion:
//!   [`imports::is_imported`], [`imports::import_insertion`]
//! - [`metadata`] - decorator metadata list appends:
//!   [`metadata::metadata_list_append`]
//!
//! Locator functions return [`Insertion`] values addressing the original
//! buffer at lookup time. All insertions computed from one read must be
//! staged together before any commit, since committing shifts offsets for
//! subsequent reads. Absence (a missing property, an already-imported
//! symbol, an unlocatable decorator) is a normal outcome returned as
//! `None` or an empty sequence, never an error.

mod error;
mod insertion;
mod language;
mod parser;
mod text;

pub mod imports;
pub mod metadata;
pub mod workspace;

pub use error::SyntaxError;
pub use insertion::Insertion;
pub use language::{LanguageParseError, SourceLanguage};
pub use parser::{ParseResult, Parser};
