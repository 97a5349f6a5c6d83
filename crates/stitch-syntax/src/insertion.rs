//! The locator output type: literal text at a byte offset.

/// A computed text insertion against the original, unmodified buffer.
///
/// Offsets are valid only for the buffer the lookup ran against. Committing
/// shifts offsets for subsequent reads, so insertions computed from one read
/// must all be staged on the same recorder before any commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Byte offset into the original buffer.
    pub offset: usize,
    /// Literal text to insert at the offset.
    pub text: String,
}

impl Insertion {
    /// Creates an insertion.
    #[must_use]
    pub fn new(offset: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            text: text.into(),
        }
    }
}
