//! Recorders stage ordered byte-offset edits against one file.
//!
//! A recorder captures the file's content at [`crate::Tree::begin_update`]
//! time and accumulates edits without touching the tree. It is consumed
//! exactly once by [`crate::Tree::commit_update`]; committing shifts offsets
//! for any subsequent read, so all edits computed from one read of the file
//! must be staged on the same recorder.

use std::ops::Range;

use camino::{Utf8Path, Utf8PathBuf};

use crate::edit::{Edit, Side};
use crate::error::TreeError;

/// An ordered set of pending edits scoped to one file path.
#[derive(Debug)]
pub struct Recorder {
    path: Utf8PathBuf,
    base: String,
    generation: u64,
    edits: Vec<Edit>,
}

impl Recorder {
    pub(crate) const fn new(path: Utf8PathBuf, base: String, generation: u64) -> Self {
        Self {
            path,
            base,
            generation,
            edits: Vec::new(),
        }
    }

    /// Returns the path this recorder is scoped to.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the base content captured when the recorder was opened.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    pub(crate) const fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn into_parts(self) -> (Utf8PathBuf, String, u64, Vec<Edit>) {
        (self.path, self.base, self.generation, self.edits)
    }

    /// Stages an insert ordered before any right-side insert at `offset`.
    ///
    /// # Errors
    ///
    /// Fails when `offset` is outside the base buffer or not on a UTF-8
    /// character boundary.
    pub fn insert_left(&mut self, offset: usize, text: impl Into<String>) -> Result<(), TreeError> {
        self.stage(offset, offset, text.into(), Side::Left)
    }

    /// Stages an insert ordered after any left-side insert at `offset`.
    ///
    /// # Errors
    ///
    /// Fails when `offset` is outside the base buffer or not on a UTF-8
    /// character boundary.
    pub fn insert_right(
        &mut self,
        offset: usize,
        text: impl Into<String>,
    ) -> Result<(), TreeError> {
        self.stage(offset, offset, text.into(), Side::Right)
    }

    /// Stages a replacement of `range` with `text`.
    ///
    /// # Errors
    ///
    /// Fails when the range is inverted, outside the base buffer, or not on
    /// UTF-8 character boundaries.
    pub fn replace(&mut self, range: Range<usize>, text: impl Into<String>) -> Result<(), TreeError> {
        self.stage(range.start, range.end, text.into(), Side::Left)
    }

    /// Stages a deletion of `range`.
    ///
    /// # Errors
    ///
    /// Fails when the range is inverted, outside the base buffer, or not on
    /// UTF-8 character boundaries.
    pub fn delete(&mut self, range: Range<usize>) -> Result<(), TreeError> {
        self.stage(range.start, range.end, String::new(), Side::Left)
    }

    fn stage(
        &mut self,
        start: usize,
        end: usize,
        text: String,
        side: Side,
    ) -> Result<(), TreeError> {
        if start > end || end > self.base.len() {
            return Err(TreeError::edit_out_of_bounds(
                self.path.clone(),
                start,
                end,
                self.base.len(),
            ));
        }
        if !self.base.is_char_boundary(start) {
            return Err(TreeError::edit_boundary(self.path.clone(), start));
        }
        if !self.base.is_char_boundary(end) {
            return Err(TreeError::edit_boundary(self.path.clone(), end));
        }

        let seq = self.edits.len();
        self.edits.push(Edit {
            start,
            end,
            text,
            side,
            seq,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;

    use super::Recorder;

    fn recorder(base: &str) -> Recorder {
        Recorder::new(Utf8PathBuf::from("/src/app.ts"), base.to_owned(), 0)
    }

    #[test]
    fn staging_past_the_buffer_end_fails() {
        let mut rec = recorder("short");
        assert!(rec.insert_left(6, "x").is_err());
    }

    #[test]
    fn staging_at_the_buffer_end_is_allowed() {
        let mut rec = recorder("short");
        assert!(rec.insert_left(5, "x").is_ok());
    }

    #[test]
    fn inverted_range_fails() {
        let mut rec = recorder("content");
        assert!(rec.replace(4..2, "x").is_err());
    }

    #[test]
    fn offset_inside_a_multibyte_character_fails() {
        // 'é' occupies two bytes starting at offset 1.
        let mut rec = recorder("aé!");
        assert!(rec.insert_left(2, "x").is_err());
        assert!(rec.insert_left(3, "x").is_ok());
    }
}
