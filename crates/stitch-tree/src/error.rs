//! Error types for virtual tree operations.
//!
//! Lookup helpers that are expected to miss return `Option` instead; the
//! variants here cover contract violations: missing required files, recorder
//! conflicts, and malformed edit staging.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors returned by virtual tree and recorder operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TreeError {
    /// The requested path does not exist in the snapshot.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was looked up.
        path: Utf8PathBuf,
    },

    /// A write targeted a path that is already occupied.
    #[error("path already exists: {path}")]
    PathOccupied {
        /// Path that collided with an existing file.
        path: Utf8PathBuf,
    },

    /// A recorder is already open on the path.
    #[error("a recorder is already open for {path}")]
    RecorderOpen {
        /// Path with the open recorder.
        path: Utf8PathBuf,
    },

    /// The file changed between `begin_update` and `commit_update`.
    #[error("stale recorder for {path}: the file was modified after begin_update")]
    StaleRecorder {
        /// Path the recorder was opened on.
        path: Utf8PathBuf,
    },

    /// An edit range falls outside the recorder's base buffer.
    #[error("edit {start}..{end} is out of bounds for {path} (buffer length {len})")]
    EditOutOfBounds {
        /// Path the edit was staged against.
        path: Utf8PathBuf,
        /// Start offset of the offending edit.
        start: usize,
        /// End offset of the offending edit.
        end: usize,
        /// Length of the base buffer.
        len: usize,
    },

    /// An edit offset does not fall on a UTF-8 character boundary.
    #[error("edit offset {offset} in {path} is not on a UTF-8 character boundary")]
    EditBoundary {
        /// Path the edit was staged against.
        path: Utf8PathBuf,
        /// Offending byte offset.
        offset: usize,
    },

    /// Two edits staged on one recorder target overlapping ranges.
    #[error(
        "overlapping edits staged on {path}: {first_start}..{first_end} and \
         {second_start}..{second_end}"
    )]
    OverlappingEdits {
        /// Path the edits were staged against.
        path: Utf8PathBuf,
        /// Start of the earlier-staged edit.
        first_start: usize,
        /// End of the earlier-staged edit.
        first_end: usize,
        /// Start of the later-staged edit.
        second_start: usize,
        /// End of the later-staged edit.
        second_end: usize,
    },
}

impl TreeError {
    /// Creates a `FileNotFound` error.
    #[must_use]
    pub fn file_not_found(path: impl Into<Utf8PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Creates a `PathOccupied` error.
    #[must_use]
    pub fn path_occupied(path: impl Into<Utf8PathBuf>) -> Self {
        Self::PathOccupied { path: path.into() }
    }

    /// Creates a `RecorderOpen` error.
    #[must_use]
    pub fn recorder_open(path: impl Into<Utf8PathBuf>) -> Self {
        Self::RecorderOpen { path: path.into() }
    }

    /// Creates a `StaleRecorder` error.
    #[must_use]
    pub fn stale_recorder(path: impl Into<Utf8PathBuf>) -> Self {
        Self::StaleRecorder { path: path.into() }
    }

    /// Creates an `EditOutOfBounds` error.
    #[must_use]
    pub fn edit_out_of_bounds(
        path: impl Into<Utf8PathBuf>,
        start: usize,
        end: usize,
        len: usize,
    ) -> Self {
        Self::EditOutOfBounds {
            path: path.into(),
            start,
            end,
            len,
        }
    }

    /// Creates an `EditBoundary` error.
    #[must_use]
    pub fn edit_boundary(path: impl Into<Utf8PathBuf>, offset: usize) -> Self {
        Self::EditBoundary {
            path: path.into(),
            offset,
        }
    }
}
