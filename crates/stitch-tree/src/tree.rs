//! The virtual file tree: an in-memory snapshot with recorder-based editing.
//!
//! A [`Tree`] maps file paths to current content. Reads always reflect the
//! last committed state, never pending edits. Mutation happens either through
//! a [`Recorder`] (offset-addressed edits committed atomically per file) or
//! by wholesale [`Tree::overwrite`]. Conflicts between the two are detected
//! with a per-path generation counter rather than locking: execution is
//! single-threaded and strictly sequential, so a stale recorder is the only
//! way writes can race.

use std::collections::{BTreeMap, BTreeSet};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::edit::apply_edits;
use crate::error::TreeError;
use crate::recorder::Recorder;

/// In-memory virtual snapshot of the files being transformed.
#[derive(Debug, Default, Clone)]
pub struct Tree {
    files: BTreeMap<Utf8PathBuf, String>,
    open: BTreeSet<Utf8PathBuf>,
    generations: BTreeMap<Utf8PathBuf, u64>,
}

impl Tree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files: BTreeMap::new(),
            open: BTreeSet::new(),
            generations: BTreeMap::new(),
        }
    }

    /// Seeds a tree from `(path, content)` pairs.
    ///
    /// Later pairs silently win over earlier duplicates, matching the
    /// behaviour of reading a file store where each path occurs once.
    pub fn from_files<P, C>(files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: Into<Utf8PathBuf>,
        C: Into<String>,
    {
        let mut tree = Self::new();
        for (path, content) in files {
            tree.files.insert(path.into(), content.into());
        }
        tree
    }

    /// Returns the current committed content for `path`, if present.
    ///
    /// Pending recorder edits are never visible here.
    #[must_use]
    pub fn read(&self, path: impl AsRef<Utf8Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// Returns whether `path` exists in the snapshot.
    #[must_use]
    pub fn contains(&self, path: impl AsRef<Utf8Path>) -> bool {
        self.files.contains_key(path.as_ref())
    }

    /// Iterates all paths in the snapshot, in path order.
    pub fn paths(&self) -> impl Iterator<Item = &Utf8Path> {
        self.files.keys().map(Utf8PathBuf::as_path)
    }

    /// Iterates `(path, content)` pairs, in path order.
    ///
    /// This is the final output handed to the collaborator that persists the
    /// tree; the engine itself never writes to backing storage.
    pub fn iter(&self) -> impl Iterator<Item = (&Utf8Path, &str)> {
        self.files
            .iter()
            .map(|(path, content)| (path.as_path(), content.as_str()))
    }

    /// Returns the number of files in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns whether the snapshot holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Creates a new file.
    ///
    /// # Errors
    ///
    /// Fails with [`TreeError::PathOccupied`] when the path already exists.
    pub fn create(
        &mut self,
        path: impl Into<Utf8PathBuf>,
        content: impl Into<String>,
    ) -> Result<(), TreeError> {
        let path = path.into();
        if self.files.contains_key(&path) {
            return Err(TreeError::path_occupied(path));
        }
        debug!(path = %path, "creating file");
        self.files.insert(path, content.into());
        Ok(())
    }

    /// Replaces a file's content wholesale, bypassing any recorder.
    ///
    /// Any recorder open on `path` becomes stale: its later commit fails
    /// rather than silently clobbering this write.
    ///
    /// # Errors
    ///
    /// Fails with [`TreeError::FileNotFound`] when the path does not exist.
    pub fn overwrite(
        &mut self,
        path: impl AsRef<Utf8Path>,
        content: impl Into<String>,
    ) -> Result<(), TreeError> {
        let path = path.as_ref();
        let Some(slot) = self.files.get_mut(path) else {
            return Err(TreeError::file_not_found(path));
        };
        debug!(path = %path, "overwriting file");
        *slot = content.into();
        self.bump_generation(path);
        self.open.remove(path);
        Ok(())
    }

    /// Opens a recorder on `path`, capturing its content as the edit base.
    ///
    /// # Errors
    ///
    /// Fails with [`TreeError::FileNotFound`] when the path does not exist,
    /// or [`TreeError::RecorderOpen`] when another recorder is already open
    /// on the same path. Recorders on different paths may coexist.
    pub fn begin_update(&mut self, path: impl AsRef<Utf8Path>) -> Result<Recorder, TreeError> {
        let path = path.as_ref();
        let Some(content) = self.files.get(path) else {
            return Err(TreeError::file_not_found(path));
        };
        if self.open.contains(path) {
            return Err(TreeError::recorder_open(path));
        }
        self.open.insert(path.to_owned());
        let generation = self.generation(path);
        Ok(Recorder::new(path.to_owned(), content.clone(), generation))
    }

    /// Applies a recorder's staged edits and replaces the file content.
    ///
    /// Edits apply in a single pass ordered by ascending offset, with
    /// same-offset ties broken left before right and then by staging order.
    /// The recorder is consumed whether or not the commit succeeds.
    ///
    /// # Errors
    ///
    /// Fails with [`TreeError::StaleRecorder`] when the file changed after
    /// `begin_update`, or [`TreeError::OverlappingEdits`] when two staged
    /// edits intersect. On failure the file is left unmodified.
    pub fn commit_update(&mut self, recorder: Recorder) -> Result<(), TreeError> {
        let current = self.generation(recorder.path());
        let (path, base, generation, edits) = recorder.into_parts();
        if generation != current || !self.open.contains(&path) {
            return Err(TreeError::stale_recorder(path));
        }

        debug!(path = %path, edits = edits.len(), "committing staged edits");
        let updated = apply_edits(&path, &base, &edits)?;
        self.open.remove(&path);
        self.bump_generation(&path);
        self.files.insert(path, updated);
        Ok(())
    }

    /// Abandons a recorder without applying its edits, releasing the path
    /// for a later `begin_update`.
    pub fn discard_update(&mut self, recorder: Recorder) {
        self.open.remove(recorder.path());
    }

    fn generation(&self, path: &Utf8Path) -> u64 {
        self.generations.get(path).copied().unwrap_or(0)
    }

    fn bump_generation(&mut self, path: &Utf8Path) {
        let next = self.generation(path).wrapping_add(1);
        self.generations.insert(path.to_owned(), next);
    }
}
