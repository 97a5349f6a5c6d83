//! Staged edit representation and the single-pass application algorithm.
//!
//! Edits address byte offsets in one immutable base buffer. Inserts are
//! zero-width (`start == end`); deletes carry empty replacement text. The
//! commit pass applies edits in ascending offset order, breaking ties at an
//! offset by side (left before right) and then by staging sequence.

use camino::Utf8Path;

use crate::error::TreeError;

/// Tie-break side for inserts that share an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Side {
    /// Ordered before right-side inserts at the same offset.
    Left,
    /// Ordered after left-side inserts at the same offset.
    Right,
}

/// One staged edit against a recorder's base buffer.
#[derive(Debug, Clone)]
pub(crate) struct Edit {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) text: String,
    pub(crate) side: Side,
    pub(crate) seq: usize,
}

impl Edit {
    /// Returns true when the edits target intersecting ranges.
    ///
    /// Zero-width inserts conflict only when they fall strictly inside
    /// another edit's range; touching a boundary is allowed, as are two
    /// inserts at the identical offset.
    fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Applies staged edits to `base` in a single deterministic pass.
///
/// `path` is used for diagnostics only. Fails with `OverlappingEdits` when
/// any two edits intersect.
pub(crate) fn apply_edits(
    path: &Utf8Path,
    base: &str,
    edits: &[Edit],
) -> Result<String, TreeError> {
    for (index, earlier) in edits.iter().enumerate() {
        for later in edits.iter().skip(index.saturating_add(1)) {
            if earlier.overlaps(later) {
                return Err(TreeError::OverlappingEdits {
                    path: path.to_owned(),
                    first_start: earlier.start,
                    first_end: earlier.end,
                    second_start: later.start,
                    second_end: later.end,
                });
            }
        }
    }

    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by_key(|edit| (edit.start, edit.side, edit.seq));

    let mut output = String::with_capacity(base.len());
    let mut cursor = 0usize;
    for edit in ordered {
        // A zero-width insert at the start of an already-emitted range has
        // no gap to copy; it lands directly after that range's text.
        if edit.start > cursor {
            let gap = base
                .get(cursor..edit.start)
                .ok_or_else(|| TreeError::edit_boundary(path, edit.start))?;
            output.push_str(gap);
            cursor = edit.start;
        }
        output.push_str(&edit.text);
        cursor = cursor.max(edit.end);
    }
    let tail = base
        .get(cursor..)
        .ok_or_else(|| TreeError::edit_boundary(path, cursor))?;
    output.push_str(tail);

    Ok(output)
}
