//! Sub-range selection over the sorted identifier list and output naming.

use crate::parser::Identifier;

/// Base name of the output artifact.
pub const OUTPUT_BASE_NAME: &str = "support_info_links";

/// A `start..end` slice over the sorted identifier list.
///
/// Bounds follow Python slice semantics: 0-based, negative values count from
/// the end, out-of-range values clamp, and a missing `end` means "through the
/// last element".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeSelection {
    /// Inclusive start position
    pub start: i64,
    /// Exclusive end position; `None` selects through the last identifier
    pub end: Option<i64>,
}

impl RangeSelection {
    /// Selects every identifier.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Selects `start..end`.
    #[must_use]
    pub fn bounded(start: i64, end: i64) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Returns the concrete `[from, to)` indices for a list of `len` items.
    #[must_use]
    pub fn indices(&self, len: usize) -> (usize, usize) {
        let from = clamp_index(self.start, len);
        let to = self.end.map_or(len, |end| clamp_index(end, len));
        (from, to.max(from))
    }

    /// Returns the output artifact name for this selection.
    ///
    /// `support_info_links` when no end bound was given, otherwise
    /// `support_info_links_{start}_{end}` using the bounds as supplied.
    #[must_use]
    pub fn partition_name(&self) -> String {
        match self.end {
            None => OUTPUT_BASE_NAME.to_string(),
            Some(end) => format!("{OUTPUT_BASE_NAME}_{}_{end}", self.start),
        }
    }
}

/// Returns the output artifact name for `range`.
#[must_use]
pub fn partition_name(range: &RangeSelection) -> String {
    range.partition_name()
}

fn clamp_index(index: i64, len: usize) -> usize {
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let resolved = if index < 0 {
        len_i.saturating_add(index).max(0)
    } else {
        index.min(len_i)
    };
    usize::try_from(resolved).unwrap_or(0)
}

/// Sorts identifiers lexicographically and returns the selected slice.
///
/// Positions count repeated lines; repeats inside the slice are collapsed to
/// one identifier.
#[must_use]
pub fn select_range(mut ids: Vec<Identifier>, range: RangeSelection) -> Vec<Identifier> {
    ids.sort();
    let (from, to) = range.indices(ids.len());
    let mut selected: Vec<Identifier> = ids.drain(from..to).collect();
    selected.dedup();
    selected
}
