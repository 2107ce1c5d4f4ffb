// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap points and nearest-snap resolution.
//!
//! Positions share one coordinate space: a percentage offset where larger
//! values are more hidden. [`SnapPoints`] keeps its entries in the order they
//! were given, and that order breaks ties in [`resolve_nearest`].

use core::fmt;

use smallvec::SmallVec;

/// The standard three resting positions of a sheet.
///
/// Declaration order is significant: it is the enumeration order used by
/// [`SnapPoints::standard`] and therefore the tie-break order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SnapPoint {
    /// Fully hidden.
    Closed,
    /// Half visible.
    Half,
    /// Almost fully visible, leaving a strip at the top.
    Full,
}

impl SnapPoint {
    /// All snap points in enumeration order.
    pub const ALL: [Self; 3] = [Self::Closed, Self::Half, Self::Full];

    /// Standard position of this snap point.
    #[must_use]
    pub const fn position(self) -> f64 {
        match self {
            Self::Closed => 100.0,
            Self::Half => 50.0,
            Self::Full => 10.0,
        }
    }
}

/// A snap point id bound to its position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SnapEntry<K> {
    /// Caller-defined id.
    pub id: K,
    /// Position in the shared coordinate space.
    pub position: f64,
}

impl<K> SnapEntry<K> {
    /// Creates an entry.
    #[must_use]
    pub const fn new(id: K, position: f64) -> Self {
        Self { id, position }
    }
}

/// Returns the id of the entry closest to `value`.
///
/// Distance is `|value - position|`. When two entries are equally close the
/// one that comes first in `entries` wins. Returns `None` only for an empty
/// slice; a NaN `value` resolves to the first entry.
#[must_use]
pub fn resolve_nearest<K: Copy>(value: f64, entries: &[SnapEntry<K>]) -> Option<K> {
    let (first, rest) = entries.split_first()?;
    let mut best = first.id;
    let mut best_distance = (value - first.position).abs();
    for entry in rest {
        let distance = (value - entry.position).abs();
        // Strict comparison keeps the earliest entry on ties.
        if distance < best_distance {
            best = entry.id;
            best_distance = distance;
        }
    }
    Some(best)
}

/// An ordered, non-empty set of snap points with unique ids.
#[derive(Clone, Debug)]
pub struct SnapPoints<K> {
    entries: SmallVec<[SnapEntry<K>; 4]>,
    min: f64,
    max: f64,
}

impl<K: Copy + PartialEq> SnapPoints<K> {
    /// Builds a snap point set, keeping the given order.
    ///
    /// Fails on an empty list, a non-finite position, or a repeated id.
    pub fn new(entries: impl IntoIterator<Item = SnapEntry<K>>) -> Result<Self, SnapPointsError> {
        let entries: SmallVec<[SnapEntry<K>; 4]> = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(SnapPointsError::Empty);
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (index, entry) in entries.iter().enumerate() {
            if !entry.position.is_finite() {
                return Err(SnapPointsError::NonFinitePosition { index });
            }
            if entries[..index].iter().any(|e| e.id == entry.id) {
                return Err(SnapPointsError::DuplicateId { index });
            }
            min = min.min(entry.position);
            max = max.max(entry.position);
        }

        Ok(Self { entries, min, max })
    }

    /// Returns the position bound to `id`, if it is part of the set.
    #[must_use]
    pub fn position_of(&self, id: K) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.position)
    }

    /// Returns `true` if `id` is part of the set.
    #[must_use]
    pub fn contains(&self, id: K) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Returns the id nearest to `value`, first entry winning ties.
    #[must_use]
    pub fn resolve(&self, value: f64) -> K {
        match resolve_nearest(value, &self.entries) {
            Some(id) => id,
            // `new` rejects empty sets.
            None => unreachable!("snap point set is never empty"),
        }
    }
}

impl<K> SnapPoints<K> {
    /// Smallest position in the set (the most visible one).
    #[must_use]
    pub fn min_position(&self) -> f64 {
        self.min
    }

    /// Largest position in the set (the most hidden one).
    #[must_use]
    pub fn max_position(&self) -> f64 {
        self.max
    }

    /// Entries in enumeration order.
    #[must_use]
    pub fn entries(&self) -> &[SnapEntry<K>] {
        &self.entries
    }

    /// Iterates over entries in enumeration order.
    pub fn iter(&self) -> core::slice::Iter<'_, SnapEntry<K>> {
        self.entries.iter()
    }

    /// Number of snap points. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SnapPoints<SnapPoint> {
    /// Closed at 100, Half at 50, Full at 10, in that order.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            entries: SnapPoint::ALL
                .iter()
                .map(|&id| SnapEntry::new(id, id.position()))
                .collect(),
            min: SnapPoint::Full.position(),
            max: SnapPoint::Closed.position(),
        }
    }
}

impl<'a, K> IntoIterator for &'a SnapPoints<K> {
    type Item = &'a SnapEntry<K>;
    type IntoIter = core::slice::Iter<'a, SnapEntry<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Reasons a list of entries cannot form a [`SnapPoints`] set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapPointsError {
    /// No entries were given.
    Empty,
    /// The entry at `index` has a NaN or infinite position.
    NonFinitePosition {
        /// Index of the offending entry.
        index: usize,
    },
    /// The entry at `index` repeats an earlier id.
    DuplicateId {
        /// Index of the offending entry.
        index: usize,
    },
}

impl fmt::Display for SnapPointsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("a sheet needs at least one snap point"),
            Self::NonFinitePosition { index } => {
                write!(f, "snap point {index} has a non-finite position")
            }
            Self::DuplicateId { index } => {
                write!(f, "snap point {index} repeats an earlier id")
            }
        }
    }
}

impl core::error::Error for SnapPointsError {}
