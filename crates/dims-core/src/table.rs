#![forbid(unsafe_code)]

//! Threshold tables: the canonical label order plus minimum widths.
//!
//! A [`ThresholdTable`] pairs `sizes[i]` with `widths[i]`. The order of
//! `sizes` *is* the rank order used by comparisons, and `widths` gives the
//! lower bound of each tier.
//!
//! # Invariants
//!
//! 1. `sizes.len() == widths.len()` and both are non-empty.
//! 2. `widths` is non-decreasing.
//! 3. Labels are unique, so every label has exactly one rank.
//!
//! All three are checked by [`ThresholdTable::new`]; a table that exists
//! is well-formed, which is why [`ThresholdTable::resolve`] cannot fail.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Breakpoint;
use crate::ordinal::{SizeComparator, rank_of};
use crate::resolve::resolve_index;

/// Default minimum widths matching [`Breakpoint::STANDARD`].
pub const DEFAULT_WIDTHS: [u32; 6] = [0, 576, 768, 992, 1200, 1400];

/// Reasons a threshold table is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// No tiers at all.
    Empty,
    /// `sizes` and `widths` have different lengths.
    LengthMismatch { sizes: usize, widths: usize },
    /// `widths[index]` is smaller than `widths[index - 1]`.
    NotMonotonic { index: usize, previous: u32, width: u32 },
    /// The same label appears twice.
    DuplicateLabel(Breakpoint),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "threshold table has no tiers"),
            Self::LengthMismatch { sizes, widths } => write!(
                f,
                "threshold table has {sizes} sizes but {widths} widths"
            ),
            Self::NotMonotonic {
                index,
                previous,
                width,
            } => write!(
                f,
                "widths must be non-decreasing: widths[{index}] = {width} < {previous}"
            ),
            Self::DuplicateLabel(label) => write!(f, "duplicate breakpoint label: {label}"),
        }
    }
}

impl std::error::Error for TableError {}

/// Ordered breakpoint labels with their minimum widths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThresholdTable {
    sizes: Vec<Breakpoint>,
    widths: Vec<u32>,
}

impl ThresholdTable {
    /// Build a table from parallel sequences, validating its invariants.
    pub fn new(
        sizes: impl IntoIterator<Item = Breakpoint>,
        widths: impl IntoIterator<Item = u32>,
    ) -> Result<Self, TableError> {
        let sizes: Vec<Breakpoint> = sizes.into_iter().collect();
        let widths: Vec<u32> = widths.into_iter().collect();

        if sizes.len() != widths.len() {
            return Err(TableError::LengthMismatch {
                sizes: sizes.len(),
                widths: widths.len(),
            });
        }
        if sizes.is_empty() {
            return Err(TableError::Empty);
        }
        if let Some(index) = widths.windows(2).position(|w| w[1] < w[0]) {
            return Err(TableError::NotMonotonic {
                index: index + 1,
                previous: widths[index],
                width: widths[index + 1],
            });
        }
        for (i, label) in sizes.iter().enumerate() {
            if sizes[..i].contains(label) {
                return Err(TableError::DuplicateLabel(label.clone()));
            }
        }

        Ok(Self { sizes, widths })
    }

    /// Build a table from `(label, min_width)` pairs.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (Breakpoint, u32)>,
    ) -> Result<Self, TableError> {
        let (sizes, widths): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self::new(sizes, widths)
    }

    /// Labels in rank order, smallest first.
    #[must_use]
    pub fn sizes(&self) -> &[Breakpoint] {
        &self.sizes
    }

    /// Minimum widths, parallel to [`sizes`](Self::sizes).
    #[must_use]
    pub fn widths(&self) -> &[u32] {
        &self.widths
    }

    /// Number of tiers (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Always `false`; provided for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Smallest tier.
    #[must_use]
    pub fn smallest(&self) -> &Breakpoint {
        &self.sizes[0]
    }

    /// Largest tier, the fallback when there is no viewport to measure.
    #[must_use]
    pub fn largest(&self) -> &Breakpoint {
        &self.sizes[self.sizes.len() - 1]
    }

    /// Classify `width` into a tier.
    #[must_use]
    pub fn resolve(&self, width: u32) -> &Breakpoint {
        &self.sizes[resolve_index(width, &self.widths)]
    }

    /// Whether `label` is one of this table's tiers.
    #[must_use]
    pub fn contains(&self, label: &Breakpoint) -> bool {
        self.sizes.contains(label)
    }

    /// Rank of `label`, or `-1` when it is not in the table.
    #[must_use]
    pub fn rank_of(&self, label: &Breakpoint) -> isize {
        rank_of(&self.sizes, label)
    }

    /// Minimum width of `label`'s tier.
    #[must_use]
    pub fn min_width_of(&self, label: &Breakpoint) -> Option<u32> {
        let idx = self.sizes.iter().position(|s| s == label)?;
        Some(self.widths[idx])
    }

    /// Check whether moving from `old_width` to `new_width` crosses a tier
    /// boundary.
    ///
    /// Returns `Some((old, new))` if the tier changed, `None` otherwise.
    #[must_use]
    pub fn detect_transition(
        &self,
        old_width: u32,
        new_width: u32,
    ) -> Option<(Breakpoint, Breakpoint)> {
        let old = self.resolve(old_width);
        let new = self.resolve(new_width);
        if old != new {
            Some((old.clone(), new.clone()))
        } else {
            None
        }
    }

    /// Comparison predicates with `current` as the reference tier.
    #[must_use]
    pub fn comparator<'a>(&'a self, current: &'a Breakpoint) -> SizeComparator<'a> {
        SizeComparator::new(&self.sizes, current)
    }

    /// Iterate `(label, min_width)` pairs in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&Breakpoint, u32)> {
        self.sizes.iter().zip(self.widths.iter().copied())
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            sizes: Breakpoint::STANDARD.to_vec(),
            widths: DEFAULT_WIDTHS.to_vec(),
        }
    }
}

#[derive(Deserialize)]
struct RawTable {
    sizes: Vec<Breakpoint>,
    widths: Vec<u32>,
}

impl<'de> Deserialize<'de> for ThresholdTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawTable::deserialize(deserializer)?;
        Self::new(raw.sizes, raw.widths).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ThresholdTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ThresholdTable(")?;
        let mut first = true;
        for (label, width) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{label}>={width}")?;
            first = false;
        }
        write!(f, ")")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
