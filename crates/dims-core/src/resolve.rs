#![forbid(unsafe_code)]

//! Width → breakpoint resolution.
//!
//! Thresholds are lower bounds of increasing tiers: `sizes[i]` applies when
//! `widths[i] <= width < widths[i + 1]`, and the last entry applies to every
//! width at or above its threshold.
//!
//! Resolution scans from the top and takes the *last* qualifying threshold.
//! A width below every threshold falls back to the first label, so a table
//! whose first threshold is not `0` still classifies tiny viewports.
//!
//! # Invariants
//!
//! 1. For non-decreasing `widths` and `width >= widths[0]`, the result is the
//!    label of the greatest `widths[i] <= width`.
//! 2. For `width < widths[0]`, the result is `sizes[0]`.
//! 3. With duplicate thresholds, the higher index wins.

use crate::Breakpoint;

/// Index of the tier that `width` falls into.
///
/// Returns `0` when no threshold qualifies, including for an empty slice.
#[must_use]
pub fn resolve_index(width: u32, widths: &[u32]) -> usize {
    find_last_index(widths, |&min| width >= min).unwrap_or(0)
}

/// Resolve `width` against parallel `widths` / `sizes` sequences.
///
/// Returns `None` only when `sizes` has no entry at the resolved index,
/// which for a well-formed table means the table is empty.
#[must_use]
pub fn resolve<'a>(width: u32, widths: &[u32], sizes: &'a [Breakpoint]) -> Option<&'a Breakpoint> {
    sizes.get(resolve_index(width, widths))
}

/// Position of the last element matching `predicate`.
pub(crate) fn find_last_index<T>(items: &[T], predicate: impl Fn(&T) -> bool) -> Option<usize> {
    items.iter().rposition(predicate)
}
