#![forbid(unsafe_code)]

//! Ordinal comparisons between breakpoint labels.
//!
//! Rank is the index of a label in the canonical `sizes` sequence. A label
//! that is not in the sequence has rank `-1`, so it compares as smaller than
//! every known label: `is_larger_than(unknown)` is `true` for any known
//! current tier. This is a quirk callers must account for, not an error.
//!
//! Each predicate computes both ranks on every call; nothing is cached, so
//! a comparator built from the latest committed tier is always current.

use std::cmp::Ordering;

use crate::Breakpoint;

/// Rank of `label` within `sizes`, or `-1` if absent.
#[must_use]
pub fn rank_of(sizes: &[Breakpoint], label: &Breakpoint) -> isize {
    sizes
        .iter()
        .position(|s| s == label)
        .map_or(-1, |idx| idx as isize)
}

/// The five relational predicates against a fixed current tier.
#[derive(Debug, Clone, Copy)]
pub struct SizeComparator<'a> {
    sizes: &'a [Breakpoint],
    current: &'a Breakpoint,
}

impl<'a> SizeComparator<'a> {
    /// Compare against `current`, ranking labels by their position in `sizes`.
    #[must_use]
    pub fn new(sizes: &'a [Breakpoint], current: &'a Breakpoint) -> Self {
        Self { sizes, current }
    }

    /// The reference tier.
    #[must_use]
    pub fn current(&self) -> &'a Breakpoint {
        self.current
    }

    /// `(rank(current), rank(other))`.
    #[must_use]
    pub fn ranks(&self, other: &Breakpoint) -> (isize, isize) {
        (rank_of(self.sizes, self.current), rank_of(self.sizes, other))
    }

    /// Ordering of the current tier relative to `other`.
    #[must_use]
    pub fn compare(&self, other: &Breakpoint) -> Ordering {
        let (current, other) = self.ranks(other);
        current.cmp(&other)
    }

    /// `rank(current) >= rank(other)`.
    #[must_use]
    pub fn is_equal_or_larger_than(&self, other: &Breakpoint) -> bool {
        self.compare(other) != Ordering::Less
    }

    /// `rank(current) > rank(other)`.
    #[must_use]
    pub fn is_larger_than(&self, other: &Breakpoint) -> bool {
        self.compare(other) == Ordering::Greater
    }

    /// `rank(current) == rank(other)`.
    #[must_use]
    pub fn is_equal_to(&self, other: &Breakpoint) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// `rank(current) < rank(other)`.
    #[must_use]
    pub fn is_smaller_than(&self, other: &Breakpoint) -> bool {
        self.compare(other) == Ordering::Less
    }

    /// `rank(current) <= rank(other)`.
    #[must_use]
    pub fn is_equal_or_smaller_than(&self, other: &Breakpoint) -> bool {
        self.compare(other) != Ordering::Greater
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_is_position() {
        let sizes = Breakpoint::STANDARD;
        assert_eq!(rank_of(&sizes, &Breakpoint::XS), 0);
        assert_eq!(rank_of(&sizes, &Breakpoint::LG), 3);
        assert_eq!(rank_of(&sizes, &Breakpoint::new("tablet")), -1);
        assert_eq!(rank_of(&[], &Breakpoint::XS), -1);
    }

    #[test]
    fn predicates_against_md() {
        let sizes = Breakpoint::STANDARD;
        let current = Breakpoint::MD;
        let cmp = SizeComparator::new(&sizes, &current);

        assert!(cmp.is_equal_or_larger_than(&Breakpoint::SM));
        assert!(cmp.is_equal_or_larger_than(&Breakpoint::MD));
        assert!(!cmp.is_equal_or_larger_than(&Breakpoint::LG));

        assert!(cmp.is_larger_than(&Breakpoint::XS));
        assert!(!cmp.is_larger_than(&Breakpoint::MD));

        assert!(cmp.is_equal_to(&Breakpoint::MD));
        assert!(!cmp.is_equal_to(&Breakpoint::LG));

        assert!(cmp.is_smaller_than(&Breakpoint::XXL));
        assert!(!cmp.is_smaller_than(&Breakpoint::MD));

        assert!(cmp.is_equal_or_smaller_than(&Breakpoint::MD));
        assert!(cmp.is_equal_or_smaller_than(&Breakpoint::XL));
        assert!(!cmp.is_equal_or_smaller_than(&Breakpoint::SM));
    }

    #[test]
    fn unknown_label_ranks_below_everything() {
        let sizes = Breakpoint::STANDARD;
        let unknown = Breakpoint::new("gigantic");

        let current = Breakpoint::XS;
        let cmp = SizeComparator::new(&sizes, &current);
        assert!(cmp.is_larger_than(&unknown));
        assert!(!cmp.is_smaller_than(&unknown));
        assert!(!cmp.is_equal_to(&unknown));
    }

    #[test]
    fn unknown_current_equals_unknown_query() {
        // Both sides rank -1.
        let sizes = Breakpoint::STANDARD;
        let current = Breakpoint::new("custom");
        let cmp = SizeComparator::new(&sizes, &current);
        assert!(cmp.is_equal_to(&Breakpoint::new("other")));
        assert!(cmp.is_smaller_than(&Breakpoint::XS));
    }

    #[test]
    fn custom_order_overrides_names() {
        // Same labels, reversed rank.
        let sizes = [Breakpoint::XL, Breakpoint::SM];
        let current = Breakpoint::SM;
        let cmp = SizeComparator::new(&sizes, &current);
        assert!(cmp.is_larger_than(&Breakpoint::XL));
        assert_eq!(cmp.compare(&Breakpoint::XL), Ordering::Greater);
        assert_eq!(cmp.ranks(&Breakpoint::XL), (1, 0));
    }
}
