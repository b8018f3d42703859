#![forbid(unsafe_code)]

//! Core: breakpoint labels, threshold tables, resolution and comparison.
//!
//! # Role in dims
//! `dims-core` is the pure layer. It maps a viewport width to a size tier
//! and answers ordinal questions about tiers. It owns no state and performs
//! no I/O; the tracker in `dims-runtime` drives it from resize events.
//!
//! # Primary responsibilities
//! - **Breakpoint**: opaque tier label, ranked by position in a table.
//! - **ThresholdTable**: validated `(label, min_width)` sequence.
//! - **Resolution**: width → tier, last qualifying threshold wins.
//! - **SizeComparator**: `>=`, `>`, `==`, `<`, `<=` between tiers.

pub mod breakpoint;
pub mod geometry;
pub mod ordinal;
pub mod resolve;
pub mod table;

pub use breakpoint::Breakpoint;
pub use geometry::ViewportSize;
pub use ordinal::{SizeComparator, rank_of};
pub use resolve::{resolve, resolve_index};
pub use table::{DEFAULT_WIDTHS, TableError, ThresholdTable};
