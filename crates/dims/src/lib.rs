#![forbid(unsafe_code)]

//! dims public facade crate.
//!
//! This crate provides the stable surface area for users. It re-exports the
//! common types from the internal crates and offers a lightweight prelude.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use dims::prelude::*;
//!
//! let viewport = Rc::new(ManualViewport::new(1024, 768));
//! let mut tracker = DimensionTracker::with_viewport(
//!     BreakpointContext::default(),
//!     TrackerConfig::default(),
//!     viewport.clone(),
//! );
//! tracker.activate();
//!
//! assert_eq!(tracker.size(), Breakpoint::LG);
//! viewport.resize(500, 400);
//! assert!(tracker.is_size_smaller_than(&Breakpoint::SM));
//! ```

pub mod error;

// --- Core re-exports -------------------------------------------------------

pub use dims_core::{
    Breakpoint, DEFAULT_WIDTHS, SizeComparator, TableError, ThresholdTable, ViewportSize, rank_of,
    resolve, resolve_index,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "config")]
pub use dims_runtime::{ConfigError, DimsConfig, TableConfig};
pub use dims_runtime::{
    BreakpointContext, DimensionTracker, Dimensions, ListenerId, ManualViewport, Observable,
    ResizeHandler, ResizeListener, ResizeOutcome, Subscription, TrackerConfig, Viewport,
};

pub use error::{Error, Result};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Breakpoint, BreakpointContext, DimensionTracker, Dimensions, Error, ManualViewport,
        ResizeOutcome, Result, ThresholdTable, TrackerConfig, Viewport, ViewportSize,
    };

    pub use crate::{core, runtime};
}

pub use dims_core as core;
pub use dims_runtime as runtime;
