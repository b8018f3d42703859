#![forbid(unsafe_code)]

//! dims runtime
//!
//! This crate keeps a breakpoint classification current as a viewport
//! resizes, on top of the pure resolution layer in `dims-core`.
//!
//! # Key Components
//!
//! - [`DimensionTracker`] - Committed `{width, height, size}` state, the
//!   resize update policy, and the five size predicates
//! - [`BreakpointContext`] - Shared handle to the canonical threshold table
//! - [`Viewport`] - Host interface for inner size and resize notification
//! - [`ManualViewport`] - Headless viewport driven by explicit `resize` calls
//! - [`Observable`] - Version-tracked value with change notification
//! - `DimsConfig` - TOML/JSON configuration (`config` feature)
//!
//! # How it fits in the system
//! A host adapts its window to [`Viewport`], builds one
//! [`BreakpointContext`], and creates a tracker per consumer. Each tracker
//! re-reads the context on every resize, filters against its allow-list,
//! and commits only real changes, so subscribers and version-based diffing
//! see a notification exactly when the observable state moved.

#[cfg(feature = "config")]
pub mod config;
pub mod context;
pub mod reactive;
pub mod tracker;
pub mod viewport;

#[cfg(feature = "config")]
pub use config::{ConfigError, DimsConfig, TableConfig};
pub use context::BreakpointContext;
pub use reactive::{Observable, Subscription};
pub use tracker::{DimensionTracker, Dimensions, ResizeOutcome, TrackerConfig};
pub use viewport::{ListenerId, ManualViewport, ResizeHandler, ResizeListener, Viewport};
