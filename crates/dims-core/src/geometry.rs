#![forbid(unsafe_code)]

//! Geometric primitives.

use serde::{Deserialize, Serialize};

/// Inner dimensions of a viewport, in pixels.
///
/// This is also the payload of a resize notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ViewportSize {
    /// Inner width.
    pub width: u32,
    /// Inner height.
    pub height: u32,
}

impl ViewportSize {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
