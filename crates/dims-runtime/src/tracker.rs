#![forbid(unsafe_code)]

//! Dimension tracking: the committed `{width, height, size}` state of a
//! viewport and the policy deciding when a resize changes it.
//!
//! # Update policy
//!
//! For each resize to `(width, height)`:
//!
//! 1. Resolve `width` against the context's table to a candidate tier.
//! 2. If the allow-list is non-empty and lacks the candidate, drop the
//!    event entirely. Height is not updated either.
//! 3. Build the tentative state from the current one: width and height are
//!    copied from the event only when `watch_window_size` is set; the tier
//!    is always the candidate.
//! 4. Commit only if the tentative state differs from the current one.
//!    Otherwise the version and subscribers are left untouched.
//!
//! # Lifecycle
//!
//! A tracker starts inactive. [`activate`](DimensionTracker::activate)
//! attaches one resize listener, replacing any previous one;
//! [`deactivate`](DimensionTracker::deactivate) or dropping the tracker
//! detaches it. Without a viewport the tracker stays at its fallback state
//! `{0, 0, <largest tier>}` and activation does nothing.

use std::fmt;
use std::rc::Rc;

use dims_core::{Breakpoint, SizeComparator, ViewportSize};
use tracing::{debug, debug_span, info, trace};

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::context::BreakpointContext;
use crate::reactive::{Observable, Subscription};
use crate::viewport::{ResizeHandler, ResizeListener, Viewport};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The committed state of a tracker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct Dimensions {
    /// Viewport width, frozen at its initial value unless
    /// `watch_window_size` is set.
    pub width: u32,
    /// Viewport height, frozen like `width`.
    pub height: u32,
    /// Current tier.
    pub size: Breakpoint,
}

impl Dimensions {
    /// Create a state record.
    #[must_use]
    pub fn new(width: u32, height: u32, size: Breakpoint) -> Self {
        Self {
            width,
            height,
            size,
        }
    }
}

/// Tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TrackerConfig {
    /// Tiers the tracker may transition into.
    ///
    /// `None` allows every tier of the table. An empty list disables
    /// filtering as well. Labels the table does not know are ignored.
    pub breakpoints: Option<Vec<Breakpoint>>,

    /// Update width and height on every accepted resize, not just the tier.
    pub watch_window_size: bool,
}

impl TrackerConfig {
    /// Restrict transitions to `breakpoints` (builder pattern).
    #[must_use]
    pub fn with_breakpoints(mut self, breakpoints: impl IntoIterator<Item = Breakpoint>) -> Self {
        self.breakpoints = Some(breakpoints.into_iter().collect());
        self
    }

    /// Set whether width and height follow the viewport (builder pattern).
    #[must_use]
    pub fn with_watch_window_size(mut self, watch: bool) -> Self {
        self.watch_window_size = watch;
        self
    }

    /// Whether the allow-list admits `candidate`.
    #[must_use]
    pub fn allows(&self, candidate: &Breakpoint) -> bool {
        match &self.breakpoints {
            None => true,
            Some(list) => list.is_empty() || list.contains(candidate),
        }
    }
}

/// What a resize did to the committed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// A new state was committed.
    Committed(Dimensions),
    /// The tentative state equalled the current one.
    Unchanged,
    /// The candidate tier is not in the allow-list.
    Filtered {
        /// Tier the width resolved to.
        candidate: Breakpoint,
    },
}

impl ResizeOutcome {
    /// Whether the committed state changed.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

// ---------------------------------------------------------------------------
// Update path
// ---------------------------------------------------------------------------

fn apply_resize(
    context: &BreakpointContext,
    config: &TrackerConfig,
    state: &Observable<Dimensions>,
    size: ViewportSize,
) -> ResizeOutcome {
    let _span = debug_span!("dims.resize", width = size.width, height = size.height).entered();

    let candidate = context.with_table(|table| table.resolve(size.width).clone());
    if !config.allows(&candidate) {
        debug!(%candidate, "candidate tier not in allow-list; resize dropped");
        return ResizeOutcome::Filtered { candidate };
    }

    let current = state.get();
    let mut next = current.clone();
    if config.watch_window_size {
        next.width = size.width;
        next.height = size.height;
    }
    next.size = candidate;

    if next == current {
        trace!(size = %next.size, "dimensions unchanged");
        return ResizeOutcome::Unchanged;
    }

    debug!(
        from = %current.size,
        to = %next.size,
        width = next.width,
        height = next.height,
        "dimensions committed"
    );
    state.set(next.clone());
    ResizeOutcome::Committed(next)
}

// ---------------------------------------------------------------------------
// DimensionTracker
// ---------------------------------------------------------------------------

/// Keeps a breakpoint classification current as a viewport resizes.
///
/// Reads are synchronous and always reflect the latest commit. The type is
/// single-threaded (`!Send`), like the viewport that drives it.
pub struct DimensionTracker {
    context: BreakpointContext,
    config: Rc<TrackerConfig>,
    state: Observable<Dimensions>,
    viewport: Option<Rc<dyn Viewport>>,
    listener: Option<ResizeListener>,
}

impl DimensionTracker {
    /// Create an inactive tracker.
    ///
    /// With a viewport, the initial state is its inner size and the tier of
    /// its inner width. Without one, the state is `{0, 0, <largest tier>}`.
    #[must_use]
    pub fn new(
        context: BreakpointContext,
        config: TrackerConfig,
        viewport: Option<Rc<dyn Viewport>>,
    ) -> Self {
        let initial = match &viewport {
            Some(vp) => {
                let size = vp.inner_size();
                let tier = context.with_table(|table| table.resolve(size.width).clone());
                Dimensions::new(size.width, size.height, tier)
            }
            None => {
                let tier = context.with_table(|table| table.largest().clone());
                info!(%tier, "no viewport; using fallback dimensions");
                Dimensions::new(0, 0, tier)
            }
        };
        debug!(
            width = initial.width,
            height = initial.height,
            size = %initial.size,
            "dimension tracker created"
        );

        Self {
            context,
            config: Rc::new(config),
            state: Observable::new(initial),
            viewport,
            listener: None,
        }
    }

    /// Create an inactive tracker bound to `viewport`.
    #[must_use]
    pub fn with_viewport(
        context: BreakpointContext,
        config: TrackerConfig,
        viewport: Rc<dyn Viewport>,
    ) -> Self {
        Self::new(context, config, Some(viewport))
    }

    /// Create a tracker for an environment without a viewport.
    #[must_use]
    pub fn headless(context: BreakpointContext, config: TrackerConfig) -> Self {
        Self::new(context, config, None)
    }

    // --- Lifecycle ---------------------------------------------------------

    /// Attach the resize listener, replacing any existing one.
    ///
    /// Returns `false` when there is no viewport to listen to.
    pub fn activate(&mut self) -> bool {
        let Some(viewport) = self.viewport.clone() else {
            info!("no viewport; resize tracking disabled");
            return false;
        };

        // Detach first so the viewport never holds two of our listeners.
        self.listener = None;

        let context = self.context.clone();
        let config = Rc::clone(&self.config);
        let state = self.state.clone();
        let handler: ResizeHandler = Rc::new(move |size| {
            apply_resize(&context, &config, &state, size);
        });
        let listener = ResizeListener::attach(viewport, handler);
        info!(listener = listener.id().get(), "resize tracking activated");
        self.listener = Some(listener);
        true
    }

    /// Detach the resize listener, if any.
    pub fn deactivate(&mut self) {
        if let Some(listener) = self.listener.take() {
            info!(listener = listener.id().get(), "resize tracking deactivated");
        }
    }

    /// Whether a resize listener is attached.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    /// Whether this tracker has a viewport at all.
    #[must_use]
    pub fn has_viewport(&self) -> bool {
        self.viewport.is_some()
    }

    /// Replace the configuration, re-attaching the listener if active.
    ///
    /// The committed state is kept as is.
    pub fn reconfigure(&mut self, config: TrackerConfig) {
        if *self.config == config {
            return;
        }
        let was_active = self.is_active();
        self.deactivate();
        self.config = Rc::new(config);
        debug!(config = ?self.config, "tracker reconfigured");
        if was_active {
            self.activate();
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// The shared breakpoint context.
    #[must_use]
    pub fn context(&self) -> &BreakpointContext {
        &self.context
    }

    // --- Updates -----------------------------------------------------------

    /// Apply a resize to `(width, height)` directly, as the listener does.
    pub fn on_resize(&self, width: u32, height: u32) -> ResizeOutcome {
        apply_resize(
            &self.context,
            &self.config,
            &self.state,
            ViewportSize::new(width, height),
        )
    }

    // --- Reads -------------------------------------------------------------

    /// Snapshot of the committed state.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.state.get()
    }

    /// Committed width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.state.with(|d| d.width)
    }

    /// Committed height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.state.with(|d| d.height)
    }

    /// Committed tier.
    #[must_use]
    pub fn size(&self) -> Breakpoint {
        self.state.with(|d| d.size.clone())
    }

    /// Number of commits so far. Unchanged and filtered resizes do not
    /// advance it.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.state.version()
    }

    /// Be notified on every commit.
    pub fn subscribe(&self, callback: impl Fn(&Dimensions) + 'static) -> Subscription {
        self.state.subscribe(callback)
    }

    /// Run `f` with a comparator for the committed tier against the
    /// context's current label order.
    ///
    /// The comparator works on snapshots, so `f` may resize the tracker or
    /// replace the table; it keeps comparing against the values seen on
    /// entry.
    pub fn with_comparator<R>(&self, f: impl FnOnce(&SizeComparator<'_>) -> R) -> R {
        let current = self.size();
        let table = self.context.table();
        f(&table.comparator(&current))
    }

    // --- Predicates --------------------------------------------------------

    /// `rank(current) >= rank(size)`.
    #[must_use]
    pub fn is_size_equal_or_larger_than(&self, size: &Breakpoint) -> bool {
        self.with_comparator(|cmp| cmp.is_equal_or_larger_than(size))
    }

    /// `rank(current) > rank(size)`.
    #[must_use]
    pub fn is_size_larger_than(&self, size: &Breakpoint) -> bool {
        self.with_comparator(|cmp| cmp.is_larger_than(size))
    }

    /// `rank(current) == rank(size)`.
    #[must_use]
    pub fn is_size_equal_to(&self, size: &Breakpoint) -> bool {
        self.with_comparator(|cmp| cmp.is_equal_to(size))
    }

    /// `rank(current) < rank(size)`.
    #[must_use]
    pub fn is_size_smaller_than(&self, size: &Breakpoint) -> bool {
        self.with_comparator(|cmp| cmp.is_smaller_than(size))
    }

    /// `rank(current) <= rank(size)`.
    #[must_use]
    pub fn is_size_equal_or_smaller_than(&self, size: &Breakpoint) -> bool {
        self.with_comparator(|cmp| cmp.is_equal_or_smaller_than(size))
    }
}

impl Drop for DimensionTracker {
    fn drop(&mut self) {
        self.deactivate();
    }
}

impl fmt::Debug for DimensionTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DimensionTracker")
            .field("dimensions", &self.state.get())
            .field("version", &self.state.version())
            .field("config", &self.config)
            .field("has_viewport", &self.viewport.is_some())
            .field("active", &self.listener.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
