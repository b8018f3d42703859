#![forbid(unsafe_code)]

//! Viewport access and resize notification.
//!
//! A [`Viewport`] reports its inner size and delivers resize notifications
//! to registered handlers. Hosts adapt their windowing layer to this trait;
//! [`ManualViewport`] is the headless implementation for tests and for
//! embedders that drive resizes themselves.
//!
//! A non-interactive environment has no viewport at all. Trackers take an
//! `Option<Rc<dyn Viewport>>` and treat `None` as a degraded mode rather
//! than an error.
//!
//! # Invariants
//!
//! 1. Notifications are delivered serially, in listener registration order.
//! 2. Handlers are snapshotted before dispatch, so a handler may add or
//!    remove listeners without affecting the in-flight dispatch.
//! 3. A [`ResizeListener`] guard removes its listener exactly once, on drop.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use dims_core::ViewportSize;

/// Callback invoked with the new inner size on every resize.
pub type ResizeHandler = Rc<dyn Fn(ViewportSize)>;

/// Identifier of a registered resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A host viewport: inner size plus resize notifications.
pub trait Viewport {
    /// Current inner size.
    fn inner_size(&self) -> ViewportSize;

    /// Register `handler` for resize notifications.
    fn add_resize_listener(&self, handler: ResizeHandler) -> ListenerId;

    /// Unregister a listener. Returns `false` if `id` was not registered.
    fn remove_resize_listener(&self, id: ListenerId) -> bool;
}

/// Scoped registration of a resize handler.
///
/// Dropping the guard unregisters the handler.
pub struct ResizeListener {
    viewport: Rc<dyn Viewport>,
    id: ListenerId,
}

impl ResizeListener {
    /// Register `handler` on `viewport` for the lifetime of the guard.
    #[must_use]
    pub fn attach(viewport: Rc<dyn Viewport>, handler: ResizeHandler) -> Self {
        let id = viewport.add_resize_listener(handler);
        Self { viewport, id }
    }

    /// Identifier of the registration.
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        if !self.viewport.remove_resize_listener(self.id) {
            tracing::warn!(listener = self.id.get(), "resize listener already removed");
        }
    }
}

impl fmt::Debug for ResizeListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeListener")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// ManualViewport
// ---------------------------------------------------------------------------

struct ManualInner {
    size: ViewportSize,
    next_id: u64,
    listeners: Vec<(ListenerId, ResizeHandler)>,
}

/// In-memory viewport whose size changes only when [`resize`](Self::resize)
/// is called.
pub struct ManualViewport {
    inner: RefCell<ManualInner>,
}

impl ManualViewport {
    /// Create a viewport with the given inner size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            inner: RefCell::new(ManualInner {
                size: ViewportSize::new(width, height),
                next_id: 1,
                listeners: Vec::new(),
            }),
        }
    }

    /// Change the inner size and notify every listener.
    pub fn resize(&self, width: u32, height: u32) {
        let size = ViewportSize::new(width, height);
        self.inner.borrow_mut().size = size;
        self.dispatch(size);
    }

    /// Deliver a resize notification carrying `size` without changing the
    /// stored inner size.
    pub fn dispatch(&self, size: ViewportSize) {
        let handlers: Vec<ResizeHandler> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        tracing::trace!(
            width = size.width,
            height = size.height,
            listeners = handlers.len(),
            "dispatching resize"
        );
        for handler in handlers {
            handler(size);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl Viewport for ManualViewport {
    fn inner_size(&self) -> ViewportSize {
        self.inner.borrow().size
    }

    fn add_resize_listener(&self, handler: ResizeHandler) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, handler));
        id
    }

    fn remove_resize_listener(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(lid, _)| *lid != id);
        inner.listeners.len() != before
    }
}

impl fmt::Debug for ManualViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ManualViewport")
            .field("size", &inner.size)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}
