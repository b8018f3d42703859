#![forbid(unsafe_code)]

//! Shared committed values with change notification.
//!
//! [`Observable<T>`] is the cell behind both the tracker state and the
//! breakpoint context. Handles are cheap clones of one `Rc<RefCell<..>>`
//! slot. Writes go through [`set`](Observable::set), which compares before
//! storing: an equal value is rejected outright, so the version counter
//! counts real commits and listeners only hear about real changes.
//!
//! Listeners are held strongly by the slot and removed by their
//! [`Subscription`] guard on drop, the same scoped-registration shape as
//! [`ResizeListener`](crate::viewport::ResizeListener).

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, debug_span};
use web_time::Instant;

type Listener<T> = Rc<dyn Fn(&T)>;

struct Slot<T> {
    value: T,
    version: u64,
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

/// Removal hook a [`Subscription`] calls without knowing `T`.
trait Detach {
    fn detach(&self, id: u64);
}

impl<T> Detach for RefCell<Slot<T>> {
    fn detach(&self, id: u64) {
        self.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
    }
}

/// A shared value that counts and announces its changes.
///
/// Clones are handles to the same slot.
pub struct Observable<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("Observable")
            .field("value", &slot.value)
            .field("version", &slot.version)
            .finish_non_exhaustive()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Wrap `value` at version 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                value,
                version: 0,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Clone out the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.slot.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`.
    ///
    /// `f` must not call [`set`](Self::set) on any handle to this slot.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.slot.borrow().value)
    }

    /// Store `value` if it differs from the current one.
    ///
    /// Returns whether a commit happened. On commit the version advances by
    /// one and every listener runs, in subscription order, after the slot
    /// is released; a listener may therefore call `set` itself.
    pub fn set(&self, value: T) -> bool {
        let (listeners, version) = {
            let mut slot = self.slot.borrow_mut();
            if slot.value == value {
                return false;
            }
            slot.value = value;
            slot.version += 1;
            let listeners: Vec<Listener<T>> =
                slot.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
            (listeners, slot.version)
        };

        if !listeners.is_empty() {
            self.announce(&listeners, version);
        }
        true
    }

    /// Number of commits so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.slot.borrow().version
    }

    /// Call `listener` after every commit until the guard is dropped.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut slot = self.slot.borrow_mut();
            let id = slot.next_id;
            slot.next_id += 1;
            slot.listeners.push((id, Rc::new(listener)));
            id
        };
        let weak: Weak<RefCell<Slot<T>>> = Rc::downgrade(&self.slot);
        Subscription { slot: weak, id }
    }

    fn announce(&self, listeners: &[Listener<T>], version: u64) {
        let value = self.get();
        let started = Instant::now();
        let _span = debug_span!("dims.commit", version, listeners = listeners.len()).entered();
        for listener in listeners {
            listener(&value);
        }
        debug!(
            elapsed_us = started.elapsed().as_micros() as u64,
            "commit propagated"
        );
    }
}

/// Keeps a listener registered; dropping it unregisters.
///
/// Outliving the observable is harmless: the drop finds nothing to detach.
pub struct Subscription {
    slot: Weak<dyn Detach>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.upgrade() {
            slot.detach(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
