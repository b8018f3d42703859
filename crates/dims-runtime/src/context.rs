#![forbid(unsafe_code)]

//! Shared breakpoint table.
//!
//! A [`BreakpointContext`] is the one place the canonical label order and
//! thresholds live. Trackers receive a clone of the handle at construction
//! instead of looking the table up implicitly, and re-read it on every
//! resolve, so [`set_table`](BreakpointContext::set_table) takes effect for
//! every tracker on its next resize.

use dims_core::ThresholdTable;

use crate::reactive::{Observable, Subscription};

/// Clonable, shared handle to the canonical [`ThresholdTable`].
#[derive(Debug, Clone)]
pub struct BreakpointContext {
    table: Observable<ThresholdTable>,
}

impl BreakpointContext {
    /// Create a context around `table`.
    #[must_use]
    pub fn new(table: ThresholdTable) -> Self {
        Self {
            table: Observable::new(table),
        }
    }

    /// Borrow the current table.
    pub fn with_table<R>(&self, f: impl FnOnce(&ThresholdTable) -> R) -> R {
        self.table.with(f)
    }

    /// Clone of the current table.
    #[must_use]
    pub fn table(&self) -> ThresholdTable {
        self.table.get()
    }

    /// Replace the table for every holder of this context.
    ///
    /// Returns `true` if the table actually changed.
    pub fn set_table(&self, table: ThresholdTable) -> bool {
        let changed = self.table.set(table);
        if changed {
            tracing::info!(
                version = self.table.version(),
                "breakpoint table replaced"
            );
        }
        changed
    }

    /// Number of table replacements so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.table.version()
    }

    /// Be notified when the table is replaced.
    pub fn subscribe(&self, callback: impl Fn(&ThresholdTable) + 'static) -> Subscription {
        self.table.subscribe(callback)
    }
}

impl Default for BreakpointContext {
    fn default() -> Self {
        Self::new(ThresholdTable::default())
    }
}
