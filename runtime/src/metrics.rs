//! Metric names recorded by the [`Store`](crate::Store).
//!
//! The store records through the `metrics` facade. Nothing is exported
//! unless the host process installs a recorder; without one every call is a
//! no-op.

use metrics::{describe_counter, describe_histogram};

/// Actions sent to a store, applied or not
pub const ACTIONS_TOTAL: &str = "store.actions.total";

/// Actions the reducer absorbed without changing state
pub const ACTIONS_UNCHANGED: &str = "store.actions.unchanged";

/// Guarded sends whose guard rejected the current snapshot
pub const ACTIONS_REJECTED: &str = "store.actions.rejected";

/// Wall time spent inside the reducer
pub const REDUCER_DURATION: &str = "store.reducer.duration_seconds";

/// Register descriptions for every store metric with the installed recorder.
///
/// Call once after installing a recorder. Safe to call without one.
pub fn describe_store_metrics() {
    describe_counter!(ACTIONS_TOTAL, "Total number of actions sent to the store");
    describe_counter!(
        ACTIONS_UNCHANGED,
        "Actions that left the state snapshot untouched"
    );
    describe_counter!(
        ACTIONS_REJECTED,
        "Guarded sends rejected before reaching the reducer"
    );
    describe_histogram!(REDUCER_DURATION, "Time taken to reduce a single action");
}
