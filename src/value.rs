//! Type-erased component output.
//!
//! Any specific domain payload a component returns is explicitly out of scope for this
//! core (§1); components are free to produce whatever type they like, so the broker
//! stores results behind a single type-erased cell — the same shape `http::Extensions`
//! (already in the host crate's dependency stack) uses for heterogeneous per-request
//! state.

use std::any::Any;
use std::sync::Arc;

/// A component's output, type-erased so the broker can store heterogeneous results.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Wraps `v` as a [`Value`].
pub fn value<T: Any + Send + Sync>(v: T) -> Value {
    Arc::new(v)
}

/// Attempts to downcast a [`Value`] reference back to `T`.
#[must_use]
pub fn downcast_ref<T: Any + Send + Sync>(v: &Value) -> Option<&T> {
    v.downcast_ref::<T>()
}
