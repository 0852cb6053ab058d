//! The two callable shapes a component body may take, and the executor argument cells
//! built from a requirement spec.

use std::sync::Arc;

use crate::value::Value;

/// One argument slot built by `default_executor` from a single requirement-spec
/// element: a plain lookup for a singleton requirement/optional, or the whole group's
/// lookups (in declared order) for an any-of requirement.
#[derive(Clone)]
pub enum ArgValue {
    One(Option<Value>),
    Many(Vec<Option<Value>>),
}

impl ArgValue {
    /// The value of a `One` slot, or `None` for a `Many` slot or an absent dependency.
    #[must_use]
    pub fn as_one(&self) -> Option<&Value> {
        match self {
            ArgValue::One(v) => v.as_ref(),
            ArgValue::Many(_) => None,
        }
    }

    /// The values of a `Many` slot, or an empty slice for a `One` slot.
    #[must_use]
    pub fn as_many(&self) -> &[Option<Value>] {
        match self {
            ArgValue::Many(v) => v,
            ArgValue::One(_) => &[],
        }
    }
}

pub type ComponentResult = anyhow::Result<Value>;

/// A component body, in one of the two invocation conventions the standard executors
/// understand (`SPEC_FULL.md` §4.2).
#[derive(Clone)]
pub enum Invocable {
    /// Called by `default_executor` with one [`ArgValue`] per requirement/optional
    /// spec element, in declared order.
    Positional(Arc<dyn Fn(&[ArgValue]) -> ComponentResult + Send + Sync>),
    /// Called by `broker_executor` with the broker itself as the sole argument.
    Broker(Arc<dyn Fn(&crate::broker::Broker) -> ComponentResult + Send + Sync>),
}

impl Invocable {
    pub fn positional<F>(f: F) -> Self
    where
        F: Fn(&[ArgValue]) -> ComponentResult + Send + Sync + 'static,
    {
        Invocable::Positional(Arc::new(f))
    }

    pub fn broker<F>(f: F) -> Self
    where
        F: Fn(&crate::broker::Broker) -> ComponentResult + Send + Sync + 'static,
    {
        Invocable::Broker(Arc::new(f))
    }
}
