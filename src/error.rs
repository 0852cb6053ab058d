//! Framework-level error types.
//!
//! Mirrors the host crate's split: closed `thiserror` enums for structured, anticipated
//! failures raised by the framework itself, `anyhow::Error` for opaque, arbitrary
//! failures raised by component bodies.

use crate::ids::ComponentId;
use thiserror::Error;

/// Raised by a component body that wants to voluntarily withdraw from the run.
///
/// Never constructed by the framework; components signal it with
/// `Err(anyhow::Error::from(SkipComponent))` (or the `skip!()` helper). The run loop
/// recognizes it by downcasting the root cause of the component's `anyhow::Error`.
#[derive(Debug, Error, Clone, Copy, Default)]
#[error("component requested to be skipped")]
pub struct SkipComponent;

/// Returns `true` if `err`'s chain contains a [`SkipComponent`] sentinel.
#[must_use]
pub fn is_skip(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<SkipComponent>())
}

/// The pair `(unsatisfied singletons, unsatisfied any-of groups)` computed by the
/// requirement algebra (`crate::requirement::missing`) for a component whose executor
/// is about to run. Not fatal: recorded in `Broker::missing_requirements`.
#[derive(Debug, Clone, Error)]
#[error("missing requirements: {}", format_missing(.required, .any_of))]
pub struct MissingRequirements {
    pub required: Vec<ComponentId>,
    pub any_of: Vec<Vec<ComponentId>>,
}

fn format_missing(required: &[ComponentId], any_of: &[Vec<ComponentId>]) -> String {
    let all = required
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let any = any_of
        .iter()
        .map(|group| {
            format!(
                "[{}]",
                group
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join(" Any: ");
    format!("All: [{all}] Any: {any}")
}

/// Errors raised by graph services (`crate::graph`). Always a programming error: the
/// caller handed the ordering a graph shape it cannot satisfy.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("{0} is not a registered component")]
    UnregisteredComponent(ComponentId),
    #[error("cyclic dependency detected among: {}", join(.0))]
    CycleDetected(Vec<ComponentId>),
}

fn join(ids: &[ComponentId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Errors raised by the broker for framework-level misuse (double-`put`, lookups
/// without a default on an unknown key).
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("already exists in broker with key: {0}")]
    AlreadyPresent(ComponentId),
    #[error("unknown component: {0}")]
    Unknown(ComponentId),
}
