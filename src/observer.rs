//! The process-wide "type observer" hook (`SPEC_FULL.md` §4.5): a callback fired after
//! every component of a matching type finishes running, regardless of outcome.

use std::sync::Arc;

use crate::broker::Broker;
use crate::ids::ComponentId;

/// `fn(component, broker)`, called once a component has finished (successfully, with a
/// missing requirement, skipped, or failed) so the observer can inspect the broker's
/// state for that component.
pub type ObserverFn = Arc<dyn Fn(ComponentId, &Broker) + Send + Sync>;
