//! The run loop (`SPEC_FULL.md` §4.6).

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use tracing::debug;

use crate::broker::Broker;
use crate::error::GraphError;
use crate::executor::Disposition;
use crate::graph::{run_order, subgraphs};
use crate::ids::{ComponentId, GroupId};
use crate::registry::Registry;

/// Runs every component in `graph` (component -> its dependencies) in topological
/// order, against `broker` (or a freshly allocated one if `None`). A component already
/// present in the broker, or with no registered delegate, is left untouched — neither
/// invoked nor timed nor observed.
///
/// # Errors
/// Propagates [`GraphError`] if `graph` isn't a DAG or references an unregistered
/// dependency.
pub fn run(
    graph: &HashMap<ComponentId, HashSet<ComponentId>>,
    broker: Option<Broker>,
) -> Result<Broker, GraphError> {
    let broker = broker.unwrap_or_default();
    let order = run_order(graph)?;
    let registry = Registry::global();

    for id in order {
        if broker.contains(id) {
            continue;
        }
        let Some(delegate) = registry.get_delegate(id) else {
            continue;
        };

        let start = Instant::now();
        match (delegate.executor)(&delegate, &broker, registry) {
            Disposition::Ok(value) => {
                // Already checked `!broker.contains(id)` above, under this same
                // single-threaded run loop, so `put` cannot fail here.
                let _ = broker.put(id, value);
            }
            Disposition::MissingRequirements(missing) => {
                debug!(component = %id, %missing, "missing requirements");
                broker.add_missing_requirements(id, missing);
            }
            Disposition::Skip => {
                debug!(component = %id, "component skipped");
            }
            Disposition::Err(error) => {
                let traceback = format!("{error:?}");
                broker.add_exception(id, error, traceback);
            }
        }
        broker.add_exec_time(id, start.elapsed());
        broker.fire_observers(id);
    }

    Ok(broker)
}

/// [`run`] over every component registered under `group` (e.g. [`GroupId::SINGLE`]).
///
/// # Errors
/// See [`run`].
pub fn run_group(group: GroupId, broker: Option<Broker>) -> Result<Broker, GraphError> {
    let graph = Registry::global().components_in_group(group);
    run(&graph, broker)
}

/// Partitions `group` into its weakly-connected sub-graphs ([`subgraphs`]) and runs each
/// independently, every sub-broker seeded from `seed` (or empty, if `None`). Because the
/// sub-graphs are disjoint, the resulting brokers never compete for the same component.
///
/// # Errors
/// See [`run`]. Fails on the first sub-graph that errors; brokers for sub-graphs run
/// before it are discarded.
pub fn run_incremental(group: GroupId, seed: Option<&Broker>) -> Result<Vec<Broker>, GraphError> {
    subgraphs(group)
        .into_iter()
        .map(|subgraph| run(&subgraph, Some(Broker::new(seed))))
        .collect()
}
