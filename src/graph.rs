//! Graph-shaped services over the dependency relation (`SPEC_FULL.md` §4.4).

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::error::GraphError;
use crate::ids::{ComponentId, GroupId};
use crate::registry::Registry;

/// A pre-order reachability walk of `root`'s transitive dependencies, each visited once.
/// Unlike [`run_order`], this makes no topological guarantee — it's a plain traversal,
/// useful for diagnostics ("what would running this pull in?").
#[must_use]
pub fn walk_dependencies(root: ComponentId) -> Vec<ComponentId> {
    let registry = Registry::global();
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        order.push(id);
        stack.extend(registry.get_dependencies(id));
    }
    order
}

/// `root` plus everything it transitively depends on, each paired with its immediate
/// dependencies — the shape [`run_order`] consumes.
#[must_use]
pub fn dependency_subgraph(root: ComponentId) -> HashMap<ComponentId, HashSet<ComponentId>> {
    let registry = Registry::global();
    let mut graph = HashMap::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if graph.contains_key(&id) {
            continue;
        }
        let deps = registry.get_dependencies(id);
        stack.extend(deps.iter().copied());
        graph.insert(id, deps);
    }
    graph
}

/// Partitions every component registered under `group` into its weakly-connected
/// components — treating both dependency and dependent edges as undirected — so an
/// incremental run can execute only the sub-graphs touched by newly-registered
/// components instead of the whole group.
#[must_use]
pub fn subgraphs(group: GroupId) -> Vec<HashMap<ComponentId, HashSet<ComponentId>>> {
    let registry = Registry::global();
    let components = registry.components_in_group(group);
    let mut visited = HashSet::new();
    let mut result = Vec::new();

    for &start in components.keys() {
        if visited.contains(&start) {
            continue;
        }

        let mut members = HashSet::new();
        let mut queue = VecDeque::from([start]);
        while let Some(id) = queue.pop_front() {
            if !members.insert(id) {
                continue;
            }
            visited.insert(id);

            if let Some(deps) = components.get(&id) {
                queue.extend(deps.iter().copied());
            }
            queue.extend(
                registry
                    .get_dependents(id)
                    .into_iter()
                    .filter(|d| components.contains_key(d)),
            );
        }

        let subgraph = members
            .into_iter()
            .map(|id| (id, components.get(&id).cloned().unwrap_or_default()))
            .collect();
        result.push(subgraph);
    }

    result
}

/// A topological ordering of `graph` (component -> its dependencies), via Kahn's
/// algorithm — dependencies always precede their dependents. Ties are broken by
/// component name so the order is deterministic run to run.
///
/// # Errors
/// [`GraphError::UnregisteredComponent`] if an edge points outside `graph`'s keys;
/// [`GraphError::CycleDetected`] (naming the components left over) if `graph` isn't a
/// DAG.
pub fn run_order(
    graph: &HashMap<ComponentId, HashSet<ComponentId>>,
) -> Result<Vec<ComponentId>, GraphError> {
    let mut indegree: HashMap<ComponentId, usize> = graph.keys().map(|&id| (id, 0)).collect();
    let mut dependents: HashMap<ComponentId, Vec<ComponentId>> = HashMap::new();

    for (&id, deps) in graph {
        for &dep in deps {
            if !graph.contains_key(&dep) {
                return Err(GraphError::UnregisteredComponent(dep));
            }
            *indegree.get_mut(&id).expect("id is a key of graph") += 1;
            dependents.entry(dep).or_default().push(id);
        }
    }

    let mut ready: Vec<ComponentId> = indegree
        .iter()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(&id, _)| id)
        .collect();
    ready.sort_by_key(|id| id.name());
    let mut queue: VecDeque<ComponentId> = ready.into();

    let mut order = Vec::with_capacity(graph.len());
    while let Some(id) = queue.pop_front() {
        order.push(id);
        if let Some(next) = dependents.get(&id) {
            let mut newly_ready = Vec::new();
            for &n in next {
                let degree = indegree.get_mut(&n).expect("n is a key of graph");
                *degree -= 1;
                if *degree == 0 {
                    newly_ready.push(n);
                }
            }
            newly_ready.sort_by_key(|id| id.name());
            queue.extend(newly_ready);
        }
    }

    if order.len() != graph.len() {
        let resolved: HashSet<ComponentId> = order.iter().copied().collect();
        let remaining = graph.keys().copied().filter(|id| !resolved.contains(id)).collect();
        return Err(GraphError::CycleDetected(remaining));
    }

    debug!(order = ?order.iter().map(ComponentId::name).collect::<Vec<_>>(), "resolved run order");
    Ok(order)
}
