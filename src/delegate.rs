//! Per-component registry entry (`SPEC_FULL.md` §3, §4.2).

use std::collections::HashSet;

use crate::executor::ExecutorFn;
use crate::ids::{ComponentId, GroupId, Requirement, TypeTag};
use crate::invocable::Invocable;

/// The bundle a [`crate::component_type::ComponentType`] builds and installs into the
/// registry for each decorated component. Immutable once constructed, except for
/// `added_dependencies` (via [`Registry::add_dependency`](crate::registry::Registry::add_dependency)).
#[derive(Clone)]
pub struct Delegate {
    pub id: ComponentId,
    pub invocable: Invocable,
    pub requires: Vec<Requirement>,
    pub optional: Vec<ComponentId>,
    /// `_all ∪ ⋃ _any ∪ optional`, plus anything appended by `add_dependency`.
    pub dependencies: HashSet<ComponentId>,
    pub added_dependencies: Vec<ComponentId>,
    pub group: GroupId,
    pub type_tag: TypeTag,
    pub metadata: serde_json::Value,
    pub executor: ExecutorFn,
}

impl Delegate {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ComponentId,
        invocable: Invocable,
        requires: Vec<Requirement>,
        optional: Vec<ComponentId>,
        group: GroupId,
        type_tag: TypeTag,
        metadata: serde_json::Value,
        executor: ExecutorFn,
    ) -> Self {
        let mut dependencies = HashSet::new();
        for r in &requires {
            match r {
                Requirement::Required(d) => {
                    dependencies.insert(*d);
                }
                Requirement::AnyOf(ds) => dependencies.extend(ds.iter().copied()),
            }
        }
        dependencies.extend(optional.iter().copied());

        Self {
            id,
            invocable,
            requires,
            optional,
            dependencies,
            added_dependencies: Vec::new(),
            group,
            type_tag,
            metadata,
            executor,
        }
    }

    /// Appends `dep` to `added_dependencies` and `dependencies`. Does not touch
    /// `requires`/`optional`, so the executor will not pass `dep` positionally —
    /// consumers look it up through the broker directly.
    ///
    /// Only updates this delegate's own fields; callers that need the registry's
    /// `dependencies`/`dependents`/`components[group]` indices kept in sync should go
    /// through [`Registry::add_dependency`](crate::registry::Registry::add_dependency).
    pub(crate) fn add_dependency(&mut self, dep: ComponentId) {
        self.added_dependencies.push(dep);
        self.dependencies.insert(dep);
    }
}
