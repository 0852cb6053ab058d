//! The process-wide component registry (`SPEC_FULL.md` §3, §4.1, §4.2).
//!
//! Components self-register at link time: a `ComponentType` builder wraps
//! `inventory::submit!` in a [`Registrator`], and [`Registry::bootstrap`] drains every
//! submitted registrator exactly once into the global [`Registry`]. This reproduces the
//! source system's decorator-at-import-time registration without requiring a reflective
//! module loader.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::delegate::Delegate;
use crate::ids::{ComponentId, GroupId, TypeTag};
use crate::observer::ObserverFn;

/// The function type submitted by [`crate::component_type::submit_component`] via
/// `inventory::submit!`. Takes the registry so a component can install itself (and, if
/// it chooses, call `add_dependency`/`add_ignore`/`mark_hidden` on itself) in one shot.
pub struct Registrator(pub fn(&Registry));

inventory::collect!(Registrator);

/// All process-wide indices over registered components (`SPEC_FULL.md` §3's index
/// list). One instance lives for the process; reach it through [`Registry::global`].
#[derive(Default)]
pub struct Registry {
    delegates: RwLock<HashMap<ComponentId, Delegate>>,
    dependents: RwLock<HashMap<ComponentId, HashSet<ComponentId>>>,
    components_by_type: RwLock<HashMap<TypeTag, HashSet<ComponentId>>>,
    /// `group -> (component -> its dependencies within that group's run)`.
    components: RwLock<HashMap<GroupId, HashMap<ComponentId, HashSet<ComponentId>>>>,
    hidden: RwLock<HashSet<ComponentId>>,
    ignore: RwLock<HashMap<ComponentId, HashSet<ComponentId>>>,
    type_observers: RwLock<HashMap<TypeTag, Vec<ObserverFn>>>,
    /// Runtime-string name -> handle, so `resolve` doesn't need a linear scan.
    name_cache: RwLock<HashMap<String, ComponentId>>,
}

impl Registry {
    /// The process-wide registry. Does *not* run [`Registry::bootstrap`] for you —
    /// callers that rely on link-time registration should call it once at startup.
    #[must_use]
    pub fn global() -> &'static Registry {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(Registry::default)
    }

    /// Drains every `inventory`-submitted [`Registrator`] into this registry. Idempotent:
    /// later calls are no-ops. Intended to run once, early in `main`.
    pub fn bootstrap(&self) {
        static DONE: OnceLock<()> = OnceLock::new();
        if DONE.get().is_some() {
            return;
        }
        for registrator in inventory::iter::<Registrator> {
            (registrator.0)(self);
        }
        let _ = DONE.set(());
    }

    /// Installs a delegate, wiring the `dependents`, `components_by_type`, and
    /// `components[group]` indices from its `dependencies`/`group`/`type_tag`. The full
    /// dependency set is stored here regardless of which group each dependency itself
    /// belongs to — components can register in any order — and narrowed to the group's
    /// own members on read, by [`Registry::components_in_group`].
    pub fn register(&self, delegate: Delegate) {
        let id = delegate.id;
        let group = delegate.group;
        let type_tag = delegate.type_tag;
        let dependencies = delegate.dependencies.clone();

        self.name_cache.write().insert(id.name().to_owned(), id);
        self.components_by_type.write().entry(type_tag).or_default().insert(id);

        {
            let mut dependents = self.dependents.write();
            for &dep in &dependencies {
                dependents.entry(dep).or_default().insert(id);
            }
            dependents.entry(id).or_default();
        }

        self.components
            .write()
            .entry(group)
            .or_default()
            .insert(id, dependencies);

        self.delegates.write().insert(id, delegate);
    }

    /// Whether `id` has a registered delegate.
    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.delegates.read().contains_key(&id)
    }

    /// A clone of `id`'s delegate, if registered. Cloned out from under the lock (rather
    /// than held for the caller's use) so a component body can run — and even register
    /// more components — without risking a self-deadlock on the registry.
    #[must_use]
    pub fn get_delegate(&self, id: ComponentId) -> Option<Delegate> {
        self.delegates.read().get(&id).cloned()
    }

    #[must_use]
    pub fn get_type(&self, id: ComponentId) -> Option<TypeTag> {
        self.delegates.read().get(&id).map(|d| d.type_tag)
    }

    #[must_use]
    pub fn get_group(&self, id: ComponentId) -> Option<GroupId> {
        self.delegates.read().get(&id).map(|d| d.group)
    }

    /// The fully qualified name. Always available, registered or not — a `ComponentId`
    /// carries its own name rather than leasing one from the registry.
    #[must_use]
    pub fn get_name(&self, id: ComponentId) -> &'static str {
        id.name()
    }

    #[must_use]
    pub fn get_simple_name(&self, id: ComponentId) -> &'static str {
        id.simple_name()
    }

    /// `id`'s declared metadata, or `Value::Null` if `id` isn't registered.
    #[must_use]
    pub fn get_metadata(&self, id: ComponentId) -> serde_json::Value {
        self.delegates
            .read()
            .get(&id)
            .map(|d| d.metadata.clone())
            .unwrap_or(serde_json::Value::Null)
    }

    #[must_use]
    pub fn get_dependencies(&self, id: ComponentId) -> HashSet<ComponentId> {
        self.delegates
            .read()
            .get(&id)
            .map(|d| d.dependencies.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn get_added_dependencies(&self, id: ComponentId) -> Vec<ComponentId> {
        self.delegates
            .read()
            .get(&id)
            .map(|d| d.added_dependencies.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn get_dependents(&self, id: ComponentId) -> HashSet<ComponentId> {
        self.dependents.read().get(&id).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn components_of_type(&self, type_tag: TypeTag) -> HashSet<ComponentId> {
        self.components_by_type.read().get(&type_tag).cloned().unwrap_or_default()
    }

    /// The dependency map for every component registered under `group`, each restricted
    /// to the dependencies that are themselves registered under `group` — a dependency
    /// belonging to a different group can never be satisfied by this group's run, so it
    /// is filtered out here rather than left for `run_order` to hard-error on. The run
    /// loop still reports such a component's requirement as missing (via the ordinary
    /// requirement algebra), it just isn't treated as a graph-ordering edge.
    #[must_use]
    pub fn components_in_group(&self, group: GroupId) -> HashMap<ComponentId, HashSet<ComponentId>> {
        let raw = self.components.read().get(&group).cloned().unwrap_or_default();
        let members: HashSet<ComponentId> = raw.keys().copied().collect();
        raw.into_iter()
            .map(|(id, deps)| {
                let deps = deps.into_iter().filter(|dep| members.contains(dep)).collect();
                (id, deps)
            })
            .collect()
    }

    /// Marks `ids` as hidden: present in the graph for ordering purposes, but skipped
    /// by default top-level runs unless explicitly requested.
    pub fn mark_hidden(&self, ids: impl IntoIterator<Item = ComponentId>) {
        self.hidden.write().extend(ids);
    }

    #[must_use]
    pub fn is_hidden(&self, id: ComponentId) -> bool {
        self.hidden.read().contains(&id)
    }

    /// Declares that if `trigger` is present in the broker, `component` should be
    /// skipped outright rather than run or reported missing.
    pub fn add_ignore(&self, component: ComponentId, trigger: ComponentId) {
        self.ignore.write().entry(component).or_default().insert(trigger);
    }

    #[must_use]
    pub fn ignore_of(&self, id: ComponentId) -> HashSet<ComponentId> {
        self.ignore.read().get(&id).cloned().unwrap_or_default()
    }

    /// Adds `dep` to `component`'s dependency set after registration, updating every
    /// index that `register` would have populated from it (`dependents`,
    /// `components[group]`, and the delegate's own `dependencies`/`added_dependencies`).
    pub fn add_dependency(&self, component: ComponentId, dep: ComponentId) {
        let Some(group) = self.get_group(component) else {
            return;
        };

        {
            let mut delegates = self.delegates.write();
            if let Some(delegate) = delegates.get_mut(&component) {
                delegate.add_dependency(dep);
            } else {
                return;
            }
        }

        self.dependents.write().entry(dep).or_default().insert(component);

        if let Some(members) = self.components.write().get_mut(&group) {
            members.entry(component).or_default().insert(dep);
        }
    }

    /// Looks up a component by its fully qualified name, e.g. for a CLI argument.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<ComponentId> {
        self.name_cache.read().get(name).copied()
    }

    /// Registers a process-wide observer invoked by `Broker::fire_observers` whenever a
    /// component whose type matches `type_tag` (or [`TypeTag::ANY`]) finishes running.
    /// New brokers snapshot this table at construction time (`Broker::new`).
    pub fn add_observer(&self, type_tag: TypeTag, observer: ObserverFn) {
        self.type_observers.write().entry(type_tag).or_default().push(observer);
    }

    #[must_use]
    pub(crate) fn observer_snapshot(&self) -> HashMap<TypeTag, Vec<ObserverFn>> {
        self.type_observers.read().clone()
    }

    /// A human-readable rendering of a requirement spec, e.g. for `--explain`-style
    /// diagnostics: `"all: [a, b] any: [[c, d]]"`.
    #[must_use]
    pub fn stringify_requirements(&self, id: ComponentId) -> String {
        let Some(delegate) = self.get_delegate(id) else {
            return String::new();
        };
        let mut required = Vec::new();
        let mut any_of = Vec::new();
        for r in &delegate.requires {
            match r {
                crate::ids::Requirement::Required(d) => required.push(d.name()),
                crate::ids::Requirement::AnyOf(ds) => {
                    any_of.push(format!("[{}]", ds.iter().map(|d| d.name()).collect::<Vec<_>>().join(", ")));
                }
            }
        }
        format!("all: [{}] any: [{}]", required.join(", "), any_of.join(", "))
    }

    /// The first component in `candidates` that is both registered and currently has a
    /// value in `present` — a small diagnostic helper for components that accept
    /// several possible providers but only want the first one found.
    #[must_use]
    pub fn first_of(
        &self,
        candidates: impl IntoIterator<Item = ComponentId>,
        mut present: impl FnMut(ComponentId) -> bool,
    ) -> Option<ComponentId> {
        candidates.into_iter().find(|&id| self.contains(id) && present(id))
    }
}
