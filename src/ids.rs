//! Stable identifiers used as registry keys throughout the crate.

use std::fmt;

/// A component's identity and its diagnostic name, unified into one value.
///
/// Rust functions have no runtime object identity and no import-time reflection, so
/// "two declarations of the same callable denote the same handle" and "every component
/// has a stable fully-qualified name" collapse into a single guarantee: the fully
/// qualified `module_path!()::item_name` of the defining function is unique by
/// construction and stable across registrations. See `SPEC_FULL.md` §3.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(pub &'static str);

impl ComponentId {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The fully qualified name, as used for diagnostics and `Registry::resolve`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0
    }

    /// The last path segment, e.g. `"parse_hostname"` for `"myapp::parsers::parse_hostname"`.
    #[must_use]
    pub fn simple_name(&self) -> &'static str {
        self.0.rsplit("::").next().unwrap_or(self.0)
    }

    /// The module path portion, e.g. `"myapp::parsers"` for `"myapp::parsers::parse_hostname"`.
    #[must_use]
    pub fn module_name(&self) -> Option<&'static str> {
        self.0.rsplit_once("::").map(|(module, _)| module)
    }

    /// The last segment of the module path, e.g. `"parsers"`.
    #[must_use]
    pub fn base_module_name(&self) -> Option<&'static str> {
        self.module_name()
            .and_then(|m| m.rsplit("::").next())
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A tag partitioning the registry for selective runs. Defaults to `GroupId::SINGLE`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub &'static str);

impl GroupId {
    pub const SINGLE: GroupId = GroupId("single");
    pub const CLUSTER: GroupId = GroupId("cluster");
}

impl Default for GroupId {
    fn default() -> Self {
        Self::SINGLE
    }
}

impl fmt::Debug for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// An opaque, identity-comparable tag identifying a component type.
///
/// In the source system a component's type is the decorator object itself; here it is
/// whatever `&'static str` name the owning `ComponentType` was constructed with, or an
/// explicit override supplied at registration time.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag(pub &'static str);

impl TypeTag {
    /// The sentinel tag that matches every component type for observer dispatch.
    pub const ANY: TypeTag = TypeTag("*");
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// One element of a requirement spec: either a single dependency that must be present,
/// or a non-empty group of which at least one member must be present ("any-of").
///
/// This is the tagged-variant representation recommended by the design notes (§9) in
/// place of the untyped mixed list (`isinstance(r, list)`) the source system uses.
#[derive(Clone, Debug)]
pub enum Requirement {
    Required(ComponentId),
    AnyOf(Vec<ComponentId>),
}

impl Requirement {
    #[must_use]
    pub fn one(id: ComponentId) -> Self {
        Requirement::Required(id)
    }

    #[must_use]
    pub fn any_of(ids: impl IntoIterator<Item = ComponentId>) -> Self {
        let ids: Vec<_> = ids.into_iter().collect();
        assert!(
            !ids.is_empty(),
            "an any-of requirement group must not be empty"
        );
        Requirement::AnyOf(ids)
    }
}
