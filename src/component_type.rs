//! Component-type factories and the registration macro (`SPEC_FULL.md` §4.2).
//!
//! The source system's `new_component_type` returns a decorator that bakes a fixed
//! executor, run group, and type tag into every component it wraps, and registers the
//! component the moment the decorator runs at import time. Rust has neither decorators
//! nor import-time side effects, so the equivalent here is two pieces: a
//! [`ComponentType`] builder carrying the same three fixed choices, and
//! [`submit_component!`] — a macro expanding to `inventory::submit!`, so the
//! registration closure runs once, at link time, the same way the host crate wires up
//! its own module/app registration (see `reinhardt-apps`'s `register_app_command!` for
//! the idiom this follows).

use crate::delegate::Delegate;
use crate::executor::{default_executor, ExecutorFn};
use crate::ids::{ComponentId, GroupId, Requirement, TypeTag};
use crate::invocable::Invocable;

/// A reusable component-type configuration. Every component built through the same
/// `ComponentType` shares an executor, a run group, and a type tag.
#[derive(Clone, Copy)]
pub struct ComponentType {
    executor: ExecutorFn,
    group: GroupId,
    type_tag: TypeTag,
}

impl ComponentType {
    /// A component type using [`default_executor`] and [`GroupId::SINGLE`].
    #[must_use]
    pub const fn new(type_tag: TypeTag) -> Self {
        Self {
            executor: default_executor,
            group: GroupId::SINGLE,
            type_tag,
        }
    }

    #[must_use]
    pub const fn with_executor(mut self, executor: ExecutorFn) -> Self {
        self.executor = executor;
        self
    }

    #[must_use]
    pub const fn with_group(mut self, group: GroupId) -> Self {
        self.group = group;
        self
    }

    #[must_use]
    pub const fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    /// Builds the [`Delegate`] for one component of this type. Called from
    /// [`submit_component!`]'s expansion, not normally directly.
    #[must_use]
    pub fn delegate(
        &self,
        id: ComponentId,
        invocable: Invocable,
        requires: Vec<Requirement>,
        optional: Vec<ComponentId>,
        metadata: serde_json::Value,
    ) -> Delegate {
        Delegate::new(
            id,
            invocable,
            requires,
            optional,
            self.group,
            self.type_tag,
            metadata,
            self.executor,
        )
    }
}

/// Declares a component and wires its registration into link time.
///
/// `$id` is both the const name this expands to and, combined with `module_path!()`, the
/// component's registered [`ComponentId`] — stable across registrations without relying
/// on function-pointer identity. Other components depend on it the normal way: by
/// naming the const in their own `requires`/`optional` list.
///
/// ```rust,ignore
/// use compkit::ids::Requirement;
/// use compkit::{submit_component, ComponentType, TypeTag};
///
/// const FACT: ComponentType = ComponentType::new(TypeTag("fact"));
///
/// submit_component! {
///     FACT, HOSTNAME,
///     positional |_args| Ok(compkit::value::value("example.internal".to_owned())),
///     requires: [],
///     optional: [],
/// }
///
/// submit_component! {
///     FACT, HAS_SMTP,
///     positional |args| {
///         let hostname = args[0].as_one().and_then(compkit::downcast_ref::<String>);
///         Ok(compkit::value::value(hostname.is_some()))
///     },
///     requires: [Requirement::one(HOSTNAME)],
///     optional: [],
/// }
/// ```
#[macro_export]
macro_rules! submit_component {
    (
        $component_type:expr, $id:ident,
        positional $body:expr,
        requires: [$($requires:expr),* $(,)?],
        optional: [$($optional:expr),* $(,)?]
        $(, metadata: $metadata:expr)? $(,)?
    ) => {
        pub const $id: $crate::ids::ComponentId =
            $crate::ids::ComponentId::new(concat!(module_path!(), "::", stringify!($id)));

        $crate::inventory::submit! {
            $crate::registry::Registrator(|registry| {
                let delegate = $component_type.delegate(
                    $id,
                    $crate::invocable::Invocable::positional($body),
                    ::std::vec![$($requires),*],
                    ::std::vec![$($optional),*],
                    $crate::submit_component!(@metadata $($metadata)?),
                );
                registry.register(delegate);
            })
        }
    };
    (
        $component_type:expr, $id:ident,
        broker $body:expr,
        requires: [$($requires:expr),* $(,)?],
        optional: [$($optional:expr),* $(,)?]
        $(, metadata: $metadata:expr)? $(,)?
    ) => {
        pub const $id: $crate::ids::ComponentId =
            $crate::ids::ComponentId::new(concat!(module_path!(), "::", stringify!($id)));

        $crate::inventory::submit! {
            $crate::registry::Registrator(|registry| {
                let delegate = $component_type.delegate(
                    $id,
                    $crate::invocable::Invocable::broker($body),
                    ::std::vec![$($requires),*],
                    ::std::vec![$($optional),*],
                    $crate::submit_component!(@metadata $($metadata)?),
                );
                registry.register(delegate);
            })
        }
    };
    (@metadata) => { $crate::serde_json::Value::Null };
    (@metadata $metadata:expr) => { $metadata };
}
