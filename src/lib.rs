//! A dependency-resolution and execution runtime for plug-in style components.
//!
//! Components are plain Rust functions, declared with [`submit_component!`] against a
//! [`ComponentType`], and linked together by declared [`Requirement`](ids::Requirement)s.
//! [`run_group`] orders a group's components topologically and invokes each one through
//! a [`Broker`], which collects produced values, unmet requirements, failures, and
//! per-component timings.
//!
//! ```rust,ignore
//! use compkit::{submit_component, ComponentType, TypeTag, Registry, GroupId};
//!
//! const FACT: ComponentType = ComponentType::new(TypeTag("fact"));
//!
//! submit_component! {
//!     FACT, HOSTNAME,
//!     positional |_args| Ok(compkit::value(String::from("example.internal"))),
//!     requires: [],
//!     optional: [],
//! }
//!
//! fn main() {
//!     Registry::global().bootstrap();
//!     let broker = compkit::run_group(GroupId::SINGLE, None).unwrap();
//! }
//! ```

pub mod broker;
pub mod component_type;
pub mod config;
pub mod delegate;
pub mod error;
pub mod executor;
pub mod graph;
pub mod ids;
pub mod invocable;
pub mod logging;
pub mod observer;
pub mod registry;
pub mod requirement;
pub mod run;
pub mod value;

pub use broker::Broker;
pub use component_type::ComponentType;
pub use config::RuntimeSettings;
pub use delegate::Delegate;
pub use error::{BrokerError, GraphError, MissingRequirements, SkipComponent};
pub use executor::{broker_executor, default_executor, Disposition, ExecutorFn};
pub use graph::{dependency_subgraph, run_order, subgraphs, walk_dependencies};
pub use ids::{ComponentId, GroupId, Requirement, TypeTag};
pub use invocable::{ArgValue, ComponentResult, Invocable};
pub use registry::{Registrator, Registry};
pub use run::{run, run_group, run_incremental};
pub use value::{downcast_ref, value, Value};

// Re-exported so `submit_component!`'s expansion can name these crates hygienically
// from a downstream crate without requiring it to depend on them directly.
pub use inventory;
pub use serde_json;

/// Builds a `SkipComponent` wrapped as an `anyhow::Error`, for a component body that
/// wants to voluntarily withdraw from the run: `return Err(compkit::skip!());`.
#[macro_export]
macro_rules! skip {
    () => {
        $crate::anyhow::Error::new($crate::SkipComponent)
    };
}

pub use anyhow;
