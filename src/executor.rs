//! Invocation strategies (`SPEC_FULL.md` §4.2). An executor validates a delegate's
//! requirements against the broker, then invokes the component body.

use anyhow::anyhow;

use crate::broker::Broker;
use crate::delegate::Delegate;
use crate::error::{is_skip, MissingRequirements};
use crate::ids::Requirement;
use crate::invocable::{ArgValue, Invocable};
use crate::registry::Registry;
use crate::requirement::{self, Missing};
use crate::value::Value;

/// What happened when a delegate was invoked: a value, a missing-requirements report,
/// a voluntary skip, or an arbitrary component failure. Not itself an error type —
/// the run loop (`crate::run`) is the only consumer and decides what's fatal.
pub enum Disposition {
    Ok(Value),
    MissingRequirements(MissingRequirements),
    Skip,
    Err(anyhow::Error),
}

/// `executor(component, broker, requires, optional) -> value`, as a plain fn pointer
/// so `Delegate` stays `Send + Sync` and cheap to construct at registration time.
pub type ExecutorFn = fn(&Delegate, &Broker, &Registry) -> Disposition;

fn check_requirements(delegate: &Delegate, broker: &Broker, registry: &Registry) -> Option<Disposition> {
    let ignore = registry.ignore_of(delegate.id);
    match requirement::missing(&ignore, &delegate.requires, |id| broker.contains(id)) {
        Missing::Skip => Some(Disposition::Skip),
        Missing::Requirements(mr) => Some(Disposition::MissingRequirements(mr)),
        Missing::None => None,
    }
}

fn lift(result: anyhow::Result<Value>) -> Disposition {
    match result {
        Ok(v) => Disposition::Ok(v),
        Err(e) if is_skip(&e) => Disposition::Skip,
        Err(e) => Disposition::Err(e),
    }
}

/// Builds a positional argument list by walking `requires` — a singleton becomes a
/// `ArgValue::One(broker.get(dep))`, an any-of group becomes a single
/// `ArgValue::Many(...)` holding the group's lookups in declared order — appends one
/// `ArgValue::One` per optional dependency, then invokes the component with that list.
pub fn default_executor(delegate: &Delegate, broker: &Broker, registry: &Registry) -> Disposition {
    if let Some(early) = check_requirements(delegate, broker, registry) {
        return early;
    }

    let Invocable::Positional(f) = &delegate.invocable else {
        return Disposition::Err(anyhow!(
            "{} is registered with default_executor but its body accepts a broker, not positional arguments",
            delegate.id
        ));
    };

    let mut args = Vec::with_capacity(delegate.requires.len() + delegate.optional.len());
    for r in &delegate.requires {
        match r {
            Requirement::Required(id) => args.push(ArgValue::One(broker.get(*id))),
            Requirement::AnyOf(ids) => {
                args.push(ArgValue::Many(ids.iter().map(|&id| broker.get(id)).collect()));
            }
        }
    }
    for &opt in &delegate.optional {
        args.push(ArgValue::One(broker.get(opt)));
    }

    lift(f(&args))
}

/// Same missing-requirement check as [`default_executor`], then invokes the component
/// with the broker itself as the sole argument.
pub fn broker_executor(delegate: &Delegate, broker: &Broker, registry: &Registry) -> Disposition {
    if let Some(early) = check_requirements(delegate, broker, registry) {
        return early;
    }

    let Invocable::Broker(f) = &delegate.invocable else {
        return Disposition::Err(anyhow!(
            "{} is registered with broker_executor but its body accepts positional arguments, not a broker",
            delegate.id
        ));
    };

    lift(f(broker))
}
