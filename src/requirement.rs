//! The "all-of / any-of" requirement algebra (`SPEC_FULL.md` §4.3).

use std::collections::HashSet;

use crate::error::MissingRequirements;
use crate::ids::{ComponentId, Requirement};

/// The outcome of evaluating a component's requirement spec against what is currently
/// present in a broker.
#[derive(Debug)]
pub enum Missing {
    /// All requirements (if any) are satisfied; the component may run.
    None,
    /// An `ignore` trigger is present; the component must be skipped, not just delayed.
    Skip,
    /// Some requirements are unsatisfied; recorded, not fatal.
    Requirements(MissingRequirements),
}

/// Evaluates `requires` against `present`, honoring `ignore` triggers.
///
/// `present` should answer whether a given component currently has a value in the
/// broker (`Broker::contains`). Order matters and is load-bearing: an empty `requires`
/// short-circuits to `Missing::None` *before* the ignore check runs, exactly as in the
/// source algebra — a component with no declared requirements is never skipped via
/// `ignore`.
pub fn missing(
    ignore: &HashSet<ComponentId>,
    requires: &[Requirement],
    mut present: impl FnMut(ComponentId) -> bool,
) -> Missing {
    if requires.is_empty() {
        return Missing::None;
    }

    if ignore.iter().any(|&id| present(id)) {
        return Missing::Skip;
    }

    let mut unsatisfied_all = Vec::new();
    let mut unsatisfied_any = Vec::new();

    for r in requires {
        match r {
            Requirement::Required(id) => {
                if !present(*id) {
                    unsatisfied_all.push(*id);
                }
            }
            Requirement::AnyOf(ids) => {
                if !ids.iter().any(|&id| present(id)) {
                    unsatisfied_any.push(ids.clone());
                }
            }
        }
    }

    if unsatisfied_all.is_empty() && unsatisfied_any.is_empty() {
        Missing::None
    } else {
        Missing::Requirements(MissingRequirements {
            required: unsatisfied_all,
            any_of: unsatisfied_any,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ComponentId = ComponentId::new("t::a");
    const B: ComponentId = ComponentId::new("t::b");
    const C: ComponentId = ComponentId::new("t::c");

    #[test]
    fn empty_requires_is_never_missing_even_with_ignore_hit() {
        let mut ignore = HashSet::new();
        ignore.insert(A);
        let present = HashSet::from([A]);
        let m = missing(&ignore, &[], |id| present.contains(&id));
        assert!(matches!(m, Missing::None));
    }

    #[test]
    fn ignore_hit_skips_before_requirement_check() {
        let mut ignore = HashSet::new();
        ignore.insert(A);
        let present = HashSet::from([A]);
        let requires = vec![Requirement::one(B)];
        let m = missing(&ignore, &requires, |id| present.contains(&id));
        assert!(matches!(m, Missing::Skip));
    }

    #[test]
    fn all_satisfied_is_none() {
        let present = HashSet::from([A, B]);
        let requires = vec![Requirement::one(A), Requirement::one(B)];
        let m = missing(&HashSet::new(), &requires, |id| present.contains(&id));
        assert!(matches!(m, Missing::None));
    }

    #[test]
    fn any_of_satisfied_by_one_member() {
        let present = HashSet::from([B]);
        let requires = vec![Requirement::any_of([A, B, C])];
        let m = missing(&HashSet::new(), &requires, |id| present.contains(&id));
        assert!(matches!(m, Missing::None));
    }

    #[test]
    fn unsatisfied_all_and_any_reported_together() {
        let present = HashSet::new();
        let requires = vec![Requirement::one(A), Requirement::any_of([B, C])];
        let m = missing(&HashSet::new(), &requires, |id| present.contains(&id));
        match m {
            Missing::Requirements(mr) => {
                assert_eq!(mr.required, vec![A]);
                assert_eq!(mr.any_of, vec![vec![B, C]]);
            }
            other => panic!("expected Requirements, got {other:?}"),
        }
    }
}
