//! A component whose required dependency failed upstream is reported as missing, not
//! invoked, and not itself treated as a failure.

use compkit::ids::Requirement;
use compkit::{submit_component, value, ComponentType, GroupId, Registry, TypeTag};

const STAGE: ComponentType = ComponentType::new(TypeTag("stage"));

submit_component! {
    STAGE, UNSTABLE,
    positional |_args| Err(compkit::anyhow::anyhow!("upstream service unavailable")),
    requires: [],
    optional: [],
}

submit_component! {
    STAGE, DEPENDENT,
    positional |_args| Ok(value(())),
    requires: [Requirement::one(UNSTABLE)],
    optional: [],
}

#[test]
fn dependent_component_is_recorded_as_missing_when_its_requirement_failed() {
    Registry::global().bootstrap();
    let broker = compkit::run_group(GroupId::SINGLE, None).expect("acyclic graph");

    assert!(broker.has_exception(UNSTABLE));
    assert!(!broker.contains(DEPENDENT));
    assert!(!broker.has_exception(DEPENDENT));

    let missing = broker
        .missing_requirements(DEPENDENT)
        .expect("dependent should report missing requirements");
    assert_eq!(missing.required, vec![UNSTABLE]);
    assert!(missing.any_of.is_empty());
}
