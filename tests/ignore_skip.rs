//! An `ignore` trigger skips a component outright, even when its declared requirement
//! is otherwise satisfied.

use compkit::ids::Requirement;
use compkit::{submit_component, value, ComponentType, GroupId, Registry, TypeTag};

const STAGE: ComponentType = ComponentType::new(TypeTag("stage"));

submit_component! {
    STAGE, MAINTENANCE_MODE,
    positional |_args| Ok(value(true)),
    requires: [],
    optional: [],
}

submit_component! {
    STAGE, DATASTORE,
    positional |_args| Ok(value("connected".to_owned())),
    requires: [],
    optional: [],
}

submit_component! {
    STAGE, MIGRATOR,
    positional |_args| Ok(value(())),
    requires: [Requirement::one(DATASTORE)],
    optional: [],
}

#[test]
fn ignore_trigger_skips_the_component_even_though_its_requirement_is_met() {
    let registry = Registry::global();
    registry.bootstrap();
    registry.add_ignore(MIGRATOR, MAINTENANCE_MODE);

    let broker = compkit::run_group(GroupId::SINGLE, None).expect("acyclic graph");

    assert!(broker.contains(MAINTENANCE_MODE));
    assert!(broker.contains(DATASTORE));
    assert!(!broker.contains(MIGRATOR));
    assert!(!broker.has_exception(MIGRATOR));
    assert!(broker.missing_requirements(MIGRATOR).is_none());
}
