//! A component that declares a dependency on a component registered under a different
//! group never blocks that group's run order — it is reported as a missing requirement,
//! the same graceful path an entirely absent dependency takes.

use compkit::ids::Requirement;
use compkit::{submit_component, value, ComponentType, GroupId, Registry, TypeTag};

const SINGLE: ComponentType = ComponentType::new(TypeTag("stage"));
const CLUSTER: ComponentType = ComponentType::new(TypeTag("stage")).with_group(GroupId::CLUSTER);

submit_component! {
    CLUSTER, CLUSTER_ONLY,
    positional |_args| Ok(value(())),
    requires: [],
    optional: [],
}

submit_component! {
    SINGLE, WANTS_OTHER_GROUP,
    positional |_args| Ok(value(())),
    requires: [Requirement::one(CLUSTER_ONLY)],
    optional: [],
}

#[test]
fn dependency_in_a_different_group_is_reported_missing_not_a_run_order_error() {
    Registry::global().bootstrap();
    let broker = compkit::run_group(GroupId::SINGLE, None).expect("single group is acyclic");

    assert!(!broker.contains(CLUSTER_ONLY));
    assert!(!broker.contains(WANTS_OTHER_GROUP));
    assert!(!broker.has_exception(WANTS_OTHER_GROUP));

    let missing = broker
        .missing_requirements(WANTS_OTHER_GROUP)
        .expect("cross-group dependency should be reported missing");
    assert_eq!(missing.required, vec![CLUSTER_ONLY]);
}
