//! A linear dependency chain runs in order and results compose.

use compkit::ids::Requirement;
use compkit::{downcast_ref, submit_component, value, ComponentType, GroupId, Registry, TypeTag};

const STAGE: ComponentType = ComponentType::new(TypeTag("stage"));

submit_component! {
    STAGE, SOURCE,
    positional |_args| Ok(value(1i32)),
    requires: [],
    optional: [],
}

submit_component! {
    STAGE, DOUBLE,
    positional |args| {
        let n = args[0].as_one().and_then(|v| downcast_ref::<i32>(v)).copied().unwrap_or(0);
        Ok(value(n * 2))
    },
    requires: [Requirement::one(SOURCE)],
    optional: [],
}

submit_component! {
    STAGE, STRINGIFY,
    positional |args| {
        let n = args[0].as_one().and_then(|v| downcast_ref::<i32>(v)).copied().unwrap_or(0);
        Ok(value(n.to_string()))
    },
    requires: [Requirement::one(DOUBLE)],
    optional: [],
}

#[test]
fn chain_runs_in_dependency_order_and_composes_results() {
    Registry::global().bootstrap();
    let broker = compkit::run_group(GroupId::SINGLE, None).expect("acyclic graph");

    assert_eq!(
        broker.get(SOURCE).and_then(|v| downcast_ref::<i32>(&v).copied()),
        Some(1)
    );
    assert_eq!(
        broker.get(DOUBLE).and_then(|v| downcast_ref::<i32>(&v).copied()),
        Some(2)
    );
    assert_eq!(
        broker.get(STRINGIFY).and_then(|v| downcast_ref::<String>(&v).cloned()),
        Some("2".to_owned())
    );
}
