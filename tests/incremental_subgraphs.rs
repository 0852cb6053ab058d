//! Two disconnected dependency chains run as independent sub-graphs under
//! `run_incremental`, each broker containing exactly its own partition.

use compkit::ids::Requirement;
use compkit::{downcast_ref, submit_component, value, ComponentType, GroupId, Registry, TypeTag};

const CHAIN: ComponentType = ComponentType::new(TypeTag("chain"));

submit_component! {
    CHAIN, A,
    positional |_args| Ok(value(1i32)),
    requires: [],
    optional: [],
}

submit_component! {
    CHAIN, B,
    positional |args| {
        let n = args[0].as_one().and_then(|v| downcast_ref::<i32>(v)).copied().unwrap_or(0);
        Ok(value(n + 1))
    },
    requires: [Requirement::one(A)],
    optional: [],
}

submit_component! {
    CHAIN, X,
    positional |_args| Ok(value("x".to_owned())),
    requires: [],
    optional: [],
}

submit_component! {
    CHAIN, Y,
    positional |args| {
        let s = args[0]
            .as_one()
            .and_then(|v| downcast_ref::<String>(v))
            .cloned()
            .unwrap_or_default();
        Ok(value(format!("{s}y")))
    },
    requires: [Requirement::one(X)],
    optional: [],
}

#[test]
fn disconnected_chains_run_as_independent_sub_graphs() {
    Registry::global().bootstrap();
    let brokers = compkit::run_incremental(GroupId::SINGLE, None).expect("acyclic graph");

    assert_eq!(brokers.len(), 2);

    let ab = brokers.iter().find(|b| b.contains(A)).expect("one broker covers the A/B chain");
    assert!(ab.contains(B));
    assert!(!ab.contains(X));
    assert!(!ab.contains(Y));

    let xy = brokers.iter().find(|b| b.contains(X)).expect("one broker covers the X/Y chain");
    assert!(xy.contains(Y));
    assert!(!xy.contains(A));
    assert!(!xy.contains(B));
}
