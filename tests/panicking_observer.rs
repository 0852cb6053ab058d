//! An observer that panics is caught and logged, not allowed to unwind through the run
//! loop — the run completes and the component's own result is unaffected.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use compkit::{submit_component, value, ComponentType, GroupId, Registry, TypeTag};

const STAGE: ComponentType = ComponentType::new(TypeTag("observed"));

submit_component! {
    STAGE, OBSERVED,
    positional |_args| Ok(value(42i32)),
    requires: [],
    optional: [],
}

static CALLS: AtomicUsize = AtomicUsize::new(0);

#[test]
fn observer_panic_is_trapped_and_the_run_still_completes() {
    let registry = Registry::global();
    registry.bootstrap();
    registry.add_observer(
        TypeTag("observed"),
        Arc::new(|_id, _broker| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            panic!("observer blew up");
        }),
    );

    let broker = compkit::run_group(GroupId::SINGLE, None).expect("acyclic graph");

    assert!(broker.contains(OBSERVED));
    assert!(!broker.has_exception(OBSERVED));
    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
}
