//! An any-of requirement group is satisfied by a single present member, and the
//! executor passes the whole group's lookups as one list-valued argument.

use compkit::ids::Requirement;
use compkit::{
    downcast_ref, skip, submit_component, value, ArgValue, ComponentType, GroupId, Registry,
    TypeTag,
};

const PROVIDER: ComponentType = ComponentType::new(TypeTag("provider"));

submit_component! {
    PROVIDER, PRIMARY,
    positional |_args| Err(skip!()),
    requires: [],
    optional: [],
}

submit_component! {
    PROVIDER, SECONDARY,
    positional |_args| Ok(value(7i32)),
    requires: [],
    optional: [],
}

submit_component! {
    PROVIDER, CONSUMER,
    positional |args| {
        let ArgValue::Many(values) = &args[0] else {
            panic!("expected a Many slot for an any-of requirement");
        };
        let found: Vec<i32> = values
            .iter()
            .filter_map(|v| v.as_ref().and_then(|v| downcast_ref::<i32>(v)).copied())
            .collect();
        Ok(value(found))
    },
    requires: [Requirement::any_of([PRIMARY, SECONDARY])],
    optional: [],
}

#[test]
fn any_of_requirement_passes_every_group_members_lookup_as_one_list_argument() {
    Registry::global().bootstrap();
    let broker = compkit::run_group(GroupId::SINGLE, None).expect("acyclic graph");

    assert!(!broker.contains(PRIMARY));
    assert_eq!(
        broker.get(SECONDARY).and_then(|v| downcast_ref::<i32>(&v).copied()),
        Some(7)
    );

    let consumed = broker.get(CONSUMER).expect("any-of satisfied by SECONDARY alone");
    assert_eq!(downcast_ref::<Vec<i32>>(&consumed), Some(&vec![7]));
}
