//! An absent optional dependency does not block the component; it simply arrives as
//! `None`.

use compkit::{downcast_ref, skip, submit_component, value, ComponentType, GroupId, Registry, TypeTag};

const FEATURE: ComponentType = ComponentType::new(TypeTag("feature"));

submit_component! {
    FEATURE, NAME_PROVIDER,
    positional |_args| Err(skip!()),
    requires: [],
    optional: [],
}

submit_component! {
    FEATURE, GREETER,
    positional |args| {
        let name = args[0].as_one().and_then(|v| downcast_ref::<String>(v)).cloned();
        Ok(value(format!("hello, {}", name.unwrap_or_else(|| "stranger".to_owned()))))
    },
    requires: [],
    optional: [NAME_PROVIDER],
}

#[test]
fn absent_optional_dependency_does_not_block_the_component() {
    Registry::global().bootstrap();
    let broker = compkit::run_group(GroupId::SINGLE, None).expect("acyclic graph");

    assert!(!broker.contains(NAME_PROVIDER));
    let greeting = broker.get(GREETER).expect("optional absence is not an error");
    assert_eq!(downcast_ref::<String>(&greeting), Some(&"hello, stranger".to_owned()));
}
