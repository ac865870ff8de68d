use reflector::*;
use reflector_testhelpers::{IPanic, test};

#[test]
fn binding_modes() {
    let bare = type_of::<i64>();
    assert!(!bare.has_value());
    assert!(!bare.can_set());

    let copy = value_of(1i64);
    assert!(copy.has_value());
    assert!(!copy.can_set());

    let var = Var::new(1i64);
    let reference = reference_of(&var);
    assert!(reference.has_value());
    assert!(reference.can_set());
}

#[test]
fn set_value_checks_binding_then_settability() {
    let err = type_of::<i64>().set_value(2i64).unwrap_err();
    insta::assert_snapshot!(err, @"No value bound for i64");

    let err = value_of(1i64).set_value(2i64).unwrap_err();
    insta::assert_snapshot!(err, @"Value cannot be set for i64");

    let err = type_of::<i64>().value().unwrap_err();
    assert!(matches!(err.kind(), ReflectErrorKind::NoValueBound));
}

#[test]
fn writes_are_shared_between_aliases() -> Result<(), IPanic> {
    let var = Var::new(String::from("before"));
    let first = reference_of(&var);
    let second = reference_of(&var);

    first.set_value("after")?;
    assert_eq!(second.value()?.extract::<String>().as_deref(), Some("after"));
    assert_eq!(var.read().as_deref(), Some("after"));
    Ok(())
}

#[test]
fn set_value_rejects_other_types() {
    let var = Var::new(1i64);
    let err = reference_of(&var).set_value(1.5f64).unwrap_err();
    insta::assert_snapshot!(err, @"value of type f64 is not assignable to type i64 for i64");
    assert_eq!(var.read(), Some(1));
}

#[test]
fn compare_is_descriptor_equality() {
    let a = type_of::<i64>();
    let b = value_of(99i64);
    assert!(a.compare(Some(&b)));
    assert_eq!(a, b);
    assert!(!a.compare(Some(&type_of::<i32>())));
    assert!(!a.compare(None));
}

#[test]
fn roots_have_no_parent() {
    assert!(type_of::<bool>().parent().is_none());
    assert!(value_of(vec![1u8]).parent().is_none());
}

#[test]
fn standalone_values() -> Result<(), IPanic> {
    let value = Value::new(3i64);
    assert_eq!(value.get()?.extract::<i64>(), Some(3));

    value.set(4i64)?;
    assert_eq!(value.extract::<i64>(), Some(4));
    assert!(value.set("four").is_err());
    assert_eq!(value.extract::<String>(), None);

    let view = value.as_type();
    view.set_value(5i64)?;
    assert_eq!(value.extract::<i64>(), Some(5));
    insta::assert_snapshot!(format!("{value:?}"), @"Value(i64(int(5)))");
    Ok(())
}

#[test]
fn instantiate_scalars() -> Result<(), IPanic> {
    assert_eq!(type_of::<bool>().instantiate()?.extract::<bool>(), Some(false));
    assert_eq!(type_of::<String>().instantiate()?.extract::<String>().as_deref(), Some(""));
    assert_eq!(value_of(9.5f64).instantiate()?.extract::<f64>(), Some(0.0));
    Ok(())
}
