use std::collections::HashMap;

use reflector::*;
use reflector_testhelpers::{IPanic, test};

fn scores() -> HashMap<String, i64> {
    HashMap::from([("a".to_string(), 1), ("b".to_string(), 2)])
}

#[test]
fn read_a_bound_map() -> Result<(), IPanic> {
    let ty = value_of(scores());
    let map = to_map(&ty).unwrap();

    assert!(is_string(&map.key().unwrap()));
    assert!(is_signed_integer(&map.elem().unwrap()));
    assert_eq!(map.len()?, 2);
    assert_eq!(map.get("a")?.extract::<i64>(), Some(1));

    let err = map.get("z").unwrap_err();
    assert!(matches!(err.kind(), ReflectErrorKind::KeyNotFound { .. }));
    insta::assert_snapshot!(err, @"Element with key 'z' does not exist for Map<String, i64>");

    let mut entries: Vec<(String, i64)> = map
        .entry_set()?
        .iter()
        .map(|e| (e.key().extract().unwrap(), e.value().extract().unwrap()))
        .collect();
    entries.sort();
    assert_eq!(entries, [("a".to_string(), 1), ("b".to_string(), 2)]);
    Ok(())
}

#[test]
fn key_and_elem_know_their_parent() {
    let ty = type_of::<HashMap<String, bool>>();
    let map = to_map(&ty).unwrap();

    let key = map.key().unwrap();
    assert_eq!(key.name(), "String");
    assert!(!key.has_value());
    assert!(is_map(key.parent().unwrap()));
    assert!(key.parent().unwrap().compare(Some(&ty)));
    assert!(is_boolean(&map.elem().unwrap()));
}

#[test]
fn instantiate_put_get_delete() -> Result<(), IPanic> {
    let value = type_of::<HashMap<String, i64>>().instantiate()?;
    let view = value.as_type();
    let map = to_map(&view).unwrap();
    assert_eq!(map.len()?, 0);

    map.put("k", 7i64)?;
    assert_eq!(map.get("k")?.extract::<i64>(), Some(7));
    assert_eq!(map.len()?, 1);

    map.delete("k")?;
    assert!(!map.contains("k")?);
    assert_eq!(map.len()?, 0);
    assert_eq!(value.extract::<HashMap<String, i64>>(), Some(HashMap::new()));
    Ok(())
}

#[test]
fn instantiate_ignores_the_bound_map() -> Result<(), IPanic> {
    let ty = value_of(scores());
    let fresh = ty.instantiate()?;
    assert!(fresh.as_type().can_set());
    assert_eq!(to_map(&fresh.as_type()).unwrap().len()?, 0);
    assert_eq!(to_map(&ty).unwrap().len()?, 2);
    Ok(())
}

#[test]
fn put_overwrites() -> Result<(), IPanic> {
    let var = Var::new(scores());
    let ty = reference_of(&var);
    let map = to_map(&ty).unwrap();

    map.put("a", 10i64)?;
    assert_eq!(map.len()?, 2);
    assert_eq!(var.read().unwrap()["a"], 10);
    Ok(())
}

#[test]
fn delete_absent_key_is_a_no_op() -> Result<(), IPanic> {
    let var = Var::new(scores());
    let ty = reference_of(&var);
    let map = to_map(&ty).unwrap();

    map.delete("missing")?;
    map.delete("missing")?;
    assert_eq!(map.len()?, 2);
    Ok(())
}

#[test]
fn clear_empties_the_map() -> Result<(), IPanic> {
    let var = Var::new(scores());
    let ty = reference_of(&var);
    let map = to_map(&ty).unwrap();

    map.clear()?;
    assert_eq!(map.len()?, 0);
    assert!(map.key_set()?.is_empty());
    assert_eq!(var.read(), Some(HashMap::new()));

    // clearing an empty map is fine too
    map.clear()?;
    Ok(())
}

#[test]
fn snapshots_are_not_live() -> Result<(), IPanic> {
    let var = Var::new(scores());
    let ty = reference_of(&var);
    let map = to_map(&ty).unwrap();

    let keys = map.key_set()?;
    let values = map.value_set()?;
    map.put("c", 3i64)?;

    assert_eq!(keys.len(), 2);
    assert_eq!(values.len(), 2);
    let mut values: Vec<i64> = values.iter().filter_map(AnyValue::extract).collect();
    values.sort();
    assert_eq!(values, [1, 2]);
    assert_eq!(map.key_set()?.len(), 3);
    Ok(())
}

#[test]
fn mutation_requires_settable_value() {
    let ty = value_of(scores());
    let map = to_map(&ty).unwrap();

    let err = map.put("c", 3i64).unwrap_err();
    assert!(matches!(err.kind(), ReflectErrorKind::NotSettable));
    insta::assert_snapshot!(err, @"Value cannot be set for Map<String, i64>");
    assert!(matches!(
        map.delete("a").unwrap_err().kind(),
        ReflectErrorKind::NotSettable
    ));
    assert!(matches!(
        map.clear().unwrap_err().kind(),
        ReflectErrorKind::NotSettable
    ));
    assert_eq!(map.len().unwrap(), 2);
}

#[test]
fn bare_descriptor_has_no_value() {
    let ty = type_of::<HashMap<String, i64>>();
    let map = to_map(&ty).unwrap();

    let err = map.len().unwrap_err();
    insta::assert_snapshot!(err, @"No value bound for Map<String, i64>");
    assert!(matches!(
        map.contains("a").unwrap_err().kind(),
        ReflectErrorKind::NoValueBound
    ));
    assert!(matches!(
        map.put("a", 1i64).unwrap_err().kind(),
        ReflectErrorKind::NoValueBound
    ));
    assert!(matches!(
        map.entry_set().unwrap_err().kind(),
        ReflectErrorKind::NoValueBound
    ));
}

#[test]
fn wrongly_typed_entries_are_rejected_by_the_runtime() {
    let var = Var::new(scores());
    let ty = reference_of(&var);
    let map = to_map(&ty).unwrap();

    let err = map.put("c", "three").unwrap_err();
    assert!(matches!(
        err.kind(),
        ReflectErrorKind::Native(NativeError::NotAssignable { .. })
    ));
    insta::assert_snapshot!(
        err,
        @"value of type String is not assignable to type i64 for Map<String, i64>"
    );
    assert_eq!(var.read(), Some(scores()));
}

#[test]
fn interface_valued_maps_hold_anything() -> Result<(), IPanic> {
    let shape = Shape::map(Shape::string(), Shape::any());
    let value = Type::from_shape(shape).instantiate()?;
    let view = value.as_type();
    let map = to_map(&view).unwrap();

    map.put("n", 1i64)?;
    map.put("s", "one")?;
    assert_eq!(map.get("n")?.extract::<i64>(), Some(1));
    assert_eq!(map.get("s")?.extract::<String>().as_deref(), Some("one"));
    assert_eq!(map.elem().unwrap().name(), "any");
    Ok(())
}

#[test]
fn float_keys_collapse_signed_zero_and_nan() -> Result<(), IPanic> {
    let value = Type::from_shape(Shape::map(Shape::f64(), Shape::i64())).instantiate()?;
    let view = value.as_type();
    let map = to_map(&view).unwrap();

    map.put(0.0f64, 1i64)?;
    map.put(-0.0f64, 2i64)?;
    assert_eq!(map.len()?, 1);
    assert_eq!(map.get(0.0f64)?.extract::<i64>(), Some(2));

    // every NaN lands on one entry, which stays reachable
    map.put(f64::NAN, 3i64)?;
    map.put(-f64::NAN, 4i64)?;
    assert_eq!(map.len()?, 2);
    assert_eq!(map.get(f64::NAN)?.extract::<i64>(), Some(4));
    map.delete(f64::NAN)?;
    assert_eq!(map.len()?, 1);
    Ok(())
}
