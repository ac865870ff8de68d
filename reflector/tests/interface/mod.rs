use reflector::*;
use reflector_testhelpers::test;

fn geometry() -> Type {
    Type::from_shape(
        Shape::interface_builder("Geometry", "example.com/geo")
            .method("Perimeter", Signature::new([], [Shape::f64()]))
            .method("Area", Signature::new([], [Shape::f64()]))
            .build(),
    )
}

#[test]
fn two_method_interface() {
    let ty = geometry();
    let iface = to_interface(&ty).unwrap();

    assert_eq!(iface.num_method(), 2);
    assert!(iface.elem().is_none());
    assert!(!iface.is_instantiable());

    let err = iface.instantiate().unwrap_err();
    assert!(matches!(err.kind(), ReflectErrorKind::NotInstantiable));
    insta::assert_snapshot!(err, @"Type is not instantiable for Geometry");
}

#[test]
fn method_order_is_stable() {
    let ty = geometry();
    let iface = to_interface(&ty).unwrap();

    let first: Vec<String> = iface.methods().iter().map(|m| m.name().to_string()).collect();
    let second: Vec<String> = iface.methods().iter().map(|m| m.name().to_string()).collect();
    assert_eq!(first, ["Area", "Perimeter"]);
    assert_eq!(first, second);
}

#[test]
fn method_metadata() {
    let ty = Type::from_shape(
        Shape::interface_builder("Codec", "example.com/wire")
            .method("Encode", Signature::new([Shape::string()], [Shape::slice(Shape::u64())]))
            .private_method("version", Signature::new([], [Shape::i64()]))
            .build(),
    );
    let methods = to_interface(&ty).unwrap().methods();

    let encode = &methods[0];
    assert_eq!(encode.name(), "Encode");
    assert!(encode.is_exported());
    assert_eq!(encode.package_path(), "");
    assert_eq!(encode.signature().params.len(), 1);
    assert_eq!(encode.ty().name(), "fn(String) -> Vec<u64>");
    assert!(is_function(&encode.ty()));

    let version = &methods[1];
    assert!(!version.is_exported());
    assert_eq!(version.package_path(), "example.com/wire");
}

#[test]
fn empty_interface() {
    let ty = Type::from_shape(Shape::any());
    let iface = to_interface(&ty).unwrap();
    assert_eq!(iface.num_method(), 0);
    assert!(iface.methods().is_empty());
    assert_eq!(ty.name(), "any");
    assert_eq!(ty.package_name(), "");
}

#[test]
fn interface_values_unwrap_to_the_concrete_value() {
    let ty = Type::from_handle(Handle::new(
        Shape::any(),
        Dyn::Interface(Box::new(AnyValue::new(Shape::i64(), Dyn::Int(4)))),
    ));
    assert!(is_interface(&ty));
    assert_eq!(ty.value().unwrap().extract::<i64>(), Some(4));
}

#[test]
fn functions_are_not_instantiable() {
    let ty = Type::from_shape(Shape::function(Signature::new([Shape::i64()], [])));
    let err = ty.instantiate().unwrap_err();
    insta::assert_snapshot!(err, @"Type is not instantiable for fn(i64)");
    assert!(to_instantiable(&ty).is_none());
}
