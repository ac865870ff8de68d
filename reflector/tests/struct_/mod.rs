use reflector::*;
use reflector_testhelpers::{IPanic, test};

fn coord(recv: &AnyValue, i: usize) -> i64 {
    match &recv.data {
        Dyn::Struct(fields) => fields.get(i).and_then(Dyn::as_i64).unwrap_or(0),
        _ => 0,
    }
}

fn point() -> ShapeRef {
    Shape::struct_builder("Point", "example.com/geo")
        .field("X", Shape::i64())
        .field("Y", Shape::i64())
        .private_field("label", Shape::string())
        .method("Sum", Signature::new([], [Shape::i64()]), |recv, _| {
            vec![(coord(recv, 0) + coord(recv, 1)).into_any()]
        })
        .method(
            "Offset",
            Signature::new([Shape::i64()], [Shape::i64(), Shape::i64()]),
            |recv, args| {
                let d = args[0].data.as_i64().unwrap_or(0);
                vec![(coord(recv, 0) + d).into_any(), (coord(recv, 1) + d).into_any()]
            },
        )
        .private_method("reset", Signature::default(), |_, _| Vec::new())
        .build()
}

fn point_value(x: i64, y: i64) -> Value {
    Value::from_handle(Handle::addressable(
        point(),
        Dyn::Struct(vec![Dyn::Int(x), Dyn::Int(y), Dyn::String("p".into())]),
    ))
}

fn summer() -> ShapeRef {
    Shape::interface_builder("Summer", "example.com/geo")
        .method("Sum", Signature::new([], [Shape::i64()]))
        .build()
}

#[test]
fn fields_in_declaration_order() {
    let ty = Type::from_shape(point());
    let st = to_struct(&ty).unwrap();

    assert_eq!(st.num_field(), 3);
    let fields = st.fields();
    let names: Vec<&str> = fields.iter().map(Field::name).collect();
    assert_eq!(names, ["X", "Y", "label"]);

    assert!(fields[0].is_exported());
    assert_eq!(fields[0].package_path(), "");
    assert_eq!(fields[1].index(), 1);
    assert!(!fields[2].is_exported());
    assert_eq!(fields[2].package_path(), "example.com/geo");

    let label = fields[2].ty();
    assert!(is_string(&label));
    assert!(is_struct(label.parent().unwrap()));
}

#[test]
fn methods_come_from_the_method_table() {
    let ty = Type::from_shape(point());
    let st = to_struct(&ty).unwrap();

    assert_eq!(st.num_method(), 2);
    let methods = st.methods();
    let names: Vec<&str> = methods.iter().filter_map(Function::method_name).collect();
    assert_eq!(names, ["Offset", "Sum"]);

    let offset = &methods[0];
    assert_eq!(offset.num_in(), 1);
    assert_eq!(offset.num_out(), 2);
    assert!(!offset.is_variadic());
    assert_eq!(offset.name(), "fn(i64) -> (i64, i64)");
    let results: Vec<String> = offset.results().iter().map(Typed::name).collect();
    assert_eq!(results, ["i64", "i64"]);
    assert!(is_struct(offset.params()[0].parent().unwrap().parent().unwrap()));
}

#[test]
fn bound_methods_can_be_called() -> Result<(), IPanic> {
    let value = point_value(3, 4);
    let ty = value.as_type();
    let st = to_struct(&ty).unwrap();
    let methods = st.methods();

    let sum = methods[1].call(Vec::<AnyValue>::new())?;
    assert_eq!(sum[0].extract::<i64>(), Some(7));

    let moved = methods[0].call([10i64])?;
    let moved: Vec<i64> = moved.iter().filter_map(AnyValue::extract).collect();
    assert_eq!(moved, [13, 14]);

    // the receiver is read when the method is called
    st.field(0)?.set_value(30i64)?;
    let sum = methods[1].call(Vec::<AnyValue>::new())?;
    assert_eq!(sum[0].extract::<i64>(), Some(34));
    Ok(())
}

#[test]
fn methods_fail_once_the_receiver_is_gone() -> Result<(), IPanic> {
    let points = Value::from_handle(Handle::addressable(
        Shape::slice(point()),
        Dyn::Slice(vec![Dyn::Struct(vec![
            Dyn::Int(3),
            Dyn::Int(4),
            Dyn::String("p".into()),
        ])]),
    ));
    let view = points.as_type();
    let elem = to_slice(&view).unwrap().elem_at(0)?;
    let methods = to_struct(&elem).unwrap().methods();
    assert_eq!(methods[1].call(Vec::<AnyValue>::new())?[0].extract::<i64>(), Some(7));

    view.set_value(AnyValue::new(Shape::slice(point()), Dyn::Slice(Vec::new())))?;
    assert!(elem.value().is_err());
    let err = methods[1].call(Vec::<AnyValue>::new()).unwrap_err();
    assert!(matches!(
        err.kind(),
        ReflectErrorKind::Native(NativeError::InvalidPath { .. })
    ));
    Ok(())
}

#[test]
fn calls_are_checked_against_the_signature() {
    let value = point_value(1, 2);
    let ty = value.as_type();
    let methods = to_struct(&ty).unwrap().methods();

    let err = methods[0].call(Vec::<AnyValue>::new()).unwrap_err();
    assert!(matches!(
        err.kind(),
        ReflectErrorKind::Native(NativeError::ArityMismatch { expected: 1, actual: 0 })
    ));
    let err = methods[0].call(["ten"]).unwrap_err();
    assert!(matches!(
        err.kind(),
        ReflectErrorKind::Native(NativeError::NotAssignable { .. })
    ));
}

#[test]
fn unbound_methods_cannot_be_called() {
    let ty = Type::from_shape(point());
    let methods = to_struct(&ty).unwrap().methods();
    assert!(!methods[1].has_value());
    let err = methods[1].call(Vec::<AnyValue>::new()).unwrap_err();
    insta::assert_snapshot!(err, @"No value bound for fn() -> i64");
}

#[test]
fn fields_of_a_bound_struct_write_through() -> Result<(), IPanic> {
    let value = point_value(1, 2);
    let ty = value.as_type();
    let st = to_struct(&ty).unwrap();

    let y = st.field_by_name("Y").unwrap();
    assert!(y.can_set());
    assert_eq!(y.value()?.extract::<i64>(), Some(2));
    y.set_value(20i64)?;

    assert_eq!(
        value.get()?.data,
        Dyn::Struct(vec![Dyn::Int(1), Dyn::Int(20), Dyn::String("p".into())])
    );
    assert!(st.field_by_name("Z").is_none());
    assert!(st.field(3).is_err());
    Ok(())
}

#[test]
fn read_only_structs_have_read_only_fields() -> Result<(), IPanic> {
    let ty = value_of(AnyValue::new(
        point(),
        Dyn::Struct(vec![Dyn::Int(1), Dyn::Int(2), Dyn::String("p".into())]),
    ));
    let x = to_struct(&ty).unwrap().field(0)?;
    assert!(x.has_value());
    assert!(!x.can_set());
    assert!(x.set_value(5i64).is_err());
    Ok(())
}

#[test]
fn implements_checks_the_method_set() {
    let ty = Type::from_shape(point());
    let st = to_struct(&ty).unwrap();

    let summer = Type::from_shape(summer());
    assert!(st.implements(to_interface(&summer).unwrap()));

    let wider = Type::from_shape(
        Shape::interface_builder("Wider", "example.com/geo")
            .method("Sum", Signature::new([], [Shape::i64()]))
            .method("Area", Signature::new([], [Shape::f64()]))
            .build(),
    );
    assert!(!st.implements(to_interface(&wider).unwrap()));

    let any = Type::from_shape(Shape::any());
    assert!(st.implements(to_interface(&any).unwrap()));
}

#[test]
fn instantiate_zeroes_every_field() -> Result<(), IPanic> {
    let value = Type::from_shape(point()).instantiate()?;
    assert_eq!(
        value.get()?.data,
        Dyn::Struct(vec![Dyn::Int(0), Dyn::Int(0), Dyn::String(String::new())])
    );
    assert!(value.as_type().can_set());
    Ok(())
}

#[test]
fn naming() {
    let ty = Type::from_shape(point());
    assert_eq!(ty.name(), "Point");
    assert_eq!(ty.package_name(), "geo");
    assert_eq!(ty.package_path(), "example.com/geo");

    let anon = Type::from_shape(Shape::anonymous_struct().field("ok", Shape::bool()).build());
    assert_eq!(anon.name(), "struct { ok: bool }");
    assert_eq!(anon.package_path(), "");
}
