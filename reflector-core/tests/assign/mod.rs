use reflector_core::native::{assign, implements, is_assignable, load};
use reflector_core::{AnyValue, Dyn, IntoAny, Kind, NativeError, Shape, Signature};
use reflector_testhelpers::test;

fn stringer() -> reflector_core::ShapeRef {
    Shape::interface_builder("Stringer", "fmt")
        .method("String", Signature::new([], [Shape::string()]))
        .build()
}

fn celsius() -> reflector_core::ShapeRef {
    Shape::struct_builder("Celsius", "example.com/temp")
        .field("Degrees", Shape::f64())
        .method("String", Signature::new([], [Shape::string()]), |recv, _| {
            vec![format!("{}C", recv.data).into_any()]
        })
        .build()
}

#[test]
fn identical_shapes_are_assignable() {
    assert!(is_assignable(&Shape::i64(), &Shape::i64()));
    assert!(!is_assignable(&Shape::i64(), &Shape::signed(32)));
}

#[test]
fn named_and_unnamed_with_same_structure() {
    let ids = Shape::named("Ids", "example.com/db", Kind::Slice { elem: Shape::i64() });
    let other = Shape::named("Keys", "example.com/db", Kind::Slice { elem: Shape::i64() });
    let plain = Shape::slice(Shape::i64());

    assert!(is_assignable(&plain, &ids));
    assert!(is_assignable(&ids, &plain));
    assert!(!is_assignable(&ids, &other));
}

#[test]
fn interfaces_accept_implementors() {
    assert!(implements(&celsius(), &stringer()));
    assert!(is_assignable(&celsius(), &stringer()));
    assert!(!is_assignable(&Shape::i64(), &stringer()));
    assert!(is_assignable(&Shape::i64(), &Shape::any()));
    assert!(implements(&Shape::pointer(celsius()), &stringer()));
}

#[test]
fn private_interface_methods_only_match_in_module() {
    let sealed = Shape::interface_builder("Sealed", "example.com/temp")
        .private_method("seal", Signature::default())
        .build();
    let inside = Shape::struct_builder("Inside", "example.com/temp")
        .private_method("seal", Signature::default(), |_, _| Vec::new())
        .build();
    let outside = Shape::struct_builder("Outside", "example.com/other")
        .private_method("seal", Signature::default(), |_, _| Vec::new())
        .build();

    assert!(implements(&inside, &sealed));
    assert!(!implements(&outside, &sealed));
}

#[test]
fn interface_slots_box_and_unbox() {
    let any = Shape::any();
    let stored = assign(7i64.into_any(), &any).unwrap();
    assert!(matches!(stored, Dyn::Interface(_)));

    let loaded = load(&any, stored);
    assert_eq!(loaded, AnyValue::new(Shape::i64(), Dyn::Int(7)));
    assert_eq!(loaded.extract::<i64>(), Some(7));
}

#[test]
fn assign_rejects_mismatch() {
    let err = assign(true.into_any(), &Shape::i64()).unwrap_err();
    assert!(matches!(err, NativeError::NotAssignable { .. }));
    insta::assert_snapshot!(err, @"value of type bool is not assignable to type i64");
}
