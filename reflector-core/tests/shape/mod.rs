use std::collections::HashMap;

use reflector_core::{Kind, Reflect, Shape, Signature};
use reflector_testhelpers::test;

#[test]
fn scalar_names() {
    assert_eq!(bool::shape().name(), "bool");
    assert_eq!(i8::shape().name(), "i8");
    assert_eq!(u32::shape().name(), "u32");
    assert_eq!(f32::shape().name(), "f32");
    assert_eq!(String::shape().name(), "String");
    assert_eq!(Shape::complex(64).name(), "Complex<f64>");
}

#[test]
fn composite_names() {
    insta::assert_snapshot!(HashMap::<String, i64>::shape(), @"Map<String, i64>");
    insta::assert_snapshot!(<[u8; 4]>::shape(), @"[u8; 4]");
    insta::assert_snapshot!(Shape::pointer(Vec::<bool>::shape()), @"*Vec<bool>");
    insta::assert_snapshot!(
        Shape::function(Signature::new([Shape::string()], [Shape::i64(), Shape::bool()])),
        @"fn(String) -> (i64, bool)"
    );
    insta::assert_snapshot!(
        Shape::function(Signature::new([Shape::string(), Shape::slice(Shape::i64())], []).variadic()),
        @"fn(String, ...Vec<i64>)"
    );
}

#[test]
fn unnamed_struct_and_interface_names() {
    let pair = Shape::anonymous_struct()
        .field("a", Shape::i64())
        .field("b", Shape::string())
        .build();
    assert_eq!(pair.name(), "struct { a: i64, b: String }");
    assert_eq!(Shape::anonymous_struct().build().name(), "struct {}");
    assert_eq!(Shape::any().name(), "any");
}

#[test]
fn named_shapes_keep_their_name_and_module() {
    let point = Shape::struct_builder("Point", "example.com/geo")
        .field("X", Shape::i64())
        .build();
    assert_eq!(point.name(), "Point");
    assert_eq!(point.module_name(), "geo");
    assert_eq!(point.module_path, "example.com/geo");
    assert!(point.is_named());
    assert!(!Shape::i64().is_named());
    assert_eq!(Shape::i64().module_name(), "");
}

#[test]
fn shape_equality_is_structural() {
    assert_eq!(Vec::<String>::shape(), Shape::slice(Shape::string()));
    assert_eq!(isize::shape(), i64::shape());
    assert_ne!(i32::shape(), i64::shape());

    let a = Shape::struct_builder("A", "m").field("x", Shape::i64()).build();
    let b = Shape::struct_builder("B", "m").field("x", Shape::i64()).build();
    assert_ne!(a, b);
    assert_eq!(a.kind, b.kind);
}

#[test]
fn methods_are_sorted_by_name() {
    let shape = Shape::interface_builder("Shape", "geo")
        .method("Perimeter", Signature::new([], [Shape::f64()]))
        .method("Area", Signature::new([], [Shape::f64()]))
        .build();
    let names: Vec<&str> = shape.method_set().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Area", "Perimeter"]);
    assert!(matches!(shape.kind, Kind::Interface(_)));
}
