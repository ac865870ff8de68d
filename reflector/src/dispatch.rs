//! Classification and narrowing.
//!
//! Every `is_*` predicate has a `to_*` counterpart returning the facet when
//! the predicate holds. Exactly one primitive predicate is true for any
//! [`Type`]; `is_integer`, `is_number` and `is_basic` are unions over them.

use crate::{
    Array, Boolean, Complex, Float, Function, Interface, Map, Pointer, SignedInteger, Slice,
    StringType, Struct, Type, Typed, UnsignedInteger,
};

macro_rules! narrow {
    ($($variant:ident: $facet:ident, $is:ident, $to:ident;)*) => {
        $(
            #[doc = concat!("Whether `ty` is a ", stringify!($variant), ".")]
            pub fn $is(ty: &Type) -> bool {
                matches!(ty, Type::$variant(_))
            }

            #[doc = concat!("`ty` as a [`", stringify!($facet), "`], if it is one.")]
            pub fn $to(ty: &Type) -> Option<&$facet> {
                match ty {
                    Type::$variant(facet) => Some(facet),
                    _ => None,
                }
            }
        )*
    };
}

narrow! {
    Pointer: Pointer, is_pointer, to_pointer;
    Struct: Struct, is_struct, to_struct;
    Interface: Interface, is_interface, to_interface;
    Function: Function, is_function, to_function;
    Array: Array, is_array, to_array;
    Slice: Slice, is_slice, to_slice;
    Map: Map, is_map, to_map;
    String: StringType, is_string, to_string;
    Boolean: Boolean, is_boolean, to_boolean;
    SignedInteger: SignedInteger, is_signed_integer, to_signed_integer;
    UnsignedInteger: UnsignedInteger, is_unsigned_integer, to_unsigned_integer;
    Float: Float, is_float, to_float;
    Complex: Complex, is_complex, to_complex;
}

/// Signed or unsigned integer.
pub fn is_integer(ty: &Type) -> bool {
    is_signed_integer(ty) || is_unsigned_integer(ty)
}

/// Integer, float or complex.
pub fn is_number(ty: &Type) -> bool {
    is_integer(ty) || is_float(ty) || is_complex(ty)
}

/// Boolean, string or number.
pub fn is_basic(ty: &Type) -> bool {
    is_boolean(ty) || is_string(ty) || is_number(ty)
}

/// Whether `ty` can be instantiated (anything but interfaces and functions).
pub fn is_instantiable(ty: &Type) -> bool {
    ty.is_instantiable()
}

/// `ty` itself, if it can be instantiated.
pub fn to_instantiable(ty: &Type) -> Option<&Type> {
    is_instantiable(ty).then_some(ty)
}
