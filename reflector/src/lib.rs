#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

pub use reflector_core::{
    AnyValue, Dyn, FieldDef, Func, Handle, IntoAny, Kind, MethodDef, NativeError, Reflect, Shape,
    ShapeRef, Signature, Slot, Var, Visibility,
};

mod macros;

mod error;
pub use error::*;

mod typed;
pub use typed::*;

mod ty;
pub use ty::*;

mod dispatch;
pub use dispatch::*;

mod meta;
pub use meta::*;

mod scalar;
pub use scalar::*;

mod interface;
pub use interface::*;

mod struct_;
pub use struct_::*;

mod function;
pub use function::*;

mod array;
pub use array::*;

mod pointer;
pub use pointer::*;

mod map;
pub use map::*;

mod slice;
pub use slice::*;

mod value;
pub use value::*;

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! debug {
    ($($tt:tt)*) => {};
}

/// Bare descriptor for `T`: structural queries work, value queries fail with
/// [`ReflectErrorKind::NoValueBound`].
pub fn type_of<T: Reflect>() -> Type {
    Type::from_shape(T::shape())
}

/// Type bound to a private copy of `value`. Not settable.
pub fn value_of(value: impl IntoAny) -> Type {
    Type::from_handle(reflector_core::native::handle_of(value))
}

/// Type bound to `var` itself. Settable: writes are visible through `var`.
pub fn reference_of<T: Reflect>(var: &Var<T>) -> Type {
    Type::from_handle(var.handle())
}
