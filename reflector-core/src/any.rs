use alloc::string::{String, ToString};
use core::fmt;

use crate::{Dyn, Reflect, Shape, ShapeRef};

/// A value together with its shape: the runtime's "any".
///
/// Everything read out of a handle comes back as an `AnyValue`, and every
/// input to a mutating operation is converted into one through [`IntoAny`].
#[derive(Clone, PartialEq, Eq)]
pub struct AnyValue {
    /// Shape of `data`.
    pub shape: ShapeRef,
    /// The value itself.
    pub data: Dyn,
}

impl AnyValue {
    /// Pairs `data` with `shape`. No conformance check is made.
    pub fn new(shape: ShapeRef, data: Dyn) -> Self {
        Self { shape, data }
    }

    /// Shape of the value.
    pub fn shape(&self) -> &ShapeRef {
        &self.shape
    }

    /// Untyped representation.
    pub fn data(&self) -> &Dyn {
        &self.data
    }

    /// Converts back into a Rust value, if `T`'s shape matches.
    pub fn extract<T: Reflect>(&self) -> Option<T> {
        if *self.shape != *T::shape() {
            return None;
        }
        T::from_dyn(&self.data)
    }
}

impl fmt::Display for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.shape, self.data)
    }
}

/// Conversion into an [`AnyValue`], used by every operation that accepts
/// "any value".
pub trait IntoAny {
    /// Performs the conversion.
    fn into_any(self) -> AnyValue;
}

impl<T: Reflect> IntoAny for T {
    fn into_any(self) -> AnyValue {
        AnyValue::new(T::shape(), self.into_dyn())
    }
}

impl IntoAny for AnyValue {
    fn into_any(self) -> AnyValue {
        self
    }
}

impl IntoAny for &AnyValue {
    fn into_any(self) -> AnyValue {
        self.clone()
    }
}

impl IntoAny for &str {
    fn into_any(self) -> AnyValue {
        AnyValue::new(Shape::string(), Dyn::String(self.to_string()))
    }
}

impl IntoAny for &String {
    fn into_any(self) -> AnyValue {
        AnyValue::new(Shape::string(), Dyn::String(self.clone()))
    }
}
