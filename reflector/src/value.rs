use core::fmt;

use reflector_core::{AnyValue, Handle, IntoAny, Reflect, ShapeRef, native};

use crate::{ReflectError, ReflectErrorKind, Type};

/// An addressable, settable value, as produced by
/// [`crate::Typed::instantiate`] and [`crate::Typed::convert`].
///
/// The caller owns it. [`Value::as_type`] views it through the facet matching
/// its shape; writes made through that view land in this value.
#[derive(Clone)]
pub struct Value {
    handle: Handle,
}

impl Value {
    /// Wraps an existing handle.
    pub fn from_handle(handle: Handle) -> Self {
        Self { handle }
    }

    /// A fresh addressable value holding a copy of `value`.
    pub fn new(value: impl IntoAny) -> Self {
        let AnyValue { shape, data } = value.into_any();
        Self::from_handle(Handle::addressable(shape, data))
    }

    /// Shape of the value.
    pub fn shape(&self) -> &ShapeRef {
        self.handle.shape()
    }

    /// The underlying handle.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Snapshot of the value.
    pub fn get(&self) -> Result<AnyValue, ReflectError> {
        self.handle
            .load()
            .map_err(|e| ReflectError::native(self.shape().clone(), e))
    }

    /// Replaces the value.
    pub fn set(&self, value: impl IntoAny) -> Result<(), ReflectError> {
        if !self.handle.can_set() {
            return Err(ReflectError::new(
                self.shape().clone(),
                ReflectErrorKind::NotSettable,
            ));
        }
        native::set(&self.handle, value.into_any())
            .map_err(|e| ReflectError::native(self.shape().clone(), e))
    }

    /// The value as a Rust `T`, if its shape is `T`'s.
    pub fn extract<T: Reflect>(&self) -> Option<T> {
        self.get().ok()?.extract()
    }

    /// This value viewed as a bound [`Type`].
    pub fn as_type(&self) -> Type {
        Type::from_handle(self.handle.clone())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.handle.load() {
            Ok(value) => write!(f, "Value({value:?})"),
            Err(_) => write!(f, "Value({}, <invalid>)", self.shape()),
        }
    }
}
