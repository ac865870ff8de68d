use alloc::string::String;
use core::fmt;

use reflector_core::{NativeError, ShapeRef};

/// Errors that can occur when reflecting on values.
pub struct ReflectError {
    /// Shape of the type the failing operation was invoked on.
    pub shape: ShapeRef,
    /// What went wrong.
    pub kind: ReflectErrorKind,
}

impl ReflectError {
    /// Creates an error raised while operating on `shape`.
    pub fn new(shape: ShapeRef, kind: ReflectErrorKind) -> Self {
        Self { shape, kind }
    }

    /// Wraps a failure reported by the native runtime.
    pub fn native(shape: ShapeRef, err: NativeError) -> Self {
        Self::new(shape, ReflectErrorKind::Native(err))
    }

    /// The error kind.
    pub fn kind(&self) -> &ReflectErrorKind {
        &self.kind
    }
}

impl fmt::Display for ReflectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {}", self.kind, self.shape)
    }
}

impl fmt::Debug for ReflectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl core::error::Error for ReflectError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.kind {
            ReflectErrorKind::Native(err) => Some(err),
            _ => None,
        }
    }
}

/// The kind of reflection error.
pub enum ReflectErrorKind {
    /// The operation needs a bound value, but the type is a bare descriptor.
    NoValueBound,

    /// A write was attempted through a handle that is not settable.
    NotSettable,

    /// Map lookup on a key that is absent.
    KeyNotFound {
        /// The key, formatted.
        key: String,
    },

    /// `instantiate` on a shape that has no zero value to hand out
    /// (interfaces, functions).
    NotInstantiable,

    /// `convert` to a target the value cannot be converted to, or with no
    /// target at all.
    NotConvertible {
        /// The requested target, if one was given.
        target: Option<ShapeRef>,
    },

    /// The native runtime rejected the operation.
    Native(NativeError),
}

impl fmt::Display for ReflectErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReflectErrorKind::NoValueBound => write!(f, "No value bound"),
            ReflectErrorKind::NotSettable => write!(f, "Value cannot be set"),
            ReflectErrorKind::KeyNotFound { key } => {
                write!(f, "Element with key '{key}' does not exist")
            }
            ReflectErrorKind::NotInstantiable => write!(f, "Type is not instantiable"),
            ReflectErrorKind::NotConvertible { target: Some(target) } => {
                write!(f, "Cannot convert to {target}")
            }
            ReflectErrorKind::NotConvertible { target: None } => {
                write!(f, "Cannot convert without a target type")
            }
            ReflectErrorKind::Native(err) => write!(f, "{err}"),
        }
    }
}

impl fmt::Debug for ReflectErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
