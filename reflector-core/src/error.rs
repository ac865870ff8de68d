use core::fmt;

use crate::{PathStep, ShapeRef};

/// Errors raised by the native bridge itself, below the facade.
#[derive(Clone, PartialEq, Eq)]
pub enum NativeError {
    /// A value of shape `actual` cannot be stored where `expected` is required.
    NotAssignable {
        /// Shape of the destination.
        expected: ShapeRef,
        /// Shape of the value offered.
        actual: ShapeRef,
    },

    /// Sequence access past the end.
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Length of the sequence.
        len: usize,
    },

    /// A container operation was applied to a shape of the wrong kind, e.g.
    /// a map operation on a slice.
    WrongKind {
        /// Kind the operation works on.
        expected: &'static str,
        /// Shape it was applied to.
        actual: ShapeRef,
    },

    /// The stored data does not have the layout its shape promises.
    DataMismatch {
        /// Layout the shape calls for.
        expected: &'static str,
        /// Layout actually found.
        actual: &'static str,
    },

    /// Representation conversion between the two shapes is not defined.
    NotConvertible {
        /// Source shape.
        from: ShapeRef,
        /// Target shape.
        to: ShapeRef,
    },

    /// A call supplied the wrong number of arguments.
    ArityMismatch {
        /// Parameters declared.
        expected: usize,
        /// Arguments supplied.
        actual: usize,
    },

    /// Dereference or call through a nil pointer or function.
    Nil,

    /// A handle's path no longer leads to a value, e.g. the slice element it
    /// pointed at was truncated away.
    InvalidPath {
        /// The step that could not be taken.
        step: PathStep,
    },
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeError::NotAssignable { expected, actual } => {
                write!(f, "value of type {actual} is not assignable to type {expected}")
            }
            NativeError::IndexOutOfBounds { index, len } => {
                write!(f, "index out of range [{index}] with length {len}")
            }
            NativeError::WrongKind { expected, actual } => {
                write!(f, "expected a {expected}, but {actual} is a {}", actual.kind.kind_str())
            }
            NativeError::DataMismatch { expected, actual } => {
                write!(f, "stored data is a {actual}, expected a {expected}")
            }
            NativeError::NotConvertible { from, to } => {
                write!(f, "cannot convert {from} to {to}")
            }
            NativeError::ArityMismatch { expected, actual } => {
                write!(f, "expected {expected} arguments, got {actual}")
            }
            NativeError::Nil => write!(f, "nil pointer dereference"),
            NativeError::InvalidPath { step } => {
                write!(f, "path step {step:?} does not lead to a value")
            }
        }
    }
}

impl fmt::Debug for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl core::error::Error for NativeError {}
