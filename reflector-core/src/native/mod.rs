//! Primitive operations of the native runtime.
//!
//! Everything above this module (the `reflector` facade in particular) reads
//! and writes values exclusively through these functions; they are the whole
//! contract between the facade and the runtime.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::{AnyValue, Dyn, FieldDef, Handle, IntoAny, Kind, MethodDef, NativeError, Reflect, Shape, ShapeRef};

mod container;
pub use container::*;

mod convert;
pub use convert::*;

/// Descriptor of a host value.
pub fn descriptor_of<T: Reflect>(_value: &T) -> ShapeRef {
    T::shape()
}

/// Read-only handle over a copy of `value`.
///
/// Use [`crate::Var`] to obtain a settable handle.
pub fn handle_of(value: impl IntoAny) -> Handle {
    let AnyValue { shape, data } = value.into_any();
    Handle::new(shape, data)
}

/// Settable handle over a fresh zero value of `shape`.
pub fn zero_value(shape: &ShapeRef) -> Handle {
    Handle::addressable(shape.clone(), zero(shape))
}

/// Zero value of `shape`: `false`, `0`, empty string, empty containers,
/// nil pointers, functions and interfaces; arrays and structs are zeroed
/// element by element.
pub fn zero(shape: &Shape) -> Dyn {
    match &shape.kind {
        Kind::Bool => Dyn::Bool(false),
        Kind::Signed { .. } => Dyn::Int(0),
        Kind::Unsigned { .. } => Dyn::Uint(0),
        Kind::Float { .. } => Dyn::Float(0.0),
        Kind::Complex { .. } => Dyn::Complex(Default::default()),
        Kind::String => Dyn::String(Default::default()),
        Kind::Array { elem, len } => Dyn::Array((0..*len).map(|_| zero(elem)).collect()),
        Kind::Slice { .. } => Dyn::Slice(Vec::new()),
        Kind::Map { .. } => Dyn::Map(Default::default()),
        Kind::Struct(def) => Dyn::Struct(def.fields.iter().map(|f| zero(&f.shape)).collect()),
        Kind::Pointer { .. } | Kind::Function(_) | Kind::Interface(_) => Dyn::Nil,
    }
}

/// Whether a value of shape `from` may be stored where `to` is expected.
///
/// True for identical shapes, for identical structure when at least one side
/// is unnamed, and for any shape that implements the interface `to`.
pub fn is_assignable(from: &Shape, to: &Shape) -> bool {
    if from == to {
        return true;
    }
    if let Kind::Interface(_) = to.kind {
        return implements(from, to);
    }
    (!from.is_named() || !to.is_named()) && from.kind == to.kind
}

/// Whether `shape`'s method set covers every method of the interface
/// `iface`. Private interface methods only match within the same module.
pub fn implements(shape: &Shape, iface: &Shape) -> bool {
    let Kind::Interface(def) = &iface.kind else {
        return false;
    };
    let available = shape.method_set();
    def.methods.iter().all(|wanted| {
        available.iter().any(|m| {
            m.matches(wanted)
                && (wanted.visibility == crate::Visibility::Public
                    || shape.module_path == iface.module_path)
        })
    })
}

/// Fields of a struct shape, in declaration order.
pub fn fields(shape: &Shape) -> &[FieldDef] {
    shape.fields()
}

/// Enumerable methods of a shape: every declared method of an interface,
/// the exported method table of a struct (sorted by name).
pub fn methods(shape: &Shape) -> Vec<&MethodDef> {
    match &shape.kind {
        Kind::Struct(def) => def.exported_methods().collect(),
        Kind::Interface(def) => def.methods.iter().collect(),
        _ => Vec::new(),
    }
}

/// Prepares `value` for storage in a slot of shape `to`.
///
/// Values stored into interface slots are boxed together with their shape so
/// they can be read back as what they are.
pub fn assign(value: AnyValue, to: &ShapeRef) -> Result<Dyn, NativeError> {
    if !is_assignable(&value.shape, to) {
        return Err(NativeError::NotAssignable {
            expected: to.clone(),
            actual: value.shape,
        });
    }
    match (&to.kind, &value.shape.kind) {
        (Kind::Interface(_), Kind::Interface(_)) => Ok(value.data),
        (Kind::Interface(_), _) => Ok(Dyn::Interface(Box::new(value))),
        _ => Ok(value.data),
    }
}

/// Reverse of [`assign`]: pairs data read from a slot of shape `shape` with
/// its shape. Non-nil interface slots yield the concrete value they hold.
pub fn load(shape: &ShapeRef, data: Dyn) -> AnyValue {
    match data {
        Dyn::Interface(inner) => *inner,
        data => AnyValue::new(shape.clone(), data),
    }
}

/// Replaces the value behind `handle`.
///
/// The handle's settability is the caller's concern.
pub fn set(handle: &Handle, value: AnyValue) -> Result<(), NativeError> {
    let data = assign(value, handle.shape())?;
    handle.write(|slot| *slot = data)
}

/// Handle to the value a non-nil pointer points at. The pointee is always
/// settable, whatever the pointer handle's own settability.
pub fn deref(handle: &Handle) -> Result<Handle, NativeError> {
    let Kind::Pointer { pointee } = &handle.shape().kind else {
        return Err(NativeError::WrongKind {
            expected: "pointer",
            actual: handle.shape().clone(),
        });
    };
    let slot = handle.read(|data| match data {
        Dyn::Pointer(slot) => Ok(slot.clone()),
        Dyn::Nil => Err(NativeError::Nil),
        other => Err(NativeError::DataMismatch {
            expected: "pointer",
            actual: other.kind_str(),
        }),
    })??;
    Ok(Handle::from_slot(pointee.clone(), slot, true))
}

/// Invokes the function held by `func`, checking arity and argument
/// assignability against its signature first.
pub fn call(func: &AnyValue, args: Vec<AnyValue>) -> Result<Vec<AnyValue>, NativeError> {
    let Kind::Function(sig) = &func.shape.kind else {
        return Err(NativeError::WrongKind {
            expected: "function",
            actual: func.shape.clone(),
        });
    };
    let f = match &func.data {
        Dyn::Function(f) => f,
        Dyn::Nil => return Err(NativeError::Nil),
        other => {
            return Err(NativeError::DataMismatch {
                expected: "function",
                actual: other.kind_str(),
            });
        }
    };

    let arity_ok = if sig.variadic {
        args.len() + 1 >= sig.params.len()
    } else {
        args.len() == sig.params.len()
    };
    if !arity_ok {
        return Err(NativeError::ArityMismatch {
            expected: sig.params.len(),
            actual: args.len(),
        });
    }

    for (i, arg) in args.iter().enumerate() {
        // arguments in the variadic tail must fit the element type
        let expected = if sig.variadic && i + 1 >= sig.params.len() {
            match sig.params.last() {
                Some(last) => match &last.kind {
                    Kind::Slice { elem } => elem,
                    _ => last,
                },
                None => {
                    return Err(NativeError::ArityMismatch {
                        expected: 0,
                        actual: args.len(),
                    });
                }
            }
        } else {
            &sig.params[i]
        };
        if !is_assignable(&arg.shape, expected) {
            return Err(NativeError::NotAssignable {
                expected: expected.clone(),
                actual: arg.shape.clone(),
            });
        }
    }

    f.invoke(&args)
}
