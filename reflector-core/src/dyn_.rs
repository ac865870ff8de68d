use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use indexmap::IndexMap;
use num_complex::Complex64;

use crate::{AnyValue, NativeError, Slot};

/// Untyped native representation of a value.
///
/// A `Dyn` on its own does not know its type; the [`crate::Shape`] that goes
/// with it lives in the [`crate::Handle`] or [`AnyValue`] holding it. All
/// signed integer widths are stored in `Int`, all unsigned widths in `Uint`,
/// both float widths in `Float`, normalized to the declared width.
///
/// Equality is total so that any `Dyn` can key a map: pointers and functions
/// compare by identity, floats by their canonical bit pattern (see
/// [`float_key`]), so `0.0` and `-0.0` are one key and every NaN is another.
#[derive(Clone)]
pub enum Dyn {
    /// Nil pointer, function or interface.
    Nil,
    /// Boolean.
    Bool(bool),
    /// Any signed integer.
    Int(i64),
    /// Any unsigned integer.
    Uint(u64),
    /// Any float.
    Float(f64),
    /// Any complex number.
    Complex(Complex64),
    /// String.
    String(String),
    /// Fixed-size array.
    Array(Vec<Dyn>),
    /// Growable sequence.
    Slice(Vec<Dyn>),
    /// Associative container, in insertion order.
    Map(IndexMap<Dyn, Dyn>),
    /// Struct fields, in declaration order.
    Struct(Vec<Dyn>),
    /// Non-nil pointer to another slot.
    Pointer(Slot),
    /// Non-nil function.
    Function(Func),
    /// Non-nil interface, holding the concrete value and its shape.
    Interface(Box<AnyValue>),
}

impl Dyn {
    /// Name of the variant, for error messages.
    pub const fn kind_str(&self) -> &'static str {
        match self {
            Dyn::Nil => "nil",
            Dyn::Bool(_) => "bool",
            Dyn::Int(_) => "int",
            Dyn::Uint(_) => "uint",
            Dyn::Float(_) => "float",
            Dyn::Complex(_) => "complex",
            Dyn::String(_) => "string",
            Dyn::Array(_) => "array",
            Dyn::Slice(_) => "slice",
            Dyn::Map(_) => "map",
            Dyn::Struct(_) => "struct",
            Dyn::Pointer(_) => "pointer",
            Dyn::Function(_) => "function",
            Dyn::Interface(_) => "interface",
        }
    }

    /// Whether this is [`Dyn::Nil`].
    pub const fn is_nil(&self) -> bool {
        matches!(self, Dyn::Nil)
    }

    /// The boolean, if this is one.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Dyn::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The signed integer, if this is one.
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Dyn::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The unsigned integer, if this is one.
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Dyn::Uint(u) => Some(*u),
            _ => None,
        }
    }

    /// The float, if this is one.
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Dyn::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Dyn::String(s) => Some(s),
            _ => None,
        }
    }

    /// Length of arrays, slices, maps and strings.
    pub fn len(&self) -> Option<usize> {
        match self {
            Dyn::Array(items) | Dyn::Slice(items) => Some(items.len()),
            Dyn::Map(map) => Some(map.len()),
            Dyn::String(s) => Some(s.len()),
            _ => None,
        }
    }
}

/// Bit pattern a float keys a map by. Signed zeros collapse to `+0.0` and all
/// NaNs to one quiet NaN, so equality stays reflexive.
pub fn float_key(x: f64) -> u64 {
    if x == 0.0 {
        0
    } else if x.is_nan() {
        f64::NAN.to_bits()
    } else {
        x.to_bits()
    }
}

impl PartialEq for Dyn {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Dyn::Nil, Dyn::Nil) => true,
            (Dyn::Bool(a), Dyn::Bool(b)) => a == b,
            (Dyn::Int(a), Dyn::Int(b)) => a == b,
            (Dyn::Uint(a), Dyn::Uint(b)) => a == b,
            (Dyn::Float(a), Dyn::Float(b)) => float_key(*a) == float_key(*b),
            (Dyn::Complex(a), Dyn::Complex(b)) => {
                float_key(a.re) == float_key(b.re) && float_key(a.im) == float_key(b.im)
            }
            (Dyn::String(a), Dyn::String(b)) => a == b,
            (Dyn::Array(a), Dyn::Array(b)) => a == b,
            (Dyn::Slice(a), Dyn::Slice(b)) => a == b,
            (Dyn::Map(a), Dyn::Map(b)) => a == b,
            (Dyn::Struct(a), Dyn::Struct(b)) => a == b,
            (Dyn::Pointer(a), Dyn::Pointer(b)) => a.ptr_eq(b),
            (Dyn::Function(a), Dyn::Function(b)) => a.ptr_eq(b),
            (Dyn::Interface(a), Dyn::Interface(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Dyn {}

impl Hash for Dyn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Dyn::Nil => {}
            Dyn::Bool(b) => b.hash(state),
            Dyn::Int(i) => i.hash(state),
            Dyn::Uint(u) => u.hash(state),
            Dyn::Float(f) => float_key(*f).hash(state),
            Dyn::Complex(c) => {
                float_key(c.re).hash(state);
                float_key(c.im).hash(state);
            }
            Dyn::String(s) => s.hash(state),
            Dyn::Array(items) | Dyn::Slice(items) | Dyn::Struct(items) => items.hash(state),
            // map equality ignores order, so only the length is hashed
            Dyn::Map(map) => map.len().hash(state),
            Dyn::Pointer(slot) => slot.addr().hash(state),
            Dyn::Function(func) => func.addr().hash(state),
            Dyn::Interface(inner) => inner.data.hash(state),
        }
    }
}

impl fmt::Display for Dyn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, open: &str, items: &[Dyn], close: &str) -> fmt::Result {
            f.write_str(open)?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
            f.write_str(close)
        }

        match self {
            Dyn::Nil => f.write_str("nil"),
            Dyn::Bool(b) => write!(f, "{b}"),
            Dyn::Int(i) => write!(f, "{i}"),
            Dyn::Uint(u) => write!(f, "{u}"),
            Dyn::Float(x) => write!(f, "{x}"),
            Dyn::Complex(c) => write!(f, "({c})"),
            Dyn::String(s) => f.write_str(s),
            Dyn::Array(items) | Dyn::Slice(items) => list(f, "[", items, "]"),
            Dyn::Struct(items) => list(f, "{", items, "}"),
            Dyn::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Dyn::Pointer(slot) => write!(f, "{:#x}", slot.addr()),
            Dyn::Function(func) => write!(f, "fn@{:#x}", func.addr()),
            Dyn::Interface(inner) => write!(f, "{}", inner.data),
        }
    }
}

impl fmt::Debug for Dyn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dyn::String(s) => write!(f, "String({s:?})"),
            Dyn::Nil => f.write_str("Nil"),
            other => write!(f, "{}({other})", other.kind_str()),
        }
    }
}

/// A callable function value.
#[derive(Clone)]
pub struct Func(Rc<dyn Fn(&[AnyValue]) -> Result<Vec<AnyValue>, NativeError>>);

impl Func {
    /// Wraps a closure that cannot fail.
    pub fn new(f: impl Fn(&[AnyValue]) -> Vec<AnyValue> + 'static) -> Self {
        Self(Rc::new(move |args: &[AnyValue]| Ok::<_, NativeError>(f(args))))
    }

    /// Wraps a closure that can fail, such as a method whose receiver has
    /// to be loaded first.
    pub fn fallible(
        f: impl Fn(&[AnyValue]) -> Result<Vec<AnyValue>, NativeError> + 'static,
    ) -> Self {
        Self(Rc::new(f))
    }

    /// Invokes the function. Arity and argument shapes are checked by
    /// [`crate::native::call`], not here.
    pub fn invoke(&self, args: &[AnyValue]) -> Result<Vec<AnyValue>, NativeError> {
        (self.0)(args)
    }

    /// Whether both values refer to the same closure.
    pub fn ptr_eq(&self, other: &Func) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}
