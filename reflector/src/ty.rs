use alloc::rc::Rc;
use core::fmt;

use reflector_core::{Handle, Kind, ShapeRef};

use crate::{
    Array, Base, Boolean, Complex, Float, Function, Interface, Map, Pointer, SignedInteger, Slice,
    StringType, Struct, Typed, UnsignedInteger,
};

/// A type, narrowed to the facet matching its shape.
///
/// The set of variants is closed: every [`Kind`] maps to exactly one of them
/// through [`Type::from_parts`]. Use the `is_*`/`to_*` functions (or a plain
/// `match`) to get at the facet-specific operations.
#[derive(Clone)]
pub enum Type {
    /// `*T`
    Pointer(Pointer),
    /// Record with fields and methods.
    Struct(Struct),
    /// Method set.
    Interface(Interface),
    /// Callable.
    Function(Function),
    /// `[T; N]`
    Array(Array),
    /// `Vec<T>`
    Slice(Slice),
    /// `Map<K, V>`
    Map(Map),
    /// `String`
    String(StringType),
    /// `bool`
    Boolean(Boolean),
    /// `i8` through `i64`
    SignedInteger(SignedInteger),
    /// `u8` through `u64`
    UnsignedInteger(UnsignedInteger),
    /// `f32`, `f64`
    Float(Float),
    /// `Complex<f32>`, `Complex<f64>`
    Complex(Complex),
}

impl Type {
    /// Builds the facet for `shape`. This is the one place where a native
    /// kind is mapped to a variant.
    pub(crate) fn from_parts(
        shape: ShapeRef,
        handle: Option<Handle>,
        parent: Option<Rc<Type>>,
    ) -> Type {
        let kind = shape.clone();
        let base = Base {
            shape,
            handle,
            parent,
        };
        match &kind.kind {
            Kind::Bool => Type::Boolean(Boolean { base }),
            Kind::Signed { .. } => Type::SignedInteger(SignedInteger { base }),
            Kind::Unsigned { .. } => Type::UnsignedInteger(UnsignedInteger { base }),
            Kind::Float { .. } => Type::Float(Float { base }),
            Kind::Complex { .. } => Type::Complex(Complex { base }),
            Kind::String => Type::String(StringType { base }),
            Kind::Array { .. } => Type::Array(Array { base }),
            Kind::Slice { .. } => Type::Slice(Slice { base }),
            Kind::Map { .. } => Type::Map(Map { base }),
            Kind::Pointer { .. } => Type::Pointer(Pointer { base }),
            Kind::Struct(_) => Type::Struct(Struct { base }),
            Kind::Interface(_) => Type::Interface(Interface { base }),
            Kind::Function(_) => Type::Function(Function { base, method: None }),
        }
    }

    /// A bare descriptor: no value bound.
    pub fn from_shape(shape: ShapeRef) -> Type {
        Self::from_parts(shape, None, None)
    }

    /// A type bound to the value behind `handle`, settable iff the handle is.
    pub fn from_handle(handle: Handle) -> Type {
        Self::from_parts(handle.shape().clone(), Some(handle), None)
    }

    /// Name of the facet this type was narrowed to, in lowercase.
    pub fn facet_name(&self) -> &'static str {
        match self {
            Type::Pointer(_) => "pointer",
            Type::Struct(_) => "struct",
            Type::Interface(_) => "interface",
            Type::Function(_) => "function",
            Type::Array(_) => "array",
            Type::Slice(_) => "slice",
            Type::Map(_) => "map",
            Type::String(_) => "string",
            Type::Boolean(_) => "boolean",
            Type::SignedInteger(_) => "signed integer",
            Type::UnsignedInteger(_) => "unsigned integer",
            Type::Float(_) => "float",
            Type::Complex(_) => "complex",
        }
    }

    fn facet(&self) -> &dyn Typed {
        match self {
            Type::Pointer(t) => t,
            Type::Struct(t) => t,
            Type::Interface(t) => t,
            Type::Function(t) => t,
            Type::Array(t) => t,
            Type::Slice(t) => t,
            Type::Map(t) => t,
            Type::String(t) => t,
            Type::Boolean(t) => t,
            Type::SignedInteger(t) => t,
            Type::UnsignedInteger(t) => t,
            Type::Float(t) => t,
            Type::Complex(t) => t,
        }
    }
}

impl Typed for Type {
    fn base(&self) -> &Base {
        self.facet().base()
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.compare(Some(other))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.shape(), f)
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type::{}({})", variant_name(self), self.shape())
    }
}

fn variant_name(ty: &Type) -> &'static str {
    match ty {
        Type::Pointer(_) => "Pointer",
        Type::Struct(_) => "Struct",
        Type::Interface(_) => "Interface",
        Type::Function(_) => "Function",
        Type::Array(_) => "Array",
        Type::Slice(_) => "Slice",
        Type::Map(_) => "Map",
        Type::String(_) => "String",
        Type::Boolean(_) => "Boolean",
        Type::SignedInteger(_) => "SignedInteger",
        Type::UnsignedInteger(_) => "UnsignedInteger",
        Type::Float(_) => "Float",
        Type::Complex(_) => "Complex",
    }
}
