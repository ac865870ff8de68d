use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{FieldDef, MethodDef, Signature, Visibility};

mod builder;
pub use builder::*;

mod fmt;

/// Shared handle to a [`Shape`].
///
/// Shapes are immutable once built, so every [`crate::Handle`], facet and
/// child descriptor points at the same allocation.
pub type ShapeRef = Rc<Shape>;

/// The native descriptor of a type: its declared name, owning module and
/// structural kind.
///
/// Equality and hashing are structural. Two shapes compare equal when they
/// carry the same name, module path and kind, which is what descriptor
/// identity means for this runtime.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Declared name, `None` for unnamed composites (`Vec<T>`, `Map<K, V>`...)
    /// and for built-in scalars, whose name is derived from [`Kind`].
    pub type_identifier: Option<String>,

    /// Path of the module that declares the type, e.g. `example.com/geo`.
    /// Empty for built-in and unnamed types.
    pub module_path: String,

    /// Structural kind.
    pub kind: Kind,
}

/// The structural category of a [`Shape`].
///
/// The set is closed: every value the runtime can hold maps to exactly one
/// of these.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    /// `bool`
    Bool,
    /// Two's complement signed integer of the given width.
    Signed {
        /// Width in bits (8, 16, 32 or 64).
        bits: u8,
    },
    /// Unsigned integer of the given width.
    Unsigned {
        /// Width in bits (8, 16, 32 or 64).
        bits: u8,
    },
    /// IEEE 754 float.
    Float {
        /// Width in bits (32 or 64).
        bits: u8,
    },
    /// Complex number, cartesian form.
    Complex {
        /// Width of each component in bits (32 or 64).
        bits: u8,
    },
    /// UTF-8 string.
    String,
    /// Fixed-size homogeneous sequence.
    Array {
        /// Element shape.
        elem: ShapeRef,
        /// Number of elements.
        len: usize,
    },
    /// Growable homogeneous sequence.
    Slice {
        /// Element shape.
        elem: ShapeRef,
    },
    /// Associative container.
    Map {
        /// Key shape.
        key: ShapeRef,
        /// Value shape.
        value: ShapeRef,
    },
    /// Shared reference to another slot.
    Pointer {
        /// Shape of the value pointed to.
        pointee: ShapeRef,
    },
    /// Record with named fields and a method table.
    Struct(StructDef),
    /// Method set that other shapes may implement.
    Interface(InterfaceDef),
    /// Callable with a fixed signature.
    Function(Signature),
}

impl Kind {
    /// Returns the kind as a lowercase string, for error messages.
    pub const fn kind_str(&self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Signed { .. } => "signed integer",
            Kind::Unsigned { .. } => "unsigned integer",
            Kind::Float { .. } => "float",
            Kind::Complex { .. } => "complex",
            Kind::String => "string",
            Kind::Array { .. } => "array",
            Kind::Slice { .. } => "slice",
            Kind::Map { .. } => "map",
            Kind::Pointer { .. } => "pointer",
            Kind::Struct(_) => "struct",
            Kind::Interface(_) => "interface",
            Kind::Function(_) => "function",
        }
    }
}

/// Layout of a struct: its fields in declaration order and its method table.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct StructDef {
    /// Fields, in declaration order.
    pub fields: Vec<FieldDef>,
    /// Methods, sorted by name.
    pub methods: Vec<MethodDef>,
}

impl StructDef {
    /// Index of the field called `name`, if any.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Methods visible from outside the declaring module.
    pub fn exported_methods(&self) -> impl Iterator<Item = &MethodDef> {
        self.methods
            .iter()
            .filter(|m| m.visibility == Visibility::Public)
    }
}

/// Method set of an interface, sorted by name.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct InterfaceDef {
    /// Declared methods. Interface methods never carry a body.
    pub methods: Vec<MethodDef>,
}

impl Shape {
    fn unnamed(kind: Kind) -> ShapeRef {
        Rc::new(Shape {
            type_identifier: None,
            module_path: String::new(),
            kind,
        })
    }

    /// `bool`
    pub fn bool() -> ShapeRef {
        Self::unnamed(Kind::Bool)
    }

    /// Signed integer of `bits` width.
    pub fn signed(bits: u8) -> ShapeRef {
        Self::unnamed(Kind::Signed { bits })
    }

    /// Unsigned integer of `bits` width.
    pub fn unsigned(bits: u8) -> ShapeRef {
        Self::unnamed(Kind::Unsigned { bits })
    }

    /// `i64`
    pub fn i64() -> ShapeRef {
        Self::signed(64)
    }

    /// `u64`
    pub fn u64() -> ShapeRef {
        Self::unsigned(64)
    }

    /// Float of `bits` width.
    pub fn float(bits: u8) -> ShapeRef {
        Self::unnamed(Kind::Float { bits })
    }

    /// `f64`
    pub fn f64() -> ShapeRef {
        Self::float(64)
    }

    /// Complex number with components of `bits` width.
    pub fn complex(bits: u8) -> ShapeRef {
        Self::unnamed(Kind::Complex { bits })
    }

    /// `String`
    pub fn string() -> ShapeRef {
        Self::unnamed(Kind::String)
    }

    /// `[elem; len]`
    pub fn array(elem: ShapeRef, len: usize) -> ShapeRef {
        Self::unnamed(Kind::Array { elem, len })
    }

    /// `Vec<elem>`
    pub fn slice(elem: ShapeRef) -> ShapeRef {
        Self::unnamed(Kind::Slice { elem })
    }

    /// `Map<key, value>`
    pub fn map(key: ShapeRef, value: ShapeRef) -> ShapeRef {
        Self::unnamed(Kind::Map { key, value })
    }

    /// `*pointee`
    pub fn pointer(pointee: ShapeRef) -> ShapeRef {
        Self::unnamed(Kind::Pointer { pointee })
    }

    /// Unnamed function shape.
    pub fn function(signature: Signature) -> ShapeRef {
        Self::unnamed(Kind::Function(signature))
    }

    /// The empty interface, which every shape implements.
    pub fn any() -> ShapeRef {
        Self::unnamed(Kind::Interface(InterfaceDef::default()))
    }

    /// Last segment of the module path: `geo` for `example.com/geo`.
    pub fn module_name(&self) -> &str {
        match self.module_path.rfind('/') {
            Some(idx) => &self.module_path[idx + 1..],
            None => &self.module_path,
        }
    }

    /// Whether the shape was declared with a name.
    pub fn is_named(&self) -> bool {
        self.type_identifier.is_some()
    }

    /// Methods that participate in interface satisfaction: the full method
    /// set for interfaces, the method table for structs, and the pointee's
    /// method table for pointers to structs.
    pub fn method_set(&self) -> &[MethodDef] {
        match &self.kind {
            Kind::Struct(def) => &def.methods,
            Kind::Interface(def) => &def.methods,
            Kind::Pointer { pointee } => match &pointee.kind {
                Kind::Struct(def) => &def.methods,
                _ => &[],
            },
            _ => &[],
        }
    }

    /// Fields for structs, empty otherwise.
    pub fn fields(&self) -> &[FieldDef] {
        match &self.kind {
            Kind::Struct(def) => &def.fields,
            _ => &[],
        }
    }
}
