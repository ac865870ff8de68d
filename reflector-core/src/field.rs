use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::{AnyValue, ShapeRef};

/// Whether a field or method is visible outside its declaring module.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Visibility {
    /// Exported.
    Public,
    /// Only visible inside the declaring module.
    Private,
}

/// Describes a field in a struct
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct FieldDef {
    /// Field name
    pub name: String,

    /// Shape of the field's type
    pub shape: ShapeRef,

    /// Visibility of the field
    pub visibility: Visibility,
}

/// Parameter and result shapes of a function or method (receiver excluded).
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Signature {
    /// Parameter shapes, in order.
    pub params: Vec<ShapeRef>,
    /// Result shapes, in order.
    pub results: Vec<ShapeRef>,
    /// Whether the last parameter is variadic.
    pub variadic: bool,
}

impl Signature {
    /// A non-variadic signature.
    pub fn new(
        params: impl IntoIterator<Item = ShapeRef>,
        results: impl IntoIterator<Item = ShapeRef>,
    ) -> Self {
        Self {
            params: params.into_iter().collect(),
            results: results.into_iter().collect(),
            variadic: false,
        }
    }

    /// Marks the last parameter as variadic.
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

/// Body of a struct method: receives the receiver and the arguments, returns
/// the results.
pub type MethodFn = Rc<dyn Fn(&AnyValue, &[AnyValue]) -> Vec<AnyValue>>;

/// Describes one entry of a method table.
///
/// Struct methods carry a body; interface methods never do. The body takes no
/// part in equality or hashing.
#[derive(Clone)]
pub struct MethodDef {
    /// Method name
    pub name: String,

    /// Signature, receiver excluded
    pub signature: Signature,

    /// Visibility of the method
    pub visibility: Visibility,

    /// Implementation, for struct methods
    pub body: Option<MethodFn>,
}

impl MethodDef {
    /// Whether `self` and `other` describe the same method for the purpose
    /// of interface satisfaction.
    pub fn matches(&self, other: &MethodDef) -> bool {
        self.name == other.name && self.signature == other.signature
    }
}

impl PartialEq for MethodDef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.signature == other.signature
            && self.visibility == other.visibility
    }
}

impl Eq for MethodDef {}

impl Hash for MethodDef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.signature.hash(state);
        self.visibility.hash(state);
    }
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}
