use alloc::rc::Rc;
use alloc::string::String;

use reflector_core::{FieldDef, MethodDef, Shape, ShapeRef, Signature, Visibility};

use crate::Type;

/// One declared field of a struct.
///
/// Produced fresh by every call to [`crate::Struct::fields`].
#[derive(Clone, Debug)]
pub struct Field {
    name: String,
    index: usize,
    package_path: String,
    exported: bool,
    shape: ShapeRef,
    parent: Rc<Type>,
}

impl Field {
    pub(crate) fn new(def: &FieldDef, index: usize, owner: &Shape, parent: Rc<Type>) -> Self {
        let exported = def.visibility == Visibility::Public;
        Self {
            name: def.name.clone(),
            index,
            package_path: package_path(exported, owner),
            exported,
            shape: def.shape.clone(),
            parent,
        }
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position in declaration order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Module path qualifying an unexported field's name; empty for exported
    /// fields.
    pub fn package_path(&self) -> &str {
        &self.package_path
    }

    /// Whether the field is visible outside its declaring module.
    pub fn is_exported(&self) -> bool {
        self.exported
    }

    /// Shape of the field's type.
    pub fn shape(&self) -> &ShapeRef {
        &self.shape
    }

    /// The field's type as a bare descriptor, with the struct as parent.
    pub fn ty(&self) -> Type {
        Type::from_parts(self.shape.clone(), None, Some(self.parent.clone()))
    }
}

/// One method of an interface's method set.
#[derive(Clone, Debug)]
pub struct Method {
    name: String,
    package_path: String,
    exported: bool,
    signature: Signature,
}

impl Method {
    pub(crate) fn new(def: &MethodDef, owner: &Shape) -> Self {
        let exported = def.visibility == Visibility::Public;
        Self {
            name: def.name.clone(),
            package_path: package_path(exported, owner),
            exported,
            signature: def.signature.clone(),
        }
    }

    /// Method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module path qualifying an unexported method's name; empty for exported
    /// methods.
    pub fn package_path(&self) -> &str {
        &self.package_path
    }

    /// Whether the method is visible outside its declaring module.
    pub fn is_exported(&self) -> bool {
        self.exported
    }

    /// Parameter and result shapes.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The method's function type, unbound.
    pub fn ty(&self) -> Type {
        Type::from_shape(Shape::function(self.signature.clone()))
    }
}

fn package_path(exported: bool, owner: &Shape) -> String {
    if exported {
        String::new()
    } else {
        owner.module_path.clone()
    }
}
