use alloc::vec::Vec;

use reflector_core::{Dyn, Func, Handle, Kind, NativeError, Shape, StructDef, native};

use crate::macros::facet;
use crate::{Base, Field, Function, Interface, ReflectError, Type, Typed};

/// A record with named fields and a method table.
#[derive(Clone)]
pub struct Struct {
    pub(crate) base: Base,
}

facet!(Struct => Struct);

impl Struct {
    fn def(&self) -> Option<&StructDef> {
        match &self.base.shape.kind {
            Kind::Struct(def) => Some(def),
            _ => None,
        }
    }

    /// One entry per declared field, in declaration order.
    pub fn fields(&self) -> Vec<Field> {
        let shape = &self.base.shape;
        let parent = self.base.as_parent();
        native::fields(shape)
            .iter()
            .enumerate()
            .map(|(i, def)| Field::new(def, i, shape, parent.clone()))
            .collect()
    }

    /// Number of declared fields.
    pub fn num_field(&self) -> usize {
        native::fields(&self.base.shape).len()
    }

    /// Type of field `index`. When a value is bound, the result is bound to
    /// that field and shares the struct's settability.
    pub fn field(&self, index: usize) -> Result<Type, ReflectError> {
        match &self.base.handle {
            Some(handle) => {
                let child =
                    native::struct_field(handle, index).map_err(|e| self.base.native_err(e))?;
                Ok(self.base.derive(child.shape().clone(), Some(child)))
            }
            None => {
                let fields = native::fields(&self.base.shape);
                let def = fields.get(index).ok_or_else(|| {
                    self.base.native_err(NativeError::IndexOutOfBounds {
                        index,
                        len: fields.len(),
                    })
                })?;
                Ok(self.base.derive(def.shape.clone(), None))
            }
        }
    }

    /// Type of the field called `name`, like [`Struct::field`].
    pub fn field_by_name(&self, name: &str) -> Option<Type> {
        let index = self.def()?.field_index(name)?;
        self.field(index).ok()
    }

    /// Exported methods from the method table, sorted by name.
    ///
    /// When the struct has a value, each function is bound to a snapshot of
    /// it taken at call time, so it can be invoked directly. A receiver that
    /// no longer exists makes the call fail.
    pub fn methods(&self) -> Vec<Function> {
        let parent = self.base.as_parent();
        native::methods(&self.base.shape)
            .into_iter()
            .map(|def| {
                let shape = Shape::function(def.signature.clone());
                let handle = match (&self.base.handle, &def.body) {
                    (Some(receiver), Some(body)) => {
                        let receiver = receiver.clone();
                        let body = body.clone();
                        let func = Func::fallible(move |args| {
                            let recv = receiver.load()?;
                            Ok(body(&recv, args))
                        });
                        Some(Handle::new(shape.clone(), Dyn::Function(func)))
                    }
                    _ => None,
                };
                Function {
                    base: Base {
                        shape,
                        handle,
                        parent: Some(parent.clone()),
                    },
                    method: Some(def.name.clone()),
                }
            })
            .collect()
    }

    /// Number of exported methods.
    pub fn num_method(&self) -> usize {
        native::methods(&self.base.shape).len()
    }

    /// Whether this struct's method set satisfies `iface`.
    pub fn implements(&self, iface: &Interface) -> bool {
        native::implements(&self.base.shape, iface.shape())
    }
}
