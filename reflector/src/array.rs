use reflector_core::{AnyValue, Kind, native};

use crate::macros::facet;
use crate::{Base, ReflectError, Type};

/// A fixed-size sequence, `[T; N]`.
#[derive(Clone)]
pub struct Array {
    pub(crate) base: Base,
}

facet!(Array => Array);

impl Array {
    /// Element type, with this array as parent.
    pub fn elem(&self) -> Option<Type> {
        match &self.base.shape.kind {
            Kind::Array { elem, .. } => Some(self.base.derive(elem.clone(), None)),
            _ => None,
        }
    }

    /// Declared length. Known from the shape alone, so no value is needed.
    pub fn len(&self) -> usize {
        match self.base.shape.kind {
            Kind::Array { len, .. } => len,
            _ => 0,
        }
    }

    /// Whether the declared length is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of element `index`.
    pub fn index(&self, index: usize) -> Result<AnyValue, ReflectError> {
        let handle = self.base.bound()?;
        native::slice_index(handle, index).map_err(|e| self.base.native_err(e))
    }

    /// Element `index` as a bound type sharing the array's settability.
    pub fn elem_at(&self, index: usize) -> Result<Type, ReflectError> {
        let handle = self.base.bound()?;
        let child = native::slice_elem(handle, index).map_err(|e| self.base.native_err(e))?;
        Ok(self.base.derive(child.shape().clone(), Some(child)))
    }
}
