use alloc::vec::Vec;

use reflector_core::{AnyValue, IntoAny, Kind, native};

use crate::macros::facet;
use crate::{Base, ReflectError, Type, debug, trace};

/// A growable sequence, `Vec<T>`.
#[derive(Clone)]
pub struct Slice {
    pub(crate) base: Base,
}

facet!(Slice => Slice);

impl Slice {
    /// Element type, with this slice as parent.
    pub fn elem(&self) -> Option<Type> {
        match &self.base.shape.kind {
            Kind::Slice { elem } => Some(self.base.derive(elem.clone(), None)),
            _ => None,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> Result<usize, ReflectError> {
        let handle = self.base.bound()?;
        native::slice_len(handle).map_err(|e| self.base.native_err(e))
    }

    /// Whether the slice has no elements.
    pub fn is_empty(&self) -> Result<bool, ReflectError> {
        Ok(self.len()? == 0)
    }

    /// Snapshot of element `index`. Out-of-range indices are reported by the
    /// runtime as `IndexOutOfBounds`.
    pub fn index(&self, index: usize) -> Result<AnyValue, ReflectError> {
        let handle = self.base.bound()?;
        native::slice_index(handle, index).map_err(|e| self.base.native_err(e))
    }

    /// Element `index` as a bound type sharing the slice's settability.
    pub fn elem_at(&self, index: usize) -> Result<Type, ReflectError> {
        let handle = self.base.bound()?;
        let child = native::slice_elem(handle, index).map_err(|e| self.base.native_err(e))?;
        Ok(self.base.derive(child.shape().clone(), Some(child)))
    }

    /// Overwrites element `index`.
    pub fn set(&self, index: usize, value: impl IntoAny) -> Result<(), ReflectError> {
        let handle = self.base.settable()?;
        let value = value.into_any();
        trace!("set {}[{}] <- {}", self.base.shape, index, value);
        native::slice_set(handle, index, value).map_err(|e| self.base.native_err(e))
    }

    /// Appends `values` in order.
    ///
    /// Every value is checked against the element type before anything is
    /// written, so a failed append leaves the slice as it was.
    pub fn append<I>(&self, values: I) -> Result<(), ReflectError>
    where
        I: IntoIterator,
        I::Item: IntoAny,
    {
        let handle = self.base.settable()?;
        let values: Vec<AnyValue> = values.into_iter().map(IntoAny::into_any).collect();
        trace!("append {} value(s) to {}", values.len(), self.base.shape);
        native::slice_append(handle, values).map_err(|e| {
            debug!("append to {} rejected: {}", self.base.shape, e);
            self.base.native_err(e)
        })
    }
}
