use reflector_core::{Dyn, Kind, native};

use crate::macros::facet;
use crate::{Base, ReflectError, Type};

/// A shared reference to another slot, `*T`.
#[derive(Clone)]
pub struct Pointer {
    pub(crate) base: Base,
}

facet!(Pointer => Pointer);

impl Pointer {
    /// The pointee type. Bound (and settable) when this pointer holds a
    /// non-nil value; a bare descriptor otherwise.
    pub fn elem(&self) -> Option<Type> {
        let Kind::Pointer { pointee } = &self.base.shape.kind else {
            return None;
        };
        let handle = self
            .base
            .handle
            .as_ref()
            .and_then(|h| native::deref(h).ok());
        Some(self.base.derive(pointee.clone(), handle))
    }

    /// Whether the bound pointer is nil.
    pub fn is_nil(&self) -> Result<bool, ReflectError> {
        let handle = self.base.bound()?;
        handle
            .read(Dyn::is_nil)
            .map_err(|e| self.base.native_err(e))
    }
}
