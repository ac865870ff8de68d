use alloc::vec::Vec;

use reflector_core::native;

use crate::macros::facet;
use crate::{Base, Method, Type};

/// A method set.
///
/// Interfaces are never instantiable: there is no zero value to hand out
/// that would satisfy them.
#[derive(Clone)]
pub struct Interface {
    pub(crate) base: Base,
}

facet!(Interface => Interface);

impl Interface {
    /// Always `None`: an interface has no single element type.
    pub fn elem(&self) -> Option<Type> {
        None
    }

    /// Declared methods, sorted by name. The order is the same on every call.
    pub fn methods(&self) -> Vec<Method> {
        let shape = &self.base.shape;
        native::methods(shape)
            .into_iter()
            .map(|def| Method::new(def, shape))
            .collect()
    }

    /// Number of declared methods.
    pub fn num_method(&self) -> usize {
        native::methods(&self.base.shape).len()
    }
}
