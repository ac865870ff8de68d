use alloc::string::String;
use alloc::vec::Vec;

use reflector_core::{AnyValue, IntoAny, Kind, Signature, native};

use crate::macros::facet;
use crate::{Base, ReflectError, Type, trace};

/// A callable.
///
/// Functions obtained from [`crate::Struct::methods`] carry the method name
/// and, when the struct had a value, are bound to that receiver.
#[derive(Clone)]
pub struct Function {
    pub(crate) base: Base,
    pub(crate) method: Option<String>,
}

facet!(Function => Function);

impl Function {
    fn sig(&self) -> Option<&Signature> {
        match &self.base.shape.kind {
            Kind::Function(sig) => Some(sig),
            _ => None,
        }
    }

    /// Name of the method this function was enumerated as, if any.
    pub fn method_name(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// Parameter types, in order.
    pub fn params(&self) -> Vec<Type> {
        self.sig()
            .map(|sig| {
                sig.params
                    .iter()
                    .map(|p| self.base.derive(p.clone(), None))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Result types, in order.
    pub fn results(&self) -> Vec<Type> {
        self.sig()
            .map(|sig| {
                sig.results
                    .iter()
                    .map(|r| self.base.derive(r.clone(), None))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of parameters.
    pub fn num_in(&self) -> usize {
        self.sig().map_or(0, |sig| sig.params.len())
    }

    /// Number of results.
    pub fn num_out(&self) -> usize {
        self.sig().map_or(0, |sig| sig.results.len())
    }

    /// Whether the last parameter is variadic.
    pub fn is_variadic(&self) -> bool {
        self.sig().is_some_and(|sig| sig.variadic)
    }

    /// Calls the bound function. Arity and argument assignability are checked
    /// against the signature before the body runs.
    pub fn call<I>(&self, args: I) -> Result<Vec<AnyValue>, ReflectError>
    where
        I: IntoIterator,
        I::Item: IntoAny,
    {
        let func = self.base.raw()?;
        let args: Vec<AnyValue> = args.into_iter().map(IntoAny::into_any).collect();
        trace!(
            "call {} with {} argument(s)",
            self.method.as_deref().unwrap_or("<fn>"),
            args.len()
        );
        native::call(&func, args).map_err(|e| self.base.native_err(e))
    }
}
