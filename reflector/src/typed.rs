use alloc::rc::Rc;
use alloc::string::String;

use reflector_core::{AnyValue, Dyn, Handle, IntoAny, Kind, NativeError, ShapeRef, native};

use crate::{ReflectError, ReflectErrorKind, Type, Value, debug, trace};

/// State shared by every facet: the native descriptor, the bound value
/// handle if any, and the type this one was derived from.
#[doc(hidden)]
#[derive(Clone)]
pub struct Base {
    pub(crate) shape: ShapeRef,
    pub(crate) handle: Option<Handle>,
    pub(crate) parent: Option<Rc<Type>>,
}

impl Base {
    pub(crate) fn err(&self, kind: ReflectErrorKind) -> ReflectError {
        ReflectError::new(self.shape.clone(), kind)
    }

    pub(crate) fn native_err(&self, err: NativeError) -> ReflectError {
        ReflectError::native(self.shape.clone(), err)
    }

    /// The bound handle, or `NoValueBound`.
    pub(crate) fn bound(&self) -> Result<&Handle, ReflectError> {
        self.handle
            .as_ref()
            .ok_or_else(|| self.err(ReflectErrorKind::NoValueBound))
    }

    /// The bound handle if it may be written through. Checks binding first,
    /// then settability.
    pub(crate) fn settable(&self) -> Result<&Handle, ReflectError> {
        let handle = self.bound()?;
        if !handle.can_set() {
            debug!("refusing write through read-only handle to {}", self.shape);
            return Err(self.err(ReflectErrorKind::NotSettable));
        }
        Ok(handle)
    }

    /// This facet again, as the parent of a derived type.
    pub(crate) fn as_parent(&self) -> Rc<Type> {
        Rc::new(Type::from_parts(
            self.shape.clone(),
            self.handle.clone(),
            self.parent.clone(),
        ))
    }

    /// A type derived from this one (an element, key, field...).
    pub(crate) fn derive(&self, shape: ShapeRef, handle: Option<Handle>) -> Type {
        Type::from_parts(shape, handle, Some(self.as_parent()))
    }

    /// The bound value in its stored form (interfaces not unwrapped).
    pub(crate) fn raw(&self) -> Result<AnyValue, ReflectError> {
        let handle = self.bound()?;
        let data = handle.read(Dyn::clone).map_err(|e| self.native_err(e))?;
        Ok(AnyValue::new(self.shape.clone(), data))
    }
}

/// The contract every type facet fulfils.
///
/// A `Typed` value is a native descriptor, optionally bound to a value.
/// Structural queries (`name`, `package_path`, `compare`...) work either way;
/// value queries fail with [`ReflectErrorKind::NoValueBound`] on a bare
/// descriptor.
pub trait Typed {
    #[doc(hidden)]
    fn base(&self) -> &Base;

    /// Native descriptor.
    fn shape(&self) -> &ShapeRef {
        &self.base().shape
    }

    /// Native value handle, if a value is bound.
    fn handle(&self) -> Option<&Handle> {
        self.base().handle.as_ref()
    }

    /// The type this one was derived from (a map for its key type, a struct
    /// for its field types...). Root types have no parent.
    fn parent(&self) -> Option<&Type> {
        self.base().parent.as_deref()
    }

    /// Display name. Unnamed interfaces are called `any`; other unnamed
    /// shapes get a canonical structural name such as `Map<String, i64>`.
    fn name(&self) -> String {
        self.shape().name()
    }

    /// Last segment of the declaring module's path; empty for built-in and
    /// unnamed types.
    fn package_name(&self) -> &str {
        self.shape().module_name()
    }

    /// Full path of the declaring module; empty for built-in and unnamed
    /// types.
    fn package_path(&self) -> &str {
        &self.shape().module_path
    }

    /// Whether a value is bound and may be written through this type.
    fn can_set(&self) -> bool {
        self.handle().is_some_and(Handle::can_set)
    }

    /// Whether a value is bound at all.
    fn has_value(&self) -> bool {
        self.handle().is_some()
    }

    /// Snapshot of the bound value.
    fn value(&self) -> Result<AnyValue, ReflectError> {
        let base = self.base();
        base.bound()?.load().map_err(|e| base.native_err(e))
    }

    /// Replaces the bound value in place. Every type or [`Value`] sharing the
    /// same slot observes the change.
    fn set_value(&self, value: impl IntoAny) -> Result<(), ReflectError>
    where
        Self: Sized,
    {
        let base = self.base();
        let handle = base.settable()?;
        let value = value.into_any();
        trace!("set {} <- {}", base.shape, value);
        native::set(handle, value).map_err(|e| base.native_err(e))
    }

    /// Descriptor equality. Comparing against `None` is always `false`.
    fn compare(&self, other: Option<&Type>) -> bool {
        other.is_some_and(|other| self.shape() == other.shape())
    }

    /// Whether [`Typed::instantiate`] can succeed. False for interfaces and
    /// functions.
    fn is_instantiable(&self) -> bool {
        !matches!(self.shape().kind, Kind::Interface(_) | Kind::Function(_))
    }

    /// A fresh, addressable zero value of this type, independent of any bound
    /// value.
    fn instantiate(&self) -> Result<Value, ReflectError> {
        let base = self.base();
        if !self.is_instantiable() {
            return Err(base.err(ReflectErrorKind::NotInstantiable));
        }
        trace!("instantiate {}", base.shape);
        Ok(Value::from_handle(native::zero_value(&base.shape)))
    }

    /// Whether the value (or, on a bare descriptor, this type) converts to
    /// `target`. Never fails; `None` yields `false`.
    fn can_convert(&self, target: Option<&Type>) -> bool {
        let Some(target) = target else {
            return false;
        };
        match self.base().raw() {
            Ok(value) => native::can_convert_value(&value, target.shape()),
            Err(_) => native::is_convertible(self.shape(), target.shape()),
        }
    }

    /// Converts the bound value to `target`, returning a new value. The
    /// bound value is left untouched.
    fn convert(&self, target: Option<&Type>) -> Result<Value, ReflectError> {
        let base = self.base();
        let Some(target) = target else {
            return Err(base.err(ReflectErrorKind::NotConvertible { target: None }));
        };
        let value = base.raw()?;
        if !native::can_convert_value(&value, target.shape()) {
            debug!("{} does not convert to {}", base.shape, target.shape());
            return Err(base.err(ReflectErrorKind::NotConvertible {
                target: Some(target.shape().clone()),
            }));
        }
        trace!("convert {} -> {}", base.shape, target.shape());
        let converted =
            native::convert(&value, target.shape()).map_err(|e| base.native_err(e))?;
        Ok(Value::from_handle(Handle::addressable(
            converted.shape,
            converted.data,
        )))
    }
}
