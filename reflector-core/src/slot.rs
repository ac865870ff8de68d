use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::marker::PhantomData;

use crate::{AnyValue, Dyn, NativeError, Reflect, ShapeRef, native};

/// Addressable storage for one value.
///
/// Slots are shared, not owned: cloning a slot yields another reference to
/// the same storage, and a write through any of them is visible through all
/// of them. The slot belongs to the caller's value graph; handles only
/// borrow it for the duration of each operation.
#[derive(Clone)]
pub struct Slot(Rc<RefCell<Dyn>>);

impl Slot {
    /// Allocates a slot holding `data`.
    pub fn new(data: Dyn) -> Self {
        Self(Rc::new(RefCell::new(data)))
    }

    /// Snapshot of the stored data.
    pub fn get(&self) -> Dyn {
        self.0.borrow().clone()
    }

    /// Replaces the stored data, returning the old one.
    pub fn replace(&self, data: Dyn) -> Dyn {
        self.0.replace(data)
    }

    /// Runs `f` with shared access to the stored data.
    pub fn with<R>(&self, f: impl FnOnce(&Dyn) -> R) -> R {
        f(&self.0.borrow())
    }

    /// Runs `f` with exclusive access to the stored data.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Dyn) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    /// Whether both slots are the same storage.
    pub fn ptr_eq(&self, other: &Slot) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({:#x})", self.addr())
    }
}

/// A single step from a value into one of its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Navigate to a struct field by index
    Field(usize),
    /// Navigate to an array or slice element by index
    Index(usize),
}

fn step_into(data: &Dyn, step: PathStep) -> Option<&Dyn> {
    match (data, step) {
        (Dyn::Struct(fields), PathStep::Field(i)) => fields.get(i),
        (Dyn::Array(items) | Dyn::Slice(items), PathStep::Index(i)) => items.get(i),
        _ => None,
    }
}

fn step_into_mut(data: &mut Dyn, step: PathStep) -> Option<&mut Dyn> {
    match (data, step) {
        (Dyn::Struct(fields), PathStep::Field(i)) => fields.get_mut(i),
        (Dyn::Array(items) | Dyn::Slice(items), PathStep::Index(i)) => items.get_mut(i),
        _ => None,
    }
}

/// Native value handle: a shape, the slot holding the value, and the path
/// from the slot's root to the value.
///
/// A handle is settable when it was derived from an addressable reference
/// ([`Handle::addressable`], [`Var::handle`]); handles made from plain values
/// hold a private copy and are read-only.
#[derive(Clone)]
pub struct Handle {
    shape: ShapeRef,
    slot: Slot,
    path: Vec<PathStep>,
    settable: bool,
}

impl Handle {
    /// Read-only handle over a private copy of `data`.
    pub fn new(shape: ShapeRef, data: Dyn) -> Self {
        Self::from_slot(shape, Slot::new(data), false)
    }

    /// Settable handle over a fresh slot holding `data`.
    pub fn addressable(shape: ShapeRef, data: Dyn) -> Self {
        Self::from_slot(shape, Slot::new(data), true)
    }

    /// Handle over an existing slot.
    pub fn from_slot(shape: ShapeRef, slot: Slot, settable: bool) -> Self {
        Self {
            shape,
            slot,
            path: Vec::new(),
            settable,
        }
    }

    /// Shape of the value behind the handle.
    pub fn shape(&self) -> &ShapeRef {
        &self.shape
    }

    /// Whether writes through this handle are allowed.
    pub fn can_set(&self) -> bool {
        self.settable
    }

    /// The underlying slot.
    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    /// Path from the slot's root to the value.
    pub fn path(&self) -> &[PathStep] {
        &self.path
    }

    /// Handle to a part of this value. Settability is inherited.
    pub fn child(&self, step: PathStep, shape: ShapeRef) -> Handle {
        let mut path = self.path.clone();
        path.push(step);
        Handle {
            shape,
            slot: self.slot.clone(),
            path,
            settable: self.settable,
        }
    }

    /// Same value, read-only.
    pub fn read_only(&self) -> Handle {
        Handle {
            settable: false,
            ..self.clone()
        }
    }

    /// Runs `f` on the value behind the handle.
    pub fn read<R>(&self, f: impl FnOnce(&Dyn) -> R) -> Result<R, NativeError> {
        self.slot.with(|root| {
            let mut cur = root;
            for step in &self.path {
                cur = step_into(cur, *step).ok_or(NativeError::InvalidPath { step: *step })?;
            }
            Ok(f(cur))
        })
    }

    /// Runs `f` with mutable access to the value behind the handle.
    ///
    /// Settability is not checked here; that is the caller's policy.
    pub fn write<R>(&self, f: impl FnOnce(&mut Dyn) -> R) -> Result<R, NativeError> {
        self.slot.with_mut(|root| {
            let mut cur = root;
            for step in &self.path {
                cur = step_into_mut(cur, *step).ok_or(NativeError::InvalidPath { step: *step })?;
            }
            Ok(f(cur))
        })
    }

    /// Snapshot of the value as an [`AnyValue`].
    pub fn load(&self) -> Result<AnyValue, NativeError> {
        let data = self.read(Dyn::clone)?;
        Ok(native::load(&self.shape, data))
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("shape", &self.shape)
            .field("slot", &self.slot)
            .field("path", &self.path)
            .field("settable", &self.settable)
            .finish()
    }
}

/// A typed, addressable variable.
///
/// This is how a caller hands a value "by reference" to the runtime: handles
/// made from a `Var` are settable, and [`Var::read`] observes every write
/// made through them.
pub struct Var<T> {
    slot: Slot,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Reflect> Var<T> {
    /// Stores `value` in a new slot.
    pub fn new(value: T) -> Self {
        Self {
            slot: Slot::new(value.into_dyn()),
            _marker: PhantomData,
        }
    }

    /// Settable handle to the variable.
    pub fn handle(&self) -> Handle {
        Handle::from_slot(T::shape(), self.slot.clone(), true)
    }

    /// Current value, or `None` if the stored data no longer decodes as `T`.
    pub fn read(&self) -> Option<T> {
        self.slot.with(T::from_dyn)
    }

    /// The underlying slot.
    pub fn slot(&self) -> &Slot {
        &self.slot
    }
}

impl<T> Clone for Var<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
            _marker: PhantomData,
        }
    }
}
