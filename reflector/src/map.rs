use alloc::string::ToString;
use alloc::vec::Vec;

use reflector_core::{AnyValue, IntoAny, Kind, native};

use crate::macros::facet;
use crate::{Base, ReflectError, ReflectErrorKind, Type, debug, trace};

/// An associative container, `Map<K, V>`.
///
/// Reads return snapshots, never live views. Mutations go through the bound
/// handle and are visible to every type or value sharing it. Iteration order
/// is the map's native order and should not be relied on.
#[derive(Clone)]
pub struct Map {
    pub(crate) base: Base,
}

facet!(Map => Map);

impl Map {
    /// Key type, with this map as parent.
    pub fn key(&self) -> Option<Type> {
        match &self.base.shape.kind {
            Kind::Map { key, .. } => Some(self.base.derive(key.clone(), None)),
            _ => None,
        }
    }

    /// Value type, with this map as parent.
    pub fn elem(&self) -> Option<Type> {
        match &self.base.shape.kind {
            Kind::Map { value, .. } => Some(self.base.derive(value.clone(), None)),
            _ => None,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> Result<usize, ReflectError> {
        let handle = self.base.bound()?;
        native::map_len(handle).map_err(|e| self.base.native_err(e))
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> Result<bool, ReflectError> {
        Ok(self.len()? == 0)
    }

    /// Value stored under `key`. Fails with
    /// [`ReflectErrorKind::KeyNotFound`] when the key is absent.
    pub fn get(&self, key: impl IntoAny) -> Result<AnyValue, ReflectError> {
        let handle = self.base.bound()?;
        let key = key.into_any();
        let found =
            native::map_get(handle, key.clone()).map_err(|e| self.base.native_err(e))?;
        found.ok_or_else(|| {
            self.base.err(ReflectErrorKind::KeyNotFound {
                key: key.to_string(),
            })
        })
    }

    /// Whether `key` is present. Errors other than a missing key propagate.
    pub fn contains(&self, key: impl IntoAny) -> Result<bool, ReflectError> {
        match self.get(key) {
            Ok(_) => Ok(true),
            Err(ReflectError {
                kind: ReflectErrorKind::KeyNotFound { .. },
                ..
            }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Inserts or overwrites the entry for `key`.
    pub fn put(&self, key: impl IntoAny, value: impl IntoAny) -> Result<(), ReflectError> {
        let handle = self.base.settable()?;
        let (key, value) = (key.into_any(), value.into_any());
        trace!("put {} <- {}: {}", self.base.shape, key, value);
        native::map_set(handle, key, value).map_err(|e| {
            debug!("put into {} rejected: {}", self.base.shape, e);
            self.base.native_err(e)
        })
    }

    /// Removes the entry for `key`. Removing an absent key succeeds and
    /// changes nothing.
    pub fn delete(&self, key: impl IntoAny) -> Result<(), ReflectError> {
        let handle = self.base.settable()?;
        let key = key.into_any();
        trace!("delete {} key {}", self.base.shape, key);
        native::map_delete(handle, key).map_err(|e| self.base.native_err(e))
    }

    /// Removes every entry, deleting each key of a snapshot taken up front.
    pub fn clear(&self) -> Result<(), ReflectError> {
        self.base.settable()?;
        let keys = self.key_set()?;
        trace!("clear {} ({} keys)", self.base.shape, keys.len());
        for key in keys {
            self.delete(key)?;
        }
        Ok(())
    }

    /// Snapshot of the keys.
    pub fn key_set(&self) -> Result<Vec<AnyValue>, ReflectError> {
        let handle = self.base.bound()?;
        native::map_keys(handle).map_err(|e| self.base.native_err(e))
    }

    /// Snapshot of the values.
    pub fn value_set(&self) -> Result<Vec<AnyValue>, ReflectError> {
        Ok(self
            .entry_set()?
            .into_iter()
            .map(|entry| entry.value)
            .collect())
    }

    /// Snapshot of the entries.
    pub fn entry_set(&self) -> Result<Vec<Entry>, ReflectError> {
        let handle = self.base.bound()?;
        let entries = native::map_entries(handle).map_err(|e| self.base.native_err(e))?;
        Ok(entries
            .into_iter()
            .map(|(key, value)| Entry { key, value })
            .collect())
    }
}

/// A key/value pair copied out of a map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    key: AnyValue,
    value: AnyValue,
}

impl Entry {
    /// The key.
    pub fn key(&self) -> &AnyValue {
        &self.key
    }

    /// The value.
    pub fn value(&self) -> &AnyValue {
        &self.value
    }

    /// Splits the entry into its key and value.
    pub fn into_parts(self) -> (AnyValue, AnyValue) {
        (self.key, self.value)
    }
}
