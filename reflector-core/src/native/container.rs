//! Map and sequence primitives.

use alloc::vec::Vec;

use indexmap::IndexMap;

use super::{assign, load};
use crate::{AnyValue, Dyn, Handle, Kind, NativeError, PathStep, ShapeRef};

fn map_shapes(handle: &Handle) -> Result<(&ShapeRef, &ShapeRef), NativeError> {
    match &handle.shape().kind {
        Kind::Map { key, value } => Ok((key, value)),
        _ => Err(NativeError::WrongKind {
            expected: "map",
            actual: handle.shape().clone(),
        }),
    }
}

fn sequence_elem(handle: &Handle) -> Result<&ShapeRef, NativeError> {
    match &handle.shape().kind {
        Kind::Slice { elem } | Kind::Array { elem, .. } => Ok(elem),
        _ => Err(NativeError::WrongKind {
            expected: "slice or array",
            actual: handle.shape().clone(),
        }),
    }
}

fn data_mismatch(expected: &'static str, actual: &Dyn) -> NativeError {
    NativeError::DataMismatch {
        expected,
        actual: actual.kind_str(),
    }
}

fn with_map<R>(
    handle: &Handle,
    f: impl FnOnce(&IndexMap<Dyn, Dyn>) -> R,
) -> Result<R, NativeError> {
    handle.read(|data| match data {
        Dyn::Map(map) => Ok(f(map)),
        other => Err(data_mismatch("map", other)),
    })?
}

fn with_map_mut<R>(
    handle: &Handle,
    f: impl FnOnce(&mut IndexMap<Dyn, Dyn>) -> R,
) -> Result<R, NativeError> {
    handle.write(|data| match data {
        Dyn::Map(map) => Ok(f(map)),
        other => Err(data_mismatch("map", other)),
    })?
}

fn with_items<R>(handle: &Handle, f: impl FnOnce(&[Dyn]) -> R) -> Result<R, NativeError> {
    handle.read(|data| match data {
        Dyn::Slice(items) | Dyn::Array(items) => Ok(f(items)),
        other => Err(data_mismatch("sequence", other)),
    })?
}

/// Number of entries in the map behind `handle`.
pub fn map_len(handle: &Handle) -> Result<usize, NativeError> {
    map_shapes(handle)?;
    with_map(handle, |map| map.len())
}

/// Looks `key` up. `Ok(None)` means the key is absent.
pub fn map_get(handle: &Handle, key: AnyValue) -> Result<Option<AnyValue>, NativeError> {
    let (key_shape, value_shape) = map_shapes(handle)?;
    let key = assign(key, key_shape)?;
    let found = with_map(handle, |map| map.get(&key).cloned())?;
    Ok(found.map(|data| load(value_shape, data)))
}

/// Inserts or overwrites an entry.
pub fn map_set(handle: &Handle, key: AnyValue, value: AnyValue) -> Result<(), NativeError> {
    let (key_shape, value_shape) = map_shapes(handle)?;
    let key = assign(key, key_shape)?;
    let value = assign(value, value_shape)?;
    with_map_mut(handle, |map| {
        map.insert(key, value);
    })
}

/// Removes `key` if present. Absent keys are not an error.
pub fn map_delete(handle: &Handle, key: AnyValue) -> Result<(), NativeError> {
    let (key_shape, _) = map_shapes(handle)?;
    let key = assign(key, key_shape)?;
    with_map_mut(handle, |map| {
        map.shift_remove(&key);
    })
}

/// Snapshot of the keys.
pub fn map_keys(handle: &Handle) -> Result<Vec<AnyValue>, NativeError> {
    let (key_shape, _) = map_shapes(handle)?;
    with_map(handle, |map| {
        map.keys().map(|k| load(key_shape, k.clone())).collect()
    })
}

/// Snapshot of the entries.
pub fn map_entries(handle: &Handle) -> Result<Vec<(AnyValue, AnyValue)>, NativeError> {
    let (key_shape, value_shape) = map_shapes(handle)?;
    with_map(handle, |map| {
        map.iter()
            .map(|(k, v)| (load(key_shape, k.clone()), load(value_shape, v.clone())))
            .collect()
    })
}

/// Length of the slice or array behind `handle`.
pub fn slice_len(handle: &Handle) -> Result<usize, NativeError> {
    sequence_elem(handle)?;
    with_items(handle, <[Dyn]>::len)
}

/// Element `index` of a slice or array.
pub fn slice_index(handle: &Handle, index: usize) -> Result<AnyValue, NativeError> {
    let elem = sequence_elem(handle)?;
    let data = with_items(handle, |items| {
        items
            .get(index)
            .cloned()
            .ok_or(NativeError::IndexOutOfBounds {
                index,
                len: items.len(),
            })
    })??;
    Ok(load(elem, data))
}

/// Handle to element `index`, sharing the parent's slot.
pub fn slice_elem(handle: &Handle, index: usize) -> Result<Handle, NativeError> {
    let elem = sequence_elem(handle)?.clone();
    let len = with_items(handle, <[Dyn]>::len)?;
    if index >= len {
        return Err(NativeError::IndexOutOfBounds { index, len });
    }
    Ok(handle.child(PathStep::Index(index), elem))
}

/// Overwrites element `index`.
pub fn slice_set(handle: &Handle, index: usize, value: AnyValue) -> Result<(), NativeError> {
    let elem = sequence_elem(handle)?;
    let value = assign(value, elem)?;
    handle.write(|data| match data {
        Dyn::Slice(items) | Dyn::Array(items) => {
            let len = items.len();
            match items.get_mut(index) {
                Some(item) => {
                    *item = value;
                    Ok(())
                }
                None => Err(NativeError::IndexOutOfBounds { index, len }),
            }
        }
        other => Err(data_mismatch("sequence", other)),
    })?
}

/// Appends `values` in order. Every value is checked before the slice is
/// touched, so a failed append leaves it unchanged.
pub fn slice_append(handle: &Handle, values: Vec<AnyValue>) -> Result<(), NativeError> {
    let elem = match &handle.shape().kind {
        Kind::Slice { elem } => elem,
        _ => {
            return Err(NativeError::WrongKind {
                expected: "slice",
                actual: handle.shape().clone(),
            });
        }
    };
    let values = values
        .into_iter()
        .map(|v| assign(v, elem))
        .collect::<Result<Vec<_>, _>>()?;
    handle.write(|data| match data {
        Dyn::Slice(items) => {
            items.extend(values);
            Ok(())
        }
        other => Err(data_mismatch("slice", other)),
    })?
}

/// Handle to field `index` of a struct, sharing the parent's slot.
pub fn struct_field(handle: &Handle, index: usize) -> Result<Handle, NativeError> {
    let field = match &handle.shape().kind {
        Kind::Struct(def) => def.fields.get(index).ok_or(NativeError::IndexOutOfBounds {
            index,
            len: def.fields.len(),
        })?,
        _ => {
            return Err(NativeError::WrongKind {
                expected: "struct",
                actual: handle.shape().clone(),
            });
        }
    };
    Ok(handle.child(PathStep::Field(index), field.shape.clone()))
}
