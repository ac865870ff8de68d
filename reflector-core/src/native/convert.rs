//! Representation conversion between shapes.

use alloc::string::String;
use alloc::vec::Vec;

use num_complex::Complex;

use super::{assign, is_assignable};
use crate::{AnyValue, Dyn, Kind, NativeError, Shape, ShapeRef};

fn is_numeric(kind: &Kind) -> bool {
    matches!(
        kind,
        Kind::Signed { .. } | Kind::Unsigned { .. } | Kind::Float { .. }
    )
}

fn is_integer(kind: &Kind) -> bool {
    matches!(kind, Kind::Signed { .. } | Kind::Unsigned { .. })
}

fn is_byte_slice(kind: &Kind) -> bool {
    matches!(kind, Kind::Slice { elem } if elem.kind == Kind::Unsigned { bits: 8 })
}

/// Whether values of shape `from` can be converted to shape `to`, judging by
/// the shapes alone.
///
/// Conversions are defined between assignable shapes, shapes with identical
/// structure, any two numeric shapes, any two complex shapes, from integers
/// to `String` (as a code point), between `String` and `Vec<u8>`, from
/// `Vec<T>` to `[T; N]` (length permitting, see [`can_convert_value`]), and
/// between pointers whose pointees have identical structure.
pub fn is_convertible(from: &Shape, to: &Shape) -> bool {
    if is_assignable(from, to) || from.kind == to.kind {
        return true;
    }
    match (&from.kind, &to.kind) {
        (a, b) if is_numeric(a) && is_numeric(b) => true,
        (Kind::Complex { .. }, Kind::Complex { .. }) => true,
        (a, Kind::String) if is_integer(a) => true,
        (Kind::String, b) if is_byte_slice(b) => true,
        (a, Kind::String) if is_byte_slice(a) => true,
        (Kind::Slice { elem: a }, Kind::Array { elem: b, .. }) => a == b,
        (Kind::Pointer { pointee: a }, Kind::Pointer { pointee: b }) => a.kind == b.kind,
        _ => false,
    }
}

/// Like [`is_convertible`], but also checks constraints that depend on the
/// value: a slice only converts to an array of its exact length.
pub fn can_convert_value(value: &AnyValue, to: &Shape) -> bool {
    if !is_convertible(&value.shape, to) {
        return false;
    }
    match (&value.shape.kind, &to.kind, &value.data) {
        (Kind::Slice { .. }, Kind::Array { len, .. }, Dyn::Slice(items)) => items.len() == *len,
        _ => true,
    }
}

fn wrap_signed(v: i64, bits: u8) -> i64 {
    if bits >= 64 {
        return v;
    }
    let shift = 64 - u32::from(bits);
    (v << shift) >> shift
}

fn wrap_unsigned(v: u64, bits: u8) -> u64 {
    if bits >= 64 {
        return v;
    }
    v & ((1u64 << bits) - 1)
}

fn round_float(v: f64, bits: u8) -> f64 {
    if bits == 32 { v as f32 as f64 } else { v }
}

fn convert_number(data: &Dyn, to: &Kind) -> Option<Dyn> {
    match *to {
        Kind::Signed { bits } => {
            let v = match *data {
                Dyn::Int(i) => i,
                Dyn::Uint(u) => u as i64,
                Dyn::Float(f) => f as i64,
                _ => return None,
            };
            Some(Dyn::Int(wrap_signed(v, bits)))
        }
        Kind::Unsigned { bits } => {
            let v = match *data {
                Dyn::Int(i) => i as u64,
                Dyn::Uint(u) => u,
                Dyn::Float(f) => f as u64,
                _ => return None,
            };
            Some(Dyn::Uint(wrap_unsigned(v, bits)))
        }
        Kind::Float { bits } => {
            let v = match *data {
                Dyn::Int(i) => i as f64,
                Dyn::Uint(u) => u as f64,
                Dyn::Float(f) => f,
                _ => return None,
            };
            Some(Dyn::Float(round_float(v, bits)))
        }
        Kind::Complex { bits } => match *data {
            Dyn::Complex(c) => Some(Dyn::Complex(Complex::new(
                round_float(c.re, bits),
                round_float(c.im, bits),
            ))),
            _ => None,
        },
        _ => None,
    }
}

fn code_point(data: &Dyn) -> Option<String> {
    let cp = match *data {
        Dyn::Int(i) => u32::try_from(i).ok(),
        Dyn::Uint(u) => u32::try_from(u).ok(),
        _ => return None,
    };
    let c = cp.and_then(char::from_u32).unwrap_or(char::REPLACEMENT_CHARACTER);
    Some(String::from(c))
}

/// Converts `value` to shape `to`, producing a new value. The source is
/// never modified.
pub fn convert(value: &AnyValue, to: &ShapeRef) -> Result<AnyValue, NativeError> {
    let not_convertible = || NativeError::NotConvertible {
        from: value.shape.clone(),
        to: to.clone(),
    };

    if !can_convert_value(value, to) {
        return Err(not_convertible());
    }

    if is_assignable(&value.shape, to) {
        let data = assign(value.clone(), to)?;
        return Ok(AnyValue::new(to.clone(), data));
    }

    let from = &value.shape.kind;
    let data = match (from, &to.kind) {
        (a, b) if is_numeric(a) && is_numeric(b) => convert_number(&value.data, b),
        (Kind::Complex { .. }, b @ Kind::Complex { .. }) => convert_number(&value.data, b),
        (a, Kind::String) if is_integer(a) => code_point(&value.data).map(Dyn::String),
        (Kind::String, b) if is_byte_slice(b) => value
            .data
            .as_str()
            .map(|s| Dyn::Slice(s.bytes().map(|b| Dyn::Uint(u64::from(b))).collect())),
        (a, Kind::String) if is_byte_slice(a) => match &value.data {
            Dyn::Slice(items) => {
                let bytes: Option<Vec<u8>> = items
                    .iter()
                    .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
                    .collect();
                bytes.map(|b| Dyn::String(String::from_utf8_lossy(&b).into_owned()))
            }
            _ => None,
        },
        (Kind::Slice { .. }, Kind::Array { .. }) => match &value.data {
            Dyn::Slice(items) => Some(Dyn::Array(items.clone())),
            _ => None,
        },
        // identical structure, pointers to identical structure
        _ => Some(value.data.clone()),
    };

    data.map(|data| AnyValue::new(to.clone(), data))
        .ok_or_else(not_convertible)
}
