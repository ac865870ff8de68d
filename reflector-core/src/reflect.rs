use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::hash::Hash;
use std::collections::HashMap;

use indexmap::IndexMap;
use num_complex::Complex;

use crate::{Dyn, Shape, ShapeRef};

/// A Rust type the runtime knows how to describe and carry.
///
/// This is the descriptor side of the bridge for host values: `shape` gives
/// the native descriptor, `into_dyn`/`from_dyn` move the value in and out of
/// the untyped representation.
pub trait Reflect: Sized {
    /// Descriptor of the type.
    fn shape() -> ShapeRef;

    /// Moves the value into its untyped representation.
    fn into_dyn(self) -> Dyn;

    /// Reads a value back, or `None` if `data` does not decode as `Self`.
    fn from_dyn(data: &Dyn) -> Option<Self>;
}

impl Reflect for bool {
    fn shape() -> ShapeRef {
        Shape::bool()
    }

    fn into_dyn(self) -> Dyn {
        Dyn::Bool(self)
    }

    fn from_dyn(data: &Dyn) -> Option<Self> {
        data.as_bool()
    }
}

macro_rules! impl_reflect_signed {
    ($($t:ty),*) => {$(
        impl Reflect for $t {
            fn shape() -> ShapeRef {
                Shape::signed(<$t>::BITS as u8)
            }

            fn into_dyn(self) -> Dyn {
                Dyn::Int(self as i64)
            }

            fn from_dyn(data: &Dyn) -> Option<Self> {
                data.as_i64().and_then(|i| <$t>::try_from(i).ok())
            }
        }
    )*};
}

macro_rules! impl_reflect_unsigned {
    ($($t:ty),*) => {$(
        impl Reflect for $t {
            fn shape() -> ShapeRef {
                Shape::unsigned(<$t>::BITS as u8)
            }

            fn into_dyn(self) -> Dyn {
                Dyn::Uint(self as u64)
            }

            fn from_dyn(data: &Dyn) -> Option<Self> {
                data.as_u64().and_then(|u| <$t>::try_from(u).ok())
            }
        }
    )*};
}

impl_reflect_signed!(i8, i16, i32, i64, isize);
impl_reflect_unsigned!(u8, u16, u32, u64, usize);

impl Reflect for f32 {
    fn shape() -> ShapeRef {
        Shape::float(32)
    }

    fn into_dyn(self) -> Dyn {
        Dyn::Float(self as f64)
    }

    fn from_dyn(data: &Dyn) -> Option<Self> {
        data.as_f64().map(|f| f as f32)
    }
}

impl Reflect for f64 {
    fn shape() -> ShapeRef {
        Shape::f64()
    }

    fn into_dyn(self) -> Dyn {
        Dyn::Float(self)
    }

    fn from_dyn(data: &Dyn) -> Option<Self> {
        data.as_f64()
    }
}

impl Reflect for Complex<f32> {
    fn shape() -> ShapeRef {
        Shape::complex(32)
    }

    fn into_dyn(self) -> Dyn {
        Dyn::Complex(Complex::new(self.re as f64, self.im as f64))
    }

    fn from_dyn(data: &Dyn) -> Option<Self> {
        match data {
            Dyn::Complex(c) => Some(Complex::new(c.re as f32, c.im as f32)),
            _ => None,
        }
    }
}

impl Reflect for Complex<f64> {
    fn shape() -> ShapeRef {
        Shape::complex(64)
    }

    fn into_dyn(self) -> Dyn {
        Dyn::Complex(self)
    }

    fn from_dyn(data: &Dyn) -> Option<Self> {
        match data {
            Dyn::Complex(c) => Some(*c),
            _ => None,
        }
    }
}

impl Reflect for String {
    fn shape() -> ShapeRef {
        Shape::string()
    }

    fn into_dyn(self) -> Dyn {
        Dyn::String(self)
    }

    fn from_dyn(data: &Dyn) -> Option<Self> {
        data.as_str().map(String::from)
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn shape() -> ShapeRef {
        Shape::slice(T::shape())
    }

    fn into_dyn(self) -> Dyn {
        Dyn::Slice(self.into_iter().map(T::into_dyn).collect())
    }

    fn from_dyn(data: &Dyn) -> Option<Self> {
        match data {
            Dyn::Slice(items) => items.iter().map(T::from_dyn).collect(),
            _ => None,
        }
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn shape() -> ShapeRef {
        Shape::array(T::shape(), N)
    }

    fn into_dyn(self) -> Dyn {
        Dyn::Array(self.into_iter().map(T::into_dyn).collect())
    }

    fn from_dyn(data: &Dyn) -> Option<Self> {
        match data {
            Dyn::Array(items) => {
                let items: Vec<T> = items.iter().map(T::from_dyn).collect::<Option<_>>()?;
                items.try_into().ok()
            }
            _ => None,
        }
    }
}

macro_rules! impl_reflect_map {
    ($map:ident, $($bound:path),*) => {
        impl<K, V> Reflect for $map<K, V>
        where
            K: Reflect $(+ $bound)*,
            V: Reflect,
        {
            fn shape() -> ShapeRef {
                Shape::map(K::shape(), V::shape())
            }

            fn into_dyn(self) -> Dyn {
                Dyn::Map(
                    self.into_iter()
                        .map(|(k, v)| (k.into_dyn(), v.into_dyn()))
                        .collect(),
                )
            }

            fn from_dyn(data: &Dyn) -> Option<Self> {
                match data {
                    Dyn::Map(map) => map
                        .iter()
                        .map(|(k, v)| Some((K::from_dyn(k)?, V::from_dyn(v)?)))
                        .collect(),
                    _ => None,
                }
            }
        }
    };
}

impl_reflect_map!(HashMap, Eq, Hash);
impl_reflect_map!(IndexMap, Eq, Hash);
impl_reflect_map!(BTreeMap, Ord);
