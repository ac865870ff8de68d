//! Scalar facets. They add nothing to the [`Typed`] contract beyond the width
//! of numeric shapes; their job is to be distinct, classifiable shapes.

use reflector_core::Kind;

use crate::Base;
use crate::macros::facet;

#[cfg(doc)]
use crate::Typed;

fn bits(kind: &Kind) -> u8 {
    match *kind {
        Kind::Signed { bits }
        | Kind::Unsigned { bits }
        | Kind::Float { bits }
        | Kind::Complex { bits } => bits,
        _ => 0,
    }
}

/// `bool`
#[derive(Clone)]
pub struct Boolean {
    pub(crate) base: Base,
}

facet!(Boolean => Boolean);

/// `String`
#[derive(Clone)]
pub struct StringType {
    pub(crate) base: Base,
}

facet!(StringType => String);

/// Signed integer of any width.
#[derive(Clone)]
pub struct SignedInteger {
    pub(crate) base: Base,
}

facet!(SignedInteger => SignedInteger);

impl SignedInteger {
    /// Width in bits.
    pub fn bits(&self) -> u8 {
        bits(&self.base.shape.kind)
    }
}

/// Unsigned integer of any width.
#[derive(Clone)]
pub struct UnsignedInteger {
    pub(crate) base: Base,
}

facet!(UnsignedInteger => UnsignedInteger);

impl UnsignedInteger {
    /// Width in bits.
    pub fn bits(&self) -> u8 {
        bits(&self.base.shape.kind)
    }
}

/// `f32` or `f64`
#[derive(Clone)]
pub struct Float {
    pub(crate) base: Base,
}

facet!(Float => Float);

impl Float {
    /// Width in bits.
    pub fn bits(&self) -> u8 {
        bits(&self.base.shape.kind)
    }
}

/// Complex number.
#[derive(Clone)]
pub struct Complex {
    pub(crate) base: Base,
}

facet!(Complex => Complex);

impl Complex {
    /// Width of each component in bits.
    pub fn bits(&self) -> u8 {
        bits(&self.base.shape.kind)
    }
}
