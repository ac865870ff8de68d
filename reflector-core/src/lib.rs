#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

mod shape;
pub use shape::*;

mod field;
pub use field::*;

mod dyn_;
pub use dyn_::*;

mod any;
pub use any::*;

mod slot;
pub use slot::*;

mod reflect;
pub use reflect::*;

mod error;
pub use error::*;

pub mod native;
