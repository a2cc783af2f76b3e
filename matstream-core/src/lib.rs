#![no_std]

//! matstream core - MAT level-4 record format definitions
//!
//! This crate provides the header model, element type tags, column-major
//! layout arithmetic and matrix traits shared by every reader and writer of
//! MAT level-4 streams. It performs no I/O.

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod format;
pub mod layout;
#[cfg(feature = "alloc")]
pub mod matrix;
pub mod traits;

pub use error::*;
pub use format::*;
pub use layout::{body_end, element_offset, ColumnMajor};
#[cfg(feature = "alloc")]
pub use matrix::DenseMatrix;
pub use traits::*;
