//! Binary format definitions for MAT level-4 records
//!
//! This module contains pure data structure definitions for the record wire
//! format. No I/O operations.

pub mod constants;
pub mod header;

pub use header::{DataFormat, DataType, FixedHeader, MatrixKind, TypeTag};
#[cfg(feature = "alloc")]
pub use header::MatHeader;
