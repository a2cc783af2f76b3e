//! matstream - MAT level-4 matrix streams
//!
//! This library appends dense numeric matrices to MATLAB level-4 MAT files
//! and loads them back, one record after another.
//!
//! ## Architecture
//!
//! matstream keeps the record format separate from file access:
//!
//! - **matstream-core**: Header model, type tags, column-major layout and matrix traits (no I/O)
//! - **matstream**: Header and body codecs, the stream engine and a memory-mapped record index
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use matstream::{DenseMatrix, MatStream, MatrixRef};
//!
//! fn example() -> matstream::Result<()> {
//!     let mut stream = MatStream::new("weights.mat");
//!     stream.reset()?;
//!
//!     let weights = DenseMatrix::from_rows(&[[0.5f64, 1.5], [2.5, 3.5]])?;
//!     stream.append("layer")?.append(1)?.append(&weights)?;
//!
//!     stream.rewind();
//!     let (name, loaded) = stream.load::<f64>()?;
//!     println!("{name}: {:?}", loaded.dimensions());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Chained appends**: name fragments accumulate until a matrix is written
//! - **Typed loads**: element types are checked before any body byte is read
//! - **Memory-mapped index**: list and decode every record of a file (`mmap` feature)
//! - **Serde**: headers serialize with the `serde` feature

pub use matstream_core::{
    // Format definitions
    DataFormat, DataType, FixedHeader, MatHeader, MatrixKind, TypeTag,
    // Matrix abstractions
    DenseMatrix, MatElement, MatrixMut, MatrixRef,
    // Layout
    ColumnMajor,
    // Format-level errors
    FormatError,
};

pub mod codec;
pub mod config;
pub mod error;
#[cfg(feature = "mmap")]
pub mod index;
pub mod stream;

pub use config::StreamConfig;
pub use error::{MatError, Result, Unsupported};
#[cfg(feature = "mmap")]
pub use index::{MatIndex, RecordEntry};
pub use stream::{MatStream, StreamItem};
