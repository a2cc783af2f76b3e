//! File codecs for MAT level-4 records
//!
//! The header codec appends headers at end of file and decodes them at a
//! given offset; the body codec moves column-major element data. Neither
//! keeps a file handle between calls.

mod body_io;
mod header_io;

pub use body_io::{read_body, read_body_into, write_body};
pub use header_io::{read_header, write_header};
