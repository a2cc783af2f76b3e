//! Column-major body reads and writes
//!
//! Every element is addressed individually: for `(row, col)` the codec seeks
//! to `start + (row + col * height) * size` and transfers exactly one
//! element in host byte order. Rows are visited in the outer loop, so the
//! file position jumps between columns while matrix access stays row by row.

use crate::error::{MatError, Result};
use matstream_core::{body_end, element_offset, ColumnMajor, FormatError, MatElement, MatrixMut, MatrixRef};
use std::{
    fs::{File, OpenOptions},
    io::{ErrorKind, Read, Seek, SeekFrom, Write},
    path::Path,
};

/// Write the elements of `matrix` as a body starting at `start`
///
/// The file must already exist. Returns the offset one past the last
/// element.
pub fn write_body<M, P>(matrix: &M, path: P, start: u64) -> Result<u64>
where
    M: MatrixRef + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let size = <M::Element as MatElement>::size_bytes();
    let layout = ColumnMajor::new(matrix.height(), matrix.width());
    let end = body_end(start, &layout, size)?;

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|e| MatError::open(path, e))?;

    for row in 0..layout.height() {
        for col in 0..layout.width() {
            let offset = element_offset(start, &layout, row, col, size)?;
            let value = matrix.get(row, col);
            file.seek(SeekFrom::Start(offset))?;
            file.write_all(bytemuck::bytes_of(&value))?;
        }
    }
    file.flush()?;

    tracing::trace!(path = %path.display(), start, end, "wrote body");
    Ok(end)
}

/// Read a `height x width` body starting at `start` into a new matrix
///
/// Returns the matrix and the offset one past its last element. A body cut
/// short by end of file is reported as [`FormatError::Truncated`].
pub fn read_body<M, P>(path: P, start: u64, height: usize, width: usize) -> Result<(M, u64)>
where
    M: MatrixMut,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let size = <M::Element as MatElement>::size_bytes();
    let end = body_end(start, &ColumnMajor::new(height, width), size)?;

    // Refuse to allocate for a body the file cannot hold
    let file_len = std::fs::metadata(path)
        .map_err(|e| MatError::open(path, e))?
        .len();
    if end > file_len {
        return Err(FormatError::Truncated.into());
    }

    let mut matrix = M::with_shape(height, width);
    let end = read_body_into(&mut matrix, path, start)?;
    Ok((matrix, end))
}

/// Fill `matrix` from a body starting at `start`, using the matrix's shape
pub fn read_body_into<M, P>(matrix: &mut M, path: P, start: u64) -> Result<u64>
where
    M: MatrixMut,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let size = <M::Element as MatElement>::size_bytes();
    let layout = ColumnMajor::new(matrix.height(), matrix.width());
    let end = body_end(start, &layout, size)?;

    let mut file = File::open(path).map_err(|e| MatError::open(path, e))?;

    for row in 0..layout.height() {
        for col in 0..layout.width() {
            let offset = element_offset(start, &layout, row, col, size)?;
            file.seek(SeekFrom::Start(offset))?;

            let mut value = <M::Element as bytemuck::Zeroable>::zeroed();
            file.read_exact(bytemuck::bytes_of_mut(&mut value))
                .map_err(|e| match e.kind() {
                    ErrorKind::UnexpectedEof => MatError::Format(FormatError::Truncated),
                    _ => MatError::Io(e),
                })?;
            matrix.set(row, col, value);
        }
    }

    tracing::trace!(path = %path.display(), start, end, "read body");
    Ok(end)
}
