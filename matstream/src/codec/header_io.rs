//! Header reads and appends against a MAT file
//!
//! Each call opens the file, performs its positioned read or end-of-file
//! append, and closes it again.

use crate::error::{MatError, Result};
use matstream_core::{FixedHeader, FormatError, MatHeader};
use std::{
    fs::{File, OpenOptions},
    io::{ErrorKind, Read, Seek, SeekFrom, Write},
    path::Path,
};

/// Decode the header stored at `offset`
///
/// Returns the header and the number of bytes it occupies. Anything that
/// prevents a complete, well-formed header from being read at `offset`
/// (end of file, short name, negative shape, missing terminator, unknown
/// type tag) is reported as [`MatError::NoHeader`].
pub fn read_header<P: AsRef<Path>>(path: P, offset: u64) -> Result<(MatHeader, u64)> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| MatError::open(path, e))?;
    file.seek(SeekFrom::Start(offset))?;

    let no_header = |fault: FormatError| MatError::NoHeader { offset, fault };

    let mut fixed_bytes = [0u8; FixedHeader::SIZE];
    read_or_truncated(&mut file, &mut fixed_bytes).map_err(|e| lift(e, offset))?;

    let fixed = FixedHeader::from_bytes(&fixed_bytes).map_err(no_header)?;
    fixed.validate().map_err(no_header)?;

    // Name bytes followed by the null terminator; grows only as far as the file does
    let expected = fixed.name_bytes() + 1;
    let mut name = Vec::new();
    (&mut file).take(expected as u64).read_to_end(&mut name)?;
    if name.len() < expected {
        return Err(no_header(FormatError::Truncated));
    }
    if name.pop() != Some(0) {
        return Err(no_header(FormatError::MissingTerminator));
    }

    let header = MatHeader::from_fixed(&fixed, &name).map_err(no_header)?;
    let size = fixed.encoded_size() as u64;

    tracing::trace!(
        path = %path.display(),
        offset,
        size,
        name = %header.name,
        data_type = %header.data_type,
        height = header.height,
        width = header.width,
        "decoded header"
    );

    Ok((header, size))
}

/// Append `header` at the end of the file, creating the file if needed
///
/// Existing content is never truncated. Returns the offset just past the
/// written header, which is where the body belongs.
pub fn write_header<P: AsRef<Path>>(header: &MatHeader, path: P) -> Result<u64> {
    let path = path.as_ref();
    // Encode first so an unrepresentable header leaves the file untouched
    let bytes = header.to_bytes()?;

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|e| MatError::open(path, e))?;

    let existing_size = file.seek(SeekFrom::End(0))?;
    file.write_all(&bytes)?;
    file.flush()?;

    let end = existing_size + bytes.len() as u64;
    tracing::trace!(
        path = %path.display(),
        offset = existing_size,
        end,
        name = %header.name,
        "appended header"
    );

    Ok(end)
}

/// Outcome of a fill attempt: either filled or hit end of file
enum ReadFault {
    Truncated,
    Io(std::io::Error),
}

fn read_or_truncated(file: &mut File, buf: &mut [u8]) -> std::result::Result<(), ReadFault> {
    file.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => ReadFault::Truncated,
        _ => ReadFault::Io(e),
    })
}

fn lift(fault: ReadFault, offset: u64) -> MatError {
    match fault {
        ReadFault::Truncated => MatError::NoHeader {
            offset,
            fault: FormatError::Truncated,
        },
        ReadFault::Io(e) => MatError::Io(e),
    }
}
