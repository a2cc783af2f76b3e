//! Memory-mapped record index
//!
//! [`MatIndex`] maps a whole MAT file read-only, walks it once from the
//! start and keeps a table of every complete record. Matrices can then be
//! decoded by position or by name straight from the mapping without moving
//! any stream cursor.

use crate::config::StreamConfig;
use crate::error::{MatError, Result};
use crate::stream::check_record_supported;
use hashbrown::HashMap;
use matstream_core::{element_offset, ColumnMajor, DenseMatrix, FormatError, MatElement, MatHeader};
use memmap2::{Mmap, MmapOptions};
use std::{
    fs::File,
    path::{Path, PathBuf},
};

/// Location of one record inside the file
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordEntry {
    pub header: MatHeader,
    /// Offset of the header
    pub offset: u64,
    /// Offset of the first body byte
    pub body_offset: u64,
    /// Stored body length, including any imaginary block
    pub body_len: u64,
}

impl RecordEntry {
    /// Offset one past the end of the record
    pub fn end(&self) -> u64 {
        self.body_offset + self.body_len
    }
}

/// Read-only table of the records in a MAT file
pub struct MatIndex {
    path: PathBuf,
    mmap: Option<Mmap>,
    records: Vec<RecordEntry>,
    by_name: HashMap<String, usize>,
    trailing_bytes: u64,
    config: StreamConfig,
}

impl MatIndex {
    /// Map `path` and index its records with the default configuration
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, StreamConfig::default())
    }

    /// Map `path` and index its records
    ///
    /// The configuration decides which records [`decode`](Self::decode)
    /// accepts. The file must not be modified while the index is alive.
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: StreamConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| MatError::open(path, e))?;
        let len = file.metadata()?.len();

        // Zero-length mappings are rejected on some platforms
        let mmap = if len == 0 {
            None
        } else {
            // SAFETY: Read-only mapping; the file is not modified while the index holds it
            Some(unsafe { MmapOptions::new().map(&file)? })
        };

        let mut index = Self {
            path: path.to_path_buf(),
            mmap,
            records: Vec::new(),
            by_name: HashMap::new(),
            trailing_bytes: 0,
            config,
        };
        index.walk();
        Ok(index)
    }

    fn bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    fn walk(&mut self) {
        let total = self.bytes().len();
        let mut offset = 0usize;
        let mut records = Vec::new();

        while offset < total {
            match Self::entry_at(self.bytes(), offset) {
                Ok(entry) => {
                    // end() <= total, so it fits a usize
                    offset = entry.end() as usize;
                    records.push(entry);
                }
                Err(fault) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        offset,
                        trailing = total - offset,
                        %fault,
                        "record walk stopped before end of file"
                    );
                    break;
                }
            }
        }

        for (i, entry) in records.iter().enumerate() {
            self.by_name.entry(entry.header.name.clone()).or_insert(i);
        }
        self.trailing_bytes = (total - offset) as u64;
        self.records = records;

        tracing::debug!(
            path = %self.path.display(),
            records = self.records.len(),
            trailing = self.trailing_bytes,
            "indexed file"
        );
    }

    fn entry_at(bytes: &[u8], offset: usize) -> std::result::Result<RecordEntry, FormatError> {
        let (header, header_size) = MatHeader::from_bytes(&bytes[offset..])?;
        let body_offset = offset + header_size;
        let body_len = header.stored_body_size()?;
        let end = body_offset
            .checked_add(body_len)
            .ok_or(FormatError::DimensionOverflow)?;
        if end > bytes.len() {
            return Err(FormatError::Truncated);
        }

        Ok(RecordEntry {
            header,
            offset: offset as u64,
            body_offset: body_offset as u64,
            body_len: body_len as u64,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every complete record, in file order
    pub fn records(&self) -> &[RecordEntry] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Bytes after the last complete record
    pub fn trailing_bytes(&self) -> u64 {
        self.trailing_bytes
    }

    pub fn get(&self, index: usize) -> Option<&RecordEntry> {
        self.records.get(index)
    }

    /// First record stored under `name`
    pub fn find(&self, name: &str) -> Option<&RecordEntry> {
        self.by_name.get(name).and_then(|&i| self.records.get(i))
    }

    /// Decode the record at position `index`
    pub fn matrix<T: MatElement>(&self, index: usize) -> Result<Option<DenseMatrix<T>>> {
        self.get(index).map(|entry| self.decode(entry)).transpose()
    }

    /// Decode the first record stored under `name`
    pub fn matrix_by_name<T: MatElement>(&self, name: &str) -> Result<Option<DenseMatrix<T>>> {
        self.find(name).map(|entry| self.decode(entry)).transpose()
    }

    /// Decode the body of `entry` from the mapping
    ///
    /// Applies the same element type and record checks as
    /// [`MatStream::load`](crate::MatStream::load).
    pub fn decode<T: MatElement>(&self, entry: &RecordEntry) -> Result<DenseMatrix<T>> {
        let header = &entry.header;
        if header.data_type != T::DATA_TYPE {
            return Err(MatError::TypeMismatch {
                expected: T::DATA_TYPE,
                found: header.data_type,
            });
        }
        check_record_supported(header, &self.config)?;

        let bytes = self.bytes();
        let layout = ColumnMajor::new(header.height, header.width);
        let data = layout
            .positions()
            .map(|(row, col)| {
                let offset = element_offset(entry.body_offset, &layout, row, col, T::size_bytes())?;
                usize::try_from(offset)
                    .ok()
                    .and_then(|start| bytes.get(start..))
                    .and_then(T::from_ne_slice)
                    .ok_or(FormatError::Truncated)
            })
            .collect::<std::result::Result<Vec<T>, FormatError>>()?;

        Ok(DenseMatrix::from_column_major(header.height, header.width, data)?)
    }
}

impl std::fmt::Debug for MatIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatIndex")
            .field("path", &self.path)
            .field("records", &self.records.len())
            .field("trailing_bytes", &self.trailing_bytes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatStream;
    use matstream_core::DataType;
    use tempfile::tempdir;

    #[test]
    fn test_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.mat");
        std::fs::write(&path, b"").unwrap();

        let index = MatIndex::open(&path).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.trailing_bytes(), 0);
        assert!(index.matrix::<f64>(0).unwrap().is_none());
    }

    #[test]
    fn test_index_matches_stream() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.mat");
        let a = DenseMatrix::from_rows(&[[1.0f64, 2.0], [3.0, 4.0]]).unwrap();
        let b = DenseMatrix::from_rows(&[[5u8, 6, 7]]).unwrap();

        let mut stream = MatStream::new(&path);
        stream.write("a", &a).unwrap();
        stream.write("b", &b).unwrap();

        let index = MatIndex::open(&path).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.records()[0].offset, 0);
        assert_eq!(index.records()[1].offset, index.records()[0].end());
        assert_eq!(index.records()[1].end(), stream.cursor());

        assert_eq!(index.matrix::<f64>(0).unwrap(), Some(a));
        assert_eq!(index.matrix_by_name::<u8>("b").unwrap(), Some(b));
        assert!(index.matrix_by_name::<u8>("c").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dupes.mat");
        let mut stream = MatStream::new(&path);
        stream.write("x", &DenseMatrix::<i32>::zeros(1, 1)).unwrap();
        stream.write("x", &DenseMatrix::<i16>::zeros(1, 1)).unwrap();

        let index = MatIndex::open(&path).unwrap();
        let found = index.find("x").unwrap();
        assert_eq!(found.offset, 0);
        assert_eq!(found.header.data_type, DataType::I32);
    }

    #[test]
    fn test_trailing_partial_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.mat");
        MatStream::new(&path)
            .write("whole", &DenseMatrix::<u16>::zeros(2, 2))
            .unwrap();
        let whole_len = std::fs::metadata(&path).unwrap().len();

        // A header promising more body than the file holds
        let partial = MatHeader::new("cut", DataType::F64, 10, 10).to_bytes().unwrap();
        let mut bytes = std::fs::read(&path).unwrap();
        bytes.extend_from_slice(&partial);
        bytes.extend_from_slice(&[0u8; 16]);
        std::fs::write(&path, &bytes).unwrap();

        let index = MatIndex::open(&path).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.trailing_bytes(), bytes.len() as u64 - whole_len);
    }

    #[test]
    fn test_decode_type_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("typed.mat");
        MatStream::new(&path)
            .write("f", &DenseMatrix::<f32>::zeros(1, 3))
            .unwrap();

        let index = MatIndex::open(&path).unwrap();
        assert!(matches!(
            index.matrix::<f64>(0),
            Err(MatError::TypeMismatch { .. })
        ));
    }
}
