//! Sequential MAT level-4 stream over a single file
//!
//! A [`MatStream`] remembers a path, a read cursor and a pending name. Name
//! fragments (text, characters, integers) accumulate until a matrix is
//! appended; the matrix is then written at the end of the file under the
//! accumulated name and the name is cleared. Loads decode the record at the
//! cursor and move the cursor past it.
//!
//! ```rust,no_run
//! use matstream::{DenseMatrix, MatStream};
//!
//! fn example() -> matstream::Result<()> {
//!     let mut stream = MatStream::new("results.mat");
//!     let m = DenseMatrix::from_rows(&[[1.0f64, 2.0], [3.0, 4.0]])?;
//!     stream.append("run")?.append(3)?.append(&m)?;
//!
//!     let mut reader = MatStream::new("results.mat");
//!     let (name, loaded) = reader.load::<f64>()?;
//!     assert_eq!(name, "run3");
//!     assert_eq!(loaded, m);
//!     Ok(())
//! }
//! ```

use crate::codec::{read_body, read_header, write_body, write_header};
use crate::config::StreamConfig;
use crate::error::{MatError, Result, Unsupported};
use matstream_core::{DenseMatrix, FormatError, MatElement, MatHeader, MatrixKind, MatrixMut, MatrixRef};
use std::{
    fmt::Display,
    fs::OpenOptions,
    path::{Path, PathBuf},
};

/// Handle for appending to and loading from one MAT file
///
/// No file handle is held between calls; every operation opens the file,
/// does its work and closes it again.
#[derive(Debug, Clone)]
pub struct MatStream {
    path: PathBuf,
    cursor: u64,
    pending_name: String,
    config: StreamConfig,
}

impl MatStream {
    /// Create a handle with the default configuration. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_config(path, StreamConfig::default())
    }

    /// Create a handle with an explicit configuration
    pub fn with_config(path: impl Into<PathBuf>, config: StreamConfig) -> Self {
        Self {
            path: path.into(),
            cursor: 0,
            pending_name: String::new(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset of the next record to load
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Name that the next appended matrix will be stored under
    pub fn pending_name(&self) -> &str {
        &self.pending_name
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Append a name fragment or a matrix
    ///
    /// Returns the stream so appends can be chained.
    pub fn append<I: StreamItem>(&mut self, item: I) -> Result<&mut Self> {
        item.feed(self)?;
        Ok(self)
    }

    /// Extend the pending name with the textual form of `fragment`
    pub fn append_name(&mut self, fragment: impl Display) -> &mut Self {
        self.pending_name.push_str(&fragment.to_string());
        self
    }

    /// Write `matrix` under the pending name and clear the name
    ///
    /// The header goes at the end of the file and the body directly after
    /// it. On success the cursor points past the new record. A failure after
    /// the header has been written leaves that header in place.
    pub fn append_matrix<M>(&mut self, matrix: &M) -> Result<&mut Self>
    where
        M: MatrixRef + ?Sized,
    {
        let name = std::mem::take(&mut self.pending_name);
        let header = MatHeader::for_matrix(name, matrix).with_data_format(self.config.data_format);

        let body_start = write_header(&header, &self.path)?;
        let body_end = write_body(matrix, &self.path, body_start)?;

        if self.config.sync_on_append {
            OpenOptions::new()
                .write(true)
                .open(&self.path)
                .and_then(|file| file.sync_all())?;
        }

        tracing::debug!(
            path = %self.path.display(),
            name = %header.name,
            data_type = %header.data_type,
            height = header.height,
            width = header.width,
            offset = body_start - header.encoded_size() as u64,
            end = body_end,
            "appended matrix"
        );

        self.cursor = body_end;
        Ok(self)
    }

    /// Write `matrix` under `name`, replacing any pending name
    pub fn write<M>(&mut self, name: impl Into<String>, matrix: &M) -> Result<&mut Self>
    where
        M: MatrixRef + ?Sized,
    {
        self.pending_name = name.into();
        self.append_matrix(matrix)
    }

    /// Load the record at the cursor as a dense matrix of `T`
    ///
    /// Fails with [`MatError::NoHeader`] at end of stream and with
    /// [`MatError::TypeMismatch`] when the record holds another element type.
    /// The cursor only moves on success.
    pub fn load<T: MatElement>(&mut self) -> Result<(String, DenseMatrix<T>)> {
        self.load_as::<DenseMatrix<T>>()
    }

    /// Load the record at the cursor into `matrix`, replacing its contents
    /// and shape. Returns the record name.
    pub fn load_into<M: MatrixMut>(&mut self, matrix: &mut M) -> Result<String> {
        let (name, loaded) = self.load_as::<M>()?;
        *matrix = loaded;
        Ok(name)
    }

    /// Decode the header at the cursor without moving it
    pub fn peek_header(&self) -> Result<MatHeader> {
        read_header(&self.path, self.cursor).map(|(header, _)| header)
    }

    /// Name of the record at the cursor, without moving it
    pub fn peek_name(&self) -> Result<String> {
        self.peek_header().map(|header| header.name)
    }

    /// Move the cursor past the record at the cursor without reading its body
    ///
    /// Works for every decodable record, including complex, text and sparse
    /// ones. Returns the skipped header.
    pub fn skip(&mut self) -> Result<MatHeader> {
        let (header, header_size) = read_header(&self.path, self.cursor)?;
        let next = (header.stored_body_size()? as u64)
            .checked_add(header_size)
            .and_then(|len| self.cursor.checked_add(len))
            .ok_or(FormatError::DimensionOverflow)?;

        tracing::debug!(
            path = %self.path.display(),
            name = %header.name,
            from = self.cursor,
            to = next,
            "skipped record"
        );

        self.cursor = next;
        Ok(header)
    }

    /// Move the cursor back to the first record
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Truncate the file (creating it if absent) and move the cursor to 0
    pub fn reset(&mut self) -> Result<()> {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| MatError::open(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), "reset stream");
        self.cursor = 0;
        Ok(())
    }

    fn load_as<M: MatrixMut>(&mut self) -> Result<(String, M)> {
        let (header, header_size) = read_header(&self.path, self.cursor)?;
        self.check_loadable::<M::Element>(&header)?;

        let body_start = self.cursor + header_size;
        let (matrix, body_end) = read_body::<M, _>(&self.path, body_start, header.height, header.width)?;

        tracing::debug!(
            path = %self.path.display(),
            name = %header.name,
            data_type = %header.data_type,
            height = header.height,
            width = header.width,
            offset = self.cursor,
            end = body_end,
            "loaded matrix"
        );

        self.cursor = body_end;
        Ok((header.name, matrix))
    }

    /// Checks that run before any body byte is read
    fn check_loadable<T: MatElement>(&self, header: &MatHeader) -> Result<()> {
        if header.data_type != T::DATA_TYPE {
            return Err(MatError::TypeMismatch {
                expected: T::DATA_TYPE,
                found: header.data_type,
            });
        }
        check_record_supported(header, &self.config)
    }
}

/// Reject records the body codec cannot represent
pub(crate) fn check_record_supported(header: &MatHeader, config: &StreamConfig) -> Result<()> {
    if header.is_complex {
        return Err(MatError::Unsupported(Unsupported::Complex));
    }
    if header.matrix_kind != MatrixKind::Full {
        return Err(MatError::Unsupported(Unsupported::MatrixKind(header.matrix_kind)));
    }
    if config.strict_format && header.data_format != config.data_format {
        return Err(MatError::Unsupported(Unsupported::DataFormat {
            expected: config.data_format,
            found: header.data_format,
        }));
    }
    Ok(())
}

/// Values that can be appended to a [`MatStream`]
///
/// Text, characters and integers extend the pending name; matrices are
/// written to the file under it.
pub trait StreamItem {
    fn feed(self, stream: &mut MatStream) -> Result<()>;
}

impl StreamItem for &str {
    fn feed(self, stream: &mut MatStream) -> Result<()> {
        stream.pending_name.push_str(self);
        Ok(())
    }
}

impl StreamItem for String {
    fn feed(self, stream: &mut MatStream) -> Result<()> {
        stream.pending_name.push_str(&self);
        Ok(())
    }
}

impl StreamItem for &String {
    fn feed(self, stream: &mut MatStream) -> Result<()> {
        self.as_str().feed(stream)
    }
}

impl StreamItem for char {
    fn feed(self, stream: &mut MatStream) -> Result<()> {
        stream.pending_name.push(self);
        Ok(())
    }
}

macro_rules! impl_stream_item_for_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl StreamItem for $t {
                fn feed(self, stream: &mut MatStream) -> Result<()> {
                    stream.append_name(self);
                    Ok(())
                }
            }
        )*
    };
}

impl_stream_item_for_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T: MatElement> StreamItem for &DenseMatrix<T> {
    fn feed(self, stream: &mut MatStream) -> Result<()> {
        stream.append_matrix(self).map(|_| ())
    }
}
