//! Error types for MAT stream operations

use matstream_core::{DataFormat, DataType, FormatError, MatrixKind};
use std::path::PathBuf;
use thiserror::Error;

/// Record features the codecs do not handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsupported {
    /// The record carries an imaginary block
    Complex,
    /// The record is a text or sparse matrix
    MatrixKind(MatrixKind),
    /// The record uses a representation other than the configured one
    DataFormat { expected: DataFormat, found: DataFormat },
}

impl std::fmt::Display for Unsupported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unsupported::Complex => write!(f, "complex matrices"),
            Unsupported::MatrixKind(kind) => write!(f, "{kind} matrices"),
            Unsupported::DataFormat { expected, found } => {
                write!(f, "{found} data (stream expects {expected})")
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum MatError {
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No header at offset {offset}: {fault}")]
    NoHeader { offset: u64, fault: FormatError },

    #[error("Matrix data type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: DataType, found: DataType },

    #[error("Unsupported record: {0}")]
    Unsupported(Unsupported),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),
}

impl MatError {
    /// Whether this error marks the end of the stored records
    pub fn is_no_header(&self) -> bool {
        matches!(self, MatError::NoHeader { .. })
    }

    pub(crate) fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MatError::Open {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MatError>;
