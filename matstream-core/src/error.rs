//! Error types for MAT record format operations

/// Errors that can occur while interpreting MAT record bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// Fewer bytes available than the structure requires
    Truncated,
    /// Height or width field is negative
    NegativeDimension,
    /// Name length field is smaller than one (no room for the terminator)
    InvalidNameLength,
    /// Name is not followed by a null byte
    MissingTerminator,
    /// Name contains a null byte before its end
    NameContainsTerminator,
    /// Data format sub-tag is not one of the known representations
    UnknownDataFormat(i32),
    /// Data type sub-tag is not one of the six element types
    UnknownDataType(i32),
    /// Matrix kind sub-tag is not full, text or sparse
    UnknownMatrixKind(i32),
    /// Shape or offset arithmetic does not fit the target integer
    DimensionOverflow,
    /// Element buffer length does not match height * width
    ShapeMismatch,
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FormatError::Truncated => write!(f, "Record truncated"),
            FormatError::NegativeDimension => write!(f, "Negative matrix dimension"),
            FormatError::InvalidNameLength => write!(f, "Invalid name length"),
            FormatError::MissingTerminator => write!(f, "Name is not null-terminated"),
            FormatError::NameContainsTerminator => write!(f, "Name contains a null byte"),
            FormatError::UnknownDataFormat(tag) => write!(f, "Unknown data format tag {tag}"),
            FormatError::UnknownDataType(tag) => write!(f, "Unknown data type tag {tag}"),
            FormatError::UnknownMatrixKind(tag) => write!(f, "Unknown matrix kind tag {tag}"),
            FormatError::DimensionOverflow => write!(f, "Matrix dimensions overflow"),
            FormatError::ShapeMismatch => write!(f, "Element count does not match shape"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FormatError {}

/// Result type for MAT format operations
pub type Result<T> = core::result::Result<T, FormatError>;
