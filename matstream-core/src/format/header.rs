//! MAT level-4 record header definitions
//!
//! Every record starts with five 32-bit signed integers followed by the
//! matrix name and a single null byte:
//!
//! ```text
//! type:i32 mrows:i32 ncols:i32 imagf:i32 namlen:i32 name:[u8; namlen - 1] '\0'
//! ```
//!
//! The `type` field packs three sub-tags, `data_format + data_type + matrix_kind`.
//! Integers use the host byte order; no conversion is performed.

use super::constants::{tag, FIXED_HEADER_SIZE, HEADER_FIELD_SIZE, NAME_TERMINATOR_SIZE};
use crate::error::{FormatError, Result};

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};

/// How the numeric data of a record is represented on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum DataFormat {
    /// IEEE 754, little-endian
    IeeeLittleEndian = 0,
    /// IEEE 754, big-endian
    IeeeBigEndian = 1000,
    /// VAX D-float
    VaxDFloat = 2000,
    /// VAX G-float
    VaxGFloat = 3000,
    /// Cray
    Cray = 4000,
}

impl DataFormat {
    /// Representation used by the host this code runs on
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            DataFormat::IeeeLittleEndian
        } else {
            DataFormat::IeeeBigEndian
        }
    }

    /// Convert from the sub-tag value
    pub const fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(DataFormat::IeeeLittleEndian),
            1000 => Some(DataFormat::IeeeBigEndian),
            2000 => Some(DataFormat::VaxDFloat),
            3000 => Some(DataFormat::VaxGFloat),
            4000 => Some(DataFormat::Cray),
            _ => None,
        }
    }

    /// Convert to the sub-tag value
    pub const fn to_i32(self) -> i32 {
        self as i32
    }
}

impl Default for DataFormat {
    fn default() -> Self {
        Self::native()
    }
}

impl core::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DataFormat::IeeeLittleEndian => write!(f, "ieee-le"),
            DataFormat::IeeeBigEndian => write!(f, "ieee-be"),
            DataFormat::VaxDFloat => write!(f, "vax-d"),
            DataFormat::VaxGFloat => write!(f, "vax-g"),
            DataFormat::Cray => write!(f, "cray"),
        }
    }
}

/// Element types a record body can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum DataType {
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point
    F32 = 10,
    /// 32-bit signed integer
    I32 = 20,
    /// 16-bit signed integer
    I16 = 30,
    /// 16-bit unsigned integer
    U16 = 40,
    /// 8-bit unsigned integer
    U8 = 50,
}

impl DataType {
    /// Every supported element type, in tag order
    pub const ALL: [DataType; 6] = [
        DataType::F64,
        DataType::F32,
        DataType::I32,
        DataType::I16,
        DataType::U16,
        DataType::U8,
    ];

    /// Convert from the sub-tag value
    pub const fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(DataType::F64),
            10 => Some(DataType::F32),
            20 => Some(DataType::I32),
            30 => Some(DataType::I16),
            40 => Some(DataType::U16),
            50 => Some(DataType::U8),
            _ => None,
        }
    }

    /// Convert to the sub-tag value
    pub const fn to_i32(self) -> i32 {
        self as i32
    }

    /// Get the size in bytes of one element of this type
    pub const fn size_bytes(self) -> usize {
        match self {
            DataType::F64 => 8,
            DataType::F32 | DataType::I32 => 4,
            DataType::I16 | DataType::U16 => 2,
            DataType::U8 => 1,
        }
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            DataType::F64 => "f64",
            DataType::F32 => "f32",
            DataType::I32 => "i32",
            DataType::I16 => "i16",
            DataType::U16 => "u16",
            DataType::U8 => "u8",
        };
        f.pad(name)
    }
}

/// Kind of matrix a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum MatrixKind {
    /// Dense numeric matrix
    #[default]
    Full = 0,
    /// Character matrix
    Text = 1,
    /// Sparse matrix in MATLAB triplet layout
    Sparse = 2,
}

impl MatrixKind {
    /// Convert from the sub-tag value
    pub const fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(MatrixKind::Full),
            1 => Some(MatrixKind::Text),
            2 => Some(MatrixKind::Sparse),
            _ => None,
        }
    }

    /// Convert to the sub-tag value
    pub const fn to_i32(self) -> i32 {
        self as i32
    }
}

impl core::fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatrixKind::Full => write!(f, "full"),
            MatrixKind::Text => write!(f, "text"),
            MatrixKind::Sparse => write!(f, "sparse"),
        }
    }
}

/// The combined `type` field of a header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeTag {
    pub data_format: DataFormat,
    pub data_type: DataType,
    pub matrix_kind: MatrixKind,
}

impl TypeTag {
    /// Pack the three sub-tags into one integer
    pub const fn compose(self) -> i32 {
        self.data_format.to_i32() + self.data_type.to_i32() + self.matrix_kind.to_i32()
    }

    /// Split a combined integer into its sub-tags
    ///
    /// The format is the multiple of 1000, the data type the multiple of 10
    /// in what remains, and the matrix kind the final remainder.
    pub const fn decompose(value: i32) -> Result<Self> {
        let format_id = tag::DATA_FORMAT_UNIT * (value / tag::DATA_FORMAT_UNIT);
        let rest = value - format_id;
        let type_id = tag::DATA_TYPE_UNIT * (rest / tag::DATA_TYPE_UNIT);
        let kind_id = rest - type_id;

        let data_format = match DataFormat::from_i32(format_id) {
            Some(format) => format,
            None => return Err(FormatError::UnknownDataFormat(format_id)),
        };
        let data_type = match DataType::from_i32(type_id) {
            Some(data_type) => data_type,
            None => return Err(FormatError::UnknownDataType(type_id)),
        };
        let matrix_kind = match MatrixKind::from_i32(kind_id) {
            Some(kind) => kind,
            None => return Err(FormatError::UnknownMatrixKind(kind_id)),
        };

        Ok(Self {
            data_format,
            data_type,
            matrix_kind,
        })
    }
}

/// The fixed 20-byte prefix of a header, exactly as stored
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedHeader {
    /// Combined type tag
    pub type_tag: i32,
    /// Number of rows
    pub height: i32,
    /// Number of columns
    pub width: i32,
    /// Non-zero when an imaginary part follows the real part
    pub imag_flag: i32,
    /// Length of the name including its null terminator
    pub name_len: i32,
}

impl FixedHeader {
    /// Size of the fixed prefix in bytes
    pub const SIZE: usize = FIXED_HEADER_SIZE;

    /// Read the five fields from bytes without validating them
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(FormatError::Truncated);
        }

        let field = |index: usize| {
            let start = index * HEADER_FIELD_SIZE;
            i32::from_ne_bytes([
                bytes[start],
                bytes[start + 1],
                bytes[start + 2],
                bytes[start + 3],
            ])
        };

        Ok(Self {
            type_tag: field(0),
            height: field(1),
            width: field(2),
            imag_flag: field(3),
            name_len: field(4),
        })
    }

    /// Convert to the on-disk byte array (no-std compatible)
    pub const fn to_bytes_array(&self) -> [u8; Self::SIZE] {
        let fields = [
            self.type_tag,
            self.height,
            self.width,
            self.imag_flag,
            self.name_len,
        ];
        let mut bytes = [0u8; Self::SIZE];

        let mut i = 0;
        while i < fields.len() {
            let field_bytes = fields[i].to_ne_bytes();
            let mut j = 0;
            while j < HEADER_FIELD_SIZE {
                bytes[i * HEADER_FIELD_SIZE + j] = field_bytes[j];
                j += 1;
            }
            i += 1;
        }

        bytes
    }

    /// Check the fields a reader relies on before touching the name
    pub const fn validate(&self) -> Result<()> {
        if self.height < 0 || self.width < 0 {
            return Err(FormatError::NegativeDimension);
        }
        if self.name_len < 1 {
            return Err(FormatError::InvalidNameLength);
        }
        Ok(())
    }

    /// Number of name bytes stored before the terminator
    pub const fn name_bytes(&self) -> usize {
        if self.name_len < 1 {
            0
        } else {
            self.name_len as usize - NAME_TERMINATOR_SIZE
        }
    }

    /// Total size of the header this prefix introduces
    pub const fn encoded_size(&self) -> usize {
        Self::SIZE + self.name_bytes() + NAME_TERMINATOR_SIZE
    }

    /// Decode the packed type field
    pub const fn type_tag(&self) -> Result<TypeTag> {
        TypeTag::decompose(self.type_tag)
    }
}

/// Decoded header of one stored matrix
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatHeader {
    /// Byte order / representation of the body
    pub data_format: DataFormat,
    /// Element type of the body
    pub data_type: DataType,
    /// Full, text or sparse
    pub matrix_kind: MatrixKind,
    /// Number of rows
    pub height: usize,
    /// Number of columns
    pub width: usize,
    /// Whether an imaginary block follows the real block
    pub is_complex: bool,
    /// Matrix name, without the terminator
    pub name: String,
}

#[cfg(feature = "alloc")]
impl MatHeader {
    /// Create a header for a full, real matrix in the host representation
    pub fn new(name: impl Into<String>, data_type: DataType, height: usize, width: usize) -> Self {
        Self {
            data_format: DataFormat::native(),
            data_type,
            matrix_kind: MatrixKind::Full,
            height,
            width,
            is_complex: false,
            name: name.into(),
        }
    }

    /// Create a header describing `matrix`
    pub fn for_matrix<M>(name: impl Into<String>, matrix: &M) -> Self
    where
        M: crate::traits::MatrixRef + ?Sized,
    {
        use crate::traits::MatElement;

        Self::new(
            name,
            <M::Element as MatElement>::DATA_TYPE,
            matrix.height(),
            matrix.width(),
        )
    }

    /// Set the data format tag
    pub fn with_data_format(mut self, data_format: DataFormat) -> Self {
        self.data_format = data_format;
        self
    }

    /// Combined type tag of this header
    pub fn type_tag(&self) -> TypeTag {
        TypeTag {
            data_format: self.data_format,
            data_type: self.data_type,
            matrix_kind: self.matrix_kind,
        }
    }

    /// Size of the encoded header in bytes
    pub fn encoded_size(&self) -> usize {
        FIXED_HEADER_SIZE + self.name.len() + NAME_TERMINATOR_SIZE
    }

    /// Number of elements in the real part of the body
    pub fn element_count(&self) -> Result<usize> {
        self.height
            .checked_mul(self.width)
            .ok_or(FormatError::DimensionOverflow)
    }

    /// Size of the real part of the body in bytes
    pub fn body_size(&self) -> Result<usize> {
        self.element_count()?
            .checked_mul(self.data_type.size_bytes())
            .ok_or(FormatError::DimensionOverflow)
    }

    /// Size of the body as stored, including the imaginary block of a
    /// complex record
    pub fn stored_body_size(&self) -> Result<usize> {
        let parts = if self.is_complex { 2 } else { 1 };
        self.body_size()?
            .checked_mul(parts)
            .ok_or(FormatError::DimensionOverflow)
    }

    /// Build the fixed prefix, checking that every field fits an `i32`
    /// and that the name holds no null byte
    pub fn to_fixed(&self) -> Result<FixedHeader> {
        if self.name.as_bytes().contains(&0) {
            return Err(FormatError::NameContainsTerminator);
        }
        let to_i32 = |value: usize| i32::try_from(value).map_err(|_| FormatError::DimensionOverflow);

        Ok(FixedHeader {
            type_tag: self.type_tag().compose(),
            height: to_i32(self.height)?,
            width: to_i32(self.width)?,
            imag_flag: i32::from(self.is_complex),
            name_len: to_i32(self.name.len() + NAME_TERMINATOR_SIZE)?,
        })
    }

    /// Rebuild a header from its fixed prefix and the name bytes
    ///
    /// `name_bytes` excludes the terminator. Names that are not valid UTF-8
    /// are converted lossily.
    pub fn from_fixed(fixed: &FixedHeader, name_bytes: &[u8]) -> Result<Self> {
        fixed.validate()?;
        if name_bytes.len() != fixed.name_bytes() {
            return Err(FormatError::Truncated);
        }
        let tag = fixed.type_tag()?;

        Ok(Self {
            data_format: tag.data_format,
            data_type: tag.data_type,
            matrix_kind: tag.matrix_kind,
            height: fixed.height as usize,
            width: fixed.width as usize,
            is_complex: fixed.imag_flag != 0,
            name: String::from_utf8_lossy(name_bytes).into_owned(),
        })
    }

    /// Parse a complete header from the start of `bytes`
    ///
    /// Returns the header and the number of bytes it occupies.
    pub fn from_bytes(bytes: &[u8]) -> Result<(Self, usize)> {
        let fixed = FixedHeader::from_bytes(bytes)?;
        fixed.validate()?;

        let name_start = FixedHeader::SIZE;
        let name_end = name_start
            .checked_add(fixed.name_bytes())
            .ok_or(FormatError::DimensionOverflow)?;
        if bytes.len() <= name_end {
            return Err(FormatError::Truncated);
        }
        if bytes[name_end] != 0 {
            return Err(FormatError::MissingTerminator);
        }

        let header = Self::from_fixed(&fixed, &bytes[name_start..name_end])?;
        Ok((header, fixed.encoded_size()))
    }

    /// Encode the complete header
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let fixed = self.to_fixed()?;
        let mut bytes = Vec::with_capacity(self.encoded_size());

        bytes.extend_from_slice(&fixed.to_bytes_array());
        bytes.extend_from_slice(self.name.as_bytes());
        bytes.push(0);

        Ok(bytes)
    }
}
