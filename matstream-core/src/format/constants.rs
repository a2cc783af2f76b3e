//! Format constants for MAT level-4 records

/// Number of 32-bit integers in the fixed header prefix
pub const HEADER_FIELD_COUNT: usize = 5;

/// Size of one header integer field
pub const HEADER_FIELD_SIZE: usize = 4;

/// Fixed portion of every header: type, mrows, ncols, imagf, namlen
pub const FIXED_HEADER_SIZE: usize = HEADER_FIELD_COUNT * HEADER_FIELD_SIZE;

/// Size of the null byte that ends every stored name
pub const NAME_TERMINATOR_SIZE: usize = 1;

/// Sub-tag multipliers of the combined type field
pub mod tag {
    /// Data format sub-tag is a multiple of this value
    pub const DATA_FORMAT_UNIT: i32 = 1000;

    /// Data type sub-tag is a multiple of this value below `DATA_FORMAT_UNIT`
    pub const DATA_TYPE_UNIT: i32 = 10;
}
