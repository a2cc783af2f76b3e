//! Matrix element type constraints for MAT records
//!
//! This module defines the trait that constrains what types can be
//! stored as matrix elements in a MAT level-4 body.

use crate::format::DataType;

/// Trait for types that can be stored as matrix elements
///
/// Elements are written as their in-memory representation, so every
/// implementor must be plain old data:
/// - Pod: any bit pattern is valid and the type has no padding
/// - PartialEq: stored and loaded matrices can be compared
/// - Debug: matrices can be printed in diagnostics
pub trait MatElement: bytemuck::Pod + PartialEq + core::fmt::Debug {
    /// Tag written into the header for this element type
    const DATA_TYPE: DataType;

    /// Get the size in bytes of this element type
    fn size_bytes() -> usize {
        core::mem::size_of::<Self>()
    }

    /// Decode one element from host-order bytes
    ///
    /// `bytes` must hold at least `size_bytes()` bytes.
    fn from_ne_slice(bytes: &[u8]) -> Option<Self> {
        bytes
            .get(..Self::size_bytes())
            .map(bytemuck::pod_read_unaligned)
    }
}

impl MatElement for f64 {
    const DATA_TYPE: DataType = DataType::F64;
}

impl MatElement for f32 {
    const DATA_TYPE: DataType = DataType::F32;
}

impl MatElement for i32 {
    const DATA_TYPE: DataType = DataType::I32;
}

impl MatElement for i16 {
    const DATA_TYPE: DataType = DataType::I16;
}

impl MatElement for u16 {
    const DATA_TYPE: DataType = DataType::U16;
}

impl MatElement for u8 {
    const DATA_TYPE: DataType = DataType::U8;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check<T: MatElement>(tag: DataType) {
        assert_eq!(T::DATA_TYPE, tag);
        assert_eq!(T::size_bytes(), tag.size_bytes());
    }

    #[test]
    fn test_element_tags_match_widths() {
        check::<f64>(DataType::F64);
        check::<f32>(DataType::F32);
        check::<i32>(DataType::I32);
        check::<i16>(DataType::I16);
        check::<u16>(DataType::U16);
        check::<u8>(DataType::U8);
    }

    #[test]
    fn test_from_ne_slice() {
        let bytes = (-1234i16).to_ne_bytes();
        assert_eq!(i16::from_ne_slice(&bytes), Some(-1234));
        assert_eq!(i16::from_ne_slice(&bytes[..1]), None);

        let mut unaligned = [0u8; 9];
        unaligned[1..].copy_from_slice(&2.5f64.to_ne_bytes());
        assert_eq!(f64::from_ne_slice(&unaligned[1..]), Some(2.5));
    }
}
