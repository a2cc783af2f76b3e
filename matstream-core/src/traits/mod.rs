//! Abstract interfaces for MAT record elements and matrices
//!
//! Traits are pure interfaces; the only concrete container lives in
//! [`crate::matrix`].

pub mod element;
pub mod matrix;

pub use element::MatElement;
pub use matrix::{MatrixMut, MatrixRef};
