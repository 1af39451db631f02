//! Core compute primitives.
//!
//! The dense [`Matrix`] backs kernel construction and label propagation.

mod matrix;

pub use matrix::Matrix;
