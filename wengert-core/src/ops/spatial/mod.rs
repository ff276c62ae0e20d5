//! # Spatial Operations
//!
//! Valid 2D convolution (correlation) and non-overlapping max pooling. Both clear
//! the tape's elementwise-only flag. The underlying kernels live in
//! [`crate::array::spatial`].

pub mod convolution;
pub mod max_pool;

pub use convolution::convolution_op;
pub use max_pool::max_pooling_op;
