//! # Activation Functions
//!
//! Element-wise non-linearities. They keep the tape elementwise-only.

pub mod sigmoid;

pub use sigmoid::sigmoid_op;
