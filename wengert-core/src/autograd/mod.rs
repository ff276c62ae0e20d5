//! # Automatic differentiation (`autograd`)
//!
//! - [`Tape`]: the Wengert list every operation appends to.
//! - [`NodeKind`]: what a node records and how it folds derivatives backward.
//! - [`Gradient`]: the per-node derivatives produced by [`Tensor::grad`](crate::Tensor::grad).
//! - [`grad_check`]: finite-difference verification of analytical gradients.

pub(crate) mod backward;
pub mod grad_check;
pub mod gradient;
pub(crate) mod node;
pub(crate) mod tape;

pub use gradient::Gradient;
pub use node::NodeKind;
pub use tape::Tape;
