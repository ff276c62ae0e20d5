//! # wengert-core
//!
//! Reverse-mode automatic differentiation over dense matrices.
//!
//! Every operation performed on a [`Tensor`] is recorded as a node on a shared
//! [`Tape`] (a Wengert list). Calling [`Tensor::grad`] replays the tape backwards
//! and returns a [`Gradient`] that can be queried with any tensor of the same tape.
//!
//! ```
//! use wengert_core::{Array, Tape, Tensor};
//!
//! let tape = Tape::<f64>::new();
//! let x = Tensor::new(Array::scalar(2.0), &tape);
//! let y = Tensor::new(Array::scalar(3.0), &tape);
//! let z = x.mul(&y).unwrap();
//!
//! let grad = z.grad().unwrap();
//! assert_eq!(grad.value(&x), Array::scalar(3.0));
//! assert_eq!(grad.value(&y), Array::scalar(2.0));
//! ```

pub mod array;
pub mod autograd;
pub mod error;
pub mod ops;
pub mod tensor;
pub mod utils;

pub use array::{Array, Shape};
pub use autograd::{Gradient, NodeKind, Tape};
pub use error::WengertError;
pub use ops::traits::Scalar;
pub use tensor::Tensor;

// Re-export traits required by public functions/structs
pub use num_traits;
