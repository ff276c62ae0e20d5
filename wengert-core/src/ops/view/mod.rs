//! # View Operations
//!
//! Operations that only rearrange entries: vertical concatenation and row-major
//! flattening. Their nodes carry no stored local derivative; the backward pass
//! slices or reshapes the incoming derivative instead.

pub mod flatten;
pub mod vert_cat;

pub use flatten::flattening_op;
pub use vert_cat::vert_cat_op;
