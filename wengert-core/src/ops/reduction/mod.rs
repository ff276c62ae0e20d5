pub mod squared_norm;

pub use squared_norm::squared_norm_op;
