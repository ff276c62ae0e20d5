pub mod matmul;

pub use matmul::matprod_op;
