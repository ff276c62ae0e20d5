use num_traits::{Float, NumAssignOps};
use rand::distributions::uniform::SampleUniform;
use std::fmt::Debug;
use std::iter::Sum;

/// A trait representing the element type of every array on a tape.
///
/// Strictly reserved to floating point types (`f32`, `f64`): the sigmoid and the
/// local derivatives of division need `exp` and reciprocals. One tape carries a
/// single scalar type, fixed by the `T` of [`Tape<T>`](crate::Tape).
pub trait Scalar:
    Float // Includes Num + Copy + NumCast + PartialOrd
    + NumAssignOps
    + Sum
    + SampleUniform
    + Debug
    + Send
    + Sync
    + 'static
{
}

impl Scalar for f32 {}
impl Scalar for f64 {}
