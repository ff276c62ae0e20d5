use crate::array::{Array, Shape};
use crate::ops::traits::Scalar;

/// Checks that an array has the expected shape and that its data is within
/// `tolerance` of `expected_data`.
/// Panics if shapes differ or data differs significantly.
pub fn check_array_near<T: Scalar>(
    actual: &Array<T>,
    expected_shape: Shape,
    expected_data: &[T],
    tolerance: T,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    assert_eq!(
        actual.len(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual.as_slice().iter().zip(expected_data.iter()).enumerate() {
        let diff = (*a - *e).abs();
        if diff > tolerance || diff.is_nan() {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}
