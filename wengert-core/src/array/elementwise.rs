use super::Array;
use crate::error::WengertError;
use crate::ops::traits::Scalar;

/// Combines two equally shaped arrays element by element.
pub fn zip_map<T, F>(
    a: &Array<T>,
    b: &Array<T>,
    operation: &str,
    f: F,
) -> Result<Array<T>, WengertError>
where
    T: Scalar,
    F: Fn(T, T) -> T,
{
    if a.shape() != b.shape() {
        return Err(WengertError::shape_mismatch(operation, a.shape(), b.shape()));
    }
    let data = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(&x, &y)| f(x, y))
        .collect();
    Array::from_vec(a.rows(), a.cols(), data)
}

pub fn add<T: Scalar>(a: &Array<T>, b: &Array<T>) -> Result<Array<T>, WengertError> {
    zip_map(a, b, "add", |x, y| x + y)
}

pub fn sub<T: Scalar>(a: &Array<T>, b: &Array<T>) -> Result<Array<T>, WengertError> {
    zip_map(a, b, "sub", |x, y| x - y)
}

/// Hadamard product.
pub fn hadamard<T: Scalar>(a: &Array<T>, b: &Array<T>) -> Result<Array<T>, WengertError> {
    zip_map(a, b, "hadamard", |x, y| x * y)
}

pub fn div<T: Scalar>(a: &Array<T>, b: &Array<T>) -> Result<Array<T>, WengertError> {
    zip_map(a, b, "div", |x, y| x / y)
}

/// Multiplies every element by `factor`.
pub fn scale<T: Scalar>(a: &Array<T>, factor: T) -> Array<T> {
    a.map(|v| v * factor)
}

/// `acc += b`, in place.
pub fn add_assign<T: Scalar>(acc: &mut Array<T>, b: &Array<T>) -> Result<(), WengertError> {
    if acc.shape() != b.shape() {
        return Err(WengertError::shape_mismatch(
            "accumulate",
            acc.shape(),
            b.shape(),
        ));
    }
    for (x, &y) in acc.data.iter_mut().zip(b.as_slice()) {
        *x += y;
    }
    Ok(())
}
