use super::Array;
use crate::error::WengertError;
use crate::ops::traits::Scalar;

/// Linear-algebra product `a · b`. Requires `a.cols() == b.rows()`.
pub fn matmul<T: Scalar>(a: &Array<T>, b: &Array<T>) -> Result<Array<T>, WengertError> {
    if a.cols() != b.rows() {
        return Err(WengertError::shape_mismatch(
            "matmul",
            (a.cols(), b.cols()),
            b.shape(),
        ));
    }
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let a_data = a.as_slice();
    let b_data = b.as_slice();
    let mut out = vec![T::zero(); m * n];
    // i-k-j order keeps the inner loop on contiguous rows of `b` and `out`.
    for i in 0..m {
        for p in 0..k {
            let a_ip = a_data[i * k + p];
            let b_row = &b_data[p * n..(p + 1) * n];
            let out_row = &mut out[i * n..(i + 1) * n];
            for (o, &b_pj) in out_row.iter_mut().zip(b_row) {
                *o += a_ip * b_pj;
            }
        }
    }
    Array::from_vec(m, n, out)
}
