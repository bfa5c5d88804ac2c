//! Out-of-place transpose.

use crate::vector::{strips, VectorUnit};

/// `b = a^T` with `a` an `n x m` and `b` an `m x n` row-major matrix.
///
/// Column `j` of `a` is gathered with stride `m` and stored as row `j` of `b`,
/// one strip at a time.
#[inline(always)]
pub(crate) fn transpose<V: VectorUnit>(unit: V, a: &[f32], b: &mut [f32], n: usize, m: usize) {
    let a = &a[..n * m];
    let b = &mut b[..n * m];
    for j in 0..m {
        let row_b = &mut b[j * n..(j + 1) * n];
        for r in strips(unit, n) {
            let col = unit.load_strided(&a[r.start * m + j..], m, r.len(), 0.0);
            unit.store(&mut row_b[r], col);
        }
    }
}
