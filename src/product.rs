//! Matrix-matrix and matrix-vector products.
//!
//! All three kernels reduce to dot products of strips: `matmul` and `matvec`
//! over two contiguous rows, `matvec_transpose` over a column gathered with
//! stride `m` and a contiguous vector.

use crate::vector::{strips, VectorUnit};

#[inline(always)]
fn dot<V: VectorUnit>(unit: V, x: &[f32], y: &[f32]) -> f32 {
    debug_assert_eq!(x.len(), y.len());
    let mut acc = unit.splat(0.0);
    for r in strips(unit, x.len()) {
        let vx = unit.load(&x[r.clone()], 0.0);
        let vy = unit.load(&y[r], 0.0);
        acc = unit.mul_add(vx, vy, acc);
    }
    unit.reduce_sum(acc)
}

/// `C[i][j] = sum_k A[i][k] * B[j][k]` with A `n x o`, B `m x o`, C `n x m`.
///
/// Both operands are walked along their rows, so this is `A * B^T`.
#[inline(always)]
pub(crate) fn matmul<V: VectorUnit>(
    unit: V,
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
    n: usize,
    m: usize,
    o: usize,
) {
    let a = &a[..n * o];
    let b = &b[..m * o];
    let c = &mut c[..n * m];
    for i in 0..n {
        let row_a = &a[i * o..(i + 1) * o];
        for j in 0..m {
            c[i * m + j] = dot(unit, row_a, &b[j * o..(j + 1) * o]);
        }
    }
}

/// `c[i] = dot(row_i(A), b)` with A `n x m` row-major.
#[inline(always)]
pub(crate) fn matvec<V: VectorUnit>(
    unit: V,
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
    n: usize,
    m: usize,
) {
    let a = &a[..n * m];
    let b = &b[..m];
    for (i, ci) in c[..n].iter_mut().enumerate() {
        *ci = dot(unit, &a[i * m..(i + 1) * m], b);
    }
}

/// `c[i] = dot(col_i(A), b)` with A `n x m` row-major, i.e. `A^T * b`.
///
/// Columns are gathered with stride `m`; the transpose is never formed.
#[inline(always)]
pub(crate) fn matvec_transpose<V: VectorUnit>(
    unit: V,
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
    n: usize,
    m: usize,
) {
    let a = &a[..n * m];
    let b = &b[..n];
    for (i, ci) in c[..m].iter_mut().enumerate() {
        let mut acc = unit.splat(0.0);
        for r in strips(unit, n) {
            let va = unit.load_strided(&a[r.start * m + i..], m, r.len(), 0.0);
            let vb = unit.load(&b[r], 0.0);
            acc = unit.mul_add(va, vb, acc);
        }
        *ci = unit.reduce_sum(acc);
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::all_backends;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_matrix(len: usize, seed: u64) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| rng.gen_range(-1.0f32..1.0)).collect()
    }

    fn matmul_reference(a: &[f32], b: &[f32], n: usize, m: usize, o: usize) -> Vec<f64> {
        let mut c = vec![0.0f64; n * m];
        for i in 0..n {
            for j in 0..m {
                for k in 0..o {
                    c[i * m + j] += a[i * o + k] as f64 * b[j * o + k] as f64;
                }
            }
        }
        c
    }

    #[test]
    fn test_matmul_row_times_row() {
        for backend in all_backends() {
            for (n, m, o) in [(1, 1, 1), (2, 3, 4), (5, 2, 17), (3, 3, 33), (4, 7, 9)] {
                let a = random_matrix(n * o, 11);
                let b = random_matrix(m * o, 12);
                let mut c = vec![0.0; n * m];
                backend.matmul(&a, &b, &mut c, n, m, o);
                let expected = matmul_reference(&a, &b, n, m, o);
                for (x, y) in c.iter().zip(&expected) {
                    assert_relative_eq!(*x as f64, *y, epsilon = 1e-5, max_relative = 1e-5);
                }
            }
        }
    }

    #[test]
    fn test_matmul_is_not_row_times_column() {
        // A = [[1, 2], [3, 4]], B = [[5, 6], [7, 8]]
        // A * B^T = [[17, 23], [39, 53]] whereas A * B = [[19, 22], [43, 50]]
        let a = [1.0f32, 2.0, 3.0, 4.0];
        let b = [5.0f32, 6.0, 7.0, 8.0];
        for backend in all_backends() {
            let mut c = [0.0f32; 4];
            backend.matmul(&a, &b, &mut c, 2, 2, 2);
            assert_eq!(c, [17.0, 23.0, 39.0, 53.0]);
        }
    }

    #[test]
    fn test_matmul_inner_dim_one_is_outer_product() {
        let a = [1.0f32, -2.0, 3.0];
        let b = [4.0f32, 0.5];
        for backend in all_backends() {
            let mut c = [0.0f32; 6];
            backend.matmul(&a, &b, &mut c, 3, 2, 1);
            assert_eq!(c, [4.0, 0.5, -8.0, -1.0, 12.0, 1.5]);
        }
    }

    #[test]
    fn test_matmul_empty_inner_dim_gives_zeros() {
        for backend in all_backends() {
            let mut c = [9.0f32; 4];
            backend.matmul(&[], &[], &mut c, 2, 2, 0);
            assert_eq!(c, [0.0; 4]);
        }
    }

    #[test]
    fn test_matvec() {
        for backend in all_backends() {
            for (n, m) in [(1, 1), (2, 2), (3, 19), (8, 5), (6, 32)] {
                let a = random_matrix(n * m, 13);
                let b = random_matrix(m, 14);
                let mut c = vec![0.0; n];
                backend.matvec(&a, &b, &mut c, n, m);
                for i in 0..n {
                    let expected: f64 = (0..m).map(|k| a[i * m + k] as f64 * b[k] as f64).sum();
                    assert_relative_eq!(c[i] as f64, expected, epsilon = 1e-5);
                }
            }
        }
    }

    #[test]
    fn test_matvec_transpose() {
        for backend in all_backends() {
            for (n, m) in [(1, 1), (2, 2), (19, 3), (5, 8), (33, 6), (4, 1), (1, 4)] {
                let a = random_matrix(n * m, 15);
                let b = random_matrix(n, 16);
                let mut c = vec![0.0; m];
                backend.matvec_transpose(&a, &b, &mut c, n, m);
                for i in 0..m {
                    let expected: f64 = (0..n).map(|k| a[k * m + i] as f64 * b[k] as f64).sum();
                    assert_relative_eq!(c[i] as f64, expected, epsilon = 1e-5);
                }
            }
        }
    }

    #[test]
    fn test_matvec_transpose_docs_example() {
        // 3x4 row-major, columns are [1,5,9], [2,6,8], [3,7,7], [4,8,6]
        let a = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 8.0, 7.0, 6.0];
        let b = [1.0f32, 0.0, -1.0];
        for backend in all_backends() {
            let mut c = [0.0f32; 4];
            backend.matvec_transpose(&a, &b, &mut c, 3, 4);
            assert_eq!(c, [-8.0, -6.0, -4.0, -2.0]);
        }
    }
}
