//! Elementwise kernels.
//!
//! Output element `i` depends only on input element(s) `i`, so every kernel
//! here has an in-place form that reads and writes one buffer strip by strip.

use crate::vector::{strips, VectorUnit};

// ============================================================================
// Strip loops
// ============================================================================

/// `dst[i] = f(src[i])`
#[inline(always)]
fn map_into<V: VectorUnit>(
    unit: V,
    src: &[f32],
    dst: &mut [f32],
    f: impl Fn(V::Reg) -> V::Reg,
) {
    debug_assert_eq!(src.len(), dst.len());
    for r in strips(unit, dst.len()) {
        let x = unit.load(&src[r.clone()], 0.0);
        unit.store(&mut dst[r], f(x));
    }
}

/// `buf[i] = f(buf[i])`
#[inline(always)]
fn map_inplace<V: VectorUnit>(unit: V, buf: &mut [f32], f: impl Fn(V::Reg) -> V::Reg) {
    for r in strips(unit, buf.len()) {
        let x = unit.load(&buf[r.clone()], 0.0);
        unit.store(&mut buf[r], f(x));
    }
}

/// `dst[i] = f(a[i], b[i])`
#[inline(always)]
fn zip_into<V: VectorUnit>(
    unit: V,
    a: &[f32],
    b: &[f32],
    dst: &mut [f32],
    f: impl Fn(V::Reg, V::Reg) -> V::Reg,
) {
    debug_assert_eq!(a.len(), dst.len());
    debug_assert_eq!(b.len(), dst.len());
    for r in strips(unit, dst.len()) {
        let x = unit.load(&a[r.clone()], 0.0);
        let y = unit.load(&b[r.clone()], 0.0);
        unit.store(&mut dst[r], f(x, y));
    }
}

/// `a[i] = f(a[i], b[i])`
#[inline(always)]
fn zip_inplace<V: VectorUnit>(
    unit: V,
    a: &mut [f32],
    b: &[f32],
    f: impl Fn(V::Reg, V::Reg) -> V::Reg,
) {
    debug_assert_eq!(a.len(), b.len());
    for r in strips(unit, a.len()) {
        let x = unit.load(&a[r.clone()], 0.0);
        let y = unit.load(&b[r.clone()], 0.0);
        unit.store(&mut a[r], f(x, y));
    }
}

// ============================================================================
// Unary
// ============================================================================

#[inline(always)]
pub(crate) fn matneg<V: VectorUnit>(unit: V, a: &[f32], b: &mut [f32], n: usize, m: usize) {
    let len = n * m;
    map_into(unit, &a[..len], &mut b[..len], |x| unit.neg(x));
}

#[inline(always)]
pub(crate) fn matneg_inplace<V: VectorUnit>(unit: V, a: &mut [f32], n: usize, m: usize) {
    map_inplace(unit, &mut a[..n * m], |x| unit.neg(x));
}

#[inline(always)]
pub(crate) fn cwiseabs<V: VectorUnit>(unit: V, a: &[f32], b: &mut [f32], n: usize, m: usize) {
    let len = n * m;
    map_into(unit, &a[..len], &mut b[..len], |x| unit.abs(x));
}

#[inline(always)]
pub(crate) fn cwiseabs_inplace<V: VectorUnit>(unit: V, a: &mut [f32], n: usize, m: usize) {
    map_inplace(unit, &mut a[..n * m], |x| unit.abs(x));
}

#[inline(always)]
pub(crate) fn matmulf<V: VectorUnit>(
    unit: V,
    a: &[f32],
    b: &mut [f32],
    f: f32,
    n: usize,
    m: usize,
) {
    let len = n * m;
    let vf = unit.splat(f);
    map_into(unit, &a[..len], &mut b[..len], |x| unit.mul(x, vf));
}

#[inline(always)]
pub(crate) fn matmulf_inplace<V: VectorUnit>(unit: V, a: &mut [f32], f: f32, n: usize, m: usize) {
    let vf = unit.splat(f);
    map_inplace(unit, &mut a[..n * m], |x| unit.mul(x, vf));
}

#[inline(always)]
pub(crate) fn matcopy<V: VectorUnit>(unit: V, a: &[f32], b: &mut [f32], n: usize, m: usize) {
    let len = n * m;
    map_into(unit, &a[..len], &mut b[..len], |x| x);
}

#[inline(always)]
pub(crate) fn matset<V: VectorUnit>(unit: V, a: &mut [f32], f: f32, n: usize, m: usize) {
    let a = &mut a[..n * m];
    let vf = unit.splat(f);
    for r in strips(unit, a.len()) {
        unit.store(&mut a[r], vf);
    }
}

/// `a[i] = f[i]`: a copy with the destination first.
#[inline(always)]
pub(crate) fn matsetv<V: VectorUnit>(unit: V, a: &mut [f32], f: &[f32], n: usize, m: usize) {
    matcopy(unit, f, a, n, m);
}

// ============================================================================
// Binary
// ============================================================================

macro_rules! binary_kernels {
    ($($name:ident / $inplace:ident => $op:ident;)*) => {
        $(
            #[inline(always)]
            pub(crate) fn $name<V: VectorUnit>(
                unit: V,
                a: &[f32],
                b: &[f32],
                c: &mut [f32],
                n: usize,
                m: usize,
            ) {
                let len = n * m;
                zip_into(unit, &a[..len], &b[..len], &mut c[..len], |x, y| unit.$op(x, y));
            }

            #[inline(always)]
            pub(crate) fn $inplace<V: VectorUnit>(
                unit: V,
                a: &mut [f32],
                b: &[f32],
                n: usize,
                m: usize,
            ) {
                let len = n * m;
                zip_inplace(unit, &mut a[..len], &b[..len], |x, y| unit.$op(x, y));
            }
        )*
    };
}

binary_kernels! {
    cwisemin / cwisemin_inplace => min;
    cwisemax / cwisemax_inplace => max;
    cwisemul / cwisemul_inplace => mul;
    matadd / matadd_inplace => add;
    matsub / matsub_inplace => sub;
}

/// `b[i] = a[i] - b[i]`, the `c == b` aliasing of `matsub`.
#[inline(always)]
pub(crate) fn matsub_rev_inplace<V: VectorUnit>(
    unit: V,
    a: &[f32],
    b: &mut [f32],
    n: usize,
    m: usize,
) {
    let len = n * m;
    zip_inplace(unit, &mut b[..len], &a[..len], |y, x| unit.sub(x, y));
}

#[cfg(test)]
mod tests {
    use crate::backend::all_backends;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_matrix(len: usize, seed: u64) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| rng.gen_range(-4.0f32..4.0)).collect()
    }

    const SHAPES: [(usize, usize); 6] = [(1, 1), (1, 3), (2, 5), (4, 4), (3, 11), (9, 7)];

    #[test]
    fn test_matneg_double_negation_is_exact() {
        for backend in all_backends() {
            for (n, m) in SHAPES {
                let a = random_matrix(n * m, 1);
                let mut b = vec![0.0; n * m];
                let mut c = vec![0.0; n * m];
                backend.matneg(&a, &mut b, n, m);
                for (x, y) in a.iter().zip(&b) {
                    assert_eq!(*y, -*x);
                }
                backend.matneg(&b, &mut c, n, m);
                assert_eq!(a, c, "{backend:?} {n}x{m}");
            }
        }
    }

    #[test]
    fn test_unary_inplace_matches_out_of_place() {
        for backend in all_backends() {
            for (n, m) in SHAPES {
                let a = random_matrix(n * m, 2);
                let mut out = vec![0.0; n * m];

                let mut inplace = a.clone();
                backend.matneg(&a, &mut out, n, m);
                backend.matneg_inplace(&mut inplace, n, m);
                assert_eq!(out, inplace);

                let mut inplace = a.clone();
                backend.cwiseabs(&a, &mut out, n, m);
                backend.cwiseabs_inplace(&mut inplace, n, m);
                assert_eq!(out, inplace);

                let mut inplace = a.clone();
                backend.matmulf(&a, &mut out, -2.5, n, m);
                backend.matmulf_inplace(&mut inplace, -2.5, n, m);
                assert_eq!(out, inplace);
            }
        }
    }

    #[test]
    fn test_cwiseabs_and_matmulf_values() {
        let a = [-1.0f32, 2.0, -3.5, 0.0, 7.25];
        for backend in all_backends() {
            let mut b = [0.0f32; 5];
            backend.cwiseabs(&a, &mut b, 5, 1);
            assert_eq!(b, [1.0, 2.0, 3.5, 0.0, 7.25]);
            backend.matmulf(&a, &mut b, 2.0, 1, 5);
            assert_eq!(b, [-2.0, 4.0, -7.0, 0.0, 14.5]);
        }
    }

    #[test]
    fn test_cwiseabs_clears_sign_of_zero() {
        let a = [0.0f32, -0.0, -0.0, 0.0, -1.0, -0.0, 0.0, -0.0, -0.0, 3.0, 0.0];
        for backend in all_backends() {
            let mut b = [f32::NAN; 11];
            backend.cwiseabs(&a, &mut b, 11, 1);
            let mut inplace = a;
            backend.cwiseabs_inplace(&mut inplace, 1, 11);
            for i in 0..a.len() {
                assert!(!b[i].is_sign_negative(), "{backend:?} |{}| at {i}", a[i]);
                assert_eq!(b[i].to_bits(), a[i].abs().to_bits(), "{backend:?} at {i}");
                assert_eq!(inplace[i].to_bits(), b[i].to_bits(), "{backend:?} at {i}");
            }
        }
    }

    #[test]
    fn test_cwisemax_of_negation_is_abs() {
        for backend in all_backends() {
            for (n, m) in SHAPES {
                let a = random_matrix(n * m, 3);
                let mut neg = vec![0.0; n * m];
                let mut max = vec![0.0; n * m];
                let mut abs = vec![0.0; n * m];
                backend.matneg(&a, &mut neg, n, m);
                backend.cwisemax(&a, &neg, &mut max, n, m);
                backend.cwiseabs(&a, &mut abs, n, m);
                assert_eq!(max, abs);
            }
        }
    }

    #[test]
    fn test_binary_ops() {
        for backend in all_backends() {
            for (n, m) in SHAPES {
                let a = random_matrix(n * m, 4);
                let b = random_matrix(n * m, 5);
                let mut c = vec![0.0; n * m];

                backend.cwisemin(&a, &b, &mut c, n, m);
                for i in 0..n * m {
                    assert_eq!(c[i], a[i].min(b[i]));
                }
                backend.cwisemax(&a, &b, &mut c, n, m);
                for i in 0..n * m {
                    assert_eq!(c[i], a[i].max(b[i]));
                }
                backend.cwisemul(&a, &b, &mut c, n, m);
                for i in 0..n * m {
                    assert_eq!(c[i], a[i] * b[i]);
                }
                backend.matadd(&a, &b, &mut c, n, m);
                for i in 0..n * m {
                    assert_eq!(c[i], a[i] + b[i]);
                }
                backend.matsub(&a, &b, &mut c, n, m);
                for i in 0..n * m {
                    assert_eq!(c[i], a[i] - b[i]);
                }
            }
        }
    }

    #[test]
    fn test_binary_inplace_forms() {
        for backend in all_backends() {
            for (n, m) in SHAPES {
                let a = random_matrix(n * m, 6);
                let b = random_matrix(n * m, 7);

                let mut c = a.clone();
                backend.matadd_inplace(&mut c, &b, n, m);
                for i in 0..n * m {
                    assert_eq!(c[i], a[i] + b[i]);
                }

                let mut c = a.clone();
                backend.matsub_inplace(&mut c, &b, n, m);
                for i in 0..n * m {
                    assert_eq!(c[i], a[i] - b[i]);
                }

                let mut c = b.clone();
                backend.matsub_rev_inplace(&a, &mut c, n, m);
                for i in 0..n * m {
                    assert_eq!(c[i], a[i] - b[i]);
                }

                let mut c = a.clone();
                backend.cwisemul_inplace(&mut c, &b, n, m);
                for i in 0..n * m {
                    assert_eq!(c[i], a[i] * b[i]);
                }

                let mut c = a.clone();
                backend.cwisemin_inplace(&mut c, &b, n, m);
                for i in 0..n * m {
                    assert_eq!(c[i], a[i].min(b[i]));
                }

                let mut c = a.clone();
                backend.cwisemax_inplace(&mut c, &b, n, m);
                for i in 0..n * m {
                    assert_eq!(c[i], a[i].max(b[i]));
                }
            }
        }
    }

    #[test]
    fn test_add_then_sub_round_trip() {
        for backend in all_backends() {
            let a = random_matrix(37, 8);
            let b = random_matrix(37, 9);
            let mut sum = vec![0.0; 37];
            let mut back = vec![0.0; 37];
            backend.matadd(&a, &b, &mut sum, 37, 1);
            backend.matsub(&sum, &b, &mut back, 37, 1);
            for (x, y) in a.iter().zip(&back) {
                assert_relative_eq!(*x, *y, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_copy_set_setv() {
        for backend in all_backends() {
            let a = random_matrix(21, 10);
            let mut b = vec![0.0; 21];
            backend.matcopy(&a, &mut b, 3, 7);
            assert_eq!(a, b);
            b[0] += 1.0;
            assert_ne!(a[0], b[0]);

            backend.matset(&mut b, 1.5, 7, 3);
            assert!(b.iter().all(|&x| x == 1.5));

            backend.matsetv(&mut b, &a, 7, 3);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_only_leading_elements_touched() {
        for backend in all_backends() {
            let a = [1.0f32; 10];
            let mut b = [0.0f32; 10];
            backend.matcopy(&a, &mut b, 2, 3);
            assert_eq!(&b[..6], &[1.0; 6]);
            assert_eq!(&b[6..], &[0.0; 4]);

            let mut c = [0.0f32; 10];
            backend.matset(&mut c, 4.0, 0, 5);
            assert_eq!(c, [0.0; 10]);
        }
    }

    #[test]
    fn test_empty_is_noop() {
        for backend in all_backends() {
            let mut c: Vec<f32> = Vec::new();
            backend.matadd(&[], &[], &mut c, 0, 4);
            backend.matneg_inplace(&mut c, 3, 0);
            assert!(c.is_empty());
        }
    }
}
