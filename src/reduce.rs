//! Full reductions: max, min and Euclidean norm.
//!
//! Each kernel keeps a vector accumulator across strips and collapses it to a
//! scalar once at the end. Short strips load their inactive lanes with the
//! identity of the reduction so they never affect the result.

use crate::vector::{strips, VectorUnit};

#[inline(always)]
fn fold<V: VectorUnit>(
    unit: V,
    a: &[f32],
    identity: f32,
    step: impl Fn(V::Reg, V::Reg) -> V::Reg,
) -> V::Reg {
    let mut acc = unit.splat(identity);
    for r in strips(unit, a.len()) {
        acc = step(acc, unit.load(&a[r], identity));
    }
    acc
}

/// Largest of the `n * m` elements of `a`; `-inf` when the matrix is empty.
#[inline(always)]
pub(crate) fn maxcoeff<V: VectorUnit>(unit: V, a: &[f32], n: usize, m: usize) -> f32 {
    let a = &a[..n * m];
    debug_assert!(!a.is_empty(), "maxcoeff of an empty matrix");
    let acc = fold(unit, a, f32::NEG_INFINITY, |acc, x| unit.max(acc, x));
    unit.reduce_max(acc)
}

/// Smallest of the `n * m` elements of `a`; `+inf` when the matrix is empty.
#[inline(always)]
pub(crate) fn mincoeff<V: VectorUnit>(unit: V, a: &[f32], n: usize, m: usize) -> f32 {
    let a = &a[..n * m];
    debug_assert!(!a.is_empty(), "mincoeff of an empty matrix");
    let acc = fold(unit, a, f32::INFINITY, |acc, x| unit.min(acc, x));
    unit.reduce_min(acc)
}

#[inline(always)]
pub(crate) fn matnorm<V: VectorUnit>(unit: V, a: &[f32], n: usize, m: usize) -> f32 {
    let a = &a[..n * m];
    let acc = fold(unit, a, 0.0, |acc, x| unit.mul_add(x, x, acc));
    unit.reduce_sum(acc).sqrt()
}
