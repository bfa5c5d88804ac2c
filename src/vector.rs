//! Variable-length vector unit abstraction.
//!
//! A [`VectorUnit`] answers the capability query "how many elements can one
//! step process when `avl` elements remain" ([`VectorUnit::setvl`]) and
//! provides register primitives addressed by that step length. Every kernel in
//! this crate is written as a strip-mined loop over [`strips`]:
//!
//! ```text
//! remaining = len, offset = 0
//! while remaining > 0:
//!     vl = setvl(remaining)
//!     process elements [offset, offset + vl)
//!     remaining -= vl, offset += vl
//! ```
//!
//! The last strip is shorter than [`VectorUnit::vlmax`] whenever `len` is not
//! a multiple of the width. Loads of a short strip fill the inactive lanes with
//! a caller-chosen neutral value and stores only write the active lanes.

use std::ops::Range;

/// Upper bound on the lane count of any vector unit (AVX-512 holds 16 `f32`).
pub const MAX_LANES: usize = 16;

/// A data-parallel execution unit over `f32` lanes.
///
/// Implementations are cheap `Copy` handles; all methods take `self` by value
/// so kernels can capture the unit in closures.
pub trait VectorUnit: Copy {
    /// One vector register.
    type Reg: Copy;

    /// Short human-readable name, used in logs.
    fn name(self) -> &'static str;

    /// Number of lanes in one register.
    fn vlmax(self) -> usize;

    /// Number of elements the next step processes when `avl` elements remain.
    ///
    /// Returns a value in `1..=min(avl, vlmax)` for `avl > 0`.
    #[inline(always)]
    fn setvl(self, avl: usize) -> usize {
        avl.min(self.vlmax())
    }

    /// Broadcast `value` to every lane.
    fn splat(self, value: f32) -> Self::Reg;

    /// Load `src.len() <= vlmax` contiguous elements; inactive lanes hold `fill`.
    fn load(self, src: &[f32], fill: f32) -> Self::Reg;

    /// Gather `vl` elements `src[0], src[stride], ..., src[(vl - 1) * stride]`;
    /// inactive lanes hold `fill`.
    fn load_strided(self, src: &[f32], stride: usize, vl: usize, fill: f32) -> Self::Reg;

    /// Store the first `dst.len() <= vlmax` lanes of `v`.
    fn store(self, dst: &mut [f32], v: Self::Reg);

    fn add(self, a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn sub(self, a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn mul(self, a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn min(self, a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn max(self, a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn neg(self, a: Self::Reg) -> Self::Reg;

    /// `a * b + acc`, fused where the hardware supports it.
    fn mul_add(self, a: Self::Reg, b: Self::Reg, acc: Self::Reg) -> Self::Reg;

    /// `|a|` with the sign bit cleared, so `|-0.0|` is `+0.0`.
    fn abs(self, a: Self::Reg) -> Self::Reg;

    /// Sum of all lanes.
    fn reduce_sum(self, v: Self::Reg) -> f32;

    /// Maximum over all lanes.
    fn reduce_max(self, v: Self::Reg) -> f32;

    /// Minimum over all lanes.
    fn reduce_min(self, v: Self::Reg) -> f32;
}

/// Iterator over the strips of a capability-queried loop.
///
/// Each item is the index range one vector step covers.
#[derive(Clone, Debug)]
pub struct Strips<V> {
    unit: V,
    remaining: usize,
    offset: usize,
}

impl<V: VectorUnit> Iterator for Strips<V> {
    type Item = Range<usize>;

    #[inline(always)]
    fn next(&mut self) -> Option<Range<usize>> {
        if self.remaining == 0 {
            return None;
        }
        let vl = self.unit.setvl(self.remaining);
        debug_assert!(vl > 0 && vl <= self.remaining, "setvl returned {vl}");
        let start = self.offset;
        self.remaining -= vl;
        self.offset += vl;
        Some(start..self.offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.remaining == 0 {
            return (0, Some(0));
        }
        let vlmax = self.unit.vlmax().max(1);
        (self.remaining.div_ceil(vlmax), Some(self.remaining))
    }
}

/// Split `len` elements into the strips `unit` processes one step at a time.
#[inline(always)]
pub fn strips<V: VectorUnit>(unit: V, len: usize) -> Strips<V> {
    Strips {
        unit,
        remaining: len,
        offset: 0,
    }
}
