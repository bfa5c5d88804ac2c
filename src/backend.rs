//! Backend selection.
//!
//! A [`Backend`] picks which [`VectorUnit`] the kernels run on. The choice is
//! made at build time through the `simd` feature and at load time through
//! `pulp`'s instruction-set detection; every operation of the crate is also
//! available as a method on [`Backend`] so callers can pin a strategy (for
//! example to reproduce a result with a fixed emulated width).

use crate::scalar::ScalarUnit;
use crate::vector::VectorUnit;
use crate::Result;
use std::sync::OnceLock;

/// An operation generic over the vector unit it runs on.
///
/// This is the seam between the kernels, which are written once against
/// [`VectorUnit`], and the backends, which decide what `V` is.
pub trait WithUnit {
    type Output;

    fn with_unit<V: VectorUnit>(self, unit: V) -> Self::Output;
}

/// Interchangeable kernel implementations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Registers of the widest instruction set detected at runtime.
    #[cfg(feature = "simd")]
    Simd,
    /// Portable lane arrays with a fixed emulated width.
    Scalar(ScalarUnit),
}

impl Default for Backend {
    fn default() -> Self {
        Self::detect()
    }
}

impl Backend {
    /// The preferred backend for this build.
    pub fn detect() -> Self {
        #[cfg(feature = "simd")]
        {
            Backend::Simd
        }
        #[cfg(not(feature = "simd"))]
        {
            Backend::Scalar(ScalarUnit::default())
        }
    }

    /// A scalar backend emulating a vector unit of `vlmax` lanes.
    pub fn scalar(vlmax: usize) -> Result<Self> {
        let unit = ScalarUnit::new(vlmax)?;
        log::trace!("vlmat: scalar backend with vlmax={vlmax}");
        Ok(Backend::Scalar(unit))
    }

    /// Process-wide backend used by the free functions of this crate.
    ///
    /// Detected once on first use.
    pub fn active() -> Self {
        static ACTIVE: OnceLock<Backend> = OnceLock::new();
        *ACTIVE.get_or_init(|| {
            let backend = Backend::detect();
            log::debug!(
                "vlmat: using {} backend (vlmax={})",
                backend.name(),
                backend.vlmax()
            );
            backend
        })
    }

    /// Run `op` on this backend's vector unit.
    #[inline(always)]
    pub fn run<Op: WithUnit>(self, op: Op) -> Op::Output {
        match self {
            #[cfg(feature = "simd")]
            Backend::Simd => crate::simd::dispatch(op),
            Backend::Scalar(unit) => op.with_unit(unit),
        }
    }

    /// Name of the vector unit this backend resolves to.
    pub fn name(self) -> &'static str {
        struct Name;
        impl WithUnit for Name {
            type Output = &'static str;
            fn with_unit<V: VectorUnit>(self, unit: V) -> &'static str {
                unit.name()
            }
        }
        self.run(Name)
    }

    /// Register width, in `f32` lanes, of the vector unit this backend resolves to.
    pub fn vlmax(self) -> usize {
        struct Vlmax;
        impl WithUnit for Vlmax {
            type Output = usize;
            fn with_unit<V: VectorUnit>(self, unit: V) -> usize {
                unit.vlmax()
            }
        }
        self.run(Vlmax)
    }
}

/// Every backend worth testing against: all emulated widths plus the detected one.
#[cfg(test)]
pub(crate) fn all_backends() -> Vec<Backend> {
    let mut backends: Vec<Backend> = (1..=crate::vector::MAX_LANES)
        .map(|w| Backend::scalar(w).unwrap())
        .collect();
    backends.push(Backend::detect());
    backends
}
