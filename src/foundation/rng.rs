//! Explicit random sources.
//!
//! Every stochastic step takes a `&mut R where R: Rng + ?Sized` handle instead of touching a
//! process-wide generator, so a caller that seeds its own [`PasteRng`] gets reproducible output
//! and worker threads never share generator state.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::foundation::math::Fnv1a64;

/// Generator used by the batch pipeline and the CLI.
pub type PasteRng = ChaCha8Rng;

/// Build a [`PasteRng`] from a 64-bit seed.
pub fn rng_from_seed(seed: u64) -> PasteRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Derive the seed for item `index` of a batch seeded with `base_seed`.
pub fn derive_item_seed(base_seed: u64, index: u64) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u64(base_seed);
    h.write_u64(index);
    h.finish()
}

/// Draw a uniform `[0, 1)` value and report whether it fell below `p`.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.r#gen::<f64>() < p
}

/// Uniform integer in `[low, high)`; an empty range yields `low`.
pub fn uniform_u32_or_low<R: Rng + ?Sized>(rng: &mut R, low: u32, high: u32) -> u32 {
    if high <= low {
        return low;
    }
    rng.gen_range(low..high)
}

/// Uniform integer in `[low, high]`; an inverted range yields `low`.
pub fn uniform_u32_inclusive<R: Rng + ?Sized>(rng: &mut R, low: u32, high: u32) -> u32 {
    if high <= low {
        return low;
    }
    rng.gen_range(low..=high)
}

/// Uniform float in `[low, high]`; a collapsed range yields `low`.
pub fn uniform_f64<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high <= low {
        return low;
    }
    rng.gen_range(low..=high)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
