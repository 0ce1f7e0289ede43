//! Batch generation over many backgrounds.

use image::{RgbImage, RgbaImage};
use rayon::prelude::*;

use crate::compose::compositor::{Composite, Compositor};
use crate::foundation::error::{PasteError, PasteResult};
use crate::foundation::rng::{derive_item_seed, rng_from_seed};

/// One background to composite onto.
#[derive(Clone, Debug)]
pub struct BatchItem {
    /// Id stamped into the annotation; also keys the item's generator.
    pub image_id: u64,
    /// Background pixels.
    pub background: RgbImage,
}

#[derive(Clone, Debug)]
/// Seeding and threading controls for [`generate_batch`].
pub struct BatchOpts {
    /// Base seed; item generators are derived from it and the item's image id.
    pub seed: u64,
    /// Enable parallel generation when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for BatchOpts {
    fn default() -> Self {
        Self {
            seed: 0,
            parallel: false,
            threads: None,
        }
    }
}

/// Composite `object` onto every item's background.
///
/// Each item owns a generator seeded from `(opts.seed, image_id)`, so output is identical
/// in serial and parallel mode and does not depend on the thread count. Results come back
/// in item order; the first failure aborts the batch.
pub fn generate_batch(
    compositor: &Compositor,
    items: Vec<BatchItem>,
    object: &RgbaImage,
    opts: &BatchOpts,
) -> PasteResult<Vec<Composite>> {
    let run = |item: BatchItem| -> PasteResult<Composite> {
        let mut rng = rng_from_seed(derive_item_seed(opts.seed, item.image_id));
        compositor.composite(&mut rng, item.background, object, item.image_id)
    };

    if !opts.parallel {
        return items.into_iter().map(run).collect();
    }

    let pool = build_thread_pool(opts.threads)?;
    let n = items.len();
    let out = pool.install(|| items.into_par_iter().map(run).collect::<PasteResult<Vec<_>>>())?;
    tracing::info!(items = n, threads = pool.current_num_threads(), "batch done");
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> PasteResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PasteError::configuration(
            "batch 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PasteError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
