use crate::error::SplitError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Disjoint train/dev index sets covering `[0, total)` exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexSplit {
    pub train: Vec<usize>,
    pub dev: Vec<usize>,
}

impl IndexSplit {
    pub fn total(&self) -> usize {
        self.train.len() + self.dev.len()
    }
}

/// `floor(total * dev_ratio)`.
pub fn dev_size(total: usize, dev_ratio: f64) -> usize {
    ((total as f64) * dev_ratio).floor() as usize
}

/// Split `[0, total)` with a uniform permutation drawn from `rng`.
///
/// The first `total - dev_size` permuted indices go to train, the rest to dev.
pub fn partition_with_rng<R: Rng + ?Sized>(
    total: usize,
    dev_ratio: f64,
    rng: &mut R,
) -> Result<IndexSplit, SplitError> {
    if !(dev_ratio > 0.0 && dev_ratio < 1.0) {
        return Err(SplitError::InvalidRatio(dev_ratio));
    }

    let mut permutation: Vec<usize> = (0..total).collect();
    permutation.shuffle(rng);

    let train_size = total - dev_size(total, dev_ratio);
    let dev = permutation.split_off(train_size);
    Ok(IndexSplit {
        train: permutation,
        dev,
    })
}

/// Seeded convenience wrapper around [`partition_with_rng`].
pub fn partition(total: usize, dev_ratio: f64, seed: u64) -> Result<IndexSplit, SplitError> {
    let mut rng = StdRng::seed_from_u64(seed);
    partition_with_rng(total, dev_ratio, &mut rng)
}
