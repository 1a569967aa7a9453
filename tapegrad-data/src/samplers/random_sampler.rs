use std::sync::Mutex;

use log::warn;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::traits::Sampler;

/// A sampler that visits dataset indices in random order.
///
/// The generator lives inside the sampler and advances on every call to
/// `iter`, so successive epochs get different permutations. Two samplers
/// built with the same seed produce the same sequence of epochs.
#[derive(Debug)]
pub struct RandomSampler {
    replacement: bool,
    num_samples: Option<usize>,
    rng: Mutex<StdRng>,
}

impl RandomSampler {
    /// # Arguments
    ///
    /// * `replacement`: If `true`, an index can be selected multiple times.
    /// * `num_samples`: Number of indices per epoch. Defaults to the dataset size.
    pub fn new(replacement: bool, num_samples: Option<usize>) -> Self {
        Self::from_rng(replacement, num_samples, StdRng::from_entropy())
    }

    /// Same as [`RandomSampler::new`] with a reproducible generator.
    pub fn seeded(replacement: bool, num_samples: Option<usize>, seed: u64) -> Self {
        Self::from_rng(replacement, num_samples, StdRng::seed_from_u64(seed))
    }

    fn from_rng(replacement: bool, num_samples: Option<usize>, rng: StdRng) -> Self {
        RandomSampler {
            replacement,
            num_samples,
            rng: Mutex::new(rng),
        }
    }
}

impl Sampler for RandomSampler {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        if dataset_len == 0 {
            return Box::new(std::iter::empty());
        }
        let num_samples = self.num_samples.unwrap_or(dataset_len);
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("RandomSampler generator lock was poisoned; recovering it.");
                poisoned.into_inner()
            }
        };

        if self.replacement {
            let indices: Vec<usize> = (0..num_samples).map(|_| rng.gen_range(0..dataset_len)).collect();
            return Box::new(indices.into_iter());
        }
        if num_samples > dataset_len {
            warn!(
                "RandomSampler: num_samples ({}) > dataset_len ({}) without replacement; yielding nothing.",
                num_samples, dataset_len
            );
            return Box::new(std::iter::empty());
        }
        let mut indices: Vec<usize> = (0..dataset_len).collect();
        indices.shuffle(&mut *rng);
        indices.truncate(num_samples);
        Box::new(indices.into_iter())
    }

    /// Matches what `iter` yields: 0 when more indices than the dataset holds
    /// are requested without replacement.
    fn len(&self, dataset_len: usize) -> usize {
        if dataset_len == 0 {
            return 0;
        }
        let num_samples = self.num_samples.unwrap_or(dataset_len);
        if !self.replacement && num_samples > dataset_len {
            return 0;
        }
        num_samples
    }
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
