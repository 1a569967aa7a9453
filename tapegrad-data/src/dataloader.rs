//! # DataLoader
//!
//! Groups dataset samples into mini-batches ready for a model.
//!
//! ```rust
//! use tapegrad_data::{DataLoader, DataLoaderConfig, InMemoryDataset};
//!
//! let dataset = InMemoryDataset::new(
//!     vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]],
//!     vec![1, 1, 0],
//! )
//! .unwrap();
//! let config = DataLoaderConfig { batch_size: 2, ..DataLoaderConfig::default() };
//! let loader = DataLoader::new(dataset, config).unwrap();
//! for batch in loader.iter() {
//!     let batch = batch.unwrap();
//!     assert_eq!(batch.inputs.shape()[1], 2);
//! }
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;
use tapegrad_core::{TapeGradError, Tensor};

use crate::datasets::{Dataset, Sample};
use crate::samplers::{RandomSampler, Sampler, SequentialSampler};

/// Options of a [`DataLoader`].
#[derive(Debug, Clone, PartialEq)]
pub struct DataLoaderConfig {
    pub batch_size: usize,
    /// Visit samples in a fresh random order every epoch.
    pub shuffle: bool,
    /// Skip the last batch when it holds fewer than `batch_size` samples.
    pub drop_last: bool,
    /// Seed of the shuffling generator. Ignored unless `shuffle` is set.
    pub seed: Option<u64>,
}

impl Default for DataLoaderConfig {
    fn default() -> Self {
        DataLoaderConfig {
            batch_size: 1,
            shuffle: false,
            drop_last: false,
            seed: None,
        }
    }
}

/// A collated mini-batch.
#[derive(Debug, Clone)]
pub struct Batch {
    /// `[batch, num_features]`, not requiring gradients.
    pub inputs: Tensor,
    pub labels: Vec<usize>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Batches the samples of a dataset in the order chosen by a [`Sampler`].
///
/// [`DataLoader::iter`] starts a new epoch each time it is called; batches are
/// fetched lazily as the returned iterator is advanced.
#[derive(Debug)]
pub struct DataLoader<D: Dataset<Item = Sample>> {
    dataset: D,
    config: DataLoaderConfig,
    sampler: Box<dyn Sampler>,
    epoch: AtomicUsize,
}

impl<D: Dataset<Item = Sample>> DataLoader<D> {
    /// Builds a loader using a sequential or random sampler according to
    /// `config.shuffle`.
    ///
    /// # Errors
    /// `InvalidHyperParameter` if `batch_size` is 0.
    pub fn new(dataset: D, config: DataLoaderConfig) -> Result<Self, TapeGradError> {
        let sampler: Box<dyn Sampler> = match (config.shuffle, config.seed) {
            (false, _) => Box::new(SequentialSampler::new()),
            (true, Some(seed)) => Box::new(RandomSampler::seeded(false, None, seed)),
            (true, None) => Box::new(RandomSampler::new(false, None)),
        };
        Self::with_sampler(dataset, config, sampler)
    }

    /// Builds a loader with an explicit sampler; `config.shuffle` and
    /// `config.seed` are ignored.
    pub fn with_sampler(dataset: D, config: DataLoaderConfig, sampler: Box<dyn Sampler>) -> Result<Self, TapeGradError> {
        if config.batch_size == 0 {
            return Err(TapeGradError::InvalidHyperParameter {
                name: "batch_size".to_string(),
                value: 0.0,
            });
        }
        Ok(DataLoader {
            dataset,
            config,
            sampler,
            epoch: AtomicUsize::new(0),
        })
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn config(&self) -> &DataLoaderConfig {
        &self.config
    }

    /// Number of epochs started so far.
    pub fn epochs_started(&self) -> usize {
        self.epoch.load(Ordering::Relaxed)
    }

    /// Number of batches one epoch yields.
    pub fn num_batches(&self) -> usize {
        let samples = self.sampler.len(self.dataset.len());
        if self.config.drop_last {
            samples / self.config.batch_size
        } else {
            samples.div_ceil(self.config.batch_size)
        }
    }

    /// Starts a new epoch.
    pub fn iter(&self) -> Batches<'_, D> {
        let epoch = self.epoch.fetch_add(1, Ordering::Relaxed);
        debug!(
            "DataLoader epoch {}: {} samples, {} batches of up to {}",
            epoch,
            self.sampler.len(self.dataset.len()),
            self.num_batches(),
            self.config.batch_size
        );
        Batches {
            loader: self,
            indices: self.sampler.iter(self.dataset.len()),
        }
    }
}

impl<'a, D: Dataset<Item = Sample>> IntoIterator for &'a DataLoader<D> {
    type Item = Result<Batch, TapeGradError>;
    type IntoIter = Batches<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the batches of one epoch.
pub struct Batches<'a, D: Dataset<Item = Sample>> {
    loader: &'a DataLoader<D>,
    indices: Box<dyn Iterator<Item = usize> + Send + Sync>,
}

impl<D: Dataset<Item = Sample>> Iterator for Batches<'_, D> {
    type Item = Result<Batch, TapeGradError>;

    fn next(&mut self) -> Option<Self::Item> {
        let batch_size = self.loader.config.batch_size;
        let indices: Vec<usize> = self.indices.by_ref().take(batch_size).collect();
        if indices.is_empty() || (self.loader.config.drop_last && indices.len() < batch_size) {
            return None;
        }
        Some(collate(&self.loader.dataset, &indices))
    }
}

/// Stacks the samples at `indices` into one `[batch, num_features]` tensor.
fn collate<D: Dataset<Item = Sample>>(dataset: &D, indices: &[usize]) -> Result<Batch, TapeGradError> {
    let mut inputs = Vec::new();
    let mut labels = Vec::with_capacity(indices.len());
    let mut width = None;
    for &index in indices {
        let sample = dataset.get(index)?;
        let expected = *width.get_or_insert(sample.features.len());
        if sample.features.len() != expected {
            return Err(TapeGradError::ShapeMismatch {
                expected: vec![expected],
                actual: vec![sample.features.len()],
                operation: "DataLoader collate".to_string(),
            });
        }
        inputs.extend(sample.features);
        labels.push(sample.label);
    }
    let inputs = Tensor::new(inputs, vec![indices.len(), width.unwrap_or(0)])?;
    Ok(Batch { inputs, labels })
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
