//! # tapegrad-data
//!
//! Feeds mini-batches to a `tapegrad-core` training loop: a [`Dataset`] of
//! labelled feature rows, a [`Sampler`] choosing the visiting order, and a
//! [`DataLoader`] collating samples into `[batch, features]` tensors.

pub mod dataloader;
pub mod datasets;
pub mod samplers;

pub use dataloader::{Batch, Batches, DataLoader, DataLoaderConfig};
pub use datasets::{Dataset, InMemoryDataset, Sample};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
