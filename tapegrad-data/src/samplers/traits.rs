use std::fmt::Debug;

/// Defines the order in which a `DataLoader` visits dataset indices.
///
/// `iter` is called once per epoch, so a sampler may return a different
/// order each time.
pub trait Sampler: Debug + Send + Sync {
    /// Returns an iterator over the indices of a dataset of `dataset_len` items.
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Number of indices `iter` yields for a dataset of `dataset_len` items.
    fn len(&self, dataset_len: usize) -> usize;
}
