use tapegrad_core::TapeGradError;

use super::traits::{Dataset, Sample};

/// Labelled feature rows held in one contiguous row-major buffer.
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    features: Vec<f64>,
    labels: Vec<usize>,
    num_features: usize,
}

impl InMemoryDataset {
    /// Builds a dataset from one feature row per label.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the number of rows differs from the number
    /// of labels or the rows are not all the same width.
    pub fn new(rows: Vec<Vec<f64>>, labels: Vec<usize>) -> Result<Self, TapeGradError> {
        if rows.len() != labels.len() {
            return Err(TapeGradError::ShapeMismatch {
                expected: vec![labels.len()],
                actual: vec![rows.len()],
                operation: "InMemoryDataset::new".to_string(),
            });
        }
        let num_features = rows.first().map_or(0, Vec::len);
        let mut features = Vec::with_capacity(rows.len() * num_features);
        for row in rows {
            if row.len() != num_features {
                return Err(TapeGradError::ShapeMismatch {
                    expected: vec![num_features],
                    actual: vec![row.len()],
                    operation: "InMemoryDataset::new".to_string(),
                });
            }
            features.extend(row);
        }
        Ok(InMemoryDataset {
            features,
            labels,
            num_features,
        })
    }

    /// Builds a dataset from an already flattened `[labels.len(), num_features]` buffer.
    pub fn from_flat(features: Vec<f64>, num_features: usize, labels: Vec<usize>) -> Result<Self, TapeGradError> {
        if features.len() != labels.len() * num_features {
            return Err(TapeGradError::TensorCreationError {
                data_len: features.len(),
                shape: vec![labels.len(), num_features],
            });
        }
        Ok(InMemoryDataset {
            features,
            labels,
            num_features,
        })
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// One more than the largest label, or 0 when empty.
    pub fn num_classes(&self) -> usize {
        self.labels.iter().max().map_or(0, |&m| m + 1)
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }
}

impl Dataset for InMemoryDataset {
    type Item = Sample;

    fn get(&self, index: usize) -> Result<Sample, TapeGradError> {
        if index >= self.labels.len() {
            return Err(TapeGradError::IndexOutOfBounds {
                index,
                len: self.labels.len(),
            });
        }
        let start = index * self.num_features;
        Ok(Sample {
            features: self.features[start..start + self.num_features].to_vec(),
            label: self.labels[index],
        })
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
#[path = "in_memory_test.rs"]
mod tests;
