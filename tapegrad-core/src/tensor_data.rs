// src/tensor_data.rs
use std::sync::Arc;

use crate::autograd::OpNode;
use crate::error::TapeGradError;
use crate::tensor::Tensor;

/// Internal storage and metadata for a Tensor.
///
/// It is wrapped in `Arc<RwLock<TensorData>>` by the `Tensor` struct to allow
/// shared ownership and interior mutability of the autograd metadata.
#[derive(Debug)]
pub struct TensorData {
    /// Row-major element buffer. Shared through an `Arc` so operations can
    /// snapshot their operands without holding the lock; writes go through
    /// `Arc::make_mut` (copy-on-write).
    pub(crate) buffer: Arc<Vec<f64>>,
    /// The shape (dimensions) of the tensor. `[]` is a 0-d scalar.
    pub(crate) shape: Vec<usize>,

    /// If true, operations involving this tensor are recorded in the graph.
    pub(crate) requires_grad: bool,
    /// Accumulated gradient. Same shape as the tensor, populated by backward
    /// on leaves only.
    pub(crate) grad: Option<Tensor>,
    /// The node that produced this tensor. Leaf tensors have `grad_fn = None`.
    pub(crate) grad_fn: Option<Arc<OpNode>>,
}

impl TensorData {
    /// Creates a new leaf `TensorData` from row-major data.
    ///
    /// # Errors
    /// Returns `TapeGradError::TensorCreationError` if the length of `data_vec`
    /// does not match the number of elements implied by `shape`.
    pub fn new(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, TapeGradError> {
        let numel: usize = shape.iter().product();
        let data_len = data_vec.len();
        if data_len != numel {
            return Err(TapeGradError::TensorCreationError { data_len, shape });
        }
        Ok(TensorData {
            buffer: Arc::new(data_vec),
            shape,
            requires_grad: false,
            grad: None,
            grad_fn: None,
        })
    }

    /// Number of elements.
    pub fn numel(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.grad_fn.is_none()
    }
}
