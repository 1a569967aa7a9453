// src/tensor/mod.rs

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::TapeGradError;
use crate::tensor_data::TensorData;

mod autograd_methods;
pub mod create;
mod op_methods;

pub mod broadcast_utils;
pub mod utils;

pub use create::{full, ones, ones_like, rand_uniform, randn, scalar, zeros, zeros_like};

/// Represents a multi-dimensional array (tensor) of `f64` values.
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally to allow for:
/// 1.  **Shared Ownership:** cloning a `Tensor` is cheap and yields another
///     handle to the same node of the computation graph.
/// 2.  **Interior Mutability:** autograd metadata (`requires_grad`, `grad`)
///     can be modified through a shared reference. The lock also serialises
///     gradient accumulation into a given tensor.
pub struct Tensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a new leaf Tensor with the given data and shape.
    ///
    /// The tensor does not require gradients; see [`Tensor::create`] or
    /// [`Tensor::requires_grad_`].
    pub fn new(data_vec: Vec<f64>, shape: Vec<usize>) -> Result<Self, TapeGradError> {
        let tensor_data = TensorData::new(data_vec, shape)?;
        Ok(Tensor::from_data(tensor_data))
    }

    /// Creates a new leaf Tensor and sets its `requires_grad` flag.
    pub fn create(
        data_vec: Vec<f64>,
        shape: Vec<usize>,
        requires_grad: bool,
    ) -> Result<Self, TapeGradError> {
        let mut tensor_data = TensorData::new(data_vec, shape)?;
        tensor_data.requires_grad = requires_grad;
        Ok(Tensor::from_data(tensor_data))
    }

    pub(crate) fn from_data(tensor_data: TensorData) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        }
    }

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.read_data().shape.len()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Copies the elements out in row-major order.
    pub fn to_vec(&self) -> Vec<f64> {
        self.read_data().buffer.as_ref().clone()
    }

    /// Shared handle to the element buffer. Cheap: no element is copied.
    pub(crate) fn buffer(&self) -> Arc<Vec<f64>> {
        Arc::clone(&self.read_data().buffer)
    }

    /// Returns the single value held by a one-element tensor.
    pub fn item(&self) -> Result<f64, TapeGradError> {
        let guard = self.read_data();
        if guard.numel() != 1 {
            return Err(TapeGradError::ShapeMismatch {
                expected: vec![],
                actual: guard.shape.clone(),
                operation: "item".to_string(),
            });
        }
        Ok(guard.buffer[0])
    }

    /// Acquires a read lock on the tensor's data.
    ///
    /// Panics if the RwLock is poisoned.
    pub fn read_data(&self) -> RwLockReadGuard<'_, TensorData> {
        self.data.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the tensor's data.
    ///
    /// Panics if the RwLock is poisoned.
    pub fn write_data(&self) -> RwLockWriteGuard<'_, TensorData> {
        self.data.write().expect("RwLock poisoned")
    }

    /// Stable identity of the underlying graph node, shared by all clones.
    pub(crate) fn node_id(&self) -> usize {
        Arc::as_ptr(&self.data) as *const () as usize
    }

    /// True if both handles point at the same graph node.
    pub fn same_node(&self, other: &Tensor) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl Clone for Tensor {
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read_data();
        f.debug_struct("Tensor")
            .field("shape", &guard.shape)
            .field("data", &guard.buffer)
            .field("requires_grad", &guard.requires_grad)
            .field("grad_fn", &guard.grad_fn.as_ref().map(|node| node.op().name()))
            .finish()
    }
}
