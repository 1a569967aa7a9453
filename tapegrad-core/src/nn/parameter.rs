use std::fmt;
use std::ops::Deref;

use crate::tensor::Tensor;

/// A leaf tensor marked as a learnable parameter of a [`Module`](super::Module).
///
/// Parameters always require gradients. `Parameter` derefs to [`Tensor`], so
/// every tensor method is available on it.
#[derive(Clone)]
pub struct Parameter {
    tensor: Tensor,
    name: Option<String>,
}

impl Parameter {
    /// Wraps `tensor` and turns on `requires_grad`.
    ///
    /// The tensor is detached first if it was produced by an operation, so a
    /// parameter is always a leaf.
    pub fn new(tensor: Tensor, name: Option<String>) -> Self {
        let tensor = if tensor.is_leaf() { tensor } else { tensor.detach() };
        // A leaf never fails the non-leaf check.
        let _ = tensor.requires_grad_(true);
        Parameter { tensor, name }
    }

    pub fn new_unnamed(tensor: Tensor) -> Self {
        Parameter::new(tensor, None)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Handle to the underlying tensor (shares the graph node).
    pub fn tensor(&self) -> &Tensor {
        &self.tensor
    }

    pub fn into_inner(self) -> Tensor {
        self.tensor
    }
}

impl Deref for Parameter {
    type Target = Tensor;

    fn deref(&self) -> &Self::Target {
        &self.tensor
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Parameter({}: {:?})", name, self.tensor),
            None => write!(f, "Parameter({:?})", self.tensor),
        }
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
