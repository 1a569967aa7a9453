use std::sync::Arc;

use log::warn;

use crate::autograd::graph::run_backward;
use crate::autograd::OpNode;
use crate::error::TapeGradError;
use crate::tensor::Tensor;

/// Autograd-related methods.
impl Tensor {
    /// Checks if this tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` flag of a leaf tensor.
    ///
    /// # Errors
    /// `RequiresGradOnNonLeaf` if the tensor was produced by an operation.
    pub fn requires_grad_(&self, requires_grad: bool) -> Result<(), TapeGradError> {
        let mut guard = self.write_data();
        if guard.grad_fn.is_some() {
            return Err(TapeGradError::RequiresGradOnNonLeaf);
        }
        if !requires_grad && guard.grad.is_some() {
            warn!("requires_grad_(false) on a tensor holding a gradient; the gradient is kept until zero_grad()");
        }
        guard.requires_grad = requires_grad;
        Ok(())
    }

    /// True if the tensor was not produced by a recorded operation.
    pub fn is_leaf(&self) -> bool {
        self.read_data().is_leaf()
    }

    /// The accumulated gradient, if any. Only leaves that require gradients
    /// ever receive one.
    pub fn grad(&self) -> Option<Tensor> {
        self.read_data().grad.clone()
    }

    /// The node that produced this tensor, or `None` for a leaf.
    pub fn grad_fn(&self) -> Option<Arc<OpNode>> {
        self.read_data().grad_fn.clone()
    }

    /// Returns a new leaf sharing this tensor's elements, cut off from the
    /// graph and not requiring gradients.
    pub fn detach(&self) -> Tensor {
        let guard = self.read_data();
        Tensor::from_data(crate::tensor_data::TensorData {
            buffer: Arc::clone(&guard.buffer),
            shape: guard.shape.clone(),
            requires_grad: false,
            grad: None,
            grad_fn: None,
        })
    }

    /// Clears the accumulated gradient.
    pub fn zero_grad(&self) {
        self.write_data().grad = None;
    }

    /// Computes the gradient of this scalar with respect to every leaf that
    /// requires gradients, adding the result into each leaf's `grad`.
    ///
    /// The graph is kept, so calling `backward` again adds the same gradients
    /// a second time.
    ///
    /// # Errors
    /// - `BackwardNonScalar` if the tensor holds more than one element.
    /// - `NoGradientPath` if it neither requires gradients nor has a `grad_fn`.
    /// - Any error raised by a backward rule, such as `NonFinite`.
    pub fn backward(&self) -> Result<(), TapeGradError> {
        let shape = self.shape();
        if shape.iter().product::<usize>() != 1 {
            return Err(TapeGradError::BackwardNonScalar { shape });
        }
        self.backward_from(vec![1.0])
    }

    /// Like [`Tensor::backward`], but seeded with an explicit gradient of the
    /// same shape as `self`. Works for non-scalar outputs.
    pub fn backward_with_grad(&self, gradient: &Tensor) -> Result<(), TapeGradError> {
        let (shape, grad_shape) = (self.shape(), gradient.shape());
        if shape != grad_shape {
            return Err(TapeGradError::ShapeMismatch {
                expected: shape,
                actual: grad_shape,
                operation: "backward".to_string(),
            });
        }
        self.backward_from(gradient.to_vec())
    }

    fn backward_from(&self, seed: Vec<f64>) -> Result<(), TapeGradError> {
        {
            let guard = self.read_data();
            if !guard.requires_grad && guard.grad_fn.is_none() {
                return Err(TapeGradError::NoGradientPath);
            }
        }
        run_backward(self, seed)
    }

    /// Adds `delta` into this tensor's gradient, creating it if absent.
    ///
    /// The previous gradient tensor is replaced, not mutated, so handles
    /// obtained earlier through [`Tensor::grad`] keep their values.
    pub(crate) fn accumulate_grad(&self, delta: &[f64]) -> Result<(), TapeGradError> {
        let mut guard = self.write_data();
        if delta.len() != guard.numel() {
            return Err(TapeGradError::GradientShapeMismatch {
                operation: "accumulate_grad".to_string(),
                input_index: 0,
                expected: guard.numel(),
                actual: delta.len(),
            });
        }
        let summed = match guard.grad.as_ref() {
            Some(existing) => existing
                .buffer()
                .iter()
                .zip(delta)
                .map(|(a, b)| a + b)
                .collect(),
            None => delta.to_vec(),
        };
        guard.grad = Some(Tensor::new(summed, guard.shape.clone())?);
        Ok(())
    }

    /// Mutates the elements in place through `f`. No graph node is recorded;
    /// intended for optimizer updates on leaves.
    ///
    /// Buffers shared with other tensors (e.g. through [`Tensor::detach`]) are
    /// copied first, so only this tensor observes the change.
    pub fn update_data<F>(&self, f: F)
    where
        F: FnOnce(&mut [f64]),
    {
        let mut guard = self.write_data();
        f(Arc::make_mut(&mut guard.buffer).as_mut_slice());
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
