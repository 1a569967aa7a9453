use std::fmt;
use std::sync::{Arc, RwLock, Weak};

use crate::error::TapeGradError;
use crate::ops::{ensure_finite, InputGrads, Op, Operand};
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;

/// One recorded primitive in the computation graph.
///
/// An `OpNode` is the `grad_fn` of the tensor it produced. It owns strong
/// handles to its inputs, which keeps every upstream tensor alive for as long
/// as a downstream result is reachable. The back-reference to its output is
/// weak, so a node and its output never form a reference cycle.
pub struct OpNode {
    op: Op,
    inputs: Vec<Tensor>,
    output_shape: Vec<usize>,
    output: Weak<RwLock<TensorData>>,
}

impl OpNode {
    /// Records `op` as the producer of `output`: marks the output as requiring
    /// gradients and sets its `grad_fn`.
    pub(crate) fn attach(output: &Tensor, op: Op, inputs: Vec<Tensor>) {
        let node = OpNode {
            op,
            inputs,
            output_shape: output.shape(),
            output: Arc::downgrade(&output.data),
        };
        let mut guard = output.write_data();
        guard.requires_grad = true;
        guard.grad_fn = Some(Arc::new(node));
    }

    pub fn op(&self) -> &Op {
        &self.op
    }

    /// The input tensors, in operand order. The same tensor may appear twice.
    pub fn inputs(&self) -> &[Tensor] {
        &self.inputs
    }

    pub fn output_shape(&self) -> &[usize] {
        &self.output_shape
    }

    /// The tensor this node produced, if it is still alive.
    pub fn output(&self) -> Option<Tensor> {
        self.output.upgrade().map(|data| Tensor { data })
    }

    /// Maps the gradient of the output to one gradient per input.
    ///
    /// Inputs that do not require gradients get `None`. Every returned gradient
    /// is checked to hold exactly as many elements as its input and to be
    /// finite.
    pub(crate) fn backward(&self, grad_output: &[f64]) -> Result<InputGrads, TapeGradError> {
        let operands: Vec<Operand> = self.inputs.iter().map(Operand::of).collect();
        let needs_grad: Vec<bool> = self.inputs.iter().map(Tensor::requires_grad).collect();
        let grads = self
            .op
            .backward(&operands, &self.output_shape, grad_output, &needs_grad)?;

        if grads.len() != operands.len() {
            return Err(TapeGradError::InternalError(format!(
                "backward of {} returned {} gradients for {} inputs",
                self.op.name(),
                grads.len(),
                operands.len()
            )));
        }
        for (input_index, (grad, operand)) in grads.iter().zip(&operands).enumerate() {
            if let Some(grad) = grad {
                if grad.len() != operand.numel() {
                    return Err(TapeGradError::GradientShapeMismatch {
                        operation: self.op.name().to_string(),
                        input_index,
                        expected: operand.numel(),
                        actual: grad.len(),
                    });
                }
                ensure_finite(self.op.name(), grad)?;
            }
        }
        Ok(grads)
    }
}

impl Drop for OpNode {
    // Unlinks the upstream graph iteratively. The default drop would recurse
    // once per recorded op and overflow the stack on long chains.
    fn drop(&mut self) {
        let mut pending: Vec<Tensor> = std::mem::take(&mut self.inputs);
        while let Some(tensor) = pending.pop() {
            let Ok(lock) = Arc::try_unwrap(tensor.data) else {
                continue;
            };
            let mut data = lock.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner());
            let Some(node) = data.grad_fn.take() else {
                continue;
            };
            if let Ok(mut node) = Arc::try_unwrap(node) {
                pending.append(&mut node.inputs);
            }
        }
    }
}

impl fmt::Debug for OpNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpNode")
            .field("op", &self.op.name())
            .field("num_inputs", &self.inputs.len())
            .field("output_shape", &self.output_shape)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const SMALL_STACK: usize = 2 * 1024 * 1024;

    #[test]
    fn test_dropping_a_deep_graph_does_not_overflow() {
        let handle = thread::Builder::new()
            .stack_size(SMALL_STACK)
            .spawn(|| {
                let x = Tensor::create(vec![1.0], vec![1], true).unwrap();
                let mut y = x.clone();
                for _ in 0..100_000 {
                    y = y.add_scalar(0.0).unwrap();
                }
                y.sum().unwrap().backward().unwrap();
                drop(y);
                x.grad().unwrap().to_vec()
            })
            .unwrap();
        assert_eq!(handle.join().unwrap(), vec![1.0]);
    }

    #[test]
    fn test_drop_keeps_shared_intermediates_alive() {
        let x = Tensor::create(vec![2.0], vec![1], true).unwrap();
        let mid = x.mul_scalar(3.0).unwrap();
        let mut top = mid.clone();
        for _ in 0..10 {
            top = top.exp().unwrap().ln().unwrap();
        }
        drop(top);
        assert!(mid.grad_fn().is_some());
        assert!(mid.grad_fn().unwrap().inputs()[0].same_node(&x));
        mid.sum().unwrap().backward().unwrap();
        assert_eq!(x.grad().unwrap().to_vec(), vec![3.0]);
    }
}
