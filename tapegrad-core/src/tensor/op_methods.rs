use log::trace;

use crate::autograd::{is_grad_enabled, OpNode};
use crate::error::TapeGradError;
use crate::ops::{self, ensure_finite, Op, Operand};
use crate::tensor::{create, Tensor};

impl Tensor {
    /// Applies `op` with `self` as the first operand and `others` as the rest,
    /// recording a graph node when gradient mode is on and any input requires
    /// gradients.
    ///
    /// Operands are snapshotted before the forward rule runs, so passing the
    /// same tensor more than once is fine.
    ///
    /// # Errors
    /// - `ArityMismatch` if the operand count does not match `op.arity()`.
    /// - Shape errors raised by the forward rule.
    /// - `NonFinite` if the result contains NaN or an infinity.
    pub fn apply(&self, op: Op, others: &[&Tensor]) -> Result<Tensor, TapeGradError> {
        let mut inputs = Vec::with_capacity(others.len() + 1);
        inputs.push(self.clone());
        inputs.extend(others.iter().map(|t| (*t).clone()));

        let operands: Vec<Operand> = inputs.iter().map(Operand::of).collect();
        let (data, shape) = op.forward(&operands)?;
        drop(operands);
        ensure_finite(op.name(), &data)?;
        let output = Tensor::new(data, shape)?;

        let track = is_grad_enabled()
            && inputs.iter().any(|t| {
                let guard = t.read_data();
                guard.requires_grad || guard.grad_fn.is_some()
            });
        if track {
            trace!("recording {} over {} input(s)", op.name(), inputs.len());
            OpNode::attach(&output, op, inputs);
        }
        Ok(output)
    }

    pub fn add(&self, other: &Tensor) -> Result<Tensor, TapeGradError> {
        ops::arithmetic::add_op(self, other)
    }

    pub fn sub(&self, other: &Tensor) -> Result<Tensor, TapeGradError> {
        ops::arithmetic::sub_op(self, other)
    }

    pub fn mul(&self, other: &Tensor) -> Result<Tensor, TapeGradError> {
        ops::arithmetic::mul_op(self, other)
    }

    pub fn div(&self, other: &Tensor) -> Result<Tensor, TapeGradError> {
        ops::arithmetic::div_op(self, other)
    }

    pub fn neg(&self) -> Result<Tensor, TapeGradError> {
        ops::arithmetic::neg_op(self)
    }

    pub fn pow(&self, exponent: f64) -> Result<Tensor, TapeGradError> {
        ops::arithmetic::pow_op(self, exponent)
    }

    /// Adds a constant, broadcast as a 0-d tensor.
    pub fn add_scalar(&self, value: f64) -> Result<Tensor, TapeGradError> {
        self.add(&create::scalar(value))
    }

    /// Multiplies by a constant, broadcast as a 0-d tensor.
    pub fn mul_scalar(&self, value: f64) -> Result<Tensor, TapeGradError> {
        self.mul(&create::scalar(value))
    }

    pub fn exp(&self) -> Result<Tensor, TapeGradError> {
        ops::math_elem::exp_op(self)
    }

    pub fn ln(&self) -> Result<Tensor, TapeGradError> {
        ops::math_elem::ln_op(self)
    }

    /// Sum of all elements as a 0-d tensor.
    pub fn sum(&self) -> Result<Tensor, TapeGradError> {
        ops::reduction::sum_op(self, None, false)
    }

    pub fn sum_axis(&self, axis: usize, keep_dim: bool) -> Result<Tensor, TapeGradError> {
        ops::reduction::sum_op(self, Some(axis), keep_dim)
    }

    /// Mean of all elements as a 0-d tensor.
    pub fn mean(&self) -> Result<Tensor, TapeGradError> {
        ops::reduction::mean_op(self, None, false)
    }

    pub fn mean_axis(&self, axis: usize, keep_dim: bool) -> Result<Tensor, TapeGradError> {
        ops::reduction::mean_op(self, Some(axis), keep_dim)
    }

    pub fn matmul(&self, other: &Tensor) -> Result<Tensor, TapeGradError> {
        ops::linalg::matmul_op(self, other)
    }

    pub fn transpose(&self) -> Result<Tensor, TapeGradError> {
        ops::linalg::transpose_op(self)
    }

    pub fn reshape(&self, new_shape: Vec<usize>) -> Result<Tensor, TapeGradError> {
        ops::view::reshape_op(self, new_shape)
    }

    pub fn flatten(&self) -> Result<Tensor, TapeGradError> {
        ops::view::flatten_op(self)
    }

    pub fn relu(&self) -> Result<Tensor, TapeGradError> {
        ops::activation::relu_op(self)
    }

    pub fn sigmoid(&self) -> Result<Tensor, TapeGradError> {
        ops::activation::sigmoid_op(self)
    }

    pub fn log_softmax(&self) -> Result<Tensor, TapeGradError> {
        ops::loss::log_softmax_op(self)
    }

    pub fn nll_loss(&self, targets: &[usize]) -> Result<Tensor, TapeGradError> {
        ops::loss::nll_loss_op(self, targets)
    }

    pub fn cross_entropy(&self, targets: &[usize]) -> Result<Tensor, TapeGradError> {
        ops::loss::cross_entropy_op(self, targets)
    }
}
