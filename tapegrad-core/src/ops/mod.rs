//! # Tensor Operations Module (`ops`)
//!
//! Every differentiable primitive is one variant of the closed [`Op`] enum.
//! A variant carries the operation's parameters; its forward and backward
//! rules live in the submodule for that operation and are dispatched by an
//! exhaustive `match`, so adding a primitive means touching exactly one enum
//! and one file.
//!
//! ## Structure:
//!
//! - **Submodules:** operations are grouped logically (`arithmetic`,
//!   `math_elem`, `reduction`, `linalg`, `view`, `activation`, `loss`).
//! - **`forward` / `backward` functions:** each operation file exposes a
//!   crate-private `forward` computing the output buffer and shape from
//!   [`Operand`] snapshots, and a `backward` mapping the output gradient to one
//!   optional gradient per input (`None` when that input does not need one).
//! - **`_op` functions:** the public entry points (`add_op`, `matmul_op`, ...)
//!   that route through [`Tensor::apply`](crate::Tensor::apply), which records
//!   the graph node.

use std::sync::Arc;

use crate::error::TapeGradError;
use crate::tensor::Tensor;

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod loss;
pub mod math_elem;
pub mod reduction;
pub mod view;

/// Result of a forward rule: the output buffer and its shape.
pub(crate) type ForwardOutput = (Vec<f64>, Vec<usize>);

/// Result of a backward rule: one entry per input, `None` when the input does
/// not require a gradient.
pub(crate) type InputGrads = Vec<Option<Vec<f64>>>;

/// The closed set of differentiable primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    /// Elementwise power by a scalar exponent.
    Pow(f64),
    Exp,
    Ln,
    /// Sum over every element (`axis = None`) or along one axis.
    Sum { axis: Option<usize>, keep_dim: bool },
    /// Mean over every element (`axis = None`) or along one axis.
    Mean { axis: Option<usize>, keep_dim: bool },
    MatMul,
    Transpose,
    Reshape(Vec<usize>),
    Sigmoid,
    Relu,
    /// Row-wise log-softmax over the last axis.
    LogSoftmax,
    /// Mean negative log-likelihood of log-probabilities.
    NllLoss { targets: Vec<usize> },
    /// Fused log-softmax + NLL on raw logits.
    CrossEntropy { targets: Vec<usize> },
}

impl Op {
    pub fn name(&self) -> &'static str {
        match self {
            Op::Add => "add",
            Op::Sub => "sub",
            Op::Mul => "mul",
            Op::Div => "div",
            Op::Neg => "neg",
            Op::Pow(_) => "pow",
            Op::Exp => "exp",
            Op::Ln => "ln",
            Op::Sum { .. } => "sum",
            Op::Mean { .. } => "mean",
            Op::MatMul => "matmul",
            Op::Transpose => "transpose",
            Op::Reshape(_) => "reshape",
            Op::Sigmoid => "sigmoid",
            Op::Relu => "relu",
            Op::LogSoftmax => "log_softmax",
            Op::NllLoss { .. } => "nll_loss",
            Op::CrossEntropy { .. } => "cross_entropy",
        }
    }

    /// Number of input tensors the operation consumes.
    pub fn arity(&self) -> usize {
        match self {
            Op::Add | Op::Sub | Op::Mul | Op::Div | Op::MatMul => 2,
            Op::Neg
            | Op::Pow(_)
            | Op::Exp
            | Op::Ln
            | Op::Sum { .. }
            | Op::Mean { .. }
            | Op::Transpose
            | Op::Reshape(_)
            | Op::Sigmoid
            | Op::Relu
            | Op::LogSoftmax
            | Op::NllLoss { .. }
            | Op::CrossEntropy { .. } => 1,
        }
    }

    fn check_arity(&self, actual: usize) -> Result<(), TapeGradError> {
        if actual != self.arity() {
            return Err(TapeGradError::ArityMismatch {
                operation: self.name().to_string(),
                expected: self.arity(),
                actual,
            });
        }
        Ok(())
    }

    /// Runs the forward rule.
    pub(crate) fn forward(&self, inputs: &[Operand]) -> Result<ForwardOutput, TapeGradError> {
        self.check_arity(inputs.len())?;
        match self {
            Op::Add => arithmetic::add::forward(&inputs[0], &inputs[1]),
            Op::Sub => arithmetic::sub::forward(&inputs[0], &inputs[1]),
            Op::Mul => arithmetic::mul::forward(&inputs[0], &inputs[1]),
            Op::Div => arithmetic::div::forward(&inputs[0], &inputs[1]),
            Op::Neg => Ok(arithmetic::neg::forward(&inputs[0])),
            Op::Pow(exponent) => Ok(arithmetic::pow::forward(&inputs[0], *exponent)),
            Op::Exp => Ok(math_elem::exp::forward(&inputs[0])),
            Op::Ln => Ok(math_elem::ln::forward(&inputs[0])),
            Op::Sum { axis, keep_dim } => reduction::sum::forward(&inputs[0], *axis, *keep_dim),
            Op::Mean { axis, keep_dim } => reduction::mean::forward(&inputs[0], *axis, *keep_dim),
            Op::MatMul => linalg::matmul::forward(&inputs[0], &inputs[1]),
            Op::Transpose => linalg::transpose::forward(&inputs[0]),
            Op::Reshape(shape) => view::reshape::forward(&inputs[0], shape),
            Op::Sigmoid => Ok(activation::sigmoid::forward(&inputs[0])),
            Op::Relu => Ok(activation::relu::forward(&inputs[0])),
            Op::LogSoftmax => loss::log_softmax::forward(&inputs[0]),
            Op::NllLoss { targets } => loss::nll::forward(&inputs[0], targets),
            Op::CrossEntropy { targets } => loss::cross_entropy::forward(&inputs[0], targets),
        }
    }

    /// Runs the backward rule for the given output gradient.
    ///
    /// `needs_grad[i]` tells whether input `i` wants a gradient; entries for
    /// inputs that do not are returned as `None` and never computed.
    pub(crate) fn backward(
        &self,
        inputs: &[Operand],
        output_shape: &[usize],
        grad_output: &[f64],
        needs_grad: &[bool],
    ) -> Result<InputGrads, TapeGradError> {
        self.check_arity(inputs.len())?;
        match self {
            Op::Add => arithmetic::add::backward(&inputs[0], &inputs[1], grad_output, needs_grad),
            Op::Sub => arithmetic::sub::backward(&inputs[0], &inputs[1], grad_output, needs_grad),
            Op::Mul => arithmetic::mul::backward(&inputs[0], &inputs[1], grad_output, needs_grad),
            Op::Div => arithmetic::div::backward(&inputs[0], &inputs[1], grad_output, needs_grad),
            Op::Neg => Ok(arithmetic::neg::backward(grad_output, needs_grad)),
            Op::Pow(exponent) => Ok(arithmetic::pow::backward(&inputs[0], *exponent, grad_output, needs_grad)),
            Op::Exp => Ok(math_elem::exp::backward(&inputs[0], grad_output, needs_grad)),
            Op::Ln => Ok(math_elem::ln::backward(&inputs[0], grad_output, needs_grad)),
            Op::Sum { axis, keep_dim } => {
                reduction::sum::backward(&inputs[0], *axis, *keep_dim, grad_output, needs_grad)
            }
            Op::Mean { axis, keep_dim } => {
                reduction::mean::backward(&inputs[0], *axis, *keep_dim, grad_output, needs_grad)
            }
            Op::MatMul => linalg::matmul::backward(&inputs[0], &inputs[1], grad_output, needs_grad),
            Op::Transpose => linalg::transpose::backward(output_shape, grad_output, needs_grad),
            Op::Reshape(_) => Ok(view::reshape::backward(grad_output, needs_grad)),
            Op::Sigmoid => Ok(activation::sigmoid::backward(&inputs[0], grad_output, needs_grad)),
            Op::Relu => Ok(activation::relu::backward(&inputs[0], grad_output, needs_grad)),
            Op::LogSoftmax => loss::log_softmax::backward(&inputs[0], grad_output, needs_grad),
            Op::NllLoss { targets } => loss::nll::backward(&inputs[0], targets, grad_output, needs_grad),
            Op::CrossEntropy { targets } => {
                loss::cross_entropy::backward(&inputs[0], targets, grad_output, needs_grad)
            }
        }
    }
}

/// Immutable snapshot of an input tensor taken for one forward or backward
/// rule. Holds the shared buffer, so no lock is held while the rule runs.
#[derive(Debug, Clone)]
pub(crate) struct Operand {
    pub(crate) data: Arc<Vec<f64>>,
    pub(crate) shape: Vec<usize>,
}

impl Operand {
    pub(crate) fn of(tensor: &Tensor) -> Self {
        let guard = tensor.read_data();
        Operand {
            data: Arc::clone(&guard.buffer),
            shape: guard.shape.clone(),
        }
    }

    pub(crate) fn numel(&self) -> usize {
        self.data.len()
    }
}

/// Rejects NaN and infinities at the operation that produced them.
pub(crate) fn ensure_finite(operation: &str, values: &[f64]) -> Result<(), TapeGradError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(TapeGradError::NonFinite {
            operation: operation.to_string(),
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

/// Applies a unary element-wise function.
pub(crate) fn unary_forward<F>(a: &Operand, op: F) -> ForwardOutput
where
    F: Fn(f64) -> f64,
{
    (a.data.iter().map(|&x| op(x)).collect(), a.shape.clone())
}

/// Backward of a unary element-wise function: `grad_in[i] = local(x[i], g[i])`.
pub(crate) fn unary_backward<F>(a: &Operand, grad_output: &[f64], needs_grad: &[bool], local: F) -> InputGrads
where
    F: Fn(f64, f64) -> f64,
{
    if !needs_grad[0] {
        return vec![None];
    }
    let grad = a
        .data
        .iter()
        .zip(grad_output.iter())
        .map(|(&x, &g)| local(x, g))
        .collect();
    vec![Some(grad)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_mismatch_is_reported() {
        let a = Operand::of(&Tensor::new(vec![1.0], vec![1]).unwrap());
        let err = Op::Add.forward(&[a]).unwrap_err();
        assert!(matches!(err, TapeGradError::ArityMismatch { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite("x", &[1.0, 2.0]).is_ok());
        match ensure_finite("ln", &[1.0, f64::NEG_INFINITY]) {
            Err(TapeGradError::NonFinite { operation, index, .. }) => {
                assert_eq!(operation, "ln");
                assert_eq!(index, 1);
            }
            other => panic!("expected NonFinite, got {:?}", other),
        }
    }
}
