use crate::error::TapeGradError;
use crate::ops::{unary_backward, unary_forward, ForwardOutput, InputGrads, Op, Operand};
use crate::tensor::Tensor;

/// Element-wise natural exponential. Overflow to infinity is rejected with
/// `TapeGradError::NonFinite`.
pub fn exp_op(a: &Tensor) -> Result<Tensor, TapeGradError> {
    a.apply(Op::Exp, &[])
}

pub(crate) fn forward(a: &Operand) -> ForwardOutput {
    unary_forward(a, f64::exp)
}

pub(crate) fn backward(a: &Operand, grad_output: &[f64], needs_grad: &[bool]) -> InputGrads {
    unary_backward(a, grad_output, needs_grad, |x, g| g * x.exp())
}
