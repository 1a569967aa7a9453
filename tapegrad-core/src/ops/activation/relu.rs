use crate::error::TapeGradError;
use crate::ops::{unary_backward, unary_forward, ForwardOutput, InputGrads, Op, Operand};
use crate::tensor::Tensor;

/// Applies the Rectified Linear Unit function element-wise: `max(0, x)`.
///
/// The derivative is taken as 0 at exactly `x = 0`.
pub fn relu_op(a: &Tensor) -> Result<Tensor, TapeGradError> {
    a.apply(Op::Relu, &[])
}

pub(crate) fn forward(a: &Operand) -> ForwardOutput {
    unary_forward(a, |x| if x > 0.0 { x } else { 0.0 })
}

pub(crate) fn backward(a: &Operand, grad_output: &[f64], needs_grad: &[bool]) -> InputGrads {
    unary_backward(a, grad_output, needs_grad, |x, g| if x > 0.0 { g } else { 0.0 })
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
