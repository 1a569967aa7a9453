use crate::error::TapeGradError;
use crate::ops::arithmetic::{binary_backward, binary_forward};
use crate::ops::{ForwardOutput, InputGrads, Op, Operand};
use crate::tensor::Tensor;

/// Performs element-wise subtraction `a - b` with broadcasting.
pub fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor, TapeGradError> {
    a.apply(Op::Sub, &[b])
}

pub(crate) fn forward(a: &Operand, b: &Operand) -> Result<ForwardOutput, TapeGradError> {
    binary_forward(a, b, |x, y| x - y)
}

pub(crate) fn backward(
    a: &Operand,
    b: &Operand,
    grad_output: &[f64],
    needs_grad: &[bool],
) -> Result<InputGrads, TapeGradError> {
    binary_backward(a, b, grad_output, needs_grad, |_, _, g| g, |_, _, g| -g)
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
