use crate::error::TapeGradError;
use crate::ops::arithmetic::{binary_backward, binary_forward};
use crate::ops::{ForwardOutput, InputGrads, Op, Operand};
use crate::tensor::Tensor;

/// Performs element-wise multiplication `a * b` with broadcasting.
///
/// Passing the same tensor twice (`x * x`) is supported: both operand slots
/// receive a contribution and they are summed during backward.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, TapeGradError> {
    a.apply(Op::Mul, &[b])
}

pub(crate) fn forward(a: &Operand, b: &Operand) -> Result<ForwardOutput, TapeGradError> {
    binary_forward(a, b, |x, y| x * y)
}

// d(a*b)/da = b, d(a*b)/db = a
pub(crate) fn backward(
    a: &Operand,
    b: &Operand,
    grad_output: &[f64],
    needs_grad: &[bool],
) -> Result<InputGrads, TapeGradError> {
    binary_backward(a, b, grad_output, needs_grad, |_, y, g| g * y, |x, _, g| g * x)
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
