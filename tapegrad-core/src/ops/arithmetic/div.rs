use crate::error::TapeGradError;
use crate::ops::arithmetic::{binary_backward, binary_forward};
use crate::ops::{ForwardOutput, InputGrads, Op, Operand};
use crate::tensor::Tensor;

/// Performs element-wise division `a / b` with broadcasting.
///
/// Division by zero yields a non-finite value and is rejected with
/// `TapeGradError::NonFinite`.
pub fn div_op(a: &Tensor, b: &Tensor) -> Result<Tensor, TapeGradError> {
    a.apply(Op::Div, &[b])
}

pub(crate) fn forward(a: &Operand, b: &Operand) -> Result<ForwardOutput, TapeGradError> {
    binary_forward(a, b, |x, y| x / y)
}

// d(a/b)/da = 1/b, d(a/b)/db = -a/b^2
pub(crate) fn backward(
    a: &Operand,
    b: &Operand,
    grad_output: &[f64],
    needs_grad: &[bool],
) -> Result<InputGrads, TapeGradError> {
    binary_backward(
        a,
        b,
        grad_output,
        needs_grad,
        |_, y, g| g / y,
        |x, y, g| -g * x / (y * y),
    )
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
