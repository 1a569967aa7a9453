use crate::error::TapeGradError;
use crate::ops::{unary_backward, unary_forward, ForwardOutput, InputGrads, Op, Operand};
use crate::tensor::Tensor;

/// Element-wise natural logarithm.
///
/// # Errors
/// `NonFinite` for any element `<= 0` (the result would be `-inf` or NaN).
pub fn ln_op(a: &Tensor) -> Result<Tensor, TapeGradError> {
    a.apply(Op::Ln, &[])
}

pub(crate) fn forward(a: &Operand) -> ForwardOutput {
    unary_forward(a, f64::ln)
}

// d(ln x)/dx = 1/x
pub(crate) fn backward(a: &Operand, grad_output: &[f64], needs_grad: &[bool]) -> InputGrads {
    unary_backward(a, grad_output, needs_grad, |x, g| g / x)
}

#[cfg(test)]
#[path = "ln_test.rs"]
mod tests;
