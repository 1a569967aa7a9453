use crate::error::TapeGradError;
use crate::ops::{unary_backward, unary_forward, ForwardOutput, InputGrads, Op, Operand};
use crate::tensor::Tensor;

/// Raises each element to the scalar power `exponent`.
///
/// Results that are not finite (e.g. a negative base with a fractional
/// exponent) are rejected with `TapeGradError::NonFinite`.
pub fn pow_op(a: &Tensor, exponent: f64) -> Result<Tensor, TapeGradError> {
    a.apply(Op::Pow(exponent), &[])
}

pub(crate) fn forward(a: &Operand, exponent: f64) -> ForwardOutput {
    unary_forward(a, |x| x.powf(exponent))
}

// d(x^p)/dx = p * x^(p-1)
pub(crate) fn backward(a: &Operand, exponent: f64, grad_output: &[f64], needs_grad: &[bool]) -> InputGrads {
    unary_backward(a, grad_output, needs_grad, |x, g| {
        if exponent == 0.0 {
            0.0
        } else {
            g * exponent * x.powf(exponent - 1.0)
        }
    })
}

#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
