use crate::error::TapeGradError;
use crate::ops::{unary_backward, unary_forward, ForwardOutput, InputGrads, Op, Operand};
use crate::tensor::Tensor;

/// Applies the logistic function `1 / (1 + exp(-x))` element-wise.
pub fn sigmoid_op(a: &Tensor) -> Result<Tensor, TapeGradError> {
    a.apply(Op::Sigmoid, &[])
}

/// Overflow-free logistic: `exp` is only ever taken of a non-positive value.
pub(crate) fn stable_sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

pub(crate) fn forward(a: &Operand) -> ForwardOutput {
    unary_forward(a, stable_sigmoid)
}

// σ'(x) = σ(x)(1 - σ(x))
pub(crate) fn backward(a: &Operand, grad_output: &[f64], needs_grad: &[bool]) -> InputGrads {
    unary_backward(a, grad_output, needs_grad, |x, g| {
        let s = stable_sigmoid(x);
        g * s * (1.0 - s)
    })
}
