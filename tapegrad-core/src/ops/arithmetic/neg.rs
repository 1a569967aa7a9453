use crate::error::TapeGradError;
use crate::ops::{unary_forward, ForwardOutput, InputGrads, Op, Operand};
use crate::tensor::Tensor;

/// Element-wise negation.
pub fn neg_op(a: &Tensor) -> Result<Tensor, TapeGradError> {
    a.apply(Op::Neg, &[])
}

pub(crate) fn forward(a: &Operand) -> ForwardOutput {
    unary_forward(a, |x| -x)
}

pub(crate) fn backward(grad_output: &[f64], needs_grad: &[bool]) -> InputGrads {
    vec![needs_grad[0].then(|| grad_output.iter().map(|g| -g).collect())]
}

#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
