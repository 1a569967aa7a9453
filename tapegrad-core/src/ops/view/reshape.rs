use crate::error::TapeGradError;
use crate::ops::{ForwardOutput, InputGrads, Op, Operand};
use crate::tensor::Tensor;

/// Reinterprets `a` with `new_shape`. The element count must not change.
///
/// # Errors
/// `ShapeMismatch` if `new_shape` holds a different number of elements.
pub fn reshape_op(a: &Tensor, new_shape: Vec<usize>) -> Result<Tensor, TapeGradError> {
    a.apply(Op::Reshape(new_shape), &[])
}

/// Collapses every dimension after the first: `[b, d1, d2, ..] -> [b, d1*d2*..]`.
/// Rank-0 and rank-1 inputs become `[numel]`.
pub fn flatten_op(a: &Tensor) -> Result<Tensor, TapeGradError> {
    let shape = a.shape();
    let new_shape = match shape.split_first() {
        Some((&batch, rest)) if !rest.is_empty() => vec![batch, rest.iter().product()],
        _ => vec![a.numel()],
    };
    reshape_op(a, new_shape)
}

pub(crate) fn forward(a: &Operand, new_shape: &[usize]) -> Result<ForwardOutput, TapeGradError> {
    let numel: usize = new_shape.iter().product();
    if numel != a.numel() {
        return Err(TapeGradError::ShapeMismatch {
            expected: a.shape.clone(),
            actual: new_shape.to_vec(),
            operation: "reshape".to_string(),
        });
    }
    Ok((a.data.as_ref().clone(), new_shape.to_vec()))
}

pub(crate) fn backward(grad_output: &[f64], needs_grad: &[bool]) -> InputGrads {
    vec![needs_grad[0].then(|| grad_output.to_vec())]
}
