use crate::error::TapeGradError;
use crate::ops::reduction::utils::{expand_from_kept, reduction_shapes, sum_into_kept};
use crate::ops::{ForwardOutput, InputGrads, Op, Operand};
use crate::tensor::Tensor;

/// Sums the elements of `a`.
///
/// With `axis = None` every element is summed; otherwise only the given
/// dimension is reduced. `keep_dim` keeps reduced dimensions with size 1.
///
/// # Errors
/// `InvalidAxis` if `axis` is not below the rank of `a`.
pub fn sum_op(a: &Tensor, axis: Option<usize>, keep_dim: bool) -> Result<Tensor, TapeGradError> {
    a.apply(Op::Sum { axis, keep_dim }, &[])
}

pub(crate) fn forward(a: &Operand, axis: Option<usize>, keep_dim: bool) -> Result<ForwardOutput, TapeGradError> {
    let shapes = reduction_shapes(&a.shape, axis, keep_dim)?;
    Ok((sum_into_kept(a, &shapes), shapes.output))
}

pub(crate) fn backward(
    a: &Operand,
    axis: Option<usize>,
    keep_dim: bool,
    grad_output: &[f64],
    needs_grad: &[bool],
) -> Result<InputGrads, TapeGradError> {
    if !needs_grad[0] {
        return Ok(vec![None]);
    }
    let shapes = reduction_shapes(&a.shape, axis, keep_dim)?;
    Ok(vec![Some(expand_from_kept(grad_output, &a.shape, &shapes, 1.0))])
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
