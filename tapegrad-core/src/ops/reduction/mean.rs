use crate::error::TapeGradError;
use crate::ops::reduction::utils::{expand_from_kept, reduction_shapes, sum_into_kept};
use crate::ops::{ForwardOutput, InputGrads, Op, Operand};
use crate::tensor::Tensor;

/// Arithmetic mean over every element (`axis = None`) or along one axis.
///
/// The mean of an empty selection is undefined and is rejected as
/// `TapeGradError::NonFinite`.
pub fn mean_op(a: &Tensor, axis: Option<usize>, keep_dim: bool) -> Result<Tensor, TapeGradError> {
    a.apply(Op::Mean { axis, keep_dim }, &[])
}

pub(crate) fn forward(a: &Operand, axis: Option<usize>, keep_dim: bool) -> Result<ForwardOutput, TapeGradError> {
    let shapes = reduction_shapes(&a.shape, axis, keep_dim)?;
    let n = shapes.count as f64;
    let mut data = sum_into_kept(a, &shapes);
    data.iter_mut().for_each(|v| *v /= n);
    Ok((data, shapes.output))
}

// d(mean)/dx_i = 1/n for every x_i folded into the output element.
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
    let scale = 1.0 / shapes.count as f64;
    Ok(vec![Some(expand_from_kept(grad_output, &a.shape, &shapes, scale))])
}

#[cfg(test)]
#[path = "mean_test.rs"]
mod tests;
