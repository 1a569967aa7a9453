use crate::error::TapeGradError;
use crate::ops::linalg::matrix_dims;
use crate::ops::{ForwardOutput, InputGrads, Op, Operand};
use crate::tensor::Tensor;

/// Transposes a 2-D tensor: `[m, n] -> [n, m]`. The result owns a fresh
/// row-major buffer.
pub fn transpose_op(a: &Tensor) -> Result<Tensor, TapeGradError> {
    a.apply(Op::Transpose, &[])
}

fn transpose_buffer(data: &[f64], rows: usize, cols: usize) -> Vec<f64> {
    let mut out = vec![0.0; rows * cols];
    for i in 0..rows {
        for j in 0..cols {
            out[j * rows + i] = data[i * cols + j];
        }
    }
    out
}

pub(crate) fn forward(a: &Operand) -> Result<ForwardOutput, TapeGradError> {
    let (rows, cols) = matrix_dims(&a.shape, "transpose")?;
    Ok((transpose_buffer(&a.data, rows, cols), vec![cols, rows]))
}

pub(crate) fn backward(output_shape: &[usize], grad_output: &[f64], needs_grad: &[bool]) -> Result<InputGrads, TapeGradError> {
    if !needs_grad[0] {
        return Ok(vec![None]);
    }
    let (rows, cols) = matrix_dims(output_shape, "transpose")?;
    Ok(vec![Some(transpose_buffer(grad_output, rows, cols))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::grad_check::{check_grad, GradCheckConfig};
    use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

    #[test]
    fn test_transpose_forward() {
        let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let r = transpose_op(&t).unwrap();
        check_tensor_near(&r, &[3, 2], &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0], 0.0);
    }

    #[test]
    fn test_transpose_requires_matrix() {
        let t = create_test_tensor(vec![1.0, 2.0], vec![2]);
        assert!(matches!(transpose_op(&t), Err(TapeGradError::RankMismatch { expected: 2, .. })));
    }

    #[test]
    fn test_transpose_check_grad() {
        let t = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let output_grad = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2]).unwrap();
        check_grad(|x: &[Tensor]| transpose_op(&x[0]), &[t], &output_grad, &GradCheckConfig::default()).unwrap();
    }
}
