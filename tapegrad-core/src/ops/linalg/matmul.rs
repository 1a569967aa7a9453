use crate::error::TapeGradError;
use crate::ops::linalg::matrix_dims;
use crate::ops::{ForwardOutput, InputGrads, Op, Operand};
use crate::tensor::Tensor;

/// Matrix product of `a [m, k]` and `b [k, n]`, producing `[m, n]`.
///
/// # Errors
/// - `RankMismatch` if either input is not 2-D.
/// - `ShapeMismatch` if the inner dimensions differ.
pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, TapeGradError> {
    a.apply(Op::MatMul, &[b])
}

fn check_shapes(a: &Operand, b: &Operand) -> Result<(usize, usize, usize), TapeGradError> {
    let (m, k) = matrix_dims(&a.shape, "matmul")?;
    let (k2, n) = matrix_dims(&b.shape, "matmul")?;
    if k != k2 {
        return Err(TapeGradError::ShapeMismatch {
            expected: vec![k, n],
            actual: b.shape.clone(),
            operation: "matmul".to_string(),
        });
    }
    Ok((m, k, n))
}

pub(crate) fn forward(a: &Operand, b: &Operand) -> Result<ForwardOutput, TapeGradError> {
    let (m, k, n) = check_shapes(a, b)?;
    let mut out = vec![0.0; m * n];
    for i in 0..m {
        let a_row = &a.data[i * k..(i + 1) * k];
        let out_row = &mut out[i * n..(i + 1) * n];
        for (l, &a_il) in a_row.iter().enumerate() {
            let b_row = &b.data[l * n..(l + 1) * n];
            for (o, &b_lj) in out_row.iter_mut().zip(b_row) {
                *o += a_il * b_lj;
            }
        }
    }
    Ok((out, vec![m, n]))
}

// grad_a = G · Bᵀ, grad_b = Aᵀ · G
pub(crate) fn backward(
    a: &Operand,
    b: &Operand,
    grad_output: &[f64],
    needs_grad: &[bool],
) -> Result<InputGrads, TapeGradError> {
    let (m, k, n) = check_shapes(a, b)?;

    let grad_a = needs_grad[0].then(|| {
        let mut ga = vec![0.0; m * k];
        for i in 0..m {
            let g_row = &grad_output[i * n..(i + 1) * n];
            for l in 0..k {
                let b_row = &b.data[l * n..(l + 1) * n];
                ga[i * k + l] = g_row.iter().zip(b_row).map(|(g, b)| g * b).sum();
            }
        }
        ga
    });

    let grad_b = needs_grad[1].then(|| {
        let mut gb = vec![0.0; k * n];
        for i in 0..m {
            let g_row = &grad_output[i * n..(i + 1) * n];
            for l in 0..k {
                let a_il = a.data[i * k + l];
                for (dst, &g) in gb[l * n..(l + 1) * n].iter_mut().zip(g_row) {
                    *dst += a_il * g;
                }
            }
        }
        gb
    });

    Ok(vec![grad_a, grad_b])
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
