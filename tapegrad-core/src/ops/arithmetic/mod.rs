//! Element-wise arithmetic with NumPy-style broadcasting.

use crate::error::TapeGradError;
use crate::ops::{ForwardOutput, InputGrads, Operand};
use crate::tensor::broadcast_utils::{broadcast_shapes, BroadcastIndexIter};

pub mod add;
pub mod div;
pub mod mul;
pub mod neg;
pub mod pow;
pub mod sub;

pub use add::add_op;
pub use div::div_op;
pub use mul::mul_op;
pub use neg::neg_op;
pub use pow::pow_op;
pub use sub::sub_op;

/// Broadcasts `a` and `b` against each other and combines them element-wise.
pub(crate) fn binary_forward<F>(a: &Operand, b: &Operand, op: F) -> Result<ForwardOutput, TapeGradError>
where
    F: Fn(f64, f64) -> f64,
{
    let output_shape = broadcast_shapes(&a.shape, &b.shape)?;
    let data = BroadcastIndexIter::new(&a.shape, &output_shape)
        .zip(BroadcastIndexIter::new(&b.shape, &output_shape))
        .map(|(ia, ib)| op(a.data[ia], b.data[ib]))
        .collect();
    Ok((data, output_shape))
}

/// Backward of a broadcasting binary op.
///
/// `da(x, y, g)` and `db(x, y, g)` give the contribution of one output element
/// to the gradient of the matching `a` and `b` elements. Contributions of
/// broadcast elements are summed back into the input's shape.
pub(crate) fn binary_backward<FA, FB>(
    a: &Operand,
    b: &Operand,
    grad_output: &[f64],
    needs_grad: &[bool],
    da: FA,
    db: FB,
) -> Result<InputGrads, TapeGradError>
where
    FA: Fn(f64, f64, f64) -> f64,
    FB: Fn(f64, f64, f64) -> f64,
{
    let output_shape = broadcast_shapes(&a.shape, &b.shape)?;
    let mut grad_a = needs_grad[0].then(|| vec![0.0; a.numel()]);
    let mut grad_b = needs_grad[1].then(|| vec![0.0; b.numel()]);

    let indices = BroadcastIndexIter::new(&a.shape, &output_shape)
        .zip(BroadcastIndexIter::new(&b.shape, &output_shape));
    for (&g, (ia, ib)) in grad_output.iter().zip(indices) {
        let (x, y) = (a.data[ia], b.data[ib]);
        if let Some(ga) = grad_a.as_mut() {
            ga[ia] += da(x, y, g);
        }
        if let Some(gb) = grad_b.as_mut() {
            gb[ib] += db(x, y, g);
        }
    }
    Ok(vec![grad_a, grad_b])
}
