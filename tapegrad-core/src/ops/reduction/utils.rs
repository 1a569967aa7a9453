//! Utility functions for reduction operations.

use crate::error::TapeGradError;
use crate::ops::Operand;
use crate::tensor::broadcast_utils::BroadcastIndexIter;

/// Shapes describing one reduction.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReductionShapes {
    /// Input shape with every reduced dimension set to 1.
    pub(crate) kept: Vec<usize>,
    /// Shape of the result (`kept`, or `kept` without the reduced dimensions).
    pub(crate) output: Vec<usize>,
    /// Number of input elements folded into each output element.
    pub(crate) count: usize,
}

/// Validates `axis` against the input rank and computes the reduction shapes.
///
/// `axis = None` reduces every dimension.
pub(crate) fn reduction_shapes(
    input_shape: &[usize],
    axis: Option<usize>,
    keep_dim: bool,
) -> Result<ReductionShapes, TapeGradError> {
    let rank = input_shape.len();
    if let Some(ax) = axis {
        if ax >= rank {
            return Err(TapeGradError::InvalidAxis { axis: ax, rank });
        }
    }
    let reduced = |d: usize| axis.map_or(true, |ax| ax == d);

    let kept: Vec<usize> = input_shape
        .iter()
        .enumerate()
        .map(|(d, &dim)| if reduced(d) { 1 } else { dim })
        .collect();
    let output = if keep_dim {
        kept.clone()
    } else {
        input_shape
            .iter()
            .enumerate()
            .filter(|(d, _)| !reduced(*d))
            .map(|(_, &dim)| dim)
            .collect()
    };
    let count = input_shape
        .iter()
        .enumerate()
        .filter(|(d, _)| reduced(*d))
        .map(|(_, &dim)| dim)
        .product();
    Ok(ReductionShapes { kept, output, count })
}

/// Sums `input` into a buffer laid out like `shapes.kept`.
///
/// Dropping size-1 dimensions does not change row-major layout, so the
/// buffer is valid for `shapes.output` as well.
pub(crate) fn sum_into_kept(input: &Operand, shapes: &ReductionShapes) -> Vec<f64> {
    let numel: usize = shapes.kept.iter().product();
    let mut out = vec![0.0; numel];
    for (&x, dst) in input.data.iter().zip(BroadcastIndexIter::new(&shapes.kept, &input.shape)) {
        out[dst] += x;
    }
    out
}

/// Spreads a reduced gradient back over the input shape, scaling every entry.
pub(crate) fn expand_from_kept(grad_output: &[f64], input_shape: &[usize], shapes: &ReductionShapes, scale: f64) -> Vec<f64> {
    BroadcastIndexIter::new(&shapes.kept, input_shape)
        .map(|src| grad_output[src] * scale)
        .collect()
}
