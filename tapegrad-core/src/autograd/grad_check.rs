//! Finite-difference gradient checking.

use approx::relative_eq;
use log::debug;
use thiserror::Error;

use crate::autograd::grad_mode::no_grad;
use crate::error::TapeGradError;
use crate::tensor::Tensor;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical_grad} != numerical {numerical_grad} (difference {difference})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function failed during gradient check: {0}")]
    ForwardPassError(TapeGradError),
    #[error("Backward pass failed during gradient check: {0}")]
    BackwardPassError(TapeGradError),
    #[error("Input {input_index} requires grad but has no gradient after the backward pass.")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Numerical gradient is not finite for input {input_index}, element {element_index} (loss+ {loss_plus}, loss- {loss_minus})")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is not finite for input {input_index}, element {element_index}: {value}")]
    AnalyticalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        value: f64,
    },
    #[error("Gradient check input {input_index} must be a leaf tensor.")]
    InputNotLeaf { input_index: usize },
    #[error("Output gradient shape {actual:?} does not match output shape {expected:?}")]
    OutputGradShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    #[error("Function did not propagate requires_grad to its output.")]
    RequiresGradPropagationError,
    #[error("Tensor error during gradient check: {0}")]
    TensorError(TapeGradError),
}

impl From<TapeGradError> for GradCheckError {
    fn from(err: TapeGradError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Step size and tolerances for [`check_grad`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradCheckConfig {
    /// Perturbation applied on each side of an element.
    pub epsilon: f64,
    /// Absolute tolerance, dominant for gradients near zero.
    pub abs_tolerance: f64,
    /// Relative tolerance, dominant for large gradients.
    pub rel_tolerance: f64,
}

impl Default for GradCheckConfig {
    fn default() -> Self {
        GradCheckConfig {
            epsilon: 1e-6,
            abs_tolerance: 1e-6,
            rel_tolerance: 1e-5,
        }
    }
}

/// `Σ output · output_grad`: the scalar whose gradient backward computes when
/// seeded with `output_grad`.
fn weighted_loss(output: &Tensor, output_grad: &[f64]) -> f64 {
    output
        .to_vec()
        .iter()
        .zip(output_grad)
        .map(|(o, g)| o * g)
        .sum()
}

/// Checks analytical gradients against central finite differences.
///
/// `func` is evaluated once with graph recording to obtain analytical gradients
/// by `backward_with_grad(output_grad)`, then twice per element of every input
/// that requires gradients (inside `no_grad`) with that element moved by
/// `±epsilon`. The numerical gradient `(L(x+ε) - L(x-ε)) / 2ε` of
/// `L = Σ output · output_grad` must match the analytical one within the
/// configured tolerances.
///
/// Inputs must be leaves; their existing gradients are cleared first.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    output_grad: &Tensor,
    config: &GradCheckConfig,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, TapeGradError>,
{
    for (input_index, input) in inputs.iter().enumerate() {
        if !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index });
        }
        if input.requires_grad() {
            input.zero_grad();
        }
    }

    // --- 1. Analytical gradients ---
    let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;
    if output.shape() != output_grad.shape() {
        return Err(GradCheckError::OutputGradShapeMismatch {
            expected: output.shape(),
            actual: output_grad.shape(),
        });
    }
    let any_input_requires_grad = inputs.iter().any(Tensor::requires_grad);
    if any_input_requires_grad && !output.requires_grad() {
        return Err(GradCheckError::RequiresGradPropagationError);
    }
    if output.requires_grad() {
        output
            .backward_with_grad(output_grad)
            .map_err(GradCheckError::BackwardPassError)?;
    }
    let seed = output_grad.to_vec();

    // --- 2. Numerical gradients, element by element ---
    for (input_index, original) in inputs.iter().enumerate() {
        if !original.requires_grad() {
            continue;
        }
        let analytical = original
            .grad()
            .ok_or(GradCheckError::MissingAnalyticalGrad { input_index })?
            .to_vec();
        let base = original.to_vec();
        let shape = original.shape();

        let loss_at = |element_index: usize, delta: f64| -> Result<f64, GradCheckError> {
            let mut data = base.clone();
            data[element_index] += delta;
            let mut perturbed_inputs = inputs.to_vec();
            perturbed_inputs[input_index] = Tensor::new(data, shape.clone())?;
            let out = no_grad(|| func(&perturbed_inputs)).map_err(GradCheckError::ForwardPassError)?;
            Ok(weighted_loss(&out, &seed))
        };

        for (element_index, &analytical_grad) in analytical.iter().enumerate() {
            if !analytical_grad.is_finite() {
                return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                    input_index,
                    element_index,
                    value: analytical_grad,
                });
            }
            let loss_plus = loss_at(element_index, config.epsilon)?;
            let loss_minus = loss_at(element_index, -config.epsilon)?;
            let numerical_grad = (loss_plus - loss_minus) / (2.0 * config.epsilon);
            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index,
                    element_index,
                    loss_plus,
                    loss_minus,
                });
            }
            if !relative_eq!(
                analytical_grad,
                numerical_grad,
                epsilon = config.abs_tolerance,
                max_relative = config.rel_tolerance
            ) {
                return Err(GradCheckError::GradientMismatch {
                    input_index,
                    element_index,
                    analytical_grad,
                    numerical_grad,
                    difference: (analytical_grad - numerical_grad).abs(),
                });
            }
        }
        debug!(
            "grad check passed for input {} ({} elements)",
            input_index,
            analytical.len()
        );
    }
    Ok(())
}
