//! In-place parameter initialisers.
//!
//! Initialisation writes elements directly and never records graph nodes.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::TapeGradError;
use crate::tensor::Tensor;

/// Fills `tensor` with zeros.
pub fn zeros_(tensor: &Tensor) {
    fill_(tensor, 0.0);
}

/// Fills `tensor` with ones.
pub fn ones_(tensor: &Tensor) {
    fill_(tensor, 1.0);
}

pub fn fill_(tensor: &Tensor, value: f64) {
    tensor.update_data(|data| data.iter_mut().for_each(|v| *v = value));
}

/// Fills `tensor` with samples from `U(low, high)`.
pub fn uniform_<R: Rng + ?Sized>(tensor: &Tensor, low: f64, high: f64, rng: &mut R) -> Result<(), TapeGradError> {
    if !(low < high) {
        return Err(TapeGradError::InvalidHyperParameter {
            name: "uniform upper bound".to_string(),
            value: high,
        });
    }
    let dist = Uniform::new(low, high);
    tensor.update_data(|data| data.iter_mut().for_each(|v| *v = dist.sample(rng)));
    Ok(())
}

/// Default initialisation of a linear layer: `U(-1/√fan_in, 1/√fan_in)`.
pub fn fan_in_uniform_<R: Rng + ?Sized>(tensor: &Tensor, fan_in: usize, rng: &mut R) -> Result<(), TapeGradError> {
    if fan_in == 0 {
        return Err(TapeGradError::InvalidHyperParameter {
            name: "fan_in".to_string(),
            value: 0.0,
        });
    }
    let bound = 1.0 / (fan_in as f64).sqrt();
    uniform_(tensor, -bound, bound, rng)
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
