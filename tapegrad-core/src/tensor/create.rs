// src/tensor/create.rs

use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

use crate::error::TapeGradError;
use crate::tensor::Tensor;

/// Creates a 0-d tensor holding `value`.
pub fn scalar(value: f64) -> Tensor {
    // A 0-d shape always has exactly one element.
    Tensor::from_data(crate::tensor_data::TensorData {
        buffer: std::sync::Arc::new(vec![value]),
        shape: vec![],
        requires_grad: false,
        grad: None,
        grad_fn: None,
    })
}

/// Creates a new tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Result<Tensor, TapeGradError> {
    full(shape, 0.0)
}

/// Creates a new tensor filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Result<Tensor, TapeGradError> {
    full(shape, 1.0)
}

/// Creates a new tensor filled with a specific value with the specified shape.
pub fn full(shape: &[usize], value: f64) -> Result<Tensor, TapeGradError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a new tensor filled with zeros, having the same shape as the input tensor.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, TapeGradError> {
    zeros(&tensor.shape())
}

/// Creates a new tensor filled with ones, having the same shape as the input tensor.
pub fn ones_like(tensor: &Tensor) -> Result<Tensor, TapeGradError> {
    ones(&tensor.shape())
}

/// Samples every element from `N(mean, std_dev)`.
pub fn randn<R: Rng + ?Sized>(
    shape: &[usize],
    mean: f64,
    std_dev: f64,
    rng: &mut R,
) -> Result<Tensor, TapeGradError> {
    let normal = Normal::new(mean, std_dev).map_err(|_| TapeGradError::InvalidHyperParameter {
        name: "std_dev".to_string(),
        value: std_dev,
    })?;
    let numel = shape.iter().product();
    let data: Vec<f64> = (0..numel).map(|_| normal.sample(rng)).collect();
    Tensor::new(data, shape.to_vec())
}

/// Samples every element uniformly from `[low, high)`.
pub fn rand_uniform<R: Rng + ?Sized>(
    shape: &[usize],
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<Tensor, TapeGradError> {
    if !(low < high) {
        return Err(TapeGradError::InvalidHyperParameter {
            name: "uniform upper bound".to_string(),
            value: high,
        });
    }
    let uniform = Uniform::new(low, high);
    let numel = shape.iter().product();
    let data: Vec<f64> = (0..numel).map(|_| uniform.sample(rng)).collect();
    Tensor::new(data, shape.to_vec())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
