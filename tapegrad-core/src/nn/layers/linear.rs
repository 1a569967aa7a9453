use rand::Rng;

use crate::error::TapeGradError;
use crate::nn::init::fan_in_uniform_;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::tensor::{self, Tensor};

/// Applies a linear transformation to the incoming data: `y = x Wᵀ + b`.
///
/// `x` is `[batch, in_features]`, `W` is `[out_features, in_features]` and
/// `b` is `[out_features]`, broadcast over the batch.
#[derive(Debug)]
pub struct Linear {
    weight: Parameter,
    bias: Option<Parameter>,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    /// Creates a layer with weights and bias drawn from
    /// `U(-1/√in_features, 1/√in_features)`.
    ///
    /// # Errors
    /// `InvalidHyperParameter` if `in_features` is 0.
    pub fn new<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        has_bias: bool,
        rng: &mut R,
    ) -> Result<Self, TapeGradError> {
        let weight = tensor::zeros(&[out_features, in_features])?;
        fan_in_uniform_(&weight, in_features, rng)?;
        let bias = if has_bias {
            let bias = tensor::zeros(&[out_features])?;
            fan_in_uniform_(&bias, in_features, rng)?;
            Some(Parameter::new(bias, Some("bias".to_string())))
        } else {
            None
        };
        Ok(Linear {
            weight: Parameter::new(weight, Some("weight".to_string())),
            bias,
            in_features,
            out_features,
        })
    }

    /// Builds a layer from explicit tensors.
    ///
    /// # Errors
    /// `RankMismatch` if `weight` is not 2-D, `ShapeMismatch` if `bias` is not
    /// `[out_features]`.
    pub fn from_tensors(weight: Tensor, bias: Option<Tensor>) -> Result<Self, TapeGradError> {
        let (out_features, in_features) = match weight.shape()[..] {
            [out, inp] => (out, inp),
            _ => {
                return Err(TapeGradError::RankMismatch {
                    expected: 2,
                    actual: weight.shape(),
                    operation: "Linear::from_tensors".to_string(),
                })
            }
        };
        if let Some(b) = &bias {
            if b.shape() != [out_features] {
                return Err(TapeGradError::ShapeMismatch {
                    expected: vec![out_features],
                    actual: b.shape(),
                    operation: "Linear::from_tensors".to_string(),
                });
            }
        }
        Ok(Linear {
            weight: Parameter::new(weight, Some("weight".to_string())),
            bias: bias.map(|b| Parameter::new(b, Some("bias".to_string()))),
            in_features,
            out_features,
        })
    }

    pub fn weight(&self) -> &Parameter {
        &self.weight
    }

    pub fn bias(&self) -> Option<&Parameter> {
        self.bias.as_ref()
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

impl Module for Linear {
    fn forward(&self, input: &Tensor) -> Result<Tensor, TapeGradError> {
        let output = input.matmul(&self.weight.transpose()?)?;
        match &self.bias {
            Some(bias) => output.add(bias),
            None => Ok(output),
        }
    }

    fn parameters(&self) -> Vec<&Parameter> {
        let mut params = vec![&self.weight];
        params.extend(self.bias.as_ref());
        params
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        let mut named = vec![("weight".to_string(), &self.weight)];
        if let Some(bias) = &self.bias {
            named.push(("bias".to_string(), bias));
        }
        named
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
