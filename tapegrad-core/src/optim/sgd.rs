use log::debug;

use crate::autograd::grad_mode::NoGradGuard;
use crate::error::TapeGradError;
use crate::optim::optimizer_trait::Optimizer;
use crate::tensor::Tensor;

/// Hyper-parameters of [`Sgd`].
#[derive(Debug, Clone, PartialEq)]
pub struct SgdConfig {
    pub lr: f64,
    /// Momentum factor in `[0, 1)`. `0.0` disables the velocity buffers.
    pub momentum: f64,
    /// L2 penalty added to the gradient as `weight_decay * p`.
    pub weight_decay: f64,
    pub nesterov: bool,
}

impl Default for SgdConfig {
    fn default() -> Self {
        SgdConfig {
            lr: 0.01,
            momentum: 0.0,
            weight_decay: 0.0,
            nesterov: false,
        }
    }
}

/// Stochastic gradient descent with optional momentum and weight decay.
///
/// With momentum the update is `v = μ·v + g; p -= lr·v`, or
/// `p -= lr·(g + μ·v)` in the Nesterov variant.
#[derive(Debug)]
pub struct Sgd {
    params: Vec<Tensor>,
    config: SgdConfig,
    velocity: Vec<Option<Vec<f64>>>,
    steps: usize,
}

impl Sgd {
    /// # Errors
    /// `InvalidHyperParameter` if `lr <= 0`, `momentum` is outside `[0, 1)`,
    /// or `weight_decay < 0`.
    pub fn new(params: Vec<Tensor>, config: SgdConfig) -> Result<Self, TapeGradError> {
        if !(config.lr > 0.0) {
            return Err(invalid("lr", config.lr));
        }
        if !(0.0..1.0).contains(&config.momentum) {
            return Err(invalid("momentum", config.momentum));
        }
        if !(config.weight_decay >= 0.0) {
            return Err(invalid("weight_decay", config.weight_decay));
        }
        let velocity = vec![None; params.len()];
        Ok(Sgd {
            params,
            config,
            velocity,
            steps: 0,
        })
    }

    pub fn config(&self) -> &SgdConfig {
        &self.config
    }

    pub fn lr(&self) -> f64 {
        self.config.lr
    }

    /// Changes the learning rate used by subsequent steps.
    pub fn set_lr(&mut self, lr: f64) -> Result<(), TapeGradError> {
        if !(lr > 0.0) {
            return Err(invalid("lr", lr));
        }
        self.config.lr = lr;
        Ok(())
    }

    pub fn params(&self) -> &[Tensor] {
        &self.params
    }
}

fn invalid(name: &str, value: f64) -> TapeGradError {
    TapeGradError::InvalidHyperParameter {
        name: name.to_string(),
        value,
    }
}

impl Optimizer for Sgd {
    fn step(&mut self) -> Result<(), TapeGradError> {
        let _guard = NoGradGuard::new();
        let SgdConfig {
            lr,
            momentum,
            weight_decay,
            nesterov,
        } = self.config;
        let mut updated = 0;

        for (param, velocity) in self.params.iter().zip(self.velocity.iter_mut()) {
            let grad = match param.grad() {
                Some(g) => g.to_vec(),
                None => continue,
            };
            let values = param.to_vec();
            let d_p: Vec<f64> = grad
                .iter()
                .zip(values.iter())
                .map(|(g, p)| g + weight_decay * p)
                .collect();

            let direction = if momentum != 0.0 {
                let buffer = velocity.get_or_insert_with(|| vec![0.0; d_p.len()]);
                for (v, g) in buffer.iter_mut().zip(d_p.iter()) {
                    *v = momentum * *v + g;
                }
                if nesterov {
                    d_p.iter().zip(buffer.iter()).map(|(g, v)| g + momentum * v).collect()
                } else {
                    buffer.clone()
                }
            } else {
                d_p
            };

            param.update_data(|data| {
                for (p, d) in data.iter_mut().zip(direction.iter()) {
                    *p -= lr * d;
                }
            });
            updated += 1;
        }

        self.steps += 1;
        debug!("sgd step {}: updated {} of {} parameters (lr={})", self.steps, updated, self.params.len(), lr);
        Ok(())
    }

    fn zero_grad(&self) {
        for param in &self.params {
            param.zero_grad();
        }
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
