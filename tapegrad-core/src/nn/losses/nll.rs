use crate::error::TapeGradError;
use crate::tensor::Tensor;

/// Mean negative log-likelihood of log-probabilities `[N, C]`.
#[derive(Debug, Default, Clone)]
pub struct NllLoss;

impl NllLoss {
    pub fn new() -> Self {
        NllLoss
    }

    pub fn forward(&self, log_probs: &Tensor, targets: &[usize]) -> Result<Tensor, TapeGradError> {
        log_probs.nll_loss(targets)
    }
}
