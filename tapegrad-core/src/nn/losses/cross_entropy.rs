use crate::error::TapeGradError;
use crate::tensor::Tensor;

/// Mean cross-entropy between raw logits `[N, C]` and integer class targets.
///
/// Uses the fused, numerically stable kernel; the result equals
/// `NllLoss` applied to `logits.log_softmax()`.
#[derive(Debug, Default, Clone)]
pub struct CrossEntropyLoss;

impl CrossEntropyLoss {
    pub fn new() -> Self {
        CrossEntropyLoss
    }

    pub fn forward(&self, logits: &Tensor, targets: &[usize]) -> Result<Tensor, TapeGradError> {
        logits.cross_entropy(targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nn::losses::NllLoss;
    use crate::utils::testing::{create_test_tensor_with_grad, grad_of};
    use approx::assert_relative_eq;

    #[test]
    fn test_cross_entropy_loss_uniform_logits() {
        let logits = create_test_tensor_with_grad(vec![0.0, 0.0], vec![1, 2]);
        let loss = CrossEntropyLoss::new().forward(&logits, &[1]).unwrap();
        assert_relative_eq!(loss.item().unwrap(), std::f64::consts::LN_2, epsilon = 1e-12);
        loss.backward().unwrap();
        let g = grad_of(&logits);
        assert_relative_eq!(g[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(g[1], -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_cross_entropy_loss_matches_nll_module() {
        let data = vec![1.0, -0.5, 2.0, 0.3, 0.3, -1.2];
        let a = create_test_tensor_with_grad(data.clone(), vec![2, 3]);
        let b = create_test_tensor_with_grad(data, vec![2, 3]);
        let fused = CrossEntropyLoss::new().forward(&a, &[2, 0]).unwrap();
        let split = NllLoss::new().forward(&b.log_softmax().unwrap(), &[2, 0]).unwrap();
        assert_relative_eq!(fused.item().unwrap(), split.item().unwrap(), epsilon = 1e-12);
        fused.backward().unwrap();
        split.backward().unwrap();
        for (x, y) in grad_of(&a).iter().zip(grad_of(&b).iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-12);
        }
    }
}
