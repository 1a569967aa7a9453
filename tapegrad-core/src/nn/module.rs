use crate::error::TapeGradError;
use crate::nn::Parameter;
use crate::tensor::Tensor;

/// The base trait for all neural network modules (layers, containers, etc.).
pub trait Module: std::fmt::Debug + Send + Sync {
    /// Performs a forward pass of the module.
    fn forward(&self, input: &Tensor) -> Result<Tensor, TapeGradError>;

    /// All learnable parameters, including those of sub-modules.
    fn parameters(&self) -> Vec<&Parameter>;

    /// Parameters with hierarchical names (e.g. `"fc1.weight"`).
    fn named_parameters(&self) -> Vec<(String, &Parameter)>;

    /// Handles to the parameter tensors, as expected by optimizers.
    fn parameter_tensors(&self) -> Vec<Tensor> {
        self.parameters().into_iter().map(|p| p.tensor().clone()).collect()
    }

    /// Clears the gradient of every parameter.
    fn zero_grad(&self) {
        for param in self.parameters() {
            param.zero_grad();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::{ones, zeros};

    #[derive(Debug)]
    struct MockModule {
        param: Parameter,
    }

    impl MockModule {
        fn new() -> Result<Self, TapeGradError> {
            Ok(Self {
                param: Parameter::new_unnamed(zeros(&[1])?),
            })
        }
    }

    impl Module for MockModule {
        fn forward(&self, input: &Tensor) -> Result<Tensor, TapeGradError> {
            input.add(&self.param)
        }

        fn parameters(&self) -> Vec<&Parameter> {
            vec![&self.param]
        }

        fn named_parameters(&self) -> Vec<(String, &Parameter)> {
            let name = self.param.name().unwrap_or("param").to_string();
            vec![(name, &self.param)]
        }
    }

    #[test]
    fn test_module_parameters_retrieval() -> Result<(), TapeGradError> {
        let module = MockModule::new()?;
        let out = module.forward(&ones(&[2, 1])?)?;
        assert_eq!(out.shape(), vec![2, 1]);
        let params = module.parameters();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].shape(), vec![1]);
        assert_eq!(module.named_parameters()[0].0, "param");
        Ok(())
    }

    #[test]
    fn test_module_zero_grad() -> Result<(), TapeGradError> {
        let module = MockModule::new()?;
        module.forward(&ones(&[3, 1])?)?.sum()?.backward()?;
        assert_eq!(module.param.grad().unwrap().to_vec(), vec![3.0]);
        module.zero_grad();
        assert!(module.param.grad().is_none());
        Ok(())
    }

    #[test]
    fn test_parameter_tensors_share_nodes() -> Result<(), TapeGradError> {
        let module = MockModule::new()?;
        let tensors = module.parameter_tensors();
        assert!(tensors[0].same_node(module.param.tensor()));
        Ok(())
    }
}
