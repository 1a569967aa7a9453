use crate::error::TapeGradError;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;

/// Runs a list of named modules one after the other.
#[derive(Debug, Default)]
pub struct Sequential {
    modules: Vec<Box<dyn Module>>,
    names: Vec<String>,
}

impl Sequential {
    pub fn new() -> Self {
        Sequential {
            modules: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Appends `module`; its parameters are reported as `"{name}.{param}"`.
    pub fn add_module(&mut self, name: &str, module: Box<dyn Module>) {
        self.modules.push(module);
        self.names.push(name.to_string());
    }

    /// Builder form of [`Sequential::add_module`].
    pub fn with(mut self, name: &str, module: Box<dyn Module>) -> Self {
        self.add_module(name, module);
        self
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Module for Sequential {
    fn forward(&self, input: &Tensor) -> Result<Tensor, TapeGradError> {
        let mut current = input.clone();
        for module in &self.modules {
            current = module.forward(&current)?;
        }
        Ok(current)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        self.modules.iter().flat_map(|m| m.parameters()).collect()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        let mut params = Vec::new();
        for (name, module) in self.names.iter().zip(self.modules.iter()) {
            for (param_name, param) in module.named_parameters() {
                params.push((format!("{}.{}", name, param_name), param));
            }
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nn::{Linear, ReLU};
    use crate::utils::testing::create_test_tensor;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mlp() -> Sequential {
        let mut rng = StdRng::seed_from_u64(3);
        Sequential::new()
            .with("fc1", Box::new(Linear::new(2, 4, true, &mut rng).unwrap()))
            .with("act", Box::new(ReLU::new()))
            .with("fc2", Box::new(Linear::new(4, 3, true, &mut rng).unwrap()))
    }

    #[test]
    fn test_sequential_forward_shape() {
        let model = mlp();
        assert_eq!(model.len(), 3);
        let x = create_test_tensor(vec![0.5, -1.0, 2.0, 0.1, 0.0, 0.0], vec![3, 2]);
        assert_eq!(model.forward(&x).unwrap().shape(), vec![3, 3]);
    }

    #[test]
    fn test_sequential_named_parameters() {
        let model = mlp();
        let names: Vec<String> = model.named_parameters().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["fc1.weight", "fc1.bias", "fc2.weight", "fc2.bias"]);
        assert_eq!(model.parameters().len(), 4);
    }

    #[test]
    fn test_empty_sequential_is_identity() {
        let model = Sequential::new();
        assert!(model.is_empty());
        let x = create_test_tensor(vec![1.0, 2.0], vec![2]);
        assert!(model.forward(&x).unwrap().same_node(&x));
    }

    #[test]
    fn test_sequential_zero_grad_clears_all() {
        let model = mlp();
        let x = create_test_tensor(vec![0.5, -1.0], vec![1, 2]);
        model.forward(&x).unwrap().sum().unwrap().backward().unwrap();
        assert!(model.parameters().iter().all(|p| p.grad().is_some()));
        model.zero_grad();
        assert!(model.parameters().iter().all(|p| p.grad().is_none()));
    }
}
