use super::*;
use crate::autograd::grad_check::{check_grad, GradCheckConfig};
use crate::utils::testing::{check_tensor_near, create_test_tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_linear_new_shapes_and_bounds() {
    let mut rng = StdRng::seed_from_u64(42);
    let layer = Linear::new(4, 3, true, &mut rng).unwrap();
    assert_eq!(layer.weight().shape(), vec![3, 4]);
    assert_eq!(layer.bias().unwrap().shape(), vec![3]);
    assert!(layer.weight().requires_grad());
    assert!(layer.weight().to_vec().iter().all(|w| w.abs() < 0.5));
    assert_eq!(layer.parameters().len(), 2);
    let names: Vec<String> = layer.named_parameters().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["weight", "bias"]);
}

#[test]
fn test_linear_forward_known_weights() {
    let w = create_test_tensor(vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0], vec![3, 2]);
    let b = create_test_tensor(vec![0.5, -0.5, 0.0], vec![3]);
    let layer = Linear::from_tensors(w, Some(b)).unwrap();
    let x = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let y = layer.forward(&x).unwrap();
    check_tensor_near(&y, &[2, 3], &[1.5, 1.5, 3.0, 3.5, 3.5, 7.0], 1e-12);
}

#[test]
fn test_linear_without_bias() {
    let mut rng = StdRng::seed_from_u64(0);
    let layer = Linear::new(2, 2, false, &mut rng).unwrap();
    assert!(layer.bias().is_none());
    assert_eq!(layer.parameters().len(), 1);
}

#[test]
fn test_linear_from_tensors_validates_bias() {
    let w = create_test_tensor(vec![0.0; 6], vec![3, 2]);
    let b = create_test_tensor(vec![0.0; 2], vec![2]);
    assert!(matches!(
        Linear::from_tensors(w, Some(b)),
        Err(TapeGradError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_linear_backward_reaches_parameters() {
    let mut rng = StdRng::seed_from_u64(7);
    let layer = Linear::new(3, 2, true, &mut rng).unwrap();
    let x = create_test_tensor(vec![1.0, 2.0, 3.0, -1.0, 0.0, 1.0], vec![2, 3]);
    layer.forward(&x).unwrap().sum().unwrap().backward().unwrap();
    // d(sum)/dW[o, i] = Σ_batch x[b, i]; d(sum)/db = batch size
    check_tensor_near(&layer.weight().grad().unwrap(), &[2, 3], &[0.0, 2.0, 4.0, 0.0, 2.0, 4.0], 1e-12);
    check_tensor_near(&layer.bias().unwrap().grad().unwrap(), &[2], &[2.0, 2.0], 1e-12);
}

#[test]
fn test_linear_check_grad() {
    let w = Tensor::create(vec![0.2, -0.4, 0.7, 0.1, 0.5, -0.3], vec![2, 3], true).unwrap();
    let b = Tensor::create(vec![0.05, -0.1], vec![2], true).unwrap();
    let x = Tensor::create(vec![1.0, -2.0, 0.5, 0.3, 0.8, -1.1], vec![2, 3], true).unwrap();
    let output_grad = tensor::ones(&[2, 2]).unwrap();
    let func = |inputs: &[Tensor]| {
        let layer = Linear::from_tensors(inputs[1].clone(), Some(inputs[2].clone()))?;
        layer.forward(&inputs[0])
    };
    check_grad(func, &[x, w, b], &output_grad, &GradCheckConfig::default()).unwrap();
}
