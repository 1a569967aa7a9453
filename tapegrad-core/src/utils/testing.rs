use crate::tensor::Tensor;

/// Checks that `actual` has `expected_shape` and that every element is within
/// `tolerance` of `expected_data`. Panics with the first offending index.
pub fn check_tensor_near(actual: &Tensor, expected_shape: &[usize], expected_data: &[f64], tolerance: f64) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");

    let actual_data = actual.to_vec();
    assert_eq!(actual_data.len(), expected_data.len(), "Data length mismatch");

    for (i, (a, e)) in actual_data.iter().zip(expected_data.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Gradient of `tensor`, panicking if none was accumulated.
pub fn grad_of(tensor: &Tensor) -> Vec<f64> {
    tensor
        .grad()
        .expect("tensor should have a gradient after backward")
        .to_vec()
}

pub fn create_test_tensor(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Failed to create test tensor")
}

pub fn create_test_tensor_with_grad(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    Tensor::create(data, shape, true).expect("Failed to create test tensor with grad")
}
