use crate::autograd::grad_check::{check_grad, GradCheckConfig};
use crate::error::TapeGradError;
use crate::ops::activation::relu_op;
use crate::tensor::{self, Tensor};
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad, grad_of};

#[test]
fn test_relu_forward() {
    let input = create_test_tensor(vec![-2.0, -0.5, 0.0, 0.5, 2.0], vec![5]);
    let output = relu_op(&input).unwrap();
    check_tensor_near(&output, &[5], &[0.0, 0.0, 0.0, 0.5, 2.0], 0.0);
}

#[test]
fn test_relu_backward_zero_at_origin() -> Result<(), TapeGradError> {
    let input = create_test_tensor_with_grad(vec![-1.0, 0.0, 3.0], vec![3]);
    let output = relu_op(&input)?;
    output.backward_with_grad(&tensor::ones(&[3])?)?;
    assert_eq!(grad_of(&input), vec![0.0, 0.0, 1.0]);
    Ok(())
}

#[test]
fn test_relu_check_grad() {
    // Values kept away from 0 where the derivative is discontinuous.
    let input = create_test_tensor_with_grad(vec![-1.5, -0.3, 0.4, 2.2, -0.8, 1.1], vec![2, 3]);
    let output_grad = Tensor::new(vec![1.0, 2.0, -1.0, 0.5, 3.0, -2.0], vec![2, 3]).unwrap();
    check_grad(|x: &[Tensor]| relu_op(&x[0]), &[input], &output_grad, &GradCheckConfig::default()).unwrap();
}
