use crate::autograd::grad_check::{check_grad, GradCheckConfig};
use crate::error::TapeGradError;
use crate::ops::reduction::sum_op;
use crate::tensor::Tensor;
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad, grad_of};

#[test]
fn test_sum_all() {
    let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let result = sum_op(&t, None, false).unwrap();
    check_tensor_near(&result, &[], &[21.0], 1e-12);
    let kept = sum_op(&t, None, true).unwrap();
    check_tensor_near(&kept, &[1, 1], &[21.0], 1e-12);
}

#[test]
fn test_sum_axis() {
    let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    check_tensor_near(&sum_op(&t, Some(0), false).unwrap(), &[3], &[5.0, 7.0, 9.0], 1e-12);
    check_tensor_near(&sum_op(&t, Some(1), false).unwrap(), &[2], &[6.0, 15.0], 1e-12);
    check_tensor_near(&sum_op(&t, Some(1), true).unwrap(), &[2, 1], &[6.0, 15.0], 1e-12);
}

#[test]
fn test_sum_invalid_axis() {
    let t = create_test_tensor(vec![1.0, 2.0], vec![2]);
    assert_eq!(
        sum_op(&t, Some(1), false).unwrap_err(),
        TapeGradError::InvalidAxis { axis: 1, rank: 1 }
    );
}

#[test]
fn test_sum_backward_axis() -> Result<(), TapeGradError> {
    let t = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    let result = sum_op(&t, Some(0), false)?;
    result.backward_with_grad(&Tensor::new(vec![1.0, 2.0, 3.0], vec![3])?)?;
    assert_eq!(grad_of(&t), vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);
    Ok(())
}

#[test]
fn test_sum_all_backward() -> Result<(), TapeGradError> {
    let t = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0], vec![3]);
    sum_op(&t, None, false)?.backward()?;
    assert_eq!(grad_of(&t), vec![1.0, 1.0, 1.0]);
    Ok(())
}

#[test]
fn test_sum_check_grad_axis_keep_dim() {
    let t = create_test_tensor_with_grad(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6], vec![3, 2]);
    let output_grad = Tensor::new(vec![1.0, -2.0, 0.5], vec![3, 1]).unwrap();
    let func = |inputs: &[Tensor]| sum_op(&inputs[0], Some(1), true);
    check_grad(func, &[t], &output_grad, &GradCheckConfig::default()).unwrap();
}
