use crate::autograd::grad_check::{check_grad, GradCheckConfig};
use crate::error::TapeGradError;
use crate::ops::loss::{cross_entropy_op, log_softmax_op, nll_loss_op};
use crate::tensor::{self, Tensor};
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

#[test]
fn test_cross_entropy_uniform_logits_is_ln2() {
    let logits = create_test_tensor(vec![0.0, 0.0], vec![1, 2]);
    let loss = cross_entropy_op(&logits, &[0]).unwrap();
    check_tensor_near(&loss, &[], &[2.0_f64.ln()], 1e-12);
}

#[test]
fn test_cross_entropy_large_logits_stay_finite() {
    let logits = create_test_tensor(vec![1000.0, 1000.0, -1000.0, 1000.0], vec![2, 2]);
    let loss = cross_entropy_op(&logits, &[0, 1]).unwrap();
    // row 0: ln 2, row 1: ~0
    check_tensor_near(&loss, &[], &[2.0_f64.ln() / 2.0], 1e-12);
}

#[test]
fn test_cross_entropy_matches_nll_of_log_softmax() -> Result<(), TapeGradError> {
    let data = vec![0.3, -1.2, 2.1, 0.0, 0.5, -0.5];
    let fused_in = create_test_tensor_with_grad(data.clone(), vec![2, 3]);
    let split_in = create_test_tensor_with_grad(data, vec![2, 3]);

    let fused = cross_entropy_op(&fused_in, &[2, 1])?;
    let split = nll_loss_op(&log_softmax_op(&split_in)?, &[2, 1])?;
    assert!((fused.item()? - split.item()?).abs() < 1e-12);

    fused.backward()?;
    split.backward()?;
    let split_grad = split_in.grad().unwrap().to_vec();
    check_tensor_near(&fused_in.grad().unwrap(), &[2, 3], &split_grad, 1e-12);
    Ok(())
}

#[test]
fn test_cross_entropy_backward_single_row() -> Result<(), TapeGradError> {
    let logits = create_test_tensor_with_grad(vec![0.0, 0.0], vec![1, 2]);
    cross_entropy_op(&logits, &[0])?.backward()?;
    check_tensor_near(&logits.grad().unwrap(), &[1, 2], &[-0.5, 0.5], 1e-12);
    Ok(())
}

#[test]
fn test_cross_entropy_check_grad() {
    let logits = create_test_tensor_with_grad(
        vec![0.1, 0.9, -0.4, 1.2, -2.0, 0.3, 0.7, 0.0, -0.6],
        vec![3, 3],
    );
    let output_grad = tensor::scalar(1.0);
    let func = |inputs: &[Tensor]| cross_entropy_op(&inputs[0], &[1, 0, 2]);
    check_grad(func, &[logits], &output_grad, &GradCheckConfig::default()).unwrap();
}
