use super::*;
use crate::error::ErrorKind;
use crate::ops::arithmetic::add_op;
use crate::tensor;
use crate::utils::testing::{create_test_tensor, create_test_tensor_with_grad, grad_of};

#[test]
fn test_detach_basic() {
    let t1 = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0], vec![3]);
    let t1_added = add_op(&t1, &t1).unwrap();
    assert!(t1_added.requires_grad(), "Result of add should require grad");
    assert!(t1_added.grad_fn().is_some(), "Result of add should have grad_fn");

    let t2 = t1_added.detach();
    assert!(!t2.requires_grad(), "Detached tensor should not require grad");
    assert!(t2.grad_fn().is_none(), "Detached tensor should not have grad_fn");
    assert!(t2.grad().is_none(), "Detached tensor should not have grad");
    assert!(t2.is_leaf());
    assert_eq!(t1_added.shape(), t2.shape());
    assert_eq!(t1_added.to_vec(), t2.to_vec());
}

#[test]
fn test_requires_grad_on_non_leaf_is_rejected() {
    let a = create_test_tensor_with_grad(vec![1.0], vec![1]);
    let b = a.relu().unwrap();
    let err = b.requires_grad_(false).unwrap_err();
    assert_eq!(err, TapeGradError::RequiresGradOnNonLeaf);
    assert_eq!(err.kind(), ErrorKind::Graph);
}

#[test]
fn test_scalar_leaf_backward_accumulates_one() {
    let x = create_test_tensor_with_grad(vec![4.0], vec![]);
    x.backward().unwrap();
    assert_eq!(grad_of(&x), vec![1.0]);
    x.backward().unwrap();
    assert_eq!(grad_of(&x), vec![2.0]);
}

#[test]
fn test_backward_non_scalar_is_shape_error() {
    let x = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let y = x.mul_scalar(2.0).unwrap();
    let err = y.backward().unwrap_err();
    assert_eq!(err, TapeGradError::BackwardNonScalar { shape: vec![2] });
    assert_eq!(err.kind(), ErrorKind::Shape);
}

#[test]
fn test_backward_without_path_is_graph_error() {
    let x = create_test_tensor(vec![3.0], vec![1]);
    let err = x.backward().unwrap_err();
    assert_eq!(err, TapeGradError::NoGradientPath);
    assert_eq!(err.kind(), ErrorKind::Graph);
}

#[test]
fn test_backward_with_grad_checks_seed_shape() {
    let x = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let y = x.mul_scalar(2.0).unwrap();
    let bad_seed = tensor::ones(&[3]).unwrap();
    assert!(matches!(
        y.backward_with_grad(&bad_seed),
        Err(TapeGradError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_second_backward_doubles_gradient() {
    let x = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0], vec![4]);
    let z = x.pow(2.0).unwrap().mean().unwrap();
    z.backward().unwrap();
    assert_eq!(grad_of(&x), vec![0.5, 1.0, 1.5, 2.0]);
    z.backward().unwrap();
    assert_eq!(grad_of(&x), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_zero_grad_then_backward_is_repeatable() {
    let x = create_test_tensor_with_grad(vec![1.0, -1.0], vec![2]);
    let z = x.mul(&x).unwrap().sum().unwrap();
    z.backward().unwrap();
    let first = grad_of(&x);
    x.zero_grad();
    assert!(x.grad().is_none());
    z.backward().unwrap();
    assert_eq!(grad_of(&x), first);
}

#[test]
fn test_earlier_grad_handle_is_not_mutated() {
    let x = create_test_tensor_with_grad(vec![2.0], vec![]);
    x.backward().unwrap();
    let first = x.grad().unwrap();
    x.backward().unwrap();
    assert_eq!(first.to_vec(), vec![1.0]);
    assert_eq!(grad_of(&x), vec![2.0]);
}

#[test]
fn test_requires_grad_false_keeps_existing_grad() {
    let x = create_test_tensor_with_grad(vec![2.0], vec![]);
    x.backward().unwrap();
    x.requires_grad_(false).unwrap();
    assert!(!x.requires_grad());
    assert_eq!(grad_of(&x), vec![1.0]);
}

#[test]
fn test_update_data_does_not_touch_detached_copy() {
    let w = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let snapshot = w.detach();
    w.update_data(|data| data.iter_mut().for_each(|v| *v -= 1.0));
    assert_eq!(w.to_vec(), vec![0.0, 1.0]);
    assert_eq!(snapshot.to_vec(), vec![1.0, 2.0]);
    assert!(w.is_leaf());
    assert!(w.requires_grad());
}
