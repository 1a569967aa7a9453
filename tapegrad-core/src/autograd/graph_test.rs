use super::*;
use crate::autograd::OpNode;
use crate::error::TapeGradError;
use crate::ops::Op;
use crate::utils::testing::{create_test_tensor, create_test_tensor_with_grad, grad_of};

fn position(order: &[Tensor], t: &Tensor) -> usize {
    order
        .iter()
        .position(|x| x.same_node(t))
        .expect("tensor should be in the topological order")
}

#[test]
fn test_topological_sort_inputs_before_outputs() {
    let a = create_test_tensor_with_grad(vec![1.0], vec![1]);
    let b = create_test_tensor_with_grad(vec![2.0], vec![1]);
    let c = a.mul(&b).unwrap();
    let d = c.add(&a).unwrap();

    let order = topological_sort(&d).unwrap();
    assert_eq!(order.len(), 4);
    assert!(position(&order, &a) < position(&order, &c));
    assert!(position(&order, &b) < position(&order, &c));
    assert!(position(&order, &c) < position(&order, &d));
    assert_eq!(position(&order, &d), 3);
}

#[test]
fn test_topological_sort_diamond_lists_shared_node_once() {
    let x = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let h = x.relu().unwrap();
    let left = h.mul_scalar(2.0).unwrap();
    let right = h.add_scalar(1.0).unwrap();
    let out = left.add(&right).unwrap();

    let order = topological_sort(&out).unwrap();
    let h_count = order.iter().filter(|t| t.same_node(&h)).count();
    assert_eq!(h_count, 1);
    assert!(position(&order, &h) < position(&order, &left));
    assert!(position(&order, &h) < position(&order, &right));
}

#[test]
fn test_topological_sort_long_chain() {
    let x = create_test_tensor_with_grad(vec![0.5], vec![1]);
    let mut y = x.clone();
    for _ in 0..1_000 {
        y = y.add_scalar(0.0).unwrap();
    }
    let order = topological_sort(&y).unwrap();
    assert_eq!(order.len(), 1_001);
}

#[test]
fn test_cycle_is_detected() {
    let a = create_test_tensor(vec![1.0], vec![1]);
    let b = create_test_tensor(vec![1.0], vec![1]);
    OpNode::attach(&a, Op::Neg, vec![b.clone()]);
    OpNode::attach(&b, Op::Neg, vec![a.clone()]);
    assert_eq!(topological_sort(&a).unwrap_err(), TapeGradError::CycleDetected);
    // Break the cycle so the test does not leak.
    a.write_data().grad_fn = None;
}

#[test]
fn test_fan_out_gradients_are_summed() {
    // y = x * 2 + x  => dy/dx = 3
    let x = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let y = x.mul_scalar(2.0).unwrap().add(&x).unwrap();
    run_backward(&y, vec![1.0, 1.0]).unwrap();
    assert_eq!(grad_of(&x), vec![3.0, 3.0]);
}

#[test]
fn test_only_leaves_keep_gradients() {
    let x = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let h = x.mul_scalar(3.0).unwrap();
    let y = h.sum().unwrap();
    y.backward().unwrap();
    assert_eq!(grad_of(&x), vec![3.0, 3.0]);
    assert!(h.grad().is_none());
    assert!(y.grad().is_none());
}

#[test]
fn test_constant_branch_is_skipped() {
    let x = create_test_tensor_with_grad(vec![2.0], vec![1]);
    let c = create_test_tensor(vec![5.0], vec![1]);
    let y = x.mul(&c).unwrap();
    run_backward(&y, vec![1.0]).unwrap();
    assert_eq!(grad_of(&x), vec![5.0]);
    assert!(c.grad().is_none());
}
