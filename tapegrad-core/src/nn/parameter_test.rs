use super::*;
use crate::utils::testing::create_test_tensor;

#[test]
fn test_parameter_requires_grad() {
    let t = create_test_tensor(vec![1.0, 2.0], vec![2]);
    assert!(!t.requires_grad());
    let p = Parameter::new_unnamed(t.clone());
    assert!(p.requires_grad());
    assert!(p.is_leaf());
    // Same node as the wrapped tensor.
    assert!(t.requires_grad());
    assert!(p.tensor().same_node(&t));
}

#[test]
fn test_parameter_from_non_leaf_is_detached() {
    let t = Tensor::create(vec![1.0, -1.0], vec![2], true).unwrap();
    let derived = t.relu().unwrap();
    let p = Parameter::new(derived, Some("w".to_string()));
    assert!(p.is_leaf());
    assert!(p.requires_grad());
    assert_eq!(p.name(), Some("w"));
    assert_eq!(p.to_vec(), vec![1.0, 0.0]);
}

#[test]
fn test_parameter_debug_includes_name() {
    let p = Parameter::new(create_test_tensor(vec![0.0], vec![1]), Some("bias".to_string()));
    assert!(format!("{:?}", p).starts_with("Parameter(bias"));
}
