use std::collections::HashMap;

use log::{debug, trace};

use crate::error::TapeGradError;
use crate::tensor::Tensor;

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

/// Returns every tensor reachable from `root` through `grad_fn` inputs, in
/// post-order: each tensor appears after all of its inputs.
///
/// The traversal is iterative, so deep chains do not overflow the stack.
/// Tensors are identified by node, so a tensor reached along several paths is
/// listed once.
///
/// # Errors
/// `CycleDetected` if a tensor is reached again while its own inputs are still
/// being explored.
pub(crate) fn topological_sort(root: &Tensor) -> Result<Vec<Tensor>, TapeGradError> {
    let mut state: HashMap<usize, VisitState> = HashMap::new();
    let mut order = Vec::new();
    // (tensor, inputs already pushed)
    let mut stack: Vec<(Tensor, bool)> = vec![(root.clone(), false)];

    while let Some((tensor, expanded)) = stack.pop() {
        let id = tensor.node_id();
        if expanded {
            state.insert(id, VisitState::Done);
            order.push(tensor);
            continue;
        }
        match state.get(&id) {
            Some(VisitState::Done) => continue,
            Some(VisitState::InProgress) => return Err(TapeGradError::CycleDetected),
            None => {}
        }
        state.insert(id, VisitState::InProgress);

        let grad_fn = tensor.grad_fn();
        stack.push((tensor, true));
        if let Some(node) = grad_fn {
            for input in node.inputs().iter().rev() {
                if state.get(&input.node_id()) != Some(&VisitState::Done) {
                    stack.push((input.clone(), false));
                }
            }
        }
    }
    Ok(order)
}

/// Propagates `seed` (the gradient of `root`) to every leaf that requires
/// gradients.
///
/// Tensors are visited in reverse topological order, so a tensor's gradient is
/// complete (summed over all of its consumers) before its own node runs.
/// Intermediate gradients live only in the local map; leaves receive theirs by
/// accumulation into `grad`. The graph is left intact.
pub(crate) fn run_backward(root: &Tensor, seed: Vec<f64>) -> Result<(), TapeGradError> {
    let order = topological_sort(root)?;
    debug!(
        "backward: {} tensors reachable from root of shape {:?}",
        order.len(),
        root.shape()
    );

    let mut grads: HashMap<usize, Vec<f64>> = HashMap::new();
    grads.insert(root.node_id(), seed);
    let mut leaves_updated = 0usize;

    for tensor in order.iter().rev() {
        let Some(grad) = grads.remove(&tensor.node_id()) else {
            continue;
        };
        match tensor.grad_fn() {
            Some(node) => {
                trace!(
                    "backward through {} (output {:?})",
                    node.op().name(),
                    node.output_shape()
                );
                let input_grads = node.backward(&grad)?;
                for (input, input_grad) in node.inputs().iter().zip(input_grads) {
                    let Some(input_grad) = input_grad else {
                        continue;
                    };
                    grads
                        .entry(input.node_id())
                        .and_modify(|acc| {
                            acc.iter_mut().zip(&input_grad).for_each(|(a, g)| *a += g);
                        })
                        .or_insert(input_grad);
                }
            }
            None => {
                if tensor.requires_grad() {
                    tensor.accumulate_grad(&grad)?;
                    leaves_updated += 1;
                }
            }
        }
    }
    debug!("backward: accumulated gradients into {} leaves", leaves_updated);
    Ok(())
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
