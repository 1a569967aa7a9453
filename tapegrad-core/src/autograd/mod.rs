//! # Automatic differentiation
//!
//! - [`OpNode`]: the record of one primitive, stored as the `grad_fn` of the
//!   tensor it produced.
//! - `graph`: topological ordering and the reverse sweep behind
//!   [`Tensor::backward`](crate::Tensor::backward).
//! - [`grad_mode`]: the thread-local switch deciding whether operations are
//!   recorded at all.
//! - [`grad_check`]: finite-difference verification of backward rules.

pub mod grad_check;
pub mod grad_mode;
pub(crate) mod graph;
mod node;

pub use grad_check::{check_grad, GradCheckConfig, GradCheckError};
pub use grad_mode::{enable_grad, is_grad_enabled, no_grad, set_grad_enabled, EnableGradGuard, NoGradGuard};
pub use node::OpNode;
