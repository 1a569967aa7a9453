//! # tapegrad-core
//!
//! A small reverse-mode automatic differentiation engine over `f64` tensors.
//!
//! Every operation applied to a tensor that requires gradients records an
//! [`OpNode`] pointing at its inputs. Calling [`Tensor::backward`] on a scalar
//! walks that graph in reverse topological order and accumulates gradients
//! into the leaf tensors.
//!
//! ```
//! use tapegrad_core::Tensor;
//!
//! let x = Tensor::create(vec![1.0, 2.0, 3.0], vec![3], true).unwrap();
//! let y = x.mul(&x).unwrap().mean().unwrap();
//! y.backward().unwrap();
//! // d/dx mean(x²) = 2x / 3
//! let grad = x.grad().unwrap().to_vec();
//! assert!((grad[2] - 2.0).abs() < 1e-12);
//! ```

pub mod autograd;
pub mod error;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod tensor;
pub mod tensor_data;
pub mod utils;

pub use autograd::{
    check_grad, enable_grad, is_grad_enabled, no_grad, set_grad_enabled, EnableGradGuard, GradCheckConfig,
    GradCheckError, NoGradGuard, OpNode,
};
pub use error::{ErrorKind, Result, TapeGradError};
pub use ops::Op;
pub use tensor::Tensor;
// Re-export traits required by public functions/structs
pub use num_traits;
