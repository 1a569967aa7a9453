//! Shape-only operations. The element buffer is copied unchanged.

pub mod reshape;

pub use reshape::{flatten_op, reshape_op};
