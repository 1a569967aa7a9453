//! Reductions (sum, mean) over every element or along one axis.

pub mod mean;
pub mod sum;
pub(crate) mod utils;

pub use mean::mean_op;
pub use sum::sum_op;
