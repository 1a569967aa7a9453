// src/optim/mod.rs

//! Optimizers updating leaf parameters from their accumulated gradients.

pub mod optimizer_trait;
pub mod sgd;

pub use optimizer_trait::Optimizer;
pub use sgd::{Sgd, SgdConfig};
