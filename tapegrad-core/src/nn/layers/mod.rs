// src/nn/layers/mod.rs

pub mod activation;
pub mod linear;

pub use activation::{ReLU, Sigmoid};
pub use linear::Linear;
