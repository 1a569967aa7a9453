// src/nn/mod.rs

//! Layers, containers and losses built on the primitive operations.

pub mod init;
pub mod layers;
pub mod losses;
pub mod module;
pub mod parameter;
pub mod sequential;

pub use layers::{Linear, ReLU, Sigmoid};
pub use losses::{CrossEntropyLoss, NllLoss};
pub use module::Module;
pub use parameter::Parameter;
pub use sequential::Sequential;
