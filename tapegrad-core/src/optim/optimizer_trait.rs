use crate::error::TapeGradError;

/// Common interface of all optimizers.
pub trait Optimizer {
    /// Updates every managed parameter that currently holds a gradient.
    /// Parameters without a gradient are left untouched.
    fn step(&mut self) -> Result<(), TapeGradError>;

    /// Clears the gradients of all managed parameters.
    fn zero_grad(&self);
}
