//! Gradient-mode context.
//!
//! A thread-local flag decides whether new operations record graph nodes.
//! Scopes nest: every guard remembers the state it replaced and restores it on
//! drop, including during unwinding.

use std::cell::Cell;
use std::marker::PhantomData;

thread_local! {
    static GRAD_ENABLED: Cell<bool> = const { Cell::new(true) };
}

/// Whether operations on this thread currently record graph nodes.
pub fn is_grad_enabled() -> bool {
    GRAD_ENABLED.with(Cell::get)
}

/// Sets the gradient mode for this thread and returns the previous mode.
pub fn set_grad_enabled(enabled: bool) -> bool {
    GRAD_ENABLED.with(|flag| flag.replace(enabled))
}

/// RAII guard disabling graph recording until dropped.
///
/// Tied to the thread that created it, so it is neither `Send` nor `Sync`.
#[must_use = "gradient recording is re-enabled as soon as the guard is dropped"]
pub struct NoGradGuard {
    previous: bool,
    _not_send: PhantomData<*const ()>,
}

impl NoGradGuard {
    pub fn new() -> Self {
        NoGradGuard {
            previous: set_grad_enabled(false),
            _not_send: PhantomData,
        }
    }
}

impl Default for NoGradGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NoGradGuard {
    fn drop(&mut self) {
        set_grad_enabled(self.previous);
    }
}

/// RAII guard re-enabling graph recording (e.g. inside a `no_grad` scope).
#[must_use = "the previous gradient mode is restored as soon as the guard is dropped"]
pub struct EnableGradGuard {
    previous: bool,
    _not_send: PhantomData<*const ()>,
}

impl EnableGradGuard {
    pub fn new() -> Self {
        EnableGradGuard {
            previous: set_grad_enabled(true),
            _not_send: PhantomData,
        }
    }
}

impl Default for EnableGradGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EnableGradGuard {
    fn drop(&mut self) {
        set_grad_enabled(self.previous);
    }
}

/// Runs `f` with graph recording disabled.
///
/// ```
/// use tapegrad_core::{no_grad, Tensor};
///
/// let w = Tensor::create(vec![1.0, 2.0], vec![2], true).unwrap();
/// let y = no_grad(|| w.mul_scalar(2.0)).unwrap();
/// assert!(!y.requires_grad());
/// assert!(y.grad_fn().is_none());
/// ```
pub fn no_grad<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = NoGradGuard::new();
    f()
}

/// Runs `f` with graph recording enabled.
pub fn enable_grad<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = EnableGradGuard::new();
    f()
}

#[cfg(test)]
#[path = "grad_mode_test.rs"]
mod tests;
