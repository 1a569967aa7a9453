use thiserror::Error;

/// Broad category of a [`TapeGradError`].
///
/// Shape and graph errors are contract violations detected at the call that
/// triggers them. Numeric errors are raised by the operation that produced the
/// offending value instead of letting NaN/inf flow into later computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Shape,
    Graph,
    Numeric,
    Data,
    Config,
    Internal,
}

/// Custom error type for the tapegrad framework.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum TapeGradError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Operation {operation} expects rank {expected}, got shape {actual:?}")]
    RankMismatch {
        expected: usize,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Axis {axis} is out of range for a tensor of rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    #[error("Operation {operation} expects {expected} input tensor(s), got {actual}")]
    ArityMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Target class {target} at row {row} is out of range for {num_classes} classes")]
    TargetOutOfRange {
        row: usize,
        target: usize,
        num_classes: usize,
    },

    #[error("Got {actual} targets for a batch of {expected} rows")]
    TargetCountMismatch { expected: usize, actual: usize },

    #[error("Backward called on non-scalar tensor of shape {shape:?} without explicit gradient.")]
    BackwardNonScalar { shape: Vec<usize> },

    #[error("Backward called on a tensor that neither requires grad nor has a grad_fn: nothing to propagate.")]
    NoGradientPath,

    #[error("Cycle detected in the computation graph during backward pass.")]
    CycleDetected,

    #[error("requires_grad can only be changed on leaf tensors.")]
    RequiresGradOnNonLeaf,

    #[error("Operation {operation} produced a non-finite value {value} at flat index {index}")]
    NonFinite {
        operation: String,
        index: usize,
        value: f64,
    },

    #[error("Backward rule of {operation} returned a gradient of {actual} elements for input {input_index} holding {expected}")]
    GradientShapeMismatch {
        operation: String,
        input_index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Index {index} is out of bounds for a dataset of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Invalid value {value} for hyper-parameter {name}")]
    InvalidHyperParameter { name: String, value: f64 },

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl TapeGradError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TapeGradError::ShapeMismatch { .. }
            | TapeGradError::BroadcastError { .. }
            | TapeGradError::TensorCreationError { .. }
            | TapeGradError::RankMismatch { .. }
            | TapeGradError::InvalidAxis { .. }
            | TapeGradError::ArityMismatch { .. }
            | TapeGradError::TargetOutOfRange { .. }
            | TapeGradError::TargetCountMismatch { .. }
            | TapeGradError::BackwardNonScalar { .. } => ErrorKind::Shape,
            TapeGradError::NoGradientPath
            | TapeGradError::CycleDetected
            | TapeGradError::RequiresGradOnNonLeaf => ErrorKind::Graph,
            TapeGradError::NonFinite { .. } => ErrorKind::Numeric,
            TapeGradError::IndexOutOfBounds { .. } => ErrorKind::Data,
            TapeGradError::InvalidHyperParameter { .. } => ErrorKind::Config,
            TapeGradError::GradientShapeMismatch { .. }
            | TapeGradError::InternalError(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, TapeGradError>;
