//! Error types for lazyptr.

use thiserror::Error;

/// Why a subsystem partition was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionFault {
    /// A subsystem index is not below the subsystem count.
    OutOfRange { index: usize, n: usize },
    /// A subsystem index appears twice within one sequence.
    Duplicate { index: usize },
    /// A subsystem index appears in both `sysa` and `sysb`.
    Overlap { index: usize },
}

impl std::fmt::Display for PartitionFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { index, n } => {
                write!(f, "subsystem {index} out of range for {n} subsystems")
            }
            Self::Duplicate { index } => write!(f, "subsystem {index} listed twice"),
            Self::Overlap { index } => write!(f, "subsystem {index} is in both sysa and sysb"),
        }
    }
}

/// Errors that can occur when building plans or applying reduced operators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TensorError {
    /// The kept/transposed index sets do not form a valid partition.
    #[error("invalid partition: {0}")]
    InvalidPartition(PartitionFault),

    /// A flat vector does not have the length implied by the dimensions.
    #[error("dimension mismatch: expected length {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Numerical failure inside the contraction primitive.
    #[error("arithmetic failure: {message}")]
    ArithmeticFailure { message: String },

    /// Subsystem dimension list is inconsistent with the partition.
    #[error("invalid dimensions {dims:?} for {n} subsystems")]
    InvalidDimensions { dims: Vec<usize>, n: usize },

    /// Shape mismatch between data length or contracted axes.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Index out of bounds.
    #[error("index out of bounds: index {index} is out of range for dimension {dim_size}")]
    IndexOutOfBounds { index: usize, dim_size: usize },

    /// Wrong number of indices or labels provided.
    #[error("wrong number of indices: expected {expected}, got {actual}")]
    WrongNumberOfIndices { expected: usize, actual: usize },

    /// Invalid permutation.
    #[error("invalid permutation {perm:?} for tensor with {ndim} dimensions")]
    InvalidPermutation { perm: Vec<usize>, ndim: usize },

    /// Label lists do not describe a valid contraction.
    #[error("invalid labels: {message}")]
    InvalidLabels { message: String },
}

impl From<PartitionFault> for TensorError {
    fn from(fault: PartitionFault) -> Self {
        Self::InvalidPartition(fault)
    }
}
