//! Label-based tensor contraction.
//!
//! An axis label shared by two operands and absent from the requested output
//! is summed over; a label present in the output is a free axis, placed in
//! output order. This is the contraction primitive the lazy operators hand
//! their plans to.
//!
//! # Implementations
//!
//! - `naive`: loop-based pairwise contraction (fallback, handles every case)
//! - `gemm`: permute + faer GEMM pairwise contraction
//! - `einsum`: multi-operand contraction built from pairwise steps
//!
//! # Example
//!
//! ```
//! use lazyptr::Tensor;
//! use lazyptr::contract::contract;
//!
//! // Matrix multiplication: C[i,k] = A[i,j] * B[j,k]
//! let a = Tensor::<f64>::ones(&[2, 3]);
//! let b = Tensor::<f64>::ones(&[3, 4]);
//!
//! // labels: A[0,1], B[1,2] -> C[0,2]; label 1 is summed
//! let c = contract(&a.view(), &[0, 1], &b.view(), &[1, 2], &[0, 2]).unwrap();
//! assert_eq!(c.shape(), &[2, 4]);
//! ```

mod einsum;
mod gemm;
mod naive;
mod options;
mod properties;

pub use einsum::einsum;
pub use gemm::contract_gemm;
pub use naive::contract;
pub use options::{ContractBackend, ContractOptions, Parallelism};
pub use properties::ContractionProperties;

use crate::error::TensorError;
use crate::labels::Label;

/// Check that every operand has one label per axis.
pub(crate) fn check_rank(shape: &[usize], labels: &[Label]) -> Result<(), TensorError> {
    if labels.len() != shape.len() {
        return Err(TensorError::WrongNumberOfIndices {
            expected: shape.len(),
            actual: labels.len(),
        });
    }
    Ok(())
}

/// Collect `(label, size)` pairs in first-seen order.
///
/// Rejects a label repeated on one operand and a label whose axis sizes
/// disagree between operands.
pub(crate) fn label_sizes(
    operands: &[(&[Label], &[usize])],
) -> Result<Vec<(Label, usize)>, TensorError> {
    let mut sizes: Vec<(Label, usize)> = Vec::new();
    for (labels, shape) in operands {
        check_rank(shape, labels)?;
        for (axis, &label) in labels.iter().enumerate() {
            if labels[..axis].contains(&label) {
                return Err(TensorError::InvalidLabels {
                    message: format!("label {label} appears twice on one operand"),
                });
            }
            let known = sizes
                .iter()
                .find(|(l, _)| *l == label)
                .map(|&(_, size)| size);
            match known {
                Some(size) if size != shape[axis] => {
                    return Err(TensorError::ShapeMismatch {
                        expected: size,
                        actual: shape[axis],
                    });
                }
                Some(_) => {}
                None => sizes.push((label, shape[axis])),
            }
        }
    }
    Ok(sizes)
}

/// Check that output labels are distinct and each names an input axis.
pub(crate) fn check_keep(keep: &[Label], sizes: &[(Label, usize)]) -> Result<(), TensorError> {
    for (i, &label) in keep.iter().enumerate() {
        if keep[..i].contains(&label) {
            return Err(TensorError::InvalidLabels {
                message: format!("output label {label} repeated"),
            });
        }
        if !sizes.iter().any(|(l, _)| *l == label) {
            return Err(TensorError::InvalidLabels {
                message: format!("output label {label} not found on any operand"),
            });
        }
    }
    Ok(())
}

/// Size of `label` in a table built by [`label_sizes`].
pub(crate) fn size_of(sizes: &[(Label, usize)], label: Label) -> usize {
    sizes
        .iter()
        .find(|(l, _)| *l == label)
        .map_or(1, |&(_, size)| size)
}
