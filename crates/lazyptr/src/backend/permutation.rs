//! Permutation backend trait.

use crate::scalar::Scalar;
use crate::tensor::{Tensor, TensorView};

/// Backend trait for axis permutation.
///
/// `perm[i]` names the source axis that becomes axis `i` of `dest`.
pub trait PermutationBackend {
    /// Permute `src` into `dest`, which must already have the permuted shape.
    ///
    /// # Panics
    ///
    /// Panics if `dest`'s shape doesn't match the permutation of `src`'s.
    fn permute_into<ElT: Scalar>(dest: &mut Tensor<ElT>, src: &TensorView<'_, ElT>, perm: &[usize]);
}
