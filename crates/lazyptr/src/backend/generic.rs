//! Generic (loop-based) backend implementation.

use crate::backend::PermutationBackend;
use crate::scalar::Scalar;
use crate::strides::increment_index;
use crate::tensor::{Tensor, TensorView};

/// Loop-based backend, always available.
pub struct GenericBackend;

impl PermutationBackend for GenericBackend {
    fn permute_into<ElT: Scalar>(dest: &mut Tensor<ElT>, src: &TensorView<'_, ElT>, perm: &[usize]) {
        assert_eq!(dest.ndim(), perm.len(), "permutation rank mismatch");
        for (i, &p) in perm.iter().enumerate() {
            assert_eq!(dest.shape()[i], src.shape()[p], "permuted shape mismatch");
        }

        // Walk dest in storage order and gather from src through permuted strides.
        let src_strides = src.strides();
        let gather: Vec<usize> = perm.iter().map(|&p| src_strides[p]).collect();
        let shape = dest.shape().to_vec();
        let src_data = src.data();

        let mut idx = vec![0usize; shape.len()];
        let mut offset = 0usize;
        for out in dest.data_mut().iter_mut() {
            *out = src_data[offset];
            if !increment_index(&mut idx, &shape) {
                break;
            }
            offset = idx.iter().zip(gather.iter()).map(|(&i, &s)| i * s).sum();
        }
    }
}
