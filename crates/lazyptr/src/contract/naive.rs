//! Loop-based pairwise contraction.

use crate::contract::{check_keep, label_sizes, size_of};
use crate::error::TensorError;
use crate::labels::Label;
use crate::scalar::Scalar;
use crate::strides::increment_index;
use crate::tensor::{Tensor, TensorView, shape_len};

/// Contract two tensors by label.
///
/// * labels in `keep` become the output axes, in `keep` order;
/// * every other label is summed over, whether it is shared by both operands
///   or carried by only one of them.
///
/// A label in `keep` that sits on both operands is a batch axis: it is
/// neither summed nor duplicated.
///
/// # Arguments
///
/// * `a` - First tensor
/// * `labels_a` - Labels for each axis of `a`
/// * `b` - Second tensor
/// * `labels_b` - Labels for each axis of `b`
/// * `keep` - Output labels
///
/// # Examples
///
/// ```
/// use lazyptr::Tensor;
/// use lazyptr::contract::contract;
///
/// let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
/// let v = Tensor::from_vec(vec![1.0, 1.0], &[2]).unwrap();
///
/// // y[i] = sum_j a[i,j] v[j]
/// let y = contract(&a.view(), &[0, 1], &v.view(), &[1], &[0]).unwrap();
/// assert_eq!(y.data(), &[3.0, 7.0]);
/// ```
pub fn contract<T: Scalar>(
    a: &TensorView<'_, T>,
    labels_a: &[Label],
    b: &TensorView<'_, T>,
    labels_b: &[Label],
    keep: &[Label],
) -> Result<Tensor<T>, TensorError> {
    let sizes = label_sizes(&[(labels_a, a.shape()), (labels_b, b.shape())])?;
    check_keep(keep, &sizes)?;

    // Loop slots: output labels first, then everything summed.
    let loop_labels: Vec<Label> = keep
        .iter()
        .copied()
        .chain(
            sizes
                .iter()
                .map(|&(l, _)| l)
                .filter(|l| !keep.contains(l)),
        )
        .collect();
    let loop_shape: Vec<usize> = loop_labels.iter().map(|&l| size_of(&sizes, l)).collect();
    let (out_shape, summed_shape) = loop_shape.split_at(keep.len());

    let step_a = slot_strides(&loop_labels, labels_a, &a.strides());
    let step_b = slot_strides(&loop_labels, labels_b, &b.strides());

    let mut result = Tensor::<T>::zeros(out_shape);
    if result.is_empty() || shape_len(summed_shape) == 0 {
        return Ok(result);
    }

    let data_a = a.data();
    let data_b = b.data();
    let k = keep.len();
    let mut idx = vec![0usize; loop_labels.len()];

    for out in result.data_mut().iter_mut() {
        let mut sum = T::zero();
        loop {
            let off_a = dot(&idx, &step_a);
            let off_b = dot(&idx, &step_b);
            sum = sum + data_a[off_a] * data_b[off_b];
            if !increment_index(&mut idx[k..], summed_shape) {
                break;
            }
        }
        *out = sum;
        increment_index(&mut idx[..k], out_shape);
    }

    Ok(result)
}

/// Stride contributed to each loop slot by one operand.
fn slot_strides(loop_labels: &[Label], labels: &[Label], strides: &[usize]) -> Vec<usize> {
    let mut steps = vec![0usize; loop_labels.len()];
    for (&label, &stride) in labels.iter().zip(strides.iter()) {
        if let Some(slot) = loop_labels.iter().position(|&l| l == label) {
            steps[slot] += stride;
        }
    }
    steps
}

#[inline]
fn dot(idx: &[usize], steps: &[usize]) -> usize {
    idx.iter().zip(steps.iter()).map(|(&i, &s)| i * s).sum()
}
