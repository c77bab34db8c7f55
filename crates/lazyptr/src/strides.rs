//! Stride computation utilities.
//!
//! Uses row-major (C) order: the first axis varies slowest. This is the
//! Kronecker-product convention of composite states, so a flat state vector
//! over subsystems `dims` is already a tensor of shape `dims`.

/// Compute row-major strides from shape.
///
/// For shape [d0, d1, d2], returns strides [d1*d2, d2, 1].
///
/// # Examples
///
/// ```
/// use lazyptr::strides::compute_strides;
///
/// assert_eq!(compute_strides(&[3, 4, 5]), vec![20, 5, 1]);
/// assert_eq!(compute_strides(&[2, 3]), vec![3, 1]);
/// assert_eq!(compute_strides(&[5]), vec![1]);
/// assert_eq!(compute_strides(&[]), vec![]);
/// ```
pub fn compute_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    let mut stride = 1;
    for (s, &dim) in strides.iter_mut().zip(shape.iter()).rev() {
        *s = stride;
        stride *= dim;
    }
    strides
}

/// Convert cartesian indices to a linear offset.
#[inline]
pub fn cartesian_to_linear(indices: &[usize], strides: &[usize]) -> usize {
    indices
        .iter()
        .zip(strides.iter())
        .map(|(&idx, &stride)| idx * stride)
        .sum()
}

/// Convert a linear offset to cartesian indices using row-major order.
pub fn linear_to_cartesian(mut linear: usize, shape: &[usize]) -> Vec<usize> {
    let mut indices = vec![0; shape.len()];
    for (idx, &dim) in indices.iter_mut().zip(shape.iter()).rev() {
        *idx = linear % dim;
        linear /= dim;
    }
    indices
}

/// Advance a row-major multi-index by one position.
///
/// Returns `false` once the index wraps past the last element.
#[inline]
pub fn increment_index(indices: &mut [usize], shape: &[usize]) -> bool {
    for (idx, &dim) in indices.iter_mut().zip(shape.iter()).rev() {
        *idx += 1;
        if *idx < dim {
            return true;
        }
        *idx = 0;
    }
    false
}
