//! Dense n-dimensional tensors in row-major order.
//!
//! Two flavours share the same layout rules:
//!
//! ```text
//! Tensor<ElT>          owns its Vec<ElT>      (contraction results, conjugated bra)
//! TensorView<'a, ElT>  borrows a &[ElT]       (caller's state and input vectors)
//! ```
//!
//! A rank-0 tensor (empty shape) holds exactly one element.

use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::strides::{cartesian_to_linear, compute_strides};

/// Number of elements implied by `shape` (1 for rank 0).
#[inline]
pub fn shape_len(shape: &[usize]) -> usize {
    shape.iter().product()
}

fn check_indices(indices: &[usize], shape: &[usize]) -> Result<(), TensorError> {
    if indices.len() != shape.len() {
        return Err(TensorError::WrongNumberOfIndices {
            expected: shape.len(),
            actual: indices.len(),
        });
    }
    for (&idx, &dim) in indices.iter().zip(shape.iter()) {
        if idx >= dim {
            return Err(TensorError::IndexOutOfBounds {
                index: idx,
                dim_size: dim,
            });
        }
    }
    Ok(())
}

/// An owned dense tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<ElT: Scalar> {
    data: Vec<ElT>,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

/// A borrowed dense tensor over a caller-owned slice.
#[derive(Debug, Clone, Copy)]
pub struct TensorView<'a, ElT: Scalar> {
    data: &'a [ElT],
    shape: &'a [usize],
}

impl<ElT: Scalar> Tensor<ElT> {
    /// Create a zero-initialized tensor.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazyptr::Tensor;
    ///
    /// let t: Tensor<f64> = Tensor::zeros(&[2, 3, 4]);
    /// assert_eq!(t.shape(), &[2, 3, 4]);
    /// assert_eq!(t.len(), 24);
    /// ```
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: vec![ElT::zero(); shape_len(shape)],
            shape: shape.to_vec(),
            strides: compute_strides(shape),
        }
    }

    /// Create a tensor filled with ones.
    pub fn ones(shape: &[usize]) -> Self {
        let mut t = Self::zeros(shape);
        t.fill(ElT::one());
        t
    }

    /// Rank-0 tensor holding a single value.
    pub fn scalar(value: ElT) -> Self {
        Self {
            data: vec![value],
            shape: vec![],
            strides: vec![],
        }
    }

    /// Create a tensor from row-major data.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if the data length doesn't match
    /// the shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazyptr::Tensor;
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// assert_eq!(t.get(&[0, 1]), Some(&2.0)); // Row-major: [0,1] is the second element
    /// assert_eq!(t.get(&[1, 0]), Some(&4.0));
    /// ```
    pub fn from_vec(data: Vec<ElT>, shape: &[usize]) -> Result<Self, TensorError> {
        let expected = shape_len(shape);
        if data.len() != expected {
            return Err(TensorError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            shape: shape.to_vec(),
            strides: compute_strides(shape),
        })
    }

    /// Borrow as a view.
    #[inline]
    pub fn view(&self) -> TensorView<'_, ElT> {
        TensorView {
            data: &self.data,
            shape: &self.shape,
        }
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    #[inline]
    pub fn data(&self) -> &[ElT] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [ElT] {
        &mut self.data
    }

    /// Consume the tensor, returning the flat row-major data.
    #[inline]
    pub fn into_data(self) -> Vec<ElT> {
        self.data
    }

    /// Get element by cartesian indices.
    ///
    /// Returns `None` if indices are out of bounds or wrong in number.
    pub fn get(&self, indices: &[usize]) -> Option<&ElT> {
        check_indices(indices, &self.shape).ok()?;
        self.data.get(cartesian_to_linear(indices, &self.strides))
    }

    /// Set element by cartesian indices.
    ///
    /// # Errors
    ///
    /// Returns error if indices are out of bounds or wrong in number.
    pub fn set(&mut self, indices: &[usize], value: ElT) -> Result<(), TensorError> {
        check_indices(indices, &self.shape)?;
        let linear = cartesian_to_linear(indices, &self.strides);
        self.data[linear] = value;
        Ok(())
    }

    pub fn fill(&mut self, value: ElT) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Reinterpret the data under a new shape with the same element count.
    ///
    /// # Example
    ///
    /// ```
    /// use lazyptr::Tensor;
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// let t = t.reshape(&[3, 2]).unwrap();
    /// assert_eq!(t.get(&[1, 0]), Some(&3.0));
    /// ```
    pub fn reshape(self, new_shape: &[usize]) -> Result<Self, TensorError> {
        Self::from_vec(self.data, new_shape)
    }

    /// Elementwise complex conjugate.
    pub fn conj(&self) -> Self {
        Self {
            data: self.data.iter().map(|&x| x.conjugate()).collect(),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
        }
    }
}

impl<'a, ElT: Scalar> TensorView<'a, ElT> {
    /// View a flat slice with the given shape, without copying.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::DimensionMismatch` if the slice length is not the
    /// product of `shape`.
    ///
    /// # Example
    ///
    /// ```
    /// use lazyptr::TensorView;
    ///
    /// let psi = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0];
    /// let dims = [2, 3];
    /// let t = TensorView::from_slice(&psi, &dims).unwrap();
    /// assert_eq!(t.get(&[1, 2]), Some(&1.0));
    /// ```
    pub fn from_slice(data: &'a [ElT], shape: &'a [usize]) -> Result<Self, TensorError> {
        let expected = shape_len(shape);
        if data.len() != expected {
            return Err(TensorError::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, shape })
    }

    #[inline]
    pub fn shape(&self) -> &'a [usize] {
        self.shape
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &'a [ElT] {
        self.data
    }

    /// Row-major strides of the viewed shape.
    pub fn strides(&self) -> Vec<usize> {
        compute_strides(self.shape)
    }

    pub fn get(&self, indices: &[usize]) -> Option<&'a ElT> {
        check_indices(indices, self.shape).ok()?;
        self.data.get(cartesian_to_linear(indices, &self.strides()))
    }

    /// Copy into an owned tensor.
    pub fn to_tensor(&self) -> Tensor<ElT> {
        Tensor {
            data: self.data.to_vec(),
            shape: self.shape.to_vec(),
            strides: compute_strides(self.shape),
        }
    }
}
