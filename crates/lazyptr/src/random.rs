//! Random tensors and pure states.
//!
//! `Tensor::random*` / `Tensor::randn*` fill tensors elementwise; [`rand_ket`]
//! draws a normalised state vector for exercising the lazy operators.

use rand::Rng;
use rand::distr::StandardUniform;
use rand_distr::StandardNormal;

use crate::scalar::{Scalar, c64};
use crate::tensor::Tensor;

/// Scalars that can be drawn from the uniform distribution on [0, 1).
pub trait RandomUniform: Scalar {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self;
}

impl RandomUniform for f64 {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        rng.sample(StandardUniform)
    }
}

impl RandomUniform for c64 {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
        c64::new(rng.sample(StandardUniform), rng.sample(StandardUniform))
    }
}

/// Scalars that can be drawn from the standard normal distribution.
pub trait RandomNormal: Scalar {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self;
}

impl RandomNormal for f64 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        rng.sample(StandardNormal)
    }
}

impl RandomNormal for c64 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        // Real and imaginary parts are independent N(0, 1/2), so E|z|^2 = 1.
        let scale = std::f64::consts::FRAC_1_SQRT_2;
        c64::new(
            rng.sample::<f64, _>(StandardNormal) * scale,
            rng.sample::<f64, _>(StandardNormal) * scale,
        )
    }
}

impl<ElT: RandomUniform> Tensor<ElT> {
    /// Tensor with uniform random entries in [0, 1), using the thread RNG.
    pub fn random(shape: &[usize]) -> Self {
        Self::random_with_rng(shape, &mut rand::rng())
    }

    /// Tensor with uniform random entries drawn from `rng`.
    ///
    /// # Example
    ///
    /// ```
    /// use lazyptr::Tensor;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let t1: Tensor<f64> = Tensor::random_with_rng(&[2, 3], &mut StdRng::seed_from_u64(42));
    /// let t2: Tensor<f64> = Tensor::random_with_rng(&[2, 3], &mut StdRng::seed_from_u64(42));
    /// assert_eq!(t1.data(), t2.data());
    /// ```
    pub fn random_with_rng<R: Rng>(shape: &[usize], rng: &mut R) -> Self {
        let mut t = Self::zeros(shape);
        for x in t.data_mut() {
            *x = ElT::sample_uniform(rng);
        }
        t
    }
}

impl<ElT: RandomNormal> Tensor<ElT> {
    /// Tensor with standard normal entries, using the thread RNG.
    pub fn randn(shape: &[usize]) -> Self {
        Self::randn_with_rng(shape, &mut rand::rng())
    }

    /// Tensor with standard normal entries drawn from `rng`.
    pub fn randn_with_rng<R: Rng>(shape: &[usize], rng: &mut R) -> Self {
        let mut t = Self::zeros(shape);
        for x in t.data_mut() {
            *x = ElT::sample_normal(rng);
        }
        t
    }
}

/// Random unit-norm state of length `dim`.
///
/// Entries are normal samples rescaled to `‖ψ‖ = 1`, which for complex
/// scalars is the Haar-random pure state.
///
/// # Example
///
/// ```
/// use lazyptr::{c64, rand_ket};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let psi: Vec<c64> = rand_ket(8, &mut StdRng::seed_from_u64(7));
/// let norm: f64 = psi.iter().map(|z| z.re * z.re + z.im * z.im).sum();
/// assert!((norm - 1.0).abs() < 1e-12);
/// ```
pub fn rand_ket<T: RandomNormal, R: Rng>(dim: usize, rng: &mut R) -> Vec<T> {
    let mut psi: Vec<T> = (0..dim).map(|_| T::sample_normal(rng)).collect();
    let norm = psi.iter().map(|&x| x.abs_sqr()).sum::<f64>().sqrt();
    if norm > 0.0 {
        let scale = T::from_real(norm.recip());
        for x in &mut psi {
            *x = *x * scale;
        }
    }
    psi
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_f64_in_unit_interval() {
        let t: Tensor<f64> = Tensor::random(&[2, 3]);
        assert_eq!(t.shape(), &[2, 3]);
        for v in t.data() {
            assert!((0.0..1.0).contains(v), "value {v} not in [0, 1)");
        }
    }

    #[test]
    fn test_random_c64_parts_in_unit_interval() {
        let t: Tensor<c64> = Tensor::random_with_rng(&[4], &mut StdRng::seed_from_u64(3));
        for z in t.data() {
            assert!((0.0..1.0).contains(&z.re));
            assert!((0.0..1.0).contains(&z.im));
        }
    }

    #[test]
    fn test_randn_reproducible() {
        let t1: Tensor<f64> = Tensor::randn_with_rng(&[3, 4], &mut StdRng::seed_from_u64(54321));
        let t2: Tensor<f64> = Tensor::randn_with_rng(&[3, 4], &mut StdRng::seed_from_u64(54321));
        assert_eq!(t1.data(), t2.data());
    }

    #[test]
    fn test_randn_c64_unit_second_moment() {
        let t: Tensor<c64> = Tensor::randn_with_rng(&[400], &mut StdRng::seed_from_u64(11));
        let mean_sq: f64 = t.data().iter().map(|z| z.re * z.re + z.im * z.im).sum::<f64>() / 400.0;
        assert!(mean_sq > 0.7 && mean_sq < 1.3, "mean |z|^2 {mean_sq} too far from 1");
    }

    #[test]
    fn test_random_scalar_tensor() {
        let t: Tensor<f64> = Tensor::randn(&[]);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_rand_ket_normalised() {
        let mut rng = StdRng::seed_from_u64(1);
        let psi: Vec<f64> = rand_ket(64, &mut rng);
        assert_eq!(psi.len(), 64);
        assert_relative_eq!(psi.iter().map(|x| x * x).sum::<f64>(), 1.0, epsilon = 1e-12);

        let empty: Vec<c64> = rand_ket(0, &mut rng);
        assert!(empty.is_empty());
    }
}
