//! Random tensor construction, for quickly generating test data.

use rand::distr::StandardUniform;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::scalar::{c64, Scalar};
use crate::tensor::Tensor;

/// Element types that can be drawn from the uniform distribution on [0, 1).
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

/// Element types that can be drawn from the standard normal distribution.
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
        // Standard complex normal: independent N(0, 1/2) parts so that
        // |z|^2 has mean 1.
        let scale = std::f64::consts::FRAC_1_SQRT_2;
        c64::new(
            rng.sample::<f64, _>(StandardNormal) * scale,
            rng.sample::<f64, _>(StandardNormal) * scale,
        )
    }
}

impl<ElT: RandomUniform> Tensor<'static, ElT> {
    /// Create a tensor with uniform random values in [0, 1).
    ///
    /// # Examples
    ///
    /// ```
    /// use tenalg::Tensor;
    ///
    /// let t: Tensor<f64> = Tensor::random(&[2, 3]);
    /// assert!(t.data().iter().all(|&v| (0.0..1.0).contains(&v)));
    /// ```
    pub fn random(shape: &[usize]) -> Self {
        Self::random_with_rng(shape, &mut rand::rng())
    }

    /// Create a uniform random tensor from a caller-supplied RNG, for
    /// reproducible results with a seeded generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use tenalg::Tensor;
    ///
    /// let t1: Tensor<f64> = Tensor::random_with_rng(&[2, 3], &mut StdRng::seed_from_u64(42));
    /// let t2: Tensor<f64> = Tensor::random_with_rng(&[2, 3], &mut StdRng::seed_from_u64(42));
    /// assert_eq!(t1.data(), t2.data());
    /// ```
    pub fn random_with_rng<R: Rng>(shape: &[usize], rng: &mut R) -> Self {
        let len: usize = shape.iter().product::<usize>().max(1);
        let data: Vec<ElT> = (0..len).map(|_| ElT::sample_uniform(rng)).collect();
        Self::from_vec(data, shape).expect("generated data matches the shape")
    }
}

impl<ElT: RandomNormal> Tensor<'static, ElT> {
    /// Create a tensor with standard normal random values.
    pub fn randn(shape: &[usize]) -> Self {
        Self::randn_with_rng(shape, &mut rand::rng())
    }

    /// Create a standard normal random tensor from a caller-supplied RNG.
    pub fn randn_with_rng<R: Rng>(shape: &[usize], rng: &mut R) -> Self {
        let len: usize = shape.iter().product::<usize>().max(1);
        let data: Vec<ElT> = (0..len).map(|_| ElT::sample_normal(rng)).collect();
        Self::from_vec(data, shape).expect("generated data matches the shape")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_f64_range() {
        let t: Tensor<f64> = Tensor::random(&[2, 3]);
        assert_eq!(t.shape(), &[2, 3]);
        for &v in t.data() {
            assert!((0.0..1.0).contains(&v), "value {v} not in [0, 1)");
        }
    }

    #[test]
    fn test_random_c64_range() {
        let t: Tensor<c64> = Tensor::random(&[4]);
        for v in t.data() {
            assert!((0.0..1.0).contains(&v.re));
            assert!((0.0..1.0).contains(&v.im));
        }
    }

    #[test]
    fn test_random_reproducible() {
        let t1: Tensor<f64> = Tensor::random_with_rng(&[3, 4], &mut StdRng::seed_from_u64(12345));
        let t2: Tensor<f64> = Tensor::random_with_rng(&[3, 4], &mut StdRng::seed_from_u64(12345));
        assert_eq!(t1.data(), t2.data());
    }

    #[test]
    fn test_randn_f64_moments() {
        let mut rng = StdRng::seed_from_u64(7);
        let t: Tensor<f64> = Tensor::randn_with_rng(&[1000], &mut rng);
        let mean: f64 = t.data().iter().sum::<f64>() / 1000.0;
        let var: f64 = t.data().iter().map(|x| (x - mean).powi(2)).sum::<f64>() / 1000.0;
        assert!(mean.abs() < 0.2, "mean {mean} too far from 0");
        assert!((0.5..2.0).contains(&var), "variance {var} too far from 1");
    }

    #[test]
    fn test_randn_c64_unit_power() {
        let mut rng = StdRng::seed_from_u64(11);
        let t: Tensor<c64> = Tensor::randn_with_rng(&[1000], &mut rng);
        let mean_sq: f64 =
            t.data().iter().map(|z| z.re * z.re + z.im * z.im).sum::<f64>() / 1000.0;
        assert!(
            (0.5..2.0).contains(&mean_sq),
            "mean |z|^2 {mean_sq} too far from 1"
        );
    }

    #[test]
    fn test_random_scalar_tensor() {
        let t: Tensor<f64> = Tensor::random(&[]);
        assert_eq!(t.shape(), &[] as &[usize]);
        assert_eq!(t.len(), 1);
    }
}
