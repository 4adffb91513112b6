//! Integration tests for the signal-flavored operations: convolution,
//! resampling, and the FFT, including how they compose.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tenalg::operations::{
    add, convolve, hadamard, resample, scale, BorderMode, Interpolation,
};
use tenalg::{c64, Scalar, Tensor};

fn assert_c64_near(a: c64, b: c64, eps: f64) {
    assert!((a - b).norm() < eps, "expected {b:?}, got {a:?}");
}

#[test]
fn test_convolution_is_linear() {
    let mut rng = StdRng::seed_from_u64(10);
    let a: Tensor<f64> = Tensor::randn_with_rng(&[6, 6], &mut rng);
    let b: Tensor<f64> = Tensor::randn_with_rng(&[6, 6], &mut rng);
    let kernel: Tensor<f64> = Tensor::randn_with_rng(&[3, 3], &mut rng);

    for mode in [BorderMode::Zero, BorderMode::Clamp, BorderMode::Wrap] {
        let conv_sum = convolve(&add(&a, &b).unwrap(), &kernel, mode).unwrap();
        let sum_conv = add(
            &convolve(&a, &kernel, mode).unwrap(),
            &convolve(&b, &kernel, mode).unwrap(),
        )
        .unwrap();
        for (x, y) in conv_sum.data().iter().zip(sum_conv.data().iter()) {
            assert!((x - y).abs() < 1e-10, "nonlinear under {mode:?}");
        }
    }
}

#[test]
fn test_wrap_convolution_preserves_mean() {
    // Under wraparound every input element is counted by every kernel tap
    // exactly once, so the total mass is scaled by the kernel sum.
    let mut rng = StdRng::seed_from_u64(11);
    let src: Tensor<f64> = Tensor::randn_with_rng(&[5, 7], &mut rng);
    let kernel = Tensor::from_vec(vec![0.1, 0.2, 0.4, 0.2, 0.1], &[1, 5]).unwrap();

    let out = convolve(&src, &kernel, BorderMode::Wrap).unwrap();
    let mass_in: f64 = src.data().iter().sum();
    let mass_out: f64 = out.data().iter().sum();
    assert!((mass_out - mass_in).abs() < 1e-10);
}

#[test]
fn test_smoothing_shrinks_range() {
    let mut rng = StdRng::seed_from_u64(12);
    let src: Tensor<f64> = Tensor::randn_with_rng(&[16], &mut rng);
    let kernel = Tensor::from_vec(vec![1.0 / 3.0; 3], &[3]).unwrap();
    let smooth = convolve(&src, &kernel, BorderMode::Clamp).unwrap();

    let range = |t: &Tensor<f64>| {
        let max = t.data().iter().cloned().fold(f64::MIN, f64::max);
        let min = t.data().iter().cloned().fold(f64::MAX, f64::min);
        max - min
    };
    assert!(range(&smooth) <= range(&src) + 1e-12);
}

#[test]
fn test_resample_then_back_identity_on_grid_points() {
    // Upsampling by an exact factor and downsampling back must restore the
    // original samples for linear interpolation, as the original grid
    // points survive in the fine grid.
    let src = Tensor::from_fn(&[4, 3], |ix| (ix[0] * 3 + ix[1]) as f64);
    let up = resample(&src, &[7, 5], Interpolation::Linear).unwrap();
    let back = resample(&up, &[4, 3], Interpolation::Linear).unwrap();
    for (x, y) in back.data().iter().zip(src.data().iter()) {
        assert!((x - y).abs() < 1e-12);
    }
}

#[test]
fn test_nearest_resample_only_copies_samples() {
    let src = Tensor::from_vec(vec![1.0, 5.0, -2.0, 8.0], &[4]).unwrap();
    let up = resample(&src, &[9], Interpolation::Nearest).unwrap();
    for &v in up.data() {
        assert!(src.data().contains(&v));
    }
}

#[test]
fn test_fft_convolution_theorem() {
    // Circular convolution in the signal domain equals pointwise
    // multiplication in the frequency domain. Wrap-mode convolution with a
    // centered 3-tap kernel is circular convolution with that kernel laid
    // out around index 0 of the signal grid.
    let n = 8;
    let mut rng = StdRng::seed_from_u64(13);
    let src: Tensor<f64> = Tensor::randn_with_rng(&[n], &mut rng);
    let kernel = Tensor::from_vec(vec![0.25, 0.5, 0.25], &[3]).unwrap();
    let circ = convolve(&src, &kernel, BorderMode::Wrap).unwrap();

    let to_c = |t: &Tensor<f64>| {
        Tensor::from_vec(
            t.data().iter().map(|&v| c64::new(v, 0.0)).collect(),
            t.shape(),
        )
        .unwrap()
    };

    // Zero-pad the kernel onto the signal grid.
    let mut kernel_padded = vec![0.0; n];
    kernel_padded[n - 1] = 0.25; // tap at offset -1 wraps around
    kernel_padded[0] = 0.5;
    kernel_padded[1] = 0.25;
    let kernel_full = Tensor::from_vec(kernel_padded, &[n]).unwrap();

    let src_hat = to_c(&src).fft_of();
    let ker_hat = to_c(&kernel_full).fft_of();
    let circ_hat = to_c(&circ).fft_of();

    let product = hadamard(&src_hat, &ker_hat).unwrap();
    for (got, want) in circ_hat.data().iter().zip(product.data().iter()) {
        assert_c64_near(*got, *want, 1e-9);
    }
}

#[test]
fn test_fft_parseval() {
    let mut rng = StdRng::seed_from_u64(14);
    let t: Tensor<c64> = Tensor::randn_with_rng(&[6, 4], &mut rng);
    let spectrum = t.fft_of();

    let energy = |x: &Tensor<c64>| -> f64 { x.data().iter().map(|z| z.abs_sqr()).sum() };
    // Unnormalized forward transform scales total energy by len().
    assert!((energy(&spectrum) - 24.0 * energy(&t)).abs() < 1e-8);
}

#[test]
fn test_fft_shift_multiplies_phase() {
    // Delaying an impulse by one sample multiplies the spectrum by
    // exp(-2 pi i k / n).
    let n = 5;
    let mut delayed: Tensor<c64> = Tensor::zeros(&[n]);
    delayed.set(&[1], <c64 as Scalar>::one()).unwrap();
    delayed.fft();

    for k in 0..n {
        let theta = -2.0 * std::f64::consts::PI * k as f64 / n as f64;
        assert_c64_near(delayed.data()[k], c64::new(theta.cos(), theta.sin()), 1e-12);
    }
}

#[test]
fn test_ifft_scaling_roundtrip_rank3() {
    let original = Tensor::from_fn(&[2, 3, 5], |ix| {
        c64::new(ix[0] as f64 + 0.5 * ix[2] as f64, ix[1] as f64 - 1.0)
    });
    let restored = original.fft_of().ifft_of();
    for (got, want) in restored.data().iter().zip(original.data().iter()) {
        assert_c64_near(*got, *want, 1e-10);
    }

    // Forward transform of a scaled tensor scales the spectrum.
    let doubled = scale(&original, c64::new(2.0, 0.0)).fft_of();
    let spectrum = original.fft_of();
    for (got, want) in doubled.data().iter().zip(spectrum.data().iter()) {
        assert_c64_near(*got, want.scale_real(2.0), 1e-9);
    }
}
