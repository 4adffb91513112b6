//! Multi-dimensional fast Fourier transform.
//!
//! The transform is defined on complex tensors only, so the methods here
//! are inherent to `Tensor<'_, c64>`. All ranks and all (composite or
//! prime) axis sizes are supported through a mixed-radix Cooley-Tukey
//! decomposition applied to every axis at once: each recursion level
//! splits every axis by its smallest prime factor, transforms the strided
//! sub-lattices, and merges them with precomputed twiddle factors. A prime
//! axis degenerates into a direct DFT at its level, so no padding is ever
//! needed.

use std::f64::consts::PI;

use crate::scalar::{c64, Scalar};
use crate::strides::{compute_strides, positions};
use crate::tensor::Tensor;

/// Smallest divisor of `n` that is at least 2; `n` itself when prime.
fn smallest_factor(n: usize) -> usize {
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            return d;
        }
        d += 1;
    }
    n
}

/// One table per axis: `tw[a][m] = exp(sign * 2 pi i * m / shape[a])`.
/// Deeper recursion levels index into the top-level tables through the
/// ratio between the top size and the current sub-problem size.
fn twiddle_tables(shape: &[usize], sign: f64) -> Vec<Vec<c64>> {
    shape
        .iter()
        .map(|&size| {
            (0..size)
                .map(|m| {
                    let theta = sign * 2.0 * PI * m as f64 / size as f64;
                    c64::new(theta.cos(), theta.sin())
                })
                .collect()
        })
        .collect()
}

/// Transform one sub-problem in place.
///
/// `sizes` are the per-axis extents of the sub-problem and `strides` its
/// per-axis element strides within `data`, starting at `offset`. The
/// decimation-in-time split writes each input index as
/// `i[a] = c[a] + cells[a] * s[a]`; after the recursive calls the
/// sub-lattice picked by `c` holds its own transform, and the merge
/// accumulates output `j[a] = u[a] + subs[a] * p[a]` as
/// `sum over c of w(u, c, p) * Y_c[u]`.
fn fft_rec(data: &mut [c64], offset: usize, sizes: &[usize], strides: &[usize], tw: &[Vec<c64>]) {
    if sizes.iter().all(|&s| s == 1) {
        return;
    }
    let rank = sizes.len();

    let cells: Vec<usize> = sizes.iter().map(|&s| smallest_factor(s).max(1)).collect();
    let subs: Vec<usize> = sizes.iter().zip(cells.iter()).map(|(&s, &c)| s / c).collect();
    let sub_strides: Vec<usize> = strides
        .iter()
        .zip(cells.iter())
        .map(|(&st, &c)| st * c)
        .collect();

    for cpos in positions(&cells) {
        let mut sub_offset = offset;
        for a in 0..rank {
            sub_offset += cpos.indices[a] * strides[a];
        }
        fft_rec(data, sub_offset, &subs, &sub_strides, tw);
    }

    // Snapshot the transformed sub-lattices; the merge reads every one of
    // them for every output index.
    let rm_strides = compute_strides(sizes);
    let total: usize = sizes.iter().product::<usize>().max(1);
    let mut temp = vec![c64::zero(); total];
    for pos in positions(sizes) {
        let mut src = offset;
        for a in 0..rank {
            src += pos.indices[a] * strides[a];
        }
        temp[pos.linear] = data[src];
    }

    let ratios: Vec<usize> = tw
        .iter()
        .zip(sizes.iter())
        .map(|(table, &s)| table.len() / s)
        .collect();

    for jpos in positions(sizes) {
        let mut acc = c64::zero();
        for cpos in positions(&cells) {
            let mut w = <c64 as Scalar>::one();
            let mut y_index = 0;
            for a in 0..rank {
                let u = jpos.indices[a] % subs[a];
                let p = jpos.indices[a] / subs[a];
                let c = cpos.indices[a];
                let m = (u * c + c * p * subs[a]) * ratios[a] % tw[a].len();
                w *= tw[a][m];
                y_index += (c + cells[a] * u) * rm_strides[a];
            }
            acc += w * temp[y_index];
        }
        let mut dst = offset;
        for a in 0..rank {
            dst += jpos.indices[a] * strides[a];
        }
        data[dst] = acc;
    }
}

impl Tensor<'_, c64> {
    /// In-place forward discrete Fourier transform over every axis.
    ///
    /// Uses the unnormalized convention
    /// `X[k] = sum over n of x[n] * exp(-2 pi i <k, n/N>)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenalg::{c64, Tensor};
    ///
    /// let mut t = Tensor::from_vec(
    ///     vec![c64::new(1.0, 0.0), c64::new(2.0, 0.0),
    ///          c64::new(3.0, 0.0), c64::new(4.0, 0.0)],
    ///     &[4],
    /// ).unwrap();
    /// t.fft();
    /// assert!((t.data()[0] - c64::new(10.0, 0.0)).norm() < 1e-12);
    /// assert!((t.data()[1] - c64::new(-2.0, 2.0)).norm() < 1e-12);
    /// ```
    pub fn fft(&mut self) {
        self.transform(-1.0);
    }

    /// In-place inverse discrete Fourier transform over every axis.
    ///
    /// Normalized so that `ifft` undoes [`Tensor::fft`]: the positive-sign
    /// transform is followed by division by the element count.
    pub fn ifft(&mut self) {
        self.transform(1.0);
        let scale = 1.0 / self.len() as f64;
        for x in self.data_mut() {
            *x = x.scale_real(scale);
        }
    }

    /// Forward transform of a borrowed tensor, returning an owned result.
    pub fn fft_of(&self) -> Tensor<'static, c64> {
        let mut out = self.to_owned_tensor();
        out.fft();
        out
    }

    /// Inverse transform of a borrowed tensor, returning an owned result.
    pub fn ifft_of(&self) -> Tensor<'static, c64> {
        let mut out = self.to_owned_tensor();
        out.ifft();
        out
    }

    fn transform(&mut self, sign: f64) {
        let shape: Vec<usize> = self.shape().to_vec();
        let strides = compute_strides(&shape);
        let tw = twiddle_tables(&shape, sign);
        fft_rec(self.data_mut(), 0, &shape, &strides, &tw);
    }
}
