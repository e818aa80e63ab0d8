//! Morlet wavelet function generation
//!
//! Sampled complex Morlet kernel plus the width broadcast and energy
//! normalization helpers shared by both bank layouts.

use ndarray::{Array1, ArrayViewMut1};
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::error::{Result, WaveletError};

/// Generate a sampled complex Morlet wavelet
///
/// # Arguments
/// * `m` - Number of samples
/// * `w` - Omega0, the number of cycles under the envelope (the wavelet width)
/// * `s` - Scaling factor, the support is `[-2*pi*s, 2*pi*s]`
/// * `complete` - Subtract the DC correction term
///
/// # Formula
/// ```text
/// x   = linspace(-2*pi*s, 2*pi*s, m)
/// psi = (exp(i*w*x) - [complete] exp(-w^2/2)) * exp(-x^2/2) * pi^(-1/4)
/// ```
///
/// Without the correction term the wavelet does not integrate to zero and is
/// only an approximation for low values of `w` (say `w <= 5`).
pub fn morlet_wavelet(m: usize, w: f64, s: f64, complete: bool) -> Array1<Complex64> {
    let x = Array1::linspace(-s * 2.0 * PI, s * 2.0 * PI, m);
    let correction = if complete { (-0.5 * w * w).exp() } else { 0.0 };
    let norm_factor = PI.powf(-0.25);

    x.mapv(|xi: f64| {
        let envelope = (-0.5 * xi * xi).exp() * norm_factor;
        let carrier = Complex64::from_polar(1.0, w * xi) - correction;
        carrier * envelope
    })
}

/// Time-domain standard deviation of a wavelet with `width` cycles at `freq`
#[inline]
pub fn time_std(freq: f64, width: f64) -> f64 {
    width / (2.0 * PI * freq)
}

/// Scale that places a `width`-cycle wavelet at `freq` on `samples` points
#[inline]
pub fn morlet_scale(freq: f64, width: f64, samples: usize, samplerate: f64) -> f64 {
    (freq * samples as f64) / (2.0 * width * samplerate)
}

/// Repeat widths so there is exactly one per frequency
///
/// A single width is replicated. Otherwise `n_freqs` must be a multiple of
/// `widths.len()` and every width covers a contiguous block of
/// `n_freqs / widths.len()` frequencies.
pub fn broadcast_widths(n_freqs: usize, widths: &[f64]) -> Result<Vec<f64>> {
    if widths.is_empty() || n_freqs % widths.len() != 0 {
        return Err(WaveletError::Configuration {
            n_freqs,
            n_widths: widths.len(),
        });
    }

    let block = n_freqs / widths.len();
    Ok(widths
        .iter()
        .flat_map(|&w| std::iter::repeat(w).take(block))
        .collect())
}

/// Energy of a sampled wavelet relative to the samplerate
///
/// `sqrt(sum(|psi|^2) / samplerate)`
pub fn wavelet_energy<'a, I>(values: I, samplerate: f64) -> f64
where
    I: IntoIterator<Item = &'a Complex64>,
{
    let sum_sq: f64 = values.into_iter().map(|c| c.norm_sqr()).sum();
    (sum_sq / samplerate).sqrt()
}

/// Scale a wavelet in place to unit energy
pub fn normalize_energy(mut row: ArrayViewMut1<Complex64>, samplerate: f64) {
    let energy = wavelet_energy(row.iter(), samplerate);
    if energy > 0.0 {
        row.mapv_inplace(|c| c / energy);
    }
}
