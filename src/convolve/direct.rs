//! Direct convolution
//!
//! O(n*m) linear convolution for short kernels, where setting up an FFT
//! costs more than it saves.

use ndarray::{Array1, ArrayView1};
use num_complex::Complex64;

use super::utils::{ConvMode, Sample};
use crate::error::{Result, WaveletError};

/// Direct convolution of one kernel with one signal
///
/// Output lengths and cropping follow [`ConvMode`], so the result matches
/// [`fconv_multi`](super::fft::fconv_multi) on the same pair within
/// floating point tolerance.
pub fn convolve_direct<A: Sample, B: Sample>(
    kernel: &ArrayView1<A>,
    signal: &ArrayView1<B>,
    mode: ConvMode,
) -> Result<Array1<Complex64>> {
    let m = kernel.len();
    let n = signal.len();
    if m == 0 || n == 0 {
        return Err(WaveletError::invalid_parameter(
            "convolve_direct lengths",
            format!("({m}, {n})"),
        ));
    }

    let (start, end) = mode.crop(m, n);
    let result = Array1::from_shape_fn(end - start, |k| {
        let i = start + k;
        // kernel index j pairs with signal index i - j
        let j_lo = i.saturating_sub(n - 1);
        let j_hi = i.min(m - 1);
        let mut sum = Complex64::new(0.0, 0.0);
        for j in j_lo..=j_hi {
            sum += kernel[j].to_complex() * signal[i - j].to_complex();
        }
        sum
    });

    Ok(result)
}
