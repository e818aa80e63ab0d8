//! FFT-based all-pairs convolution
//!
//! Every row of the first input is convolved with every row of the second.
//! Each row is transformed once; the pairwise products reuse those spectra.

use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;
use rayon::prelude::*;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;
use tracing::debug;

use super::utils::{crop_columns, next_pow2, to_complex_rows, ConvMode, ConvOutput, Sample};
use crate::error::{Result, WaveletError};

/// Forward transform of every row, zero-padded to `size`
fn row_spectra(rows: &Array2<Complex64>, size: usize, fft: &Arc<dyn Fft<f64>>) -> Vec<Vec<Complex64>> {
    (0..rows.nrows())
        .into_par_iter()
        .map(|i| {
            let mut buffer: Vec<Complex64> = rows.row(i).to_vec();
            buffer.resize(size, Complex64::new(0.0, 0.0));
            fft.process(&mut buffer);
            buffer
        })
        .collect()
}

/// Convolve every row of `in1` with every row of `in2`
///
/// # Arguments
/// * `in1` - (num1, s1) rows, e.g. a wavelet bank
/// * `in2` - (num2, s2) rows, e.g. a signal batch
/// * `mode` - Output length convention
///
/// # Returns
/// `num1 * num2` rows; row `i * num2 + j` holds `in1[i] * in2[j]`. The result
/// is real only when both inputs are real.
///
/// # Algorithm
/// 1. FFT size = next power of 2 >= `s1 + s2 - 1`
/// 2. Transform every row of both inputs
/// 3. Multiply every pair of spectra, inverse transform, normalize
/// 4. Truncate to `s1 + s2 - 1` and crop to `mode`
pub fn fconv_multi<A: Sample, B: Sample>(
    in1: &ArrayView2<A>,
    in2: &ArrayView2<B>,
    mode: ConvMode,
) -> Result<ConvOutput> {
    let (num1, s1) = in1.dim();
    let (num2, s2) = in2.dim();
    if num1 == 0 || s1 == 0 {
        return Err(WaveletError::invalid_parameter("in1.shape", format!("({num1}, {s1})")));
    }
    if num2 == 0 || s2 == 0 {
        return Err(WaveletError::invalid_parameter("in2.shape", format!("({num2}, {s2})")));
    }

    let complex_result = A::IS_COMPLEX || B::IS_COMPLEX;
    let conv_len = s1 + s2 - 1;
    let fft_size = next_pow2(conv_len);

    debug!(num1, num2, s1, s2, fft_size, %mode, "fconv_multi");

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    let ifft = planner.plan_fft_inverse(fft_size);

    let spectra1 = row_spectra(&to_complex_rows(in1), fft_size, &fft);
    let spectra2 = row_spectra(&to_complex_rows(in2), fft_size, &fft);

    let norm = 1.0 / (fft_size as f64);

    // Parallel over output rows (preserving order)
    let rows: Vec<Vec<Complex64>> = (0..num1 * num2)
        .into_par_iter()
        .map(|idx| {
            let a = &spectra1[idx / num2];
            let b = &spectra2[idx % num2];
            let mut product: Vec<Complex64> =
                a.iter().zip(b.iter()).map(|(&x, &y)| x * y).collect();
            ifft.process(&mut product);
            product.truncate(conv_len);
            product.iter_mut().for_each(|c| *c *= norm);
            product
        })
        .collect();

    let mut full = Array2::zeros((num1 * num2, conv_len));
    for (mut dst, src) in full.outer_iter_mut().zip(rows) {
        for (d, s) in dst.iter_mut().zip(src) {
            *d = s;
        }
    }

    Ok(ConvOutput::from_complex(
        crop_columns(full, s1, s2, mode),
        complex_result,
    ))
}
