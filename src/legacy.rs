//! Single-frequency reference implementation
//!
//! Builds one wavelet per frequency on an `arange` time grid and convolves
//! directly. Slow, but independent of the bank and FFT code, which makes it
//! useful for checking [`phase_pow_multi`](crate::phase_pow_multi).

use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, ArrayViewD, Axis};
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::convolve::{convolve_direct, ConvMode};
use crate::error::{Result, WaveletError};
use crate::phasepow::{coefficient_phase, PhasePow, ReturnKind};
use crate::reshape::{from_2d, to_2d};

/// Half-width of the legacy wavelet support in standard deviations
const HALF_SUPPORT: f64 = 3.5;

/// Morlet wavelet sampled at times `t`, unit energy in continuous time
pub fn legacy_morlet(freq: f64, t: &ArrayView1<f64>, width: f64) -> Array1<Complex64> {
    let st = width / (2.0 * PI * freq);
    let amp = 1.0 / (st * PI.sqrt()).sqrt();
    t.mapv(|ti| {
        let envelope = amp * (-ti * ti / (2.0 * st * st)).exp();
        Complex64::from_polar(envelope, 2.0 * PI * freq * ti)
    })
}

fn check_params(freq: f64, samplerate: f64, width: f64) -> Result<()> {
    if !(freq > 0.0 && freq.is_finite()) {
        return Err(WaveletError::invalid_parameter("freq", freq));
    }
    if !(samplerate > 0.0 && samplerate.is_finite()) {
        return Err(WaveletError::invalid_parameter("samplerate", samplerate));
    }
    if !(width > 0.0 && width.is_finite()) {
        return Err(WaveletError::invalid_parameter("width", width));
    }
    Ok(())
}

/// Wavelet for `freq` on `arange(-3.5 st, 3.5 st, 1 / samplerate)`
fn legacy_wavelet(freq: f64, samplerate: f64, width: f64) -> Array1<Complex64> {
    let st = width / (2.0 * PI * freq);
    let dt = 1.0 / samplerate;
    let start = -HALF_SUPPORT * st;
    let n = ((2.0 * HALF_SUPPORT * st) / dt).ceil().max(1.0) as usize;
    let t = Array1::from_shape_fn(n, |k| start + k as f64 * dt);
    legacy_morlet(freq, &t.view(), width)
}

/// Full convolution cropped back to the signal length
fn convolve_cropped(wavelet: &Array1<Complex64>, signal: &ArrayView1<f64>) -> Result<Array1<Complex64>> {
    let m = wavelet.len();
    let full = convolve_direct(&wavelet.view(), signal, ConvMode::Full)?;
    let start = m.div_ceil(2) - 1;
    let end = full.len() - m / 2;
    Ok(full.slice(s![start..end]).to_owned())
}

/// Phase and power of one signal at one frequency
///
/// # Returns
/// `(phase, power)`, both the length of `signal`
pub fn phase_pow_1d(
    freq: f64,
    signal: &ArrayView1<f64>,
    samplerate: f64,
    width: f64,
) -> Result<(Array1<f64>, Array1<f64>)> {
    check_params(freq, samplerate, width)?;
    let wavelet = legacy_wavelet(freq, samplerate, width);
    let coefs = convolve_cropped(&wavelet, signal)?;
    Ok((coefs.mapv(coefficient_phase), coefs.mapv(|c| c.norm_sqr())))
}

/// Phase and power of every row of `signals` at one frequency
///
/// The wavelet is built once and reused for every row.
pub fn phase_pow_2d(
    freq: f64,
    signals: &ArrayView2<f64>,
    samplerate: f64,
    width: f64,
) -> Result<(Array2<f64>, Array2<f64>)> {
    check_params(freq, samplerate, width)?;
    let wavelet = legacy_wavelet(freq, samplerate, width);

    let mut coefs = Array2::<Complex64>::zeros(signals.raw_dim());
    for (signal, mut row) in signals.axis_iter(Axis(0)).zip(coefs.axis_iter_mut(Axis(0))) {
        row.assign(&convolve_cropped(&wavelet, &signal)?);
    }

    Ok((coefs.mapv(coefficient_phase), coefs.mapv(|c| c.norm_sqr())))
}

/// Phase and/or power at several frequencies, one frequency at a time
///
/// Results have the shape of `dat` with a leading frequency axis.
pub fn calc_phase_pow(
    freqs: &[f64],
    dat: &ArrayViewD<f64>,
    samplerate: f64,
    time_axis: isize,
    width: f64,
    to_return: ReturnKind,
) -> Result<PhasePow> {
    if freqs.is_empty() {
        return Err(WaveletError::invalid_parameter("freqs", "[]"));
    }
    let batch = to_2d(dat, time_axis)?;
    let (n_signals, n_time) = batch.dim();

    let mut phase = Array2::zeros((freqs.len() * n_signals, n_time));
    let mut power = Array2::zeros((freqs.len() * n_signals, n_time));
    for (f, &freq) in freqs.iter().enumerate() {
        let (ph, pw) = phase_pow_2d(freq, &batch.view(), samplerate, width)?;
        let rows = f * n_signals..(f + 1) * n_signals;
        phase.slice_mut(s![rows.clone(), ..]).assign(&ph);
        power.slice_mut(s![rows, ..]).assign(&pw);
    }

    let mut out_shape = dat.shape().to_vec();
    out_shape.insert(0, freqs.len());
    let restore = |values: Array2<f64>| from_2d(&values.view(), time_axis, &out_shape, Some(0));

    Ok(match to_return {
        ReturnKind::Power => PhasePow::Power(restore(power)?),
        ReturnKind::Phase => PhasePow::Phase(restore(phase)?),
        ReturnKind::Both => PhasePow::Both {
            phase: restore(phase)?,
            power: restore(power)?,
        },
    })
}
