//! Python FFI bindings for phase/power extraction
//!
//! Provides Python-callable functions using PyO3. The labeled time-series
//! container on the Python side passes raw arrays in and wraps the results.

use numpy::{
    IntoPyArray, PyArray2, PyArrayDyn, PyReadonlyArray1, PyReadonlyArray2, PyReadonlyArrayDyn,
};
use num_complex::Complex64;
use pyo3::prelude::*;

use super::core::{phase_pow_multi, ReturnKind};
use crate::config::TransformConfig;
use crate::convolve::{fconv_multi, ConvMode};
use crate::error::WaveletError;
use crate::morlet::{morlet_multi, BankMode};
use crate::reshape::insert_position;

impl From<WaveletError> for PyErr {
    fn from(err: WaveletError) -> PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

/// Energy-normalized Morlet wavelets, one row per frequency
///
/// # Returns
/// Complex array (num_freqs, samples)
#[pyfunction]
#[pyo3(signature = (freqs, widths, samplerate, sampling_window=7.0, complete=true))]
pub fn morlet_multi_py<'py>(
    py: Python<'py>,
    freqs: PyReadonlyArray1<f64>,
    widths: PyReadonlyArray1<f64>,
    samplerate: f64,
    sampling_window: f64,
    complete: bool,
) -> PyResult<Bound<'py, PyArray2<Complex64>>> {
    let freqs = freqs.as_array().to_vec();
    let widths = widths.as_array().to_vec();

    let bank = morlet_multi(&freqs, &widths, samplerate, sampling_window, complete)?;
    Ok(bank.wavelets.into_pyarray(py))
}

/// Convolve every row of `in1` with every row of `in2` via FFT
///
/// # Returns
/// Complex array (rows(in1) * rows(in2), n) where n depends on `mode`
#[pyfunction]
#[pyo3(signature = (in1, in2, mode="full"))]
pub fn fconv_multi_py<'py>(
    py: Python<'py>,
    in1: PyReadonlyArray2<Complex64>,
    in2: PyReadonlyArray2<f64>,
    mode: &str,
) -> PyResult<Bound<'py, PyArray2<Complex64>>> {
    let mode: ConvMode = mode.parse()?;
    let in1 = in1.as_array().to_owned();
    let in2 = in2.as_array().to_owned();

    // Release the GIL while computing
    let out = py.detach(|| fconv_multi(&in1.view(), &in2.view(), mode))?;
    Ok(out.into_complex().into_pyarray(py))
}

/// Python-callable phase/power computation
///
/// # Arguments
/// * `freqs` - Wavelet frequencies (Hz)
/// * `dat` - Data with time along `time_axis`, including buffers
/// * `samplerate` - Sample rate (Hz)
/// * `widths` - Widths in cycles (default: [5])
/// * `to_return` - "power", "phase" or "both" (default: "both")
/// * `time_axis` - Time axis of `dat` (default: -1)
/// * `freq_axis` - Position of the frequency axis in the output, negative
///   values counting from the input rank as in `list.insert` (default: 0)
/// * `sampling_window` - Standard deviations sampled per wavelet (default: 7)
/// * `complete` - Complete Morlet definition (default: True)
/// * `fft_thresh` - Use a split bank with this threshold; None for a
///   uniform bank (default: None)
///
/// # Returns
/// Tuple of (phase, power), the field not requested being None
///
/// # Example (Python)
/// ```python
/// import numpy as np
/// from morlet_phasepow import phase_pow_multi_py
///
/// dat = np.random.randn(10, 1000)
/// phase, power = phase_pow_multi_py(np.array([4.0, 8.0, 16.0]), dat, 200.0)
/// ```
#[pyfunction]
#[pyo3(signature = (
    freqs,
    dat,
    samplerate,
    widths=None,
    to_return="both",
    time_axis=-1,
    freq_axis=0,
    sampling_window=7.0,
    complete=true,
    fft_thresh=None
))]
#[allow(clippy::too_many_arguments)]
#[allow(clippy::type_complexity)]
pub fn phase_pow_multi_py<'py>(
    py: Python<'py>,
    freqs: PyReadonlyArray1<f64>,
    dat: PyReadonlyArrayDyn<f64>,
    samplerate: f64,
    widths: Option<PyReadonlyArray1<f64>>,
    to_return: &str,
    time_axis: isize,
    freq_axis: isize,
    sampling_window: f64,
    complete: bool,
    fft_thresh: Option<usize>,
) -> PyResult<(
    Option<Bound<'py, PyArrayDyn<f64>>>,
    Option<Bound<'py, PyArrayDyn<f64>>>,
)> {
    let to_return: ReturnKind = to_return.parse()?;
    let bank_mode = match fft_thresh {
        Some(fft_threshold) => BankMode::Split { fft_threshold },
        None => BankMode::Uniform,
    };
    let freq_axis = insert_position(freq_axis, dat.as_array().ndim())?;
    let config = TransformConfig::new()
        .with_bank_mode(bank_mode)
        .with_to_return(to_return)
        .with_time_axis(time_axis)
        .with_freq_axis(freq_axis)
        .with_sampling_window(sampling_window)
        .with_complete(complete);

    let freqs = freqs.as_array().to_vec();
    let widths = widths
        .map(|w| w.as_array().to_vec())
        .unwrap_or_else(|| vec![5.0]);
    let dat = dat.as_array().to_owned();

    // Release the GIL while computing
    let result = py.detach(|| phase_pow_multi(&freqs, &widths, samplerate, &dat.view(), &config))?;

    let (phase, power) = result.into_parts();
    Ok((
        phase.map(|p| p.into_pyarray(py)),
        power.map(|p| p.into_pyarray(py)),
    ))
}
