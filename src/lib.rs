//! # Morlet PhasePow - wavelet phase and power for batched signals
//!
//! Builds banks of energy-normalized Morlet wavelets and convolves them with
//! N-D signal tensors, either entirely by FFT or split between FFT (long
//! wavelets) and direct convolution (short ones).

pub mod config;
pub mod convolve;
pub mod error;
pub mod legacy;
pub mod morlet;
pub mod phasepow;
pub mod reshape;

pub use config::TransformConfig;
pub use convolve::{convolve_direct, fconv_multi, ConvMode, ConvOutput, Sample};
pub use error::{Result, WaveletError};
pub use morlet::{
    morlet_multi, morlet_multi_split, required_samples, BankMode, MorletBank, SplitBank,
    UniformBank, Wavelet,
};
pub use phasepow::{coefficients, phase_pow_multi, power_and_phase, PhasePow, ReturnKind};
pub use reshape::{from_2d, to_2d};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition
#[cfg(feature = "python")]
#[pymodule]
fn morlet_phasepow(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(phasepow::morlet_multi_py, m)?)?;
    m.add_function(wrap_pyfunction!(phasepow::fconv_multi_py, m)?)?;
    m.add_function(wrap_pyfunction!(phasepow::phase_pow_multi_py, m)?)?;

    Ok(())
}
