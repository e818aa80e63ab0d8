//! # Phase/Power Module
//!
//! Wavelet phase and power of N-D data, plus the Python bindings.

mod core;
#[cfg(feature = "python")]
mod ffi;

pub use self::core::*;
#[cfg(feature = "python")]
pub use ffi::{fconv_multi_py, morlet_multi_py, phase_pow_multi_py};
