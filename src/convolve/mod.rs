//! # Convolution Module
//!
//! Batched FFT convolution (every row against every row) and a direct
//! fallback for short kernels, sharing one set of output-length modes.

pub mod direct;
pub mod fft;
pub mod utils;

pub use direct::convolve_direct;
pub use fft::fconv_multi;
pub use utils::{ConvMode, ConvOutput, Sample};
