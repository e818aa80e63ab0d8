//! Utility functions for convolution
//!
//! Output-length modes, centered cropping, FFT sizing and the sample trait
//! that lets both real and complex rows go through the same code.

use ndarray::{s, Array2, ArrayView2};
use num_complex::Complex64;
use std::fmt;
use std::str::FromStr;

use crate::error::WaveletError;

/// Output length convention of a linear convolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvMode {
    /// `len1 + len2 - 1` samples
    #[default]
    Full,
    /// `max(len1, len2)` samples, centered
    Same,
    /// `|len1 - len2| + 1` samples, centered
    Valid,
}

impl ConvMode {
    /// Number of output samples for inputs of length `n1` and `n2`
    pub fn output_len(self, n1: usize, n2: usize) -> usize {
        match self {
            ConvMode::Full => n1 + n2 - 1,
            ConvMode::Same => n1.max(n2),
            ConvMode::Valid => n1.abs_diff(n2) + 1,
        }
    }

    /// Range of the full convolution kept by this mode
    pub fn crop(self, n1: usize, n2: usize) -> (usize, usize) {
        centered(n1 + n2 - 1, self.output_len(n1, n2))
    }
}

impl FromStr for ConvMode {
    type Err = WaveletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(ConvMode::Full),
            "same" => Ok(ConvMode::Same),
            "valid" => Ok(ConvMode::Valid),
            other => Err(WaveletError::InvalidMode {
                kind: "convolution mode (expected 'full', 'same' or 'valid')",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ConvMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConvMode::Full => "full",
            ConvMode::Same => "same",
            ConvMode::Valid => "valid",
        };
        f.write_str(name)
    }
}

/// Start/end of the centered `new_len` window within `len` samples
///
/// The start offset is `(len - new_len) / 2` rounded down, so an odd excess
/// drops its extra sample from the end.
pub fn centered(len: usize, new_len: usize) -> (usize, usize) {
    let start = (len - new_len) / 2;
    (start, start + new_len)
}

/// Compute next power of 2 (FFT size)
pub fn next_pow2(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Element type accepted by the convolvers
pub trait Sample: Copy + Send + Sync {
    /// Whether values of this type carry an imaginary part
    const IS_COMPLEX: bool;

    fn to_complex(self) -> Complex64;
}

impl Sample for f64 {
    const IS_COMPLEX: bool = false;

    #[inline]
    fn to_complex(self) -> Complex64 {
        Complex64::new(self, 0.0)
    }
}

impl Sample for Complex64 {
    const IS_COMPLEX: bool = true;

    #[inline]
    fn to_complex(self) -> Complex64 {
        self
    }
}

/// Convolution result, real only when both inputs were real
#[derive(Debug, Clone)]
pub enum ConvOutput {
    Real(Array2<f64>),
    Complex(Array2<Complex64>),
}

impl ConvOutput {
    pub fn from_complex(values: Array2<Complex64>, complex_result: bool) -> Self {
        if complex_result {
            ConvOutput::Complex(values)
        } else {
            ConvOutput::Real(values.mapv(|c| c.re))
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            ConvOutput::Real(a) => a.shape(),
            ConvOutput::Complex(a) => a.shape(),
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, ConvOutput::Complex(_))
    }

    /// Complex view of the result, widening real values
    pub fn into_complex(self) -> Array2<Complex64> {
        match self {
            ConvOutput::Real(a) => a.mapv(|x| Complex64::new(x, 0.0)),
            ConvOutput::Complex(a) => a,
        }
    }

    pub fn into_real(self) -> Option<Array2<f64>> {
        match self {
            ConvOutput::Real(a) => Some(a),
            ConvOutput::Complex(_) => None,
        }
    }
}

/// Copy a 2-D array into complex rows
pub fn to_complex_rows<T: Sample>(input: &ArrayView2<T>) -> Array2<Complex64> {
    input.mapv(Sample::to_complex)
}

/// Keep the columns `mode` selects out of full-length convolution rows
pub fn crop_columns(full: Array2<Complex64>, n1: usize, n2: usize, mode: ConvMode) -> Array2<Complex64> {
    if mode == ConvMode::Full {
        return full;
    }
    let (start, end) = mode.crop(n1, n2);
    full.slice(s![.., start..end]).to_owned()
}
