//! Error types shared by the wavelet, convolution and extraction modules

/// Input-contract violations
///
/// Every variant is raised before any numeric work starts, so a failed call
/// never leaves a partial result behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WaveletError {
    #[error(
        "Freqs and widths are not compatible: len(freqs) must be evenly divisible by len(widths) (len(freqs) = {n_freqs}, len(widths) = {n_widths})"
    )]
    Configuration { n_freqs: usize, n_widths: usize },

    #[error(
        "The number of data samples is insufficient compared to the number of wavelet samples (data samples: {data_samples}, wavelet samples: {wavelet_samples}). Try a longer buffer."
    )]
    InsufficientData {
        data_samples: usize,
        wavelet_samples: usize,
    },

    #[error("Invalid {kind}: {value}")]
    InvalidMode { kind: &'static str, value: String },

    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Axis {axis} is out of range for an array of rank {rank}")]
    AxisOutOfRange { axis: isize, rank: usize },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

impl WaveletError {
    pub(crate) fn invalid_parameter(name: &'static str, value: impl ToString) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WaveletError>;
