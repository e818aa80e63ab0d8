//! Parameters of a phase/power computation
//!
//! Everything besides the frequencies, widths, samplerate and the data
//! itself lives in [`TransformConfig`], built with the `with_*` methods.

use crate::morlet::{BankMode, DEFAULT_SAMPLING_WINDOW};
use crate::phasepow::ReturnKind;

/// Configuration for [`phase_pow_multi`](crate::phase_pow_multi)
///
/// # Example
///
/// ```
/// use morlet_phasepow::{ReturnKind, TransformConfig};
///
/// let config = TransformConfig::split(90)
///     .with_to_return(ReturnKind::Power)
///     .with_time_axis(-1)
///     .with_freq_axis(0);
/// assert_eq!(config.to_return(), ReturnKind::Power);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TransformConfig {
    /// Standard deviations of the wavelet envelope to sample
    sampling_window: f64,
    /// Complete Morlet definition (DC-corrected)
    complete: bool,
    /// Uniform or split bank
    bank_mode: BankMode,
    /// Which of power/phase to return
    to_return: ReturnKind,
    /// Time axis of the input, negative counts from the end
    time_axis: isize,
    /// Position of the new frequency axis in the output
    freq_axis: usize,
}

impl TransformConfig {
    /// Creates a new `TransformConfig` with default parameters.
    ///
    /// Defaults: `sampling_window = 7`, `complete = true`, uniform bank,
    /// both power and phase, `time_axis = -1`, `freq_axis = 0`.
    pub fn new() -> Self {
        Self {
            sampling_window: DEFAULT_SAMPLING_WINDOW,
            complete: true,
            bank_mode: BankMode::Uniform,
            to_return: ReturnKind::Both,
            time_axis: -1,
            freq_axis: 0,
        }
    }

    /// Defaults with a split bank at `fft_threshold` samples
    pub fn split(fft_threshold: usize) -> Self {
        Self::new().with_bank_mode(BankMode::Split { fft_threshold })
    }

    pub fn with_sampling_window(mut self, sampling_window: f64) -> Self {
        self.sampling_window = sampling_window;
        self
    }

    pub fn with_complete(mut self, complete: bool) -> Self {
        self.complete = complete;
        self
    }

    pub fn with_bank_mode(mut self, bank_mode: BankMode) -> Self {
        self.bank_mode = bank_mode;
        self
    }

    pub fn with_to_return(mut self, to_return: ReturnKind) -> Self {
        self.to_return = to_return;
        self
    }

    pub fn with_time_axis(mut self, time_axis: isize) -> Self {
        self.time_axis = time_axis;
        self
    }

    pub fn with_freq_axis(mut self, freq_axis: usize) -> Self {
        self.freq_axis = freq_axis;
        self
    }

    pub fn sampling_window(&self) -> f64 {
        self.sampling_window
    }

    pub fn complete(&self) -> bool {
        self.complete
    }

    pub fn bank_mode(&self) -> BankMode {
        self.bank_mode
    }

    pub fn to_return(&self) -> ReturnKind {
        self.to_return
    }

    pub fn time_axis(&self) -> isize {
        self.time_axis
    }

    pub fn freq_axis(&self) -> usize {
        self.freq_axis
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self::new()
    }
}
