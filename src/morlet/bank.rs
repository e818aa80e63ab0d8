//! Morlet wavelet banks
//!
//! Two layouts are supported and they are NOT interchangeable:
//!
//! - [`UniformBank`]: every wavelet is sampled on the same number of points,
//!   taken from the most time-diffuse wavelet of the bank. The result is one
//!   rectangular matrix suitable for all-pairs FFT convolution.
//! - [`SplitBank`]: the sample count is computed per wavelet. Wavelets longer
//!   than a threshold form an FFT group (padded to the group maximum), the
//!   short ones are kept at their own length for direct convolution.
//!
//! Since the sample counts differ, so do the numeric results of the two
//! layouts whenever the bank mixes wavelets of different support.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use tracing::debug;

use super::kernel::{
    broadcast_widths, morlet_scale, morlet_wavelet, normalize_energy, time_std,
};
use crate::error::{Result, WaveletError};

/// Default number of samples above which a wavelet goes to the FFT group
pub const DEFAULT_FFT_THRESHOLD: usize = 90;

/// Default number of time-domain standard deviations sampled per wavelet
pub const DEFAULT_SAMPLING_WINDOW: f64 = 7.0;

/// Bank layout selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BankMode {
    /// One shared sample count, all-pairs FFT convolution
    #[default]
    Uniform,
    /// Per-wavelet sample counts, FFT above `fft_threshold`, direct otherwise
    Split { fft_threshold: usize },
}

/// A single normalized wavelet
#[derive(Debug, Clone)]
pub struct Wavelet {
    pub values: Array1<Complex64>,
    pub freq: f64,
    pub width: f64,
    pub scale: f64,
}

impl Wavelet {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Rectangular bank: one row per frequency, all of equal length
#[derive(Debug, Clone)]
pub struct UniformBank {
    /// Wavelets (num_freqs, samples)
    pub wavelets: Array2<Complex64>,
    pub freqs: Vec<f64>,
    pub widths: Vec<f64>,
    pub scales: Vec<f64>,
}

impl UniformBank {
    pub fn n_wavelets(&self) -> usize {
        self.wavelets.nrows()
    }

    /// Shared sample count of every wavelet in the bank
    pub fn samples(&self) -> usize {
        self.wavelets.ncols()
    }

    /// Row `i` as a standalone wavelet
    pub fn wavelet(&self, i: usize) -> Wavelet {
        Wavelet {
            values: self.wavelets.row(i).to_owned(),
            freq: self.freqs[i],
            width: self.widths[i],
            scale: self.scales[i],
        }
    }
}

/// Bank split between FFT and direct convolution
#[derive(Debug, Clone)]
pub struct SplitBank {
    /// Wavelets above the threshold, padded to their common maximum length
    pub fft: UniformBank,
    /// Wavelets at or below the threshold, each at its own length
    pub direct: Vec<Wavelet>,
    /// `fft_mask[i]` is true iff frequency `i` (caller order) is in `fft`
    pub fft_mask: Vec<bool>,
}

/// Where a frequency of the caller's ordering ended up in a [`SplitBank`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member {
    Fft(usize),
    Direct(usize),
}

impl SplitBank {
    pub fn n_wavelets(&self) -> usize {
        self.fft_mask.len()
    }

    /// Group and position of every frequency, in caller order
    pub fn membership(&self) -> Vec<Member> {
        let mut n_fft = 0;
        let mut n_direct = 0;
        self.fft_mask
            .iter()
            .map(|&in_fft| {
                if in_fft {
                    n_fft += 1;
                    Member::Fft(n_fft - 1)
                } else {
                    n_direct += 1;
                    Member::Direct(n_direct - 1)
                }
            })
            .collect()
    }

    /// Longest wavelet over both groups
    pub fn max_samples(&self) -> usize {
        self.direct
            .iter()
            .map(Wavelet::len)
            .chain(std::iter::once(self.fft.samples()))
            .max()
            .unwrap_or(0)
    }
}

/// A bank in either layout
#[derive(Debug, Clone)]
pub enum MorletBank {
    Uniform(UniformBank),
    Split(SplitBank),
}

impl MorletBank {
    /// Build a bank in the requested layout
    pub fn build(
        mode: BankMode,
        freqs: &[f64],
        widths: &[f64],
        samplerate: f64,
        sampling_window: f64,
        complete: bool,
    ) -> Result<Self> {
        match mode {
            BankMode::Uniform => {
                morlet_multi(freqs, widths, samplerate, sampling_window, complete)
                    .map(MorletBank::Uniform)
            }
            BankMode::Split { fft_threshold } => morlet_multi_split(
                freqs,
                widths,
                samplerate,
                fft_threshold,
                sampling_window,
                complete,
            )
            .map(MorletBank::Split),
        }
    }

    pub fn n_wavelets(&self) -> usize {
        match self {
            MorletBank::Uniform(bank) => bank.n_wavelets(),
            MorletBank::Split(bank) => bank.n_wavelets(),
        }
    }

    /// Number of data samples a signal needs along its time axis
    pub fn max_samples(&self) -> usize {
        match self {
            MorletBank::Uniform(bank) => bank.samples(),
            MorletBank::Split(bank) => bank.max_samples(),
        }
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(WaveletError::invalid_parameter(name, value))
    }
}

/// Validate inputs and pair every frequency with its width
fn prepare(
    freqs: &[f64],
    widths: &[f64],
    samplerate: f64,
    sampling_window: f64,
) -> Result<Vec<f64>> {
    if freqs.is_empty() {
        return Err(WaveletError::invalid_parameter("freqs", "[]"));
    }
    check_positive("samplerate", samplerate)?;
    check_positive("sampling_window", sampling_window)?;
    for &f in freqs {
        check_positive("freq", f)?;
    }
    for &w in widths {
        check_positive("width", w)?;
    }
    broadcast_widths(freqs.len(), widths)
}

/// Largest wavelet a bank will allocate
const MAX_WAVELET_SAMPLES: usize = isize::MAX as usize / std::mem::size_of::<Complex64>();

/// Number of samples covering `sampling_window` standard deviations, unconverted
fn raw_sample_count(st: f64, samplerate: f64, sampling_window: f64) -> f64 {
    (st * samplerate * sampling_window).ceil()
}

fn sample_count(st: f64, samplerate: f64, sampling_window: f64) -> Result<usize> {
    let n = raw_sample_count(st, samplerate, sampling_window);
    if n.is_finite() && n <= MAX_WAVELET_SAMPLES as f64 {
        Ok(n as usize)
    } else {
        Err(WaveletError::invalid_parameter("wavelet samples", n))
    }
}

/// Longest wavelet needed for these parameters, checked against the data
///
/// Pure arithmetic, nothing is allocated. The result is the same for both
/// layouts: the uniform length is the largest per-wavelet count.
///
/// # Errors
/// `InvalidParameter`/`Configuration` as for [`morlet_multi`], then
/// `InsufficientData` when the longest wavelet exceeds `data_samples`
/// (including counts too large to represent).
pub fn required_samples(
    freqs: &[f64],
    widths: &[f64],
    samplerate: f64,
    sampling_window: f64,
    data_samples: usize,
) -> Result<usize> {
    let widths = prepare(freqs, widths, samplerate, sampling_window)?;

    let longest = freqs
        .iter()
        .zip(&widths)
        .map(|(&f, &w)| raw_sample_count(time_std(f, w), samplerate, sampling_window))
        .fold(0.0, f64::max);

    if longest > data_samples as f64 {
        return Err(WaveletError::InsufficientData {
            data_samples,
            // saturating for counts beyond usize
            wavelet_samples: longest as usize,
        });
    }
    Ok(longest as usize)
}

/// Rectangular bank of `freqs.len()` wavelets, all `samples` long
fn build_matrix(
    freqs: &[f64],
    widths: &[f64],
    samples: usize,
    samplerate: f64,
    complete: bool,
) -> UniformBank {
    let scales: Vec<f64> = freqs
        .iter()
        .zip(widths)
        .map(|(&f, &w)| morlet_scale(f, w, samples, samplerate))
        .collect();

    let mut wavelets = Array2::zeros((freqs.len(), samples));
    for (i, mut row) in wavelets.outer_iter_mut().enumerate() {
        row.assign(&morlet_wavelet(samples, widths[i], scales[i], complete));
        normalize_energy(row, samplerate);
    }

    UniformBank {
        wavelets,
        freqs: freqs.to_vec(),
        widths: widths.to_vec(),
        scales,
    }
}

/// Morlet wavelets with unit energy, all sampled on a shared length
///
/// # Arguments
/// * `freqs` - Wavelet frequencies (Hz)
/// * `widths` - Widths in cycles, broadcast against `freqs`
/// * `samplerate` - Sample rate of the signal (Hz)
/// * `sampling_window` - Standard deviations to sample (>= 7 recommended)
/// * `complete` - Use the complete Morlet definition
///
/// The sample count is `ceil(max(st) * samplerate * sampling_window)` with
/// `st = width / (2*pi*freq)`, so every wavelet but the most diffuse one is
/// sampled on more points than it strictly needs.
pub fn morlet_multi(
    freqs: &[f64],
    widths: &[f64],
    samplerate: f64,
    sampling_window: f64,
    complete: bool,
) -> Result<UniformBank> {
    let widths = prepare(freqs, widths, samplerate, sampling_window)?;

    let max_st = freqs
        .iter()
        .zip(&widths)
        .map(|(&f, &w)| time_std(f, w))
        .fold(f64::NEG_INFINITY, f64::max);
    let samples = sample_count(max_st, samplerate, sampling_window)?;

    debug!(
        n_wavelets = freqs.len(),
        samples, "built uniform morlet bank"
    );

    Ok(build_matrix(freqs, &widths, samples, samplerate, complete))
}

/// Morlet wavelets with unit energy, split by support length
///
/// Sample counts are computed per wavelet. Wavelets needing more than
/// `fft_threshold` samples form the FFT group, sampled on the largest count
/// within that group. The others keep their own count and are normalized
/// individually.
pub fn morlet_multi_split(
    freqs: &[f64],
    widths: &[f64],
    samplerate: f64,
    fft_threshold: usize,
    sampling_window: f64,
    complete: bool,
) -> Result<SplitBank> {
    let widths = prepare(freqs, widths, samplerate, sampling_window)?;

    let samples: Vec<usize> = freqs
        .iter()
        .zip(&widths)
        .map(|(&f, &w)| sample_count(time_std(f, w), samplerate, sampling_window))
        .collect::<Result<_>>()?;
    let fft_mask: Vec<bool> = samples.iter().map(|&n| n > fft_threshold).collect();

    let mut fft_freqs = Vec::new();
    let mut fft_widths = Vec::new();
    let mut fft_samples = 0;
    let mut direct = Vec::new();

    for (i, &in_fft) in fft_mask.iter().enumerate() {
        let (f, w, n) = (freqs[i], widths[i], samples[i]);
        if in_fft {
            fft_freqs.push(f);
            fft_widths.push(w);
            fft_samples = fft_samples.max(n);
        } else {
            let scale = morlet_scale(f, w, n, samplerate);
            let mut values = morlet_wavelet(n, w, scale, complete);
            normalize_energy(values.view_mut(), samplerate);
            direct.push(Wavelet {
                values,
                freq: f,
                width: w,
                scale,
            });
        }
    }

    let fft = build_matrix(&fft_freqs, &fft_widths, fft_samples, samplerate, complete);

    debug!(
        n_fft = fft.n_wavelets(),
        fft_samples,
        n_direct = direct.len(),
        fft_threshold,
        "built split morlet bank"
    );

    Ok(SplitBank {
        fft,
        direct,
        fft_mask,
    })
}
