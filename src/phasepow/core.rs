//! Phase and power extraction
//!
//! Convolves N-D data with a Morlet bank along its time axis and derives
//! instantaneous power and phase, adding one frequency axis to the output.
//!
//! # Coefficient layout
//!
//! Both bank layouts produce the same coefficient matrix: shape
//! `(n_freqs * n_signals, n_time)`, row `f * n_signals + s` holding frequency
//! `f` (in the caller's order) convolved with flattened signal row `s`.

use ndarray::{s, Array2, ArrayD, ArrayView2, ArrayViewD, Axis};
use num_complex::Complex64;
use rayon::prelude::*;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::config::TransformConfig;
use crate::convolve::{convolve_direct, fconv_multi, ConvMode, Sample};
use crate::error::{Result, WaveletError};
use crate::morlet::{required_samples, Member, MorletBank, SplitBank, UniformBank};
use crate::reshape::{from_2d, normalize_axis, to_2d};

/// Which quantities a computation returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnKind {
    Power,
    Phase,
    #[default]
    Both,
}

impl ReturnKind {
    pub fn wants_power(self) -> bool {
        matches!(self, ReturnKind::Power | ReturnKind::Both)
    }

    pub fn wants_phase(self) -> bool {
        matches!(self, ReturnKind::Phase | ReturnKind::Both)
    }
}

impl FromStr for ReturnKind {
    type Err = WaveletError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "power" | "pow" => Ok(ReturnKind::Power),
            "phase" => Ok(ReturnKind::Phase),
            "both" => Ok(ReturnKind::Both),
            other => Err(WaveletError::InvalidMode {
                kind: "to_return (expected 'power', 'phase' or 'both')",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReturnKind::Power => "power",
            ReturnKind::Phase => "phase",
            ReturnKind::Both => "both",
        };
        f.write_str(name)
    }
}

/// Power and/or phase, carrying only what was requested
#[derive(Debug, Clone, PartialEq)]
pub enum PhasePow {
    Power(ArrayD<f64>),
    Phase(ArrayD<f64>),
    Both { phase: ArrayD<f64>, power: ArrayD<f64> },
}

impl PhasePow {
    pub fn power(&self) -> Option<&ArrayD<f64>> {
        match self {
            PhasePow::Power(power) | PhasePow::Both { power, .. } => Some(power),
            PhasePow::Phase(_) => None,
        }
    }

    pub fn phase(&self) -> Option<&ArrayD<f64>> {
        match self {
            PhasePow::Phase(phase) | PhasePow::Both { phase, .. } => Some(phase),
            PhasePow::Power(_) => None,
        }
    }

    /// `(phase, power)`
    pub fn into_parts(self) -> (Option<ArrayD<f64>>, Option<ArrayD<f64>>) {
        match self {
            PhasePow::Power(power) => (None, Some(power)),
            PhasePow::Phase(phase) => (Some(phase), None),
            PhasePow::Both { phase, power } => (Some(phase), Some(power)),
        }
    }

    pub fn kind(&self) -> ReturnKind {
        match self {
            PhasePow::Power(_) => ReturnKind::Power,
            PhasePow::Phase(_) => ReturnKind::Phase,
            PhasePow::Both { .. } => ReturnKind::Both,
        }
    }

    /// Apply a fallible transform to every array held
    pub fn try_map<F>(self, mut f: F) -> Result<PhasePow>
    where
        F: FnMut(ArrayD<f64>) -> Result<ArrayD<f64>>,
    {
        Ok(match self {
            PhasePow::Power(power) => PhasePow::Power(f(power)?),
            PhasePow::Phase(phase) => PhasePow::Phase(f(phase)?),
            PhasePow::Both { phase, power } => PhasePow::Both {
                phase: f(phase)?,
                power: f(power)?,
            },
        })
    }
}

/// Phase of a wavelet coefficient in `(-pi, pi]`, 0 for a zero coefficient
#[inline]
pub fn coefficient_phase(c: Complex64) -> f64 {
    let magnitude = c.norm();
    if magnitude == 0.0 {
        return 0.0;
    }
    let phase = (c / magnitude).arg();
    if phase <= -PI {
        PI
    } else {
        phase
    }
}

/// Derive power `|c|^2` and/or phase from a coefficient matrix
pub fn power_and_phase(coefs: &ArrayView2<Complex64>, to_return: ReturnKind) -> PhasePow {
    let power = || coefs.mapv(|c| c.norm_sqr()).into_dyn();
    let phase = || coefs.mapv(coefficient_phase).into_dyn();
    match to_return {
        ReturnKind::Power => PhasePow::Power(power()),
        ReturnKind::Phase => PhasePow::Phase(phase()),
        ReturnKind::Both => PhasePow::Both {
            phase: phase(),
            power: power(),
        },
    }
}

/// Output shape: input shape with `n_freqs` inserted at `freq_axis`
fn output_shape(shape: &[usize], n_freqs: usize, freq_axis: usize) -> Result<Vec<usize>> {
    if freq_axis > shape.len() {
        return Err(WaveletError::AxisOutOfRange {
            axis: freq_axis as isize,
            rank: shape.len() + 1,
        });
    }
    let mut out = shape.to_vec();
    out.insert(freq_axis, n_freqs);
    Ok(out)
}

/// Convolve every signal row with a rectangular bank
fn uniform_coefficients<S: Sample>(bank: &UniformBank, batch: &ArrayView2<S>) -> Result<Array2<Complex64>> {
    if batch.nrows() == 0 {
        return Ok(Array2::zeros((0, batch.ncols())));
    }
    Ok(fconv_multi(&bank.wavelets.view(), batch, ConvMode::Same)?.into_complex())
}

/// Convolve every signal row with a split bank and restore the caller's
/// frequency order
fn split_coefficients<S: Sample>(bank: &SplitBank, batch: &ArrayView2<S>) -> Result<Array2<Complex64>> {
    let (n_signals, n_time) = batch.dim();
    let n_direct = bank.direct.len();

    let fft_coefs = if bank.fft.n_wavelets() > 0 {
        Some(uniform_coefficients(&bank.fft, batch)?)
    } else {
        None
    };

    // Parallel over (wavelet, signal) pairs, wavelet outer
    let direct_rows: Vec<_> = (0..n_direct * n_signals)
        .into_par_iter()
        .map(|idx| {
            let wavelet = &bank.direct[idx / n_signals];
            convolve_direct(&wavelet.values.view(), &batch.row(idx % n_signals), ConvMode::Same)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut coefs = Array2::zeros((bank.n_wavelets() * n_signals, n_time));
    for (f, member) in bank.membership().into_iter().enumerate() {
        let mut block = coefs.slice_mut(s![f * n_signals..(f + 1) * n_signals, ..]);
        match member {
            Member::Fft(p) => {
                if let Some(fft_coefs) = &fft_coefs {
                    block.assign(&fft_coefs.slice(s![p * n_signals..(p + 1) * n_signals, ..]));
                }
            }
            Member::Direct(q) => {
                for (s_idx, mut row) in block.axis_iter_mut(Axis(0)).enumerate() {
                    row.assign(&direct_rows[q * n_signals + s_idx]);
                }
            }
        }
    }

    Ok(coefs)
}

/// Validated inputs shared by the public entry points
struct Prepared {
    bank: MorletBank,
    out_shape: Vec<usize>,
}

fn prepare<S: Sample>(
    freqs: &[f64],
    widths: &[f64],
    samplerate: f64,
    dat: &ArrayViewD<S>,
    config: &TransformConfig,
) -> Result<Prepared> {
    let time_axis = normalize_axis(config.time_axis(), dat.ndim())?;
    let out_shape = output_shape(dat.shape(), freqs.len(), config.freq_axis())?;

    // Length check before any wavelet is allocated
    required_samples(
        freqs,
        widths,
        samplerate,
        config.sampling_window(),
        dat.len_of(Axis(time_axis)),
    )?;

    let bank = MorletBank::build(
        config.bank_mode(),
        freqs,
        widths,
        samplerate,
        config.sampling_window(),
        config.complete(),
    )?;

    Ok(Prepared { bank, out_shape })
}

fn compute_coefficients<S: Sample>(
    bank: &MorletBank,
    dat: &ArrayViewD<S>,
    time_axis: isize,
) -> Result<Array2<Complex64>> {
    let batch = to_2d(dat, time_axis)?;
    match bank {
        MorletBank::Uniform(bank) => {
            debug!(
                n_freqs = bank.n_wavelets(),
                n_signals = batch.nrows(),
                samples = bank.samples(),
                "uniform fft convolution"
            );
            uniform_coefficients(bank, &batch.view())
        }
        MorletBank::Split(bank) => {
            debug!(
                n_fft = bank.fft.n_wavelets(),
                n_direct = bank.direct.len(),
                n_signals = batch.nrows(),
                "split fft/direct convolution"
            );
            split_coefficients(bank, &batch.view())
        }
    }
}

/// Raw complex wavelet coefficients
///
/// Returns the `(n_freqs * n_signals, n_time)` coefficient matrix described
/// in the module docs, where signals are the rows of
/// [`to_2d`](crate::reshape::to_2d) applied to `dat`.
pub fn coefficients<S: Sample>(
    freqs: &[f64],
    widths: &[f64],
    samplerate: f64,
    dat: &ArrayViewD<S>,
    config: &TransformConfig,
) -> Result<Array2<Complex64>> {
    let prepared = prepare(freqs, widths, samplerate, dat, config)?;
    compute_coefficients(&prepared.bank, dat, config.time_axis())
}

/// Phase and/or power of `dat` at every frequency
///
/// # Arguments
/// * `freqs` - Wavelet frequencies (Hz)
/// * `widths` - Widths in cycles, broadcast against `freqs`
/// * `samplerate` - Sample rate of `dat` (Hz)
/// * `dat` - Real or complex data; the time axis should include a buffer
///   on both sides of the region of interest to absorb edge effects
/// * `config` - Bank layout, axes and requested outputs
///
/// # Returns
/// Arrays shaped like `dat` with a frequency axis of length `freqs.len()`
/// inserted at `config.freq_axis()`. Power is `|c|^2`; phase is in
/// `(-pi, pi]` and exactly 0 wherever the coefficient is 0.
///
/// # Errors
/// All input checks run before any convolution: axes, frequency/width
/// compatibility, parameter ranges, and data length versus the longest
/// wavelet.
pub fn phase_pow_multi<S: Sample>(
    freqs: &[f64],
    widths: &[f64],
    samplerate: f64,
    dat: &ArrayViewD<S>,
    config: &TransformConfig,
) -> Result<PhasePow> {
    let Prepared { bank, out_shape } = prepare(freqs, widths, samplerate, dat, config)?;
    let coefs = compute_coefficients(&bank, dat, config.time_axis())?;

    let time_axis = config.time_axis();
    let freq_axis = config.freq_axis();
    power_and_phase(&coefs.view(), config.to_return()).try_map(|values| {
        let values = values.into_dimensionality::<ndarray::Ix2>().map_err(|_| {
            WaveletError::ShapeMismatch {
                expected: out_shape.clone(),
                actual: coefs.shape().to_vec(),
            }
        })?;
        from_2d(&values.view(), time_axis, &out_shape, Some(freq_axis))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array1, Array3, ArrayD, Dimension, IxDyn};

    const SR: f64 = 200.0;

    fn sines(shape: &[usize], time_axis: usize) -> ArrayD<f64> {
        ArrayD::from_shape_fn(IxDyn(shape), |idx| {
            let t = idx[time_axis] as f64 / SR;
            let k: usize = idx.slice().iter().sum::<usize>() - idx[time_axis];
            (2.0 * PI * (6.0 + k as f64) * t).sin() + 0.3 * (2.0 * PI * 23.0 * t + k as f64).cos()
        })
    }

    fn assert_close(a: &ArrayD<f64>, b: &ArrayD<f64>, rel: f64) {
        assert_eq!(a.shape(), b.shape());
        let scale = a.iter().fold(0.0f64, |m, x| m.max(x.abs())).max(1e-300);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!(
                (x - y).abs() <= rel * scale,
                "{} vs {} (scale {})",
                x,
                y,
                scale
            );
        }
    }

    fn wrapped_diff(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(2.0 * PI);
        d.min(2.0 * PI - d)
    }

    #[test]
    fn test_parse_return_kind() {
        assert_eq!("power".parse::<ReturnKind>().unwrap(), ReturnKind::Power);
        assert_eq!("pow".parse::<ReturnKind>().unwrap(), ReturnKind::Power);
        assert_eq!("phase".parse::<ReturnKind>().unwrap(), ReturnKind::Phase);
        assert_eq!("both".parse::<ReturnKind>().unwrap(), ReturnKind::Both);
        assert!(matches!(
            "amplitude".parse::<ReturnKind>(),
            Err(WaveletError::InvalidMode { .. })
        ));
    }

    #[test]
    fn test_output_shape_and_requested_fields() {
        let dat = sines(&[3, 400], 1);
        let freqs = [5.0, 10.0, 20.0, 40.0];

        let config = TransformConfig::new().with_to_return(ReturnKind::Power);
        let result = phase_pow_multi(&freqs, &[5.0], SR, &dat.view(), &config).unwrap();
        assert_eq!(result.kind(), ReturnKind::Power);
        assert!(result.phase().is_none());
        assert_eq!(result.power().unwrap().shape(), &[4, 3, 400]);

        let config = TransformConfig::new()
            .with_to_return(ReturnKind::Phase)
            .with_freq_axis(2);
        let result = phase_pow_multi(&freqs, &[5.0], SR, &dat.view(), &config).unwrap();
        assert!(result.power().is_none());
        assert_eq!(result.phase().unwrap().shape(), &[3, 400, 4]);
    }

    #[test]
    fn test_power_matches_coefficients() {
        let dat = sines(&[2, 300], 1);
        let freqs = [8.0, 16.0];
        let config = TransformConfig::new();
        let coefs = coefficients(&freqs, &[5.0], SR, &dat.view(), &config).unwrap();
        assert_eq!(coefs.shape(), &[4, 300]);

        let result = phase_pow_multi(&freqs, &[5.0], SR, &dat.view(), &config).unwrap();
        let power = result.power().unwrap();
        let phase = result.phase().unwrap();
        for f in 0..2 {
            for s in 0..2 {
                for t in 0..300 {
                    let c = coefs[[f * 2 + s, t]];
                    assert_eq!(power[[f, s, t]], c.norm_sqr());
                    assert_eq!(phase[[f, s, t]], coefficient_phase(c));
                }
            }
        }
    }

    #[test]
    fn test_zero_signal_gives_zero_phase_and_power() {
        let dat = ArrayD::<f64>::zeros(IxDyn(&[2, 256]));
        for config in [TransformConfig::new(), TransformConfig::split(90)] {
            let result =
                phase_pow_multi(&[10.0, 40.0], &[5.0], SR, &dat.view(), &config).unwrap();
            assert!(result.power().unwrap().iter().all(|&p| p == 0.0));
            assert!(result.phase().unwrap().iter().all(|&p| p == 0.0));
        }
    }

    #[test]
    fn test_phase_range() {
        let dat = sines(&[1, 500], 1);
        let result =
            phase_pow_multi(&[6.0, 23.0], &[5.0], SR, &dat.view(), &TransformConfig::new())
                .unwrap();
        assert!(result
            .phase()
            .unwrap()
            .iter()
            .all(|&p| p > -PI && p <= PI));
        assert_eq!(coefficient_phase(Complex64::new(-1.0, -0.0)), PI);
        assert_eq!(coefficient_phase(Complex64::new(0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_insufficient_data() {
        // 1 Hz at 200 Hz needs 1115 samples
        let dat = ArrayD::<f64>::zeros(IxDyn(&[500]));
        for config in [TransformConfig::new(), TransformConfig::split(90)] {
            let err = phase_pow_multi(&[1.0], &[5.0], SR, &dat.view(), &config).unwrap_err();
            assert_eq!(
                err,
                WaveletError::InsufficientData {
                    data_samples: 500,
                    wavelet_samples: 1115
                }
            );
        }
    }

    #[test]
    fn test_data_length_boundary() {
        // 10 Hz at 200 Hz with 5 cycles needs exactly 112 samples
        for config in [TransformConfig::new(), TransformConfig::split(90)] {
            let dat = sines(&[2, 112], 1);
            let result = phase_pow_multi(&[10.0], &[5.0], SR, &dat.view(), &config).unwrap();
            assert_eq!(result.power().unwrap().shape(), &[1, 2, 112]);

            let dat = sines(&[2, 111], 1);
            let err = phase_pow_multi(&[10.0], &[5.0], SR, &dat.view(), &config).unwrap_err();
            assert_eq!(
                err,
                WaveletError::InsufficientData {
                    data_samples: 111,
                    wavelet_samples: 112
                }
            );
        }
    }

    #[test]
    fn test_tiny_frequency_fails_before_building() {
        let dat = ArrayD::<f64>::zeros(IxDyn(&[500]));
        for freq in [1e-300, 1e-5] {
            for config in [TransformConfig::new(), TransformConfig::split(90)] {
                let err = phase_pow_multi(&[freq], &[5.0], SR, &dat.view(), &config).unwrap_err();
                assert!(
                    matches!(err, WaveletError::InsufficientData { data_samples: 500, .. }),
                    "{:?}",
                    err
                );
            }
        }
    }

    #[test]
    fn test_no_signal_rows() {
        // 10 Hz goes through the FFT group, 40 Hz through direct convolution
        let dat = ArrayD::<f64>::zeros(IxDyn(&[0, 400]));
        for config in [
            TransformConfig::new(),
            TransformConfig::split(90),
            TransformConfig::split(0),
        ] {
            let result = phase_pow_multi(&[10.0, 40.0], &[5.0], SR, &dat.view(), &config).unwrap();
            assert_eq!(result.power().unwrap().shape(), &[2, 0, 400]);
            assert_eq!(result.phase().unwrap().shape(), &[2, 0, 400]);

            let coefs = coefficients(&[10.0, 40.0], &[5.0], SR, &dat.view(), &config).unwrap();
            assert_eq!(coefs.shape(), &[0, 400]);
        }
    }

    #[test]
    fn test_configuration_error() {
        let dat = ArrayD::<f64>::zeros(IxDyn(&[1000]));
        let err = phase_pow_multi(
            &[10.0, 20.0, 30.0, 40.0],
            &[5.0, 6.0, 7.0],
            SR,
            &dat.view(),
            &TransformConfig::new(),
        )
        .unwrap_err();
        assert!(matches!(err, WaveletError::Configuration { .. }));
    }

    #[test]
    fn test_axis_errors() {
        let dat = ArrayD::<f64>::zeros(IxDyn(&[2, 300]));
        let config = TransformConfig::new().with_freq_axis(3);
        assert!(matches!(
            phase_pow_multi(&[10.0], &[5.0], SR, &dat.view(), &config),
            Err(WaveletError::AxisOutOfRange { .. })
        ));
        let config = TransformConfig::new().with_time_axis(2);
        assert!(matches!(
            phase_pow_multi(&[10.0], &[5.0], SR, &dat.view(), &config),
            Err(WaveletError::AxisOutOfRange { .. })
        ));
    }

    #[test]
    fn test_split_fft_only_equals_uniform() {
        let dat = sines(&[2, 3, 400], 2);
        let freqs = [4.0, 9.0, 17.0, 33.0];
        let uniform = phase_pow_multi(&freqs, &[5.0, 7.0], SR, &dat.view(), &TransformConfig::new())
            .unwrap();
        let split = phase_pow_multi(
            &freqs,
            &[5.0, 7.0],
            SR,
            &dat.view(),
            &TransformConfig::split(0),
        )
        .unwrap();
        assert_close(uniform.power().unwrap(), split.power().unwrap(), 1e-12);
        assert_close(uniform.phase().unwrap(), split.phase().unwrap(), 1e-12);
    }

    #[test]
    fn test_split_direct_only_matches_uniform() {
        // Equal time-domain spread: every wavelet needs the same sample count
        let dat = sines(&[3, 360], 1);
        let freqs = [5.0, 10.0, 20.0];
        let widths = [3.0, 6.0, 12.0];

        let uniform =
            phase_pow_multi(&freqs, &widths, SR, &dat.view(), &TransformConfig::new()).unwrap();
        let fft_only =
            phase_pow_multi(&freqs, &widths, SR, &dat.view(), &TransformConfig::split(0)).unwrap();
        let direct_only = phase_pow_multi(
            &freqs,
            &widths,
            SR,
            &dat.view(),
            &TransformConfig::split(usize::MAX),
        )
        .unwrap();

        let power = uniform.power().unwrap();
        assert_close(power, direct_only.power().unwrap(), 1e-6);
        assert_close(fft_only.power().unwrap(), direct_only.power().unwrap(), 1e-6);

        let max_power = power.iter().fold(0.0f64, |m, &p| m.max(p));
        let phase_u = uniform.phase().unwrap();
        let phase_d = direct_only.phase().unwrap();
        for ((p, a), b) in power.iter().zip(phase_u.iter()).zip(phase_d.iter()) {
            if *p > 1e-6 * max_power {
                assert!(wrapped_diff(*a, *b) < 1e-6, "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_split_mixed_preserves_frequency_order() {
        // 3 Hz and 10 Hz go through the FFT, 30 Hz and 60 Hz through direct
        // convolution; permuting the request must permute the output slots.
        let dat = sines(&[2, 600], 1);
        let config = TransformConfig::split(90).with_to_return(ReturnKind::Power);

        let shuffled = [60.0, 3.0, 30.0, 10.0];
        let sorted = [3.0, 10.0, 30.0, 60.0];
        let a = phase_pow_multi(&shuffled, &[5.0], SR, &dat.view(), &config).unwrap();
        let b = phase_pow_multi(&sorted, &[5.0], SR, &dat.view(), &config).unwrap();
        let (a, b) = (a.power().unwrap(), b.power().unwrap());

        for (i, f) in shuffled.iter().enumerate() {
            let j = sorted.iter().position(|g| g == f).unwrap();
            let slot_a = a.index_axis(Axis(0), i).to_owned();
            let slot_b = b.index_axis(Axis(0), j).to_owned();
            assert_close(&slot_b, &slot_a, 1e-12);
        }

        // Slots really differ between frequencies
        let first = a.index_axis(Axis(0), 0).to_owned();
        let second = a.index_axis(Axis(0), 1).to_owned();
        assert_ne!(first, second);
    }

    #[test]
    fn test_time_axis_first() {
        let dat = sines(&[400, 2], 0);
        let config = TransformConfig::new().with_time_axis(0).with_freq_axis(1);
        let result = phase_pow_multi(&[10.0, 20.0], &[5.0], SR, &dat.view(), &config).unwrap();
        let power = result.power().unwrap();
        assert_eq!(power.shape(), &[400, 2, 2]);

        // Same numbers as with time last
        let transposed = dat.t().as_standard_layout().into_owned();
        let reference = phase_pow_multi(
            &[10.0, 20.0],
            &[5.0],
            SR,
            &transposed.view(),
            &TransformConfig::new(),
        )
        .unwrap();
        let reference = reference.power().unwrap();
        for t in 0..400 {
            for f in 0..2 {
                for s in 0..2 {
                    assert_relative_eq!(
                        power[[t, f, s]],
                        reference[[f, s, t]],
                        max_relative = 1e-12
                    );
                }
            }
        }
    }

    #[test]
    fn test_complex_input() {
        let n = 400;
        let analytic = Array1::from_shape_fn(n, |i| {
            Complex64::from_polar(1.0, 2.0 * PI * 12.0 * i as f64 / SR)
        })
        .into_dyn();
        let real = analytic.mapv(|c| c.re);

        let config = TransformConfig::new().with_to_return(ReturnKind::Power);
        let complex_power = phase_pow_multi(&[12.0], &[6.0], SR, &analytic.view(), &config).unwrap();
        let real_power = phase_pow_multi(&[12.0], &[6.0], SR, &real.view(), &config).unwrap();

        // The analytic signal carries twice the amplitude at the positive
        // frequency the wavelet responds to, so four times the power.
        let mid = n / 2;
        let c = complex_power.power().unwrap()[[0, mid]];
        let r = real_power.power().unwrap()[[0, mid]];
        assert_relative_eq!(c / r, 4.0, max_relative = 1e-3);
    }

    #[test]
    fn test_rank_three_input() {
        let dat: Array3<f64> = Array3::from_shape_fn((2, 3, 300), |(i, j, t)| {
            ((i + 2 * j + 1) as f64 * 2.0 * PI * 5.0 * t as f64 / SR).sin()
        });
        let dat = dat.into_dyn();
        let result =
            phase_pow_multi(&[10.0], &[5.0], SR, &dat.view(), &TransformConfig::new()).unwrap();
        assert_eq!(result.power().unwrap().shape(), &[1, 2, 3, 300]);
    }
}
