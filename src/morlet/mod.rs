//! # Morlet Module
//!
//! Sampled complex Morlet wavelets and the energy-normalized banks built
//! from them.

pub mod bank;
pub mod kernel;

pub use bank::{
    morlet_multi, morlet_multi_split, required_samples, BankMode, Member, MorletBank, SplitBank,
    UniformBank, Wavelet, DEFAULT_FFT_THRESHOLD, DEFAULT_SAMPLING_WINDOW,
};
pub use kernel::morlet_wavelet;
