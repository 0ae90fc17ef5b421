//! Audio spectrogram engine: strided framing, windowed FFT power estimation,
//! band limiting, and sparse thresholded encoding for transport.
//!
//! The engine is a pure function of its inputs: no state survives a call, and
//! identical input plus configuration yields bit-identical output. Per-frame
//! spectral estimation runs in parallel; the encoder's global maxima are
//! reduced after all frames complete.

pub mod error;
pub mod framer;
pub mod report;
pub mod sparse;
pub mod spectral;

use crate::config::EngineConfig;

use error::Result;
use framer::Framer;
use report::{AudioSummary, SpectrogramReport};
use spectral::PowerSpectrum;

/// Dense pipeline shared by [`analyze`] and [`summarize`]: validate, frame,
/// estimate. No band limiting is applied here.
pub fn power_spectrogram(
    samples: &[f32],
    sample_rate: u32,
    config: &EngineConfig,
) -> Result<PowerSpectrum> {
    config.validate()?;

    let framer = Framer::new(sample_rate, config.window_ms, config.stride_ms)?;
    let frames = framer.frames(samples)?;
    log::info!(
        "Framing: {} frames of {} samples, stride {}",
        frames.len(),
        framer.window_size,
        framer.stride_size
    );

    let spectrum = spectral::estimate(&frames, sample_rate);
    log::info!(
        "Spectral estimation: {} frames x {} bins ({:.1} Hz/bin)",
        spectrum.frames.len(),
        spectrum.bins(),
        spectrum.bin_hz
    );

    Ok(spectrum)
}

/// Run the full pipeline and produce a transport-ready sparse report.
pub fn analyze(
    samples: &[f32],
    sample_rate: u32,
    config: &EngineConfig,
) -> Result<SpectrogramReport> {
    let mut spectrum = power_spectrogram(samples, sample_rate, config)?;

    let max_freq = config.max_freq_or_nyquist(sample_rate);
    spectral::band_limit(&mut spectrum, max_freq);
    log::info!(
        "Band limit: keeping {} bins (<= {:.0} Hz)",
        spectrum.bins(),
        max_freq
    );

    let report = sparse::encode(&spectrum, config);
    log::info!(
        "Sparse encoding: {} slices, maxVal={:.6e}, maxFreq bin {}",
        report.windows.len(),
        report.max_val,
        report.max_freq
    );

    Ok(report)
}

/// Quick-metadata path: same dense estimate as [`analyze`], no band limiting
/// or sparse encoding.
pub fn summarize(samples: &[f32], sample_rate: u32, config: &EngineConfig) -> Result<AudioSummary> {
    let spectrum = power_spectrogram(samples, sample_rate, config)?;

    Ok(AudioSummary {
        duration: samples.len() as f64 / sample_rate as f64,
        sample_rate,
        samples: samples.len(),
        frames: spectrum.frames.len(),
        bins: spectrum.bins(),
        max_val: spectrum.max_value(),
    })
}
