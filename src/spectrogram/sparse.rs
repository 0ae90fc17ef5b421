use crate::config::EngineConfig;

use super::report::{SparseSlice, SpectrogramReport};
use super::spectral::PowerSpectrum;

/// Compress a band-limited power matrix into thresholded, quantized slices.
///
/// Strengths are normalized against the single largest power value in the
/// matrix, so the loudest cell always quantizes to exactly
/// `quantization_scale`. An all-zero matrix (silence) normalizes to zero
/// everywhere and yields only empty slices.
pub fn encode(spectrum: &PowerSpectrum, config: &EngineConfig) -> SpectrogramReport {
    let time_step = config.stride_ms as f64 / 1000.0;
    // Truncated to 2 decimals per element, so rounding error does not
    // accumulate across slices.
    let step_2dp = (time_step * 100.0).floor() / 100.0;

    let max_val = spectrum.max_value();
    let quantization_scale = config.quantization_scale as f64;

    let mut max_freq = 0usize;
    let mut windows = Vec::with_capacity(spectrum.frames.len());

    for (i, power) in spectrum.frames.iter().enumerate() {
        let mut freqs = Vec::new();
        let mut strengths = Vec::new();
        let mut max_strength = 0u32;

        if max_val > 0.0 {
            for (bin, &p) in power.iter().enumerate() {
                // Threshold and quantization both run in f64: an f32 ratio
                // sitting just under the decimal threshold must not slip
                // through and quantize below floor(threshold * scale).
                let strength = p as f64 / max_val as f64;
                if strength >= config.min_strength {
                    let quantized = (strength * quantization_scale).floor() as u32;
                    max_strength = max_strength.max(quantized);
                    freqs.push(bin);
                    strengths.push(quantized);
                }
            }
        }

        // Bins are scanned in ascending order, so the last kept one is the
        // slice's highest.
        if let Some(&top) = freqs.last() {
            max_freq = max_freq.max(top);
        }

        windows.push(SparseSlice {
            time: i as f64 * step_2dp,
            freqs,
            strengths,
            max_strength,
        });
    }

    let max_time = windows
        .len()
        .checked_sub(1)
        .map_or(0.0, |last| last as f64 * step_2dp);

    SpectrogramReport {
        max_val,
        max_freq,
        time_step,
        max_time,
        windows,
    }
}
