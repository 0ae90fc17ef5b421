use rayon::prelude::*;
use rustfft::{num_complex::Complex, FftPlanner};

use super::framer::Frames;

/// Dense power matrix, one spectrum per frame. Before band limiting every
/// spectrum holds `window_size/2 + 1` one-sided bins; bin `k` is centered at
/// `k * bin_hz`.
pub struct PowerSpectrum {
    /// Indexed `[frame][bin]`, non-negative power values.
    pub frames: Vec<Vec<f32>>,
    /// Frequency spacing between adjacent bins (`sample_rate / window_size`).
    pub bin_hz: f64,
}

impl PowerSpectrum {
    pub fn bins(&self) -> usize {
        self.frames.first().map_or(0, |f| f.len())
    }

    /// Largest power value anywhere in the matrix; 0 for an all-zero matrix.
    pub fn max_value(&self) -> f32 {
        self.frames
            .iter()
            .flat_map(|f| f.iter().copied())
            .fold(0.0f32, f32::max)
    }
}

/// Periodogram estimate per frame: Hann taper, one-sided FFT, squared
/// magnitude, scaled so the result approximates power spectral density.
pub fn estimate(frames: &Frames<'_>, sample_rate: u32) -> PowerSpectrum {
    let window_size = frames.window_size();
    let taper = hann_window(window_size);
    let scale = taper.iter().map(|w| w * w).sum::<f32>() * sample_rate as f32;
    let bins = window_size / 2 + 1;

    let spectra: Vec<Vec<f32>> = (0..frames.len())
        .into_par_iter()
        .map(|i| {
            let mut buffer: Vec<Complex<f32>> = frames
                .get(i)
                .iter()
                .zip(taper.iter())
                .map(|(&s, &w)| Complex::new(s * w, 0.0))
                .collect();

            // Per-thread FFT planner (rayon-safe)
            let mut planner = FftPlanner::<f32>::new();
            let fft = planner.plan_fft_forward(window_size);
            fft.process(&mut buffer);

            let mut power: Vec<f32> = buffer[..bins].iter().map(|c| c.norm_sqr()).collect();

            // Interior bins carry the folded negative-frequency energy; DC and
            // Nyquist are not mirrored and get no factor of 2.
            if bins > 2 {
                for p in &mut power[1..bins - 1] {
                    *p *= 2.0 / scale;
                }
            }
            power[0] /= scale;
            if bins > 1 {
                power[bins - 1] /= scale;
            }

            power
        })
        .collect();

    PowerSpectrum {
        frames: spectra,
        bin_hz: sample_rate as f64 / window_size as f64,
    }
}

/// Drop every bin whose center frequency exceeds `max_freq`. The cutoff bin
/// itself is kept; `max_freq = 0` keeps only the DC bin.
pub fn band_limit(spectrum: &mut PowerSpectrum, max_freq: f64) {
    let bins = spectrum.bins();
    if bins == 0 {
        return;
    }

    let cutoff = (0..bins)
        .rev()
        .find(|&k| k as f64 * spectrum.bin_hz <= max_freq)
        .unwrap_or(0);

    for frame in &mut spectrum.frames {
        frame.truncate(cutoff + 1);
    }
}

/// Symmetric Hann taper (`0.5 - 0.5*cos(2*pi*i/(N-1))`), matching
/// `numpy.hanning`.
fn hann_window(size: usize) -> Vec<f32> {
    if size == 1 {
        return vec![1.0];
    }
    (0..size)
        .map(|i| {
            0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (size - 1) as f32).cos())
        })
        .collect()
}
