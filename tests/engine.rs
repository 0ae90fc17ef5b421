//! End-to-end engine tests against known signals.
//!
//! The reference figures come from the default configuration: 20ms window /
//! 10ms stride at 16kHz gives 320-sample windows, 160-sample strides, and
//! 99 frames for a 1-second buffer.

use std::f64::consts::PI;

use sonograph::config::EngineConfig;
use sonograph::spectrogram::error::SpectrogramError;
use sonograph::spectrogram::{analyze, power_spectrogram, spectral, summarize};

const SAMPLE_RATE: u32 = 16000;
const WINDOW_SIZE: usize = 320;

fn sine(freq_hz: f64, seconds: f64) -> Vec<f32> {
    let n = (seconds * SAMPLE_RATE as f64) as usize;
    (0..n)
        .map(|i| (2.0 * PI * freq_hz * i as f64 / SAMPLE_RATE as f64).sin() as f32)
        .collect()
}

fn silence(seconds: f64) -> Vec<f32> {
    vec![0.0f32; (seconds * SAMPLE_RATE as f64) as usize]
}

#[test]
fn silence_yields_degenerate_but_valid_report() {
    let report = analyze(&silence(1.0), SAMPLE_RATE, &EngineConfig::default()).unwrap();

    assert_eq!(report.max_val, 0.0);
    assert_eq!(report.max_freq, 0);
    assert_eq!(report.windows.len(), 99);
    for slice in &report.windows {
        assert!(slice.freqs.is_empty());
        assert!(slice.strengths.is_empty());
        assert_eq!(slice.max_strength, 0);
    }
}

#[test]
fn sine_wave_peaks_at_expected_bin() {
    let report = analyze(&sine(1000.0, 1.0), SAMPLE_RATE, &EngineConfig::default()).unwrap();

    assert_eq!(report.windows.len(), 99);

    // Slice nearest 0.5s; its strongest bin should sit at 1000Hz, i.e. bin
    // 1000 * 320 / 16000 = 20.
    let slice = &report.windows[50];
    assert!((slice.time - 0.5).abs() < 1e-9);
    assert!(!slice.freqs.is_empty());

    let strongest = slice
        .strengths
        .iter()
        .enumerate()
        .max_by_key(|&(_, &s)| s)
        .map(|(i, _)| slice.freqs[i])
        .unwrap();
    assert_eq!(strongest, 20);

    assert!(report.max_val > 0.0);
    assert!(report.max_freq >= 20);
}

#[test]
fn quantized_strengths_stay_within_bounds() {
    let config = EngineConfig::default();
    let report = analyze(&sine(1000.0, 1.0), SAMPLE_RATE, &config).unwrap();

    let floor = (config.min_strength * config.quantization_scale as f64) as u32;
    assert_eq!(floor, 50);
    let mut saw_full_scale = false;

    for slice in &report.windows {
        assert_eq!(slice.freqs.len(), slice.strengths.len());
        for &s in &slice.strengths {
            assert!(s >= floor, "strength {} below floor {}", s, floor);
            assert!(s <= config.quantization_scale);
            saw_full_scale |= s == config.quantization_scale;
        }
        if !slice.strengths.is_empty() {
            assert_eq!(slice.max_strength, *slice.strengths.iter().max().unwrap());
        }
    }

    // The loudest cell normalizes to exactly 1.0
    assert!(saw_full_scale);
}

#[test]
fn threshold_boundary_never_quantizes_below_floor() {
    use sonograph::spectrogram::sparse;
    use sonograph::spectrogram::spectral::PowerSpectrum;

    // A power ratio of exactly f32(0.005) sits just under the decimal
    // threshold (0.004999999888...); it must be excluded, not kept and
    // truncated to 49.
    let spectrum = PowerSpectrum {
        frames: vec![vec![0.005f32, 1.0]],
        bin_hz: 50.0,
    };
    let report = sparse::encode(&spectrum, &EngineConfig::default());

    let slice = &report.windows[0];
    assert_eq!(slice.freqs, vec![1]);
    assert_eq!(slice.strengths, vec![10000]);
    assert!(slice.strengths.iter().all(|&s| (50..=10000).contains(&s)));
}

#[test]
fn nyquist_default_is_the_integer_half_rate() {
    let config = EngineConfig::default();
    assert_eq!(config.max_freq_or_nyquist(16000), 8000.0);
    // Odd rates floor to the lower whole Hz
    assert_eq!(config.max_freq_or_nyquist(44101), 22050.0);
}

#[test]
fn report_maxima_match_the_dense_matrix() {
    let config = EngineConfig::default();
    let samples = sine(2500.0, 1.0);

    let report = analyze(&samples, SAMPLE_RATE, &config).unwrap();

    let mut spectrum = power_spectrogram(&samples, SAMPLE_RATE, &config).unwrap();
    spectral::band_limit(&mut spectrum, config.max_freq_or_nyquist(SAMPLE_RATE));
    assert_eq!(report.max_val, spectrum.max_value());

    let highest_listed = report
        .windows
        .iter()
        .filter_map(|s| s.freqs.last().copied())
        .max()
        .unwrap();
    assert_eq!(report.max_freq, highest_listed);
}

#[test]
fn time_axis_uses_per_element_truncated_step() {
    let report = analyze(&sine(440.0, 1.0), SAMPLE_RATE, &EngineConfig::default()).unwrap();

    assert!((report.time_step - 0.01).abs() < 1e-12);
    for (i, slice) in report.windows.iter().enumerate() {
        assert!((slice.time - i as f64 * 0.01).abs() < 1e-12);
    }
    assert_eq!(report.max_time, report.windows.last().unwrap().time);
}

#[test]
fn analysis_is_idempotent() {
    let samples = sine(777.0, 0.5);
    let config = EngineConfig::default();
    let a = analyze(&samples, SAMPLE_RATE, &config).unwrap();
    let b = analyze(&samples, SAMPLE_RATE, &config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn zero_max_freq_limits_slices_to_dc() {
    let config = EngineConfig {
        max_freq: Some(0.0),
        ..EngineConfig::default()
    };
    let report = analyze(&sine(1000.0, 1.0), SAMPLE_RATE, &config).unwrap();

    assert_eq!(report.max_freq, 0);
    for slice in &report.windows {
        assert!(slice.freqs.iter().all(|&f| f == 0));
    }
}

#[test]
fn band_limit_keeps_cutoff_bin_inclusively() {
    let config = EngineConfig::default();
    let mut spectrum = power_spectrogram(&sine(1000.0, 1.0), SAMPLE_RATE, &config).unwrap();

    // Full one-sided spectrum first: 320/2 + 1 bins
    assert_eq!(spectrum.bins(), 161);

    // 4000Hz sits exactly on bin 80 (50Hz/bin) and must be kept
    spectral::band_limit(&mut spectrum, 4000.0);
    assert_eq!(spectrum.bins(), 81);
}

#[test]
fn one_window_of_samples_produces_one_slice() {
    let report = analyze(
        &sine(1000.0, WINDOW_SIZE as f64 / SAMPLE_RATE as f64),
        SAMPLE_RATE,
        &EngineConfig::default(),
    )
    .unwrap();
    assert_eq!(report.windows.len(), 1);
    assert_eq!(report.max_time, 0.0);
}

#[test]
fn short_input_fails_with_insufficient_samples() {
    let samples = vec![0.1f32; WINDOW_SIZE - 1];
    let err = analyze(&samples, SAMPLE_RATE, &EngineConfig::default()).unwrap_err();
    assert!(matches!(err, SpectrogramError::InsufficientSamples { .. }));
}

#[test]
fn bad_configurations_are_rejected_up_front() {
    let samples = sine(1000.0, 1.0);

    for config in [
        EngineConfig {
            window_ms: 0.0,
            ..EngineConfig::default()
        },
        EngineConfig {
            stride_ms: -10.0,
            ..EngineConfig::default()
        },
        EngineConfig {
            max_freq: Some(-1.0),
            ..EngineConfig::default()
        },
    ] {
        let err = analyze(&samples, SAMPLE_RATE, &config).unwrap_err();
        assert!(matches!(err, SpectrogramError::InvalidConfiguration(_)));
    }
}

#[test]
fn summary_reports_the_dense_shape() {
    let summary = summarize(&sine(1000.0, 1.0), SAMPLE_RATE, &EngineConfig::default()).unwrap();

    assert!((summary.duration - 1.0).abs() < 1e-9);
    assert_eq!(summary.sample_rate, SAMPLE_RATE);
    assert_eq!(summary.samples, 16000);
    assert_eq!(summary.frames, 99);
    assert_eq!(summary.bins, 161);
    assert!(summary.max_val > 0.0);
}

#[test]
fn json_field_names_match_the_wire_contract() {
    let report = analyze(&sine(1000.0, 0.1), SAMPLE_RATE, &EngineConfig::default()).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    for key in ["maxVal", "maxFreq", "timeStep", "maxTime", "windows"] {
        assert!(value.get(key).is_some(), "missing key {}", key);
    }
    let slice = &value["windows"][0];
    for key in ["time", "freqs", "strengths", "maxStrength"] {
        assert!(slice.get(key).is_some(), "missing slice key {}", key);
    }
}
