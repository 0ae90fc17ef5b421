use serde::Deserialize;
use std::path::PathBuf;

use crate::spectrogram::error::{Result, SpectrogramError};

/// Analysis parameters for the spectrogram engine.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Analysis window length in milliseconds.
    #[serde(default = "default_window_ms")]
    pub window_ms: f32,
    /// Stride between successive windows in milliseconds.
    #[serde(default = "default_stride_ms")]
    pub stride_ms: f32,
    /// Upper frequency of interest in Hz; `None` means the Nyquist frequency.
    #[serde(default)]
    pub max_freq: Option<f32>,
    /// Minimum normalized strength a bin must reach to be kept in a slice.
    /// Held as f64 so the threshold compares as the exact decimal 0.005, not
    /// its f32 neighbor 0.004999999888.
    #[serde(default = "default_min_strength")]
    pub min_strength: f64,
    /// Fixed-point scale applied to normalized strengths before truncation.
    #[serde(default = "default_quantization_scale")]
    pub quantization_scale: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            stride_ms: default_stride_ms(),
            max_freq: None,
            min_strength: default_min_strength(),
            quantization_scale: default_quantization_scale(),
        }
    }
}

fn default_window_ms() -> f32 { 20.0 }
fn default_stride_ms() -> f32 { 10.0 }
fn default_min_strength() -> f64 { 0.005 }
fn default_quantization_scale() -> u32 { 10000 }

impl EngineConfig {
    /// Reject unusable parameters before any computation starts.
    pub fn validate(&self) -> Result<()> {
        if self.window_ms <= 0.0 {
            return Err(SpectrogramError::InvalidConfiguration(format!(
                "window_ms must be positive, got {}",
                self.window_ms
            )));
        }
        if self.stride_ms <= 0.0 {
            return Err(SpectrogramError::InvalidConfiguration(format!(
                "stride_ms must be positive, got {}",
                self.stride_ms
            )));
        }
        if let Some(max_freq) = self.max_freq {
            if max_freq < 0.0 {
                return Err(SpectrogramError::InvalidConfiguration(format!(
                    "max_freq must be non-negative, got {}",
                    max_freq
                )));
            }
        }
        Ok(())
    }

    /// Band limit in Hz, defaulting to the Nyquist frequency (integer half
    /// of the sample rate, so an odd rate floors to the lower whole Hz).
    pub fn max_freq_or_nyquist(&self, sample_rate: u32) -> f64 {
        self.max_freq
            .map(|f| f as f64)
            .unwrap_or((sample_rate / 2) as f64)
    }
}

pub fn load_config(path: &PathBuf) -> Option<EngineConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}
