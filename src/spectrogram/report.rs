use serde::Serialize;

/// One time slice of the sparse spectrogram.
///
/// `freqs` and `strengths` are parallel: `strengths[i]` is the quantized
/// strength of bin `freqs[i]`. Both are empty when no bin clears the
/// threshold, and `max_strength` is 0 in that case.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SparseSlice {
    /// Time offset in seconds.
    pub time: f64,
    pub freqs: Vec<usize>,
    pub strengths: Vec<u32>,
    pub max_strength: u32,
}

/// Full engine output, ready for JSON transport.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectrogramReport {
    /// Largest raw (unnormalized) power value in the band-limited matrix.
    pub max_val: f32,
    /// Highest bin index appearing in any slice's `freqs`; 0 when none qualify.
    pub max_freq: usize,
    /// Seconds between successive slices.
    pub time_step: f64,
    /// Time of the last slice.
    pub max_time: f64,
    pub windows: Vec<SparseSlice>,
}

/// Quick metadata about an analyzed buffer, from the same dense pipeline as
/// the full report but without band limiting or sparse encoding.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioSummary {
    pub duration: f64,
    pub sample_rate: u32,
    pub samples: usize,
    pub frames: usize,
    pub bins: usize,
    pub max_val: f32,
}
