use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sonograph", about = "Sparse spectrogram JSON generator for audio files")]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG)
    pub input: Option<PathBuf>,

    /// Output JSON file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Analysis window length in milliseconds
    #[arg(long, default_value_t = 20.0)]
    pub window_ms: f32,

    /// Stride between windows in milliseconds
    #[arg(long, default_value_t = 10.0)]
    pub stride_ms: f32,

    /// Upper frequency of interest in Hz (default: Nyquist)
    #[arg(long)]
    pub max_freq: Option<f32>,

    /// Minimum normalized strength a bin must reach to be kept
    #[arg(long, default_value_t = 0.005)]
    pub min_strength: f64,

    /// Start decoding at this offset in seconds
    #[arg(long, default_value_t = 0.0)]
    pub offset: f64,

    /// Decode at most this many seconds of audio
    #[arg(long)]
    pub duration: Option<f64>,

    /// Fixed-point scale applied to normalized strengths
    #[arg(long, default_value_t = 10000)]
    pub quantization_scale: u32,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Print a quick analysis summary instead of the full report
    #[arg(long)]
    pub summary: bool,

    /// Config file path (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
