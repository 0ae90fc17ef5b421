use thiserror::Error;

/// Top-level error type for the spectrogram engine.
///
/// An all-zero power matrix (e.g. pure silence) is deliberately not an error:
/// it produces a valid report whose slices are all empty.
#[derive(Debug, Error)]
pub enum SpectrogramError {
    /// Input shorter than one analysis window; no frame can be produced.
    #[error("insufficient samples: got {got}, need at least {needed} for one window")]
    InsufficientSamples { got: usize, needed: usize },

    /// Parameters rejected before any computation starts.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Convenience alias so callers can write `Result<T>` instead of `Result<T, SpectrogramError>`.
pub type Result<T> = std::result::Result<T, SpectrogramError>;
