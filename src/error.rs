//! Error types.
//!
//! [PitchError]s describe why a single frame produced no note. They are
//! always recovered inside the frame. [ConfigError]s only surface while
//! loading configuration or building a [PitchTracker][crate::tracker::PitchTracker].
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PitchError {
    /// The buffer is all zeros, so it cannot be rescaled.
    #[error("signal is degenerate (maximum magnitude is zero)")]
    DegenerateSignal,
    /// The autocorrelation has no positive strict local maximum.
    #[error("no autocorrelation peak found")]
    NoPeakFound,
    #[error("frequency {0} Hz has no note number")]
    InvalidFrequency(f64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("failed to read configuration")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),
}
