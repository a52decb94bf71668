//! # Pitch Trace
//! *pitch_trace* estimates the fundamental frequency of a live audio signal,
//! one frame at a time, with a plain autocorrelation, and keeps a
//! screen-wide history of the detected notes for a scrolling piano roll.
//!
//! # Pipeline
//! Each frame goes through the same steps:
//!
//!   * [normalize][utils::signal::normalize] the samples to a unit peak
//!   * optionally [center clip][utils::signal::center_clip] them
//!   * [autocorrelate][detector::internals::autocorrelation]
//!   * normalize the autocorrelation
//!   * [pick the highest peak][detector::internals::pitch_from_peaks] and turn its lag into Hz
//!   * [convert][note::note_from_frequency] Hz to a note number
//!   * [record][trace::TraceBuffer::record] the note, or silence for quiet frames
//!
//! [PitchTracker][tracker::PitchTracker] runs all of it;
//! [AutocorrelationDetector][detector::autocorrelation::AutocorrelationDetector]
//! stops at the pitch.
//!
//! # Examples
//! ```
//! use pitch_trace::config::Config;
//! use pitch_trace::tracker::PitchTracker;
//!
//! const SAMPLE_RATE: f64 = 44100.0;
//!
//! let config = Config::default();
//! let size = config.detector.size;
//!
//! // Signal coming from some source (microphone, generated, etc...)
//! let signal: Vec<f64> = (0..size)
//!     .map(|i| (2.0 * std::f64::consts::PI * 220.0 * i as f64 / SAMPLE_RATE).sin())
//!     .collect();
//!
//! let mut tracker = PitchTracker::new(&config).unwrap();
//! let report = tracker.process_frame(&signal, SAMPLE_RATE, 0.5, &0.0f64);
//!
//! let note = report.note.unwrap();
//! assert!((note - 57.0).abs() < 0.5);
//! assert_eq!(tracker.trace().latest(), note);
//! ```

pub use detector::internals::Pitch;
pub use error::{ConfigError, PitchError};

pub mod config;
pub mod detector;
pub mod error;
pub mod float;
pub mod note;
pub mod roll;
pub mod trace;
pub mod tracker;
pub mod utils;
