//! Per-frame pitch tracking: detect, map to a note, record into the trace.
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::detector::autocorrelation::AutocorrelationDetector;
use crate::detector::internals::Pitch;
use crate::detector::PitchDetector;
use crate::error::ConfigError;
use crate::float::Float;
use crate::trace::TraceBuffer;

/// Source of the center clip threshold, read once per frame while clipping
/// is enabled.
pub trait ControlProvider<T> {
    fn clip_threshold(&self) -> T;
}

/// A fixed threshold.
impl<T: Float> ControlProvider<T> for T {
    fn clip_threshold(&self) -> T {
        *self
    }
}

/// Maps a pointer coordinate in `0..=extent` linearly onto `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerControl<T> {
    pub position: T,
    pub extent: T,
}

impl<T: Float> ControlProvider<T> for PointerControl<T> {
    fn clip_threshold(&self) -> T {
        if !(self.extent > T::zero()) {
            return T::zero();
        }
        let t = self.position / self.extent;
        if t < T::zero() {
            T::zero()
        } else if t > T::one() {
            T::one()
        } else {
            t
        }
    }
}

/// What one frame produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport<T>
where
    T: Float,
{
    pub pitch: Option<Pitch<T>>,
    pub note: Option<T>,
    /// Value written to the trace this frame.
    pub cell: T,
    /// Trace column that was written.
    pub column: usize,
}

pub struct PitchTracker<T>
where
    T: Float,
{
    detector: AutocorrelationDetector<T>,
    trace: TraceBuffer<T>,
    frame_budget: Duration,
}

impl<T> PitchTracker<T>
where
    T: Float,
{
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let detector = AutocorrelationDetector::from_config(&config.detector);
        let trace = TraceBuffer::new(
            config.display.trace_len(),
            T::lit(config.tracker.level_threshold),
        );
        let frame_budget = Duration::from_secs_f64(config.tracker.frame_budget_ms / 1000.0);
        Ok(PitchTracker {
            detector,
            trace,
            frame_budget,
        })
    }

    /// Run the whole pipeline on one frame. Never fails: a frame without a
    /// usable pitch records a silent cell.
    pub fn process_frame(
        &mut self,
        signal: &[T],
        sample_rate: T,
        level: T,
        control: &dyn ControlProvider<T>,
    ) -> FrameReport<T> {
        let started = Instant::now();

        let clip_threshold = if self.detector.conditioning().center_clip {
            control.clip_threshold()
        } else {
            T::zero()
        };

        let pitch = self.detector.get_pitch(signal, sample_rate, clip_threshold);
        let note = pitch.clone().and_then(|p| p.note());
        if let Err(e) = &note {
            log::debug!("no note this frame: {}", e);
        }
        let note = note.ok();

        let column = self.trace.record(level, note);
        let cell = self.trace.cells()[column];

        let elapsed = started.elapsed();
        if elapsed > self.frame_budget {
            log::warn!(
                "frame took {:.2} ms, over the {:.2} ms budget",
                elapsed.as_secs_f64() * 1000.0,
                self.frame_budget.as_secs_f64() * 1000.0
            );
        }

        FrameReport {
            pitch: pitch.ok(),
            note,
            cell,
            column,
        }
    }

    pub fn trace(&self) -> &TraceBuffer<T> {
        &self.trace
    }

    pub fn trace_mut(&mut self) -> &mut TraceBuffer<T> {
        &mut self.trace
    }

    pub fn detector(&self) -> &AutocorrelationDetector<T> {
        &self.detector
    }
}
