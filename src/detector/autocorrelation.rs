use crate::config::DetectorConfig;
use crate::detector::internals::pitch_from_peaks;
use crate::detector::internals::AutocorrelationMethod;
use crate::detector::internals::DetectorInternals;
use crate::detector::internals::Pitch;
use crate::detector::PitchDetector;
use crate::error::PitchError;
use crate::float::Float;
use crate::utils::signal::{center_clip, normalize};

/// Which conditioning passes run around the autocorrelation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conditioning {
    /// Rescale the frame to a unit peak before correlating.
    pub pre_normalize: bool,
    pub center_clip: bool,
    /// Rescale the autocorrelation so lag 0 is 1.
    pub post_normalize: bool,
}

impl Default for Conditioning {
    fn default() -> Self {
        Conditioning {
            pre_normalize: true,
            center_clip: false,
            post_normalize: true,
        }
    }
}

pub struct AutocorrelationDetector<T>
where
    T: Float,
{
    internals: DetectorInternals<T>,
    conditioning: Conditioning,
}

impl<T> AutocorrelationDetector<T>
where
    T: Float,
{
    pub fn new(size: usize, conditioning: Conditioning, method: AutocorrelationMethod) -> Self {
        let padding = match method {
            AutocorrelationMethod::Direct => 0,
            AutocorrelationMethod::Fft => size,
        };
        log::debug!(
            "autocorrelation detector: size={}, method={:?}, {:?}",
            size,
            method,
            conditioning
        );
        let internals = DetectorInternals::new(size, padding, method);
        AutocorrelationDetector {
            internals,
            conditioning,
        }
    }

    pub fn from_config(config: &DetectorConfig) -> Self {
        Self::new(config.size, config.conditioning(), config.method)
    }

    pub fn size(&self) -> usize {
        self.internals.size
    }

    pub fn conditioning(&self) -> Conditioning {
        self.conditioning
    }
}

impl<T> PitchDetector<T> for AutocorrelationDetector<T>
where
    T: Float,
{
    fn get_pitch(
        &mut self,
        signal: &[T],
        sample_rate: T,
        clip_threshold: T,
    ) -> Result<Pitch<T>, PitchError> {
        assert_eq!(signal.len(), self.internals.size);
        let size = self.internals.size;

        let mut frame_ref = self.internals.buffers.get_real_buffer();
        let mut autocorr_ref = self.internals.buffers.get_real_buffer();
        let frame = &mut frame_ref[..size];
        let autocorr = &mut autocorr_ref[..size];

        frame.copy_from_slice(signal);

        // A silent frame stays all zeros and simply yields no peak below.
        if self.conditioning.pre_normalize {
            if let Err(e) = normalize(frame) {
                log::trace!("pre-normalize skipped: {}", e);
            }
        }
        if self.conditioning.center_clip {
            center_clip(frame, clip_threshold);
        }

        self.internals.autocorrelation(frame, autocorr);

        if self.conditioning.post_normalize {
            if let Err(e) = normalize(autocorr) {
                log::trace!("post-normalize skipped: {}", e);
            }
        }

        let pitch = pitch_from_peaks(autocorr, sample_rate)?;
        log::trace!(
            "peak at lag {} ({} Hz, clarity {})",
            pitch.lag,
            pitch.frequency,
            pitch.clarity
        );
        Ok(pitch)
    }
}
