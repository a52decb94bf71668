use crate::detector::internals::Pitch;
use crate::error::PitchError;
use crate::float::Float;

pub mod autocorrelation;
pub mod internals;

pub trait PitchDetector<T>
where
    T: Float,
{
    /// Estimate the pitch of one frame. `clip_threshold` feeds the center
    /// clipper and is ignored by detectors that do not clip.
    fn get_pitch(
        &mut self,
        signal: &[T],
        sample_rate: T,
        clip_threshold: T,
    ) -> Result<Pitch<T>, PitchError>;
}
