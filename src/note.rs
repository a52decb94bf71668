//! Frequency to note-number conversion on the MIDI scale (69 = A4 = 440 Hz).
use crate::error::PitchError;
use crate::float::Float;

pub const A4_NOTE: f64 = 69.0;
pub const A4_FREQUENCY: f64 = 440.0;
pub const SEMITONES_PER_OCTAVE: usize = 12;

const PITCH_NAMES: [&str; SEMITONES_PER_OCTAVE] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Continuous note number for `frequency`. Fractional values are kept, so
/// 445 Hz maps to roughly 69.2.
pub fn note_from_frequency<T: Float>(frequency: T) -> Result<T, PitchError> {
    if !(frequency > T::zero()) || !frequency.is_finite() {
        return Err(PitchError::InvalidFrequency(frequency.as_f64()));
    }
    let twelve = T::from_len(SEMITONES_PER_OCTAVE);
    Ok(T::lit(A4_NOTE) + twelve * (frequency / T::lit(A4_FREQUENCY)).log2())
}

/// Inverse of [note_from_frequency].
pub fn frequency_from_note<T: Float>(note: T) -> T {
    let twelve = T::from_len(SEMITONES_PER_OCTAVE);
    T::lit(A4_FREQUENCY) * ((note - T::lit(A4_NOTE)) / twelve).exp2()
}

/// Whether note `note` falls on a white piano key.
pub fn is_natural(note: usize) -> bool {
    matches!(note % SEMITONES_PER_OCTAVE, 0 | 2 | 4 | 5 | 7 | 9 | 11)
}

/// Label for an integer note number. Note 0 is C-1, note 60 is C4.
pub fn note_name(note: usize) -> String {
    let name = PITCH_NAMES[note % SEMITONES_PER_OCTAVE];
    let octave = (note / SEMITONES_PER_OCTAVE) as i32 - 1;
    format!("{}{}", name, octave)
}
