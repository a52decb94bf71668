//! Generic [Float] type which acts as a stand-in for `f32` or `f64`.
use rustfft::num_traits::Float as NumFloat;
use rustfft::FftNum;
use std::fmt::{Debug, Display};
use std::iter::Sum;

/// Signals are processed as arrays of [Float]s. A [Float] is normally `f32` or `f64`.
pub trait Float: Display + Debug + NumFloat + FftNum + Sum {
    /// Convert an `f64` constant. Out of range values become NaN.
    fn lit(value: f64) -> Self {
        Self::from_f64(value).unwrap_or_else(Self::nan)
    }

    fn from_len(len: usize) -> Self {
        Self::from_usize(len).unwrap_or_else(Self::infinity)
    }

    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }

    /// Absolute value. `Signed` and `Float` both provide `abs`, so this picks one.
    fn magnitude(self) -> Self {
        NumFloat::abs(self)
    }
}

impl Float for f64 {}
impl Float for f32 {}
