//! Conditioning passes applied to a frame before and after autocorrelation.
use crate::error::PitchError;
use crate::float::Float;

/// Largest absolute value in `arr`, or zero for an empty slice.
pub fn max_magnitude<T: Float>(arr: &[T]) -> T {
    arr.iter()
        .map(|&x| x.magnitude())
        .fold(T::zero(), |acc, x| if x > acc { x } else { acc })
}

/// Rescale `arr` so that its largest absolute value becomes 1 and return the
/// original maximum. An all-zero buffer is left untouched and reported as
/// [PitchError::DegenerateSignal].
pub fn normalize<T: Float>(arr: &mut [T]) -> Result<T, PitchError> {
    let biggest = max_magnitude(arr);
    if !(biggest > T::zero()) || !biggest.is_finite() {
        return Err(PitchError::DegenerateSignal);
    }
    arr.iter_mut().for_each(|x| *x = *x / biggest);
    Ok(biggest)
}

/// Zero every sample whose magnitude is not above `threshold`.
/// Does nothing unless `threshold` is strictly positive.
pub fn center_clip<T: Float>(arr: &mut [T], threshold: T) {
    if !(threshold > T::zero()) {
        return;
    }
    arr.iter_mut()
        .filter(|x| x.magnitude() <= threshold)
        .for_each(|x| *x = T::zero());
}
