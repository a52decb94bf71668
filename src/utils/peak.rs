use crate::float::Float;

/// Strict local maxima of `arr` as `(index, value)` pairs. Only interior
/// indices `1..=len-2` are considered, so index 0 is never a peak.
pub fn detect_peaks<'a, T: Float>(arr: &'a [T]) -> impl Iterator<Item = (usize, T)> + 'a {
    arr.windows(3)
        .enumerate()
        .filter(|(_, win)| win[0] < win[1] && win[2] < win[1])
        .map(|(i, win)| (i + 1, win[1]))
}

/// Keep the highest peak whose value is strictly above `floor`. The earliest
/// peak wins a tie.
pub fn choose_peak<I: Iterator<Item = (usize, T)>, T: Float>(
    peaks: I,
    floor: T,
) -> Option<(usize, T)> {
    peaks
        .fold((None, floor), |(best, best_val), peak| {
            if peak.1 > best_val {
                (Some(peak), peak.1)
            } else {
                (best, best_val)
            }
        })
        .0
}
