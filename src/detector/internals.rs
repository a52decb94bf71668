use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;
use rustfft::{Fft, FftPlanner, Length};
use serde::Deserialize;

use crate::error::PitchError;
use crate::float::Float;
use crate::note::note_from_frequency;
use crate::utils::buffer::{copy_complex_to_real, copy_real_to_complex, modulus_squared, BufferPool};
use crate::utils::peak::{choose_peak, detect_peaks};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pitch<T>
where
    T: Float,
{
    pub frequency: T,
    /// Value of the chosen autocorrelation peak relative to lag 0.
    pub clarity: T,
    /// Lag, in samples, of the chosen peak.
    pub lag: usize,
}

impl<T: Float> Pitch<T> {
    /// Continuous note number of this pitch.
    pub fn note(&self) -> Result<T, PitchError> {
        note_from_frequency(self.frequency)
    }
}

/// How the autocorrelation sum is evaluated. Both produce the same sequence;
/// `Direct` is the O(N²) reference, `Fft` goes through the power spectrum.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutocorrelationMethod {
    #[default]
    Direct,
    Fft,
}

/// Forward and inverse plans for the zero-padded FFT autocorrelation.
pub struct FftPlan<T>
where
    T: Float,
{
    forward: Arc<dyn Fft<T>>,
    inverse: Arc<dyn Fft<T>>,
    scratch_len: usize,
}

impl<T: Float> FftPlan<T> {
    pub fn new(len: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(len);
        let inverse = planner.plan_fft_inverse(len);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());
        FftPlan {
            forward,
            inverse,
            scratch_len,
        }
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }
}

/// Data structure to hold the buffers and FFT plans needed for pitch computation.
/// Buffers are pooled and reused from frame to frame so a running detector
/// does not allocate in steady state.
pub struct DetectorInternals<T>
where
    T: Float,
{
    pub size: usize,
    pub padding: usize,
    pub buffers: BufferPool<T>,
    pub method: AutocorrelationMethod,
    plan: Option<FftPlan<T>>,
}

impl<T> DetectorInternals<T>
where
    T: Float,
{
    /// Buffers of `size + padding` values. The FFT method pads the frame with
    /// `padding` zeros, which must be at least `size` to avoid circular wrap.
    pub fn new(size: usize, padding: usize, method: AutocorrelationMethod) -> Self {
        let buffers = BufferPool::new(size + padding);
        let plan = match method {
            AutocorrelationMethod::Direct => None,
            AutocorrelationMethod::Fft => {
                assert!(padding >= size, "FFT autocorrelation needs padding >= size");
                Some(FftPlan::new(size + padding))
            }
        };

        DetectorInternals {
            size,
            padding,
            buffers,
            method,
            plan,
        }
    }

    /// Autocorrelation of `signal` into `result`, using this detector's method.
    pub fn autocorrelation(&self, signal: &[T], result: &mut [T]) {
        match &self.plan {
            Some(plan) => fft_autocorrelation(signal, plan, &self.buffers, result),
            None => autocorrelation(signal, result),
        }
    }
}

/// Compute the autocorrelation of `signal` into `result` directly:
///
/// > r(l) = (1/N) * sum_{i=0}^{N-l-1} x_i*x_{i+l}
///
/// The divisor is always the full window length `N`, not the overlap `N - l`,
/// so the sequence tapers linearly towards the last lag.
pub fn autocorrelation<T>(signal: &[T], result: &mut [T])
where
    T: Float,
{
    let n = signal.len();
    assert!(result.len() >= n);
    let n_t = T::from_len(n);

    result[..n].iter_mut().enumerate().for_each(|(lag, r)| {
        *r = signal[..n - lag]
            .iter()
            .zip(signal[lag..].iter())
            .map(|(&a, &b)| a * b)
            .sum::<T>()
            / n_t;
    });
}

/// Same sequence as [autocorrelation], computed through the power spectrum
/// of `signal` zero-padded to `plan.len()`.
pub fn fft_autocorrelation<T>(
    signal: &[T],
    plan: &FftPlan<T>,
    buffers: &BufferPool<T>,
    result: &mut [T],
) where
    T: Float,
{
    let n = signal.len();
    let len = plan.len();
    assert!(len >= 2 * n, "FFT length must be at least twice the signal length");
    assert!(buffers.buffer_size >= len);

    let (mut ref1, mut ref2) = (buffers.get_complex_buffer(), buffers.get_complex_buffer());
    if ref2.len() < plan.scratch_len {
        ref2.resize(plan.scratch_len, Complex::zero());
    }
    let signal_complex = &mut ref1[..len];
    let scratch = &mut ref2[..plan.scratch_len];

    copy_real_to_complex(signal, signal_complex);
    plan.forward.process_with_scratch(signal_complex, scratch);
    modulus_squared(signal_complex);
    plan.inverse.process_with_scratch(signal_complex, scratch);

    // rustfft leaves both transforms unnormalized, so the round trip carries
    // a factor of `len` on top of the 1/N averaging.
    let scale = T::one() / (T::from_len(len) * T::from_len(n));
    copy_complex_to_real(signal_complex, &mut result[..n], scale);

    // Round-off leaves values around `len * eps * r(0)` where the exact sum
    // is zero. Flush them so they cannot pose as peaks.
    let noise_floor = T::from_len(len) * T::epsilon() * result[0];
    result[..n]
        .iter_mut()
        .filter(|r| r.magnitude() <= noise_floor)
        .for_each(|r| *r = T::zero());
}

/// Pick the highest positive strict local maximum of `autocorr` and turn its
/// lag into a frequency.
pub fn pitch_from_peaks<T>(autocorr: &[T], sample_rate: T) -> Result<Pitch<T>, PitchError>
where
    T: Float,
{
    let (lag, value) =
        choose_peak(detect_peaks(autocorr), T::zero()).ok_or(PitchError::NoPeakFound)?;
    let zero_lag = autocorr[0];
    let clarity = if zero_lag > T::zero() {
        value / zero_lag
    } else {
        T::zero()
    };

    Ok(Pitch {
        frequency: sample_rate / T::from_len(lag),
        clarity,
        lag,
    })
}
