use object_pool::{Pool, Reusable};
use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;

use crate::float::Float;

pub fn new_real_buffer<T: Float>(size: usize) -> Vec<T> {
    vec![T::zero(); size]
}

pub fn new_complex_buffer<T: Float>(size: usize) -> Vec<Complex<T>> {
    vec![Complex::zero(); size]
}

/// Copy `input` into the real part of `output` and zero everything else,
/// including the tail of `output` past `input.len()`.
pub fn copy_real_to_complex<T: Float>(input: &[T], output: &mut [Complex<T>]) {
    assert!(input.len() <= output.len());
    input.iter().zip(output.iter_mut()).for_each(|(i, o)| {
        o.re = *i;
        o.im = T::zero();
    });
    output[input.len()..]
        .iter_mut()
        .for_each(|o| *o = Complex::zero())
}

/// Copy the real part of the first `output.len()` values of `input`, scaled by `scale`.
pub fn copy_complex_to_real<T: Float>(input: &[Complex<T>], output: &mut [T], scale: T) {
    assert!(output.len() <= input.len());
    output
        .iter_mut()
        .zip(input.iter())
        .for_each(|(o, c)| *o = c.re * scale);
}

/// Computes |x|^2 for each complex value x in `arr`. This function
/// modifies `arr` in place and leaves the complex component zero.
pub fn modulus_squared<T: Float>(arr: &mut [Complex<T>]) {
    for s in arr {
        s.re = s.re * s.re + s.im * s.im;
        s.im = T::zero();
    }
}

/// A pool of real/complex buffer objects. Buffers are created on demand and
/// handed back to the pool when the [Reusable] guard is dropped, so a detector
/// running once per frame stops allocating after its first frame.
///
/// ```rust
/// use pitch_trace::utils::buffer::BufferPool;
///
/// let buffers = BufferPool::<f64>::new(4);
/// {
///     let mut frame = buffers.get_real_buffer();
///     frame[0] = 1.5;
/// }
/// // The dropped buffer comes back on the next pull, contents intact.
/// let reused = buffers.get_real_buffer();
/// assert_eq!(&reused[..], &[1.5, 0., 0., 0.]);
/// ```
pub struct BufferPool<T> {
    real_buffers: Pool<Vec<T>>,
    complex_buffers: Pool<Vec<Complex<T>>>,
    pub buffer_size: usize,
}

impl<T: Float> BufferPool<T> {
    pub fn new(buffer_size: usize) -> Self {
        BufferPool {
            real_buffers: Pool::new(0, || new_real_buffer(buffer_size)),
            complex_buffers: Pool::new(0, || new_complex_buffer(buffer_size)),
            buffer_size,
        }
    }
    /// Get a buffer that can be used until it is `Drop`ed.
    pub fn get_real_buffer(&self) -> Reusable<Vec<T>> {
        self.real_buffers.pull(|| new_real_buffer(self.buffer_size))
    }
    /// Get a buffer that can be used until it is `Drop`ed.
    pub fn get_complex_buffer(&self) -> Reusable<Vec<Complex<T>>> {
        self.complex_buffers
            .pull(|| new_complex_buffer(self.buffer_size))
    }
}
