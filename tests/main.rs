use std::io::Cursor;

use pitch_trace::config::Config;
use pitch_trace::detector::autocorrelation::{AutocorrelationDetector, Conditioning};
use pitch_trace::detector::internals::AutocorrelationMethod;
use pitch_trace::detector::PitchDetector;
use pitch_trace::float::Float;
use pitch_trace::roll::PianoRoll;
use pitch_trace::tracker::{ControlProvider, PitchTracker, PointerControl};
use pitch_trace::utils::buffer::new_real_buffer;

// For writing and reading back `.wav` data
use hound;

const TOLERANCE: f64 = 0.05;

#[derive(Debug)]
struct Signal<T> {
    sample_rate: usize,
    data: Vec<T>,
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn direct_sin_signal() {
    pure_frequency::<f64>(AutocorrelationMethod::Direct, "sin", 440.0);
}

#[test]
fn fft_sin_signal() {
    pure_frequency::<f64>(AutocorrelationMethod::Fft, "sin", 440.0);
}

#[test]
fn direct_sin_signal_f32() {
    pure_frequency::<f32>(AutocorrelationMethod::Direct, "sin", 440.0);
}

#[test]
fn fft_sin_signal_f32() {
    pure_frequency::<f32>(AutocorrelationMethod::Fft, "sin", 440.0);
}

#[test]
fn direct_triangle_signal_f32() {
    pure_frequency::<f32>(AutocorrelationMethod::Direct, "triangle", 440.0);
}

#[test]
fn fft_triangle_signal_f32() {
    pure_frequency::<f32>(AutocorrelationMethod::Fft, "triangle", 330.0);
}

#[test]
fn fft_harmonics_f32() {
    pure_frequency::<f32>(AutocorrelationMethod::Fft, "harmonics", 220.0);
}

#[test]
fn direct_low_sin_signal() {
    pure_frequency::<f64>(AutocorrelationMethod::Direct, "sin", 110.0);
}

#[test]
fn fft_high_sin_signal() {
    pure_frequency::<f64>(AutocorrelationMethod::Fft, "sin", 1000.0);
}

#[test]
fn direct_triangle_signal() {
    pure_frequency::<f64>(AutocorrelationMethod::Direct, "triangle", 440.0);
}

#[test]
fn fft_triangle_signal() {
    pure_frequency::<f64>(AutocorrelationMethod::Fft, "triangle", 330.0);
}

#[test]
fn direct_two_harmonics() {
    pure_frequency::<f64>(AutocorrelationMethod::Direct, "harmonics", 220.0);
}

#[test]
fn methods_agree_on_every_window() {
    init_logger();
    const SAMPLE_RATE: usize = 44100;
    const WINDOW: usize = 1024;

    let signal: Vec<f64> = signal_factory("harmonics", 261.63, 4 * WINDOW, SAMPLE_RATE);
    let mut direct = AutocorrelationDetector::new(
        WINDOW,
        Conditioning::default(),
        AutocorrelationMethod::Direct,
    );
    let mut fft =
        AutocorrelationDetector::new(WINDOW, Conditioning::default(), AutocorrelationMethod::Fft);

    for chunk in signal.chunks_exact(WINDOW) {
        let a = direct.get_pitch(chunk, SAMPLE_RATE as f64, 0.0).unwrap();
        let b = fft.get_pitch(chunk, SAMPLE_RATE as f64, 0.0).unwrap();
        assert_eq!(a.lag, b.lag);
        assert!((a.clarity - b.clarity).abs() < 1e-9);
    }
}

#[test]
fn center_clipping_keeps_the_pitch() {
    init_logger();
    const SAMPLE_RATE: usize = 44100;
    const WINDOW: usize = 1024;

    let signal: Vec<f64> = signal_factory("sin", 440.0, WINDOW, SAMPLE_RATE);
    let conditioning = Conditioning {
        center_clip: true,
        ..Conditioning::default()
    };
    let mut detector =
        AutocorrelationDetector::new(WINDOW, conditioning, AutocorrelationMethod::Direct);
    let control = PointerControl {
        position: 216.0f64,
        extent: 720.0,
    };
    let pitch = detector
        .get_pitch(&signal, SAMPLE_RATE as f64, control.clip_threshold())
        .unwrap();
    assert!((pitch.frequency - 440.0).abs() < TOLERANCE * 440.0, "{}", pitch.frequency);
}

#[test]
fn wav_round_trip_is_tracked() {
    init_logger();
    let samples: Vec<f64> = signal_factory("sin", 293.66, 8 * 1024, 48000);
    let wav = samples_to_wav(&samples, 48000);
    let signal: Signal<f64> = wav_to_signal(wav, 0, 8 * 1024);
    assert_eq!(signal.sample_rate, 48000);

    let mut config = Config::default();
    config.display.width = 48;
    let mut tracker = PitchTracker::<f64>::new(&config).unwrap();
    let sample_rate = signal.sample_rate as f64;

    for chunk in signal.data.chunks_exact(1024) {
        let report = tracker.process_frame(chunk, sample_rate, 0.4, &0.0f64);
        let pitch = report.pitch.expect("no pitch for a D4 frame");
        assert!((pitch.frequency - 293.66).abs() < TOLERANCE * 293.66);
    }

    let trace = tracker.trace();
    assert_eq!(trace.cursor(), 0);
    assert!(trace.cells().iter().all(|&n| (n - 62.0).abs() < 0.5), "{:?}", trace.cells());
}

#[test]
fn trace_follows_a_melody_with_rests() {
    init_logger();
    const SAMPLE_RATE: usize = 44100;
    const WINDOW: usize = 1024;

    let mut config = Config::default();
    config.display.width = 46;
    let mut tracker = PitchTracker::<f64>::new(&config).unwrap();

    // (frequency, level) per frame; quiet frames must come out silent.
    let frames = [
        (220.0, 0.3),
        (0.0, 0.0),
        (440.0, 0.3),
        (440.0, 0.01),
        (880.0, 0.3),
        (220.0, 0.3),
        (330.0, 0.3),
    ];
    for &(freq, level) in frames.iter() {
        let chunk: Vec<f64> = if freq > 0.0 {
            signal_factory("sin", freq, WINDOW, SAMPLE_RATE)
        } else {
            new_real_buffer(WINDOW)
        };
        tracker.process_frame(&chunk, SAMPLE_RATE as f64, level, &0.0f64);
    }

    // Six columns, seven frames: the last frame overwrote column 0.
    let trace = tracker.trace();
    assert_eq!(trace.len(), 6);
    assert_eq!(trace.cursor(), 1);
    let expected = [Some(64.0), None, Some(69.0), None, Some(81.0), Some(57.0)];
    for (cell, want) in trace.cells().iter().zip(expected.iter()) {
        match want {
            Some(note) => assert!((cell - note).abs() < 0.5, "{} vs {}", cell, note),
            None => assert_eq!(*cell, 0.0),
        }
    }

    let roll = PianoRoll::from_config(&config.display);
    let segments = roll.segments(trace.cells());
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[2].len(), 2);
}

fn get_chunk<T: Float>(signal: &[T], start: usize, window: usize, output: &mut [T]) {
    let start = match signal.len() > start {
        true => start,
        false => signal.len(),
    };

    let stop = match signal.len() >= start + window {
        true => start + window,
        false => signal.len(),
    };

    output[..stop - start].copy_from_slice(&signal[start..stop]);
    output[stop - start..].iter_mut().for_each(|o| *o = T::zero());
}

fn samples_to_wav(samples: &[f64], sample_rate: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer.write_sample((s * i16::MAX as f64) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

fn wav_to_signal<T: Float>(wav: Vec<u8>, seek_start: usize, num_samples: usize) -> Signal<T> {
    let mut reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
    let sample_rate = reader.spec().sample_rate as usize;
    let data: Vec<T> = reader
        .samples::<i16>()
        .skip(seek_start)
        .map(|s| T::lit(s.unwrap() as f64 / i16::MAX as f64))
        .take(num_samples)
        .collect();

    Signal { sample_rate, data }
}

fn sin_wave<T: Float>(freq: f64, size: usize, sample_rate: usize) -> Vec<T> {
    let mut signal = new_real_buffer(size);
    let two_pi = 2.0 * std::f64::consts::PI;
    let dx = two_pi * freq / sample_rate as f64;
    for i in 0..size {
        let x = i as f64 * dx;
        signal[i] = T::lit(0.8 * x.sin());
    }
    signal
}

fn triangle_wave<T: Float>(freq: f64, size: usize, sample_rate: usize) -> Vec<T> {
    let mut signal = new_real_buffer(size);
    let period = sample_rate as f64 / freq;

    for i in 0..size {
        let x = i as f64 / period;
        let frac = x - x.floor();
        let y = match frac {
            f if f < 0.25 => 4. * f,
            f if f < 0.75 => 1. - 4. * (f - 0.25),
            f => -1. + 4. * (f - 0.75),
        };
        signal[i] = T::lit(y);
    }
    signal
}

fn harmonics_wave<T: Float>(freq: f64, size: usize, sample_rate: usize) -> Vec<T> {
    let two_pi = 2.0 * std::f64::consts::PI;
    (0..size)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            T::lit(0.6 * (two_pi * freq * t).sin() + 0.3 * (two_pi * 2.0 * freq * t).sin())
        })
        .collect()
}

fn signal_factory<T: Float>(name: &str, freq: f64, size: usize, sample_rate: usize) -> Vec<T> {
    match name {
        "sin" => sin_wave(freq, size, sample_rate),
        "triangle" => triangle_wave(freq, size, sample_rate),
        "harmonics" => harmonics_wave(freq, size, sample_rate),
        _ => panic!("Unknown wave function {}", name),
    }
}

/// Slide a window across a half-second tone and check every window lands
/// within 5% of `freq_in`.
fn pure_frequency<T: Float>(method: AutocorrelationMethod, wave_name: &str, freq_in: f64) {
    init_logger();
    const SAMPLE_RATE: usize = 44100;
    const DURATION: f64 = 0.5;
    const SAMPLE_SIZE: usize = (SAMPLE_RATE as f64 * DURATION) as usize;
    const WINDOW: usize = 1024;
    const DELTA_T: usize = WINDOW / 2;
    const N_WINDOWS: usize = (SAMPLE_SIZE - WINDOW) / DELTA_T;

    let signal = signal_factory::<T>(wave_name, freq_in, SAMPLE_SIZE, SAMPLE_RATE);

    let mut chunk = new_real_buffer(WINDOW);

    let mut detector = AutocorrelationDetector::<T>::new(WINDOW, Conditioning::default(), method);

    for i in 0..N_WINDOWS {
        let t: usize = i * DELTA_T;
        get_chunk(&signal, t, WINDOW, &mut chunk);

        let pitch = detector.get_pitch(&chunk, T::from_len(SAMPLE_RATE), T::zero());

        match pitch {
            Ok(pitch) => {
                let frequency = pitch.frequency.as_f64();
                println!(
                    "Chosen lag: {}; clarity: {}; freq: {}",
                    pitch.lag, pitch.clarity, frequency
                );
                assert!(
                    (frequency - freq_in).abs() < TOLERANCE * freq_in,
                    "expected {} Hz, got {} Hz",
                    freq_in,
                    frequency
                );
            }
            Err(e) => panic!("window {}: {}", i, e),
        }
    }
}
