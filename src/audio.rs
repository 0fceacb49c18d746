//! Sound cues, synthesized once at startup and played through rodio.

use fundsp::prelude64::*;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use thiserror::Error;

pub const SAMPLE_RATE: u32 = 44_100;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device")]
    Stream(#[from] rodio::StreamError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Flap,
    Point,
    Crash,
}

/// A pitch sweep shaped by a linear fade-out.
struct Voice {
    saw: bool,
    from_hz: f64,
    to_hz: f64,
    sweep_secs: f64,
    /// Pitch jumps straight to `to_hz` after `sweep_secs` instead of gliding.
    step: bool,
    gain: f64,
    secs: f64,
}

impl Cue {
    fn voice(self) -> Voice {
        match self {
            Cue::Flap => Voice {
                saw: false,
                from_hz: 300.0,
                to_hz: 620.0,
                sweep_secs: 0.08,
                step: false,
                gain: 0.2,
                secs: 0.1,
            },
            Cue::Point => Voice {
                saw: false,
                from_hz: 880.0,
                to_hz: 1320.0,
                sweep_secs: 0.06,
                step: true,
                gain: 0.15,
                secs: 0.18,
            },
            // 400Hz down to 80Hz over 0.4s, fading over 0.5s.
            Cue::Crash => Voice {
                saw: true,
                from_hz: 400.0,
                to_hz: 80.0,
                sweep_secs: 0.4,
                step: false,
                gain: 0.15,
                secs: 0.5,
            },
        }
    }
}

/// Mono samples for `cue` at [`SAMPLE_RATE`].
pub fn synthesize(cue: Cue) -> Vec<f32> {
    let Voice {
        saw: use_saw,
        from_hz,
        to_hz,
        sweep_secs,
        step,
        gain: peak,
        secs,
    } = cue.voice();

    let freq = lfo(move |t: f64| {
        if step {
            if t < sweep_secs { from_hz } else { to_hz }
        } else {
            lerp(from_hz, to_hz, (t / sweep_secs).min(1.0))
        }
    });
    let gain = lfo(move |t: f64| lerp(peak, 0.0, (t / secs).min(1.0)));

    let n = (SAMPLE_RATE as f64 * secs) as usize;
    let raw: Vec<f32> = if use_saw {
        let mut node = freq >> (saw() * gain);
        (0..n).map(|_| node.get_mono()).collect()
    } else {
        let mut node = freq >> (sine() * gain);
        (0..n).map(|_| node.get_mono()).collect()
    };
    raw.into_iter()
        .map(|s| if s.is_finite() { s.clamp(-1.0, 1.0) } else { 0.0 })
        .collect()
}

/// Open output device plus the pre-rendered cues.
pub struct Audio {
    // Dropping the stream silences everything.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    volume: f32,
    flap: Vec<f32>,
    point: Vec<f32>,
    crash: Vec<f32>,
}

impl Audio {
    pub fn open(volume: f32) -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Audio {
            _stream: stream,
            handle,
            volume,
            flap: synthesize(Cue::Flap),
            point: synthesize(Cue::Point),
            crash: synthesize(Cue::Crash),
        })
    }

    /// Fire and forget. Playback problems are logged, never fatal.
    pub fn play(&self, cue: Cue) {
        let samples = match cue {
            Cue::Flap => &self.flap,
            Cue::Point => &self.point,
            Cue::Crash => &self.crash,
        };
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.set_volume(self.volume);
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples.clone()));
                sink.detach(); // Play in background
            }
            Err(err) => log::warn!("cannot play {cue:?}: {err}"),
        }
    }
}
