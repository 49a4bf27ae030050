//! Feedback tone synthesis.
//!
//! [`OscillatorBank`] is the control handle owned by the UI tick; it only
//! writes small numeric parameters into shared atomics. [`OscillatorVoice`]
//! lives inside the real-time audio callback, owns every phase accumulator
//! and reads those parameters once per buffer. The voice never locks,
//! allocates or logs.

use crate::config::OscillatorConfig;
use crate::error::ConfigError;
use crate::param::AtomicF32;
use rand::prelude::*;
use std::f32::consts::TAU;
use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;

const IDLE: u8 = 0;
const PLAYING: u8 = 1;
const STOPPING: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transport {
    Idle,
    Playing,
    /// Fading out; becomes `Idle` once the fade reaches zero.
    Stopping,
}

impl Transport {
    fn from_raw(raw: u8) -> Self {
        match raw {
            PLAYING => Transport::Playing,
            STOPPING => Transport::Stopping,
            _ => Transport::Idle,
        }
    }
}

/// Anything that can voice the match score as a tone.
pub trait FeedbackTone {
    fn start(&self);
    fn set_target_match(&self, score: f32);
    fn stop(&self);
}

#[derive(Debug)]
struct SharedParams {
    target_frequency: AtomicF32,
    target_wobble: AtomicF32,
    transport: AtomicU8,
    start_generation: AtomicU32,
    // written by the voice only
    fade_level: AtomicF32,
}

#[derive(Clone, Debug)]
pub struct OscillatorBank {
    config: OscillatorConfig,
    shared: Arc<SharedParams>,
}

impl OscillatorBank {
    /// Build the control handle and the voice that goes into the audio
    /// callback.
    pub fn new(
        config: OscillatorConfig,
        sample_rate: u32,
    ) -> Result<(Self, OscillatorVoice), ConfigError> {
        config.validate()?;
        if sample_rate == 0 {
            return Err(ConfigError::NotPositive {
                name: "sample rate",
                value: 0.0,
            });
        }
        let shared = Arc::new(SharedParams {
            target_frequency: AtomicF32::new(config.min_frequency),
            target_wobble: AtomicF32::new(config.min_wobble_frequency),
            transport: AtomicU8::new(IDLE),
            start_generation: AtomicU32::new(0),
            fade_level: AtomicF32::new(0.0),
        });
        let sr = sample_rate as f32;
        let voice = OscillatorVoice {
            shared: Arc::clone(&shared),
            sample_rate: sr,
            fade: 0.0,
            fade_step: 1.0 / (config.fade_out_sec * sr).max(1.0),
            phases: VoicePhases::default(),
            seen_generation: 0,
            rng: StdRng::seed_from_u64(config.noise_seed),
            config: config.clone(),
        };
        Ok((Self { config, shared }, voice))
    }

    /// Start from phase zero at full volume. While already playing this
    /// only cancels a pending fade-out.
    pub fn start(&self) {
        let transport = &self.shared.transport;
        let mut prev = transport.load(Ordering::Acquire);
        // The voice may finish a fade (STOPPING -> IDLE) at any point, so the
        // generation bump must be decided by the state actually replaced.
        loop {
            if prev == PLAYING {
                break;
            }
            if prev == IDLE {
                // bumped before PLAYING is visible
                self.shared.start_generation.fetch_add(1, Ordering::AcqRel);
            }
            match transport.compare_exchange(prev, PLAYING, Ordering::AcqRel, Ordering::Acquire) {
                Ok(_) => break,
                Err(actual) => prev = actual,
            }
        }
        log::debug!("[audio] start (was {:?})", Transport::from_raw(prev));
    }

    /// Map a score in [0, 1] onto the carrier and wobble ranges. Never
    /// touches accumulated phase.
    pub fn set_target_match(&self, score: f32) {
        let s = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        };
        let c = &self.config;
        self.shared
            .target_frequency
            .store(lerp(c.min_frequency, c.max_frequency, s));
        self.shared
            .target_wobble
            .store(lerp(c.min_wobble_frequency, c.max_wobble_frequency, s));
    }

    /// Begin the linear fade-out. No-op unless currently playing.
    pub fn stop(&self) {
        let stopped = self
            .shared
            .transport
            .compare_exchange(PLAYING, STOPPING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if stopped {
            log::debug!("[audio] fade out over {:.2}s", self.config.fade_out_sec);
        }
    }

    pub fn transport(&self) -> Transport {
        Transport::from_raw(self.shared.transport.load(Ordering::Acquire))
    }

    pub fn is_playing(&self) -> bool {
        self.transport() != Transport::Idle
    }

    pub fn target_frequency(&self) -> f32 {
        self.shared.target_frequency.load()
    }

    pub fn target_wobble_frequency(&self) -> f32 {
        self.shared.target_wobble.load()
    }

    /// Fade multiplier as of the voice's last rendered buffer.
    pub fn fade_level(&self) -> f32 {
        self.shared.fade_level.load()
    }

    pub fn config(&self) -> &OscillatorConfig {
        &self.config
    }
}

impl FeedbackTone for OscillatorBank {
    fn start(&self) {
        OscillatorBank::start(self)
    }

    fn set_target_match(&self, score: f32) {
        OscillatorBank::set_target_match(self, score)
    }

    fn stop(&self) {
        OscillatorBank::stop(self)
    }
}

/// Running phases in radians, each kept within [0, 2π).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VoicePhases {
    pub carrier: f32,
    pub lower: f32,
    pub higher: f32,
    pub wobble: f32,
}

impl VoicePhases {
    pub fn all(&self) -> [f32; 4] {
        [self.carrier, self.lower, self.higher, self.wobble]
    }
}

struct Block {
    transport: Transport,
    frequency: f32,
    wobble_increment: f32,
}

pub struct OscillatorVoice {
    shared: Arc<SharedParams>,
    config: OscillatorConfig,
    sample_rate: f32,
    fade: f32,
    fade_step: f32,
    phases: VoicePhases,
    seen_generation: u32,
    rng: StdRng,
}

impl OscillatorVoice {
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn phases(&self) -> VoicePhases {
        self.phases
    }

    pub fn fade(&self) -> f32 {
        self.fade
    }

    /// Fill interleaved frames, writing the same mono sample to every
    /// channel. Silence while idle.
    pub fn fill<T: Copy>(&mut self, data: &mut [T], channels: usize, convert: impl Fn(f32) -> T) {
        let channels = channels.max(1);
        let mut block = self.begin_block();
        for frame in data.chunks_mut(channels) {
            let value = convert(self.next_sample(&mut block));
            for out in frame.iter_mut() {
                *out = value;
            }
        }
        let shown = if block.transport == Transport::Idle {
            0.0
        } else {
            self.fade
        };
        self.shared.fade_level.store(shown);
    }

    /// Mono convenience over [`OscillatorVoice::fill`].
    pub fn render(&mut self, out: &mut [f32]) {
        self.fill(out, 1, |s| s);
    }

    fn begin_block(&mut self) -> Block {
        // transport first: a visible PLAYING implies the matching generation
        let transport = Transport::from_raw(self.shared.transport.load(Ordering::Acquire));
        let generation = self.shared.start_generation.load(Ordering::Acquire);
        if generation != self.seen_generation {
            self.seen_generation = generation;
            self.phases = VoicePhases::default();
            self.fade = 1.0;
        }

        let c = &self.config;
        let frequency = sanitize(self.shared.target_frequency.load(), c.min_frequency);
        let wobble = sanitize(self.shared.target_wobble.load(), c.min_wobble_frequency);
        Block {
            transport,
            frequency,
            wobble_increment: wobble * TAU / self.sample_rate,
        }
    }

    fn next_sample(&mut self, block: &mut Block) -> f32 {
        match block.transport {
            Transport::Idle => return 0.0,
            Transport::Playing => self.fade = 1.0,
            Transport::Stopping => {
                self.fade = (self.fade - self.fade_step).max(0.0);
                if self.fade <= 0.0 {
                    block.transport = self.finish_fade();
                    return 0.0;
                }
            }
        }

        let c = &self.config;
        let wobble = self.phases.wobble.sin() * c.wobble_depth;
        let wobbled = block.frequency * (1.0 + wobble);
        let increment = wobbled * TAU / self.sample_rate;

        let noise = (self.rng.gen::<f32>() * 2.0 - 1.0) * c.noise_volume;
        let carrier = self.phases.carrier.sin() * c.sine_volume;
        let lower = self.phases.lower.sin() * c.lower_octave_volume;
        let higher = self.phases.higher.sin() * c.higher_octave_volume;
        let sample = (noise + carrier + lower + higher) * self.fade;

        let p = &mut self.phases;
        p.carrier = wrap_phase(p.carrier + increment);
        p.lower = wrap_phase(p.lower + increment * c.lower_octave_multiplier);
        p.higher = wrap_phase(p.higher + increment * c.higher_octave_multiplier);
        p.wobble = wrap_phase(p.wobble + block.wobble_increment);

        sample
    }

    fn finish_fade(&mut self) -> Transport {
        match self.shared.transport.compare_exchange(
            STOPPING,
            IDLE,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => Transport::Idle,
            // restarted mid-fade
            Err(actual) => Transport::from_raw(actual),
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn sanitize(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

/// Bring a non-negative phase back into [0, 2π) by subtraction.
#[inline]
pub fn wrap_phase(mut phase: f32) -> f32 {
    if !phase.is_finite() || phase < 0.0 {
        return 0.0;
    }
    while phase >= TAU {
        phase -= TAU;
    }
    phase
}
