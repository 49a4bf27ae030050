//! Visual sampling of a [`WaveDescriptor`] into a polyline.
//!
//! Two independent noise layers ride on top of the clean signal: a slow
//! spatial/temporal wobble and a fast "interference" layer whose strength
//! scales with the level. `render` is a pure function of the descriptor,
//! the time and the configuration.

use crate::config::SamplerConfig;
use crate::error::ConfigError;
use crate::noise::noise2d;
use crate::wave::WaveDescriptor;
use glam::Vec2;
use rand::Rng;

// keeps the interference layer decorrelated from the wobble layer
const INTERFERENCE_OFFSET: f32 = 50.0;
const MAX_RANDOM_OFFSET: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceStroke {
    pub width: f32,
    pub alpha: f32,
}

#[derive(Clone, Debug)]
pub struct WaveSampler {
    config: SamplerConfig,
    noise_offset: f32,
    stroke: TraceStroke,
    fade_baseline: Option<TraceStroke>,
}

impl WaveSampler {
    pub fn new(config: SamplerConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    /// Like [`WaveSampler::new`], drawing the random noise offset (only used
    /// when the configured offset is 0) from `rng`.
    pub fn with_rng(config: SamplerConfig, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        config.validate()?;
        let noise_offset = if config.noise_offset == 0.0 {
            rng.gen_range(0.0..MAX_RANDOM_OFFSET)
        } else {
            config.noise_offset
        };
        let stroke = TraceStroke {
            width: config.stroke_width,
            alpha: config.stroke_alpha,
        };
        Ok(Self {
            config,
            noise_offset,
            stroke,
            fade_baseline: None,
        })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn noise_offset(&self) -> f32 {
        self.noise_offset
    }

    pub fn interference_strength(&self) -> f32 {
        self.config.interference_strength
    }

    pub fn set_interference_strength(&mut self, strength: f32) {
        self.config.interference_strength = strength;
    }

    pub fn stroke(&self) -> TraceStroke {
        self.stroke
    }

    /// Replace the current stroke. Does not reset a captured fade baseline.
    pub fn set_stroke(&mut self, stroke: TraceStroke) {
        self.stroke = stroke;
    }

    pub fn render(&self, wave: &WaveDescriptor, time: f32) -> Vec<Vec2> {
        let mut out = Vec::with_capacity(self.config.points);
        self.render_into(wave, time, &mut out);
        out
    }

    /// Same as [`WaveSampler::render`], reusing `out`.
    pub fn render_into(&self, wave: &WaveDescriptor, time: f32, out: &mut Vec<Vec2>) {
        out.clear();
        let c = &self.config;
        let n = c.points.max(2);
        let step = c.width / (n - 1) as f32;
        let start_x = -c.width / 2.0;
        let offset = self.noise_offset;
        let hf_offset = offset + INTERFERENCE_OFFSET;

        for i in 0..n {
            let x = start_x + i as f32 * step;
            let t = i as f32 / (n - 1) as f32;
            let signal = wave.value_at(t);

            let wobble =
                noise2d(x * c.noise_scale + time * c.noise_speed + offset, offset) * c.noise_strength;
            let interference = noise2d(
                x * c.interference_scale - time * c.interference_speed + hf_offset,
                hf_offset,
            ) * c.interference_strength;

            out.push(Vec2::new(x, signal + wobble + interference));
        }
    }

    /// Scale stroke width and alpha by `alpha`, relative to the stroke that
    /// was current on the first call.
    pub fn set_fade(&mut self, alpha: f32) {
        let alpha = if alpha.is_nan() {
            0.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
        let baseline = *self.fade_baseline.get_or_insert(self.stroke);
        self.stroke = TraceStroke {
            width: baseline.width * alpha,
            alpha: baseline.alpha * alpha,
        };
    }
}
