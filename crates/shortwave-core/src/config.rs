//! Tuning structs. Defaults reproduce the shipped game feel; front-ends
//! override individual fields with struct update syntax.

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq)]
pub struct OscillatorConfig {
    pub noise_volume: f32,
    pub sine_volume: f32,
    pub lower_octave_volume: f32,
    pub lower_octave_multiplier: f32,
    pub higher_octave_volume: f32,
    pub higher_octave_multiplier: f32,
    pub fade_out_sec: f32,
    pub min_frequency: f32,
    pub max_frequency: f32,
    pub min_wobble_frequency: f32,
    pub max_wobble_frequency: f32,
    pub wobble_depth: f32,
    pub noise_seed: u64,
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self {
            noise_volume: 0.1,
            sine_volume: 0.3,
            lower_octave_volume: 0.2,
            lower_octave_multiplier: 0.5,
            higher_octave_volume: 0.0,
            higher_octave_multiplier: 2.0,
            fade_out_sec: AUDIO_FADE_OUT_SEC,
            min_frequency: CARRIER_MIN_HZ,
            max_frequency: CARRIER_MAX_HZ,
            min_wobble_frequency: WOBBLE_MIN_HZ,
            max_wobble_frequency: WOBBLE_MAX_HZ,
            wobble_depth: WOBBLE_DEPTH,
            noise_seed: 0x5EED_5157_4A1D,
        }
    }
}

impl OscillatorConfig {
    /// Worst-case peak of the mixed output before the fade multiplier.
    pub fn peak_level(&self) -> f32 {
        self.noise_volume.abs()
            + self.sine_volume.abs()
            + self.lower_octave_volume.abs()
            + self.higher_octave_volume.abs()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sum = self.peak_level();
        if sum > 1.0 {
            return Err(ConfigError::NoHeadroom { sum });
        }
        check_range("carrier frequency", self.min_frequency, self.max_frequency)?;
        check_range(
            "wobble frequency",
            self.min_wobble_frequency,
            self.max_wobble_frequency,
        )?;
        check_positive("carrier minimum", self.min_frequency)?;
        check_positive("lower octave multiplier", self.lower_octave_multiplier)?;
        check_positive("higher octave multiplier", self.higher_octave_multiplier)?;
        check_positive("fade out duration", self.fade_out_sec)?;
        if !(0.0..1.0).contains(&self.wobble_depth) {
            return Err(ConfigError::WobbleDepth(self.wobble_depth));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SamplerConfig {
    pub points: usize,
    pub width: f32,
    pub noise_scale: f32,
    pub noise_speed: f32,
    pub noise_strength: f32,
    /// 0 picks a random offset in [0, 100) when the sampler is built.
    pub noise_offset: f32,
    pub interference_scale: f32,
    pub interference_speed: f32,
    pub interference_strength: f32,
    pub stroke_width: f32,
    pub stroke_alpha: f32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            points: 100,
            width: 10.0,
            noise_scale: 1.0,
            noise_speed: 1.0,
            noise_strength: 0.1,
            noise_offset: 0.0,
            interference_scale: 20.0,
            interference_speed: 15.0,
            interference_strength: BASE_INTERFERENCE_STRENGTH,
            stroke_width: 0.1,
            stroke_alpha: 1.0,
        }
    }
}

impl SamplerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.points < 2 {
            return Err(ConfigError::TooFewPoints(self.points));
        }
        check_positive("trace width", self.width)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub win_threshold: f32,
    pub close_threshold: f32,
    pub trace_fade_sec: f32,
    pub win_complete_delay_sec: f32,
    pub typewriter_char_sec: f32,
    pub blink_interval_sec: f32,
    pub win_message: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            win_threshold: WIN_THRESHOLD,
            close_threshold: CLOSE_THRESHOLD,
            trace_fade_sec: TRACE_FADE_SEC,
            win_complete_delay_sec: WIN_COMPLETE_DELAY_SEC,
            typewriter_char_sec: TYPEWRITER_CHAR_SEC,
            blink_interval_sec: BLINK_INTERVAL_SEC,
            win_message: WIN_MESSAGE.to_string(),
        }
    }
}

fn check_range(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { name, min, max })
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}
