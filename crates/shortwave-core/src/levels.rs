//! Compiled-in level table.
//!
//! A level index maps to the template the player must match, the player's
//! starting wave, how loud the visual interference is, and what the
//! instruction line says. Indices outside 1..=4 reuse the nearest template
//! while the raw index still drives the label and the noise multiplier.

use crate::constants::*;
use crate::wave::{WaveDescriptor, WaveKind};
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    MatchSine,
    MatchSquare,
    TryCombinations,
    FinalChallenge,
}

impl Instruction {
    pub fn text(self) -> &'static str {
        match self {
            Instruction::MatchSine => {
                "Match the sine wave using Frequency and Amplitude controls. You have to get a match of over 90%"
            }
            Instruction::MatchSquare => {
                "Match the square wave using Waveform, Frequency and Amplitude"
            }
            Instruction::TryCombinations => "Match the wave - try different combinations!",
            Instruction::FinalChallenge => "Final challenge - match the complex square wave!",
        }
    }
}

/// Inclusive bounds of one continuous control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
}

impl SliderRange {
    pub const FREQUENCY: SliderRange = SliderRange {
        min: FREQUENCY_MIN,
        max: FREQUENCY_MAX,
    };
    pub const AMPLITUDE: SliderRange = SliderRange {
        min: AMPLITUDE_MIN,
        max: AMPLITUDE_MAX,
    };

    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LevelDefinition {
    /// Raw index as requested, used for the label.
    pub level: i32,
    /// Index actually used to pick the template, always within 1..=4.
    pub template_level: i32,
    pub template: WaveDescriptor,
    pub initial_player: WaveDescriptor,
    pub noise_multiplier: f32,
    pub show_wave_kind_selector: bool,
    pub instruction: Instruction,
}

impl LevelDefinition {
    pub fn label(&self) -> String {
        format!("Day {}", self.level)
    }

    /// Strength of the fast interference layer for this level.
    pub fn interference_strength(&self) -> f32 {
        BASE_INTERFERENCE_STRENGTH * self.noise_multiplier
    }
}

pub const INITIAL_PLAYER: WaveDescriptor = WaveDescriptor::new(1.0, 0.5, WaveKind::Sine, 0.0);

pub fn template_level(level: i32) -> i32 {
    level.clamp(1, MAX_TEMPLATE_LEVEL)
}

/// `1 + (level - 1) * 4.75`, from the raw level (floored at 1) so later days
/// keep getting noisier after the templates run out.
pub fn noise_multiplier(level: i32) -> f32 {
    1.0 + (level.max(1) - 1) as f32 * NOISE_MULTIPLIER_PER_LEVEL
}

pub fn level_definition(level: i32) -> LevelDefinition {
    let template_level = template_level(level);
    let (template, show_wave_kind_selector, instruction) = match template_level {
        1 => (
            WaveDescriptor::new(2.0, 1.0, WaveKind::Sine, 0.0),
            false,
            Instruction::MatchSine,
        ),
        2 => (
            WaveDescriptor::new(3.0, 1.2, WaveKind::Square, 0.0),
            true,
            Instruction::MatchSquare,
        ),
        3 => (
            WaveDescriptor::new(5.0, 0.8, WaveKind::Sine, PI / 4.0),
            true,
            Instruction::TryCombinations,
        ),
        _ => (
            WaveDescriptor::new(4.5, 1.5, WaveKind::Square, PI / 6.0),
            true,
            Instruction::FinalChallenge,
        ),
    };
    LevelDefinition {
        level,
        template_level,
        template,
        initial_player: INITIAL_PLAYER,
        noise_multiplier: noise_multiplier(level),
        show_wave_kind_selector,
        instruction,
    }
}
