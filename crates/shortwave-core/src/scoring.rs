use crate::constants::{MATCH_TOLERANCE, TOLERANCE_EPSILON};
use crate::wave::WaveDescriptor;

#[inline]
fn clamp01(x: f32) -> f32 {
    if x.is_nan() {
        return 1.0;
    }
    x.clamp(0.0, 1.0)
}

/// Closeness of one parameter, 1 at an exact match and 0 once the error
/// reaches 10% of the template's own value.
fn component_score(player: f32, template: f32) -> f32 {
    let tolerance = (template.abs() * MATCH_TOLERANCE).max(TOLERANCE_EPSILON);
    1.0 - clamp01((player - template).abs() / tolerance)
}

/// Normalised similarity in [0, 1]. A different wave kind never scores;
/// phase is ignored.
pub fn score_match(player: &WaveDescriptor, template: &WaveDescriptor) -> f32 {
    if player.kind != template.kind {
        return 0.0;
    }
    let freq_score = component_score(player.frequency, template.frequency);
    let amp_score = component_score(player.amplitude, template.amplitude);
    (freq_score + amp_score) / 2.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchBand {
    Locked,
    Close,
    Far,
}

impl MatchBand {
    pub fn for_score(score: f32, win_threshold: f32, close_threshold: f32) -> Self {
        if score >= win_threshold {
            MatchBand::Locked
        } else if score >= close_threshold {
            MatchBand::Close
        } else {
            MatchBand::Far
        }
    }

    /// Readout colour (green / yellow / red).
    pub fn color_rgb(self) -> [f32; 3] {
        match self {
            MatchBand::Locked => [0.0, 1.0, 0.0],
            MatchBand::Close => [1.0, 0.92, 0.016],
            MatchBand::Far => [1.0, 0.0, 0.0],
        }
    }
}

pub fn format_match(score: f32) -> String {
    format!("Match: {:.1}%", score * 100.0)
}
