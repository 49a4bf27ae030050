use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WaveKind {
    #[default]
    Sine,
    Square,
}

/// Parameters of one periodic signal. A plain value: copied between the
/// session, the sampler and the display, never shared.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveDescriptor {
    pub frequency: f32,
    pub amplitude: f32,
    pub kind: WaveKind,
    /// Radians.
    pub phase: f32,
}

impl WaveDescriptor {
    pub const fn new(frequency: f32, amplitude: f32, kind: WaveKind, phase: f32) -> Self {
        Self {
            frequency,
            amplitude,
            kind,
            phase,
        }
    }

    /// Displacement at normalised position `t` in [0, 1] across the trace.
    pub fn value_at(&self, t: f32) -> f32 {
        let angle = t * self.frequency * TAU + self.phase;
        match self.kind {
            WaveKind::Sine => angle.sin() * self.amplitude,
            WaveKind::Square => square_sign(angle.sin()) * self.amplitude,
        }
    }
}

/// Sign used for the square wave. An exact zero crossing maps to +1 so the
/// square wave never collapses to the axis.
#[inline]
pub fn square_sign(s: f32) -> f32 {
    if s >= 0.0 {
        1.0
    } else {
        -1.0
    }
}
