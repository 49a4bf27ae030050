use shortwave_core::{SliderRange, WaveKind};
use winit::keyboard::KeyCode;

pub const FREQUENCY_STEP: f32 = 0.1;
pub const AMPLITUDE_STEP: f32 = 0.05;

/// UI control events, queued per frame and applied before the tick. Slider
/// nudges are relative so several presses inside one frame all count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlEvent {
    NudgeFrequency(f32),
    NudgeAmplitude(f32),
    Kind(WaveKind),
    Exit,
}

// Repeated steps accumulate float error; keep values on a 0.001 grid.
#[inline]
fn snap(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

/// Slider value after one nudge, snapped and clamped to `range`.
#[inline]
pub fn nudged(value: f32, delta: f32, range: SliderRange) -> f32 {
    range.clamp(snap(value + delta))
}

/// Arrow keys nudge the sliders, 1/2 pick the wave kind (only while the
/// selector is usable), Escape leaves.
#[inline]
pub fn control_event_for_key(key: KeyCode, kind_selectable: bool) -> Option<ControlEvent> {
    match key {
        KeyCode::ArrowLeft => Some(ControlEvent::NudgeFrequency(-FREQUENCY_STEP)),
        KeyCode::ArrowRight => Some(ControlEvent::NudgeFrequency(FREQUENCY_STEP)),
        KeyCode::ArrowDown => Some(ControlEvent::NudgeAmplitude(-AMPLITUDE_STEP)),
        KeyCode::ArrowUp => Some(ControlEvent::NudgeAmplitude(AMPLITUDE_STEP)),
        KeyCode::Digit1 if kind_selectable => Some(ControlEvent::Kind(WaveKind::Sine)),
        KeyCode::Digit2 if kind_selectable => Some(ControlEvent::Kind(WaveKind::Square)),
        KeyCode::Escape => Some(ControlEvent::Exit),
        _ => None,
    }
}
