use std::cell::RefCell;
use std::rc::Rc;

use shortwave_core::{DisplaySink, Instruction, MatchBand, ProgressSink, WaveKind};

/// Everything the level pushes at the screen. The window title is composed
/// from it each frame.
#[derive(Clone, Debug, Default)]
pub struct ScreenState {
    pub label: String,
    pub instruction: Option<Instruction>,
    pub readout: String,
    pub band: Option<MatchBand>,
    pub selector_visible: bool,
    pub selected: WaveKind,
    pub controls_enabled: bool,
    pub win_text: String,
    pub win_alpha: f32,
}

impl ScreenState {
    pub fn title(&self) -> String {
        let mut parts = vec![self.label.clone()];
        if !self.win_text.is_empty() {
            if self.win_alpha > 0.0 {
                parts.push(self.win_text.clone());
            }
        } else {
            if let Some(instruction) = self.instruction {
                parts.push(instruction.text().to_owned());
            }
            parts.push(self.readout.clone());
            if self.selector_visible {
                let kind = match self.selected {
                    WaveKind::Sine => "[1] SINE  2 square",
                    WaveKind::Square => "1 sine  [2] SQUARE",
                };
                parts.push(kind.to_owned());
            }
        }
        parts.retain(|p| !p.is_empty());
        parts.join("  |  ")
    }

    /// Player trace colour: the readout band once a score exists.
    pub fn band_color(&self, fallback: [f32; 3]) -> [f32; 3] {
        self.band.map_or(fallback, MatchBand::color_rgb)
    }

    /// Kind keys only act while the selector is on screen and usable.
    pub fn kind_selectable(&self) -> bool {
        self.selector_visible && self.controls_enabled
    }
}

pub struct WindowDisplay {
    screen: Rc<RefCell<ScreenState>>,
}

impl WindowDisplay {
    pub fn new(screen: Rc<RefCell<ScreenState>>) -> Self {
        Self { screen }
    }
}

impl DisplaySink for WindowDisplay {
    fn level_label(&mut self, label: &str) {
        label.clone_into(&mut self.screen.borrow_mut().label);
    }

    fn instruction(&mut self, instruction: Option<Instruction>) {
        if let Some(instruction) = instruction {
            log::info!("[hint] {}", instruction.text());
        }
        self.screen.borrow_mut().instruction = instruction;
    }

    fn match_readout(&mut self, text: &str, band: MatchBand) {
        let mut screen = self.screen.borrow_mut();
        if screen.band != Some(band) {
            log::debug!("[match] {text} ({band:?})");
        }
        text.clone_into(&mut screen.readout);
        screen.band = Some(band);
    }

    fn wave_kind_selector(&mut self, visible: bool) {
        self.screen.borrow_mut().selector_visible = visible;
    }

    fn selected_wave_kind(&mut self, kind: WaveKind) {
        self.screen.borrow_mut().selected = kind;
    }

    fn controls_enabled(&mut self, enabled: bool) {
        self.screen.borrow_mut().controls_enabled = enabled;
    }

    fn win_message(&mut self, text: &str, alpha: f32) {
        let mut screen = self.screen.borrow_mut();
        text.clone_into(&mut screen.win_text);
        screen.win_alpha = alpha;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionOutcome {
    pub won_level: Option<i32>,
    pub return_requested: bool,
}

/// No save system in the standalone build: wins are logged and remembered
/// for the exit message, and "return" closes the window.
pub struct ProgressLog {
    outcome: Rc<RefCell<SessionOutcome>>,
}

impl ProgressLog {
    pub fn new(outcome: Rc<RefCell<SessionOutcome>>) -> Self {
        Self { outcome }
    }
}

impl ProgressSink for ProgressLog {
    fn level_won(&mut self, level: i32) {
        log::info!("[progress] day {level} marked complete");
        self.outcome.borrow_mut().won_level = Some(level);
    }

    fn return_to_prior_context(&mut self) {
        log::info!("[progress] leaving the tuning screen");
        self.outcome.borrow_mut().return_requested = true;
    }
}
