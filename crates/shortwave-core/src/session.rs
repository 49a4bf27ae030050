//! Level flow: `Setup → Active → Won → FadingOut → Exited`, with `Aborted`
//! reachable from any state before `Exited`.
//!
//! The machine is driven from the frame-paced UI loop. Control events and
//! [`LevelStateMachine::tick`] are the only entry points; the win delay and
//! the trace fade are accumulators advanced by `tick` and disarmed on exit.
//! Collaborators are injected at construction. Audio, traces and display
//! are optional: anything not wired is skipped and scoring keeps working.

use crate::config::GameConfig;
use crate::console::ConsoleText;
use crate::levels::{level_definition, template_level, Instruction, LevelDefinition, SliderRange};
use crate::oscillator::FeedbackTone;
use crate::sampler::WaveSampler;
use crate::scoring::{format_match, score_match, MatchBand};
use crate::timer::{DelayTimer, FadeRamp};
use crate::wave::{WaveDescriptor, WaveKind};
use std::time::Duration;

/// Where the level index comes from (day progression, CLI, tests).
pub trait LevelSource {
    fn current_level(&self) -> i32;
}

impl LevelSource for i32 {
    fn current_level(&self) -> i32 {
        *self
    }
}

/// Outbound notifications to whoever owns game progress and scenes.
pub trait ProgressSink {
    /// Fired once per level instance, only after the win sequence completes.
    fn level_won(&mut self, level: i32);
    /// Fired on completion and on abort.
    fn return_to_prior_context(&mut self);
}

/// Text and control surface. Every method defaults to a no-op.
pub trait DisplaySink {
    fn level_label(&mut self, _label: &str) {}
    /// `None` hides the instruction line.
    fn instruction(&mut self, _instruction: Option<Instruction>) {}
    fn match_readout(&mut self, _text: &str, _band: MatchBand) {}
    fn wave_kind_selector(&mut self, _visible: bool) {}
    fn selected_wave_kind(&mut self, _kind: WaveKind) {}
    fn controls(
        &mut self,
        _frequency: SliderRange,
        _amplitude: SliderRange,
        _player: &WaveDescriptor,
    ) {
    }
    fn controls_enabled(&mut self, _enabled: bool) {}
    /// Empty text hides the message.
    fn win_message(&mut self, _text: &str, _alpha: f32) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelPhase {
    Setup,
    Active,
    Won,
    FadingOut,
    Exited,
    Aborted,
}

impl LevelPhase {
    pub fn is_finished(self) -> bool {
        matches!(self, LevelPhase::Exited | LevelPhase::Aborted)
    }
}

pub struct LevelStateMachine {
    config: GameConfig,
    phase: LevelPhase,
    definition: LevelDefinition,
    player: WaveDescriptor,
    score: f32,
    controls_enabled: bool,
    level_source: Box<dyn LevelSource>,
    progress: Box<dyn ProgressSink>,
    feedback: Option<Box<dyn FeedbackTone>>,
    display: Option<Box<dyn DisplaySink>>,
    template_trace: Option<WaveSampler>,
    player_trace: Option<WaveSampler>,
    win_timer: DelayTimer,
    trace_fade: FadeRamp,
    traces_faded: bool,
    win_message: Option<ConsoleText>,
}

impl LevelStateMachine {
    pub fn new(
        config: GameConfig,
        level_source: Box<dyn LevelSource>,
        progress: Box<dyn ProgressSink>,
    ) -> Self {
        let definition = level_definition(1);
        Self {
            config,
            phase: LevelPhase::Setup,
            player: definition.initial_player,
            definition,
            score: 0.0,
            controls_enabled: false,
            level_source,
            progress,
            feedback: None,
            display: None,
            template_trace: None,
            player_trace: None,
            win_timer: DelayTimer::default(),
            trace_fade: FadeRamp::default(),
            traces_faded: false,
            win_message: None,
        }
    }

    pub fn with_feedback(mut self, feedback: Box<dyn FeedbackTone>) -> Self {
        self.feedback = Some(feedback);
        self
    }

    pub fn with_display(mut self, display: Box<dyn DisplaySink>) -> Self {
        self.display = Some(display);
        self
    }

    pub fn with_traces(mut self, template: WaveSampler, player: WaveSampler) -> Self {
        self.template_trace = Some(template);
        self.player_trace = Some(player);
        self
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn player(&self) -> WaveDescriptor {
        self.player
    }

    pub fn template(&self) -> WaveDescriptor {
        self.definition.template
    }

    pub fn definition(&self) -> &LevelDefinition {
        &self.definition
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    pub fn template_trace(&self) -> Option<&WaveSampler> {
        self.template_trace.as_ref()
    }

    pub fn player_trace(&self) -> Option<&WaveSampler> {
        self.player_trace.as_ref()
    }

    pub fn win_message(&self) -> Option<&ConsoleText> {
        self.win_message.as_ref()
    }

    /// Current trace fade multiplier, 1 until the win sequence starts.
    pub fn trace_fade(&self) -> f32 {
        if self.trace_fade.is_active() || self.traces_faded {
            self.trace_fade.value()
        } else {
            1.0
        }
    }

    /// Load the level reported by the level source and go `Active`.
    pub fn setup(&mut self) {
        let level = self.level_source.current_level();
        self.enter_level(level);
    }

    /// Jump to a specific level, cancelling any pending transition. The
    /// index is clamped to the template range first.
    pub fn reset_to_level(&mut self, level: i32) {
        self.enter_level(template_level(level));
    }

    fn enter_level(&mut self, level: i32) {
        self.cancel_pending();
        self.phase = LevelPhase::Setup;
        self.win_message = None;

        let definition = level_definition(level);
        log::info!(
            "[level] setup day {} (template {}) noise x{:.2}",
            definition.level,
            definition.template_level,
            definition.noise_multiplier
        );
        self.player = definition.initial_player;
        self.score = 0.0;
        self.controls_enabled = true;

        let interference = definition.interference_strength();
        let restore = self.traces_faded;
        for trace in [&mut self.template_trace, &mut self.player_trace]
            .into_iter()
            .flatten()
        {
            trace.set_interference_strength(interference);
            if restore {
                trace.set_fade(1.0);
            }
        }
        self.traces_faded = false;
        if self.template_trace.is_none() {
            log::debug!("[level] no trace samplers wired");
        }

        let player = self.player;
        let label = definition.label();
        let instruction = definition.instruction;
        let show_selector = definition.show_wave_kind_selector;
        self.definition = definition;
        self.show(|d| {
            d.level_label(&label);
            d.instruction(Some(instruction));
            d.wave_kind_selector(show_selector);
            d.selected_wave_kind(player.kind);
            d.controls(SliderRange::FREQUENCY, SliderRange::AMPLITUDE, &player);
            d.controls_enabled(true);
            d.win_message("", 0.0);
        });

        match &self.feedback {
            Some(f) => f.start(),
            None => log::debug!("[level] no feedback tone wired"),
        }

        self.phase = LevelPhase::Active;
        self.evaluate();
    }

    pub fn on_frequency_changed(&mut self, value: f32) {
        if !self.accepts_edits() {
            return;
        }
        self.player.frequency = SliderRange::FREQUENCY.clamp(value);
        self.evaluate();
    }

    pub fn on_amplitude_changed(&mut self, value: f32) {
        if !self.accepts_edits() {
            return;
        }
        self.player.amplitude = SliderRange::AMPLITUDE.clamp(value);
        self.evaluate();
    }

    pub fn on_wave_kind_changed(&mut self, kind: WaveKind) {
        if !self.accepts_edits() {
            return;
        }
        self.player.kind = kind;
        self.show(|d| d.selected_wave_kind(kind));
        self.evaluate();
    }

    /// Leave without recording a win. Ignored once the level has finished.
    pub fn on_exit_requested(&mut self) {
        if self.phase.is_finished() {
            return;
        }
        log::info!("[level] exit requested during {:?}", self.phase);
        self.cancel_pending();
        if let Some(f) = &self.feedback {
            f.stop();
        }
        self.phase = LevelPhase::Aborted;
        self.progress.return_to_prior_context();
    }

    /// Advance timers by one UI frame and re-score while active.
    pub fn tick(&mut self, dt: Duration) {
        let dt = dt.as_secs_f32();
        match self.phase {
            LevelPhase::Active => self.evaluate(),
            LevelPhase::Won => self.advance_win(dt),
            _ => {}
        }
    }

    fn accepts_edits(&self) -> bool {
        self.phase == LevelPhase::Active && self.controls_enabled
    }

    fn evaluate(&mut self) {
        if self.phase != LevelPhase::Active {
            return;
        }
        let score = score_match(&self.player, &self.definition.template);
        self.score = score;
        if let Some(f) = &self.feedback {
            f.set_target_match(score);
        }
        let band = MatchBand::for_score(
            score,
            self.config.win_threshold,
            self.config.close_threshold,
        );
        let text = format_match(score);
        self.show(|d| d.match_readout(&text, band));
        log::debug!("[level] {text}");

        if score >= self.config.win_threshold {
            self.enter_won();
        }
    }

    fn enter_won(&mut self) {
        if self.phase != LevelPhase::Active {
            return;
        }
        self.phase = LevelPhase::Won;
        log::info!(
            "[level] signal locked on day {} (score {:.3})",
            self.definition.level,
            self.score
        );
        if let Some(f) = &self.feedback {
            f.stop();
        }
        self.controls_enabled = false;
        self.show(|d| {
            d.controls_enabled(false);
            d.wave_kind_selector(false);
            d.instruction(None);
        });
        self.win_message = Some(ConsoleText::new(
            &self.config.win_message,
            self.config.typewriter_char_sec,
            self.config.blink_interval_sec,
        ));
        self.trace_fade.begin(self.config.trace_fade_sec);
        self.traces_faded = true;
        self.win_timer.arm(self.config.win_complete_delay_sec);
    }

    fn advance_win(&mut self, dt: f32) {
        if let Some(alpha) = self.trace_fade.advance(dt) {
            for trace in [&mut self.template_trace, &mut self.player_trace]
                .into_iter()
                .flatten()
            {
                trace.set_fade(alpha);
            }
        }
        if let Some(message) = self.win_message.as_mut() {
            message.tick(dt);
            if let Some(d) = self.display.as_deref_mut() {
                d.win_message(message.visible_text(), message.alpha());
            }
        }
        if self.win_timer.advance(dt) {
            self.complete();
        }
    }

    fn complete(&mut self) {
        self.phase = LevelPhase::FadingOut;
        log::info!("[level] day {} complete", self.definition.level);
        self.progress.level_won(self.definition.level);
        self.progress.return_to_prior_context();
        self.phase = LevelPhase::Exited;
    }

    fn cancel_pending(&mut self) {
        self.win_timer.cancel();
        self.trace_fade.cancel();
    }

    fn show(&mut self, f: impl FnOnce(&mut dyn DisplaySink)) {
        if let Some(d) = self.display.as_deref_mut() {
            f(d);
        }
    }
}
