// Host-side tests for the level state machine, driven the way the frame
// loop drives it: control events plus fixed-step ticks.

use shortwave_core::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const FRAME: Duration = Duration::from_micros(16_667);

#[derive(Clone, Debug, PartialEq)]
enum Outbound {
    Won(i32),
    Return,
}

#[derive(Clone, Default)]
struct Progress(Rc<RefCell<Vec<Outbound>>>);

impl ProgressSink for Progress {
    fn level_won(&mut self, level: i32) {
        self.0.borrow_mut().push(Outbound::Won(level));
    }
    fn return_to_prior_context(&mut self) {
        self.0.borrow_mut().push(Outbound::Return);
    }
}

impl Progress {
    fn wins(&self) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|e| matches!(e, Outbound::Won(_)))
            .count()
    }
    fn returns(&self) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|e| **e == Outbound::Return)
            .count()
    }
}

#[derive(Clone, Debug, PartialEq)]
enum ToneCall {
    Start,
    Target(f32),
    Stop,
}

#[derive(Clone, Default)]
struct Tone(Rc<RefCell<Vec<ToneCall>>>);

impl FeedbackTone for Tone {
    fn start(&self) {
        self.0.borrow_mut().push(ToneCall::Start);
    }
    fn set_target_match(&self, score: f32) {
        self.0.borrow_mut().push(ToneCall::Target(score));
    }
    fn stop(&self) {
        self.0.borrow_mut().push(ToneCall::Stop);
    }
}

#[derive(Default)]
struct Screen {
    label: String,
    instruction: Option<Instruction>,
    readout: String,
    band: Option<MatchBand>,
    selector_visible: bool,
    selected: Option<WaveKind>,
    controls_enabled: bool,
    win_text: String,
}

#[derive(Clone, Default)]
struct Display(Rc<RefCell<Screen>>);

impl DisplaySink for Display {
    fn level_label(&mut self, label: &str) {
        self.0.borrow_mut().label = label.to_string();
    }
    fn instruction(&mut self, instruction: Option<Instruction>) {
        self.0.borrow_mut().instruction = instruction;
    }
    fn match_readout(&mut self, text: &str, band: MatchBand) {
        let mut s = self.0.borrow_mut();
        s.readout = text.to_string();
        s.band = Some(band);
    }
    fn wave_kind_selector(&mut self, visible: bool) {
        self.0.borrow_mut().selector_visible = visible;
    }
    fn selected_wave_kind(&mut self, kind: WaveKind) {
        self.0.borrow_mut().selected = Some(kind);
    }
    fn controls_enabled(&mut self, enabled: bool) {
        self.0.borrow_mut().controls_enabled = enabled;
    }
    fn win_message(&mut self, text: &str, _alpha: f32) {
        self.0.borrow_mut().win_text = text.to_string();
    }
}

struct Harness {
    machine: LevelStateMachine,
    progress: Progress,
    tone: Tone,
    screen: Display,
}

fn harness(level: i32) -> Harness {
    let progress = Progress::default();
    let tone = Tone::default();
    let screen = Display::default();
    let quiet = SamplerConfig {
        noise_offset: 1.0,
        ..SamplerConfig::default()
    };
    let machine = LevelStateMachine::new(
        GameConfig::default(),
        Box::new(level),
        Box::new(progress.clone()),
    )
    .with_feedback(Box::new(tone.clone()))
    .with_display(Box::new(screen.clone()))
    .with_traces(
        WaveSampler::new(quiet.clone()).unwrap(),
        WaveSampler::new(quiet).unwrap(),
    );
    Harness {
        machine,
        progress,
        tone,
        screen,
    }
}

fn run_for(machine: &mut LevelStateMachine, seconds: f32) {
    let frames = (seconds / FRAME.as_secs_f32()).ceil() as usize;
    for _ in 0..frames {
        machine.tick(FRAME);
    }
}

#[test]
fn level_one_end_to_end() {
    let mut h = harness(1);
    h.machine.setup();
    assert_eq!(h.machine.phase(), LevelPhase::Active);
    assert_eq!(h.machine.score(), 0.0);
    assert_eq!(h.screen.0.borrow().readout, "Match: 0.0%");

    h.machine.on_frequency_changed(2.0);
    assert!((h.machine.score() - 0.5).abs() < 1e-6);
    assert_eq!(h.machine.phase(), LevelPhase::Active);

    h.machine.on_amplitude_changed(1.0);
    assert_eq!(h.machine.score(), 1.0);
    assert_eq!(h.machine.phase(), LevelPhase::Won);
    assert_eq!(h.progress.wins(), 0, "win is reported after the sequence");

    run_for(&mut h.machine, 3.5);
    assert_eq!(h.machine.phase(), LevelPhase::Won);
    assert_eq!(h.progress.wins(), 0);

    run_for(&mut h.machine, 1.0);
    assert_eq!(h.machine.phase(), LevelPhase::Exited);
    assert_eq!(
        *h.progress.0.borrow(),
        vec![Outbound::Won(1), Outbound::Return]
    );
}

#[test]
fn further_high_scores_do_not_rewin() {
    let mut h = harness(1);
    h.machine.setup();
    h.machine.on_frequency_changed(2.0);
    h.machine.on_amplitude_changed(1.0);
    // edits after the win are ignored
    h.machine.on_amplitude_changed(1.0);
    h.machine.on_frequency_changed(2.0);
    run_for(&mut h.machine, 5.0);
    h.machine.on_amplitude_changed(1.0);
    run_for(&mut h.machine, 5.0);
    assert_eq!(h.progress.wins(), 1);
    assert_eq!(h.progress.returns(), 1);
    let stops = h
        .tone
        .0
        .borrow()
        .iter()
        .filter(|c| **c == ToneCall::Stop)
        .count();
    assert_eq!(stops, 1);
}

#[test]
fn trace_fade_is_monotone_and_reaches_zero() {
    let mut h = harness(1);
    h.machine.setup();
    assert_eq!(h.machine.trace_fade(), 1.0);
    let width0 = h.machine.player_trace().unwrap().stroke().width;
    h.machine.on_frequency_changed(2.0);
    h.machine.on_amplitude_changed(1.0);

    let mut last = 1.0_f32;
    let mut elapsed = 0.0_f32;
    while elapsed < 1.2 {
        h.machine.tick(FRAME);
        elapsed += FRAME.as_secs_f32();
        let fade = h.machine.trace_fade();
        assert!(fade <= last, "fade rose from {last} to {fade}");
        let width = h.machine.player_trace().unwrap().stroke().width;
        assert!((width - width0 * fade).abs() < 1e-6);
        last = fade;
    }
    assert_eq!(h.machine.trace_fade(), 0.0);
    assert_eq!(h.machine.template_trace().unwrap().stroke().alpha, 0.0);
}

#[test]
fn win_timings_land_on_their_frames() {
    let step = Duration::from_secs_f64(1.0 / 60.0);
    let mut h = harness(1);
    h.machine.setup();
    h.machine.on_frequency_changed(2.0);
    h.machine.on_amplitude_changed(1.0);
    assert_eq!(h.machine.phase(), LevelPhase::Won);

    for _ in 0..60 {
        h.machine.tick(step);
    }
    assert_eq!(h.machine.trace_fade(), 0.0, "traces gone after one second");
    assert_eq!(h.machine.player_trace().unwrap().stroke().width, 0.0);

    for _ in 60..239 {
        h.machine.tick(step);
    }
    assert_eq!(h.progress.wins(), 0);
    h.machine.tick(step);
    assert_eq!(h.progress.wins(), 1, "completion on the 240th frame");
    assert_eq!(h.machine.phase(), LevelPhase::Exited);
}

#[test]
fn exit_during_win_cancels_completion() {
    let mut h = harness(1);
    h.machine.setup();
    h.machine.on_frequency_changed(2.0);
    h.machine.on_amplitude_changed(1.0);
    run_for(&mut h.machine, 2.0);
    h.machine.on_exit_requested();
    assert_eq!(h.machine.phase(), LevelPhase::Aborted);
    run_for(&mut h.machine, 10.0);
    assert_eq!(h.progress.wins(), 0);
    assert_eq!(*h.progress.0.borrow(), vec![Outbound::Return]);
}

#[test]
fn exit_while_active_stops_tone_and_returns() {
    let mut h = harness(2);
    h.machine.setup();
    h.machine.on_exit_requested();
    assert_eq!(h.machine.phase(), LevelPhase::Aborted);
    assert_eq!(h.tone.0.borrow().last(), Some(&ToneCall::Stop));
    assert_eq!(h.progress.returns(), 1);
    // a second request is ignored
    h.machine.on_exit_requested();
    assert_eq!(h.progress.returns(), 1);
    // and so are edits
    h.machine.on_frequency_changed(3.0);
    assert_eq!(h.machine.player().frequency, 1.0);
}

#[test]
fn exit_after_completion_is_ignored() {
    let mut h = harness(1);
    h.machine.setup();
    h.machine.on_frequency_changed(2.0);
    h.machine.on_amplitude_changed(1.0);
    run_for(&mut h.machine, 4.5);
    assert_eq!(h.machine.phase(), LevelPhase::Exited);
    h.machine.on_exit_requested();
    assert_eq!(h.progress.returns(), 1);
}

#[test]
fn tone_follows_score() {
    let mut h = harness(1);
    h.machine.setup();
    assert_eq!(h.tone.0.borrow()[0], ToneCall::Start);
    assert_eq!(h.tone.0.borrow()[1], ToneCall::Target(0.0));
    h.machine.on_frequency_changed(2.0);
    assert_eq!(h.tone.0.borrow().last(), Some(&ToneCall::Target(0.5)));
    // each active tick re-scores and re-targets
    let before = h.tone.0.borrow().len();
    h.machine.tick(FRAME);
    h.machine.tick(FRAME);
    assert_eq!(h.tone.0.borrow().len(), before + 2);
}

#[test]
fn runs_without_any_optional_collaborators() {
    let progress = Progress::default();
    let mut machine =
        LevelStateMachine::new(GameConfig::default(), Box::new(1), Box::new(progress.clone()));
    machine.setup();
    machine.on_frequency_changed(2.0);
    machine.on_amplitude_changed(1.0);
    assert_eq!(machine.phase(), LevelPhase::Won);
    run_for(&mut machine, 4.5);
    assert_eq!(progress.wins(), 1);
    assert_eq!(machine.phase(), LevelPhase::Exited);
}

#[test]
fn high_level_uses_last_template_with_raw_label() {
    let mut h = harness(6);
    h.machine.setup();
    assert_eq!(h.screen.0.borrow().label, "Day 6");
    assert_eq!(h.machine.template(), level_definition(4).template);
    let expected = BASE_INTERFERENCE_STRENGTH * noise_multiplier(6);
    let got = h.machine.template_trace().unwrap().interference_strength();
    assert!((got - expected).abs() < 1e-5);
}

#[test]
fn level_one_hides_kind_selector() {
    let mut h = harness(1);
    h.machine.setup();
    {
        let s = h.screen.0.borrow();
        assert!(!s.selector_visible);
        assert_eq!(s.selected, Some(WaveKind::Sine));
        assert_eq!(s.instruction, Some(Instruction::MatchSine));
        assert!(s.controls_enabled);
        assert_eq!(s.band, Some(MatchBand::Far));
    }
    let mut h2 = harness(3);
    h2.machine.setup();
    assert!(h2.screen.0.borrow().selector_visible);
}

#[test]
fn square_level_needs_the_right_kind() {
    let mut h = harness(2);
    h.machine.setup();
    h.machine.on_frequency_changed(3.0);
    h.machine.on_amplitude_changed(1.2);
    assert_eq!(h.machine.score(), 0.0);
    assert_eq!(h.machine.phase(), LevelPhase::Active);

    h.machine.on_wave_kind_changed(WaveKind::Square);
    assert_eq!(h.screen.0.borrow().selected, Some(WaveKind::Square));
    assert_eq!(h.machine.score(), 1.0);
    assert_eq!(h.machine.phase(), LevelPhase::Won);
}

#[test]
fn win_disables_controls_and_types_message() {
    let mut h = harness(1);
    h.machine.setup();
    h.machine.on_frequency_changed(2.0);
    h.machine.on_amplitude_changed(1.0);
    {
        let s = h.screen.0.borrow();
        assert!(!s.controls_enabled);
        assert!(!s.selector_visible);
        assert_eq!(s.instruction, None);
        assert_eq!(s.band, Some(MatchBand::Locked));
    }
    run_for(&mut h.machine, 0.5);
    let partial = h.screen.0.borrow().win_text.clone();
    assert!(!partial.is_empty());
    assert!(WIN_MESSAGE.starts_with(&partial));
    run_for(&mut h.machine, 2.5);
    assert_eq!(h.screen.0.borrow().win_text, WIN_MESSAGE);
    assert!(h.machine.win_message().unwrap().is_typed());
}

#[test]
fn near_miss_within_tolerance_still_wins() {
    let mut h = harness(1);
    h.machine.setup();
    // 1% off on frequency: 0.9 + 1.0 -> 0.95
    h.machine.on_amplitude_changed(1.0);
    h.machine.on_frequency_changed(2.02);
    assert!(h.machine.score() >= WIN_THRESHOLD);
    assert_eq!(h.machine.phase(), LevelPhase::Won);
}

#[test]
fn reset_to_level_cancels_pending_completion() {
    let mut h = harness(1);
    h.machine.setup();
    h.machine.on_frequency_changed(2.0);
    h.machine.on_amplitude_changed(1.0);
    run_for(&mut h.machine, 1.5);
    h.machine.reset_to_level(9);
    assert_eq!(h.machine.phase(), LevelPhase::Active);
    assert_eq!(h.machine.definition().level, 4);
    assert_eq!(h.machine.trace_fade(), 1.0);
    assert_eq!(h.machine.player_trace().unwrap().stroke().width, 0.1);
    run_for(&mut h.machine, 10.0);
    assert_eq!(h.progress.wins(), 0);
    assert_eq!(h.machine.player(), INITIAL_PLAYER);
}

#[test]
fn edits_are_clamped_to_slider_bounds() {
    let mut h = harness(3);
    h.machine.setup();
    h.machine.on_frequency_changed(50.0);
    h.machine.on_amplitude_changed(-1.0);
    assert_eq!(h.machine.player().frequency, FREQUENCY_MAX);
    assert_eq!(h.machine.player().amplitude, AMPLITUDE_MIN);
}
