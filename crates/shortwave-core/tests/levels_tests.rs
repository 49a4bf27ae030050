// Host-side tests for the compiled-in level table.

use shortwave_core::*;
use std::f32::consts::PI;

#[test]
fn level_templates_match_table() {
    let expected = [
        (1, WaveDescriptor::new(2.0, 1.0, WaveKind::Sine, 0.0), false),
        (2, WaveDescriptor::new(3.0, 1.2, WaveKind::Square, 0.0), true),
        (3, WaveDescriptor::new(5.0, 0.8, WaveKind::Sine, PI / 4.0), true),
        (4, WaveDescriptor::new(4.5, 1.5, WaveKind::Square, PI / 6.0), true),
    ];
    for (level, template, selector) in expected {
        let def = level_definition(level);
        assert_eq!(def.template, template, "template for level {level}");
        assert_eq!(def.show_wave_kind_selector, selector);
        assert_eq!(def.initial_player, INITIAL_PLAYER);
        assert_eq!(def.template_level, level);
    }
}

#[test]
fn initial_player_is_quiet_sine() {
    assert_eq!(
        INITIAL_PLAYER,
        WaveDescriptor::new(1.0, 0.5, WaveKind::Sine, 0.0)
    );
}

#[test]
fn high_levels_reuse_last_template_but_keep_label() {
    let def = level_definition(7);
    assert_eq!(def.template_level, 4);
    assert_eq!(def.template, level_definition(4).template);
    assert_eq!(def.label(), "Day 7");
}

#[test]
fn low_levels_clamp_to_first_template() {
    for level in [0, -3] {
        let def = level_definition(level);
        assert_eq!(def.template_level, 1);
        assert_eq!(def.template, level_definition(1).template);
        assert_eq!(def.label(), format!("Day {level}"));
        assert_eq!(def.noise_multiplier, 1.0);
    }
}

#[test]
fn noise_multiplier_grows_with_raw_level() {
    assert_eq!(noise_multiplier(1), 1.0);
    assert!((noise_multiplier(2) - 5.75).abs() < 1e-6);
    assert!((noise_multiplier(5) - 20.0).abs() < 1e-6);
    // keeps growing past the last template
    assert!(noise_multiplier(6) > noise_multiplier(5));
}

#[test]
fn interference_strength_scales_base() {
    let def = level_definition(2);
    let expected = BASE_INTERFERENCE_STRENGTH * 5.75;
    assert!((def.interference_strength() - expected).abs() < 1e-6);
}

#[test]
fn instruction_per_level() {
    assert_eq!(level_definition(1).instruction, Instruction::MatchSine);
    assert_eq!(level_definition(2).instruction, Instruction::MatchSquare);
    assert_eq!(level_definition(3).instruction, Instruction::TryCombinations);
    assert_eq!(level_definition(4).instruction, Instruction::FinalChallenge);
    assert!(Instruction::MatchSine.text().contains("90%"));
}

#[test]
fn slider_ranges_clamp() {
    assert_eq!(SliderRange::FREQUENCY.clamp(20.0), FREQUENCY_MAX);
    assert_eq!(SliderRange::FREQUENCY.clamp(0.0), FREQUENCY_MIN);
    assert_eq!(SliderRange::AMPLITUDE.clamp(1.0), 1.0);
    assert_eq!(SliderRange::AMPLITUDE.clamp(f32::NAN), AMPLITUDE_MIN);
}

#[test]
fn every_template_is_reachable_with_the_controls() {
    for level in 1..=4 {
        let t = level_definition(level).template;
        assert!(t.frequency >= FREQUENCY_MIN && t.frequency <= FREQUENCY_MAX);
        assert!(t.amplitude >= AMPLITUDE_MIN && t.amplitude <= AMPLITUDE_MAX);
    }
}
