// Host-side tests for match scoring and readout formatting.

use shortwave_core::*;

fn sine(frequency: f32, amplitude: f32) -> WaveDescriptor {
    WaveDescriptor::new(frequency, amplitude, WaveKind::Sine, 0.0)
}

#[test]
fn exact_match_scores_one() {
    let template = sine(2.0, 1.0);
    assert_eq!(score_match(&template, &template), 1.0);

    let square = WaveDescriptor::new(4.5, 1.5, WaveKind::Square, 0.3);
    assert_eq!(score_match(&square, &square), 1.0);
}

#[test]
fn wrong_kind_never_scores() {
    let template = WaveDescriptor::new(3.0, 1.2, WaveKind::Square, 0.0);
    for freq in [0.5_f32, 1.0, 3.0, 7.5, 10.0] {
        for amp in [0.1_f32, 0.5, 1.2, 2.0] {
            let player = sine(freq, amp);
            assert_eq!(score_match(&player, &template), 0.0, "f={freq} a={amp}");
        }
    }
}

#[test]
fn tolerance_boundary_zeroes_frequency_component() {
    let template = sine(2.0, 1.0);
    let player = sine(2.2, 1.0);
    let score = score_match(&player, &template);
    assert!((score - 0.5).abs() < 1e-6, "expected 0.5, got {score}");
}

#[test]
fn half_tolerance_gives_three_quarters() {
    // freq off by 5% of template (half the tolerance), amplitude exact
    let template = sine(4.0, 1.0);
    let player = sine(4.2, 1.0);
    let score = score_match(&player, &template);
    assert!((score - 0.75).abs() < 1e-4, "got {score}");
}

#[test]
fn tolerance_follows_template_scale() {
    // same absolute error, larger template -> more forgiving
    let small = sine(2.0, 1.0);
    let large = sine(8.0, 1.0);
    let s_small = score_match(&sine(2.1, 1.0), &small);
    let s_large = score_match(&sine(8.1, 1.0), &large);
    assert!(s_large > s_small);
}

#[test]
fn phase_is_ignored() {
    let template = WaveDescriptor::new(5.0, 0.8, WaveKind::Sine, std::f32::consts::FRAC_PI_4);
    let player = WaveDescriptor::new(5.0, 0.8, WaveKind::Sine, 0.0);
    assert_eq!(score_match(&player, &template), 1.0);
}

#[test]
fn score_stays_in_unit_range() {
    let template = sine(3.0, 1.2);
    let mut f = 0.5_f32;
    while f <= 10.0 {
        let mut a = 0.1_f32;
        while a <= 2.0 {
            let s = score_match(&sine(f, a), &template);
            assert!((0.0..=1.0).contains(&s), "score {s} out of range at f={f} a={a}");
            if s == 1.0 {
                assert_eq!((f, a), (3.0, 1.2));
            }
            a += 0.07;
        }
        f += 0.13;
    }
}

#[test]
fn degenerate_template_does_not_divide_by_zero() {
    let template = sine(0.0, 0.0);
    let s = score_match(&sine(1.0, 1.0), &template);
    assert!(s.is_finite());
    assert_eq!(s, 0.0);
    assert_eq!(score_match(&template, &template), 1.0);
}

#[test]
fn initial_level_one_score_is_zero() {
    let def = level_definition(1);
    let s = score_match(&def.initial_player, &def.template);
    assert_eq!(s, 0.0);
}

#[test]
fn readout_formatting_and_bands() {
    assert_eq!(format_match(0.0), "Match: 0.0%");
    assert_eq!(format_match(0.5), "Match: 50.0%");
    assert_eq!(format_match(1.0), "Match: 100.0%");

    assert_eq!(MatchBand::for_score(0.95, 0.9, 0.7), MatchBand::Locked);
    assert_eq!(MatchBand::for_score(0.9, 0.9, 0.7), MatchBand::Locked);
    assert_eq!(MatchBand::for_score(0.75, 0.9, 0.7), MatchBand::Close);
    assert_eq!(MatchBand::for_score(0.2, 0.9, 0.7), MatchBand::Far);
}

#[test]
fn bands_colour_green_yellow_red() {
    let [_, g_locked, b_locked] = MatchBand::Locked.color_rgb();
    assert_eq!((g_locked, b_locked), (1.0, 0.0));
    let [r, g, _] = MatchBand::Close.color_rgb();
    assert!(r > 0.9 && g > 0.9, "close is yellow");
    assert_eq!(MatchBand::Far.color_rgb(), [1.0, 0.0, 0.0]);
}
