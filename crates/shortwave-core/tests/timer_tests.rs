// Host-side tests for tick-driven timers and the console text effect.

use shortwave_core::timer::{DelayTimer, FadeRamp};
use shortwave_core::ConsoleText;

#[test]
fn delay_timer_fires_once_at_deadline() {
    let mut t = DelayTimer::default();
    assert!(!t.advance(10.0), "unarmed timer never fires");
    t.arm(1.0);
    assert!(!t.advance(0.4));
    assert!(!t.advance(0.4));
    assert!(t.advance(0.4));
    assert!(!t.is_armed());
    assert!(!t.advance(5.0));
}

#[test]
fn cancelled_timer_never_fires() {
    let mut t = DelayTimer::default();
    t.arm(0.5);
    t.advance(0.3);
    t.cancel();
    assert!(!t.advance(1.0));
    assert_eq!(t.elapsed(), 0.0);
}

#[test]
fn fade_ramp_is_monotone_and_lands_on_zero() {
    let mut ramp = FadeRamp::default();
    assert_eq!(ramp.advance(0.1), None);
    ramp.begin(1.0);
    let mut last = 1.0_f32;
    let mut values = Vec::new();
    while let Some(v) = ramp.advance(1.0 / 60.0) {
        assert!(v <= last, "fade increased: {last} -> {v}");
        last = v;
        values.push(v);
    }
    assert_eq!(*values.last().unwrap(), 0.0);
    assert!(values.len() >= 59 && values.len() <= 61);
    assert!(!ramp.is_active());
}

#[test]
fn fade_ramp_midpoint() {
    let mut ramp = FadeRamp::default();
    ramp.begin(2.0);
    let v = ramp.advance(0.5).unwrap();
    assert!((v - 0.75).abs() < 1e-6);
}

#[test]
fn typewriter_reveals_then_blinks() {
    let mut text = ConsoleText::new("LOCK", 0.05, 0.5);
    assert_eq!(text.visible_text(), "");
    text.tick(0.0);
    assert_eq!(text.visible_text(), "L");
    text.tick(0.06);
    assert_eq!(text.visible_text(), "LO");
    text.tick(0.2);
    assert_eq!(text.visible_text(), "LOCK");
    assert!(text.is_typed());
    assert_eq!(text.alpha(), 1.0);

    text.tick(0.5);
    assert_eq!(text.alpha(), 0.0);
    text.tick(0.5);
    assert_eq!(text.alpha(), 1.0);
    assert_eq!(text.visible_text(), "LOCK");
}

#[test]
fn typewriter_handles_multibyte_text() {
    let mut text = ConsoleText::new("ÉTÉ", 0.1, 0.5);
    text.tick(0.15);
    assert_eq!(text.visible_text(), "ÉT");
}

#[test]
fn fade_ramp_is_zero_after_exactly_its_duration() {
    let mut ramp = FadeRamp::default();
    ramp.begin(1.0);
    let mut last = None;
    for _ in 0..60 {
        last = ramp.advance(1.0 / 60.0);
    }
    assert_eq!(last, Some(0.0), "60 frames of 1/60 s cover the full second");
    assert_eq!(ramp.value(), 0.0);
    assert!(!ramp.is_active());
}

#[test]
fn delay_timer_fires_on_the_deadline_frame() {
    let mut t = DelayTimer::default();
    t.arm(4.0);
    for frame in 1..240 {
        assert!(!t.advance(1.0 / 60.0), "fired early on frame {frame}");
    }
    assert!(t.advance(1.0 / 60.0), "should fire on frame 240");
}
