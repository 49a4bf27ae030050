// Shared tuning constants used by the core and the native front-end.

// Scoring
pub const MATCH_TOLERANCE: f32 = 0.1; // fraction of the template's own magnitude
pub const TOLERANCE_EPSILON: f32 = 1e-6; // floor for the tolerance denominator
pub const WIN_THRESHOLD: f32 = 0.9; // score needed to lock the signal
pub const CLOSE_THRESHOLD: f32 = 0.7; // readout turns from "far" to "close"

// Levels
pub const MAX_TEMPLATE_LEVEL: i32 = 4; // levels beyond this reuse the last template
pub const NOISE_MULTIPLIER_PER_LEVEL: f32 = 4.75; // 1x on level 1, ~20x on level 5
pub const BASE_INTERFERENCE_STRENGTH: f32 = 0.05;

// Control bounds
pub const FREQUENCY_MIN: f32 = 0.5;
pub const FREQUENCY_MAX: f32 = 10.0;
pub const AMPLITUDE_MIN: f32 = 0.1;
pub const AMPLITUDE_MAX: f32 = 2.0;

// Win choreography (seconds)
pub const TRACE_FADE_SEC: f32 = 1.0;
pub const WIN_COMPLETE_DELAY_SEC: f32 = 4.0; // message + fade stay on screen this long
pub const TYPEWRITER_CHAR_SEC: f32 = 0.05;
pub const BLINK_INTERVAL_SEC: f32 = 0.5;
pub const WIN_MESSAGE: &str = "SIGNAL LOCKED // UPLINK ESTABLISHED";

// Feedback tone
pub const CARRIER_MIN_HZ: f32 = 200.0; // far from a match
pub const CARRIER_MAX_HZ: f32 = 700.0; // close to a match
pub const WOBBLE_MIN_HZ: f32 = 2.0;
pub const WOBBLE_MAX_HZ: f32 = 10.0;
pub const WOBBLE_DEPTH: f32 = 0.02; // fraction of the carrier frequency
pub const AUDIO_FADE_OUT_SEC: f32 = 0.5;
