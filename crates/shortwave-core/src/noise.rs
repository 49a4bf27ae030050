//! Coherent 2D gradient noise (Perlin style) in [0, 1].
//!
//! Lattice gradients come from an integer hash instead of a permutation
//! table, so the function is pure and needs no setup.

#[inline]
fn hash(ix: i32, iy: i32) -> u32 {
    let mut h = (ix as u32).wrapping_mul(0x8DA6_B343) ^ (iy as u32).wrapping_mul(0xD816_3841);
    // xorshift32 mix
    h ^= h << 13;
    h ^= h >> 17;
    h ^= h << 5;
    h = h.wrapping_mul(0x2C1B_3C6D);
    h ^ (h >> 15)
}

#[inline]
fn gradient_dot(h: u32, dx: f32, dy: f32) -> f32 {
    match h & 7 {
        0 => dx + dy,
        1 => -dx + dy,
        2 => dx - dy,
        3 => -dx - dy,
        4 => dx,
        5 => -dx,
        6 => dy,
        _ => -dy,
    }
}

#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Signed gradient noise, roughly in [-1, 1] and exactly 0 on lattice points.
pub fn gradient_noise(x: f32, y: f32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let ix = x0 as i32;
    let iy = y0 as i32;

    let n00 = gradient_dot(hash(ix, iy), fx, fy);
    let n10 = gradient_dot(hash(ix.wrapping_add(1), iy), fx - 1.0, fy);
    let n01 = gradient_dot(hash(ix, iy.wrapping_add(1)), fx, fy - 1.0);
    let n11 = gradient_dot(
        hash(ix.wrapping_add(1), iy.wrapping_add(1)),
        fx - 1.0,
        fy - 1.0,
    );

    let u = fade(fx);
    let v = fade(fy);
    lerp(lerp(n00, n10, u), lerp(n01, n11, u), v)
}

/// Noise remapped to [0, 1], centred on 0.5.
pub fn noise2d(x: f32, y: f32) -> f32 {
    if !x.is_finite() || !y.is_finite() {
        return 0.5;
    }
    ((gradient_noise(x, y) + 1.0) * 0.5).clamp(0.0, 1.0)
}
