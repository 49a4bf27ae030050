use glam::Vec2;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RibbonVertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

/// Expand a polyline into a triangle-list ribbon of the given width, shifted
/// vertically by `y_offset`. Invisible strokes emit nothing.
pub fn push_ribbon(
    points: &[Vec2],
    y_offset: f32,
    width: f32,
    color: [f32; 4],
    out: &mut Vec<RibbonVertex>,
) {
    if points.len() < 2 || width <= 0.0 || color[3] <= 0.0 {
        return;
    }
    let half = width * 0.5;
    let shift = Vec2::new(0.0, y_offset);
    out.reserve((points.len() - 1) * 6);
    for seg in points.windows(2) {
        let a = seg[0] + shift;
        let b = seg[1] + shift;
        let n = (b - a).normalize_or_zero().perp() * half;
        let quad = [a + n, a - n, b + n, b + n, a - n, b - n];
        out.extend(quad.iter().map(|p| RibbonVertex {
            pos: p.to_array(),
            color,
        }));
    }
}

#[inline]
pub fn stroke_color(rgb: [f32; 3], alpha: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], alpha.clamp(0.0, 1.0)]
}
