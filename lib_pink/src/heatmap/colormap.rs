pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

// (position, intensity) control points of the jet map.
const RED: [(f32, f32); 5] = [(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)];
const GREEN: [(f32, f32); 6] = [
    (0.0, 0.0),
    (0.125, 0.0),
    (0.375, 1.0),
    (0.64, 1.0),
    (0.91, 0.0),
    (1.0, 0.0),
];
const BLUE: [(f32, f32); 5] = [(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)];

fn channel(points: &[(f32, f32)], t: f32) -> u8 {
    let mut intensity = points[points.len() - 1].1;
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if t <= x1 {
            intensity = y0 + (y1 - y0) * (t - x0) / (x1 - x0);
            break;
        }
    }
    (intensity * 255.0).round() as u8
}

/// Jet colour for `t` in `[0, 1]`, dark blue through cyan, yellow to dark red.
/// `t` outside the range is clamped.
pub fn jet(t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    [channel(&RED, t), channel(&GREEN, t), channel(&BLUE, t), 255]
}
