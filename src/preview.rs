//! CPU reference for the color the bundled fragment shader writes.

use std::f32::consts::PI;

/// Seconds per full cycle of the blue channel.
pub const PERIOD_SECS: f32 = 10.0;

/// Surface-space coordinates normalised to `0..=1`.
pub fn uv(frag_coord: (f32, f32), resolution: (u32, u32)) -> (f32, f32) {
    (
        frag_coord.0 / resolution.0 as f32,
        frag_coord.1 / resolution.1 as f32,
    )
}

pub fn time_factor(time: f32) -> f32 {
    (2.0 * PI * time / PERIOD_SECS).cos()
}

/// RGBA for the pixel at `frag_coord` (pixel centres sit on `.5`).
pub fn shade(frag_coord: (f32, f32), resolution: (u32, u32), time: f32) -> [f32; 4] {
    let (u, v) = uv(frag_coord, resolution);
    [u, v, 0.5 + 0.5 * time_factor(time), 1.0]
}
