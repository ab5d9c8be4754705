//! Distance-based marker glow.

/// Distance (pixels) at or below which a marker is fully opaque.
pub const MIN_DISTANCE: f32 = 30.0;

/// Distance (pixels) at or beyond which a marker is fully transparent.
pub const MAX_DISTANCE: f32 = 100.0;

/// Maps cursor distance to marker opacity: 1 when close, 0 when far, linear in between.
pub fn proximity_opacity(distance: f32) -> f32 {
    let t = (distance - MIN_DISTANCE) / (MAX_DISTANCE - MIN_DISTANCE);
    (1.0 - t).clamp(0.0, 1.0)
}
