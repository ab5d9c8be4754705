//! Fire-and-forget eased tweens used to animate the surface and fades.

use crate::transform::Transform;
use eframe::egui;

/// Duration used when a request does not specify one.
pub const DEFAULT_DURATION: f32 = 0.5;

/// Quadratic ease-out (`power1.out`).
pub fn ease_out(t: f32) -> f32 {
    egui::emath::easing::quadratic_out(t.clamp(0.0, 1.0))
}

/// Linear interpolation between two values.
pub trait Lerp: Copy {
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for egui::Vec2 {
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Transform {
    fn lerp(self, other: Self, t: f32) -> Self {
        Transform {
            translation: self.translation.lerp(other.translation, t),
            scale: self.scale.lerp(other.scale, t),
        }
    }
}

/// An eased interpolation towards a target that can be retargeted mid-flight.
///
/// Retargeting starts a fresh tween from the current value, so rapid requests
/// supersede each other instead of queueing.
#[derive(Debug, Clone)]
pub struct Tween<T> {
    from: T,
    to: T,
    value: T,
    elapsed: f32,
    duration: f32,
}

impl<T: Lerp> Tween<T> {
    /// A tween at rest on `value`.
    pub fn new(value: T) -> Self {
        Self {
            from: value,
            to: value,
            value,
            elapsed: 0.0,
            duration: 0.0,
        }
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn target(&self) -> T {
        self.to
    }

    pub fn is_animating(&self) -> bool {
        self.elapsed < self.duration
    }

    /// Starts animating from the current value towards `to`.
    pub fn retarget(&mut self, to: T, duration: f32) {
        self.from = self.value;
        self.to = to;
        self.elapsed = 0.0;
        self.duration = duration.max(0.0);

        if self.duration == 0.0 {
            self.value = to;
        }
    }

    /// Advances the tween by `dt` seconds. Returns `true` while still animating.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.is_animating() {
            return false;
        }

        self.elapsed = (self.elapsed + dt).min(self.duration);
        let t = ease_out(self.elapsed / self.duration);
        self.value = self.from.lerp(self.to, t);

        if !self.is_animating() {
            self.value = self.to;
        }
        self.is_animating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_endpoints() {
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        assert_eq!(ease_out(0.5), 0.75);
        assert_eq!(ease_out(2.0), 1.0);
    }

    #[test]
    fn test_tween_reaches_target() {
        let mut tween = Tween::new(0.0_f32);
        tween.retarget(1.0, 0.2);
        assert!(tween.is_animating());

        assert!(tween.advance(0.1));
        assert!(tween.value() > 0.5 && tween.value() < 1.0);

        assert!(!tween.advance(0.2));
        assert_eq!(tween.value(), 1.0);
        assert!(!tween.advance(0.1));
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let mut tween = Tween::new(0.0_f32);
        tween.retarget(10.0, DEFAULT_DURATION);
        tween.advance(0.25);
        let midway = tween.value();

        tween.retarget(-10.0, DEFAULT_DURATION);
        assert_eq!(tween.value(), midway);
        assert_eq!(tween.target(), -10.0);

        tween.advance(DEFAULT_DURATION);
        assert_eq!(tween.value(), -10.0);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut tween = Tween::new(Transform::IDENTITY);
        let target = Transform {
            translation: egui::vec2(5.0, -5.0),
            scale: 2.0,
        };
        tween.retarget(target, 0.0);
        assert_eq!(tween.value(), target);
        assert!(!tween.is_animating());
    }
}
