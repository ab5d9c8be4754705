//! Frame-driven implementation of the controller's transform applier.

use eframe::egui;
use poi_viewer::animation::{DEFAULT_DURATION, Tween};
use poi_viewer::{FadeLayer, Transform, TransformApplier};

/// Animates the image surface and the faded layers on the egui frame clock.
pub struct SurfaceAnimator {
    transform: Tween<Transform>,
    info_alpha: Tween<f32>,
    title_alpha: Tween<f32>,
}

impl Default for SurfaceAnimator {
    fn default() -> Self {
        Self {
            transform: Tween::new(Transform::IDENTITY),
            info_alpha: Tween::new(0.0),
            // the title screen is up from the first frame
            title_alpha: Tween::new(1.0),
        }
    }
}

impl SurfaceAnimator {
    /// Advances every animation. Returns `true` while anything is still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        let moving = self.transform.advance(dt);
        let info = self.info_alpha.advance(dt);
        let title = self.title_alpha.advance(dt);
        moving || info || title
    }

    pub fn is_animating(&self) -> bool {
        self.transform.is_animating()
            || self.info_alpha.is_animating()
            || self.title_alpha.is_animating()
    }

    /// Current (mid-animation) surface transform.
    pub fn transform(&self) -> Transform {
        self.transform.value()
    }

    pub fn alpha(&self, layer: FadeLayer) -> f32 {
        self.fade(layer).value()
    }

    /// A layer stays hit-testable until it has fully faded out.
    pub fn is_shown(&self, layer: FadeLayer) -> bool {
        self.alpha(layer) > 0.0
    }

    /// Live surface rect in window coordinates.
    pub fn surface_rect(&self, window_size: egui::Vec2, surface_size: egui::Vec2) -> egui::Rect {
        let window_rect = egui::Rect::from_min_size(egui::Pos2::ZERO, window_size);
        self.transform().surface_rect(window_rect, surface_size)
    }

    fn fade(&self, layer: FadeLayer) -> &Tween<f32> {
        match layer {
            FadeLayer::InfoOverlay => &self.info_alpha,
            FadeLayer::TitleScreen => &self.title_alpha,
        }
    }

    fn fade_mut(&mut self, layer: FadeLayer) -> &mut Tween<f32> {
        match layer {
            FadeLayer::InfoOverlay => &mut self.info_alpha,
            FadeLayer::TitleScreen => &mut self.title_alpha,
        }
    }
}

impl TransformApplier for SurfaceAnimator {
    fn apply(&mut self, translation: egui::Vec2, scale: f32) {
        self.transform
            .retarget(Transform { translation, scale }, DEFAULT_DURATION);
    }

    fn set_alpha(&mut self, layer: FadeLayer, alpha: f32, duration: f32) {
        self.fade_mut(layer).retarget(alpha.clamp(0.0, 1.0), duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_hides_layer_when_done() {
        let mut animator = SurfaceAnimator::default();
        assert!(animator.is_shown(FadeLayer::TitleScreen));
        assert!(!animator.is_shown(FadeLayer::InfoOverlay));

        animator.set_alpha(FadeLayer::TitleScreen, 0.0, 0.5);
        animator.tick(0.25);
        assert!(animator.is_shown(FadeLayer::TitleScreen));

        assert!(!animator.tick(0.5));
        assert!(!animator.is_shown(FadeLayer::TitleScreen));
    }

    #[test]
    fn test_apply_animates_surface() {
        let mut animator = SurfaceAnimator::default();
        animator.apply(egui::vec2(100.0, 0.0), 2.0);
        assert!(animator.is_animating());
        assert_eq!(animator.transform(), Transform::IDENTITY);

        animator.tick(DEFAULT_DURATION);
        assert_eq!(
            animator.transform(),
            Transform {
                translation: egui::vec2(100.0, 0.0),
                scale: 2.0,
            }
        );
    }
}
