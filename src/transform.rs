//! Translation + scale of the image surface.
//!
//! The surface is centered in the window at the identity transform and scales
//! about its own center, so a translation of `corner` on an axis puts the
//! scaled surface's edge exactly on the window edge.

use eframe::egui;

/// Translation and uniform scale applied to the image surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: egui::Vec2,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: egui::Vec2::ZERO,
        scale: 1.0,
    };

    /// On-screen rectangle of a surface of `surface_size` under this transform.
    pub fn surface_rect(&self, window_rect: egui::Rect, surface_size: egui::Vec2) -> egui::Rect {
        egui::Rect::from_center_size(
            window_rect.center() + self.translation,
            surface_size * self.scale,
        )
    }
}

/// Half the overflow of the scaled surface beyond the window on each axis.
pub fn corner(surface_size: egui::Vec2, window_size: egui::Vec2, zoom: f32) -> egui::Vec2 {
    (surface_size * zoom - window_size) / 2.0
}

/// Computes the transform that brings `image_uv` under the window point
/// `focus_uv` at `zoom`, clamped so the surface never uncovers the window.
///
/// An axis where the scaled surface is smaller than the window gets no
/// translation, leaving the surface centered.
pub fn zoom_towards(
    surface_size: egui::Vec2,
    window_size: egui::Vec2,
    image_uv: egui::Vec2,
    zoom: f32,
    focus_uv: egui::Vec2,
) -> Transform {
    let focus = window_size * focus_uv;
    let corner = corner(surface_size, window_size, zoom);
    let canvas = image_uv * surface_size * zoom;

    let disp = focus + corner - canvas;

    let limit = corner.max(egui::Vec2::ZERO);
    let translation = egui::vec2(
        disp.x.clamp(-limit.x, limit.x),
        disp.y.clamp(-limit.y, limit.y),
    );

    Transform {
        translation,
        scale: zoom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: egui::Vec2 = egui::vec2(1000.0, 800.0);
    const SURFACE: egui::Vec2 = egui::vec2(1600.0, 800.0);

    #[test]
    fn test_center_at_zoom_one_is_identity() {
        let t = zoom_towards(SURFACE, WINDOW, egui::vec2(0.5, 0.5), 1.0, egui::vec2(0.5, 0.5));
        assert_eq!(t.translation, egui::Vec2::ZERO);
        assert_eq!(t.scale, 1.0);

        for surface in [egui::vec2(1234.5, 987.0), egui::vec2(3000.0, 1100.0)] {
            let t = zoom_towards(surface, WINDOW, egui::vec2(0.5, 0.5), 1.0, egui::vec2(0.5, 0.5));
            assert!(t.translation.length() < 1e-3, "{:?}", t.translation);
        }
    }

    #[test]
    fn test_translation_stays_within_corner() {
        let zooms = [0.5, 1.0, 1.5, 2.0, 4.0];
        let coords = [-0.5, 0.0, 0.1, 0.5, 0.9, 1.0, 1.5];

        for &zoom in &zooms {
            let limit = corner(SURFACE, WINDOW, zoom).max(egui::Vec2::ZERO);
            for &u in &coords {
                for &f in &coords {
                    let t = zoom_towards(SURFACE, WINDOW, egui::vec2(u, 1.0 - u), zoom, egui::vec2(f, f));
                    assert!(t.translation.x.abs() <= limit.x + 1e-3);
                    assert!(t.translation.y.abs() <= limit.y + 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_pans_as_far_as_it_can() {
        // cursor at the top-left corner pins the surface's top-left edge
        let t = zoom_towards(SURFACE, WINDOW, egui::vec2(0.0, 0.0), 1.0, egui::vec2(0.0, 0.0));
        assert_eq!(t.translation, egui::vec2(300.0, 0.0));

        let rect = t.surface_rect(egui::Rect::from_min_size(egui::Pos2::ZERO, WINDOW), SURFACE);
        assert_eq!(rect.min, egui::Pos2::ZERO);
    }

    #[test]
    fn test_undersized_surface_is_centered() {
        let t = zoom_towards(SURFACE, WINDOW, egui::vec2(0.1, 0.9), 0.5, egui::vec2(0.3, 0.7));
        assert_eq!(t.translation, egui::Vec2::ZERO);
        assert_eq!(t.scale, 0.5);
    }

    #[test]
    fn test_target_lands_on_focus_when_unclamped() {
        let window_rect = egui::Rect::from_min_size(egui::Pos2::ZERO, WINDOW);
        let image_uv = egui::vec2(0.5, 0.5);
        let focus_uv = egui::vec2(0.6, 0.5);
        let t = zoom_towards(SURFACE, WINDOW, image_uv, 2.0, focus_uv);

        let rect = t.surface_rect(window_rect, SURFACE);
        let on_screen = rect.min + image_uv * rect.size();
        assert!((on_screen - egui::pos2(600.0, 400.0)).length() < 1e-3);
    }
}
