//! Aspect-ratio clamping of the image surface against the window.

use eframe::egui;

/// Which window dimension the image surface is scaled to match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClampAxis {
    /// Surface width equals the window width; height overflows.
    #[default]
    Width,
    /// Surface height equals the window height; width overflows.
    Height,
}

/// Picks the clamp axis so the surface fills the window without distortion.
pub fn clamp_axis(surface_size: egui::Vec2, window_size: egui::Vec2) -> ClampAxis {
    let image_ratio = surface_size.x / surface_size.y;
    let window_ratio = window_size.x / window_size.y;

    if window_ratio < image_ratio {
        // window is too slim for the image
        ClampAxis::Height
    } else {
        ClampAxis::Width
    }
}

/// Rendered (unscaled) size of the surface under the given clamp mode.
pub fn surface_size(image_size: egui::Vec2, window_size: egui::Vec2, axis: ClampAxis) -> egui::Vec2 {
    let image_ratio = image_size.x / image_size.y;
    match axis {
        ClampAxis::Height => egui::vec2(window_size.y * image_ratio, window_size.y),
        ClampAxis::Width => egui::vec2(window_size.x, window_size.x / image_ratio),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slim_window_clamps_height() {
        let axis = clamp_axis(egui::vec2(2000.0, 1000.0), egui::vec2(1000.0, 800.0));
        assert_eq!(axis, ClampAxis::Height);
    }

    #[test]
    fn test_wide_window_clamps_width() {
        let axis = clamp_axis(egui::vec2(2000.0, 1000.0), egui::vec2(2400.0, 800.0));
        assert_eq!(axis, ClampAxis::Width);

        // equal ratios clamp width
        let axis = clamp_axis(egui::vec2(2000.0, 1000.0), egui::vec2(1600.0, 800.0));
        assert_eq!(axis, ClampAxis::Width);
    }

    #[test]
    fn test_surface_always_covers_window() {
        let image = egui::vec2(2000.0, 1000.0);
        for window in [egui::vec2(1000.0, 800.0), egui::vec2(2400.0, 800.0)] {
            let axis = clamp_axis(image, window);
            let surface = surface_size(image, window, axis);
            assert!(surface.x >= window.x - 0.01);
            assert!(surface.y >= window.y - 0.01);
        }

        let surface = surface_size(image, egui::vec2(1000.0, 800.0), ClampAxis::Height);
        assert_eq!(surface, egui::vec2(1600.0, 800.0));
    }
}
