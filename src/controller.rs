//! View controller: ambient panning, zoom-to-point and the info overlay.
//!
//! All coordinates handled here are window-relative pixels, with the window
//! spanning `(0, 0)` to `window_size`.

use crate::highlight::proximity_opacity;
use crate::transform::{self, Transform};
use crate::viewport::{self, ClampAxis};
use crate::{PointOfInterest, SceneError};
use eframe::egui;

/// Fade duration of the info overlay, in seconds.
pub const INFO_FADE_DURATION: f32 = 0.2;

/// Fade duration of the title screen, in seconds.
pub const TITLE_FADE_DURATION: f32 = 0.5;

/// Layers whose visibility is faded in and out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FadeLayer {
    InfoOverlay,
    TitleScreen,
}

/// Receives the visual changes requested by the controller.
///
/// Implementations animate towards the requested values on their own clock;
/// the controller never reads anything back.
pub trait TransformApplier {
    /// Animates the image surface to `translation` and uniform `scale`.
    fn apply(&mut self, translation: egui::Vec2, scale: f32);

    /// Fades `layer` to `alpha` over `duration` seconds.
    fn set_alpha(&mut self, layer: FadeLayer, alpha: f32, duration: f32);
}

/// Runtime state of a point-of-interest marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// Normalized image coordinates
    pub position: egui::Vec2,
    /// Zoom used when the point is selected
    pub zoom: f32,
    /// Current marker opacity in `[0, 1]`
    pub opacity: f32,
}

impl Marker {
    pub fn from_point(point: &PointOfInterest) -> Result<Self, SceneError> {
        Ok(Self {
            position: point.image_position()?,
            zoom: point.effective_zoom(),
            opacity: 0.0,
        })
    }

    /// Where the marker currently sits on screen, given the live surface rect.
    pub fn screen_position(&self, surface_rect: egui::Rect) -> egui::Pos2 {
        surface_rect.min + self.position * surface_rect.size()
    }
}

pub struct ViewController<A> {
    applier: A,
    markers: Vec<Marker>,
    image_size: egui::Vec2,
    window_size: egui::Vec2,
    surface_size: egui::Vec2,
    clamp_axis: ClampAxis,
    pan_locked: bool,
    overlay_visible: bool,
    title_visible: bool,
    last_cursor: egui::Pos2,
    info_slot: Option<usize>,
}

impl<A: TransformApplier> ViewController<A> {
    pub fn new(applier: A, points: &[PointOfInterest]) -> Result<Self, SceneError> {
        let markers = points
            .iter()
            .map(Marker::from_point)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            applier,
            markers,
            image_size: egui::Vec2::ZERO,
            window_size: egui::Vec2::ZERO,
            surface_size: egui::Vec2::ZERO,
            clamp_axis: ClampAxis::default(),
            pan_locked: false,
            overlay_visible: false,
            title_visible: true,
            last_cursor: egui::Pos2::ZERO,
            info_slot: None,
        })
    }

    pub fn applier(&self) -> &A {
        &self.applier
    }

    pub fn applier_mut(&mut self) -> &mut A {
        &mut self.applier
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn pan_locked(&self) -> bool {
        self.pan_locked
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn title_visible(&self) -> bool {
        self.title_visible
    }

    pub fn last_cursor(&self) -> egui::Pos2 {
        self.last_cursor
    }

    pub fn clamp_axis(&self) -> ClampAxis {
        self.clamp_axis
    }

    /// Rendered (unscaled) size of the image surface.
    pub fn surface_size(&self) -> egui::Vec2 {
        self.surface_size
    }

    pub fn window_size(&self) -> egui::Vec2 {
        self.window_size
    }

    /// Index of the point whose detail content fills the overlay.
    ///
    /// Kept after the overlay closes so the content stays put while fading out.
    pub fn info_slot(&self) -> Option<usize> {
        self.info_slot
    }

    fn window_center(&self) -> egui::Pos2 {
        (self.window_size / 2.0).to_pos2()
    }

    // ------------------------------------------------------------------------
    // Event entry points
    // ------------------------------------------------------------------------

    /// Initial setup once the window and image sizes are known.
    ///
    /// The title screen counts as an open overlay until dismissed.
    pub fn on_load(&mut self, window_size: egui::Vec2, image_size: egui::Vec2) {
        self.image_size = image_size;
        self.resize(window_size);
        self.reset_marker_opacities();
        self.pan_with_cursor(self.window_center());

        self.pan_locked = true;
        self.overlay_visible = true;
        self.title_visible = true;
    }

    /// Cursor movement: drives panning and the marker glow.
    pub fn on_pointer_moved(&mut self, cursor: egui::Pos2, surface_rect: egui::Rect) {
        self.pan_with_cursor(cursor);
        self.animate_poi_opacity(cursor, surface_rect);
    }

    /// Window resize: re-clamps and re-centers the ambient pan.
    pub fn on_resize(&mut self, window_size: egui::Vec2) {
        if window_size.x <= 0.0 || window_size.y <= 0.0 {
            log::debug!("Ignoring resize to an empty window");
            return;
        }

        self.resize(window_size);
        self.pan_with_cursor(self.window_center());
    }

    // ------------------------------------------------------------------------
    // Viewport sizing and panning
    // ------------------------------------------------------------------------

    pub fn resize(&mut self, window_size: egui::Vec2) {
        self.window_size = window_size;
        self.clamp_axis = viewport::clamp_axis(self.image_size, window_size);
        self.surface_size = viewport::surface_size(self.image_size, window_size, self.clamp_axis);

        log::debug!(
            "Resized to {:.0}x{:.0}, clamping {:?}",
            window_size.x,
            window_size.y,
            self.clamp_axis
        );
    }

    /// Parallax pan following the cursor. The position is recorded even while
    /// panning is locked so it can resume from there.
    pub fn pan_with_cursor(&mut self, cursor: egui::Pos2) {
        self.last_cursor = cursor;

        if self.pan_locked {
            return;
        }

        let uv = cursor.to_vec2() / self.window_size;
        self.zoom_towards(uv, 1.0, uv);
    }

    /// Brings `image_uv` under the window point `focus_uv` at `zoom`.
    pub fn zoom_towards(&mut self, image_uv: egui::Vec2, zoom: f32, focus_uv: egui::Vec2) {
        let Transform { translation, scale } =
            transform::zoom_towards(self.surface_size, self.window_size, image_uv, zoom, focus_uv);
        self.applier.apply(translation, scale);
    }

    // ------------------------------------------------------------------------
    // Marker glow
    // ------------------------------------------------------------------------

    pub fn animate_poi_opacity(&mut self, cursor: egui::Pos2, surface_rect: egui::Rect) {
        let overlay_visible = self.overlay_visible;

        for marker in &mut self.markers {
            if overlay_visible {
                marker.opacity = 0.0;
                continue;
            }

            let distance = marker.screen_position(surface_rect).distance(cursor);
            marker.opacity = proximity_opacity(distance);
        }
    }

    pub fn reset_marker_opacities(&mut self) {
        for marker in &mut self.markers {
            marker.opacity = 0.0;
        }
    }

    // ------------------------------------------------------------------------
    // Info overlay
    // ------------------------------------------------------------------------

    /// Opens the overlay for the point at `index` and zooms onto it, centered
    /// in `view_frame` (window pixels).
    pub fn show_point_info(&mut self, index: usize, view_frame: egui::Rect) {
        let Some(marker) = self.markers.get(index).copied() else {
            log::warn!("Ignoring request for unknown point of interest {index}");
            return;
        };

        self.info_slot = Some(index);
        self.overlay_visible = true;
        self.applier
            .set_alpha(FadeLayer::InfoOverlay, 1.0, INFO_FADE_DURATION);

        let focal_uv = view_frame.center().to_vec2() / self.window_size;

        self.pan_locked = true;
        self.zoom_towards(marker.position, marker.zoom, focal_uv);

        self.reset_marker_opacities();

        log::debug!("Opened point of interest {index} at zoom {}", marker.zoom);
    }

    /// Closes the overlay and resumes panning from the last cursor position.
    pub fn hide_point_info(&mut self) {
        if !self.overlay_visible {
            return;
        }

        self.overlay_visible = false;
        self.applier
            .set_alpha(FadeLayer::InfoOverlay, 0.0, INFO_FADE_DURATION);

        self.pan_locked = false;
        self.pan_with_cursor(self.last_cursor);

        log::debug!("Closed info overlay");
    }

    /// Click on the overlay container. Clicks inside the content card stop there.
    pub fn handle_overlay_click(&mut self, inside_content: bool) {
        if inside_content {
            return;
        }
        self.hide_point_info();
    }

    /// One-shot dismissal of the title screen.
    ///
    /// Clears the flags directly rather than going through
    /// [`Self::hide_point_info`], so the view does not re-pan until the
    /// cursor moves.
    pub fn dismiss_title(&mut self) {
        if !self.title_visible {
            return;
        }

        self.title_visible = false;
        self.applier
            .set_alpha(FadeLayer::TitleScreen, 0.0, TITLE_FADE_DURATION);

        self.pan_locked = false;
        self.overlay_visible = false;

        log::info!("Title screen dismissed");
    }
}
