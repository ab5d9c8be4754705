use eframe::egui;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod animation;
pub mod controller;
pub mod highlight;
pub mod transform;
pub mod viewport;

pub use controller::{FadeLayer, TransformApplier, ViewController};
pub use transform::Transform;
pub use viewport::ClampAxis;

/// Zoom applied when a point of interest does not specify one.
pub const DEFAULT_POI_ZOOM: f32 = 2.0;

/// Errors in authored scene data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("invalid percentage '{0}'")]
    InvalidPercent(String),
    #[error("point '{name}' has invalid zoom {zoom}")]
    InvalidZoom { name: String, zoom: f32 },
    #[error("point '{name}': {source}")]
    Point {
        name: String,
        #[source]
        source: Box<SceneError>,
    },
}

/// Authored content of the viewer: the background image and its hotspots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Heading shown on the title screen
    pub title: String,
    /// Optional line under the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Call to action shown at the bottom of the title screen
    #[serde(default = "default_hint")]
    pub hint: String,
    /// Path of the background image inside the assets folder (PNG or SVG)
    pub image_path: String,
    /// Inset frame that selected points are zoomed into
    #[serde(default)]
    pub view_frame: ViewFrame,
    /// Hotspots overlaid on the image
    #[serde(default)]
    pub points: Vec<PointOfInterest>,
}

fn default_hint() -> String {
    "Click anywhere to begin".to_owned()
}

impl Scene {
    /// Checks every authored position and zoom, failing on the first bad point.
    pub fn validate(&self) -> Result<(), SceneError> {
        for point in &self.points {
            point.image_position().map_err(|source| SceneError::Point {
                name: point.name.clone(),
                source: Box::new(source),
            })?;

            let zoom = point.effective_zoom();
            if !zoom.is_finite() || zoom <= 0.0 {
                return Err(SceneError::InvalidZoom {
                    name: point.name.clone(),
                    zoom,
                });
            }
        }
        Ok(())
    }
}

/// An authored hotspot on the image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    /// Display name
    pub name: String,
    /// Horizontal position as a percentage of the image width (e.g. "42.5%")
    pub left: String,
    /// Vertical position as a percentage of the image height
    pub top: String,
    /// Zoom factor used when the point is selected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f32>,
    /// Detail content copied into the info overlay
    pub info: InfoContent,
}

impl PointOfInterest {
    /// Normalized image coordinates of the point.
    pub fn image_position(&self) -> Result<egui::Vec2, SceneError> {
        Ok(egui::vec2(parse_percent(&self.left)?, parse_percent(&self.top)?))
    }

    pub fn effective_zoom(&self) -> f32 {
        self.zoom.unwrap_or(DEFAULT_POI_ZOOM)
    }
}

/// Detail block of a point of interest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoContent {
    pub heading: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

/// Inset frame within the window, in window-normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewFrame {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for ViewFrame {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }
}

impl ViewFrame {
    /// Resolves the frame to window pixels.
    pub fn rect(&self, window_size: egui::Vec2) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(self.left * window_size.x, self.top * window_size.y),
            egui::vec2(self.width * window_size.x, self.height * window_size.y),
        )
    }
}

/// Parses a CSS-style percentage ("42.5%" or "42.5") into a fraction.
pub fn parse_percent(value: &str) -> Result<f32, SceneError> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();

    match number.parse::<f32>() {
        Ok(percent) if percent.is_finite() => Ok(percent / 100.0),
        _ => Err(SceneError::InvalidPercent(value.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(left: &str, top: &str, zoom: Option<f32>) -> PointOfInterest {
        PointOfInterest {
            name: "test".to_owned(),
            left: left.to_owned(),
            top: top.to_owned(),
            zoom,
            info: InfoContent::default(),
        }
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("50%"), Ok(0.5));
        assert_eq!(parse_percent(" 25 % "), Ok(0.25));
        assert_eq!(parse_percent("100"), Ok(1.0));
        assert!(parse_percent("abc%").is_err());
        assert!(parse_percent("").is_err());
        assert!(parse_percent("NaN%").is_err());
    }

    #[test]
    fn test_image_position() {
        let poi = point("20%", "75%", None);
        assert_eq!(poi.image_position(), Ok(egui::vec2(0.2, 0.75)));
    }

    #[test]
    fn test_zoom_defaults_to_two() {
        assert_eq!(point("0%", "0%", None).effective_zoom(), 2.0);
        assert_eq!(point("0%", "0%", Some(3.5)).effective_zoom(), 3.5);
    }

    #[test]
    fn test_view_frame_rect() {
        let frame = ViewFrame {
            left: 0.4,
            top: 0.1,
            width: 0.5,
            height: 0.8,
        };
        let rect = frame.rect(egui::vec2(1000.0, 500.0));
        assert_eq!(rect.min, egui::pos2(400.0, 50.0));
        assert_eq!(rect.size(), egui::vec2(500.0, 400.0));
    }

    #[test]
    fn test_validate_rejects_bad_points() {
        let mut scene = Scene {
            title: "t".to_owned(),
            subtitle: None,
            hint: default_hint(),
            image_path: "scene.svg".to_owned(),
            view_frame: ViewFrame::default(),
            points: vec![point("10%", "10%", None)],
        };
        assert!(scene.validate().is_ok());

        scene.points.push(point("10%", "oops", None));
        assert!(matches!(
            scene.validate(),
            Err(SceneError::Point { .. })
        ));

        scene.points.pop();
        scene.points.push(point("10%", "10%", Some(0.0)));
        assert!(matches!(
            scene.validate(),
            Err(SceneError::InvalidZoom { .. })
        ));
    }

    #[test]
    fn test_bundled_scene_is_valid() {
        let scene: Scene = ron::from_str(include_str!("../assets/scene.ron")).unwrap();
        scene.validate().unwrap();
        assert!(!scene.points.is_empty());
    }
}
