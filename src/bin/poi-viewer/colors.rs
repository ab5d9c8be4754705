//! Color constants for markers, the info overlay and the title screen.

use eframe::egui::Color32;

// Point-of-interest markers
pub const MARKER_FILL: Color32 = Color32::from_rgb(255, 214, 102);
pub const MARKER_STROKE: Color32 = Color32::from_rgb(255, 255, 255);
pub const MARKER_GLOW: Color32 = Color32::from_rgba_premultiplied(90, 75, 36, 90);
pub const MARKER_LABEL: Color32 = Color32::from_rgba_premultiplied(230, 230, 230, 230);
pub const MARKER_LABEL_SHADOW: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 180);

// Info overlay
pub const OVERLAY_BACKDROP: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 110);
pub const INFO_CARD_FILL: Color32 = Color32::from_rgba_premultiplied(20, 24, 38, 235);
pub const INFO_CARD_STROKE: Color32 = Color32::from_rgb(255, 214, 102);
pub const INFO_HEADING: Color32 = Color32::from_rgb(255, 236, 179);
pub const INFO_TEXT: Color32 = Color32::from_rgb(225, 228, 235);

// Title screen
pub const TITLE_FILL: Color32 = Color32::from_rgba_premultiplied(10, 12, 24, 240);
pub const TITLE_TEXT: Color32 = Color32::WHITE;
pub const TITLE_SUBTITLE: Color32 = Color32::from_rgb(200, 200, 215);
pub const TITLE_HINT: Color32 = Color32::from_rgb(255, 214, 102);
