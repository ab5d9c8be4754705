/// Initial window width in pixels.
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Initial window height in pixels.
pub const DEFAULT_WINDOW_HEIGHT: f32 = 720.0;

/// Upper bound on the frame delta fed to animations, in seconds.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Radius of a point-of-interest marker.
pub const MARKER_RADIUS: f32 = 9.0;

/// Radius of the soft glow drawn around a marker.
pub const MARKER_GLOW_RADIUS: f32 = 22.0;

/// Clicks within this distance of a marker select it.
pub const MARKER_HIT_RADIUS: f32 = 16.0;

/// Gap between the info card and the window edge.
pub const INFO_CARD_MARGIN: f32 = 32.0;

/// Inner padding of the info card.
pub const INFO_CARD_PADDING: f32 = 20.0;

/// Info card width as a fraction of the window width.
pub const INFO_CARD_WIDTH_FRACTION: f32 = 0.34;

/// Lower bound on the info card width.
pub const INFO_CARD_MIN_WIDTH: f32 = 260.0;
