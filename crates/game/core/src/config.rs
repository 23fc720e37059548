/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Edge length of one tile in pixels.
    pub tile_size: u32,
    /// Seconds a threat must stay visible before Detecting escalates to Engaging.
    pub detection_threshold: f32,
    /// Seconds spent Searching without a sighting before giving up.
    pub search_timeout: f32,
    /// Safety bound on ray traversal, in tiles.
    pub max_sight_distance: u32,
    /// Default vision radius, in pixels.
    pub vision_range: f32,
    /// Default field of view, in degrees (symmetric about the facing).
    pub vision_angle: f32,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TILE_SIZE: u32 = 16;
    pub const DEFAULT_DETECTION_THRESHOLD: f32 = 2.0;
    pub const DEFAULT_SEARCH_TIMEOUT: f32 = 5.0;
    pub const DEFAULT_MAX_SIGHT_DISTANCE: u32 = 64;
    pub const DEFAULT_VISION_RANGE: f32 = 80.0;
    pub const DEFAULT_VISION_ANGLE: f32 = 180.0;

    pub fn new() -> Self {
        Self {
            tile_size: Self::DEFAULT_TILE_SIZE,
            detection_threshold: Self::DEFAULT_DETECTION_THRESHOLD,
            search_timeout: Self::DEFAULT_SEARCH_TIMEOUT,
            max_sight_distance: Self::DEFAULT_MAX_SIGHT_DISTANCE,
            vision_range: Self::DEFAULT_VISION_RANGE,
            vision_angle: Self::DEFAULT_VISION_ANGLE,
        }
    }

    pub fn with_tile_size(tile_size: u32) -> Self {
        Self {
            tile_size,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
