use serde::Deserialize;

/// Runtime tunables for a [`crate::Map`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Fraction of the map's pixel size covered by a character's active area.
    pub active_area_ratio: f32,
    /// Reject non-orthogonal or non right-down maps instead of loading them empty.
    pub strict_layout: bool,
}

impl MapConfig {
    /// Active-area fraction used unless configured otherwise.
    pub const DEFAULT_ACTIVE_AREA_RATIO: f32 = 0.3;

    /// Default ratio, lenient layout handling.
    pub fn new() -> Self {
        Self {
            active_area_ratio: Self::DEFAULT_ACTIVE_AREA_RATIO,
            strict_layout: false,
        }
    }

    /// Default config with a custom active-area fraction.
    pub fn with_active_area_ratio(active_area_ratio: f32) -> Self {
        Self {
            active_area_ratio,
            ..Self::new()
        }
    }

    /// Turns unsupported layouts into [`crate::MapError::UnsupportedLayout`].
    pub fn strict(mut self) -> Self {
        self.strict_layout = true;
        self
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::new()
    }
}
