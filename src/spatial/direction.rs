use macroquad::math::{vec2, Vec2};
use strum::{Display, EnumIter, EnumString};

/// Cardinal step direction in map space.
///
/// Map-space y grows upward: `Top` adds a tile height, `Bottom` subtracts one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    /// Negative x.
    Left,
    /// Positive y.
    Top,
    /// Positive x.
    Right,
    /// Negative y.
    Bottom,
}

impl Direction {
    /// One-tile displacement for this direction.
    #[inline]
    pub fn offset(self, tile_w: u32, tile_h: u32) -> Vec2 {
        let (tw, th) = (tile_w as f32, tile_h as f32);
        match self {
            Direction::Left => vec2(-tw, 0.0),
            Direction::Top => vec2(0.0, th),
            Direction::Right => vec2(tw, 0.0),
            Direction::Bottom => vec2(0.0, -th),
        }
    }
}
