// src/ir_map.rs
use macroquad::math::Vec2;
use std::collections::HashMap;

use crate::error::MapError;

/// The only orientation the engine ingests.
pub const ORTHOGONAL: &str = "orthogonal";
/// The only render order the engine ingests.
pub const RIGHT_DOWN: &str = "right-down";

/// Canonical, format-agnostic map document handed to [`crate::Map`].
#[derive(Debug, Clone, PartialEq)]
pub struct IrMap {
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    /// Tile width in pixels.
    pub tile_w: u32,
    /// Tile height in pixels.
    pub tile_h: u32,
    /// Tiled `orientation`, e.g. [`ORTHOGONAL`].
    pub orientation: String,
    /// Tiled `renderorder`, e.g. [`RIGHT_DOWN`].
    pub render_order: String,
    /// Map-level author metadata.
    pub properties: Properties,
    /// Layers in source order; [`crate::RpgWorld::load_map`] sorts them by id.
    pub layers: Vec<IrLayer>,
}

impl IrMap {
    /// Empty orthogonal, right-down document.
    pub fn new(width: u32, height: u32, tile_w: u32, tile_h: u32) -> Self {
        Self {
            width,
            height,
            tile_w,
            tile_h,
            orientation: ORTHOGONAL.to_owned(),
            render_order: RIGHT_DOWN.to_owned(),
            properties: Properties::new(),
            layers: Vec::new(),
        }
    }

    /// Map width in pixels, `None` if it does not fit in a `u32`.
    pub fn pixel_width(&self) -> Option<u32> {
        self.width.checked_mul(self.tile_w)
    }

    /// See [`IrMap::pixel_width`].
    pub fn pixel_height(&self) -> Option<u32> {
        self.height.checked_mul(self.tile_h)
    }

    /// Pixel width and height, or [`MapError::InvalidMap`] on overflow.
    pub fn pixel_size(&self) -> Result<(u32, u32), MapError> {
        match (self.pixel_width(), self.pixel_height()) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(MapError::InvalidMap(format!(
                "map of {}x{} tiles at {}x{} px overflows the pixel size",
                self.width, self.height, self.tile_w, self.tile_h
            ))),
        }
    }

    /// Orthogonal orientation with right-down render order.
    pub fn is_supported_layout(&self) -> bool {
        self.orientation == ORTHOGONAL && self.render_order == RIGHT_DOWN
    }
}

/// Payload of a decoded layer.
#[derive(Debug, Clone, PartialEq)]
pub enum IrLayerKind {
    /// Tile grid.
    Tiles {
        /// Columns.
        width: u32,
        /// Rows.
        height: u32,
        /// Tile ids in top-down rows, as exported. `None` for infinite maps.
        data: Option<Vec<u32>>,
    },
    /// Object layer.
    Objects {
        /// Objects in source order.
        objects: Vec<IrObject>,
    },
    /// Image and group layers; never ingested.
    Unsupported,
}

/// One decoded layer record.
#[derive(Debug, Clone, PartialEq)]
pub struct IrLayer {
    /// Tiled layer id, used for ordering.
    pub id: u32,
    /// Layer name; object layers are matched to group kinds by it.
    pub name: String,
    /// Hidden layers are skipped at ingestion.
    pub visible: bool,
    /// Layer author metadata.
    pub properties: Properties,
    /// Tile or object payload.
    pub kind: IrLayerKind,
}

/// Shape declared by an object record.
#[derive(Debug, Clone, PartialEq)]
pub enum IrObjectShape {
    /// Axis-aligned box; the only shape the engine collides.
    Rectangle,
    /// Ellipse in the object's box.
    Ellipse,
    /// Single point.
    Point,
    /// Closed outline, points relative to the object position.
    Polygon(Vec<Vec2>),
    /// Open outline, points relative to the object position.
    Polyline(Vec<Vec2>),
    /// Tile object.
    Tile {
        /// Global tile id.
        gid: u32,
    },
}

impl IrObjectShape {
    /// Lowercase shape name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            IrObjectShape::Rectangle => "rectangle",
            IrObjectShape::Ellipse => "ellipse",
            IrObjectShape::Point => "point",
            IrObjectShape::Polygon(_) => "polygon",
            IrObjectShape::Polyline(_) => "polyline",
            IrObjectShape::Tile { .. } => "tile",
        }
    }
}

/// One decoded object record.
#[derive(Debug, Clone, PartialEq)]
pub struct IrObject {
    /// Object id as text; characters can be looked up by it.
    pub id: String,
    /// Optional display name, empty when unset.
    pub name: String,
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Declared shape.
    pub shape: IrObjectShape,
    /// Object author metadata.
    pub properties: Properties,
}

impl IrObject {
    /// Rectangle object with no name or properties.
    pub fn rect(id: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            x,
            y,
            width,
            height,
            shape: IrObjectShape::Rectangle,
            properties: Properties::new(),
        }
    }
}

/// Author metadata value. Map authors only get strings and numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Text, also files, colors and class names.
    String(String),
    /// Integers, object references and booleans (`0` / `1`).
    I64(i64),
    /// Floats.
    F32(f32),
}

/// Schema-free author metadata attached to maps, layers and objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(HashMap<String, PropertyValue>);

impl Properties {
    /// Empty set.
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Inserts or replaces `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.0.insert(key.into(), value);
    }

    /// Raw value of `key`.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    /// String value of `key`.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.0.get(key)? {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value of `key`.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.0.get(key)? {
            PropertyValue::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer value of `key` if it fits in an `i32`.
    pub fn get_i32(&self, key: &str) -> Option<i32> {
        self.get_i64(key).and_then(|v| i32::try_from(v).ok())
    }

    /// Float value; integers widen.
    pub fn get_f32(&self, key: &str) -> Option<f32> {
        match self.0.get(key)? {
            PropertyValue::F32(v) => Some(*v),
            PropertyValue::I64(v) => Some(*v as f32),
            PropertyValue::String(_) => None,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters_reject_mismatched_values() {
        let mut props = Properties::new();
        props.insert("speed", PropertyValue::I64(3));
        props.insert("label", PropertyValue::String("door".into()));
        props.insert("big", PropertyValue::I64(5_000_000_000));

        assert_eq!(props.get_i32("speed"), Some(3));
        assert_eq!(props.get_f32("speed"), Some(3.0));
        assert_eq!(props.get_string("speed"), None);
        assert_eq!(props.get_string("label"), Some("door"));
        assert_eq!(props.get_i32("big"), None);
        assert_eq!(props.get_i64("big"), Some(5_000_000_000));
        assert_eq!(props.len(), 3);
    }

    #[test]
    fn pixel_size_multiplies_tile_counts() {
        let ir = IrMap::new(10, 8, 32, 16);
        assert_eq!(ir.pixel_width(), Some(320));
        assert_eq!(ir.pixel_height(), Some(128));
        assert_eq!(ir.pixel_size().expect("fits"), (320, 128));
        assert!(ir.is_supported_layout());
    }

    #[test]
    fn oversized_map_is_invalid_instead_of_overflowing() {
        let ir = IrMap::new(1, 100_000, 16, 100_000);
        assert_eq!(ir.pixel_width(), Some(16));
        assert_eq!(ir.pixel_height(), None);
        assert!(matches!(ir.pixel_size(), Err(MapError::InvalidMap(_))));
    }
}
