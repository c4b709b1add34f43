// src/loader/json_loader.rs
use crate::error::MapError;
use crate::ir_map::*;
use macroquad::math::{vec2, Vec2};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::mem;
use std::path::Path;
use strum::EnumString;

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(default)]
    id: u32,
    #[serde(default)]
    data: Option<Vec<u32>>,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    properties: Vec<JsonProperty>,
    #[serde(default)]
    objects: Vec<JsonObject>,
}

fn default_true() -> bool {
    true
}

fn orthogonal() -> String {
    ORTHOGONAL.to_owned()
}

fn right_down() -> String {
    RIGHT_DOWN.to_owned()
}

#[derive(Deserialize)]
struct JsonMap {
    width: u32,
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default = "orthogonal")]
    orientation: String,
    #[serde(default = "right_down")]
    renderorder: String,
    #[serde(default)]
    layers: Vec<JsonLayer>,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize)]
struct JsonProperty {
    name: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    value: JsonValue,
}

#[derive(Deserialize)]
struct JsonObject {
    #[serde(default)]
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default)]
    point: bool,
    #[serde(default)]
    ellipse: bool,
    #[serde(default)]
    polygon: Vec<JsonObjectPoint>,
    #[serde(default)]
    polyline: Vec<JsonObjectPoint>,
    #[serde(default)]
    gid: Option<u32>,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize)]
struct JsonObjectPoint {
    x: f32,
    y: f32,
}

/// Declared Tiled property types.
#[derive(Debug, Clone, Copy, EnumString)]
#[strum(serialize_all = "lowercase")]
enum PropertyType {
    Bool,
    Int,
    Object,
    Float,
    String,
    File,
    Color,
    Class,
}

impl PropertyType {
    fn read(self, value: &JsonValue) -> Option<PropertyValue> {
        match self {
            PropertyType::Bool => value.as_bool().map(|b| PropertyValue::I64(i64::from(b))),
            PropertyType::Int | PropertyType::Object => value.as_i64().map(PropertyValue::I64),
            PropertyType::Float => value.as_f64().map(|n| PropertyValue::F32(n as f32)),
            PropertyType::String | PropertyType::File | PropertyType::Color | PropertyType::Class => {
                value.as_str().map(|s| PropertyValue::String(s.to_owned()))
            }
        }
    }
}

fn inferred(value: &JsonValue) -> Option<PropertyValue> {
    match value {
        JsonValue::Bool(b) => Some(PropertyValue::I64(i64::from(*b))),
        JsonValue::Number(n) => n
            .as_i64()
            .map(PropertyValue::I64)
            .or_else(|| n.as_f64().map(|f| PropertyValue::F32(f as f32))),
        JsonValue::String(s) => Some(PropertyValue::String(s.clone())),
        _ => None,
    }
}

impl JsonProperty {
    /// `Ok(None)` when the value does not fit its declared type.
    fn into_entry(self) -> Result<Option<(String, PropertyValue)>, MapError> {
        let value = match self.kind.as_deref() {
            None => inferred(&self.value),
            Some(kind) => match kind.parse::<PropertyType>() {
                Ok(ty) => ty.read(&self.value),
                Err(_) => {
                    return Err(MapError::UnsupportedPropertyType {
                        name: self.name,
                        kind: kind.to_owned(),
                    })
                }
            },
        };
        Ok(value.map(|v| (self.name, v)))
    }
}

fn properties_from_json(props: Vec<JsonProperty>) -> Result<Properties, MapError> {
    props.into_iter().try_fold(Properties::new(), |mut out, prop| {
        if let Some((name, value)) = prop.into_entry()? {
            out.insert(name, value);
        }
        Ok(out)
    })
}

fn outline(points: Vec<JsonObjectPoint>) -> Vec<Vec2> {
    points.into_iter().map(|p| vec2(p.x, p.y)).collect()
}

impl JsonObject {
    /// Tiled marks shapes with flags and point lists; a tile gid wins over both.
    fn take_shape(&mut self) -> IrObjectShape {
        if let Some(gid) = self.gid {
            IrObjectShape::Tile { gid }
        } else if self.point {
            IrObjectShape::Point
        } else if self.ellipse {
            IrObjectShape::Ellipse
        } else if !self.polygon.is_empty() {
            IrObjectShape::Polygon(outline(mem::take(&mut self.polygon)))
        } else if !self.polyline.is_empty() {
            IrObjectShape::Polyline(outline(mem::take(&mut self.polyline)))
        } else {
            IrObjectShape::Rectangle
        }
    }
}

impl TryFrom<JsonObject> for IrObject {
    type Error = MapError;

    fn try_from(mut obj: JsonObject) -> Result<Self, MapError> {
        let shape = obj.take_shape();
        Ok(IrObject {
            id: obj.id.to_string(),
            name: obj.name,
            x: obj.x,
            y: obj.y,
            width: obj.width,
            height: obj.height,
            shape,
            properties: properties_from_json(obj.properties)?,
        })
    }
}

fn layer_to_ir(l: JsonLayer) -> Result<IrLayer, MapError> {
    let kind = match l.kind.as_deref().unwrap_or("tilelayer") {
        "tilelayer" => IrLayerKind::Tiles {
            width: l.width,
            height: l.height,
            data: l.data,
        },
        "objectgroup" => IrLayerKind::Objects {
            objects: l
                .objects
                .into_iter()
                .map(IrObject::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        },
        _ => IrLayerKind::Unsupported,
    };

    Ok(IrLayer {
        id: l.id,
        name: l.name,
        visible: l.visible,
        properties: properties_from_json(l.properties)?,
        kind,
    })
}

/// Decodes a Tiled JSON map document.
pub fn decode_map_str(txt: &str) -> Result<IrMap, MapError> {
    let j: JsonMap = serde_json::from_str(txt).map_err(|source| MapError::Json { source })?;

    let layers = j
        .layers
        .into_iter()
        .map(layer_to_ir)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(IrMap {
        width: j.width,
        height: j.height,
        tile_w: j.tilewidth,
        tile_h: j.tileheight,
        orientation: j.orientation,
        render_order: j.renderorder,
        properties: properties_from_json(j.properties)?,
        layers,
    })
}

/// Reads and decodes a `.json` Tiled map file.
pub fn decode_map_file(path: impl AsRef<Path>) -> Result<IrMap, MapError> {
    let p = path.as_ref();
    if p.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(MapError::InvalidMap(format!(
            "Map file must be a JSON file: {}",
            p.display()
        )));
    }

    let txt = std::fs::read_to_string(p).map_err(|source| MapError::Io {
        path: p.to_path_buf(),
        source,
    })?;
    decode_map_str(&txt)
}
