#![warn(missing_docs)]

//! Tiled map runtime model: tile layers, typed object groups, and character
//! movement resolved against collision and interaction objects.

mod config;
mod error;
mod ir_map;
mod layer;
mod loader {
    pub mod json_loader;
}
mod map;
mod object;
mod spatial;
mod world;

pub use config::MapConfig;
pub use error::MapError;
pub use ir_map::{
    IrLayer, IrLayerKind, IrMap, IrObject, IrObjectShape, Properties, PropertyValue, ORTHOGONAL,
    RIGHT_DOWN,
};
pub use layer::TileLayer;
pub use loader::json_loader::{decode_map_file, decode_map_str};
pub use map::{ActiveArea, Map, MoveOutcome};
pub use object::{CharacterKey, GroupKind, MapObject, ObjectGroup, ObjectKind, ObjectRef, Shape};
pub use spatial::{contains_point, first_overlap, overlaps, Direction};
pub use world::RpgWorld;
