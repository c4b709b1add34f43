use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::config::MapConfig;
use crate::error::MapError;
use crate::ir_map::IrMap;
use crate::loader::json_loader::{decode_map_file, decode_map_str};
use crate::map::{Map, MoveOutcome};
use crate::object::{CharacterKey, GroupKind, ObjectGroup};
use crate::spatial::Direction;

/// Entry point for games: loads a map and moves characters around it.
#[derive(Debug, Default)]
pub struct RpgWorld {
    map: Map,
}

impl RpgWorld {
    /// Empty world with the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty world whose map uses `config`.
    pub fn with_config(config: MapConfig) -> Self {
        Self {
            map: Map::with_config(config),
        }
    }

    /// Loads a decoded map document, replacing whatever was loaded before.
    ///
    /// Layers are sorted by id first so source order does not matter. A map
    /// whose pixel size overflows is rejected before anything is replaced.
    pub fn load_map(&mut self, mut ir: IrMap) -> Result<(), MapError> {
        let (width, height) = ir.pixel_size()?;
        ir.layers.sort_by_key(|l| l.id);

        self.map.set_map_size(width, height, ir.tile_w, ir.tile_h);
        self.map.load_tile_layers(&ir)?;
        self.map.load_object_groups(&ir)?;

        info!(
            width = self.map.width,
            height = self.map.height,
            tile_layers = self.map.tile_layers().len(),
            object_groups = self.map.object_groups().len(),
            "map loaded"
        );
        Ok(())
    }

    /// Loads a Tiled JSON document.
    pub fn load_map_str(&mut self, json: &str) -> Result<(), MapError> {
        self.load_map(decode_map_str(json)?)
    }

    /// Loads a Tiled JSON map file.
    pub fn load_map_file(&mut self, path: impl AsRef<Path>) -> Result<(), MapError> {
        self.load_map(decode_map_file(path)?)
    }

    /// See [`Map::move_character`].
    pub fn move_character(
        &mut self,
        key: impl Into<CharacterKey>,
        direction: Direction,
    ) -> Result<MoveOutcome, MapError> {
        self.map.move_character(key, direction)
    }

    /// Object groups of the loaded map.
    pub fn object_groups(&self) -> &HashMap<GroupKind, ObjectGroup> {
        self.map.object_groups()
    }

    /// Loaded map.
    pub fn map(&self) -> &Map {
        &self.map
    }
}
