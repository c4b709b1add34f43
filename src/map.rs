use std::collections::HashMap;

use tracing::debug;

use crate::config::MapConfig;
use crate::error::MapError;
use crate::ir_map::IrMap;
use crate::layer::TileLayer;
use crate::object::{CharacterKey, GroupKind, MapObject, ObjectGroup};

mod active;
mod ingest;
mod movement;

pub use active::ActiveArea;
pub use movement::MoveOutcome;

/// Runtime tile map: layers, typed object groups, and per-character active areas.
///
/// Built empty, sized once with [`Map::set_map_size`], then filled by
/// [`Map::load_tile_layers`] and [`Map::load_object_groups`]. After that only
/// movement and active-area refreshes mutate it.
#[derive(Debug, Default)]
pub struct Map {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tile width in pixels; horizontal step of one move.
    pub tile_w: u32,
    /// Tile height in pixels; vertical step of one move.
    pub tile_h: u32,
    tile_layers: Vec<TileLayer>,
    object_groups: HashMap<GroupKind, ObjectGroup>,
    // keyed by position in the characters group
    active: HashMap<usize, ActiveArea>,
    config: MapConfig,
}

impl Map {
    /// Empty map with the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty map with `config`.
    pub fn with_config(config: MapConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Active config.
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Sets the pixel size and the tile size used for movement steps.
    pub fn set_map_size(&mut self, width: u32, height: u32, tile_w: u32, tile_h: u32) {
        self.width = width;
        self.height = height;
        self.tile_w = tile_w;
        self.tile_h = tile_h;
    }

    /// Replaces the tile layers with the visible tile layers of `ir`, in order.
    pub fn load_tile_layers(&mut self, ir: &IrMap) -> Result<(), MapError> {
        self.tile_layers = ingest::tile_layers_from_ir(ir, self.config.strict_layout)?;
        debug!(layers = self.tile_layers.len(), "loaded tile layers");
        Ok(())
    }

    /// Replaces the object groups with the recognised object layers of `ir`.
    ///
    /// Cached active areas refer to the old groups and are dropped.
    pub fn load_object_groups(&mut self, ir: &IrMap) -> Result<(), MapError> {
        self.object_groups = ingest::object_groups_from_ir(ir, self.config.strict_layout)?;
        self.active.clear();
        debug!(
            groups = self.object_groups.len(),
            characters = self.character_count(),
            "loaded object groups"
        );
        Ok(())
    }

    /// Visible tile layers in id order.
    pub fn tile_layers(&self) -> &[TileLayer] {
        &self.tile_layers
    }

    /// Loaded groups, one per kind at most.
    pub fn object_groups(&self) -> &HashMap<GroupKind, ObjectGroup> {
        &self.object_groups
    }

    /// Group of `kind`, if the map has one.
    pub fn group(&self, kind: GroupKind) -> Option<&ObjectGroup> {
        self.object_groups.get(&kind)
    }

    /// Number of characters, `0` without a characters group.
    pub fn character_count(&self) -> usize {
        self.group(GroupKind::Characters).map_or(0, ObjectGroup::len)
    }

    /// Character by index or id.
    pub fn character(&self, key: impl Into<CharacterKey>) -> Result<&MapObject, MapError> {
        let index = self.resolve_character(&key.into())?;
        self.group(GroupKind::Characters)
            .and_then(|g| g.get(index))
            .ok_or(MapError::CharacterNotFound(CharacterKey::Index(index)))
    }

    /// Cached active area of the character at `index`, if computed.
    pub fn active_area(&self, index: usize) -> Option<&ActiveArea> {
        self.active.get(&index)
    }

    fn resolve_character(&self, key: &CharacterKey) -> Result<usize, MapError> {
        let group = self.group(GroupKind::Characters);
        let found = match key {
            CharacterKey::Index(i) => group.filter(|g| *i < g.len()).map(|_| *i),
            CharacterKey::Id(id) => group.and_then(|g| g.position_of(id)),
        };
        found.ok_or_else(|| MapError::CharacterNotFound(key.clone()))
    }

    fn character_mut(&mut self, index: usize) -> Option<&mut MapObject> {
        self.object_groups
            .get_mut(&GroupKind::Characters)
            .and_then(|g| g.objects.get_mut(index))
    }
}
