use macroquad::math::Vec2;
use tracing::debug;

use super::Map;
use crate::error::MapError;
use crate::object::{CharacterKey, GroupKind, MapObject};
use crate::spatial::{first_overlap, Direction};

/// Result of a movement request that reached the rules.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// The character now stands at `new_position`.
    Moved {
        /// Position after the move.
        new_position: Vec2,
    },
    /// The character did not move. At most one object is reported per list.
    Blocked {
        /// Collision object or character in the way.
        collisions: Vec<MapObject>,
        /// Interaction object at the target.
        interactions: Vec<MapObject>,
    },
}

impl MoveOutcome {
    /// Whether the character moved.
    pub fn is_success(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }

    /// New position of a successful move.
    pub fn new_position(&self) -> Option<Vec2> {
        match self {
            MoveOutcome::Moved { new_position } => Some(*new_position),
            MoveOutcome::Blocked { .. } => None,
        }
    }
}

impl Map {
    /// Moves a character one tile in `direction`.
    ///
    /// The active area is refreshed from the current position first, then the
    /// target is tested against active collision objects, active characters, and
    /// active interactions. Any hit blocks the move; interactions are reported
    /// alongside collisions.
    pub fn move_character(
        &mut self,
        key: impl Into<CharacterKey>,
        direction: Direction,
    ) -> Result<MoveOutcome, MapError> {
        let key = key.into();
        let index = self.resolve_character(&key)?;
        self.refresh_character(index);

        let character = self.character(index)?;
        let from = character.position;
        let target = from + direction.offset(self.tile_w, self.tile_h);

        let (collisions, interactions) = match character.bounds_at(target) {
            Some(area) => {
                let collision = [GroupKind::Collision, GroupKind::Characters]
                    .into_iter()
                    .find_map(|kind| first_overlap(area, self.active_objects(index, kind)));
                let interaction = first_overlap(area, self.active_objects(index, GroupKind::Interactions));
                (
                    collision.into_iter().cloned().collect::<Vec<_>>(),
                    interaction.into_iter().cloned().collect::<Vec<_>>(),
                )
            }
            None => (Vec::new(), Vec::new()),
        };

        if !collisions.is_empty() || !interactions.is_empty() {
            debug!(
                character = %key,
                %direction,
                ?from,
                collisions = collisions.len(),
                interactions = interactions.len(),
                "move blocked"
            );
            return Ok(MoveOutcome::Blocked {
                collisions,
                interactions,
            });
        }

        if let Some(character) = self.character_mut(index) {
            character.position = target;
        }
        debug!(character = %key, %direction, ?from, to = ?target, "moved");
        Ok(MoveOutcome::Moved {
            new_position: target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir_map::{IrLayer, IrLayerKind, IrMap, IrObject, Properties};
    use macroquad::math::vec2;

    fn layer(id: u32, name: &str, objects: Vec<IrObject>) -> IrLayer {
        IrLayer {
            id,
            name: name.to_owned(),
            visible: true,
            properties: Properties::new(),
            kind: IrLayerKind::Objects { objects },
        }
    }

    fn map(layers: Vec<IrLayer>) -> Map {
        let mut ir = IrMap::new(10, 10, 32, 32);
        ir.layers = layers;
        let mut map = Map::new();
        map.set_map_size(320, 320, 32, 32);
        map.load_object_groups(&ir).expect("load");
        map
    }

    fn tile(id: &str, x: f32, y: f32) -> IrObject {
        IrObject::rect(id, x, y, 32.0, 32.0)
    }

    #[test]
    fn blocked_by_wall_then_free_to_the_left() {
        let mut map = map(vec![
            layer(1, "characters", vec![tile("hero", 0.0, 0.0)]),
            layer(2, "collision", vec![tile("wall", 32.0, 0.0)]),
            layer(3, "interactions", vec![]),
        ]);

        let outcome = map.move_character(0usize, Direction::Right).expect("move");
        match &outcome {
            MoveOutcome::Blocked {
                collisions,
                interactions,
            } => {
                assert_eq!(collisions.len(), 1);
                assert_eq!(collisions[0].id, "wall");
                assert!(interactions.is_empty());
            }
            other => panic!("expected blocked, got {other:?}"),
        }
        assert_eq!(map.character(0usize).expect("hero").position, vec2(0.0, 0.0));

        let outcome = map.move_character(0usize, Direction::Left).expect("move");
        assert_eq!(outcome.new_position(), Some(vec2(-32.0, 0.0)));
        assert_eq!(map.character(0usize).expect("hero").position, vec2(-32.0, 0.0));
    }

    #[test]
    fn other_characters_block_but_self_does_not() {
        let mut map = map(vec![layer(
            1,
            "characters",
            vec![tile("hero", 0.0, 0.0), tile("npc", 0.0, 32.0)],
        )]);

        let outcome = map.move_character("hero", Direction::Top).expect("move");
        match outcome {
            MoveOutcome::Blocked { collisions, .. } => assert_eq!(collisions[0].id, "npc"),
            other => panic!("expected blocked, got {other:?}"),
        }

        let outcome = map.move_character("hero", Direction::Bottom).expect("move");
        assert_eq!(outcome, MoveOutcome::Moved { new_position: vec2(0.0, -32.0) });
    }

    #[test]
    fn interaction_alone_blocks_and_is_reported() {
        let mut map = map(vec![
            layer(1, "characters", vec![tile("hero", 0.0, 0.0)]),
            layer(2, "interactions", vec![tile("sign", 32.0, 0.0)]),
        ]);

        let outcome = map.move_character("hero", Direction::Right).expect("move");
        assert!(!outcome.is_success());
        match outcome {
            MoveOutcome::Blocked {
                collisions,
                interactions,
            } => {
                assert!(collisions.is_empty());
                assert_eq!(interactions.len(), 1);
                assert_eq!(interactions[0].id, "sign");
            }
            other => panic!("expected blocked, got {other:?}"),
        }
    }

    #[test]
    fn collision_and_interaction_reported_together() {
        let mut map = map(vec![
            layer(1, "characters", vec![tile("hero", 0.0, 0.0)]),
            layer(2, "collision", vec![tile("door", 32.0, 0.0)]),
            layer(3, "interactions", vec![tile("door-trigger", 32.0, 0.0)]),
        ]);

        match map.move_character("hero", Direction::Right).expect("move") {
            MoveOutcome::Blocked {
                collisions,
                interactions,
            } => {
                assert_eq!(collisions[0].id, "door");
                assert_eq!(interactions[0].id, "door-trigger");
            }
            other => panic!("expected blocked, got {other:?}"),
        }
    }

    #[test]
    fn unknown_character_is_not_found() {
        let mut map = map(vec![layer(1, "characters", vec![tile("hero", 0.0, 0.0)])]);
        assert!(matches!(
            map.move_character(3usize, Direction::Left),
            Err(MapError::CharacterNotFound(CharacterKey::Index(3)))
        ));
        assert!(matches!(
            map.move_character("ghost", Direction::Left),
            Err(MapError::CharacterNotFound(CharacterKey::Id(ref id))) if id == "ghost"
        ));
    }

    #[test]
    fn missing_characters_layer_is_not_found() {
        let mut map = map(vec![layer(1, "collision", vec![tile("wall", 0.0, 0.0)])]);
        assert!(matches!(
            map.move_character(0usize, Direction::Top),
            Err(MapError::CharacterNotFound(_))
        ));
    }
}
