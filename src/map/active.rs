use macroquad::math::{vec2, Rect, Vec2};
use std::collections::HashMap;
use strum::IntoEnumIterator;
use tracing::trace;

use super::Map;
use crate::error::MapError;
use crate::object::{CharacterKey, GroupKind, MapObject, ObjectRef};
use crate::spatial::{contains_point, first_overlap, overlaps};

/// Cached neighbourhood of one character.
///
/// Spans from the character's position when it was computed to that position
/// plus a fixed fraction of the map size. `indices` holds, per group, the
/// objects overlapping [`ActiveArea::rect`], never the character itself.
/// Objects moving in or out are only picked up once the character leaves the
/// corners.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveArea {
    min: Vec2,
    max: Vec2,
    indices: HashMap<GroupKind, Vec<usize>>,
}

impl ActiveArea {
    fn new(min: Vec2, max: Vec2, indices: HashMap<GroupKind, Vec<usize>>) -> Self {
        Self { min, max, indices }
    }

    /// Corner at the character's position.
    pub fn min(&self) -> Vec2 {
        self.min
    }

    /// Opposite corner, `min` plus the area extent.
    pub fn max(&self) -> Vec2 {
        self.max
    }

    /// Rectangle handed to the overlap test.
    ///
    /// The corner pair goes in as `[origin, size]` unchanged, so `max` acts as
    /// the size. Away from the map origin this reaches further than the
    /// corners themselves.
    pub fn rect(&self) -> Rect {
        Rect::new(self.min.x, self.min.y, self.max.x, self.max.y)
    }

    /// Point-in-corners test, both corners inclusive.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        contains_point(self.min, self.max, p)
    }

    /// Active positions in the group of `kind`.
    pub fn indices(&self, kind: GroupKind) -> &[usize] {
        self.indices.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }
}

impl Map {
    /// Refreshes cached active areas.
    ///
    /// `None` refreshes every character in group order. A subject outside the
    /// characters group is ignored.
    pub fn update_active_area(&mut self, subject: Option<ObjectRef>) -> Result<(), MapError> {
        match subject {
            None => {
                for index in 0..self.character_count() {
                    self.refresh_character(index);
                }
            }
            Some(ObjectRef {
                group: GroupKind::Characters,
                index,
            }) => {
                if index >= self.character_count() {
                    return Err(MapError::CharacterNotFound(CharacterKey::Index(index)));
                }
                self.refresh_character(index);
            }
            Some(_) => {}
        }
        Ok(())
    }

    /// Recomputes the active area of character `index` unless its position is
    /// still inside the cached one. Returns whether it recomputed.
    pub(crate) fn refresh_character(&mut self, index: usize) -> bool {
        let Some(position) = self
            .group(GroupKind::Characters)
            .and_then(|g| g.get(index))
            .map(|c| c.position)
        else {
            return false;
        };
        if self.active.get(&index).is_some_and(|a| a.contains(position)) {
            return false;
        }

        let ratio = self.config.active_area_ratio;
        let extent = vec2(self.width as f32 * ratio, self.height as f32 * ratio);
        let mut area = ActiveArea::new(position, position + extent, HashMap::new());

        let bounds = area.rect();
        area.indices = GroupKind::iter()
            .map(|kind| (kind, self.overlapping_indices(kind, bounds, index)))
            .collect();
        trace!(
            character = index,
            ?position,
            collision = area.indices(GroupKind::Collision).len(),
            interactions = area.indices(GroupKind::Interactions).len(),
            characters = area.indices(GroupKind::Characters).len(),
            "recomputed active area"
        );

        self.active.insert(index, area);
        true
    }

    fn overlapping_indices(&self, kind: GroupKind, area: Rect, subject: usize) -> Vec<usize> {
        let Some(group) = self.group(kind) else {
            return Vec::new();
        };
        group
            .objects
            .iter()
            .enumerate()
            .filter(|(i, _)| !(kind == GroupKind::Characters && *i == subject))
            .filter(|(_, obj)| obj.bounds().is_some_and(|b| overlaps(b, area)))
            .map(|(i, _)| i)
            .collect()
    }

    /// Objects of `kind` in the cached active area of character `index`.
    pub fn active_objects(&self, index: usize, kind: GroupKind) -> impl Iterator<Item = &MapObject> + '_ {
        let group = self.group(kind);
        let indices = self.active.get(&index).map(|a| a.indices(kind)).unwrap_or_default();
        indices.iter().filter_map(move |&i| group.and_then(|g| g.get(i)))
    }

    /// First active object of `kind` overlapping the subject's active area.
    ///
    /// `None` for subjects that are not characters or have no active area yet.
    pub fn test_active_collision(&self, subject: ObjectRef, kind: GroupKind) -> Option<&MapObject> {
        if subject.group != GroupKind::Characters {
            return None;
        }
        let area = self.active.get(&subject.index)?.rect();
        first_overlap(area, self.active_objects(subject.index, kind))
    }

    /// Scans every character against every group, first hit wins.
    pub fn find_any_collision(&self) -> Option<&MapObject> {
        (0..self.character_count()).find_map(|index| {
            GroupKind::iter().find_map(|kind| self.test_active_collision(ObjectRef::character(index), kind))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir_map::{IrLayer, IrLayerKind, IrMap, IrObject, Properties};

    fn objects_layer(id: u32, name: &str, objects: Vec<IrObject>) -> IrLayer {
        IrLayer {
            id,
            name: name.to_owned(),
            visible: true,
            properties: Properties::new(),
            kind: IrLayerKind::Objects { objects },
        }
    }

    // 10x10 tiles of 32px: active extent is 96x96.
    fn map_with(characters: Vec<IrObject>, collision: Vec<IrObject>, interactions: Vec<IrObject>) -> Map {
        let mut ir = IrMap::new(10, 10, 32, 32);
        ir.layers = vec![
            objects_layer(1, "characters", characters),
            objects_layer(2, "collision", collision),
            objects_layer(3, "interactions", interactions),
        ];
        let mut map = Map::new();
        map.set_map_size(320, 320, 32, 32);
        map.load_object_groups(&ir).expect("load");
        map
    }

    fn rect(id: &str, x: f32, y: f32) -> IrObject {
        IrObject::rect(id, x, y, 32.0, 32.0)
    }

    #[test]
    fn active_area_spans_fraction_of_map() {
        let mut map = map_with(vec![rect("hero", 64.0, 32.0)], vec![], vec![]);
        map.update_active_area(Some(ObjectRef::character(0))).expect("refresh");

        let area = map.active_area(0).expect("active area");
        assert_eq!(area.min(), vec2(64.0, 32.0));
        assert_eq!(area.max(), vec2(160.0, 128.0));
        assert_eq!(area.rect(), Rect::new(64.0, 32.0, 160.0, 128.0));
    }

    #[test]
    fn far_corner_doubles_as_search_size() {
        // Corners (192, 0)..(288, 96); the wall at x = 320 is past them but
        // within the 288 wide search rectangle.
        let mut map = map_with(vec![rect("hero", 192.0, 0.0)], vec![rect("wall", 320.0, 0.0)], vec![]);
        map.refresh_character(0);

        let area = map.active_area(0).expect("active area");
        assert!(!area.contains(vec2(320.0, 0.0)));
        assert_eq!(area.indices(GroupKind::Collision), &[0]);
        let hero = ObjectRef::character(0);
        assert_eq!(
            map.test_active_collision(hero, GroupKind::Collision).map(|o| o.id.as_str()),
            Some("wall")
        );
    }

    #[test]
    fn active_indices_overlap_area_and_exclude_self() {
        let mut map = map_with(
            vec![rect("hero", 0.0, 0.0), rect("near", 64.0, 0.0), rect("far", 288.0, 288.0)],
            vec![rect("wall", 32.0, 0.0), rect("distant", 256.0, 0.0)],
            vec![rect("sign", 0.0, 64.0)],
        );
        map.update_active_area(None).expect("refresh");

        let area = map.active_area(0).expect("active area");
        assert_eq!(area.indices(GroupKind::Characters), &[1]);
        assert_eq!(area.indices(GroupKind::Collision), &[0]);
        assert_eq!(area.indices(GroupKind::Interactions), &[0]);

        for index in 0..map.character_count() {
            let area = map.active_area(index).expect("every character refreshed");
            for kind in GroupKind::iter() {
                for &i in area.indices(kind) {
                    let obj = &map.group(kind).expect("group").objects[i];
                    assert!(overlaps(obj.bounds().expect("rect"), area.rect()));
                    assert!(!(kind == GroupKind::Characters && i == index));
                }
            }
        }
    }

    #[test]
    fn refresh_is_idempotent_while_inside() {
        let mut map = map_with(vec![rect("hero", 0.0, 0.0)], vec![rect("wall", 32.0, 0.0)], vec![]);
        assert!(map.refresh_character(0));
        let first = map.active_area(0).cloned();
        assert!(!map.refresh_character(0));
        map.update_active_area(Some(ObjectRef::character(0))).expect("refresh");
        assert_eq!(map.active_area(0).cloned(), first);
    }

    #[test]
    fn leaving_the_area_recomputes() {
        let mut map = map_with(vec![rect("hero", 0.0, 0.0)], vec![], vec![]);
        map.refresh_character(0);

        map.character_mut(0).expect("hero").position = vec2(96.0, 96.0);
        assert!(!map.refresh_character(0), "far corner is still inside");

        map.character_mut(0).expect("hero").position = vec2(128.0, 0.0);
        assert!(map.refresh_character(0));
        assert_eq!(map.active_area(0).map(ActiveArea::min), Some(vec2(128.0, 0.0)));
    }

    #[test]
    fn non_character_subjects_are_ignored() {
        let mut map = map_with(vec![rect("hero", 0.0, 0.0)], vec![rect("wall", 32.0, 0.0)], vec![]);
        let wall = ObjectRef {
            group: GroupKind::Collision,
            index: 0,
        };
        map.update_active_area(Some(wall)).expect("no-op");
        assert!(map.active_area(0).is_none());
        assert!(map.test_active_collision(wall, GroupKind::Collision).is_none());

        assert!(matches!(
            map.update_active_area(Some(ObjectRef::character(5))),
            Err(MapError::CharacterNotFound(CharacterKey::Index(5)))
        ));
    }

    #[test]
    fn whole_map_scan_finds_first_active_hit() {
        let mut map = map_with(
            vec![rect("hero", 0.0, 0.0), rect("villager", 288.0, 288.0)],
            vec![],
            vec![rect("sign", 288.0, 256.0)],
        );
        assert!(map.find_any_collision().is_none(), "no active areas yet");

        map.update_active_area(None).expect("refresh");
        let hero = ObjectRef::character(0);
        let villager = ObjectRef::character(1);
        assert!(map.test_active_collision(hero, GroupKind::Characters).is_none());
        assert!(map.test_active_collision(hero, GroupKind::Interactions).is_none());
        assert_eq!(
            map.test_active_collision(villager, GroupKind::Interactions).map(|o| o.id.as_str()),
            Some("sign")
        );

        // The villager's search rectangle is 384 wide, so it reaches back to
        // the hero, and characters are scanned before interactions.
        let hit = map.find_any_collision().map(|o| o.id.as_str());
        assert_eq!(hit, Some("hero"));
    }
}
