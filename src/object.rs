use macroquad::math::{Rect, Vec2};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::ir_map::Properties;

/// Object layer kinds the engine understands, keyed by exact layer name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum GroupKind {
    /// Layer `characters`: movable objects.
    Characters,
    /// Layer `collision`: static blockers.
    Collision,
    /// Layer `interactions`: triggers reported on contact.
    Interactions,
}

/// Variant tag of a [`MapObject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Blocks movement.
    Collision,
    /// Reported on contact. A move onto one is blocked like a collision,
    /// with the object listed under `interactions`.
    Interaction,
    /// Movable; blocks other characters like a collision object.
    Character,
}

impl ObjectKind {
    /// Collision objects and characters; interactions are reported separately.
    pub fn is_collidable(self) -> bool {
        matches!(self, ObjectKind::Collision | ObjectKind::Character)
    }
}

impl From<GroupKind> for ObjectKind {
    fn from(kind: GroupKind) -> Self {
        match kind {
            GroupKind::Characters => ObjectKind::Character,
            GroupKind::Collision => ObjectKind::Collision,
            GroupKind::Interactions => ObjectKind::Interaction,
        }
    }
}

/// Geometry of a [`MapObject`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned box anchored at the object position.
    Rectangle {
        /// Width and height in pixels.
        size: Vec2,
    },
}

impl Shape {
    /// Size of the shape when it is a rectangle.
    #[inline]
    pub fn rect_size(&self) -> Option<Vec2> {
        match self {
            Shape::Rectangle { size } => Some(*size),
        }
    }
}

/// Anything placed on the map with a position and a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct MapObject {
    /// Identifier from the source document.
    pub id: String,
    /// Display name, `None` when the source left it empty.
    pub name: Option<String>,
    /// Top-left of the shape in pixels.
    pub position: Vec2,
    /// Geometry.
    pub shape: Shape,
    /// Variant tag, fixed by the group the object came from.
    pub kind: ObjectKind,
    /// Object author metadata.
    pub properties: Properties,
}

impl MapObject {
    /// Rectangle object with no name or properties.
    pub fn rect(kind: ObjectKind, id: impl Into<String>, position: Vec2, size: Vec2) -> Self {
        Self {
            id: id.into(),
            name: None,
            position,
            shape: Shape::Rectangle { size },
            kind,
            properties: Properties::new(),
        }
    }

    /// `[origin, size]` rectangle, `None` for non-rectangular shapes.
    #[inline]
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds_at(self.position)
    }

    /// Rectangle this object would occupy at `position`.
    #[inline]
    pub fn bounds_at(&self, position: Vec2) -> Option<Rect> {
        self.shape
            .rect_size()
            .map(|size| Rect::new(position.x, position.y, size.x, size.y))
    }
}

/// Ordered objects of one [`GroupKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectGroup {
    /// Kind shared by every member.
    pub kind: GroupKind,
    /// Source layer name.
    pub name: String,
    /// Members in source order; positions are stable after loading.
    pub objects: Vec<MapObject>,
    /// Layer author metadata.
    pub properties: Properties,
}

impl ObjectGroup {
    /// Group named after `kind`, without properties.
    pub fn new(kind: GroupKind, objects: Vec<MapObject>) -> Self {
        Self {
            kind,
            name: kind.as_ref().to_owned(),
            objects,
            properties: Properties::new(),
        }
    }

    /// Object at `index`.
    pub fn get(&self, index: usize) -> Option<&MapObject> {
        self.objects.get(index)
    }

    /// Position of the first object with `id`.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    /// First object with `id`.
    pub fn object_by_id(&self, id: &str) -> Option<&MapObject> {
        self.position_of(id).map(|i| &self.objects[i])
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Addresses one object by group and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Group holding the object.
    pub group: GroupKind,
    /// Position within the group.
    pub index: usize,
}

impl ObjectRef {
    /// Character at `index`.
    pub fn character(index: usize) -> Self {
        Self {
            group: GroupKind::Characters,
            index,
        }
    }
}

/// Selects a character by ordinal position or by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CharacterKey {
    /// Position in the characters group.
    Index(usize),
    /// Object id.
    Id(String),
}

impl fmt::Display for CharacterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterKey::Index(i) => write!(f, "#{i}"),
            CharacterKey::Id(id) => write!(f, "'{id}'"),
        }
    }
}

impl From<usize> for CharacterKey {
    fn from(index: usize) -> Self {
        CharacterKey::Index(index)
    }
}

impl From<&str> for CharacterKey {
    fn from(id: &str) -> Self {
        CharacterKey::Id(id.to_owned())
    }
}

impl From<String> for CharacterKey {
    fn from(id: String) -> Self {
        CharacterKey::Id(id)
    }
}
