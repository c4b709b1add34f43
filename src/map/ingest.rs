use macroquad::math::vec2;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::MapError;
use crate::ir_map::{IrLayerKind, IrMap, IrObject, IrObjectShape};
use crate::layer::TileLayer;
use crate::object::{GroupKind, MapObject, ObjectGroup, ObjectKind, Shape};

/// Only orthogonal, right-down maps are ingested. Other layouts load empty
/// unless `strict` asks for an error.
fn layout_supported(ir: &IrMap, strict: bool) -> Result<bool, MapError> {
    if ir.is_supported_layout() {
        return Ok(true);
    }
    if strict {
        return Err(MapError::UnsupportedLayout {
            orientation: ir.orientation.clone(),
            render_order: ir.render_order.clone(),
        });
    }
    warn!(
        orientation = %ir.orientation,
        render_order = %ir.render_order,
        "unsupported map layout, nothing ingested"
    );
    Ok(false)
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}

pub(crate) fn tile_layers_from_ir(ir: &IrMap, strict: bool) -> Result<Vec<TileLayer>, MapError> {
    if !layout_supported(ir, strict)? {
        return Ok(Vec::new());
    }

    let mut layers = Vec::new();
    for l in ir.layers.iter().filter(|l| l.visible) {
        let IrLayerKind::Tiles { width, height, data } = &l.kind else {
            continue;
        };
        let Some(data) = data else {
            debug!(layer = %l.name, "tile layer without data, skipped");
            continue;
        };
        let mut layer = TileLayer::from_exported(*width, *height, data.clone(), non_empty(&l.name));
        layer.properties = l.properties.clone();
        layers.push(layer);
    }
    Ok(layers)
}

pub(crate) fn object_groups_from_ir(
    ir: &IrMap,
    strict: bool,
) -> Result<HashMap<GroupKind, ObjectGroup>, MapError> {
    let mut groups = HashMap::new();
    if !layout_supported(ir, strict)? {
        return Ok(groups);
    }

    for l in ir.layers.iter().filter(|l| l.visible) {
        let IrLayerKind::Objects { objects } = &l.kind else {
            continue;
        };
        let Ok(kind) = l.name.parse::<GroupKind>() else {
            warn!(layer = %l.name, "object layer name is not a group kind, ignored");
            continue;
        };

        let objects = objects
            .iter()
            .map(|obj| object_from_ir(kind, &l.name, obj))
            .collect::<Result<Vec<_>, _>>()?;

        let mut group = ObjectGroup::new(kind, objects);
        group.properties = l.properties.clone();
        if groups.insert(kind, group).is_some() {
            warn!(layer = %l.name, "duplicate object layer replaces the earlier one");
        }
    }
    Ok(groups)
}

fn object_from_ir(kind: GroupKind, layer: &str, obj: &IrObject) -> Result<MapObject, MapError> {
    let shape = match &obj.shape {
        IrObjectShape::Rectangle => Shape::Rectangle {
            size: vec2(obj.width, obj.height),
        },
        other => {
            return Err(MapError::UnsupportedShape {
                layer: layer.to_owned(),
                object_id: obj.id.clone(),
                shape: other.name(),
            })
        }
    };

    Ok(MapObject {
        id: obj.id.clone(),
        name: non_empty(&obj.name),
        position: vec2(obj.x, obj.y),
        shape,
        kind: ObjectKind::from(kind),
        properties: obj.properties.clone(),
    })
}
