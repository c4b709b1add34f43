use std::io;
use std::path::PathBuf;

use crate::object::CharacterKey;

/// Errors produced while decoding, ingesting, or querying a map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// The requested character index or id does not resolve to a character.
    #[error("character {0} does not exist")]
    CharacterNotFound(CharacterKey),

    /// An object record declared a shape the engine cannot collide.
    #[error("object '{object_id}' in layer '{layer}' has unsupported shape '{shape}'")]
    UnsupportedShape {
        /// Name of the layer holding the object.
        layer: String,
        /// Id of the offending object.
        object_id: String,
        /// Declared shape, e.g. `"ellipse"`.
        shape: &'static str,
    },

    /// Non-orthogonal orientation or non right-down render order, strict mode only.
    #[error("unsupported map layout: orientation '{orientation}', render order '{render_order}'")]
    UnsupportedLayout {
        /// Declared orientation.
        orientation: String,
        /// Declared render order.
        render_order: String,
    },

    /// A property declared a type the decoder does not know.
    #[error("unsupported property type '{kind}' for property '{name}'")]
    UnsupportedPropertyType {
        /// Property name.
        name: String,
        /// Declared type.
        kind: String,
    },

    /// The document or its path cannot describe a usable map.
    #[error("invalid map: {0}")]
    InvalidMap(String),

    /// Reading a map file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The document is not valid map JSON.
    #[error("failed to parse map JSON: {source}")]
    Json {
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}
