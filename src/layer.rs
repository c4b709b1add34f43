use crate::ir_map::Properties;

/// Tile ids of one visual layer, the exported sequence reversed: bottom row
/// first, and each row right to left.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    /// Columns.
    pub width: u32,
    /// Rows.
    pub height: u32,
    /// Tile ids in storage order, `0` for empty cells.
    pub tiles: Vec<u32>,
    /// Layer name, `None` when the source left it empty.
    pub name: Option<String>,
    /// Layer author metadata.
    pub properties: Properties,
}

impl TileLayer {
    /// Wraps tiles exported top row first, reversing them into storage order.
    pub fn from_exported(width: u32, height: u32, mut data: Vec<u32>, name: Option<String>) -> Self {
        data.reverse();
        TileLayer {
            width,
            height,
            tiles: data,
            name,
            properties: Properties::new(),
        }
    }

    /// Tile at a storage position.
    ///
    /// `row` 0 is the bottom row. Columns are mirrored as well: `column` 0 is
    /// the rightmost column of the exported grid.
    pub fn tile_at(&self, column: u32, row: u32) -> Option<u32> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.tiles
            .get((row as usize) * (self.width as usize) + column as usize)
            .copied()
    }
}
