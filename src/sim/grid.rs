//! Static tile geometry queries
//!
//! The tile grid is immutable once a level is built. The actor asks it
//! directional questions ("would this box hit something on its right
//! edge?") after every axis move.
//!
//! Cell coverage uses half-open intervals: a box spanning `[x, x + w)`
//! covers columns `floor(x / t) ..= ceil((x + w) / t) - 1`, so a box flush
//! against a tile edge does not touch that tile. Cells outside the grid are
//! always [`Tile::Solid`]; the actor can never leave the playable area.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::level::LevelError;

/// Slack applied when mapping box edges onto cells, absorbs float error from
/// snapping a box flush against a tile edge
const CELL_EPSILON: f32 = 1e-4;

/// Tile type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Solid,
    /// Respawn point, captured when the actor enters it
    Checkpoint,
    /// Lethal, but not solid
    Spikes,
    /// Final block of the level
    Goal,
}

impl Tile {
    /// Parse a level file character
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' | ' ' => Some(Tile::Empty),
            '#' => Some(Tile::Solid),
            'C' => Some(Tile::Checkpoint),
            '^' => Some(Tile::Spikes),
            'G' => Some(Tile::Goal),
            _ => None,
        }
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self == Tile::Solid
    }
}

/// Cell coordinates (column, row); may lie outside the grid
pub type Cell = (i32, i32);

/// Inclusive cell range covered by a box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpan {
    pub col_min: i32,
    pub col_max: i32,
    pub row_min: i32,
    pub row_max: i32,
}

impl CellSpan {
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.row_min..=self.row_max)
            .flat_map(move |row| (self.col_min..=self.col_max).map(move |col| (col, row)))
    }
}

/// Immutable level geometry
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tile_size: f32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(
        width: usize,
        height: usize,
        tile_size: f32,
        tiles: Vec<Tile>,
    ) -> Result<Self, LevelError> {
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(LevelError::InvalidTileSize(tile_size));
        }
        if width == 0 || height == 0 || tiles.len() != width * height {
            return Err(LevelError::EmptyGrid);
        }
        Ok(Self { width, height, tile_size, tiles })
    }

    /// Build from level file rows, one character per tile
    pub fn from_rows<S: AsRef<str>>(rows: &[S], tile_size: f32) -> Result<Self, LevelError> {
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(LevelError::EmptyGrid);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(LevelError::RaggedRow { row, expected: width, found });
            }
            for (col, ch) in line.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or(LevelError::UnknownTile { row, col, ch })?;
                tiles.push(tile);
            }
        }

        Self::new(width, rows.len(), tile_size, tiles)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// World-space extent of the grid
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.tile_size
    }

    /// Tile at a cell; outside the grid everything is solid
    pub fn tile(&self, (col, row): Cell) -> Tile {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return Tile::Solid;
        }
        self.tiles[row as usize * self.width + col as usize]
    }

    /// World-space box of a cell
    pub fn cell_box(&self, (col, row): Cell) -> Aabb {
        Aabb::new(
            Vec2::new(col as f32, row as f32) * self.tile_size,
            Vec2::splat(self.tile_size),
        )
    }

    /// Cells covered by the half-open box `[pos, pos + size)`
    pub fn span(&self, pos: Vec2, size: Vec2) -> CellSpan {
        let lo = pos / self.tile_size;
        let hi = (pos + size) / self.tile_size;
        CellSpan {
            col_min: (lo.x + CELL_EPSILON).floor() as i32,
            col_max: (hi.x - CELL_EPSILON).ceil() as i32 - 1,
            row_min: (lo.y + CELL_EPSILON).floor() as i32,
            row_max: (hi.y - CELL_EPSILON).ceil() as i32 - 1,
        }
    }

    fn any_solid(&self, cells: impl Iterator<Item = Cell>) -> bool {
        cells.map(|c| self.tile(c)).any(Tile::is_solid)
    }

    /// Does the box's right edge column contain a solid cell?
    pub fn collision_move_right(&self, pos: Vec2, size: Vec2) -> bool {
        let s = self.span(pos, size);
        self.any_solid((s.row_min..=s.row_max).map(|row| (s.col_max, row)))
    }

    /// Does the box's left edge column contain a solid cell?
    pub fn collision_move_left(&self, pos: Vec2, size: Vec2) -> bool {
        let s = self.span(pos, size);
        self.any_solid((s.row_min..=s.row_max).map(|row| (s.col_min, row)))
    }

    /// Does the box's top edge row contain a solid cell? (up is -y)
    pub fn collision_move_up(&self, pos: Vec2, size: Vec2) -> bool {
        let s = self.span(pos, size);
        self.any_solid((s.col_min..=s.col_max).map(|col| (col, s.row_min)))
    }

    /// Does the box's bottom edge row contain a solid cell? (down is +y)
    pub fn collision_move_down(&self, pos: Vec2, size: Vec2) -> bool {
        let s = self.span(pos, size);
        self.any_solid((s.col_min..=s.col_max).map(|col| (col, s.row_max)))
    }

    /// Does the box overlap any solid cell?
    pub fn overlaps_solid(&self, pos: Vec2, size: Vec2) -> bool {
        let s = self.span(pos, size);
        self.any_solid(s.cells())
    }

    /// Left edge x that puts a box flush against the left side of its right
    /// edge column
    pub fn snap_left_of(&self, pos: Vec2, size: Vec2) -> f32 {
        let s = self.span(pos, size);
        s.col_max as f32 * self.tile_size - size.x
    }

    /// Left edge x that puts a box flush against the right side of its left
    /// edge column
    pub fn snap_right_of(&self, pos: Vec2, size: Vec2) -> f32 {
        let s = self.span(pos, size);
        (s.col_min + 1) as f32 * self.tile_size
    }

    /// Top edge y that puts a box flush on top of its bottom edge row
    pub fn snap_above(&self, pos: Vec2, size: Vec2) -> f32 {
        let s = self.span(pos, size);
        s.row_max as f32 * self.tile_size - size.y
    }

    /// Top edge y that puts a box flush below its top edge row
    pub fn snap_below(&self, pos: Vec2, size: Vec2) -> f32 {
        let s = self.span(pos, size);
        (s.row_min + 1) as f32 * self.tile_size
    }

    /// Non-empty tiles the box covers, with their cells (in-grid only)
    pub fn tiles_under(&self, pos: Vec2, size: Vec2) -> Vec<(Cell, Tile)> {
        let s = self.span(pos, size);
        s.cells()
            .filter(|&(col, row)| {
                col >= 0 && row >= 0 && (col as usize) < self.width && (row as usize) < self.height
            })
            .map(|c| (c, self.tile(c)))
            .filter(|&(_, t)| t != Tile::Empty)
            .collect()
    }
}
