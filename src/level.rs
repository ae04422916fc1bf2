//! Level descriptions
//!
//! What the level loader hands over: tile rows, framing, and the initial
//! placement and linkage of every interactive object. Linkage is checked
//! here, once, so the simulation can index switches without failing.

use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::collision::Orientation;
use crate::sim::grid::TileGrid;
use crate::sim::objects::{
    Button, Hazard, HazardParams, Interactives, Switch, SwitchId, Wall, WallBehavior,
};

/// Default edge of buttons and switches
const PAD_SIZE: f32 = 0.5;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to parse level: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read level file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("level has no tiles")]
    EmptyGrid,
    #[error("tile size must be positive and finite, got {0}")]
    InvalidTileSize(f32),
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("unknown tile {ch:?} at row {row}, column {col}")]
    UnknownTile { row: usize, col: usize, ch: char },
    #[error("{object} {index} references switch {switch}, level has {count}")]
    InvalidLinkage {
        object: &'static str,
        index: usize,
        switch: usize,
        count: usize,
    },
    #[error("spawn point {0} overlaps solid tiles")]
    SpawnInsideSolid(Vec2),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallDesc {
    pub position: Vec2,
    pub size: Vec2,
    #[serde(default)]
    pub vertical: bool,
    #[serde(default = "fixed_wall")]
    pub behavior: WallBehavior,
}

fn fixed_wall() -> WallBehavior {
    WallBehavior::Fixed
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardDesc {
    pub position: Vec2,
    #[serde(default)]
    pub vertical: bool,
    #[serde(default)]
    pub params: HazardParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonDesc {
    pub position: Vec2,
    #[serde(default)]
    pub orientation: Orientation,
    pub switches: Vec<SwitchId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchDesc {
    pub position: Vec2,
    #[serde(default)]
    pub active: bool,
}

/// One level as handed over by the loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDesc {
    #[serde(default)]
    pub name: String,
    /// Tile rows, top to bottom (`#` solid, `.` empty, `C` checkpoint,
    /// `^` spikes, `G` goal)
    pub rows: Vec<String>,
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    /// Actor spawn (min corner); also the first checkpoint
    pub spawn: Vec2,
    /// Visible room extent
    pub room_size: Vec2,
    /// Initial camera center; z is the viewing distance
    pub camera_center: Vec3,
    /// Camera travel per pan, per axis
    pub camera_movement: Vec2,
    /// Celebration level: camera follows, victory timer runs
    #[serde(default)]
    pub terminal: bool,
    /// Theme/music style index for the host
    #[serde(default)]
    pub style: u32,
    #[serde(default)]
    pub walls: Vec<WallDesc>,
    #[serde(default)]
    pub hazards: Vec<HazardDesc>,
    #[serde(default)]
    pub buttons: Vec<ButtonDesc>,
    #[serde(default)]
    pub switches: Vec<SwitchDesc>,
}

fn default_tile_size() -> f32 {
    1.0
}

impl LevelDesc {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Build the tile grid
    pub fn grid(&self) -> Result<TileGrid, LevelError> {
        TileGrid::from_rows(self.rows.as_slice(), self.tile_size)
    }

    /// Check everything the simulation relies on without re-checking
    pub fn validate(&self, actor_size: Vec2) -> Result<TileGrid, LevelError> {
        let grid = self.grid()?;
        let count = self.switches.len();

        for (index, button) in self.buttons.iter().enumerate() {
            if let Some(bad) = button.switches.iter().find(|id| id.0 >= count) {
                return Err(LevelError::InvalidLinkage {
                    object: "button",
                    index,
                    switch: bad.0,
                    count,
                });
            }
        }
        for (index, wall) in self.walls.iter().enumerate() {
            if let WallBehavior::Gated { switch, .. } = wall.behavior {
                if switch.0 >= count {
                    return Err(LevelError::InvalidLinkage {
                        object: "wall",
                        index,
                        switch: switch.0,
                        count,
                    });
                }
            }
        }

        if grid.overlaps_solid(self.spawn, actor_size) {
            return Err(LevelError::SpawnInsideSolid(self.spawn));
        }

        Ok(grid)
    }

    /// Instantiate the interactive objects
    pub fn interactives(&self) -> Interactives {
        let z = crate::consts::RENDER_DEPTH;
        Interactives {
            walls: self
                .walls
                .iter()
                .map(|w| Wall::new(w.position.extend(z), w.size, w.vertical, w.behavior))
                .collect(),
            hazards: self
                .hazards
                .iter()
                .map(|h| Hazard::new(h.position.extend(z), h.vertical, h.params))
                .collect(),
            buttons: self
                .buttons
                .iter()
                .map(|b| {
                    Button::new(
                        b.position.extend(z),
                        Vec2::splat(PAD_SIZE),
                        b.orientation,
                        b.switches.clone(),
                    )
                })
                .collect(),
            switches: self
                .switches
                .iter()
                .map(|s| Switch::new(s.position.extend(z), Vec2::splat(PAD_SIZE), s.active))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::objects::Track;

    const LEVEL: &str = r######"{
        "name": "test",
        "rows": ["#####", "#...#", "#.C.#", "#####"],
        "spawn": [1.1, 1.1],
        "room_size": [5.0, 4.0],
        "camera_center": [2.5, 2.0, 10.0],
        "camera_movement": [5.0, 4.0],
        "walls": [
            { "position": [3.0, 1.0], "size": [0.2, 2.0], "vertical": true },
            { "position": [1.0, 2.5], "size": [2.0, 0.2],
              "behavior": { "kind": "gated", "switch": 0,
                            "track": { "min": 1.0, "max": 2.0, "speed": 1.0 } } }
        ],
        "hazards": [{ "position": [2.0, 2.0], "vertical": true }],
        "buttons": [{ "position": [1.0, 2.5], "orientation": "down", "switches": [0] }],
        "switches": [{ "position": [3.0, 2.5] }]
    }"######;

    #[test]
    fn test_parse_and_build() {
        let level = LevelDesc::from_json(LEVEL).unwrap();
        let grid = level.validate(Vec2::splat(0.8)).unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 4);

        let objects = level.interactives();
        assert_eq!(objects.walls.len(), 2);
        assert_eq!(objects.walls[0].behavior, WallBehavior::Fixed);
        assert_eq!(
            objects.walls[1].gate(),
            Some(SwitchId(0)),
        );
        assert!(matches!(
            objects.walls[1].behavior,
            WallBehavior::Gated {
                track: Track { heading, follow: false, .. },
                ..
            } if heading == 1.0
        ));
        assert_eq!(objects.buttons[0].orientation, Orientation::Down);
        assert!(!objects.switches[0].is_active());
        assert!(objects.hazards[0].vertical);
    }

    #[test]
    fn test_button_linkage_out_of_range() {
        let mut level = LevelDesc::from_json(LEVEL).unwrap();
        level.buttons[0].switches.push(SwitchId(3));
        let err = level.validate(Vec2::splat(0.8)).unwrap_err();
        assert!(matches!(
            err,
            LevelError::InvalidLinkage { object: "button", index: 0, switch: 3, count: 1 }
        ));
    }

    #[test]
    fn test_wall_linkage_out_of_range() {
        let mut level = LevelDesc::from_json(LEVEL).unwrap();
        level.switches.clear();
        level.buttons.clear();
        let err = level.validate(Vec2::splat(0.8)).unwrap_err();
        assert!(matches!(err, LevelError::InvalidLinkage { object: "wall", index: 1, .. }));
    }

    #[test]
    fn test_spawn_inside_solid() {
        let mut level = LevelDesc::from_json(LEVEL).unwrap();
        level.spawn = Vec2::new(0.5, 0.5);
        assert!(matches!(
            level.validate(Vec2::splat(0.8)),
            Err(LevelError::SpawnInsideSolid(_))
        ));
    }

    #[test]
    fn test_non_positive_tile_size() {
        let mut level = LevelDesc::from_json(LEVEL).unwrap();
        level.tile_size = -1.0;
        assert!(matches!(
            level.validate(Vec2::splat(0.8)),
            Err(LevelError::InvalidTileSize(size)) if size == -1.0
        ));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(LevelDesc::from_json("{"), Err(LevelError::Parse(_))));
    }
}
