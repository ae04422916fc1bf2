//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Time only advances through the `dt` passed to `update`
//! - Objects are updated in stable index order
//! - No rendering, audio engine or platform dependencies

pub mod actor;
pub mod camera;
pub mod collision;
pub mod fade;
pub mod grid;
pub mod objects;
pub mod scene;

pub use actor::{Actor, ActorEvent};
pub use camera::{CamMove, Camera};
pub use collision::{Aabb, Axis, Orientation};
pub use fade::{Fade, FadePhase, SceneOutcome};
pub use grid::{Cell, Tile, TileGrid};
pub use objects::{
    Button, Hazard, HazardParams, Interactives, Switch, SwitchId, Track, Wall, WallBehavior,
};
pub use scene::{Checkpoint, Scene, Volumes};
