//! Actor controller
//!
//! The actor never stops: it bounces. Movement is integrated one axis at a
//! time (all of X, then all of Y) so a diagonal approach into a corner
//! resolves against exactly one tile face. Each axis move is checked against
//! the tile grid and snapped flush on contact, then the actor is tested
//! against walls, tiles with effects, hazards, buttons and switches.
//!
//! Long frames are split into substeps so no substep advances farther than
//! half the smaller of the actor and a tile.

use glam::{Vec2, Vec3};

use super::collision::{Aabb, Axis, Orientation, bounce_away};
use super::grid::{Cell, Tile, TileGrid};
use super::objects::{Interactives, Wall};
use crate::consts::DEATH_ROUND_TIME;
use crate::input::{KEY_SPACE, KeyCode, KeyState};
use crate::settings::Settings;

/// Something the actor ran into this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActorEvent {
    /// Bounced off tile geometry on the given side
    TileBounce(Orientation),
    /// Bounced off the wall at this index
    WallBounce(usize),
    /// Pressed the button at this index (linked switches toggled)
    ButtonPressed(usize),
    /// Started touching the switch at this index
    SwitchTouched(usize),
    /// Action key reversed vertical motion
    Reversed,
    /// Killed by spikes or a hazard
    Died,
    /// Entered a new checkpoint tile at this position
    CheckpointReached(Vec3),
    /// Touched the goal tile
    GoalReached,
}

/// The player-controlled box
#[derive(Debug, Clone)]
pub struct Actor {
    position: Vec3,
    size: Vec2,
    velocity: Vec2,
    /// Side of the last impact (drives the squash animation)
    orientation: Orientation,
    dead: bool,
    /// Time since death (kill sequence)
    death_timer: f32,
    death_rounds: u32,
    rotate_timer: f32,
    squash_timer: f32,
    line_volume: f32,
    /// Last checkpoint cell reported, so standing on it reports once
    last_checkpoint: Option<Cell>,
    goal_reached: bool,

    rotate_time: f32,
    squash_time: f32,
    max_substeps: u32,
}

impl Actor {
    pub fn new(position: Vec3, settings: &Settings) -> Self {
        Self {
            position,
            size: settings.actor_size,
            velocity: settings.actor_velocity,
            orientation: Orientation::default(),
            dead: false,
            death_timer: 0.0,
            death_rounds: 0,
            rotate_timer: 0.0,
            squash_timer: 0.0,
            line_volume: settings.line_volume,
            last_checkpoint: None,
            goal_reached: false,
            rotate_time: settings.rotate_time,
            squash_time: settings.squash_time,
            max_substeps: settings.max_substeps.max(1),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Completed spins of the kill sequence
    pub fn death_rounds(&self) -> u32 {
        self.death_rounds
    }

    /// Remaining share of the reverse rotation animation (1 → 0)
    pub fn rotate_progress(&self) -> f32 {
        if self.rotate_time > 0.0 { self.rotate_timer / self.rotate_time } else { 0.0 }
    }

    /// Remaining share of the impact squash animation (1 → 0)
    pub fn squash_progress(&self) -> f32 {
        if self.squash_time > 0.0 { self.squash_timer / self.squash_time } else { 0.0 }
    }

    pub fn line_volume(&self) -> f32 {
        self.line_volume
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::at(self.position, self.size)
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn set_dead(&mut self, dead: bool) {
        self.dead = dead;
        self.death_timer = 0.0;
        self.death_rounds = 0;
    }

    /// Drop the memory of the last checkpoint tile, so entering it again
    /// signals again
    pub fn forget_checkpoint(&mut self) {
        self.last_checkpoint = None;
    }

    pub fn set_line_volume(&mut self, volume: f32) {
        self.line_volume = volume.clamp(0.0, 1.0);
    }

    /// Discrete key press. The action key reverses vertical velocity, but only
    /// on the press edge: auto-repeat while held is ignored.
    pub fn key_pressed(&mut self, key: KeyCode, keys: &dyn KeyState) -> Option<ActorEvent> {
        if key != KEY_SPACE || keys.is_held(key) || self.dead {
            return None;
        }
        self.velocity.y = -self.velocity.y;
        self.rotate_timer = self.rotate_time;
        Some(ActorEvent::Reversed)
    }

    /// Advance one frame against the level
    pub fn update(
        &mut self,
        dt: f32,
        grid: &TileGrid,
        objects: &mut Interactives,
        god_mode: bool,
    ) -> Vec<ActorEvent> {
        let mut events = Vec::new();

        self.rotate_timer = (self.rotate_timer - dt).max(0.0);
        self.squash_timer = (self.squash_timer - dt).max(0.0);

        if self.dead {
            self.death_timer += dt;
            self.death_rounds = (self.death_timer / DEATH_ROUND_TIME) as u32;
            return events;
        }

        let steps = self.substeps(dt, grid.tile_size());
        let h = dt / steps as f32;
        for _ in 0..steps {
            self.move_x(h, grid, &mut events);
            self.move_y(h, grid, &mut events);
            self.collide_walls(grid, &objects.walls, &mut events);
        }

        self.collide_tiles(grid, god_mode, &mut events);
        if !self.dead && !god_mode {
            self.collide_hazards(objects, &mut events);
        }
        self.collide_buttons(objects, &mut events);
        self.collide_switches(objects, &mut events);

        events
    }

    fn substeps(&self, dt: f32, tile_size: f32) -> u32 {
        let travel = self.velocity.abs().max_element() * dt;
        let limit = 0.5 * self.size.min_element().min(tile_size);
        if travel <= limit || limit <= 0.0 {
            return 1;
        }
        ((travel / limit).ceil() as u32).clamp(1, self.max_substeps)
    }

    fn move_x(&mut self, h: f32, grid: &TileGrid, events: &mut Vec<ActorEvent>) {
        let mut pos = self.position.truncate();
        pos.x += self.velocity.x * h;

        if self.velocity.x > 0.0 && grid.collision_move_right(pos, self.size) {
            pos.x = grid.snap_left_of(pos, self.size);
            self.velocity.x = -self.velocity.x.abs();
            self.impact(Orientation::Right);
            events.push(ActorEvent::TileBounce(Orientation::Right));
        } else if self.velocity.x < 0.0 && grid.collision_move_left(pos, self.size) {
            pos.x = grid.snap_right_of(pos, self.size);
            self.velocity.x = self.velocity.x.abs();
            self.impact(Orientation::Left);
            events.push(ActorEvent::TileBounce(Orientation::Left));
        }

        self.position.x = pos.x;
    }

    fn move_y(&mut self, h: f32, grid: &TileGrid, events: &mut Vec<ActorEvent>) {
        let mut pos = self.position.truncate();
        pos.y += self.velocity.y * h;

        if self.velocity.y > 0.0 && grid.collision_move_down(pos, self.size) {
            pos.y = grid.snap_above(pos, self.size);
            self.velocity.y = -self.velocity.y.abs();
            self.impact(Orientation::Down);
            events.push(ActorEvent::TileBounce(Orientation::Down));
        } else if self.velocity.y < 0.0 && grid.collision_move_up(pos, self.size) {
            pos.y = grid.snap_below(pos, self.size);
            self.velocity.y = self.velocity.y.abs();
            self.impact(Orientation::Up);
            events.push(ActorEvent::TileBounce(Orientation::Up));
        }

        self.position.y = pos.y;
    }

    /// Walls deflect: the velocity component across the wall is turned to
    /// point away from it, and the actor is pushed out when that leaves it in
    /// free space.
    fn collide_walls(&mut self, grid: &TileGrid, walls: &[Wall], events: &mut Vec<ActorEvent>) {
        for (index, wall) in walls.iter().enumerate() {
            let body = self.aabb();
            let obstacle = wall.aabb();
            let axis = wall.bounce_axis();
            let Some(offset) = body.push_out(&obstacle, axis) else {
                continue;
            };

            // Snap flush against the near face
            let mut pos = self.position.truncate();
            match (axis, offset < 0.0) {
                (Axis::X, true) => pos.x = obstacle.min.x - self.size.x,
                (Axis::X, false) => pos.x = obstacle.max().x,
                (Axis::Y, true) => pos.y = obstacle.min.y - self.size.y,
                (Axis::Y, false) => pos.y = obstacle.max().y,
            }
            if !grid.overlaps_solid(pos, self.size) {
                self.position.x = pos.x;
                self.position.y = pos.y;
            }

            if bounce_away(&mut self.velocity, axis, &body, &obstacle) {
                let side = match (axis, offset < 0.0) {
                    (Axis::X, true) => Orientation::Right,
                    (Axis::X, false) => Orientation::Left,
                    (Axis::Y, true) => Orientation::Down,
                    (Axis::Y, false) => Orientation::Up,
                };
                self.impact(side);
                events.push(ActorEvent::WallBounce(index));
            }
        }
    }

    fn collide_tiles(&mut self, grid: &TileGrid, god_mode: bool, events: &mut Vec<ActorEvent>) {
        for (cell, tile) in grid.tiles_under(self.position.truncate(), self.size) {
            match tile {
                Tile::Spikes if !god_mode && !self.dead => self.die(events),
                Tile::Checkpoint if self.last_checkpoint != Some(cell) => {
                    self.last_checkpoint = Some(cell);
                    events.push(ActorEvent::CheckpointReached(self.position));
                }
                Tile::Goal if !self.goal_reached => {
                    self.goal_reached = true;
                    events.push(ActorEvent::GoalReached);
                }
                _ => {}
            }
        }
    }

    fn collide_hazards(&mut self, objects: &Interactives, events: &mut Vec<ActorEvent>) {
        let body = self.aabb();
        let hit = objects
            .hazards
            .iter()
            .any(|hazard| hazard.is_dangerous() && body.overlaps(&hazard.aabb()));
        if hit {
            self.die(events);
        }
    }

    fn collide_buttons(&mut self, objects: &mut Interactives, events: &mut Vec<ActorEvent>) {
        let body = self.aabb();
        let Interactives { buttons, switches, .. } = objects;
        for (index, button) in buttons.iter_mut().enumerate() {
            if body.overlaps(&button.aabb()) {
                if button.press(switches) {
                    events.push(ActorEvent::ButtonPressed(index));
                }
            } else {
                button.release();
            }
        }
    }

    fn collide_switches(&mut self, objects: &mut Interactives, events: &mut Vec<ActorEvent>) {
        let body = self.aabb();
        for (index, switch) in objects.switches.iter_mut().enumerate() {
            let touching = body.overlaps(&switch.aabb());
            if touching && !switch.touched {
                events.push(ActorEvent::SwitchTouched(index));
            }
            switch.touched = touching;
        }
    }

    fn impact(&mut self, side: Orientation) {
        self.orientation = side;
        self.squash_timer = self.squash_time;
    }

    fn die(&mut self, events: &mut Vec<ActorEvent>) {
        self.set_dead(true);
        events.push(ActorEvent::Died);
    }
}
