//! Interactive level objects
//!
//! Walls, hazards, buttons and switches are small independent state
//! machines. Each one updates itself and exposes a bounding box; the actor
//! controller treats them all as "update, then query".
//!
//! Cross references go through [`SwitchId`] indices into the scene's switch
//! list: buttons toggle switches, gated walls read them.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Axis, Orientation};
use crate::approach;

/// Index of a switch in the level's switch list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwitchId(pub usize);

/// Two-state switch
#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub position: Vec3,
    pub size: Vec2,
    active: bool,
    /// Actor currently overlapping (render/audio feedback only)
    pub touched: bool,
}

impl Switch {
    pub fn new(position: Vec3, size: Vec2, active: bool) -> Self {
        Self {
            position,
            size,
            active,
            touched: false,
        }
    }

    pub fn toggle(&mut self) {
        self.active = !self.active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::at(self.position, self.size)
    }
}

/// Momentary button that toggles its linked switches
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub position: Vec3,
    pub size: Vec2,
    /// Surface the button sits on
    pub orientation: Orientation,
    pub switches: Vec<SwitchId>,
    pressed: bool,
}

impl Button {
    pub fn new(
        position: Vec3,
        size: Vec2,
        orientation: Orientation,
        switches: Vec<SwitchId>,
    ) -> Self {
        Self {
            position,
            size,
            orientation,
            switches,
            pressed: false,
        }
    }

    /// Press the button. Linked switches toggle only on the press
    /// transition; returns true when they did.
    pub fn press(&mut self, switches: &mut [Switch]) -> bool {
        if self.pressed {
            return false;
        }
        self.pressed = true;
        for id in &self.switches {
            if let Some(switch) = switches.get_mut(id.0) {
                switch.toggle();
            }
        }
        log::debug!("Button pressed, toggled {} switch(es)", self.switches.len());
        true
    }

    /// Actor left the footprint; the next contact presses again
    pub fn release(&mut self) {
        self.pressed = false;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::at(self.position, self.size)
    }
}

/// Travel range along a wall's orientation axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Lowest coordinate of the wall's min corner along the axis
    pub min: f32,
    /// Highest coordinate of the wall's min corner along the axis
    pub max: f32,
    /// Units per second
    pub speed: f32,
    /// Current patrol direction (+1 / -1)
    #[serde(default = "default_heading")]
    pub heading: f32,
    /// Chase the actor instead of patrolling
    #[serde(default)]
    pub follow: bool,
}

fn default_heading() -> f32 {
    1.0
}

impl Track {
    /// Next coordinate along the axis
    fn step(&mut self, current: f32, dt: f32, target: f32) -> f32 {
        if self.follow {
            return approach(current, target.clamp(self.min, self.max), self.speed * dt);
        }

        let mut next = current + self.heading * self.speed * dt;
        if next >= self.max {
            next = self.max;
            self.heading = -1.0;
        } else if next <= self.min {
            next = self.min;
            self.heading = 1.0;
        }
        next
    }
}

/// How a wall moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WallBehavior {
    Fixed,
    Moving(Track),
    /// Moves only while its switch is active
    Gated { switch: SwitchId, track: Track },
}

/// Bouncing wall
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    pub position: Vec3,
    pub size: Vec2,
    /// Vertical walls stand upright, move along y and flip horizontal velocity
    pub vertical: bool,
    pub behavior: WallBehavior,
}

impl Wall {
    pub fn new(position: Vec3, size: Vec2, vertical: bool, behavior: WallBehavior) -> Self {
        Self {
            position,
            size,
            vertical,
            behavior,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::at(self.position, self.size)
    }

    /// Axis the wall travels along
    pub fn travel_axis(&self) -> Axis {
        if self.vertical { Axis::Y } else { Axis::X }
    }

    /// Velocity component the wall reflects
    pub fn bounce_axis(&self) -> Axis {
        if self.vertical { Axis::X } else { Axis::Y }
    }

    /// Switch gating this wall, if any
    pub fn gate(&self) -> Option<SwitchId> {
        match self.behavior {
            WallBehavior::Gated { switch, .. } => Some(switch),
            _ => None,
        }
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32, actor_pos: Vec3, actor_size: Vec2, switches: &[Switch]) {
        let axis = self.travel_axis();
        let actor_center = Aabb::at(actor_pos, actor_size).center();
        // Wall min corner that would center it on the actor
        let target = Axis::of(actor_center, axis) - Axis::of(self.size, axis) * 0.5;
        let current = Axis::of(self.position.truncate(), axis);

        let next = match &mut self.behavior {
            WallBehavior::Fixed => return,
            WallBehavior::Moving(track) => track.step(current, dt, target),
            WallBehavior::Gated { switch, track } => {
                let open = switches.get(switch.0).is_some_and(Switch::is_active);
                if !open {
                    return;
                }
                track.step(current, dt, target)
            }
        };

        match axis {
            Axis::X => self.position.x = next,
            Axis::Y => self.position.y = next,
        }
    }
}

/// Tuning for a hazard's motion and lethal window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardParams {
    pub size: Vec2,
    /// Max distance from the anchor along the tracking axis
    pub range: f32,
    /// Tracking speed (units/s)
    pub speed: f32,
    /// Full cycle length (seconds)
    pub period: f32,
    /// Lethal share of the cycle, from its start
    pub active_fraction: f32,
}

impl Default for HazardParams {
    fn default() -> Self {
        Self {
            size: Vec2::splat(0.8),
            range: 2.0,
            speed: 2.0,
            period: 2.0,
            active_fraction: 0.5,
        }
    }
}

/// Spiked ball: slides toward the actor along one axis, lethal during part
/// of its cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    pub anchor: Vec3,
    pub position: Vec3,
    /// Tracks along y and runs half a cycle out of phase when set
    pub vertical: bool,
    pub params: HazardParams,
    phase: f32,
}

impl Hazard {
    pub fn new(anchor: Vec3, vertical: bool, params: HazardParams) -> Self {
        let phase = if vertical { params.period * 0.5 } else { 0.0 };
        Self {
            anchor,
            position: anchor,
            vertical,
            params,
            phase,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::at(self.position, self.params.size)
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Lethal right now?
    pub fn is_dangerous(&self) -> bool {
        if self.params.period <= 0.0 {
            return true;
        }
        self.phase < self.params.period * self.params.active_fraction
    }

    /// Advance the cycle and slide toward the actor
    pub fn update(&mut self, dt: f32, actor_pos: Vec3, actor_size: Vec2) {
        if self.params.period > 0.0 {
            self.phase = (self.phase + dt).rem_euclid(self.params.period);
        }

        let axis = if self.vertical { Axis::Y } else { Axis::X };
        let actor_center = Aabb::at(actor_pos, actor_size).center();
        let target = Axis::of(actor_center, axis) - Axis::of(self.params.size, axis) * 0.5;
        let anchor = Axis::of(self.anchor.truncate(), axis);
        let target = target.clamp(anchor - self.params.range, anchor + self.params.range);
        let step = self.params.speed * dt;

        match axis {
            Axis::X => self.position.x = approach(self.position.x, target, step),
            Axis::Y => self.position.y = approach(self.position.y, target, step),
        }
    }
}

/// Every interactive object of a level, indexed stably for the level's
/// lifetime
#[derive(Debug, Clone, Default)]
pub struct Interactives {
    pub walls: Vec<Wall>,
    pub hazards: Vec<Hazard>,
    pub buttons: Vec<Button>,
    pub switches: Vec<Switch>,
}

impl Interactives {
    /// Move walls and hazards against the actor's resolved position
    pub fn update(&mut self, dt: f32, actor_pos: Vec3, actor_size: Vec2) {
        for wall in &mut self.walls {
            wall.update(dt, actor_pos, actor_size, &self.switches);
        }
        for hazard in &mut self.hazards {
            hazard.update(dt, actor_pos, actor_size);
        }
    }
}
