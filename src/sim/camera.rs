//! Camera motion-state machine
//!
//! Rooms are framed statically. When the actor's leading edge crosses half
//! the room extent away from the camera, the camera pans one room over at a
//! fixed speed and stops exactly on its travel budget. The celebration level
//! uses FOLLOW instead and tracks the actor every frame.

use glam::{Vec2, Vec3};

/// Camera motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CamMove {
    #[default]
    Static,
    Left,
    Right,
    /// Toward -y
    Up,
    /// Toward +y
    Down,
    /// Track the actor (celebration level only)
    Follow,
}

/// Level camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Center of view; z is the viewing distance
    pub position: Vec3,
    /// Pan speed (units/s)
    pub velocity: f32,
    /// Per-axis distance of one pan (one room)
    pub movement: Vec2,
    state: CamMove,
    /// Distance left in the current pan
    remaining: f32,
    /// Coordinate the current pan ends on
    destination: f32,
}

impl Camera {
    pub fn new(position: Vec3, movement: Vec2, velocity: f32) -> Self {
        Self {
            position,
            velocity,
            movement,
            state: CamMove::Static,
            remaining: 0.0,
            destination: 0.0,
        }
    }

    pub fn state(&self) -> CamMove {
        self.state
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_static(&self) -> bool {
        self.state == CamMove::Static
    }

    /// Snap to a stored framing and stop any motion
    pub fn reset(&mut self, position: Vec3) {
        self.position = position;
        self.state = CamMove::Static;
        self.remaining = 0.0;
    }

    /// State the camera should be in given the actor's box. Only STATIC
    /// starts pans; horizontal crossings win over vertical ones.
    pub fn next_state(
        &self,
        actor_pos: Vec3,
        actor_size: Vec2,
        room: Vec2,
        follow: bool,
    ) -> CamMove {
        if follow {
            return CamMove::Follow;
        }
        if self.state != CamMove::Static {
            return self.state;
        }

        let half = room * 0.5;
        if actor_pos.x + actor_size.x - self.position.x > half.x {
            CamMove::Right
        } else if self.position.x - actor_pos.x > half.x {
            CamMove::Left
        } else if actor_pos.y + actor_size.y - self.position.y > half.y {
            CamMove::Down
        } else if self.position.y - actor_pos.y > half.y {
            CamMove::Up
        } else {
            CamMove::Static
        }
    }

    /// Run the transition for this frame, then move
    pub fn update(&mut self, dt: f32, actor_pos: Vec3, actor_size: Vec2, room: Vec2, follow: bool) {
        let next = self.next_state(actor_pos, actor_size, room, follow);
        if next != self.state {
            self.enter(next);
        }
        self.advance(dt, actor_pos);
    }

    fn enter(&mut self, state: CamMove) {
        let (remaining, destination) = match state {
            CamMove::Right => (self.movement.x, self.position.x + self.movement.x),
            CamMove::Left => (self.movement.x, self.position.x - self.movement.x),
            CamMove::Down => (self.movement.y, self.position.y + self.movement.y),
            CamMove::Up => (self.movement.y, self.position.y - self.movement.y),
            CamMove::Static | CamMove::Follow => (0.0, 0.0),
        };
        self.remaining = remaining;
        self.destination = destination;
        log::debug!("Camera {:?} -> {:?} (budget {})", self.state, state, self.remaining);
        self.state = state;
    }

    fn advance(&mut self, dt: f32, actor_pos: Vec3) {
        let (axis, sign) = match self.state {
            CamMove::Static => return,
            CamMove::Follow => {
                self.position.x = actor_pos.x;
                self.position.y = actor_pos.y;
                return;
            }
            CamMove::Right => (0, 1.0),
            CamMove::Left => (0, -1.0),
            CamMove::Down => (1, 1.0),
            CamMove::Up => (1, -1.0),
        };

        // Clamp the last step to the budget: no overshoot
        let step = (self.velocity * dt).min(self.remaining);
        self.position[axis] += sign * step;
        self.remaining -= step;

        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.position[axis] = self.destination;
            log::debug!("Camera pan done at {:?}", self.position);
            self.state = CamMove::Static;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ROOM: Vec2 = Vec2::new(10.0, 8.0);

    #[test]
    fn test_right_threshold_example() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 20.0), Vec2::new(10.0, 8.0), 40.0);
        // 6 + 1 - 0 > 5
        let actor = Vec3::new(6.0, 0.0, 0.0);
        assert_eq!(camera.next_state(actor, Vec2::ONE, ROOM, false), CamMove::Right);

        camera.update(0.1, actor, Vec2::ONE, ROOM, false);
        assert_eq!(camera.state(), CamMove::Right);
        assert!((camera.position.x - 4.0).abs() < 1e-5);
        assert!((camera.remaining() - 6.0).abs() < 1e-5);

        // Budget exhausted on the next frames, landing exactly on 10
        for _ in 0..3 {
            camera.update(0.1, actor, Vec2::ONE, ROOM, false);
        }
        assert_eq!(camera.state(), CamMove::Static);
        assert_eq!(camera.position.x, 10.0);
        // Depth untouched
        assert_eq!(camera.position.z, 20.0);
    }

    #[test]
    fn test_other_directions() {
        let camera = Camera::new(Vec3::ZERO, Vec2::new(10.0, 8.0), 40.0);
        let size = Vec2::ONE;
        assert_eq!(camera.next_state(Vec3::new(-5.5, 0.0, 0.0), size, ROOM, false), CamMove::Left);
        assert_eq!(camera.next_state(Vec3::new(0.0, 3.5, 0.0), size, ROOM, false), CamMove::Down);
        assert_eq!(camera.next_state(Vec3::new(0.0, -4.5, 0.0), size, ROOM, false), CamMove::Up);
        assert_eq!(camera.next_state(Vec3::new(1.0, 1.0, 0.0), size, ROOM, false), CamMove::Static);
    }

    #[test]
    fn test_pan_in_progress_ignores_other_crossings() {
        let mut camera = Camera::new(Vec3::ZERO, Vec2::new(10.0, 8.0), 1.0);
        camera.update(0.1, Vec3::new(6.0, 0.0, 0.0), Vec2::ONE, ROOM, false);
        assert_eq!(camera.state(), CamMove::Right);
        // Actor now far below: still panning right
        camera.update(0.1, Vec3::new(6.0, 30.0, 0.0), Vec2::ONE, ROOM, false);
        assert_eq!(camera.state(), CamMove::Right);
    }

    #[test]
    fn test_follow_tracks_actor() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 20.0), Vec2::new(10.0, 8.0), 40.0);
        camera.update(0.1, Vec3::new(3.0, -2.0, 0.0), Vec2::ONE, ROOM, true);
        assert_eq!(camera.state(), CamMove::Follow);
        assert_eq!(camera.position, Vec3::new(3.0, -2.0, 20.0));
    }

    proptest! {
        #[test]
        fn prop_pan_lands_exactly_on_budget(
            budget in 0.5f32..40.0,
            velocity in 2.0f32..60.0,
            dt in 0.01f32..0.5,
        ) {
            let mut camera = Camera::new(Vec3::ZERO, Vec2::new(budget, budget), velocity);
            let actor = Vec3::new(100.0, 0.0, 0.0);
            camera.update(dt, actor, Vec2::ONE, ROOM, false);

            let mut frames = 0;
            while camera.state() == CamMove::Right {
                prop_assert!(camera.position.x <= budget + 1e-2);
                camera.update(dt, Vec3::ZERO, Vec2::ONE, ROOM, false);
                frames += 1;
                prop_assert!(frames < 1_000_000);
            }
            prop_assert_eq!(camera.position.x, budget);
        }
    }
}
