//! Rectangle collision tests
//!
//! Every collider in a level is an axis-aligned box in the xy plane: the
//! actor, walls, hazards, buttons and switches. Boxes are half-open, so two
//! boxes that only share an edge do not overlap.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Axis of a push-out or bounce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub fn of(v: Vec2, axis: Axis) -> f32 {
        match axis {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }
}

/// Cardinal direction, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Up,
    Left,
    Down,
    Right,
}

impl Orientation {
    /// Unit vector in world space
    pub fn dir(self) -> Vec2 {
        match self {
            Orientation::Up => Vec2::new(0.0, -1.0),
            Orientation::Left => Vec2::new(-1.0, 0.0),
            Orientation::Down => Vec2::new(0.0, 1.0),
            Orientation::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Axis-aligned box: `min` corner plus `size`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Box of an object placed at `position` (z ignored)
    pub fn at(position: Vec3, size: Vec2) -> Self {
        Self::new(position.truncate(), size)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap test (shared edges do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }

    /// Offset along `axis` that moves `self` out of `other`, toward the side
    /// of `other` that `self`'s center is on. `None` when not overlapping.
    pub fn push_out(&self, other: &Aabb, axis: Axis) -> Option<f32> {
        if !self.overlaps(other) {
            return None;
        }
        let (min, max) = (Axis::of(self.min, axis), Axis::of(self.max(), axis));
        let (o_min, o_max) = (Axis::of(other.min, axis), Axis::of(other.max(), axis));
        if Axis::of(self.center(), axis) < Axis::of(other.center(), axis) {
            Some(o_min - max)
        } else {
            Some(o_max - min)
        }
    }
}

/// Turn `velocity` along `axis` so it points from `obstacle` toward `body`.
///
/// An approaching body gets its component negated; a body already leaving
/// keeps it. Returns true when the component changed sign.
pub fn bounce_away(velocity: &mut Vec2, axis: Axis, body: &Aabb, obstacle: &Aabb) -> bool {
    let away = match axis {
        Axis::X => body.center().x - obstacle.center().x,
        Axis::Y => body.center().y - obstacle.center().y,
    };
    let component = match axis {
        Axis::X => &mut velocity.x,
        Axis::Y => &mut velocity.y,
    };
    let desired = if away >= 0.0 { component.abs() } else { -component.abs() };
    let flipped = desired != *component;
    *component = desired;
    flipped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_strict() {
        let a = Aabb::new(Vec2::ZERO, Vec2::ONE);
        let touching = Aabb::new(Vec2::new(1.0, 0.0), Vec2::ONE);
        let inside = Aabb::new(Vec2::new(0.5, 0.5), Vec2::ONE);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_orientation_dir_y_down() {
        assert_eq!(Orientation::Down.dir(), Vec2::Y);
        assert_eq!(Orientation::Up.dir(), -Vec2::Y);
        assert_eq!(Orientation::default(), Orientation::Up);
    }

    #[test]
    fn test_push_out_picks_near_side() {
        let wall = Aabb::new(Vec2::new(2.0, 0.0), Vec2::new(0.5, 4.0));
        let left = Aabb::new(Vec2::new(1.2, 1.0), Vec2::ONE);
        let dx = left.push_out(&wall, Axis::X).unwrap();
        assert!((dx - (-0.2)).abs() < 1e-6);

        let right = Aabb::new(Vec2::new(2.3, 1.0), Vec2::ONE);
        let dx = right.push_out(&wall, Axis::X).unwrap();
        assert!((dx - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_away_only_flips_approach() {
        let wall = Aabb::new(Vec2::new(2.0, 0.0), Vec2::new(0.5, 4.0));
        let body = Aabb::new(Vec2::new(1.2, 1.0), Vec2::ONE);

        let mut approaching = Vec2::new(3.0, 1.5);
        assert!(bounce_away(&mut approaching, Axis::X, &body, &wall));
        assert_eq!(approaching, Vec2::new(-3.0, 1.5));

        let mut leaving = Vec2::new(-3.0, 1.5);
        assert!(!bounce_away(&mut leaving, Axis::X, &body, &wall));
        assert_eq!(leaving, Vec2::new(-3.0, 1.5));
    }
}
