//! Kinematic body: a box with a velocity
//!
//! Explicit Euler, one step per tick. Velocity is in pixels/tick and is not
//! scaled by frame time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::BoundingBox;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub rect: BoundingBox,
    pub vel: Vec2,
}

impl Body {
    /// A body at rest
    pub fn at_rest(rect: BoundingBox) -> Self {
        Self {
            rect,
            vel: Vec2::ZERO,
        }
    }

    pub fn with_velocity(rect: BoundingBox, vel: Vec2) -> Self {
        Self { rect, vel }
    }

    /// Accumulate one tick of downward acceleration
    #[inline]
    pub fn apply_gravity(&mut self, gravity: f32) {
        self.vel.y += gravity;
    }

    #[inline]
    pub fn advance_x(&mut self) {
        self.rect.x += self.vel.x;
    }

    #[inline]
    pub fn advance_y(&mut self) {
        self.rect.y += self.vel.y;
    }

    /// Move by the current velocity on both axes
    pub fn integrate(&mut self) {
        self.advance_x();
        self.advance_y();
    }

    /// Gravity then movement: the standard per-tick step
    pub fn step(&mut self, gravity: f32) {
        self.apply_gravity(gravity);
        self.integrate();
    }

    /// Place the body and zero its velocity
    pub fn reset(&mut self, x: f32, y: f32) {
        self.rect.set_position(x, y);
        self.vel = Vec2::ZERO;
    }
}
