//! Collision detection and response for axis-aligned boxes
//!
//! The core of the platformer: push a moving body out of static obstacles
//! along whichever axis needs the shortest correction.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::rect::BoundingBox;

/// Axis a contact was resolved on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Penetration depth of one box into another on each axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    pub x: f32,
    pub y: f32,
}

impl Penetration {
    /// Axis with the smaller depth; ties go to Y
    pub fn shortest_axis(&self) -> Axis {
        if self.x < self.y { Axis::X } else { Axis::Y }
    }
}

/// Penetration of `a` into `b`, or `None` when they do not overlap
pub fn penetration(a: &BoundingBox, b: &BoundingBox) -> Option<Penetration> {
    if !a.overlaps(b) {
        return None;
    }
    Some(Penetration {
        x: (a.right() - b.x).min(b.right() - a.x),
        y: (a.bottom() - b.y).min(b.bottom() - a.y),
    })
}

/// Result of resolving a body against one obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Axis the body was pushed along
    pub axis: Axis,
    /// Distance the body was moved
    pub depth: f32,
    /// Body was pushed up out of the obstacle's top surface
    pub landed: bool,
}

/// Push `body` out of `obstacle` along the axis of least penetration
///
/// The velocity component on the resolved axis is zeroed. Returns `None`
/// (and leaves the body untouched) when the boxes do not overlap.
pub fn resolve_contact(body: &mut Body, obstacle: &BoundingBox) -> Option<Contact> {
    let pen = penetration(&body.rect, obstacle)?;

    match pen.shortest_axis() {
        Axis::X => {
            if body.rect.x < obstacle.x {
                body.rect.x -= pen.x;
            } else {
                body.rect.x += pen.x;
            }
            body.vel.x = 0.0;
            Some(Contact {
                axis: Axis::X,
                depth: pen.x,
                landed: false,
            })
        }
        Axis::Y => {
            let landed = body.rect.y < obstacle.y;
            if landed {
                body.rect.y -= pen.y;
            } else {
                body.rect.y += pen.y;
            }
            body.vel.y = 0.0;
            Some(Contact {
                axis: Axis::Y,
                depth: pen.y,
                landed,
            })
        }
    }
}

/// Summary of resolving a body against a set of obstacles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Number of obstacles the body was pushed out of
    pub contacts: u32,
    /// At least one contact pushed the body up onto a top surface
    pub landed: bool,
}

/// Resolve a body against every obstacle, one at a time, in iteration order
///
/// Each obstacle sees the position left by the previous one. There is no
/// convergence pass, so a body wedged between obstacles can end up
/// overlapping an earlier one again.
pub fn resolve_against<'a, I>(body: &mut Body, obstacles: I) -> Resolution
where
    I: IntoIterator<Item = &'a BoundingBox>,
{
    let mut resolution = Resolution::default();
    for obstacle in obstacles {
        if let Some(contact) = resolve_contact(body, obstacle) {
            resolution.contacts += 1;
            resolution.landed |= contact.landed;
        }
    }
    resolution
}

/// Enemy-style resolution: only handles falling onto an obstacle from above
///
/// Snaps the body onto the top surface of every overlapping obstacle whose
/// top is below the body's top, and zeroes vertical velocity. Side and
/// ceiling contacts are ignored. Returns whether any snap happened.
pub fn land_from_above<'a, I>(body: &mut Body, obstacles: I) -> bool
where
    I: IntoIterator<Item = &'a BoundingBox>,
{
    let mut landed = false;
    for obstacle in obstacles {
        if body.rect.overlaps(obstacle) && body.rect.y < obstacle.y {
            body.rect.y = obstacle.y - body.rect.h();
            body.vel.y = 0.0;
            landed = true;
        }
    }
    landed
}
