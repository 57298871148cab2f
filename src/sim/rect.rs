//! Axis-aligned box geometry for actors, platforms and the world
//!
//! Screen convention: origin at the top-left, x grows right, y grows down.
//! A box is positioned by its top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected geometry at construction time
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("box size must be positive, got {w}x{h}")]
    NonPositiveSize { w: f32, h: f32 },
    #[error("box coordinates must be finite, got ({x}, {y}, {w}, {h})")]
    NonFinite { x: f32, y: f32, w: f32, h: f32 },
    #[error("world size must be positive and finite, got {width}x{height}")]
    InvalidWorld { width: f32, height: f32 },
}

/// An axis-aligned rectangle
///
/// Position is mutable, size is fixed for the lifetime of the box.
/// Deserializing goes through `BoundingBox::new`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoxFields")]
pub struct BoundingBox {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub(crate) w: f32,
    pub(crate) h: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Result<Self, GeometryError> {
        if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()) {
            return Err(GeometryError::NonFinite { x, y, w, h });
        }
        if w <= 0.0 || h <= 0.0 {
            return Err(GeometryError::NonPositiveSize { w, h });
        }
        Ok(Self { x, y, w, h })
    }

    #[inline]
    pub fn w(&self) -> f32 {
        self.w
    }

    #[inline]
    pub fn h(&self) -> f32 {
        self.h
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Top-left corner
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Strict AABB overlap test; boxes that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Move the box so its top-left corner is at `(x, y)`
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }
}

/// Unchecked serialized form of a `BoundingBox`
#[derive(Deserialize)]
struct BoxFields {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

impl TryFrom<BoxFields> for BoundingBox {
    type Error = GeometryError;

    fn try_from(f: BoxFields) -> Result<Self, Self::Error> {
        BoundingBox::new(f.x, f.y, f.w, f.h)
    }
}

/// The world rectangle `[0, width] x [0, height]`, fixed for a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WorldFields")]
pub struct WorldBounds {
    width: f32,
    height: f32,
}

#[derive(Deserialize)]
struct WorldFields {
    width: f32,
    height: f32,
}

impl TryFrom<WorldFields> for WorldBounds {
    type Error = GeometryError;

    fn try_from(f: WorldFields) -> Result<Self, Self::Error> {
        WorldBounds::new(f.width, f.height)
    }
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Result<Self, GeometryError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(GeometryError::InvalidWorld { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// The whole world as a box (used for the background fill)
    pub fn as_box(&self) -> BoundingBox {
        BoundingBox {
            x: 0.0,
            y: 0.0,
            w: self.width,
            h: self.height,
        }
    }

    /// Largest x a box of width `w` can have while staying inside the world
    pub fn max_x_for(&self, w: f32) -> f32 {
        (self.width - w).max(0.0)
    }
}
