//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no frame-time scaling
//! - Stable iteration order (platform list order, enemy list order)
//! - Input arrives as an immutable per-tick snapshot
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod collision;
pub mod controller;
pub mod rect;
pub mod state;
pub mod tick;

pub use body::Body;
pub use collision::{
    Axis, Contact, Penetration, Resolution, land_from_above, penetration, resolve_against,
    resolve_contact,
};
pub use controller::{TickContext, Updatable};
pub use rect::{BoundingBox, GeometryError, WorldBounds};
pub use state::{Enemy, GameEvent, GameState, Platform, Player, RespawnCause};
pub use tick::{TickInput, tick};
