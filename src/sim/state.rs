//! Game state and core simulation types
//!
//! Everything a session needs lives in `GameState`. A session is rebuilt
//! from the same layout on every run; nothing here is persisted.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::rect::{BoundingBox, GeometryError, WorldBounds};
use crate::consts::*;

/// Why the player was sent back to the spawn point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RespawnCause {
    /// Dropped below the bottom of the world
    FellOutOfWorld,
    /// Touched an enemy
    EnemyContact,
}

/// Side effects produced during a tick, drained by the host afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player left the ground (host plays the jump cue)
    Jumped,
    Respawned { cause: RespawnCause },
}

/// A static obstacle. Fixed for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    rect: BoundingBox,
}

impl Platform {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Result<Self, GeometryError> {
        Ok(Self {
            rect: BoundingBox::new(x, y, w, h)?,
        })
    }

    #[inline]
    pub fn rect(&self) -> &BoundingBox {
        &self.rect
    }
}

/// The input-driven actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Resting on a platform's top surface as of the last resolution
    pub grounded: bool,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: Body::at_rest(BoundingBox {
                x,
                y,
                w: PLAYER_WIDTH,
                h: PLAYER_HEIGHT,
            }),
            grounded: false,
        }
    }

    /// A player at the spawn point
    pub fn spawn() -> Self {
        Self::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y)
    }

    /// Back to the spawn point with zero velocity. `grounded` is left alone;
    /// the next resolution pass decides it.
    pub fn respawn(&mut self) {
        self.body.reset(PLAYER_SPAWN_X, PLAYER_SPAWN_Y);
    }

    #[inline]
    pub fn rect(&self) -> &BoundingBox {
        &self.body.rect
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
}

impl Enemy {
    /// New enemy walking left, with no vertical velocity
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: Body::with_velocity(
                BoundingBox {
                    x,
                    y,
                    w: ENEMY_WIDTH,
                    h: ENEMY_HEIGHT,
                },
                Vec2::new(-ENEMY_SPEED, 0.0),
            ),
        }
    }

    #[inline]
    pub fn rect(&self) -> &BoundingBox {
        &self.body.rect
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) bounds: WorldBounds,
    pub(crate) platforms: Vec<Platform>,
    pub player: Player,
    /// Updated and hit-tested in list order
    pub enemies: Vec<Enemy>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from ticks not yet drained by the host
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create the standard level for a world of the given size
    pub fn new(width: f32, height: f32) -> Result<Self, GeometryError> {
        let bounds = WorldBounds::new(width, height)?;
        let platforms = vec![
            Platform::new(0.0, height - FLOOR_HEIGHT, width, FLOOR_HEIGHT)?,
            Platform::new(150.0, height - 120.0, 120.0, 20.0)?,
            Platform::new(400.0, height - 200.0, 120.0, 20.0)?,
            Platform::new(600.0, height - 280.0, 120.0, 20.0)?,
        ];
        let enemies = vec![Enemy::new(500.0, height - FLOOR_HEIGHT - ENEMY_HEIGHT)];

        log::info!(
            "World {}x{} with {} platforms and {} enemies",
            width,
            height,
            platforms.len(),
            enemies.len()
        );

        Ok(Self::with_layout(bounds, platforms, Player::spawn(), enemies))
    }

    /// Create a state from an explicit layout
    pub fn with_layout(
        bounds: WorldBounds,
        platforms: Vec<Platform>,
        player: Player,
        enemies: Vec<Enemy>,
    ) -> Self {
        Self {
            bounds,
            platforms,
            player,
            enemies,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    #[inline]
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Events produced since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events, leaving the queue empty
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
