//! Simulation tick
//!
//! Core game loop that advances the simulation by exactly one step.

use serde::{Deserialize, Serialize};

use super::controller::{TickContext, Updatable};
use super::state::{GameEvent, GameState, RespawnCause};

/// Logical keys held at the start of a tick (deterministic snapshot)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl TickInput {
    /// Horizontal direction: -1 for left, +1 for right, 0 for neither.
    /// Left wins when both are held.
    pub fn horizontal(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }
}

/// Advance the game state by one tick
///
/// Order is fixed: player, then every enemy, then enemy-vs-player contact.
/// Events are appended to the state's queue for the host to drain.
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    let GameState {
        bounds,
        platforms,
        player,
        enemies,
        events,
        ..
    } = state;

    let mut ctx = TickContext {
        input,
        platforms: platforms.as_slice(),
        bounds: *bounds,
        events,
    };

    player.update(&mut ctx);
    for enemy in enemies.iter_mut() {
        enemy.update(&mut ctx);
    }

    // Touching an enemy sends the player home; the enemy carries on
    for enemy in enemies.iter() {
        if enemy.rect().overlaps(player.rect()) {
            player.respawn();
            ctx.events.push(GameEvent::Respawned {
                cause: RespawnCause::EnemyContact,
            });
        }
    }
}
