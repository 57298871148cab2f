//! Ledge Runner - A minimal side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, game state)
//! - `input`: Held-key tracking and per-tick input snapshots
//! - `pacing`: Frame-to-tick scheduling (frame-coupled or fixed timestep)
//! - `scene`: Back-to-front draw list extraction
//! - `renderer`: WebGPU rectangle pipeline
//! - `audio`: Web Audio sound cues (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod input;
pub mod pacing;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use input::KeyState;
pub use pacing::FramePacer;
pub use settings::{Settings, TimestepMode};

/// Game configuration constants
///
/// Units are pixels and ticks: velocities are pixels/tick and gravity is
/// pixels/tick². Nothing is scaled by frame time.
pub mod consts {
    /// Fixed simulation rate used by `TimestepMode::Fixed`
    pub const SIM_HZ: f32 = 60.0;
    pub const SIM_DT: f32 = 1.0 / SIM_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds). Longer than
    /// `MAX_SUBSTEPS` ticks, so a stall is cut short by the substep cap.
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Downward acceleration applied every tick
    pub const GRAVITY: f32 = 0.5;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const PLAYER_SPEED: f32 = 3.0;
    /// Upward launch velocity (negative y is up)
    pub const JUMP_VELOCITY: f32 = -12.0;
    pub const PLAYER_SPAWN_X: f32 = 50.0;
    pub const PLAYER_SPAWN_Y: f32 = 0.0;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 32.0;
    pub const ENEMY_HEIGHT: f32 = 32.0;
    pub const ENEMY_SPEED: f32 = 1.0;

    /// Ground strip height in the default layout
    pub const FLOOR_HEIGHT: f32 = 30.0;
}
