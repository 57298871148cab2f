//! Game settings and preferences
//!
//! Read once at startup from a JSON document supplied by the host: the
//! canvas `data-settings` attribute on the web, an environment variable on
//! native. Missing fields take their defaults.

use serde::{Deserialize, Serialize};

/// How presented frames map to simulation ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimestepMode {
    /// One tick per presented frame; game speed follows the refresh rate
    #[default]
    FrameCoupled,
    /// Fixed 60 Hz ticks fed by an accumulator
    Fixed,
}

impl TimestepMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestepMode::FrameCoupled => "frame_coupled",
            TimestepMode::Fixed => "fixed",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frame-to-tick scheduling
    pub timestep: TimestepMode,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all cues
    pub muted: bool,

    // === HUD ===
    /// Log frames-per-second once a second
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timestep: TimestepMode::FrameCoupled,

            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            // HUD
            show_fps: true,
        }
    }
}

impl Settings {
    /// Environment variable read by the native runner
    pub const ENV_VAR: &'static str = "LEDGE_RUNNER_SETTINGS";

    /// Parse settings from JSON, clamping volumes into range
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Parse an optional JSON source, falling back to defaults on any problem
    pub fn from_source(source: Option<&str>) -> Self {
        let Some(json) = source.filter(|s| !s.trim().is_empty()) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings (timestep: {})", settings.timestep.as_str());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Volume applied to sound cues
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Load settings from the canvas `data-settings` attribute (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::HtmlCanvasElement) -> Self {
        Self::from_source(canvas.get_attribute("data-settings").as_deref())
    }

    /// Load settings from `LEDGE_RUNNER_SETTINGS` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::from_source(std::env::var(Self::ENV_VAR).ok().as_deref())
    }
}
