//! Draw list extraction
//!
//! Turns the game state into the flat, back-to-front list of filled
//! rectangles the renderer consumes. No GPU types here.

use crate::sim::{BoundingBox, Enemy, GameState, Platform, Player};

/// Colors for game elements (sRGB values, written to the surface as-is)
pub mod colors {
    /// #8ed0f0
    pub const BACKGROUND: [f32; 4] = rgb(0x8e, 0xd0, 0xf0);
    /// #964B00
    pub const PLATFORM: [f32; 4] = rgb(0x96, 0x4b, 0x00);
    pub const ENEMY: [f32; 4] = rgb(0xff, 0x00, 0x00);
    pub const PLAYER: [f32; 4] = rgb(0x00, 0xff, 0x00);

    /// Opaque color from 8-bit channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }
}

/// One filled rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub rect: BoundingBox,
    pub color: [f32; 4],
}

/// Anything that shows up as a single colored box
pub trait Drawable {
    fn draw_command(&self) -> DrawCommand;
}

impl Drawable for Platform {
    fn draw_command(&self) -> DrawCommand {
        DrawCommand {
            rect: *self.rect(),
            color: colors::PLATFORM,
        }
    }
}

impl Drawable for Enemy {
    fn draw_command(&self) -> DrawCommand {
        DrawCommand {
            rect: *self.rect(),
            color: colors::ENEMY,
        }
    }
}

impl Drawable for Player {
    fn draw_command(&self) -> DrawCommand {
        DrawCommand {
            rect: *self.rect(),
            color: colors::PLAYER,
        }
    }
}

/// Background, platforms, enemies, player - in drawing order
pub fn draw_list(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(2 + state.platforms().len() + state.enemies.len());

    commands.push(DrawCommand {
        rect: state.bounds().as_box(),
        color: colors::BACKGROUND,
    });
    commands.extend(state.platforms().iter().map(Drawable::draw_command));
    commands.extend(state.enemies.iter().map(Drawable::draw_command));
    commands.push(state.player.draw_command());

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_order() {
        let state = GameState::new(800.0, 600.0).unwrap();
        let commands = draw_list(&state);

        // background + 4 platforms + 1 enemy + player
        assert_eq!(commands.len(), 7);
        assert_eq!(commands[0].color, colors::BACKGROUND);
        assert_eq!(commands[0].rect, state.bounds().as_box());
        for cmd in &commands[1..5] {
            assert_eq!(cmd.color, colors::PLATFORM);
        }
        assert_eq!(commands[5].color, colors::ENEMY);
        assert_eq!(commands[6].color, colors::PLAYER);
        assert_eq!(&commands[6].rect, state.player.rect());
    }

    #[test]
    fn test_platform_order_is_preserved() {
        let state = GameState::new(800.0, 600.0).unwrap();
        let commands = draw_list(&state);
        for (cmd, platform) in commands[1..].iter().zip(state.platforms()) {
            assert_eq!(&cmd.rect, platform.rect());
        }
    }

    #[test]
    fn test_colors_match_palette() {
        assert!((colors::BACKGROUND[0] - 142.0 / 255.0).abs() < 1e-6);
        assert!((colors::PLATFORM[1] - 75.0 / 255.0).abs() < 1e-6);
    }
}
