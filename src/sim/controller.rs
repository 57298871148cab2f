//! Per-actor update rules
//!
//! Each controller mutates only its own actor and reads the rest of the world
//! through `TickContext`.

use super::collision::{land_from_above, resolve_against};
use super::rect::{BoundingBox, WorldBounds};
use super::state::{Enemy, GameEvent, Platform, Player, RespawnCause};
use super::tick::TickInput;
use crate::consts::*;

/// Read-only world view plus the event sink for one tick
pub struct TickContext<'a> {
    pub input: &'a TickInput,
    pub platforms: &'a [Platform],
    pub bounds: WorldBounds,
    pub events: &'a mut Vec<GameEvent>,
}

impl TickContext<'_> {
    fn obstacles(&self) -> impl Iterator<Item = &BoundingBox> {
        self.platforms.iter().map(Platform::rect)
    }
}

/// Something advanced once per tick
pub trait Updatable {
    fn update(&mut self, ctx: &mut TickContext<'_>);
}

impl Updatable for Player {
    /// input -> jump -> gravity -> move -> clamp -> fall check -> resolve
    fn update(&mut self, ctx: &mut TickContext<'_>) {
        let input = ctx.input;

        self.body.vel.x = input.horizontal() * PLAYER_SPEED;

        // Only from the ground; airborne presses are dropped, not buffered
        if input.jump && self.grounded {
            self.body.vel.y = JUMP_VELOCITY;
            self.grounded = false;
            ctx.events.push(GameEvent::Jumped);
        }

        self.body.step(GRAVITY);

        let max_x = ctx.bounds.max_x_for(self.body.rect.w());
        self.body.rect.x = self.body.rect.x.clamp(0.0, max_x);

        if self.body.rect.y > ctx.bounds.height() {
            self.respawn();
            ctx.events.push(GameEvent::Respawned {
                cause: RespawnCause::FellOutOfWorld,
            });
        }

        self.grounded = false;
        let resolution = resolve_against(&mut self.body, ctx.obstacles());
        self.grounded = resolution.landed;
    }
}

impl Updatable for Enemy {
    /// Patrol, turn at the world edges, fall and land on platforms
    fn update(&mut self, ctx: &mut TickContext<'_>) {
        self.body.advance_x();

        let max_x = ctx.bounds.max_x_for(self.body.rect.w());
        if self.body.rect.x <= 0.0 || self.body.rect.right() >= ctx.bounds.width() {
            self.body.vel.x = -self.body.vel.x;
            self.body.rect.x = self.body.rect.x.clamp(0.0, max_x);
        }

        self.body.apply_gravity(GRAVITY);
        self.body.advance_y();

        land_from_above(&mut self.body, ctx.obstacles());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn keys(left: bool, right: bool, jump: bool) -> TickInput {
        TickInput { left, right, jump }
    }

    fn world() -> WorldBounds {
        WorldBounds::new(800.0, 600.0).unwrap()
    }

    fn floor() -> Platform {
        Platform::new(0.0, 570.0, 800.0, 30.0).unwrap()
    }

    fn run_player(
        player: &mut Player,
        input: &TickInput,
        platforms: &[Platform],
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut ctx = TickContext {
            input,
            platforms,
            bounds: world(),
            events: &mut events,
        };
        player.update(&mut ctx);
        events
    }

    fn run_enemy(enemy: &mut Enemy, bounds: WorldBounds, platforms: &[Platform]) {
        let mut events = Vec::new();
        let input = TickInput::default();
        let mut ctx = TickContext {
            input: &input,
            platforms,
            bounds,
            events: &mut events,
        };
        enemy.update(&mut ctx);
        assert!(events.is_empty());
    }

    fn grounded_player() -> Player {
        let mut player = Player::new(100.0, 570.0 - 48.0);
        player.grounded = true;
        player
    }

    #[test]
    fn test_horizontal_input_sets_velocity() {
        let platforms = [floor()];
        let mut player = grounded_player();

        let left = keys(true, false, false);
        run_player(&mut player, &left, &platforms);
        assert_eq!(player.body.vel.x, -3.0);
        assert_eq!(player.rect().x, 97.0);

        // Left wins when both are held
        let both = keys(true, true, false);
        run_player(&mut player, &both, &platforms);
        assert_eq!(player.body.vel.x, -3.0);

        let right = keys(false, true, false);
        run_player(&mut player, &right, &platforms);
        assert_eq!(player.body.vel.x, 3.0);

        run_player(&mut player, &TickInput::default(), &platforms);
        assert_eq!(player.body.vel.x, 0.0);
        assert_eq!(player.rect().x, 97.0);
    }

    #[test]
    fn test_jump_from_ground() {
        let platforms = [floor()];
        let mut player = grounded_player();
        let jump = keys(false, false, true);

        let events = run_player(&mut player, &jump, &platforms);
        assert_eq!(events, vec![GameEvent::Jumped]);
        // -12 then one tick of gravity
        assert_eq!(player.body.vel.y, -11.5);
        assert_eq!(player.rect().y, 522.0 - 11.5);
        assert!(!player.grounded);

        // Holding jump in the air does nothing
        let events = run_player(&mut player, &jump, &platforms);
        assert!(events.is_empty());
        assert_eq!(player.body.vel.y, -11.0);
    }

    #[test]
    fn test_no_jump_while_airborne() {
        let platforms = [floor()];
        let mut player = Player::new(100.0, 100.0);
        let jump = keys(false, false, true);

        let events = run_player(&mut player, &jump, &platforms);
        assert!(events.is_empty());
        assert_eq!(player.body.vel.y, 0.5);
    }

    #[test]
    fn test_world_clamp() {
        let mut player = Player::new(1.0, 100.0);
        let left = keys(true, false, false);
        run_player(&mut player, &left, &[]);
        assert_eq!(player.rect().x, 0.0);

        let mut player = Player::new(767.0, 100.0);
        let right = keys(false, true, false);
        run_player(&mut player, &right, &[]);
        assert_eq!(player.rect().x, 768.0);
    }

    #[test]
    fn test_fall_out_of_world_respawns() {
        let mut player = Player::new(300.0, 600.0);
        player.body.vel = Vec2::new(0.0, 10.0);

        let events = run_player(&mut player, &TickInput::default(), &[]);
        assert_eq!(
            events,
            vec![GameEvent::Respawned {
                cause: RespawnCause::FellOutOfWorld,
            }]
        );
        assert_eq!(player.rect().min(), Vec2::new(50.0, 0.0));
        assert_eq!(player.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_grounded_reset_when_walking_off_ledge() {
        let ledge = Platform::new(0.0, 300.0, 100.0, 20.0).unwrap();
        let mut player = Player::new(100.0, 252.0);
        player.grounded = true;

        // Already past the ledge's right edge: nothing underneath
        run_player(&mut player, &keys(false, true, false), &[ledge]);
        assert!(!player.grounded);
    }

    #[test]
    fn test_side_contact_does_not_ground() {
        let wall = Platform::new(200.0, 0.0, 40.0, 500.0).unwrap();
        let mut player = Player::new(166.0, 100.0);
        let right = keys(false, true, false);

        run_player(&mut player, &right, &[wall]);
        assert_eq!(player.rect().right(), 200.0);
        assert_eq!(player.body.vel.x, 0.0);
        assert!(!player.grounded);
    }

    #[test]
    fn test_enemy_turns_at_left_edge() {
        let mut enemy = Enemy::new(1.0, 538.0);
        let platforms = [floor()];

        run_enemy(&mut enemy, world(), &platforms);
        assert_eq!(enemy.rect().x, 0.0);
        assert_eq!(enemy.body.vel.x, 1.0);

        run_enemy(&mut enemy, world(), &platforms);
        assert_eq!(enemy.rect().x, 1.0);
        assert_eq!(enemy.body.vel.x, 1.0);
    }

    #[test]
    fn test_enemy_turns_at_right_edge() {
        let mut enemy = Enemy::new(767.0, 538.0);
        enemy.body.vel.x = 1.0;

        run_enemy(&mut enemy, world(), &[floor()]);
        assert_eq!(enemy.rect().x, 768.0);
        assert_eq!(enemy.body.vel.x, -1.0);
    }

    #[test]
    fn test_enemy_stays_on_floor() {
        let mut enemy = Enemy::new(500.0, 538.0);
        for _ in 0..10 {
            run_enemy(&mut enemy, world(), &[floor()]);
            assert_eq!(enemy.rect().y, 538.0);
            assert_eq!(enemy.body.vel.y, 0.0);
        }
        assert_eq!(enemy.rect().x, 490.0);
    }

    #[test]
    fn test_enemy_walks_through_ledge_sides() {
        // Ledge whose top is above the enemy's top: no horizontal blocking
        let ledge = Platform::new(450.0, 520.0, 40.0, 40.0).unwrap();
        let mut enemy = Enemy::new(491.0, 538.0);
        for _ in 0..5 {
            run_enemy(&mut enemy, world(), &[floor(), ledge]);
        }
        assert_eq!(enemy.rect().x, 486.0);
        assert_eq!(enemy.rect().y, 538.0);
    }

    proptest! {
        #[test]
        fn prop_enemy_patrol_stays_in_bounds(
            width in 40u32..900,
            start in 0.0f32..1.0,
            right in any::<bool>(),
            ticks in 1usize..2000,
        ) {
            let bounds = WorldBounds::new(width as f32, 600.0).unwrap();
            let max_x = bounds.max_x_for(ENEMY_WIDTH);
            let floor = Platform::new(0.0, 570.0, width as f32, 30.0).unwrap();
            let mut enemy = Enemy::new(start * max_x, 538.0);
            if right {
                enemy.body.vel.x = ENEMY_SPEED;
            }

            for _ in 0..ticks {
                let vx_before = enemy.body.vel.x;
                let x_before = enemy.rect().x;
                run_enemy(&mut enemy, bounds, &[floor]);
                let x = enemy.rect().x;
                prop_assert!((0.0..=max_x).contains(&x));

                let touched = x_before + vx_before <= 0.0
                    || x_before + vx_before + ENEMY_WIDTH >= width as f32;
                let flipped = enemy.body.vel.x != vx_before;
                prop_assert_eq!(flipped, touched);
            }
        }
    }
}
