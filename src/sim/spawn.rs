//! Entity factories
//!
//! All randomized construction goes through these functions with an injected
//! RNG, so a seeded generator reproduces the exact same spawns.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use super::state::{Enemy, EnemyKind, Obstacle, World};

/// Append one enemy to the world, or no-op when the on-screen cap is reached.
///
/// Tier availability widens with level, stats scale with level and the
/// difficulty multiplier, and the spawn edge is a 60/20/20 weighted pick
/// between top, left, and right.
pub fn spawn_enemy(world: &mut World, rng: &mut impl Rng) {
    if world.enemies.len() >= world.max_enemies {
        return;
    }

    let kind = pick_kind(world.level, rng);
    let health = kind.base_health() + (world.level / ENEMY_HEALTH_INCREASE_RATE) as i32;
    let base_speed = ENEMY_SPEED * world.difficulty * kind.speed_factor();
    let fall_speed = rng.random_range(0.4..1.2) * (1.0 + 0.1 * (world.level - 1) as f32);

    let (pos, vel_x) = match rng.random_range(0..100u32) {
        // Top (60%): anywhere across the screen, above the visible area,
        // drifting either way
        0..60 => {
            let x = rng.random_range(0.0..SCREEN_WIDTH - ENEMY_WIDTH);
            let y = rng.random_range(-140.0..-60.0);
            let vel_x = if rng.random_bool(0.5) {
                base_speed
            } else {
                -base_speed
            };
            (Vec2::new(x, y), vel_x)
        }
        // Left (20%): pinned just off the edge, moving inward
        60..80 => {
            let y = rng.random_range(60.0..200.0);
            (Vec2::new(-ENEMY_WIDTH, y), base_speed.abs())
        }
        // Right (20%)
        _ => {
            let y = rng.random_range(60.0..200.0);
            (Vec2::new(SCREEN_WIDTH, y), -base_speed.abs())
        }
    };

    world.enemies.push(Enemy {
        pos,
        vel_x,
        drop_step: ENEMY_DROP_STEP,
        fall_speed,
        kind,
        health,
        max_health: health,
        points: kind.points(),
    });
}

fn pick_kind(level: u32, rng: &mut impl Rng) -> EnemyKind {
    if level >= 5 {
        match rng.random_range(0..3u32) {
            0 => EnemyKind::Basic,
            1 => EnemyKind::Fast,
            _ => EnemyKind::Tank,
        }
    } else if level >= 3 {
        if rng.random_bool(0.5) {
            EnemyKind::Basic
        } else {
            EnemyKind::Fast
        }
    } else {
        EnemyKind::Basic
    }
}

/// Append one obstacle falling from above the visible area. Speed is a
/// random draw plus a level bonus.
pub fn spawn_obstacle(world: &mut World, rng: &mut impl Rng) {
    let speed = rng.random_range(OBSTACLE_SPEED_MIN..=OBSTACLE_SPEED_MAX) + world.level as i32 / 2;
    let x = rng.random_range(0.0..SCREEN_WIDTH - OBSTACLE_SIZE.x - 4.0);
    world.obstacles.push(Obstacle {
        pos: Vec2::new(x, -OBSTACLE_SIZE.y - 4.0),
        size: OBSTACLE_SIZE,
        speed: speed as f32,
        color: OBSTACLE_COLOR,
    });
}
