//! Fixed timestep simulation tick
//!
//! One call advances the world by one 60 Hz tick. Subsystems run in a fixed
//! order: input, player, bullets, power-ups, enemies, obstacles. Entity
//! removal happens through index loops so no iterator is ever invalidated
//! by a mid-pass removal.

use rand::Rng;

use crate::consts::*;
use super::collision::{circular_hit, rect_overlap};
use super::spawn::{spawn_enemy, spawn_obstacle};
use super::state::{Bullet, GameEvent, GamePhase, PowerUp, PowerUpKind, World};

/// Input commands for a single tick, already decoded from raw key events
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held directional keys
    pub move_left: bool,
    pub move_right: bool,
    /// Fire a bullet (Playing)
    pub fire: bool,
    /// Start or restart a run (Menu, GameOver)
    pub start: bool,
    /// Back to the menu (Playing)
    pub back: bool,
}

/// Advance the game by one tick, returning the gameplay events it produced.
pub fn tick(world: &mut World, input: &TickInput, rng: &mut impl Rng) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match world.phase {
        GamePhase::Menu | GamePhase::GameOver => {
            if input.start {
                world.reset(rng);
                world.phase = GamePhase::Playing;
                log::info!("run started");
            }
            return events;
        }
        GamePhase::Playing => {
            if input.back {
                world.phase = GamePhase::Menu;
                log::info!("back to menu at score {}", world.score);
                return events;
            }
        }
    }

    world.ticks += 1;

    // Input sets the player's velocity; the movement update owns the rest
    world.player.vel_x = if input.move_left {
        -PLAYER_SPEED
    } else if input.move_right {
        PLAYER_SPEED
    } else {
        0.0
    };
    if input.fire {
        try_fire(world, &mut events);
    }

    update_player(world);
    update_bullets(world);
    update_power_ups(world, &mut events);
    update_enemies(world, &mut events, rng);
    update_obstacles(world, &mut events, rng);

    events
}

/// Fire a bullet if the cooldown has elapsed and a slot is free. Both the
/// cooldown and the slot count tighten or loosen with rapid fire.
fn try_fire(world: &mut World, events: &mut Vec<GameEvent>) {
    if world.shoot_cooldown > 0 || world.bullets.len() >= world.bullet_cap() {
        return;
    }
    world.bullets.push(Bullet {
        pos: world.player.pos,
        speed: BULLET_SPEED,
    });
    world.shoot_cooldown = world.fire_cooldown();
    events.push(GameEvent::ShotFired);
}

/// Move the player horizontally and clamp to the screen.
fn update_player(world: &mut World) {
    let player = &mut world.player;
    player.pos.x = (player.pos.x + player.vel_x).clamp(0.0, SCREEN_WIDTH - PLAYER_SIZE.x);
}

/// Run down the fire timers, move bullets up, and cull those off the top.
fn update_bullets(world: &mut World) {
    world.shoot_cooldown = world.shoot_cooldown.saturating_sub(1);
    world.rapid_fire_ticks = world.rapid_fire_ticks.saturating_sub(1);
    for bullet in &mut world.bullets {
        bullet.pos.y -= bullet.speed;
    }
    world.bullets.retain(|b| b.pos.y >= 0.0);
}

/// Drop power-ups toward the player and grant effects on pickup.
fn update_power_ups(world: &mut World, events: &mut Vec<GameEvent>) {
    let mut i = 0;
    while i < world.power_ups.len() {
        world.power_ups[i].pos.y += world.power_ups[i].speed;
        if world.power_ups[i].pos.y > SCREEN_HEIGHT {
            world.power_ups.remove(i);
            continue;
        }
        if circular_hit(world.power_ups[i].pos, world.player.pos, PICKUP_RADIUS) {
            let kind = world.power_ups.remove(i).kind;
            match kind {
                PowerUpKind::RapidFire => world.rapid_fire_ticks = RAPID_FIRE_TICKS,
            }
            events.push(GameEvent::PowerUpCollected(kind));
            continue;
        }
        i += 1;
    }
}

/// Timed spawning, edge-bounce movement, and bullet combat for enemies.
fn update_enemies(world: &mut World, events: &mut Vec<GameEvent>, rng: &mut impl Rng) {
    world.enemy_spawn_timer += 1;
    let interval = ENEMY_SPAWN_RATE.saturating_sub(world.level * 10).max(30);
    if world.enemy_spawn_timer >= interval {
        spawn_enemy(world, rng);
        world.enemy_spawn_timer = 0;
    }

    let mut i = 0;
    while i < world.enemies.len() {
        // A breach costs a life no matter how much health the enemy has left
        if world.enemies[i].pos.y > PLAYER_ZONE_Y {
            world.enemies.remove(i);
            events.push(GameEvent::EnemyBreached);
            lose_life(world, events);
            continue;
        }

        {
            let enemy = &mut world.enemies[i];
            enemy.pos.x += enemy.vel_x;
            if enemy.pos.x <= 0.0 {
                enemy.vel_x = enemy.vel_x.abs();
                enemy.pos.y += enemy.drop_step;
            } else if enemy.pos.x >= SCREEN_WIDTH - ENEMY_WIDTH {
                enemy.vel_x = -enemy.vel_x.abs();
                enemy.pos.y += enemy.drop_step;
            }
            enemy.pos.y += enemy.fall_speed;
        }

        // At most one bullet connects per enemy per tick
        let enemy_pos = world.enemies[i].pos;
        if let Some(hit) = world
            .bullets
            .iter()
            .position(|b| circular_hit(enemy_pos, b.pos, HIT_RADIUS))
        {
            world.bullets.remove(hit);
            world.enemies[i].health -= 1;
            if world.enemies[i].health <= 0 {
                let enemy = world.enemies.remove(i);
                world.score += enemy.points;
                events.push(GameEvent::EnemyDestroyed {
                    kind: enemy.kind,
                    points: enemy.points,
                });
                if rng.random_bool(POWER_UP_DROP_CHANCE) {
                    world.power_ups.push(PowerUp {
                        pos: enemy.pos,
                        speed: POWER_UP_FALL_SPEED,
                        kind: PowerUpKind::RapidFire,
                    });
                }
                check_level_up(world, events);
                continue;
            }
        }
        i += 1;
    }
}

/// Timed spawning, falling movement, and both collision models for obstacles.
fn update_obstacles(world: &mut World, events: &mut Vec<GameEvent>, rng: &mut impl Rng) {
    world.obstacle_spawn_timer += 1;
    let interval = OBSTACLE_SPAWN_RATE.saturating_sub(world.level * 5).max(30);
    if world.obstacle_spawn_timer >= interval {
        spawn_obstacle(world, rng);
        world.obstacle_spawn_timer = 0;
    }

    let player_pos = world.player.pos;
    let mut i = 0;
    while i < world.obstacles.len() {
        world.obstacles[i].pos.y += world.obstacles[i].speed;
        if world.obstacles[i].pos.y > SCREEN_HEIGHT {
            world.obstacles.remove(i);
            continue;
        }

        // Obstacles soak up the first bullet that touches them
        let (obs_pos, obs_size) = {
            let o = &world.obstacles[i];
            (o.pos, o.size)
        };
        if let Some(hit) = world
            .bullets
            .iter()
            .position(|b| rect_overlap(b.pos, BULLET_SIZE, obs_pos, obs_size))
        {
            world.bullets.remove(hit);
        }

        if rect_overlap(player_pos, PLAYER_SIZE, obs_pos, obs_size) {
            world.obstacles.remove(i);
            events.push(GameEvent::PlayerHit);
            lose_life(world, events);
            continue;
        }
        i += 1;
    }
}

fn lose_life(world: &mut World, events: &mut Vec<GameEvent>) {
    world.player.lives = world.player.lives.saturating_sub(1);
    if world.player.lives == 0 && !world.game_over {
        world.game_over = true;
        world.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver);
        log::info!(
            "game over at score {} (level {})",
            world.score,
            world.level
        );
    }
}

/// Level up once the compounding score target is met.
fn check_level_up(world: &mut World, events: &mut Vec<GameEvent>) {
    if world.score >= world.level_target() {
        world.level += 1;
        world.difficulty += 0.2;
        world.max_enemies = MAX_ENEMIES.min(4 + world.level as usize);
        events.push(GameEvent::LevelUp(world.level));
        log::info!(
            "level {} reached, difficulty x{:.1}",
            world.level,
            world.difficulty
        );
    }
}
