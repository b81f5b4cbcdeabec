//! Game state and core simulation types
//!
//! The `World` aggregate owns every entity collection outright; update
//! functions receive it by mutable reference, never through globals.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

/// Current screen of the mode state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for start input
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart input
    GameOver,
}

/// Enemy tiers with distinct stat tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
}

impl EnemyKind {
    /// Health before the per-level bonus
    pub fn base_health(self) -> i32 {
        match self {
            EnemyKind::Basic | EnemyKind::Fast => 1,
            EnemyKind::Tank => 3,
        }
    }

    /// Multiplier on the shared base speed
    pub fn speed_factor(self) -> f32 {
        match self {
            EnemyKind::Basic => 1.0,
            EnemyKind::Fast => 1.8,
            EnemyKind::Tank => 0.6,
        }
    }

    /// Score awarded on destruction
    pub fn points(self) -> u32 {
        match self {
            EnemyKind::Basic => 10,
            EnemyKind::Fast => 20,
            EnemyKind::Tank => 30,
        }
    }
}

/// The player's ship. `pos.y` never changes after construction; input sets
/// `vel_x` and the movement update applies and clamps it.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub vel_x: f32,
    pub lives: u32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(SCREEN_WIDTH / 2.0 - PLAYER_SIZE.x / 2.0, PLAYER_START_Y),
            vel_x: 0.0,
            lives: STARTING_LIVES,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// A descending enemy. Bounces between the horizontal edges (stepping down
/// `drop_step` on each bounce) while drifting down by `fall_speed` every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel_x: f32,
    pub drop_step: f32,
    pub fall_speed: f32,
    pub kind: EnemyKind,
    pub health: i32,
    pub max_health: i32,
    pub points: u32,
}

impl Enemy {
    /// Remaining health as a 0..=1 fraction, for the health bar
    pub fn health_ratio(&self) -> f32 {
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

/// A player bullet, travelling straight up
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub speed: f32,
}

/// A fast-falling rectangular hazard. Absorbs bullets and damages the player.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub color: (u8, u8, u8),
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    RapidFire,
}

/// A falling pickup dropped by a destroyed enemy
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub pos: Vec2,
    pub speed: f32,
    pub kind: PowerUpKind,
}

/// Gameplay occurrences a tick surfaces to the caller. The frontend maps
/// these to sound cues; the simulation never touches audio itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ShotFired,
    EnemyDestroyed { kind: EnemyKind, points: u32 },
    EnemyBreached,
    PlayerHit,
    PowerUpCollected(PowerUpKind),
    LevelUp(u32),
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    /// Progression
    pub score: u32,
    pub level: u32,
    pub difficulty: f32,
    pub max_enemies: usize,
    /// Timers (plain decrementing/incrementing tick counters)
    pub shoot_cooldown: u32,
    pub rapid_fire_ticks: u32,
    pub enemy_spawn_timer: u32,
    pub obstacle_spawn_timer: u32,
    /// Set exactly once, when lives first reach zero
    pub game_over: bool,
    /// Simulation tick counter
    pub ticks: u64,
}

impl World {
    /// Create a fresh world on the menu screen, with the opening wave of
    /// enemies already seeded.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut world = Self {
            phase: GamePhase::Menu,
            player: Player::new(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            score: 0,
            level: 1,
            difficulty: 1.0,
            max_enemies: INITIAL_MAX_ENEMIES,
            shoot_cooldown: 0,
            rapid_fire_ticks: 0,
            enemy_spawn_timer: 0,
            obstacle_spawn_timer: 0,
            game_over: false,
            ticks: 0,
        };
        world.seed_initial_enemies(rng);
        world
    }

    /// Reset every field to its starting value and re-seed the opening wave.
    /// Used on every (re)start; the phase is left for the caller to set.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        let phase = self.phase;
        *self = Self::new(rng);
        self.phase = phase;
    }

    fn seed_initial_enemies(&mut self, rng: &mut impl Rng) {
        for _ in 0..INITIAL_ENEMIES {
            super::spawn::spawn_enemy(self, rng);
        }
    }

    /// True while the rapid-fire buff is running
    pub fn rapid_fire_active(&self) -> bool {
        self.rapid_fire_ticks > 0
    }

    /// Concurrent-bullet cap, raised during rapid fire
    pub fn bullet_cap(&self) -> usize {
        if self.rapid_fire_active() {
            RAPID_MAX_BULLETS
        } else {
            MAX_BULLETS
        }
    }

    /// Ticks between shots, shortened during rapid fire
    pub fn fire_cooldown(&self) -> u32 {
        if self.rapid_fire_active() {
            RAPID_FIRE_COOLDOWN
        } else {
            FIRE_COOLDOWN
        }
    }

    /// Points a single level is worth in the level-up formula
    pub fn points_needed(&self) -> u32 {
        LEVEL_BASE_POINTS + LEVEL_POINTS_STEP * self.level
    }

    /// Score at which the next level starts. The per-level requirement is
    /// multiplied by the level itself, so thresholds compound; kept as the
    /// original game behaves.
    pub fn level_target(&self) -> u32 {
        self.points_needed() * self.level
    }
}
