//! Starfall - a terminal arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, game state)
//! - `term`: Crossterm rendering of the playfield, HUD, and overlay screens
//! - `audio`: Fire-and-forget sound cue dispatch
//! - `settings`: User preferences

pub mod audio;
pub mod settings;
pub mod sim;
pub mod term;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation tick rate (Hz)
    pub const TICK_RATE: u32 = 60;

    /// Logical playfield dimensions (the terminal scales this grid to fit)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player defaults - the ship slides along a fixed row near the bottom
    pub const PLAYER_SPEED: f32 = 7.0;
    pub const PLAYER_SIZE: Vec2 = Vec2::new(64.0, 64.0);
    pub const PLAYER_START_Y: f32 = SCREEN_HEIGHT - 120.0;
    /// Enemies crossing this line breach the player zone and cost a life
    pub const PLAYER_ZONE_Y: f32 = SCREEN_HEIGHT - 160.0;
    pub const STARTING_LIVES: u32 = 3;

    /// Enemy defaults
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_WIDTH: f32 = 64.0;
    /// Vertical step applied when an enemy bounces off a horizontal edge
    pub const ENEMY_DROP_STEP: f32 = 30.0;
    /// Ticks between timed spawns before level scaling
    pub const ENEMY_SPAWN_RATE: u32 = 120;
    /// Enemies gain 1 health every this many levels
    pub const ENEMY_HEALTH_INCREASE_RATE: u32 = 3;
    pub const MAX_ENEMIES: usize = 8;
    pub const INITIAL_ENEMIES: usize = 4;
    pub const INITIAL_MAX_ENEMIES: usize = 6;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_SIZE: Vec2 = Vec2::new(8.0, 16.0);
    pub const MAX_BULLETS: usize = 3;
    pub const RAPID_MAX_BULLETS: usize = 5;
    /// Ticks between shots
    pub const FIRE_COOLDOWN: u32 = 15;
    pub const RAPID_FIRE_COOLDOWN: u32 = 5;
    /// Rapid-fire buff duration (5 s at 60 Hz)
    pub const RAPID_FIRE_TICKS: u32 = 300;

    /// Collision thresholds - pickup is deliberately more generous than combat
    pub const HIT_RADIUS: f32 = 27.0;
    pub const PICKUP_RADIUS: f32 = 40.0;

    /// Power-up defaults
    pub const POWER_UP_DROP_CHANCE: f64 = 0.15;
    pub const POWER_UP_FALL_SPEED: f32 = 2.0;

    /// Obstacle defaults
    pub const OBSTACLE_SPAWN_RATE: u32 = 90;
    pub const OBSTACLE_SPEED_MIN: i32 = 8;
    pub const OBSTACLE_SPEED_MAX: i32 = 14;
    pub const OBSTACLE_SIZE: Vec2 = Vec2::new(20.0, 20.0);
    pub const OBSTACLE_COLOR: (u8, u8, u8) = (200, 180, 60);

    /// Score needed to clear a level: `points_needed(level) * level`
    pub const LEVEL_BASE_POINTS: u32 = 150;
    pub const LEVEL_POINTS_STEP: u32 = 50;
}
