//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seedable RNG only
//! - No rendering or terminal dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circular_hit, rect_overlap};
pub use spawn::{spawn_enemy, spawn_obstacle};
pub use state::{
    Bullet, Enemy, EnemyKind, GameEvent, GamePhase, Obstacle, Player, PowerUp, PowerUpKind, World,
};
pub use tick::{TickInput, tick};
