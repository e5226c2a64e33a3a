//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no frame-time scaling
//! - Seeded RNG only
//! - Stable iteration order (pool order)
//! - No rendering or platform dependencies

pub mod mask;
pub mod player;
pub mod pool;
pub mod powerup;
pub mod progression;
pub mod spawn;
pub mod sprites;
pub mod state;
pub mod tick;

pub use mask::{CollisionMask, overlaps};
pub use player::Player;
pub use pool::{FallingEntity, FallingPool};
pub use powerup::{PowerUp, PowerUpKind, PowerUpState};
pub use progression::{Progression, ShieldStack};
pub use spawn::{SpawnRules, snapped_column};
pub use sprites::Sprites;
pub use state::{Animation, GameEvent, GamePhase, Round, Session, Snapshot};
pub use tick::{TickInput, tick};
