//! Asteroid Alley - a 2D arcade "dodge the falling asteroids" game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, masks, collisions, session phases)
//! - `config`: Data-driven game balance and version presets
//! - `profile`: Cross-session player record (gems, high score, ships)
//! - `persistence`: Save/load of the profile document
//! - `platform`: Frame pacing and input sources
//! - `audio`: Sound cues for simulation events
//! - `ui`: Menu and shop layout hit-testing

pub mod audio;
pub mod config;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod profile;
pub mod sim;
pub mod ui;

pub use config::{GameConfig, Preset};
pub use error::{PersistenceError, ProfileError, ShopError};
pub use profile::{Profile, Ship};

/// Game configuration constants
pub mod consts {
    /// Logical tick rate (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;
    /// Maximum ticks the clock will try to catch up before resyncing
    pub const MAX_CATCH_UP_TICKS: u32 = 4;

    /// Screen dimensions
    pub const SCREEN_WIDTH: i32 = 400;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Player defaults
    pub const PLAYER_Y: i32 = 500;
    pub const PLAYER_SPEED: i32 = 6;

    /// Asteroid defaults
    pub const ASTEROID_SPEED: i32 = 6;
    pub const ASTEROID_COUNT: usize = 5;
    /// Respawn window above the screen is [-SCREEN_HEIGHT, -SPAWN_Y_NEAR]
    pub const SPAWN_Y_NEAR: i32 = 50;
    /// Same-column spawns closer than this get nudged
    pub const SPAWN_MIN_GAP: i32 = 100;
    pub const SPAWN_NUDGE: i32 = 200;

    /// Power-up fall speed
    pub const POWERUP_SPEED: i32 = 4;

    /// Score between milestones
    pub const MILESTONE_STEP: u32 = 100;
    /// Ticks the score box flashes after a milestone (~length of the jingle)
    pub const MILESTONE_FLASH_TICKS: u32 = 120;

    /// Ticks between animation frames
    pub const ANIMATION_FRAME_DELAY: u32 = 10;
    pub const ASTEROID_FRAMES: usize = 8;
    pub const SHIELD_FRAMES: usize = 4;
}

/// Convert a tick count into elapsed milliseconds at the logical tick rate
#[inline]
pub fn ticks_to_ms(ticks: u64) -> u64 {
    ticks * 1000 / consts::TICK_RATE as u64
}
