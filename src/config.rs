//! Game balance and version presets
//!
//! The game shipped as five incremental versions that differ only in
//! constants and enabled features; each is a `Preset` producing a
//! `GameConfig` for the one shared simulation core.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::spawn::SpawnRules;

/// Feature level of the game, oldest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Three square blocks placed anywhere, no score
    Prototype,
    /// Asteroid field with score and milestones
    Scoring,
    /// Adds shield power-ups
    Shields,
    /// Adds collectable gems
    Gems,
    /// Full game with the ship shop
    #[default]
    Shop,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Prototype,
        Preset::Scoring,
        Preset::Shields,
        Preset::Gems,
        Preset::Shop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Prototype => "Prototype",
            Preset::Scoring => "Scoring",
            Preset::Shields => "Shields",
            Preset::Gems => "Gems",
            Preset::Shop => "Shop",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "prototype" | "proto" => Some(Preset::Prototype),
            "scoring" | "score" => Some(Preset::Scoring),
            "shields" | "shield" => Some(Preset::Shields),
            "gems" | "gem" => Some(Preset::Gems),
            "shop" | "full" => Some(Preset::Shop),
            _ => None,
        }
    }

    /// Build the configuration for this preset
    pub fn config(&self) -> GameConfig {
        let full = GameConfig::default();
        match self {
            Preset::Prototype => GameConfig {
                preset: *self,
                asteroid_count: 3,
                asteroid_size: 30,
                square_asteroids: true,
                column_spawns: false,
                spawn_nudge: 0,
                scoring: false,
                gem: None,
                shield: None,
                shop_enabled: false,
                ..full
            },
            Preset::Scoring => GameConfig {
                preset: *self,
                gem: None,
                shield: None,
                shop_enabled: false,
                ..full
            },
            Preset::Shields => GameConfig {
                preset: *self,
                gem: None,
                shop_enabled: false,
                ..full
            },
            Preset::Gems => GameConfig {
                preset: *self,
                shop_enabled: false,
                ..full
            },
            Preset::Shop => full,
        }
    }
}

/// Tuning for one power-up kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpConfig {
    /// Fall speed (pixels per tick)
    pub speed: i32,
    /// Sprite size (square)
    pub size: i32,
    /// Window for the first appearance after the round starts (ms, inclusive)
    pub first_delay_ms: (u64, u64),
    /// Window for each later appearance after going inactive (ms, inclusive)
    pub respawn_delay_ms: (u64, u64),
    /// Offset added to the snapped asteroid column
    pub x_offset: i32,
    /// Spawn height (above the screen)
    pub start_y: i32,
}

impl PowerUpConfig {
    pub fn gem() -> Self {
        Self {
            speed: POWERUP_SPEED,
            size: 35,
            first_delay_ms: (10_000, 15_000),
            respawn_delay_ms: (10_000, 20_000),
            x_offset: 40,
            start_y: -30,
        }
    }

    pub fn shield() -> Self {
        Self {
            speed: POWERUP_SPEED,
            size: 40,
            first_delay_ms: (40_000, 70_000),
            respawn_delay_ms: (40_000, 70_000),
            x_offset: 30,
            start_y: -70,
        }
    }
}

/// Everything the simulation needs to build and run a round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub preset: Preset,

    // === Screen ===
    pub screen_width: i32,
    pub screen_height: i32,

    // === Player ===
    pub player_y: i32,
    pub player_speed: i32,
    pub player_width: i32,
    pub player_height: i32,

    // === Asteroids ===
    pub asteroid_count: usize,
    pub asteroid_speed: i32,
    /// Asteroid sprite size (square); also the spawn column width
    pub asteroid_size: i32,
    /// Solid square hitboxes instead of rock outlines
    pub square_asteroids: bool,
    /// Snap spawns to the asteroid-width column grid
    pub column_spawns: bool,
    pub spawn_y_near: i32,
    pub spawn_min_gap: i32,
    pub spawn_nudge: i32,

    // === Power-ups (None = disabled) ===
    pub gem: Option<PowerUpConfig>,
    pub shield: Option<PowerUpConfig>,

    // === Progression ===
    /// Asteroids passing the bottom edge score points
    pub scoring: bool,
    pub first_milestone: u32,
    pub milestone_step: u32,
    pub milestone_flash_ticks: u32,

    // === Presentation ===
    pub animation_frame_delay: u32,

    // === Menus ===
    pub shop_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            preset: Preset::Shop,

            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_y: PLAYER_Y,
            player_speed: PLAYER_SPEED,
            player_width: 48,
            player_height: 48,

            asteroid_count: ASTEROID_COUNT,
            asteroid_speed: ASTEROID_SPEED,
            asteroid_size: 50,
            square_asteroids: false,
            column_spawns: true,
            spawn_y_near: SPAWN_Y_NEAR,
            spawn_min_gap: SPAWN_MIN_GAP,
            spawn_nudge: SPAWN_NUDGE,

            gem: Some(PowerUpConfig::gem()),
            shield: Some(PowerUpConfig::shield()),

            scoring: true,
            first_milestone: MILESTONE_STEP,
            milestone_step: MILESTONE_STEP,
            milestone_flash_ticks: MILESTONE_FLASH_TICKS,

            animation_frame_delay: ANIMATION_FRAME_DELAY,

            shop_enabled: true,
        }
    }
}

impl GameConfig {
    /// Create a config from a preset
    pub fn from_preset(preset: Preset) -> Self {
        preset.config()
    }

    /// Spawn placement rules for the asteroid field
    pub fn spawn_rules(&self) -> SpawnRules {
        SpawnRules {
            screen_width: self.screen_width,
            entity_width: self.asteroid_size,
            y_near: self.spawn_y_near,
            y_far: self.screen_height,
            min_vertical_gap: self.spawn_min_gap,
            nudge: self.spawn_nudge,
            snap_to_columns: self.column_spawns,
        }
    }

    /// Player start x (centered)
    pub fn player_start_x(&self) -> i32 {
        self.screen_width / 2 - self.player_width / 2
    }
}
