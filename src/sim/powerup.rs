//! Gem and shield power-ups
//!
//! Each kind has at most one instance. While inactive it waits for an
//! absolute deadline in elapsed milliseconds; once due it falls like an
//! asteroid until it is picked up or missed, then re-arms its timer.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::mask::{CollisionMask, overlaps};
use super::spawn::snapped_column;
use crate::config::PowerUpConfig;

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Currency for the ship shop
    Gem,
    /// Absorbs one asteroid hit
    Shield,
}

/// Lifecycle of a power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpState {
    /// Waiting off-screen; no position, no collisions
    Inactive { next_spawn_at_ms: u64 },
    /// On screen and falling
    Falling { pos: IVec2 },
}

/// A single power-up instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub state: PowerUpState,
    config: PowerUpConfig,
    screen_width: i32,
    screen_height: i32,
    /// Width of the asteroid column grid used to place the power-up
    column_width: i32,
}

impl PowerUp {
    /// Create an inactive power-up whose first appearance is rolled from
    /// the config's first-delay window
    pub fn new<R: Rng>(
        kind: PowerUpKind,
        config: PowerUpConfig,
        screen_width: i32,
        screen_height: i32,
        column_width: i32,
        now_ms: u64,
        rng: &mut R,
    ) -> Self {
        let (lo, hi) = config.first_delay_ms;
        let next_spawn_at_ms = now_ms + rng.random_range(lo..=hi.max(lo));
        Self {
            kind,
            state: PowerUpState::Inactive { next_spawn_at_ms },
            config,
            screen_width,
            screen_height,
            column_width,
        }
    }

    /// Current position, if falling
    pub fn pos(&self) -> Option<IVec2> {
        match self.state {
            PowerUpState::Falling { pos } => Some(pos),
            PowerUpState::Inactive { .. } => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, PowerUpState::Falling { .. })
    }

    /// Deadline of the next appearance, if waiting
    pub fn next_spawn_at_ms(&self) -> Option<u64> {
        match self.state {
            PowerUpState::Inactive { next_spawn_at_ms } => Some(next_spawn_at_ms),
            PowerUpState::Falling { .. } => None,
        }
    }

    /// Activate when due, then advance; a falling power-up that passes the
    /// bottom edge goes back to waiting
    pub fn tick<R: Rng>(&mut self, now_ms: u64, rng: &mut R) {
        if let PowerUpState::Inactive { next_spawn_at_ms } = self.state {
            if now_ms >= next_spawn_at_ms {
                let x = snapped_column(rng, self.screen_width, self.column_width)
                    + self.config.x_offset;
                self.state = PowerUpState::Falling {
                    pos: IVec2::new(x, self.config.start_y),
                };
                log::debug!("{:?} spawned at x={}", self.kind, x);
            }
        }

        if let PowerUpState::Falling { pos } = &mut self.state {
            pos.y += self.config.speed;
            if pos.y > self.screen_height {
                log::debug!("{:?} missed", self.kind);
                self.deactivate(now_ms, rng);
            }
        }
    }

    /// Test the falling power-up against the player; a hit deactivates it
    pub fn try_pickup<R: Rng>(
        &mut self,
        mask: &CollisionMask,
        player_mask: &CollisionMask,
        player_pos: IVec2,
        now_ms: u64,
        rng: &mut R,
    ) -> bool {
        let Some(pos) = self.pos() else {
            return false;
        };
        if overlaps(player_mask, player_pos, mask, pos) {
            self.deactivate(now_ms, rng);
            true
        } else {
            false
        }
    }

    /// Return to waiting and re-roll the next appearance from `now_ms`
    pub fn deactivate<R: Rng>(&mut self, now_ms: u64, rng: &mut R) {
        let (lo, hi) = self.config.respawn_delay_ms;
        self.state = PowerUpState::Inactive {
            next_spawn_at_ms: now_ms + rng.random_range(lo..=hi.max(lo)),
        };
    }
}
