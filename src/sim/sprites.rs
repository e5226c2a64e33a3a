//! Collision shapes for every sprite in a round
//!
//! Image decoding lives with the renderer; the simulation only needs masks.
//! `Sprites::procedural` builds stand-in shapes sized from the config, and a
//! frontend with real images can build masks with `CollisionMask::from_alpha`.

use std::f32::consts::TAU;

use super::mask::CollisionMask;
use crate::config::GameConfig;
use crate::consts::{ASTEROID_FRAMES, SHIELD_FRAMES};

/// Shared, immutable masks. Animated sprites carry one mask per frame.
#[derive(Debug, Clone)]
pub struct Sprites {
    pub player: CollisionMask,
    pub asteroid_frames: Vec<CollisionMask>,
    pub gem: CollisionMask,
    pub shield_frames: Vec<CollisionMask>,
}

impl Sprites {
    pub fn procedural(config: &GameConfig) -> Self {
        let rock = config.asteroid_size;
        let asteroid_frames = (0..ASTEROID_FRAMES)
            .map(|i| {
                if config.square_asteroids {
                    CollisionMask::filled(rock, rock)
                } else {
                    let phase = i as f32 * TAU / ASTEROID_FRAMES as f32 / 3.0;
                    CollisionMask::rock(rock, rock, phase)
                }
            })
            .collect();

        let gem_size = config.gem.map_or(35, |g| g.size);
        let shield_size = config.shield.map_or(40, |s| s.size);
        // Shield pulses slightly between frames
        let shield_frames = (0..SHIELD_FRAMES)
            .map(|i| {
                let inset = (i as i32 % 2) * 2;
                CollisionMask::from_fn(shield_size, shield_size, |x, y| {
                    let r = shield_size as f32 / 2.0 - inset as f32;
                    let dx = x as f32 + 0.5 - shield_size as f32 / 2.0;
                    let dy = y as f32 + 0.5 - shield_size as f32 / 2.0;
                    dx * dx + dy * dy <= r * r
                })
            })
            .collect();

        Self {
            player: CollisionMask::triangle(config.player_width, config.player_height),
            asteroid_frames,
            gem: CollisionMask::diamond(gem_size, gem_size),
            shield_frames,
        }
    }

    /// Build from explicit masks (e.g. decoded sprite alpha channels)
    ///
    /// An empty frame list is a caller bug; release builds substitute a single
    /// empty mask so lookups stay in range.
    pub fn from_masks(
        player: CollisionMask,
        mut asteroid_frames: Vec<CollisionMask>,
        gem: CollisionMask,
        mut shield_frames: Vec<CollisionMask>,
    ) -> Self {
        debug_assert!(!asteroid_frames.is_empty() && !shield_frames.is_empty());
        if asteroid_frames.is_empty() {
            log::warn!("No asteroid frames given; asteroids will never collide");
            asteroid_frames.push(CollisionMask::empty(0, 0));
        }
        if shield_frames.is_empty() {
            log::warn!("No shield frames given; shields cannot be picked up");
            shield_frames.push(CollisionMask::empty(0, 0));
        }
        Self {
            player,
            asteroid_frames,
            gem,
            shield_frames,
        }
    }

    /// Asteroid mask for an animation frame (wraps around)
    pub fn asteroid(&self, frame: usize) -> &CollisionMask {
        &self.asteroid_frames[frame % self.asteroid_frames.len()]
    }

    /// Shield mask for an animation frame (wraps around)
    pub fn shield(&self, frame: usize) -> &CollisionMask {
        &self.shield_frames[frame % self.shield_frames.len()]
    }
}
