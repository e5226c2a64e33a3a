//! Fixed-size pool of falling asteroids
//!
//! Asteroids are never removed: once one falls past the bottom edge it is
//! recycled to a fresh spawn point above the screen and the pass is scored.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::mask::{CollisionMask, overlaps};
use super::spawn::SpawnRules;

/// A single falling entity. Its shape comes from the pool's shared masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallingEntity {
    pub pos: IVec2,
}

/// The asteroid field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingPool {
    entities: Vec<FallingEntity>,
    rules: SpawnRules,
    screen_height: i32,
}

impl FallingPool {
    /// Create `count` entities, each placed against the ones created before it
    pub fn new<R: Rng>(count: usize, rules: SpawnRules, screen_height: i32, rng: &mut R) -> Self {
        let mut entities: Vec<FallingEntity> = Vec::with_capacity(count);
        for _ in 0..count {
            let pos = rules.spawn_position(rng, entities.iter().map(|e| e.pos));
            entities.push(FallingEntity { pos });
        }
        Self {
            entities,
            rules,
            screen_height,
        }
    }

    /// Build a pool at fixed positions
    pub fn from_positions(positions: &[IVec2], rules: SpawnRules, screen_height: i32) -> Self {
        Self {
            entities: positions.iter().map(|&pos| FallingEntity { pos }).collect(),
            rules,
            screen_height,
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> &[FallingEntity] {
        &self.entities
    }

    pub fn positions(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.entities.iter().map(|e| e.pos)
    }

    pub fn rules(&self) -> &SpawnRules {
        &self.rules
    }

    /// Move every entity down by `speed`; returns how many wrapped past the bottom
    ///
    /// Wrapped entities are respawned in pool order, each one placed against
    /// the current positions of all the others.
    pub fn tick<R: Rng>(&mut self, speed: i32, rng: &mut R) -> u32 {
        let mut wraps = 0;
        for index in 0..self.entities.len() {
            self.entities[index].pos.y += speed;
            if self.entities[index].pos.y > self.screen_height {
                wraps += 1;
                self.respawn(index, rng);
            }
        }
        wraps
    }

    /// Recycle one entity to a fresh spawn point, avoiding its siblings
    pub fn respawn<R: Rng>(&mut self, index: usize, rng: &mut R) {
        let siblings = self
            .entities
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, e)| e.pos);
        let pos = self.rules.spawn_position(rng, siblings);
        self.entities[index].pos = pos;
    }

    /// Indices (in pool order) of entities whose mask overlaps the player
    pub fn check_collisions(
        &self,
        frame_mask: &CollisionMask,
        player_mask: &CollisionMask,
        player_pos: IVec2,
    ) -> Vec<usize> {
        self.entities
            .iter()
            .enumerate()
            .filter(|(_, e)| overlaps(player_mask, player_pos, frame_mask, e.pos))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rules() -> SpawnRules {
        SpawnRules::new(SCREEN_WIDTH, SCREEN_HEIGHT, 50)
    }

    #[test]
    fn test_new_pool_spawns_above_screen() {
        let mut rng = Pcg32::seed_from_u64(3);
        let pool = FallingPool::new(5, rules(), SCREEN_HEIGHT, &mut rng);
        assert_eq!(pool.len(), 5);
        for pos in pool.positions() {
            assert!(pos.y < 0);
            assert_eq!(pos.x % 50, 0);
        }
    }

    #[test]
    fn test_tick_wraps_and_recycles() {
        let mut rng = Pcg32::seed_from_u64(3);
        let positions = [IVec2::new(0, SCREEN_HEIGHT - 2), IVec2::new(50, 0)];
        let mut pool = FallingPool::from_positions(&positions, rules(), SCREEN_HEIGHT);

        // y = 598 + 6 = 604 > 600 wraps; the other only falls
        let wraps = pool.tick(6, &mut rng);
        assert_eq!(wraps, 1);
        assert_eq!(pool.len(), 2);
        assert!(pool.entities()[0].pos.y < 0);
        assert_eq!(pool.entities()[1].pos, IVec2::new(50, 6));
    }

    #[test]
    fn test_exactly_at_bottom_edge_does_not_wrap() {
        let mut rng = Pcg32::seed_from_u64(3);
        let positions = [IVec2::new(0, SCREEN_HEIGHT - 6)];
        let mut pool = FallingPool::from_positions(&positions, rules(), SCREEN_HEIGHT);
        assert_eq!(pool.tick(6, &mut rng), 0);
        assert_eq!(pool.entities()[0].pos.y, SCREEN_HEIGHT);
        assert_eq!(pool.tick(6, &mut rng), 1);
    }

    #[test]
    fn test_check_collisions_in_pool_order() {
        let positions = [
            IVec2::new(200, 500),
            IVec2::new(0, -100),
            IVec2::new(190, 490),
        ];
        let pool = FallingPool::from_positions(&positions, rules(), SCREEN_HEIGHT);
        let rock = CollisionMask::filled(50, 50);
        let ship = CollisionMask::filled(40, 40);
        let hits = pool.check_collisions(&rock, &ship, IVec2::new(200, 500));
        assert_eq!(hits, vec![0, 2]);
    }
}
