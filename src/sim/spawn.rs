//! Spawn placement for falling entities
//!
//! Positions are drawn above the visible screen and, unless disabled, snapped
//! to a coarse column grid the width of one entity. A single pass nudges the candidate
//! further up when a sibling in the same column sits too close vertically.
//! The nudge is not re-checked, so rare close spawns are still possible.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Placement policy for one kind of falling entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRules {
    pub screen_width: i32,
    pub entity_width: i32,
    /// Nearest spawn height above the screen (y = -y_near)
    pub y_near: i32,
    /// Farthest spawn height above the screen (y = -y_far)
    pub y_far: i32,
    /// Same-column siblings closer than this trigger a nudge
    pub min_vertical_gap: i32,
    /// Distance a too-close candidate is pushed upward
    pub nudge: i32,
    /// Snap x to multiples of the entity width
    pub snap_to_columns: bool,
}

impl SpawnRules {
    pub fn new(screen_width: i32, screen_height: i32, entity_width: i32) -> Self {
        Self {
            screen_width,
            entity_width,
            y_near: SPAWN_Y_NEAR,
            y_far: screen_height,
            min_vertical_gap: SPAWN_MIN_GAP,
            nudge: SPAWN_NUDGE,
            snap_to_columns: true,
        }
    }

    /// Random x, snapped down to a multiple of the entity width
    pub fn snapped_column<R: Rng>(&self, rng: &mut R) -> i32 {
        snapped_column(rng, self.screen_width, self.entity_width)
    }

    /// Draw a raw candidate position (x on the grid if snapping, y above the screen)
    pub fn draw<R: Rng>(&self, rng: &mut R) -> IVec2 {
        let x = if self.snap_to_columns {
            self.snapped_column(rng)
        } else {
            rng.random_range(0..=(self.screen_width - self.entity_width).max(0))
        };
        let (near, far) = if self.y_near <= self.y_far {
            (self.y_near, self.y_far)
        } else {
            (self.y_far, self.y_near)
        };
        let y = rng.random_range(-far..=-near);
        IVec2::new(x, y)
    }

    /// Push `candidate` up once per same-column sibling that is too close
    pub fn nudge(&self, candidate: IVec2, existing: impl IntoIterator<Item = IVec2>) -> IVec2 {
        let mut pos = candidate;
        for other in existing {
            if pos.x == other.x && (pos.y - other.y).abs() < self.min_vertical_gap {
                pos.y -= self.nudge;
            }
        }
        pos
    }

    /// Draw a candidate and apply the single-pass nudge against `existing`
    pub fn spawn_position<R: Rng>(
        &self,
        rng: &mut R,
        existing: impl IntoIterator<Item = IVec2>,
    ) -> IVec2 {
        let candidate = self.draw(rng);
        self.nudge(candidate, existing)
    }
}

/// Uniform x in `[0, screen_width - entity_width]`, snapped down to the column grid
///
/// Entities at least as wide as the screen always land in column 0.
pub fn snapped_column<R: Rng>(rng: &mut R, screen_width: i32, entity_width: i32) -> i32 {
    debug_assert!(entity_width > 0, "entity width must be positive");
    let width = entity_width.max(1);
    let max_x = screen_width - width;
    if max_x <= 0 {
        return 0;
    }
    let x = rng.random_range(0..=max_x);
    (x / width) * width
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rules() -> SpawnRules {
        SpawnRules::new(SCREEN_WIDTH, SCREEN_HEIGHT, 50)
    }

    #[test]
    fn test_nudges_close_sibling_in_same_column() {
        let rules = rules();
        let mut rng = Pcg32::seed_from_u64(7);
        // Replay the same draws to know where the candidate will land
        let candidate = rules.draw(&mut rng.clone());
        let sibling = IVec2::new(candidate.x, candidate.y + 40);

        let pos = rules.spawn_position(&mut rng, [sibling]);
        assert_eq!(pos.x, candidate.x);
        assert_eq!(pos.y, candidate.y - SPAWN_NUDGE);
    }

    #[test]
    fn test_nudge_is_single_pass() {
        let rules = rules();
        let candidate = IVec2::new(100, -300);
        // First sibling triggers a nudge to -500; the second sits right on the
        // nudged spot but earlier siblings are not re-checked
        let siblings = [IVec2::new(100, -250), IVec2::new(100, -480)];
        assert_eq!(rules.nudge(candidate, siblings), IVec2::new(100, -700));

        // Order matters: the close-to-nudged sibling first does nothing
        let reversed = [IVec2::new(100, -480), IVec2::new(100, -250)];
        assert_eq!(rules.nudge(candidate, reversed), IVec2::new(100, -500));
    }

    #[test]
    fn test_other_columns_and_far_siblings_are_ignored() {
        let rules = rules();
        let candidate = IVec2::new(100, -300);
        let siblings = [
            IVec2::new(150, -300),
            IVec2::new(100, -400),
            IVec2::new(100, -200),
        ];
        assert_eq!(rules.nudge(candidate, siblings), candidate);
    }

    #[test]
    fn test_free_placement_skips_the_grid() {
        let rules = SpawnRules {
            snap_to_columns: false,
            ..SpawnRules::new(SCREEN_WIDTH, SCREEN_HEIGHT, 30)
        };
        let mut rng = Pcg32::seed_from_u64(11);
        let xs: Vec<i32> = (0..64).map(|_| rules.draw(&mut rng).x).collect();
        assert!(xs.iter().all(|&x| (0..=SCREEN_WIDTH - 30).contains(&x)));
        assert!(xs.iter().any(|&x| x % 30 != 0));
    }

    #[test]
    fn test_entity_wider_than_screen_spawns_at_zero() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(snapped_column(&mut rng, 40, 60), 0);
        assert_eq!(snapped_column(&mut rng, 40, 40), 0);
    }

    proptest! {
        #[test]
        fn prop_draw_stays_in_columns_above_screen(seed in any::<u64>(), width in 1i32..120) {
            let rules = SpawnRules::new(SCREEN_WIDTH, SCREEN_HEIGHT, width);
            let mut rng = Pcg32::seed_from_u64(seed);
            let pos = rules.draw(&mut rng);
            prop_assert!(pos.x >= 0);
            prop_assert!(pos.x <= SCREEN_WIDTH - width);
            prop_assert_eq!(pos.x % width, 0);
            prop_assert!(pos.y >= -SCREEN_HEIGHT && pos.y <= -SPAWN_Y_NEAR);
        }
    }
}
