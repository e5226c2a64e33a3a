//! Per-pixel collision masks
//!
//! Sprites are irregular (ships, rocks, gems), so bounding-box tests are far
//! too generous. A mask stores one opacity bit per pixel and two masks collide
//! only when a set pixel of one lands on a set pixel of the other.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Alpha values above this count as solid
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 127;

/// A per-pixel opacity map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionMask {
    width: i32,
    height: i32,
    /// Row-major, one entry per pixel
    bits: Vec<bool>,
}

impl CollisionMask {
    /// Fully transparent mask
    pub fn empty(width: i32, height: i32) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// Fully solid mask (a rectangle)
    pub fn filled(width: i32, height: i32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    /// Build a mask by evaluating `solid(x, y)` for every pixel
    pub fn from_fn(width: i32, height: i32, mut solid: impl FnMut(i32, i32) -> bool) -> Self {
        let mut mask = Self::empty(width, height);
        for y in 0..mask.height {
            for x in 0..mask.width {
                if solid(x, y) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    /// Build a mask from an alpha channel (one byte per pixel, row-major)
    ///
    /// Pixels with alpha strictly above `threshold` are solid. Missing trailing
    /// bytes are treated as transparent.
    pub fn from_alpha(width: i32, height: i32, alpha: &[u8], threshold: u8) -> Self {
        Self::from_fn(width, height, |x, y| {
            alpha
                .get((y * width + x) as usize)
                .is_some_and(|&a| a > threshold)
        })
    }

    /// Build a mask from RGB pixels where `key` marks transparency
    pub fn from_color_key(width: i32, height: i32, pixels: &[[u8; 3]], key: [u8; 3]) -> Self {
        Self::from_fn(width, height, |x, y| {
            pixels
                .get((y * width + x) as usize)
                .is_some_and(|&p| p != key)
        })
    }

    /// Solid ellipse inscribed in the mask bounds
    pub fn ellipse(width: i32, height: i32) -> Self {
        let (rx, ry) = (width as f32 / 2.0, height as f32 / 2.0);
        Self::from_fn(width, height, |x, y| {
            let dx = (x as f32 + 0.5 - rx) / rx;
            let dy = (y as f32 + 0.5 - ry) / ry;
            dx * dx + dy * dy <= 1.0
        })
    }

    /// Upward-pointing isosceles triangle (a ship silhouette)
    pub fn triangle(width: i32, height: i32) -> Self {
        let half = width as f32 / 2.0;
        Self::from_fn(width, height, |x, y| {
            let spread = half * (y as f32 + 0.5) / height as f32;
            (x as f32 + 0.5 - half).abs() <= spread
        })
    }

    /// Diamond (rhombus) touching the middle of each edge
    pub fn diamond(width: i32, height: i32) -> Self {
        let (rx, ry) = (width as f32 / 2.0, height as f32 / 2.0);
        Self::from_fn(width, height, |x, y| {
            let dx = (x as f32 + 0.5 - rx).abs() / rx;
            let dy = (y as f32 + 0.5 - ry).abs() / ry;
            dx + dy <= 1.0
        })
    }

    /// Lumpy rock outline; `phase` rotates the lumps (used for animation frames)
    pub fn rock(width: i32, height: i32, phase: f32) -> Self {
        let (rx, ry) = (width as f32 / 2.0, height as f32 / 2.0);
        Self::from_fn(width, height, |x, y| {
            let dx = (x as f32 + 0.5 - rx) / rx;
            let dy = (y as f32 + 0.5 - ry) / ry;
            let theta = dy.atan2(dx);
            let limit = 0.85 + 0.15 * (3.0 * (theta + phase)).cos();
            (dx * dx + dy * dy).sqrt() <= limit
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    /// Whether the pixel at (x, y) is solid; out of bounds is transparent
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    /// Set a pixel; out of bounds writes are ignored
    pub fn set(&mut self, x: i32, y: i32, solid: bool) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        self.bits[(y * self.width + x) as usize] = solid;
    }

    /// Number of solid pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// First overlapping pixel, in `self`'s local coordinates
    ///
    /// `offset` is the position of `other` relative to `self`.
    pub fn overlap_point(&self, other: &CollisionMask, offset: IVec2) -> Option<IVec2> {
        // Intersection of the two bounding boxes in self's coordinates
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width).min(self.width);
        let y1 = (offset.y + other.height).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return Some(IVec2::new(x, y));
                }
            }
        }
        None
    }
}

/// Check whether two positioned masks overlap pixel-for-pixel
pub fn overlaps(
    mask_a: &CollisionMask,
    pos_a: IVec2,
    mask_b: &CollisionMask,
    pos_b: IVec2,
) -> bool {
    mask_a.overlap_point(mask_b, pos_b - pos_a).is_some()
}
