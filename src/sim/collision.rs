//! Axis-aligned collision detection between the player and obstacles

use glam::Vec2;

use super::state::{Obstacle, Player};

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }

    /// True if `other` lies entirely inside this rectangle
    #[cfg(test)]
    pub fn contains(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && b_max.x <= a_max.x
            && b_max.y <= a_max.y
    }
}

/// Index of the first obstacle overlapping the player, in collection order
pub fn first_hit(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    let rect = player.rect();
    obstacles.iter().position(|o| rect.overlaps(&o.rect()))
}
