//! Collision detection for axis-aligned rectangles and circles
//!
//! Every entity pair test in the simulation goes through these helpers.
//! Coordinates are screen space: origin top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_top_left(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Bounding box of the circle
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.center, Vec2::splat(self.radius * 2.0))
    }
}

/// Which face of a rectangle a circle struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl ImpactSide {
    /// Left/right impacts flip horizontal velocity, top/bottom flip vertical
    pub fn is_horizontal(self) -> bool {
        matches!(self, ImpactSide::Left | ImpactSide::Right)
    }
}

/// Point of `rect` closest to the circle center
#[inline]
pub fn closest_point(circle: &Circle, rect: &Rect) -> Vec2 {
    circle.center.clamp(rect.min, rect.max)
}

/// Distance from the circle center to the rectangle (0 when inside)
#[inline]
pub fn distance_to_rect(circle: &Circle, rect: &Rect) -> f32 {
    (circle.center - closest_point(circle, rect)).length()
}

pub fn circle_intersects_rect(circle: &Circle, rect: &Rect) -> bool {
    distance_to_rect(circle, rect) < circle.radius
}

/// Strict overlap: rectangles that only share an edge do not intersect.
pub fn rect_intersects_rect(a: &Rect, b: &Rect) -> bool {
    a.max.x > b.min.x && a.min.x < b.max.x && a.max.y > b.min.y && a.min.y < b.max.y
}

/// Classify the impact side from normalized offsets relative to the rectangle
/// center. Equal ratios resolve to top/bottom.
pub fn classify_impact_side(circle: &Circle, rect: &Rect) -> ImpactSide {
    let offset = circle.center - rect.center();
    let half = rect.size() / 2.0;
    let width_ratio = offset.x / half.x;
    let height_ratio = offset.y / half.y;

    if width_ratio.abs() > height_ratio.abs() {
        if offset.x > 0.0 {
            ImpactSide::Right
        } else {
            ImpactSide::Left
        }
    } else if offset.y > 0.0 {
        ImpactSide::Bottom
    } else {
        ImpactSide::Top
    }
}
