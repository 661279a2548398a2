/// 2D math shared by every entity: a float vector and an integer rectangle.

pub use glam::Vec2 as Vector2;

// ── Heading ──────────────────────────────────────────────────────────────────

/// Facing angle of a direction vector.
pub trait Heading {
    /// Heading in degrees, in `[0, 360)`.
    /// 0 points along +x; angles grow clockwise on screen (y down).
    fn angle_degrees(&self) -> f32;
}

impl Heading for Vector2 {
    fn angle_degrees(&self) -> f32 {
        let angle = self.y.atan2(self.x).to_degrees();
        if angle < 0.0 {
            let wrapped = angle + 360.0;
            // -0.00001 + 360 rounds to 360 in f32
            if wrapped >= 360.0 {
                0.0
            } else {
                wrapped
            }
        } else {
            angle
        }
    }
}

// ── Rect ─────────────────────────────────────────────────────────────────────

/// Axis-aligned integer rectangle.  Intersection follows the usual raster
/// convention: rectangles that only share an edge do not intersect, and a
/// rectangle with no area intersects nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn has_intersection(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether a float point lies inside, right and bottom edges excluded.
    pub fn contains_point(&self, p: Vector2) -> bool {
        p.x >= self.x as f32
            && p.x < self.right() as f32
            && p.y >= self.y as f32
            && p.y < self.bottom() as f32
    }
}
