//! Scene and view positions.
//!
//! Two planar spaces are in play:
//!
//! - **Scene** ([`ScenePos`]): the chart surface. X is a Julian Day, Y is the negated
//!   (possibly log) price, so Y grows downward like the drawing surface.
//! - **View** ([`ViewPos`]): pixels from the top-left of whatever widget shows the scene.
//!
//! Artifacts persist scene positions only; see [`crate::coords`] for the conversions.

use serde::{Deserialize, Serialize};

/// Position on the chart surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenePos {
    pub x: f64,
    pub y: f64,
}

impl ScenePos {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: ScenePos) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Point at fraction `t` of the way to `other`.
    #[must_use]
    pub fn lerp(self, other: ScenePos, t: f64) -> Self {
        Self {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
        }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for ScenePos {
    fn from(pos: (f64, f64)) -> Self {
        Self::new(pos.0, pos.1)
    }
}

impl std::fmt::Display for ScenePos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}

/// Pixel position inside a view, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewPos {
    pub x: f64,
    pub y: f64,
}

impl ViewPos {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in scene coordinates, always normalised.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl SceneRect {
    #[must_use]
    pub fn from_points(a: ScenePos, b: ScenePos) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            right: a.x.max(b.x),
            bottom: a.y.max(b.y),
        }
    }

    /// Smallest rect holding every point, `None` for an empty iterator.
    pub fn bounding<I: IntoIterator<Item = ScenePos>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut rect = Self::from_points(first, first);
        for p in iter {
            rect.left = rect.left.min(p.x);
            rect.top = rect.top.min(p.y);
            rect.right = rect.right.max(p.x);
            rect.bottom = rect.bottom.max(p.y);
        }
        Some(rect)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center(self) -> ScenePos {
        ScenePos::new((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    #[must_use]
    pub fn contains(self, pos: ScenePos) -> bool {
        pos.x >= self.left && pos.x <= self.right && pos.y >= self.top && pos.y <= self.bottom
    }

    /// Expand by a margin (fraction of size, split evenly on both sides).
    #[must_use]
    pub fn expand(self, margin: f64) -> Self {
        let dx = self.width() * margin / 2.0;
        let dy = self.height() * margin / 2.0;
        Self {
            left: self.left - dx,
            top: self.top - dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }
}
