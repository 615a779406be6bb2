#![forbid(unsafe_code)]

//! Geometric primitives in CSS pixels.
//!
//! The browser reports everything (client coordinates, bounding rects, canvas
//! sizes) as `f64` CSS pixels, so unlike a cell grid these types are
//! floating point throughout.

use serde::{Deserialize, Serialize};

/// Smallest edge a drawing surface is allowed to have.
///
/// Zero-sized containers are clamped to this so column counts and ratios
/// never divide by zero.
pub const MIN_SURFACE_EDGE: f64 = 1.0;

/// A point in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Origin `(0, 0)`.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation toward `target` by `factor` (0 = stay, 1 = snap).
    #[inline]
    pub fn lerp(self, target: Self, factor: f64) -> Self {
        Self {
            x: self.x + (target.x - self.x) * factor,
            y: self.y + (target.y - self.y) * factor,
        }
    }

    /// Component-wise offset of `self` from `origin`.
    #[inline]
    pub fn offset_from(self, origin: Self) -> Self {
        Self {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

/// Width/height pair in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size. Negative or NaN edges are stored as given; use
    /// [`Size::clamped`] before deriving geometry from it.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// This size with each edge raised to at least [`MIN_SURFACE_EDGE`].
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            width: clamp_edge(self.width),
            height: clamp_edge(self.height),
        }
    }

    /// Whether either edge is below [`MIN_SURFACE_EDGE`] (or NaN).
    #[inline]
    pub fn is_degenerate(self) -> bool {
        !(self.width >= MIN_SURFACE_EDGE && self.height >= MIN_SURFACE_EDGE)
    }

    /// Clamp a point into `[0, width] x [0, height]`.
    #[inline]
    pub fn clamp_point(self, p: Point) -> Point {
        Point {
            x: p.x.clamp(0.0, self.width.max(0.0)),
            y: p.y.clamp(0.0, self.height.max(0.0)),
        }
    }
}

#[inline]
fn clamp_edge(v: f64) -> f64 {
    if v.is_nan() || v < MIN_SURFACE_EDGE {
        MIN_SURFACE_EDGE
    } else {
        v
    }
}

/// An axis-aligned rectangle, as returned by `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Area in square pixels (zero for inverted rectangles).
    #[inline]
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Centre point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `p` lies inside (left/top inclusive, right/bottom exclusive).
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Overlap with `other`, or `None` when they do not intersect.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > x && bottom > y {
            Some(Self::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Grow (positive) or shrink (negative) each edge independently.
    pub fn expand(&self, margin: Margin) -> Self {
        Self::new(
            self.x - margin.left,
            self.y - margin.top,
            self.width + margin.left + margin.right,
            self.height + margin.top + margin.bottom,
        )
    }
}

/// Per-edge margin, in CSS `top right bottom left` order.
///
/// Mirrors the `rootMargin` of an intersection observer: positive values grow
/// the root, negative values shrink it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    #[inline]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// CSS shorthand with explicit `px` units on all four edges.
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn lerp_moves_a_fraction_of_the_gap() {
        let p = Point::new(0.0, 100.0).lerp(Point::new(100.0, 0.0), 0.1);
        assert!((p.x - 10.0).abs() < 1e-12);
        assert!((p.y - 90.0).abs() < 1e-12);
    }

    #[test]
    fn zero_size_clamps_to_min_edge() {
        let s = Size::new(0.0, -5.0).clamped();
        assert_eq!(s, Size::new(MIN_SURFACE_EDGE, MIN_SURFACE_EDGE));
        assert!(Size::new(0.0, 10.0).is_degenerate());
        assert!(Size::new(f64::NAN, 10.0).is_degenerate());
        assert!(!Size::new(10.0, 10.0).is_degenerate());
    }

    #[test]
    fn clamp_point_stays_in_bounds() {
        let s = Size::new(100.0, 50.0);
        assert_eq!(s.clamp_point(Point::new(-3.0, 80.0)), Point::new(0.0, 50.0));
    }

    #[test]
    fn center_of_bounds() {
        let b = Bounds::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(b.center(), Point::new(60.0, 40.0));
    }

    #[test]
    fn intersection_of_disjoint_is_none() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(20.0, 20.0, 5.0, 5.0);
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn negative_margin_shrinks_bottom() {
        let viewport = Bounds::new(0.0, 0.0, 800.0, 600.0);
        let root = viewport.expand(Margin::new(0.0, 0.0, -50.0, 0.0));
        assert_eq!(root.bottom(), 550.0);
        assert_eq!(root.width, 800.0);
    }

    #[test]
    fn margin_css_shorthand() {
        assert_eq!(Margin::new(0.0, 0.0, -50.0, 0.0).to_css(), "0px 0px -50px 0px");
    }
}
