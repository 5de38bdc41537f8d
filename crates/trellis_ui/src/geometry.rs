//! Screen-space geometry primitives.
//!
//! All coordinates are pixels with the origin at the top-left corner of the
//! viewport, x growing right and y growing down.

use std::ops::{Add, Mul, Sub};

/// Tolerance used when snapping computed values to whole pixels.
///
/// Converting pixels to a fraction of the parent and back multiplies by the
/// reciprocal, which can land a hair below the integer it started from.
pub const PIXEL_EPSILON: f32 = 1e-3;

/// Floors a value to a whole pixel, absorbing round-trip float error.
#[inline]
#[must_use]
pub fn snap(value: f32) -> f32 {
    (value + PIXEL_EPSILON).floor()
}

/// A 2D vector of pixels or fractions, depending on context.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// Both components set to one.
    pub const ONE: Self = Self::new(1.0, 1.0);
    /// Both components set to positive infinity.
    pub const INFINITY: Self = Self::new(f32::INFINITY, f32::INFINITY);

    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise product.
    #[must_use]
    pub fn scale(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Component-wise clamp between `min` and `max`.
    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(self.x.max(min.x).min(max.x), self.y.max(min.y).min(max.y))
    }

    /// Snaps both components to whole pixels.
    #[must_use]
    pub fn snapped(self) -> Self {
        Self::new(snap(self.x), snap(self.y))
    }

    /// Returns true if either component is NaN.
    #[must_use]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Returns the component along `axis`.
    #[must_use]
    pub const fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle from a location and a size.
    #[must_use]
    pub const fn from_parts(location: Vec2, size: Vec2) -> Self {
        Self::new(location.x, location.y, size.x, size.y)
    }

    /// Top-left corner.
    #[must_use]
    pub const fn location(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns true if the point is inside the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom exclusive,
    /// so adjacent rectangles never both contain a point.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Returns true if two rectangles overlap with non-zero area.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns the intersection of two rectangles, or None if they don't intersect.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(Self::new(x, y, right - x, bottom - y))
    }

    /// Shrinks the rectangle by pixel insets, never below zero size.
    #[must_use]
    pub fn shrink_by(&self, insets: Insets) -> Self {
        let width = (self.width - insets.left - insets.right).max(0.0);
        let height = (self.height - insets.top - insets.bottom).max(0.0);
        Self::new(self.x + insets.left, self.y + insets.top, width, height)
    }

    /// Extent along `axis`.
    #[must_use]
    pub const fn length(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Leading edge along `axis`.
    #[must_use]
    pub const fn start(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

/// Edge insets. Used both as relative fractions and as pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates insets from the four edges.
    #[must_use]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// The same inset on every edge.
    #[must_use]
    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Converts relative fractions into pixels of `size`.
    #[must_use]
    pub fn to_pixels(self, size: Vec2) -> Self {
        Self::new(
            snap(self.left * size.x),
            snap(self.top * size.y),
            snap(self.right * size.x),
            snap(self.bottom * size.y),
        )
    }

    /// Returns true if every edge is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    #[default]
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Builds a vector from a main-axis and a cross-axis component.
    #[must_use]
    pub const fn vec(self, main: f32, cross: f32) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::new(main, cross),
            Self::Vertical => Vec2::new(cross, main),
        }
    }
}

/// Nine-point anchor used to place a rectangle inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Left edge, top edge.
    #[default]
    TopLeft,
    /// Horizontally centred, top edge.
    TopCenter,
    /// Right edge, top edge.
    TopRight,
    /// Left edge, vertically centred.
    MiddleLeft,
    /// Centred on both axes.
    Center,
    /// Right edge, vertically centred.
    MiddleRight,
    /// Left edge, bottom edge.
    BottomLeft,
    /// Horizontally centred, bottom edge.
    BottomCenter,
    /// Right edge, bottom edge.
    BottomRight,
}

impl Alignment {
    /// Horizontal factor: 0 = left, 0.5 = centre, 1 = right.
    const fn horizontal(self) -> f32 {
        match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => 0.0,
            Self::TopCenter | Self::Center | Self::BottomCenter => 0.5,
            Self::TopRight | Self::MiddleRight | Self::BottomRight => 1.0,
        }
    }

    /// Vertical factor: 0 = top, 0.5 = middle, 1 = bottom.
    const fn vertical(self) -> f32 {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => 0.0,
            Self::MiddleLeft | Self::Center | Self::MiddleRight => 0.5,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => 1.0,
        }
    }

    /// Location of a rectangle of `size` anchored inside `container`.
    #[must_use]
    pub fn align(self, container: Rect, size: Vec2) -> Vec2 {
        let free_x = container.width - size.x;
        let free_y = container.height - size.y;
        Vec2::new(
            container.x + snap(free_x * self.horizontal()),
            container.y + snap(free_y * self.vertical()),
        )
    }
}
