//! World-space geometry primitives.
//!
//! Everything the maze and the player occupy is expressed in continuous world units (the pixel
//! space of the viewport the maze is centered in). Boxes never rotate, so overlap is decided per
//! axis.

use std::ops::Add;

/// Two-dimensional vector in world units.
///
/// Used both as a point (the top-left corner of a box) and as a displacement or size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    /// Horizontal component, growing to the right.
    ///
    /// This field is measured from the left edge of the viewport, not of the maze.
    pub x: f32,
    /// Vertical component, growing downwards.
    ///
    /// This field is measured from the top edge of the viewport. Renderers with an upward y axis
    /// have to mirror it.
    pub y: f32,
}

impl Vec2 {
    /// Builds a vector from its two components.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Builds a vector with both components set to `side`.
    #[must_use]
    pub const fn splat(side: f32) -> Self {
        Self { x: side, y: side }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Axis-aligned bounding box in world units.
///
/// The box covers the open interval `(x, x + width)` horizontally and `(y, y + height)`
/// vertically, so two boxes that merely share an edge do not overlap. A player standing flush
/// against a wall is therefore not colliding with it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    ///
    /// This field is expected to be positive. A box with no extent never intersects anything.
    pub width: f32,
    /// Vertical extent.
    ///
    /// This field follows the same rules as `width`.
    pub height: f32,
}

impl Aabb {
    /// Builds a box from its top-left corner and extents.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a box from a top-left corner and a size vector.
    #[must_use]
    pub const fn at(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Returns the top-left corner.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
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

    /// Checks whether two boxes overlap on both axes.
    ///
    /// This function treats both boxes as open intervals, so overlap must be strictly positive on
    /// each axis; touching edges or corners do not count. The test is symmetric.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
