//! Axis-aligned rectangle value type.
//!
//! [`Rect`] is the unit of currency for the whole crate: monitor bounds, work
//! areas, window geometry, and every geometry-engine result are rectangles in
//! integer pixel coordinates.  The invariant `w, h >= 1` holds after every
//! transform — the constructors floor degenerate sizes at 1 so downstream
//! code never sees a zero or negative extent.

use std::fmt;

/// An immutable axis-aligned rectangle in integer pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels (always >= 1).
    pub w: i32,
    /// Height in pixels (always >= 1).
    pub h: i32,
}

impl Rect {
    /// Create a rectangle, flooring width and height at 1.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x,
            y,
            w: w.max(1),
            h: h.max(1),
        }
    }

    /// X coordinate one past the right edge.
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Y coordinate one past the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether `self` and `other` share any interior area.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Area in square pixels.
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} at ({}, {})", self.w, self.h, self.x, self.y)
    }
}
