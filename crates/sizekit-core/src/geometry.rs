#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Lengths are unsigned so a [`Size`] can never hold a negative component.
//! Inputs that arrive as signed integers (host configuration, arithmetic
//! performed by callers) go through the checked constructors, which fail
//! immediately instead of clamping.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Left to right; lengths along it are widths.
    Horizontal,
    /// Top to bottom; lengths along it are heights.
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// The perpendicular axis.
    #[inline]
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Name of the length measured along this axis.
    #[must_use]
    pub const fn length_name(self) -> &'static str {
        match self {
            Axis::Horizontal => "width",
            Axis::Vertical => "height",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.length_name())
    }
}

/// Errors raised when building geometry values from unchecked input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A width, height, or padding component was negative.
    NegativeLength { what: &'static str, value: i64 },
    /// A length does not fit the unsigned 32-bit range.
    LengthOverflow { what: &'static str, value: i64 },
    /// Padding shorthand takes 0, 1, 2 or 4 values.
    PaddingArity { count: usize },
    /// A checked subtraction would have produced a negative length.
    Underflow { what: &'static str, lhs: u32, rhs: u32 },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeLength { what, value } => {
                write!(f, "{what} must be non-negative, got {value}")
            }
            Self::LengthOverflow { what, value } => {
                write!(f, "{what} {value} exceeds the maximum length {}", u32::MAX)
            }
            Self::PaddingArity { count } => write!(
                f,
                "padding shorthand takes 0, 1, 2 or 4 values, got {count}"
            ),
            Self::Underflow { what, lhs, rhs } => {
                write!(f, "{what} {lhs} - {rhs} would be negative")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Convert a signed length into an unsigned one, rejecting negatives.
pub fn checked_length(what: &'static str, value: i64) -> Result<u32, GeometryError> {
    if value < 0 {
        return Err(GeometryError::NegativeLength { what, value });
    }
    u32::try_from(value).map_err(|_| GeometryError::LengthOverflow { what, value })
}

/// A non-negative width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// The empty size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Create a size from signed input, failing on negative components.
    pub fn try_new(width: i64, height: i64) -> Result<Self, GeometryError> {
        Ok(Self {
            width: checked_length("width", width)?,
            height: checked_length("height", height)?,
        })
    }

    /// Set the width from signed input.
    pub fn set_width(&mut self, width: i64) -> Result<(), GeometryError> {
        self.width = checked_length("width", width)?;
        Ok(())
    }

    /// Set the height from signed input.
    pub fn set_height(&mut self, height: i64) -> Result<(), GeometryError> {
        self.height = checked_length("height", height)?;
        Ok(())
    }

    /// True when both dimensions are strictly positive.
    #[inline]
    pub const fn occupies_surface(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Length along `axis`.
    #[inline]
    pub const fn along(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Copy of `self` with the length along `axis` replaced.
    #[inline]
    #[must_use]
    pub const fn with_along(self, axis: Axis, length: u32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(length, self.height),
            Axis::Vertical => Self::new(self.width, length),
        }
    }

    /// Build a size from a primary length and its cross length.
    #[inline]
    pub const fn from_axes(axis: Axis, primary: u32, secondary: u32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(primary, secondary),
            Axis::Vertical => Self::new(secondary, primary),
        }
    }

    /// Componentwise minimum (intersection of two extents).
    #[inline]
    #[must_use]
    pub fn min(self, other: Size) -> Size {
        Size::new(self.width.min(other.width), self.height.min(other.height))
    }

    /// Componentwise maximum (union of two extents).
    #[inline]
    #[must_use]
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Subtract, returning `None` if either component would go negative.
    #[inline]
    pub fn checked_sub(self, other: Size) -> Option<Size> {
        Some(Size::new(
            self.width.checked_sub(other.width)?,
            self.height.checked_sub(other.height)?,
        ))
    }

    /// Subtract, failing with [`GeometryError::Underflow`] on a negative result.
    pub fn try_sub(self, other: Size) -> Result<Size, GeometryError> {
        let width = self
            .width
            .checked_sub(other.width)
            .ok_or(GeometryError::Underflow {
                what: "width",
                lhs: self.width,
                rhs: other.width,
            })?;
        let height = self
            .height
            .checked_sub(other.height)
            .ok_or(GeometryError::Underflow {
                what: "height",
                lhs: self.height,
                rhs: other.height,
            })?;
        Ok(Size::new(width, height))
    }

    /// Subtract with each component floored at zero.
    #[inline]
    #[must_use]
    pub fn sub_zero(self, other: Size) -> Size {
        Size::new(
            self.width.saturating_sub(other.width),
            self.height.saturating_sub(other.height),
        )
    }

    /// True when `self` is larger than `other` along `axis`.
    #[inline]
    pub const fn exceeds_along(&self, other: &Size, axis: Axis) -> bool {
        self.along(axis) > other.along(axis)
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, other: Size) -> Size {
        Size::new(
            self.width.saturating_add(other.width),
            self.height.saturating_add(other.height),
        )
    }
}

impl AddAssign for Size {
    fn add_assign(&mut self, other: Size) {
        *self = *self + other;
    }
}

impl Mul<u32> for Size {
    type Output = Size;

    fn mul(self, factor: u32) -> Size {
        Size::new(
            self.width.saturating_mul(factor),
            self.height.saturating_mul(factor),
        )
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

impl TryFrom<(i64, i64)> for Size {
    type Error = GeometryError;

    fn try_from((width, height): (i64, i64)) -> Result<Self, Self::Error> {
        Self::try_new(width, height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A position. Coordinates may be negative (e.g. scrolled content).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate along `axis`.
    #[inline]
    pub const fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Copy of `self` with the coordinate along `axis` replaced.
    #[inline]
    #[must_use]
    pub const fn with_along(self, axis: Axis, coord: i32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(coord, self.y),
            Axis::Vertical => Self::new(self.x, coord),
        }
    }

    /// Move by an unsigned distance along `axis`.
    #[inline]
    #[must_use]
    pub fn offset_along(self, axis: Axis, distance: u32) -> Self {
        self.with_along(axis, self.along(axis).saturating_add_unsigned(distance))
    }

    /// Move by an unsigned distance on both axes.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: u32, dy: u32) -> Self {
        Self::new(
            self.x.saturating_add_unsigned(dx),
            self.y.saturating_add_unsigned(dy),
        )
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, other: Pos) -> Pos {
        Pos::new(self.x.saturating_add(other.x), self.y.saturating_add(other.y))
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, other: Pos) -> Pos {
        Pos::new(self.x.saturating_sub(other.x), self.y.saturating_sub(other.y))
    }
}

impl Mul<i32> for Pos {
    type Output = Pos;

    fn mul(self, factor: i32) -> Pos {
        Pos::new(self.x.saturating_mul(factor), self.y.saturating_mul(factor))
    }
}

impl From<(i32, i32)> for Pos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A placed rectangle: the position and size granted to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SizeAllocation {
    pub pos: Pos,
    pub size: Size,
}

impl SizeAllocation {
    /// Create a new allocation.
    #[inline]
    pub const fn new(pos: Pos, size: Size) -> Self {
        Self { pos, size }
    }

    /// Allocation at the origin with the given size.
    #[inline]
    pub const fn at_origin(size: Size) -> Self {
        Self::new(Pos::ORIGIN, size)
    }

    /// Allocation from raw coordinates.
    #[inline]
    pub const fn from_parts(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self::new(Pos::new(x, y), Size::new(width, height))
    }

    /// Left edge.
    #[inline]
    pub const fn left(&self) -> i32 {
        self.pos.x
    }

    /// Top edge.
    #[inline]
    pub const fn top(&self) -> i32 {
        self.pos.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x.saturating_add_unsigned(self.size.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y.saturating_add_unsigned(self.size.height)
    }

    /// Width.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.size.width
    }

    /// Height.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.size.height
    }
}

impl fmt::Display for SizeAllocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@({}, {})", self.size, self.pos.x, self.pos.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_try_new_rejects_negative() {
        assert_eq!(Size::try_new(3, 4), Ok(Size::new(3, 4)));
        assert_eq!(
            Size::try_new(-1, 4),
            Err(GeometryError::NegativeLength {
                what: "width",
                value: -1
            })
        );
        assert_eq!(
            Size::try_new(1, -4),
            Err(GeometryError::NegativeLength {
                what: "height",
                value: -4
            })
        );
    }

    #[test]
    fn size_setters_fail_fast() {
        let mut size = Size::new(1, 1);
        assert!(size.set_width(-2).is_err());
        assert_eq!(size, Size::new(1, 1));
        size.set_height(9).unwrap();
        assert_eq!(size.height, 9);
        assert!(matches!(
            size.set_width(i64::from(u32::MAX) + 1),
            Err(GeometryError::LengthOverflow { .. })
        ));
    }

    #[test]
    fn size_arithmetic() {
        let a = Size::new(10, 4);
        let b = Size::new(3, 7);
        assert_eq!(a + b, Size::new(13, 11));
        assert_eq!(a * 3, Size::new(30, 12));
        assert_eq!(a.min(b), Size::new(3, 4));
        assert_eq!(a.max(b), Size::new(10, 7));
        assert_eq!(a.sub_zero(b), Size::new(7, 0));
        assert_eq!(a.checked_sub(b), None);
        assert_eq!(a.checked_sub(Size::new(1, 1)), Some(Size::new(9, 3)));
        assert!(matches!(
            a.try_sub(b),
            Err(GeometryError::Underflow { what: "height", .. })
        ));
    }

    #[test]
    fn size_occupies_surface() {
        assert!(Size::new(1, 1).occupies_surface());
        assert!(!Size::new(0, 5).occupies_surface());
        assert!(!Size::new(5, 0).occupies_surface());
    }

    #[test]
    fn size_axis_accessors() {
        let s = Size::new(20, 10);
        assert_eq!(s.along(Axis::Horizontal), 20);
        assert_eq!(s.along(Axis::Vertical), 10);
        assert_eq!(s.with_along(Axis::Vertical, 3), Size::new(20, 3));
        assert_eq!(Size::from_axes(Axis::Vertical, 7, 2), Size::new(2, 7));
        assert_eq!(Axis::Horizontal.cross(), Axis::Vertical);
    }

    #[test]
    fn pos_offsets() {
        let p = Pos::new(-5, 2);
        assert_eq!(p.offset_along(Axis::Horizontal, 8), Pos::new(3, 2));
        assert_eq!(p.offset(1, 1), Pos::new(-4, 3));
        assert_eq!(p + Pos::new(5, 5), Pos::new(0, 7));
        assert_eq!(p - Pos::new(5, 5), Pos::new(-10, -3));
    }

    #[test]
    fn allocation_edges() {
        let a = SizeAllocation::from_parts(-2, 3, 10, 4);
        assert_eq!(a.left(), -2);
        assert_eq!(a.top(), 3);
        assert_eq!(a.right(), 8);
        assert_eq!(a.bottom(), 7);
        assert_eq!(a.width(), 10);
        assert_eq!(a.height(), 4);
        assert_eq!(a.to_string(), "10x4@(-2, 3)");
    }

    #[test]
    fn allocation_is_copied_not_aliased() {
        let original = SizeAllocation::from_parts(0, 0, 5, 5);
        let mut copy = original;
        copy.size.width = 1;
        assert_eq!(original.size.width, 5);
    }
}
