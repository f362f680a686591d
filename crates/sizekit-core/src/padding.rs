#![forbid(unsafe_code)]

//! Padding around a cell's content.

use serde::{Deserialize, Serialize};

use crate::geometry::{Axis, GeometryError, Size, checked_length};

/// Four non-negative margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Padding {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Padding {
    /// No padding.
    pub const ZERO: Self = Self::all(0);

    /// Create padding with explicit left/right/top/bottom values.
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Same margin on every side.
    pub const fn all(value: u32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Horizontal margins on left/right, vertical margins on top/bottom.
    pub const fn symmetric(horizontal: u32, vertical: u32) -> Self {
        Self::new(horizontal, horizontal, vertical, vertical)
    }

    /// CSS-style shorthand.
    ///
    /// - `[]` is no padding,
    /// - `[all]`,
    /// - `[horizontal, vertical]`,
    /// - `[left, right, top, bottom]`.
    pub fn shorthand(values: &[u32]) -> Result<Self, GeometryError> {
        match *values {
            [] => Ok(Self::ZERO),
            [all] => Ok(Self::all(all)),
            [horizontal, vertical] => Ok(Self::symmetric(horizontal, vertical)),
            [left, right, top, bottom] => Ok(Self::new(left, right, top, bottom)),
            _ => Err(GeometryError::PaddingArity {
                count: values.len(),
            }),
        }
    }

    /// Shorthand from signed input; negative components are rejected.
    pub fn try_shorthand(values: &[i64]) -> Result<Self, GeometryError> {
        let checked = values
            .iter()
            .map(|&value| checked_length("padding", value))
            .collect::<Result<Vec<_>, _>>()?;
        Self::shorthand(&checked)
    }

    /// `left + right`.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// `top + bottom`.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }

    /// Total padding as a size.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Leading and trailing margins along `axis`.
    #[inline]
    pub const fn sides(&self, axis: Axis) -> (u32, u32) {
        match axis {
            Axis::Horizontal => (self.left, self.right),
            Axis::Vertical => (self.top, self.bottom),
        }
    }

    /// Copy with the margins along `axis` replaced.
    #[inline]
    #[must_use]
    pub const fn with_sides(self, axis: Axis, leading: u32, trailing: u32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(leading, trailing, self.top, self.bottom),
            Axis::Vertical => Self::new(self.left, self.right, leading, trailing),
        }
    }
}

impl From<u32> for Padding {
    fn from(value: u32) -> Self {
        Self::all(value)
    }
}

impl From<(u32, u32)> for Padding {
    fn from((horizontal, vertical): (u32, u32)) -> Self {
        Self::symmetric(horizontal, vertical)
    }
}

impl From<(u32, u32, u32, u32)> for Padding {
    fn from((left, right, top, bottom): (u32, u32, u32, u32)) -> Self {
        Self::new(left, right, top, bottom)
    }
}
