//! Cells: a child's slot inside a container.
//!
//! A cell wraps at most one child together with its padding and an
//! expansion mode per axis. It owns the child's placement, not the child.
//!
//! When a cell is shrunk the child gives up space first; padding only
//! shrinks once the child is down to zero. When it is inflated the
//! expansion mode decides who absorbs the extra. Either way the padding
//! that remains is split between the two sides of the axis in proportion
//! to the nominal padding on those sides.

use serde::{Deserialize, Serialize};
use sizekit_core::{Axis, Padding, Pos, Size, SizeAllocation};

use crate::error::LayoutError;
use crate::homothecy::homothecy;
use crate::tree::WidgetId;

/// What absorbs the space a cell receives beyond its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Expand {
    /// The cell refuses extra space.
    Not,
    /// The padding grows; the child keeps its requested length.
    Padding,
    /// The child grows; the padding keeps its nominal length.
    #[default]
    Padded,
}

impl TryFrom<u8> for Expand {
    type Error = LayoutError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Not),
            1 => Ok(Self::Padding),
            2 => Ok(Self::Padded),
            _ => Err(LayoutError::InvalidExpandMode { value }),
        }
    }
}

/// Padding and expansion settings for a new cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellOptions {
    pub expand_width: Expand,
    pub expand_height: Expand,
    pub padding: Padding,
}

impl CellOptions {
    /// Set both expansion modes.
    #[must_use]
    pub fn expand(mut self, width: Expand, height: Expand) -> Self {
        self.expand_width = width;
        self.expand_height = height;
        self
    }

    /// Set the horizontal expansion mode.
    #[must_use]
    pub fn expand_width(mut self, mode: Expand) -> Self {
        self.expand_width = mode;
        self
    }

    /// Set the vertical expansion mode.
    #[must_use]
    pub fn expand_height(mut self, mode: Expand) -> Self {
        self.expand_height = mode;
        self
    }

    /// Set the padding.
    #[must_use]
    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Cell that never grows.
    #[must_use]
    pub fn fixed() -> Self {
        Self::default().expand(Expand::Not, Expand::Not)
    }
}

/// A child's slot: padding, expansion policy, and cached placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    child: Option<WidgetId>,
    padding: Padding,
    expand_width: Expand,
    expand_height: Expand,
    padded_requested: Option<Size>,
    requested: Option<Size>,
    allocated: Option<SizeAllocation>,
    padded_allocation: Option<SizeAllocation>,
}

impl Cell {
    /// Cell around `child`.
    #[must_use]
    pub fn new(child: Option<WidgetId>, options: CellOptions) -> Self {
        Self {
            child,
            padding: options.padding,
            expand_width: options.expand_width,
            expand_height: options.expand_height,
            padded_requested: None,
            requested: None,
            allocated: None,
            padded_allocation: None,
        }
    }

    /// Cell with no child: pure whitespace.
    #[must_use]
    pub fn empty(options: CellOptions) -> Self {
        Self::new(None, options)
    }

    /// The wrapped child, if any.
    #[inline]
    pub const fn child(&self) -> Option<WidgetId> {
        self.child
    }

    /// Nominal padding.
    #[inline]
    pub const fn padding(&self) -> Padding {
        self.padding
    }

    /// Replace the nominal padding.
    pub fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
    }

    /// Expansion mode along `axis`.
    #[inline]
    pub const fn expand(&self, axis: Axis) -> Expand {
        match axis {
            Axis::Horizontal => self.expand_width,
            Axis::Vertical => self.expand_height,
        }
    }

    /// Replace the expansion mode along `axis`.
    pub fn set_expand(&mut self, axis: Axis, mode: Expand) {
        match axis {
            Axis::Horizontal => self.expand_width = mode,
            Axis::Vertical => self.expand_height = mode,
        }
    }

    /// True unless the cell refuses extra space along `axis`.
    #[inline]
    pub fn is_expandable(&self, axis: Axis) -> bool {
        self.expand(axis) != Expand::Not
    }

    /// Cached request: child request plus padding.
    #[inline]
    pub const fn requested_size(&self) -> Option<Size> {
        self.requested
    }

    /// The allocation granted to the whole cell.
    #[inline]
    pub const fn allocated_size(&self) -> Option<SizeAllocation> {
        self.allocated
    }

    /// The allocation the cell computed for its child.
    #[inline]
    pub const fn padded_allocation(&self) -> Option<SizeAllocation> {
        self.padded_allocation
    }

    /// Move the cell without resizing it (free-form boards).
    pub fn set_position(&mut self, pos: Pos) {
        let size = self.allocated.map_or(Size::ZERO, |a| a.size);
        self.allocated = Some(SizeAllocation::new(pos, size));
    }

    /// Record the child's request and return the cell's: child plus padding,
    /// or the padding alone for an empty cell.
    pub fn request_size(&mut self, padded: Option<Size>) -> Size {
        self.padded_requested = padded;
        let requested = padded.unwrap_or(Size::ZERO) + self.padding.size();
        self.requested = Some(requested);
        requested
    }

    /// Split `allocation` between padding and child, axis by axis.
    ///
    /// Returns the child's allocation, which is also cached.
    pub fn allocate_size(
        &mut self,
        allocation: SizeAllocation,
    ) -> Result<SizeAllocation, LayoutError> {
        if self.requested.is_none() {
            return Err(LayoutError::NotRequested);
        }
        let padded_requested = self.padded_requested.unwrap_or(Size::ZERO);

        let (width, left) = self.split_axis(Axis::Horizontal, allocation, padded_requested)?;
        let (height, top) = self.split_axis(Axis::Vertical, allocation, padded_requested)?;

        let padded = SizeAllocation::new(allocation.pos.offset(left, top), Size::new(width, height));
        self.allocated = Some(allocation);
        self.padded_allocation = Some(padded);
        Ok(padded)
    }

    /// Returns `(child length, leading padding)` along `axis`.
    fn split_axis(
        &self,
        axis: Axis,
        allocation: SizeAllocation,
        padded_requested: Size,
    ) -> Result<(u32, u32), LayoutError> {
        let available = allocation.size.along(axis);
        let padded = padded_requested.along(axis);
        let (leading, trailing) = self.padding.sides(axis);
        let nominal = leading.saturating_add(trailing);
        let requested = padded.saturating_add(nominal);

        let padded_length = if available < requested {
            // Child shrinks first; padding only pays the deficit it cannot.
            padded.saturating_sub(requested - available)
        } else if available > requested {
            match self.expand(axis) {
                Expand::Not => {
                    return Err(LayoutError::CellCannotExpand {
                        axis,
                        requested,
                        allocated: available,
                    });
                }
                Expand::Padded if self.child.is_some() => padded + (available - requested),
                Expand::Padded | Expand::Padding => padded,
            }
        } else {
            padded
        };

        // The leading side gets its proportional share rounded half up, so
        // 62 px over a 4:8 padding puts 21 px (not 20) on the leading side.
        let padding_length = available - padded_length;
        let leading = if padding_length == nominal {
            leading
        } else {
            homothecy(&[leading, trailing], padding_length)[0]
        };
        Ok((padded_length, leading))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requested_cell(padded: Size, options: CellOptions) -> Cell {
        let mut cell = Cell::new(Some(WidgetId::from_raw(1)), options);
        cell.request_size(Some(padded));
        cell
    }

    #[test]
    fn request_adds_padding() {
        let mut cell = Cell::new(
            Some(WidgetId::from_raw(1)),
            CellOptions::default().padding(Padding::new(1, 2, 3, 4)),
        );
        assert_eq!(cell.request_size(Some(Size::new(10, 20))), Size::new(13, 27));
        assert_eq!(cell.requested_size(), Some(Size::new(13, 27)));
    }

    #[test]
    fn empty_cell_requests_padding_only() {
        let mut cell = Cell::empty(CellOptions::default().padding(Padding::all(5)));
        assert_eq!(cell.request_size(None), Size::new(10, 10));
    }

    #[test]
    fn allocate_before_request_fails() {
        let mut cell = Cell::empty(CellOptions::default());
        assert_eq!(
            cell.allocate_size(SizeAllocation::from_parts(0, 0, 1, 1)),
            Err(LayoutError::NotRequested)
        );
    }

    #[test]
    fn exact_allocation_keeps_padding() {
        let mut cell = requested_cell(
            Size::new(10, 20),
            CellOptions::fixed().padding(Padding::new(1, 2, 3, 4)),
        );
        let child = cell
            .allocate_size(SizeAllocation::from_parts(100, 200, 13, 27))
            .unwrap();
        assert_eq!(child, SizeAllocation::from_parts(101, 203, 10, 20));
    }

    #[test]
    fn shrink_takes_from_child_first() {
        let mut cell = requested_cell(
            Size::new(10, 20),
            CellOptions::fixed().padding(Padding::new(1, 2, 3, 4)),
        );
        let child = cell
            .allocate_size(SizeAllocation::from_parts(0, 0, 8, 27))
            .unwrap();
        assert_eq!(child, SizeAllocation::from_parts(1, 3, 5, 20));
    }

    #[test]
    fn shrink_below_padding_scales_padding() {
        // Padding 1:3 horizontally, child 10; only 2 px available.
        let mut cell = requested_cell(
            Size::new(10, 0),
            CellOptions::fixed().padding(Padding::new(1, 3, 0, 0)),
        );
        let child = cell
            .allocate_size(SizeAllocation::from_parts(0, 0, 2, 0))
            .unwrap();
        assert_eq!(child.width(), 0);
        // round(1 * 2 / 4) = 1 (half up) leading, 1 trailing.
        assert_eq!(child.left(), 1);
    }

    #[test]
    fn inflate_not_expandable_fails() {
        let mut cell = requested_cell(Size::new(10, 10), CellOptions::fixed());
        assert_eq!(
            cell.allocate_size(SizeAllocation::from_parts(0, 0, 11, 10)),
            Err(LayoutError::CellCannotExpand {
                axis: Axis::Horizontal,
                requested: 10,
                allocated: 11,
            })
        );
    }

    #[test]
    fn inflate_padded_grows_child() {
        let mut cell = requested_cell(
            Size::new(10, 10),
            CellOptions::default()
                .expand(Expand::Padded, Expand::Padded)
                .padding(Padding::new(1, 3, 0, 0)),
        );
        let child = cell
            .allocate_size(SizeAllocation::from_parts(0, 0, 34, 30))
            .unwrap();
        assert_eq!(child, SizeAllocation::from_parts(1, 0, 30, 30));
    }

    #[test]
    fn inflate_padding_splits_extra_proportionally() {
        // 1:3 padding absorbing 20 extra pixels gets a 1:3 split.
        let mut cell = requested_cell(
            Size::new(10, 10),
            CellOptions::default()
                .expand(Expand::Padding, Expand::Not)
                .padding(Padding::new(1, 3, 0, 0)),
        );
        let child = cell
            .allocate_size(SizeAllocation::from_parts(0, 0, 34, 10))
            .unwrap();
        assert_eq!(child.width(), 10);
        assert_eq!(child.left(), 6);
    }

    #[test]
    fn inflate_padding_rounds_leading_share_half_up() {
        // 4:8 vertical padding absorbing 50 extra: 62 * 4 / 12 = 20.67.
        let mut cell = requested_cell(
            Size::new(10, 20),
            CellOptions::default()
                .expand(Expand::Padding, Expand::Padding)
                .padding(Padding::new(1, 2, 4, 8)),
        );
        let child = cell
            .allocate_size(SizeAllocation::from_parts(100, 200, 13, 82))
            .unwrap();
        assert_eq!(child, SizeAllocation::from_parts(101, 221, 10, 20));
    }

    #[test]
    fn inflate_padding_without_nominal_padding_splits_evenly() {
        let mut cell = requested_cell(
            Size::new(10, 10),
            CellOptions::default().expand(Expand::Padding, Expand::Padding),
        );
        let child = cell
            .allocate_size(SizeAllocation::from_parts(0, 0, 15, 14))
            .unwrap();
        // Odd remainder goes to the trailing side.
        assert_eq!(child, SizeAllocation::from_parts(2, 2, 10, 10));
    }

    #[test]
    fn empty_cell_inflates_its_padding() {
        let mut cell = Cell::empty(CellOptions::default().padding(Padding::new(2, 2, 0, 0)));
        cell.request_size(None);
        let child = cell
            .allocate_size(SizeAllocation::from_parts(0, 0, 8, 0))
            .unwrap();
        assert_eq!(child.width(), 0);
        assert_eq!(child.left(), 4);
    }

    #[test]
    fn expand_mode_from_u8() {
        assert_eq!(Expand::try_from(0u8), Ok(Expand::Not));
        assert_eq!(Expand::try_from(2u8), Ok(Expand::Padded));
        assert_eq!(
            Expand::try_from(3u8),
            Err(LayoutError::InvalidExpandMode { value: 3 })
        );
    }
}
