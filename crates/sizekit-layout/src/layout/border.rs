//! A fixed margin around a single child.

use sizekit_core::{Axis, Padding, Size, SizeAllocation};

use crate::cell::Cell;
use crate::error::LayoutError;
use crate::homothecy::homothecy;

/// Surrounds its only cell with a margin.
///
/// Surplus space goes to the child when its cell expands along that axis,
/// otherwise to the margin. Missing space is taken from the child first and
/// from the margin only once the child is down to zero. Whenever the margin
/// changes, the new total is split between the two sides in proportion to
/// the nominal margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderLayout {
    margin: Padding,
}

impl BorderLayout {
    /// Border with the given margin.
    #[must_use]
    pub fn new(margin: impl Into<Padding>) -> Self {
        Self {
            margin: margin.into(),
        }
    }

    /// Nominal margin.
    #[inline]
    pub const fn margin(&self) -> Padding {
        self.margin
    }

    /// Child request plus margin.
    pub fn request_size(&self, cells: &[Cell]) -> Result<Size, LayoutError> {
        let child = match cells.first() {
            Some(cell) => cell.requested_size().ok_or(LayoutError::NotRequested)?,
            None => Size::ZERO,
        };
        Ok(child + self.margin.size())
    }

    /// Split `allocated` between margin and child.
    pub fn allocate_size(
        &self,
        allocated: SizeAllocation,
        cells: &mut [Cell],
    ) -> Result<(), LayoutError> {
        let Some(cell) = cells.first_mut() else {
            return Ok(());
        };
        let requested = cell.requested_size().ok_or(LayoutError::NotRequested)?;

        let (width, left) = self.split_axis(Axis::Horizontal, allocated, requested, cell);
        let (height, top) = self.split_axis(Axis::Vertical, allocated, requested, cell);
        cell.allocate_size(SizeAllocation::new(
            allocated.pos.offset(left, top),
            Size::new(width, height),
        ))?;
        Ok(())
    }

    /// Returns `(child length, leading margin)` along `axis`.
    fn split_axis(
        &self,
        axis: Axis,
        allocated: SizeAllocation,
        requested: Size,
        cell: &Cell,
    ) -> (u32, u32) {
        let available = allocated.size.along(axis);
        let child = requested.along(axis);
        let (leading, trailing) = self.margin.sides(axis);
        let margins = leading.saturating_add(trailing);
        let needed = child.saturating_add(margins);

        let child_length = if available >= needed {
            let extra = available - needed;
            if extra == 0 || cell.is_expandable(axis) {
                child + extra
            } else {
                child
            }
        } else {
            child.saturating_sub(needed - available)
        };

        let margin_length = available - child_length;
        let leading = if margin_length == margins {
            leading
        } else {
            homothecy(&[leading, trailing], margin_length)[0]
        };
        (child_length, leading)
    }
}
