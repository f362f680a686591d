//! Scrolled viewport around a single child.

use sizekit_core::{Pos, Size, SizeAllocation};

use crate::cell::Cell;
use crate::error::LayoutError;

/// Lets its only child be larger than the viewport.
///
/// The child is placed in viewport-local coordinates, shifted back by the
/// scroll offset, and sized to the union of the viewport and its request:
/// it never gets less than it asked for and always covers the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollLayout {
    offset: Pos,
}

impl ScrollLayout {
    /// Viewport scrolled to the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scroll offset.
    #[must_use]
    pub const fn offset(mut self, offset: Pos) -> Self {
        self.offset = offset;
        self
    }

    /// Current scroll offset.
    #[inline]
    pub const fn scroll_offset(&self) -> Pos {
        self.offset
    }

    /// The child's request: the viewport would like to show it whole.
    pub fn request_size(&self, cells: &[Cell]) -> Result<Size, LayoutError> {
        match cells.first() {
            Some(cell) => cell.requested_size().ok_or(LayoutError::NotRequested),
            None => Ok(Size::ZERO),
        }
    }

    /// Place the child at the origin minus the offset.
    pub fn allocate_size(
        &self,
        allocated: SizeAllocation,
        cells: &mut [Cell],
    ) -> Result<(), LayoutError> {
        let Some(cell) = cells.first_mut() else {
            return Ok(());
        };
        let requested = cell.requested_size().ok_or(LayoutError::NotRequested)?;
        cell.allocate_size(SizeAllocation::new(
            Pos::ORIGIN - self.offset,
            allocated.size.max(requested),
        ))?;
        Ok(())
    }
}
