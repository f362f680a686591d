//! Free-form canvas.

use sizekit_core::{Size, SizeAllocation};

use crate::cell::Cell;
use crate::error::LayoutError;

/// Children sit wherever they were last moved, at their requested size.
///
/// The board itself asks for a fixed preferred size regardless of its
/// children; their requests still run so they are ready to be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    preferred: Size,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            preferred: Size::new(64, 64),
        }
    }
}

impl BoardLayout {
    /// Board with the default 64x64 preferred size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preferred size.
    #[must_use]
    pub const fn preferred(mut self, preferred: Size) -> Self {
        self.preferred = preferred;
        self
    }

    /// The preferred size; fails if a child was never requested.
    pub fn request_size(&self, cells: &[Cell]) -> Result<Size, LayoutError> {
        if cells.iter().any(|cell| cell.requested_size().is_none()) {
            return Err(LayoutError::NotRequested);
        }
        Ok(self.preferred)
    }

    /// Refresh each cell at its own position with its own request.
    ///
    /// Cells that were never positioned start at the board's origin.
    pub fn allocate_size(
        &self,
        allocated: SizeAllocation,
        cells: &mut [Cell],
    ) -> Result<(), LayoutError> {
        for cell in cells {
            let requested = cell.requested_size().ok_or(LayoutError::NotRequested)?;
            let pos = cell.allocated_size().map_or(allocated.pos, |a| a.pos);
            cell.allocate_size(SizeAllocation::new(pos, requested))?;
        }
        Ok(())
    }
}
