//! Single-child passthrough layouts.

use sizekit_core::{Pos, Size, SizeAllocation};

use crate::cell::Cell;
use crate::error::LayoutError;

fn single_request(cells: &[Cell]) -> Result<Size, LayoutError> {
    match cells.first() {
        Some(cell) => cell.requested_size().ok_or(LayoutError::NotRequested),
        None => Ok(Size::ZERO),
    }
}

/// Hands its whole allocation to its only cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BinLayout;

impl BinLayout {
    /// The cell's request, or zero when empty.
    pub fn request_size(&self, cells: &[Cell]) -> Result<Size, LayoutError> {
        single_request(cells)
    }

    /// Forward `allocated` verbatim.
    pub fn allocate_size(
        &self,
        allocated: SizeAllocation,
        cells: &mut [Cell],
    ) -> Result<(), LayoutError> {
        if let Some(cell) = cells.first_mut() {
            cell.allocate_size(allocated)?;
        }
        Ok(())
    }
}

/// Like [`BinLayout`], but the child is placed in window-local
/// coordinates: at the origin, whatever the window's own position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowLayout;

impl WindowLayout {
    /// The cell's request, or zero when empty.
    pub fn request_size(&self, cells: &[Cell]) -> Result<Size, LayoutError> {
        single_request(cells)
    }

    /// Forward the allocated size at the origin.
    pub fn allocate_size(
        &self,
        allocated: SizeAllocation,
        cells: &mut [Cell],
    ) -> Result<(), LayoutError> {
        if let Some(cell) = cells.first_mut() {
            cell.allocate_size(SizeAllocation::new(Pos::ORIGIN, allocated.size))?;
        }
        Ok(())
    }
}
