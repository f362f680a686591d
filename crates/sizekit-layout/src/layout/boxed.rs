//! Horizontal and vertical boxes.
//!
//! Cells flow along the box's orientation (the primary axis) separated by a
//! fixed spacing; there is no spacing before the first or after the last
//! cell. Allocation picks one of three regimes by comparing the allocated
//! and requested primary lengths:
//!
//! - exact: every cell gets its request (homogeneous: the largest request);
//! - inflate: expandable cells share the surplus in proportion to their
//!   requests;
//! - shrink: all cells give up space in proportion to their requests, and
//!   when even the spacing does not fit, cells collapse to zero and the
//!   spacing itself is scaled down.
//!
//! Proportional splits go through [`homothecy`], so the cell lengths and
//! spacings always add up to exactly the allocated length.

use sizekit_core::{Axis, Size, SizeAllocation};

use crate::cell::Cell;
use crate::error::LayoutError;
use crate::homothecy::homothecy;

/// A box layout: HBox when horizontal, VBox when vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxLayout {
    orientation: Axis,
    spacing: u32,
    homogeneous: bool,
}

impl BoxLayout {
    /// Create a box flowing along `orientation`.
    #[must_use]
    pub const fn new(orientation: Axis) -> Self {
        Self {
            orientation,
            spacing: 0,
            homogeneous: false,
        }
    }

    /// Left-to-right box.
    #[must_use]
    pub const fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// Top-to-bottom box.
    #[must_use]
    pub const fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    /// Set the gap between consecutive cells.
    #[must_use]
    pub const fn spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Size every cell like the largest one.
    #[must_use]
    pub const fn homogeneous(mut self, homogeneous: bool) -> Self {
        self.homogeneous = homogeneous;
        self
    }

    /// Primary axis.
    #[inline]
    pub const fn orientation(&self) -> Axis {
        self.orientation
    }

    /// Gap between consecutive cells.
    #[inline]
    pub const fn gap(&self) -> u32 {
        self.spacing
    }

    /// Whether cells are sized uniformly.
    #[inline]
    pub const fn is_homogeneous(&self) -> bool {
        self.homogeneous
    }

    fn total_spacing(&self, count: usize) -> u64 {
        count.saturating_sub(1) as u64 * u64::from(self.spacing)
    }

    /// Sum (or max × count) of primary lengths plus spacing; max of
    /// secondary lengths.
    pub fn request_size(&self, cells: &[Cell]) -> Result<Size, LayoutError> {
        if cells.is_empty() {
            return Ok(Size::ZERO);
        }
        let axis = self.orientation;
        let mut sum = 0u64;
        let mut largest = 0u32;
        let mut secondary = 0u32;
        for cell in cells {
            let requested = cell.requested_size().ok_or(LayoutError::NotRequested)?;
            sum += u64::from(requested.along(axis));
            largest = largest.max(requested.along(axis));
            secondary = secondary.max(requested.along(axis.cross()));
        }
        let cells_length = if self.homogeneous {
            u64::from(largest) * cells.len() as u64
        } else {
            sum
        };
        let primary = cells_length + self.total_spacing(cells.len());
        Ok(Size::from_axes(
            axis,
            u32::try_from(primary).unwrap_or(u32::MAX),
            secondary,
        ))
    }

    /// Place every cell inside `allocated`.
    pub fn allocate_size(
        &self,
        allocated: SizeAllocation,
        requested: Size,
        cells: &mut [Cell],
    ) -> Result<(), LayoutError> {
        if cells.is_empty() {
            return Ok(());
        }
        let axis = self.orientation;
        let cross = axis.cross();

        let own = cells
            .iter()
            .map(|cell| cell.requested_size().ok_or(LayoutError::NotRequested))
            .collect::<Result<Vec<_>, _>>()?;

        let allocated_secondary = allocated.size.along(cross);
        let requested_secondary = requested.along(cross);
        if allocated_secondary > requested_secondary
            && !cells.iter().any(|cell| cell.is_expandable(cross))
        {
            return Err(LayoutError::BoxCannotExpand {
                axis: cross,
                requested: requested_secondary,
                allocated: allocated_secondary,
            });
        }

        let (slots, spacings) = self.distribute(
            allocated.size.along(axis),
            requested.along(axis),
            cells,
            &own,
        )?;

        // Whole slot, full secondary length. `Expand::Not` cells reject
        // any surplus themselves.
        let mut cursor = allocated.pos;
        for (i, cell) in cells.iter_mut().enumerate() {
            cell.allocate_size(SizeAllocation::new(
                cursor,
                Size::from_axes(axis, slots[i], allocated_secondary),
            ))?;
            cursor = cursor.offset_along(axis, slots[i]);
            if let Some(&gap) = spacings.get(i) {
                cursor = cursor.offset_along(axis, gap);
            }
        }
        Ok(())
    }

    /// Slot lengths for every cell and the `n - 1` spacings between them.
    fn distribute(
        &self,
        allocated: u32,
        requested: u32,
        cells: &[Cell],
        own: &[Size],
    ) -> Result<(Vec<u32>, Vec<u32>), LayoutError> {
        let axis = self.orientation;
        let count = cells.len();
        let gaps = count - 1;
        let total_spacing = self.total_spacing(count);
        let largest = own.iter().map(|s| s.along(axis)).max().unwrap_or(0);
        let nominal: Vec<u32> = if self.homogeneous {
            vec![largest; count]
        } else {
            own.iter().map(|s| s.along(axis)).collect()
        };

        if allocated == requested {
            crate::trace!(?axis, allocated, "box exact fit");
            return Ok((nominal, vec![self.spacing; gaps]));
        }

        if allocated > requested {
            if !cells.iter().any(|cell| cell.is_expandable(axis)) {
                return Err(LayoutError::BoxCannotExpand {
                    axis,
                    requested,
                    allocated,
                });
            }
            // A forced request may undercut the spacing; never underflow.
            if u64::from(allocated) < total_spacing {
                crate::warn!(?axis, allocated, total_spacing, "box inflated below its spacing");
            }
            let available = u64::from(allocated).saturating_sub(total_spacing) as u32;
            crate::debug!(?axis, allocated, requested, "box inflate");
            if self.homogeneous {
                return Ok((homothecy(&nominal, available), vec![self.spacing; gaps]));
            }

            let fixed: u32 = cells
                .iter()
                .zip(&nominal)
                .filter(|(cell, _)| !cell.is_expandable(axis))
                .map(|(_, &length)| length)
                .sum();
            let growing: Vec<u32> = cells
                .iter()
                .zip(&nominal)
                .filter(|(cell, _)| cell.is_expandable(axis))
                .map(|(_, &length)| length)
                .collect();
            let mut grown = homothecy(&growing, available.saturating_sub(fixed)).into_iter();
            let slots = cells
                .iter()
                .zip(&nominal)
                .map(|(cell, &length)| {
                    if cell.is_expandable(axis) {
                        grown.next().unwrap_or(length)
                    } else {
                        length
                    }
                })
                .collect();
            return Ok((slots, vec![self.spacing; gaps]));
        }

        if u64::from(allocated) > total_spacing {
            let available = (u64::from(allocated) - total_spacing) as u32;
            crate::debug!(?axis, allocated, requested, "box shrink");
            return Ok((homothecy(&nominal, available), vec![self.spacing; gaps]));
        }

        crate::debug!(?axis, allocated, requested, "box shrink collapses spacing");
        Ok((vec![0; count], homothecy(&vec![self.spacing; gaps], allocated)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{CellOptions, Expand};
    use crate::tree::WidgetId;

    fn cells(sizes: &[(u32, u32)], options: &[CellOptions]) -> Vec<Cell> {
        sizes
            .iter()
            .zip(options)
            .enumerate()
            .map(|(i, (&(w, h), &opts))| {
                let mut cell = Cell::new(Some(WidgetId::from_raw(i as u64 + 1)), opts);
                cell.request_size(Some(Size::new(w, h)));
                cell
            })
            .collect()
    }

    const ROW: [(u32, u32); 3] = [(20, 10), (40, 10), (30, 15)];

    fn fixed3() -> Vec<Cell> {
        cells(&ROW, &[CellOptions::fixed(); 3])
    }

    /// The middle cell keeps its width; every cell may grow vertically.
    fn row3() -> Vec<Cell> {
        let grow = CellOptions::default();
        cells(&ROW, &[grow, grow.expand_width(Expand::Not), grow])
    }

    fn widths(cells: &[Cell]) -> Vec<u32> {
        cells
            .iter()
            .map(|c| c.allocated_size().unwrap().width())
            .collect()
    }

    fn heights(cells: &[Cell]) -> Vec<u32> {
        cells
            .iter()
            .map(|c| c.allocated_size().unwrap().height())
            .collect()
    }

    fn lefts(cells: &[Cell]) -> Vec<i32> {
        cells
            .iter()
            .map(|c| c.allocated_size().unwrap().left())
            .collect()
    }

    #[test]
    fn heterogeneous_request() {
        let layout = BoxLayout::horizontal().spacing(7);
        assert_eq!(layout.request_size(&fixed3()), Ok(Size::new(104, 15)));
    }

    #[test]
    fn homogeneous_request_uses_largest() {
        let layout = BoxLayout::horizontal().spacing(7).homogeneous(true);
        assert_eq!(layout.request_size(&fixed3()), Ok(Size::new(134, 15)));
    }

    #[test]
    fn vertical_request_swaps_axes() {
        let layout = BoxLayout::vertical().spacing(2);
        assert_eq!(layout.request_size(&fixed3()), Ok(Size::new(40, 39)));
    }

    #[test]
    fn empty_box_requests_nothing() {
        let layout = BoxLayout::horizontal().spacing(7);
        assert_eq!(layout.request_size(&[]), Ok(Size::ZERO));
        assert!(layout
            .allocate_size(SizeAllocation::from_parts(0, 0, 50, 50), Size::ZERO, &mut [])
            .is_ok());
    }

    #[test]
    fn exact_fit_places_cells_consecutively() {
        let layout = BoxLayout::horizontal().spacing(7);
        let mut cells = row3();
        let requested = layout.request_size(&cells).unwrap();
        layout
            .allocate_size(SizeAllocation::from_parts(5, 9, 104, 15), requested, &mut cells)
            .unwrap();
        assert_eq!(widths(&cells), vec![20, 40, 30]);
        assert_eq!(lefts(&cells), vec![5, 32, 79]);
        assert_eq!(heights(&cells), vec![15, 15, 15]);
        assert!(cells.iter().all(|c| c.allocated_size().unwrap().top() == 9));
    }

    #[test]
    fn fixed_cells_refuse_the_secondary_length() {
        // The box may not shrink a slot to fit a cell; the cell reports it.
        let layout = BoxLayout::horizontal().spacing(7);
        let mut cells = fixed3();
        let requested = layout.request_size(&cells).unwrap();
        assert_eq!(
            layout.allocate_size(SizeAllocation::from_parts(0, 0, 104, 15), requested, &mut cells),
            Err(LayoutError::CellCannotExpand {
                axis: Axis::Vertical,
                requested: 10,
                allocated: 15,
            })
        );
    }

    #[test]
    fn inflate_without_expandable_cell_fails() {
        let layout = BoxLayout::horizontal().spacing(7);
        let mut cells = fixed3();
        let requested = layout.request_size(&cells).unwrap();
        assert_eq!(
            layout.allocate_size(SizeAllocation::from_parts(0, 0, 105, 15), requested, &mut cells),
            Err(LayoutError::BoxCannotExpand {
                axis: Axis::Horizontal,
                requested: 104,
                allocated: 105,
            })
        );
        assert_eq!(
            layout.allocate_size(SizeAllocation::from_parts(0, 0, 104, 16), requested, &mut cells),
            Err(LayoutError::BoxCannotExpand {
                axis: Axis::Vertical,
                requested: 15,
                allocated: 16,
            })
        );
    }

    #[test]
    fn inflate_distributes_among_expandable_cells() {
        let grow = CellOptions::default();
        let mut cells = cells(&ROW, &[grow.expand_width(Expand::Not), grow, grow]);
        let layout = BoxLayout::horizontal().spacing(7);
        let requested = layout.request_size(&cells).unwrap();
        layout
            .allocate_size(SizeAllocation::from_parts(0, 0, 156, 15), requested, &mut cells)
            .unwrap();
        assert_eq!(widths(&cells), vec![20, 70, 52]);
        assert_eq!(lefts(&cells), vec![0, 27, 104]);
    }

    #[test]
    fn inflate_skips_the_fixed_middle_cell() {
        // (20 + 30 + 52) / (20 + 30): 40.8 and 61.2 round to 41 and 61.
        let layout = BoxLayout::horizontal().spacing(7);
        let mut cells = row3();
        let requested = layout.request_size(&cells).unwrap();
        layout
            .allocate_size(SizeAllocation::from_parts(200, 100, 156, 15), requested, &mut cells)
            .unwrap();
        assert_eq!(widths(&cells), vec![41, 40, 61]);
        assert_eq!(lefts(&cells), vec![200, 248, 295]);
    }

    #[test]
    fn homogeneous_exact_fit_gives_every_cell_the_largest_slot() {
        let layout = BoxLayout::horizontal().spacing(7).homogeneous(true);
        let mut cells = row3();
        let requested = layout.request_size(&cells).unwrap();
        layout
            .allocate_size(SizeAllocation::from_parts(0, 0, 134, 15), requested, &mut cells)
            .unwrap();
        assert_eq!(widths(&cells), vec![40, 40, 40]);
        assert_eq!(lefts(&cells), vec![0, 47, 94]);
    }

    #[test]
    fn homogeneous_slot_wider_than_fixed_cell_fails() {
        let layout = BoxLayout::horizontal().spacing(7).homogeneous(true);
        let mut cells = cells(
            &ROW,
            &[CellOptions::default().expand_width(Expand::Not); 3],
        );
        let requested = layout.request_size(&cells).unwrap();
        assert_eq!(
            layout.allocate_size(SizeAllocation::from_parts(0, 0, 134, 15), requested, &mut cells),
            Err(LayoutError::CellCannotExpand {
                axis: Axis::Horizontal,
                requested: 20,
                allocated: 40,
            })
        );
    }

    #[test]
    fn homogeneous_inflate_grows_every_slot() {
        let layout = BoxLayout::horizontal().spacing(7).homogeneous(true);
        let mut cells = cells(&ROW, &[CellOptions::default(); 3]);
        let requested = layout.request_size(&cells).unwrap();
        layout
            .allocate_size(SizeAllocation::from_parts(200, 100, 164, 15), requested, &mut cells)
            .unwrap();
        assert_eq!(widths(&cells), vec![50, 50, 50]);
        assert_eq!(lefts(&cells), vec![200, 257, 314]);
    }

    #[test]
    fn shrink_scales_cells_and_keeps_spacing() {
        let layout = BoxLayout::horizontal().spacing(7);
        let mut cells = row3();
        let requested = layout.request_size(&cells).unwrap();
        layout
            .allocate_size(SizeAllocation::from_parts(0, 0, 59, 15), requested, &mut cells)
            .unwrap();
        // 45 px for cells: homothecy([20, 40, 30], 45) = [10, 20, 15].
        assert_eq!(widths(&cells), vec![10, 20, 15]);
        assert_eq!(lefts(&cells), vec![0, 17, 44]);
    }

    #[test]
    fn homogeneous_shrink_splits_evenly() {
        let layout = BoxLayout::horizontal().spacing(7).homogeneous(true);
        let mut cells = row3();
        let requested = layout.request_size(&cells).unwrap();
        layout
            .allocate_size(SizeAllocation::from_parts(200, 100, 104, 15), requested, &mut cells)
            .unwrap();
        assert_eq!(widths(&cells), vec![30, 30, 30]);
        assert_eq!(lefts(&cells), vec![200, 237, 274]);
    }

    #[test]
    fn shrink_below_spacing_collapses_cells() {
        let layout = BoxLayout::horizontal().spacing(7);
        let mut cells = row3();
        let requested = layout.request_size(&cells).unwrap();
        layout
            .allocate_size(SizeAllocation::from_parts(10, 0, 9, 15), requested, &mut cells)
            .unwrap();
        assert_eq!(widths(&cells), vec![0, 0, 0]);
        let lefts = lefts(&cells);
        assert!(lefts.windows(2).all(|w| w[0] <= w[1]));
        // Spacing scaled by homothecy([7, 7], 9) = [5, 4].
        assert_eq!(lefts, vec![10, 15, 19]);
    }
}
