//! The two-phase size negotiation protocol.
//!
//! A widget first reports the size it wants (`request_size`, bottom-up) and
//! is then granted a placed rectangle (`allocate_size`, top-down). The
//! bookkeeping both phases share lives in [`LayoutState`], a component that
//! leaf widgets embed and containers carry alongside their cells.
//!
//! The cached sizes are only meaningful immediately after the call that
//! fills them. Every request over a subtree must finish before any
//! allocation over it starts; allocating a widget whose size was never
//! requested fails with [`LayoutError::NotRequested`].

use std::fmt;

use sizekit_core::{Axis, Pos, Size, SizeAllocation};

use crate::error::LayoutError;

/// Requested/allocated caches plus the expansion policy of one widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutState {
    requested: Option<Size>,
    allocated: Option<SizeAllocation>,
    forced: Option<Size>,
    can_expand_width: bool,
    can_expand_height: bool,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            requested: None,
            allocated: None,
            forced: None,
            can_expand_width: true,
            can_expand_height: true,
        }
    }
}

impl LayoutState {
    /// Fresh state: nothing requested, expandable on both axes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Result of the most recent request, if any.
    #[inline]
    pub const fn requested_size(&self) -> Option<Size> {
        self.requested
    }

    /// Result of the most recent allocation, if any.
    #[inline]
    pub const fn allocated_size(&self) -> Option<SizeAllocation> {
        self.allocated
    }

    /// Size that overrides the computed request, if set.
    #[inline]
    pub const fn forced_size(&self) -> Option<Size> {
        self.forced
    }

    /// Override (or stop overriding) the computed request.
    pub fn set_forced_size(&mut self, forced: Option<Size>) {
        self.forced = forced;
    }

    /// Whether an allocation may exceed the request along `axis`.
    #[inline]
    pub const fn can_expand(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.can_expand_width,
            Axis::Vertical => self.can_expand_height,
        }
    }

    /// Allow or forbid expansion along `axis`.
    pub fn set_can_expand(&mut self, axis: Axis, allowed: bool) {
        match axis {
            Axis::Horizontal => self.can_expand_width = allowed,
            Axis::Vertical => self.can_expand_height = allowed,
        }
    }

    /// Cache a freshly computed request. A forced size wins over `computed`.
    pub fn record_request(&mut self, computed: Size) -> Size {
        let requested = self.forced.unwrap_or(computed);
        self.requested = Some(requested);
        requested
    }

    /// Check `allocation` against the request and expansion policy, then
    /// store a copy of it. Returns the request it was checked against.
    pub fn admit(&mut self, allocation: SizeAllocation) -> Result<Size, LayoutError> {
        let requested = self.requested.ok_or(LayoutError::NotRequested)?;
        for axis in Axis::ALL {
            if !self.can_expand(axis) && allocation.size.exceeds_along(&requested, axis) {
                return Err(LayoutError::ExpandDenied {
                    axis,
                    requested: requested.along(axis),
                    allocated: allocation.size.along(axis),
                });
            }
        }
        self.allocated = Some(allocation);
        Ok(requested)
    }

    /// Position the next `negotiate_size` allocates at: the previous
    /// allocation's position, or the origin.
    #[inline]
    pub fn previous_pos(&self) -> Pos {
        self.allocated.map_or(Pos::ORIGIN, |a| a.pos)
    }
}

/// A widget that takes part in size negotiation.
///
/// Implementors supply their natural size and an optional placement hook;
/// the provided methods handle forced sizes, sequencing and expansion checks.
///
/// ```
/// use sizekit_core::{Size, SizeAllocation};
/// use sizekit_layout::{LayoutState, Sizeable};
///
/// #[derive(Debug, Default)]
/// struct Dot {
///     state: LayoutState,
/// }
///
/// impl Sizeable for Dot {
///     fn layout_state(&self) -> &LayoutState {
///         &self.state
///     }
///     fn layout_state_mut(&mut self) -> &mut LayoutState {
///         &mut self.state
///     }
///     fn compute_size(&mut self) -> Size {
///         Size::new(1, 1)
///     }
/// }
///
/// let mut dot = Dot::default();
/// assert_eq!(dot.request_size(), Size::new(1, 1));
/// dot.allocate_size(SizeAllocation::from_parts(4, 4, 1, 1)).unwrap();
/// ```
pub trait Sizeable: fmt::Debug {
    /// Shared negotiation state.
    fn layout_state(&self) -> &LayoutState;

    /// Shared negotiation state, mutably.
    fn layout_state_mut(&mut self) -> &mut LayoutState;

    /// Natural size. Runs on every request, even when a forced size will
    /// override the result.
    fn compute_size(&mut self) -> Size;

    /// Short name for diagnostics and snapshots.
    fn kind(&self) -> &'static str {
        "widget"
    }

    /// Called with an allocation that passed the protocol checks.
    fn place(&mut self, allocation: SizeAllocation) -> Result<(), LayoutError> {
        let _ = allocation;
        Ok(())
    }

    /// Compute, cache, and return the requested size.
    fn request_size(&mut self) -> Size {
        let computed = self.compute_size();
        self.layout_state_mut().record_request(computed)
    }

    /// Validate and store `allocation`, then run [`Sizeable::place`].
    fn allocate_size(&mut self, allocation: SizeAllocation) -> Result<(), LayoutError> {
        self.layout_state_mut().admit(allocation)?;
        self.place(allocation)
    }

    /// Request, then allocate exactly the request at the previous position.
    fn negotiate_size(&mut self) -> Result<SizeAllocation, LayoutError> {
        let requested = self.request_size();
        let allocation = SizeAllocation::new(self.layout_state().previous_pos(), requested);
        self.allocate_size(allocation)?;
        Ok(allocation)
    }

    /// Re-allocate the previous size at `pos`.
    fn move_to(&mut self, pos: Pos) -> Result<SizeAllocation, LayoutError> {
        let previous = self.allocated_size().ok_or(LayoutError::NotAllocated)?;
        self.move_and_resize(SizeAllocation::new(pos, previous.size))
    }

    /// Re-allocate at the previous position with a new `size`.
    fn resize(&mut self, size: Size) -> Result<SizeAllocation, LayoutError> {
        let previous = self.allocated_size().ok_or(LayoutError::NotAllocated)?;
        self.move_and_resize(SizeAllocation::new(previous.pos, size))
    }

    /// Replace a previous allocation outright.
    ///
    /// Unlike [`Sizeable::allocate_size`] this refuses to run on a widget
    /// that was never allocated.
    fn move_and_resize(&mut self, allocation: SizeAllocation) -> Result<SizeAllocation, LayoutError> {
        if self.allocated_size().is_none() {
            return Err(LayoutError::NotAllocated);
        }
        self.allocate_size(allocation)?;
        Ok(allocation)
    }

    /// Cached request.
    fn requested_size(&self) -> Option<Size> {
        self.layout_state().requested_size()
    }

    /// Cached allocation.
    fn allocated_size(&self) -> Option<SizeAllocation> {
        self.layout_state().allocated_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Tracker {
        state: LayoutState,
        natural: Size,
        computed_calls: usize,
        placed: Vec<SizeAllocation>,
    }

    impl Sizeable for Tracker {
        fn layout_state(&self) -> &LayoutState {
            &self.state
        }

        fn layout_state_mut(&mut self) -> &mut LayoutState {
            &mut self.state
        }

        fn compute_size(&mut self) -> Size {
            self.computed_calls += 1;
            self.natural
        }

        fn place(&mut self, allocation: SizeAllocation) -> Result<(), LayoutError> {
            self.placed.push(allocation);
            Ok(())
        }
    }

    fn tracker(width: u32, height: u32) -> Tracker {
        Tracker {
            natural: Size::new(width, height),
            ..Tracker::default()
        }
    }

    #[test]
    fn allocate_before_request_fails_fast() {
        let mut p = tracker(3, 3);
        assert_eq!(
            p.allocate_size(SizeAllocation::from_parts(0, 0, 3, 3)),
            Err(LayoutError::NotRequested)
        );
        assert!(p.placed.is_empty());
    }

    #[test]
    fn forced_size_overrides_but_still_computes() {
        let mut p = tracker(3, 3);
        p.layout_state_mut().set_forced_size(Some(Size::new(9, 1)));
        assert_eq!(p.request_size(), Size::new(9, 1));
        assert_eq!(p.computed_calls, 1);
        p.layout_state_mut().set_forced_size(None);
        assert_eq!(p.request_size(), Size::new(3, 3));
    }

    #[test]
    fn non_expandable_axis_rejects_larger_allocation() {
        let mut p = tracker(10, 10);
        p.layout_state_mut().set_can_expand(Axis::Vertical, false);
        p.request_size();
        assert!(p.allocate_size(SizeAllocation::from_parts(0, 0, 50, 10)).is_ok());
        assert_eq!(
            p.allocate_size(SizeAllocation::from_parts(0, 0, 10, 11)),
            Err(LayoutError::ExpandDenied {
                axis: Axis::Vertical,
                requested: 10,
                allocated: 11,
            })
        );
        // Shrinking is always allowed.
        assert!(p.allocate_size(SizeAllocation::from_parts(0, 0, 2, 2)).is_ok());
    }

    #[test]
    fn negotiate_reuses_previous_position() {
        let mut p = tracker(4, 5);
        assert_eq!(
            p.negotiate_size(),
            Ok(SizeAllocation::from_parts(0, 0, 4, 5))
        );
        p.request_size();
        p.allocate_size(SizeAllocation::from_parts(7, 8, 4, 5)).unwrap();
        p.natural = Size::new(6, 6);
        assert_eq!(
            p.negotiate_size(),
            Ok(SizeAllocation::from_parts(7, 8, 6, 6))
        );
    }

    #[test]
    fn request_is_idempotent() {
        let mut p = tracker(8, 2);
        let first = p.request_size();
        let second = p.request_size();
        assert_eq!(first, second);
        assert_eq!(p.requested_size(), Some(first));
    }

    #[test]
    fn move_and_resize_need_a_previous_allocation() {
        let mut p = tracker(4, 4);
        p.request_size();
        assert_eq!(p.move_to(Pos::new(1, 1)), Err(LayoutError::NotAllocated));
        assert_eq!(p.resize(Size::new(2, 2)), Err(LayoutError::NotAllocated));
        assert_eq!(
            p.move_and_resize(SizeAllocation::from_parts(0, 0, 4, 4)),
            Err(LayoutError::NotAllocated)
        );
        assert!(p.placed.is_empty());
    }

    #[test]
    fn move_keeps_size_and_resize_keeps_position() {
        let mut p = tracker(10, 10);
        p.request_size();
        p.allocate_size(SizeAllocation::from_parts(3, 4, 10, 10)).unwrap();

        assert_eq!(
            p.move_to(Pos::new(20, 30)),
            Ok(SizeAllocation::from_parts(20, 30, 10, 10))
        );
        assert_eq!(
            p.resize(Size::new(6, 12)),
            Ok(SizeAllocation::from_parts(20, 30, 6, 12))
        );
        assert_eq!(
            p.move_and_resize(SizeAllocation::from_parts(1, 2, 5, 5)),
            Ok(SizeAllocation::from_parts(1, 2, 5, 5))
        );
        assert_eq!(p.placed.len(), 4);
        assert_eq!(p.allocated_size(), Some(SizeAllocation::from_parts(1, 2, 5, 5)));
    }

    #[test]
    fn resize_still_checks_expansion() {
        let mut p = tracker(10, 10);
        p.layout_state_mut().set_can_expand(Axis::Horizontal, false);
        p.request_size();
        p.allocate_size(SizeAllocation::from_parts(0, 0, 10, 10)).unwrap();
        assert_eq!(
            p.resize(Size::new(11, 10)),
            Err(LayoutError::ExpandDenied {
                axis: Axis::Horizontal,
                requested: 10,
                allocated: 11,
            })
        );
        assert_eq!(p.allocated_size(), Some(SizeAllocation::from_parts(0, 0, 10, 10)));
    }
}
