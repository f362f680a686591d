//! Layout strategies.
//!
//! A container delegates size negotiation over its cells to one of a closed
//! set of strategies:
//!
//! - [`BinLayout`] - single child, allocation passed through
//! - [`WindowLayout`] - single child, placed in window-local coordinates
//! - [`BoardLayout`] - free-form canvas
//! - [`BorderLayout`] - fixed margin around a single child
//! - [`BoxLayout`] - horizontal or vertical flow (HBox / VBox)
//! - [`ScrollLayout`] - single child that may exceed the viewport
//!
//! Strategies hold configuration only. Both phases are functions of the
//! cells handed in; the results land in the cells' caches.

mod bin;
mod board;
mod border;
mod boxed;
mod scroll;

pub use bin::{BinLayout, WindowLayout};
pub use board::BoardLayout;
pub use border::BorderLayout;
pub use boxed::BoxLayout;
pub use scroll::ScrollLayout;

use sizekit_core::{Size, SizeAllocation};

use crate::cell::Cell;
use crate::error::LayoutError;

/// The strategy a container uses to negotiate its cells' sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Bin(BinLayout),
    Window(WindowLayout),
    Board(BoardLayout),
    Border(BorderLayout),
    Box(BoxLayout),
    Scroll(ScrollLayout),
}

impl Layout {
    /// Horizontal box with the given spacing.
    #[must_use]
    pub const fn hbox(spacing: u32) -> Self {
        Self::Box(BoxLayout::horizontal().spacing(spacing))
    }

    /// Vertical box with the given spacing.
    #[must_use]
    pub const fn vbox(spacing: u32) -> Self {
        Self::Box(BoxLayout::vertical().spacing(spacing))
    }

    /// Maximum number of cells, `None` when unbounded.
    #[must_use]
    pub const fn max_cells(&self) -> Option<usize> {
        match self {
            Self::Bin(_) | Self::Window(_) | Self::Border(_) | Self::Scroll(_) => Some(1),
            Self::Board(_) | Self::Box(_) => None,
        }
    }

    /// Short name for diagnostics and snapshots.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bin(_) => "bin",
            Self::Window(_) => "window",
            Self::Board(_) => "board",
            Self::Border(_) => "border",
            Self::Box(b) => match b.orientation() {
                sizekit_core::Axis::Horizontal => "hbox",
                sizekit_core::Axis::Vertical => "vbox",
            },
            Self::Scroll(_) => "scroll",
        }
    }

    /// Size the container asks for, given its cells' requests.
    pub fn request_size(&self, cells: &[Cell]) -> Result<Size, LayoutError> {
        match self {
            Self::Bin(layout) => layout.request_size(cells),
            Self::Window(layout) => layout.request_size(cells),
            Self::Board(layout) => layout.request_size(cells),
            Self::Border(layout) => layout.request_size(cells),
            Self::Box(layout) => layout.request_size(cells),
            Self::Scroll(layout) => layout.request_size(cells),
        }
    }

    /// Allocate every cell inside the container's `allocated` rectangle.
    pub fn allocate_size(
        &self,
        allocated: SizeAllocation,
        requested: Size,
        cells: &mut [Cell],
    ) -> Result<(), LayoutError> {
        match self {
            Self::Bin(layout) => layout.allocate_size(allocated, cells),
            Self::Window(layout) => layout.allocate_size(allocated, cells),
            Self::Board(layout) => layout.allocate_size(allocated, cells),
            Self::Border(layout) => layout.allocate_size(allocated, cells),
            Self::Box(layout) => layout.allocate_size(allocated, requested, cells),
            Self::Scroll(layout) => layout.allocate_size(allocated, cells),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::Bin(BinLayout)
    }
}

impl From<BinLayout> for Layout {
    fn from(layout: BinLayout) -> Self {
        Self::Bin(layout)
    }
}

impl From<WindowLayout> for Layout {
    fn from(layout: WindowLayout) -> Self {
        Self::Window(layout)
    }
}

impl From<BoardLayout> for Layout {
    fn from(layout: BoardLayout) -> Self {
        Self::Board(layout)
    }
}

impl From<BorderLayout> for Layout {
    fn from(layout: BorderLayout) -> Self {
        Self::Border(layout)
    }
}

impl From<BoxLayout> for Layout {
    fn from(layout: BoxLayout) -> Self {
        Self::Box(layout)
    }
}

impl From<ScrollLayout> for Layout {
    fn from(layout: ScrollLayout) -> Self {
        Self::Scroll(layout)
    }
}
