#![forbid(unsafe_code)]

//! Two-phase size negotiation for widget trees.
//!
//! Every widget first reports the size it wants (request, bottom-up) and is
//! then granted a placed rectangle (allocation, top-down):
//!
//! - [`Sizeable`] - the protocol, with [`LayoutState`] as its shared state
//! - [`Cell`] - a child's slot: padding plus an [`Expand`] mode per axis
//! - [`Layout`] - the strategies containers delegate to (bin, window,
//!   board, border, box, scroll)
//! - [`WidgetTree`] - arena of widgets and containers driving both phases
//! - [`homothecy()`] - exact-sum proportional redistribution of lengths
//!
//! # Example
//!
//! ```
//! use sizekit_core::{Size, SizeAllocation};
//! use sizekit_layout::{BoxLayout, CellOptions, Fixed, WidgetTree, Where};
//!
//! let mut tree = WidgetTree::new();
//! let row = tree.add_container(BoxLayout::horizontal().spacing(7));
//! for width in [20, 40, 30] {
//!     let leaf = tree.add_leaf(Fixed::new(Size::new(width, 15)));
//!     tree.add_child(row, leaf, Where::End, CellOptions::default()).unwrap();
//! }
//!
//! assert_eq!(tree.request_size(row).unwrap(), Size::new(104, 15));
//! tree.allocate_size(row, SizeAllocation::from_parts(0, 0, 104, 15)).unwrap();
//! ```

pub mod cell;
pub mod error;
pub mod homothecy;
pub mod layout;
pub mod leaf;
pub mod sizeable;
pub mod snapshot;
pub mod tree;

pub(crate) use sizekit_core::{debug, debug_span, trace, trace_span, warn};

pub use cell::{Cell, CellOptions, Expand};
pub use error::LayoutError;
pub use homothecy::homothecy;
pub use layout::{
    BinLayout, BoardLayout, BorderLayout, BoxLayout, Layout, ScrollLayout, WindowLayout,
};
pub use leaf::{Fixed, Label};
pub use sizeable::{LayoutState, Sizeable};
pub use sizekit_core::{Axis, Padding, Pos, Size, SizeAllocation};
pub use snapshot::{LayoutSnapshot, NodeSnapshot};
pub use tree::{Container, WidgetId, Where, WidgetTree};
