#![forbid(unsafe_code)]

//! sizekit public facade crate.
//!
//! Re-exports the geometry primitives and the size negotiation engine, and
//! offers a prelude for day-to-day use.
//!
//! ```
//! use sizekit::prelude::*;
//!
//! fn build() -> Result<SizeAllocation> {
//!     let mut tree = WidgetTree::new();
//!     let window = tree.add_window();
//!     let border = tree.add_container(BorderLayout::new(Padding::all(1)));
//!     let label = tree.add_leaf(Label::new("hello"));
//!     tree.add_child(window, border, Where::End, CellOptions::default())?;
//!     tree.add_child(border, label, Where::End, CellOptions::default())?;
//!     Ok(tree.negotiate_size(window)?)
//! }
//!
//! assert_eq!(build().unwrap().size, Size::new(7, 3));
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use sizekit_core::{Axis, GeometryError, Padding, Pos, Size, SizeAllocation};

// --- Layout re-exports -----------------------------------------------------

pub use sizekit_layout::{
    BinLayout, BoardLayout, BorderLayout, BoxLayout, Cell, CellOptions, Container, Expand, Fixed,
    Label, Layout, LayoutError, LayoutSnapshot, LayoutState, NodeSnapshot, ScrollLayout, Sizeable,
    WidgetId, WidgetTree, Where, WindowLayout, homothecy,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for sizekit users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid geometry input.
    Geometry(GeometryError),
    /// Size negotiation or tree editing failed.
    Layout(LayoutError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geometry(err) => write!(f, "{err}"),
            Self::Layout(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Geometry(err) => Some(err),
            Self::Layout(err) => Some(err),
        }
    }
}

impl From<GeometryError> for Error {
    fn from(err: GeometryError) -> Self {
        Self::Geometry(err)
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::Geometry(err) => Self::Geometry(err),
            other => Self::Layout(other),
        }
    }
}

/// Standard result type for sizekit APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Axis, BinLayout, BoardLayout, BorderLayout, BoxLayout, CellOptions, Error, Expand, Fixed,
        Label, Layout, Padding, Pos, Result, ScrollLayout, Size, SizeAllocation, Sizeable,
        WidgetId, WidgetTree, Where,
    };
}

pub use sizekit_core as core;
pub use sizekit_layout as layout;
