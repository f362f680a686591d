//! Errors raised by size negotiation and container editing.
//!
//! Every variant is a programming or configuration error. Nothing here is
//! transient: callers are expected to propagate, not retry.

use std::fmt;

use sizekit_core::{Axis, GeometryError};

use crate::tree::WidgetId;

/// Errors for size negotiation and widget-tree mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A single-child container already holds a child.
    ContainerFull { container: WidgetId },
    /// The child already belongs to another container.
    AlreadyParented { child: WidgetId, parent: WidgetId },
    /// The widget has no parent slot (top-level windows).
    NoParentSlot { child: WidgetId },
    /// An explicit insertion index is past the end of the cell list.
    IndexOutOfRange { index: usize, len: usize },
    /// The referenced widget is not a child of the container.
    NotAChild { container: WidgetId, child: WidgetId },
    /// Insertion position text could not be parsed.
    InvalidWhere { descriptor: String },
    /// No widget with this id lives in the tree.
    UnknownWidget { id: WidgetId },
    /// The operation needs a container but the widget is a leaf.
    NotAContainer { id: WidgetId },
    /// The operation needs a board container.
    NotABoard { id: WidgetId },
    /// Adding the child would make a container its own ancestor.
    WouldCycle { container: WidgetId, child: WidgetId },
    /// A widget was allocated more than it requested on a non-expandable axis.
    ExpandDenied {
        axis: Axis,
        requested: u32,
        allocated: u32,
    },
    /// A cell with `Expand::Not` was allocated more than it requested.
    CellCannotExpand {
        axis: Axis,
        requested: u32,
        allocated: u32,
    },
    /// A box was inflated along an axis on which none of its cells expand.
    BoxCannotExpand {
        axis: Axis,
        requested: u32,
        allocated: u32,
    },
    /// `allocate_size` was called before `request_size` ever ran.
    NotRequested,
    /// A widget was moved or resized before it was ever allocated.
    NotAllocated,
    /// Expansion mode out of range.
    InvalidExpandMode { value: u8 },
    /// Invalid geometry input.
    Geometry(GeometryError),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContainerFull { container } => {
                write!(f, "container {container} already holds its only child")
            }
            Self::AlreadyParented { child, parent } => write!(
                f,
                "widget {child} already belongs to container {parent}; remove it first"
            ),
            Self::NoParentSlot { child } => {
                write!(f, "widget {child} cannot be placed inside a container")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "insertion index {index} out of range for {len} cells")
            }
            Self::NotAChild { container, child } => {
                write!(f, "widget {child} is not a child of container {container}")
            }
            Self::InvalidWhere { descriptor } => {
                write!(f, "invalid insertion position {descriptor:?}")
            }
            Self::UnknownWidget { id } => write!(f, "no widget {id} in tree"),
            Self::NotAContainer { id } => write!(f, "widget {id} is not a container"),
            Self::NotABoard { id } => write!(f, "widget {id} is not a board container"),
            Self::WouldCycle { container, child } => write!(
                f,
                "adding {child} to {container} would make a container its own ancestor"
            ),
            Self::ExpandDenied {
                axis,
                requested,
                allocated,
            } => write!(
                f,
                "{axis} {allocated} exceeds requested {requested} on a non-expandable axis"
            ),
            Self::CellCannotExpand {
                axis,
                requested,
                allocated,
            } => write!(
                f,
                "cell {axis} {allocated} exceeds requested {requested} but the cell does not expand"
            ),
            Self::BoxCannotExpand {
                axis,
                requested,
                allocated,
            } => write!(
                f,
                "box {axis} {allocated} exceeds requested {requested} and no cell expands along it"
            ),
            Self::NotRequested => write!(f, "size allocated before it was ever requested"),
            Self::NotAllocated => {
                write!(f, "widget moved or resized before it was ever allocated")
            }
            Self::InvalidExpandMode { value } => write!(f, "invalid expansion mode {value}"),
            Self::Geometry(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Geometry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GeometryError> for LayoutError {
    fn from(err: GeometryError) -> Self {
        Self::Geometry(err)
    }
}
