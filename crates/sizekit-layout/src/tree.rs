//! Arena-backed widget tree.
//!
//! Widgets live in a [`WidgetTree`] keyed by [`WidgetId`]. Ids are handed out
//! monotonically and never reused, so parent links are weak: once a parent is
//! removed, the link of each of its former children reads back as `None`.
//!
//! Containers own an ordered list of [`Cell`]s and each cell names its child
//! by id. The tree drives both negotiation phases over a subtree: requests
//! bottom-up, then allocations top-down.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sizekit_core::{Axis, Padding, Pos, Size, SizeAllocation};

use crate::cell::{Cell, CellOptions, Expand};
use crate::error::LayoutError;
use crate::layout::{Layout, WindowLayout};
use crate::sizeable::{LayoutState, Sizeable};
use crate::snapshot::{LayoutSnapshot, NodeSnapshot};

/// Stable identifier for a widget in a [`WidgetTree`].
///
/// Ids start at 1 and are never reused within a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Rebuild an id from its raw value, e.g. one read back from a
    /// [`LayoutSnapshot`]. The id only names a widget in the tree that
    /// handed it out.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Insertion position for a new cell.
///
/// The text form accepted by [`FromStr`] is `beginning`, `end`, `index:N`,
/// `before:ID` or `after:ID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Where {
    Beginning,
    #[default]
    End,
    /// Explicit position; `len` appends.
    Index(usize),
    /// Just before the cell holding this child.
    Before(WidgetId),
    /// Just after the cell holding this child.
    After(WidgetId),
}

impl Where {
    fn resolve(self, container: WidgetId, cells: &[Cell]) -> Result<usize, LayoutError> {
        let position_of = |child: WidgetId| {
            cells
                .iter()
                .position(|cell| cell.child() == Some(child))
                .ok_or(LayoutError::NotAChild { container, child })
        };
        match self {
            Self::Beginning => Ok(0),
            Self::End => Ok(cells.len()),
            Self::Index(index) if index <= cells.len() => Ok(index),
            Self::Index(index) => Err(LayoutError::IndexOutOfRange {
                index,
                len: cells.len(),
            }),
            Self::Before(child) => position_of(child),
            Self::After(child) => position_of(child).map(|index| index + 1),
        }
    }
}

impl fmt::Display for Where {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beginning => f.write_str("beginning"),
            Self::End => f.write_str("end"),
            Self::Index(index) => write!(f, "index:{index}"),
            Self::Before(child) => write!(f, "before:{}", child.0),
            Self::After(child) => write!(f, "after:{}", child.0),
        }
    }
}

impl FromStr for Where {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LayoutError::InvalidWhere {
            descriptor: s.to_owned(),
        };
        let text = s.trim();
        match text {
            "beginning" => return Ok(Self::Beginning),
            "end" => return Ok(Self::End),
            _ => {}
        }
        let (tag, value) = text.split_once(':').ok_or_else(invalid)?;
        let value = value.trim();
        match tag.trim() {
            "index" => value.parse().map(Self::Index).map_err(|_| invalid()),
            "before" => value
                .parse()
                .map(|raw| Self::Before(WidgetId(raw)))
                .map_err(|_| invalid()),
            "after" => value
                .parse()
                .map(|raw| Self::After(WidgetId(raw)))
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

/// A widget that negotiates space for its cells through a [`Layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    layout: Layout,
    cells: Vec<Cell>,
    state: LayoutState,
}

impl Container {
    fn new(layout: Layout) -> Self {
        Self {
            layout,
            cells: Vec::new(),
            state: LayoutState::new(),
        }
    }

    /// The negotiation strategy.
    #[inline]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Cells in order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The container's own negotiation state.
    #[inline]
    pub const fn state(&self) -> &LayoutState {
        &self.state
    }

    fn is_full(&self) -> bool {
        self.layout
            .max_cells()
            .is_some_and(|max| self.cells.len() >= max)
    }

    fn cell_index(&self, child: WidgetId) -> Option<usize> {
        self.cells.iter().position(|cell| cell.child() == Some(child))
    }
}

#[derive(Debug)]
enum Widget {
    Leaf(Box<dyn Sizeable>),
    Container(Container),
}

#[derive(Debug)]
struct Node {
    parent: Option<WidgetId>,
    parentable: bool,
    widget: Widget,
}

impl Node {
    fn state(&self) -> &LayoutState {
        match &self.widget {
            Widget::Leaf(leaf) => leaf.layout_state(),
            Widget::Container(container) => &container.state,
        }
    }

    fn state_mut(&mut self) -> &mut LayoutState {
        match &mut self.widget {
            Widget::Leaf(leaf) => leaf.layout_state_mut(),
            Widget::Container(container) => &mut container.state,
        }
    }

    fn kind(&self) -> &'static str {
        match &self.widget {
            Widget::Leaf(leaf) => leaf.kind(),
            Widget::Container(container) => container.layout.name(),
        }
    }
}

/// Owner of every widget and of the parent/child structure between them.
#[derive(Debug, Default)]
pub struct WidgetTree {
    next_id: u64,
    nodes: BTreeMap<WidgetId, Node>,
}

impl WidgetTree {
    /// Empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, parentable: bool, widget: Widget) -> WidgetId {
        self.next_id += 1;
        let id = WidgetId(self.next_id);
        self.nodes.insert(
            id,
            Node {
                parent: None,
                parentable,
                widget,
            },
        );
        id
    }

    /// Add a leaf widget.
    pub fn add_leaf(&mut self, leaf: impl Sizeable + 'static) -> WidgetId {
        self.insert(true, Widget::Leaf(Box::new(leaf)))
    }

    /// Add an empty container. Window containers get no parent slot.
    pub fn add_container(&mut self, layout: impl Into<Layout>) -> WidgetId {
        let layout = layout.into();
        let parentable = !matches!(layout, Layout::Window(_));
        self.insert(parentable, Widget::Container(Container::new(layout)))
    }

    /// Add a top-level window.
    pub fn add_window(&mut self) -> WidgetId {
        self.add_container(WindowLayout)
    }

    /// Whether `id` is alive in this tree.
    #[inline]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of live widgets.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: WidgetId) -> Result<&Node, LayoutError> {
        self.nodes.get(&id).ok_or(LayoutError::UnknownWidget { id })
    }

    fn node_mut(&mut self, id: WidgetId) -> Result<&mut Node, LayoutError> {
        self.nodes
            .get_mut(&id)
            .ok_or(LayoutError::UnknownWidget { id })
    }

    /// The container behind `id`.
    pub fn container(&self, id: WidgetId) -> Result<&Container, LayoutError> {
        match &self.node(id)?.widget {
            Widget::Container(container) => Ok(container),
            Widget::Leaf(_) => Err(LayoutError::NotAContainer { id }),
        }
    }

    fn container_mut(&mut self, id: WidgetId) -> Result<&mut Container, LayoutError> {
        match &mut self.node_mut(id)?.widget {
            Widget::Container(container) => Ok(container),
            Widget::Leaf(_) => Err(LayoutError::NotAContainer { id }),
        }
    }

    /// The layout of container `id`.
    pub fn layout(&self, id: WidgetId) -> Result<&Layout, LayoutError> {
        Ok(self.container(id)?.layout())
    }

    /// Replace the layout of container `id`.
    ///
    /// Fails with [`LayoutError::ContainerFull`] if the container holds more
    /// cells than the new layout accepts.
    pub fn set_layout(&mut self, id: WidgetId, layout: impl Into<Layout>) -> Result<(), LayoutError> {
        let layout = layout.into();
        let container = self.container_mut(id)?;
        if layout
            .max_cells()
            .is_some_and(|max| container.cells.len() > max)
        {
            return Err(LayoutError::ContainerFull { container: id });
        }
        container.layout = layout;
        Ok(())
    }

    /// Negotiation state of any widget.
    pub fn state(&self, id: WidgetId) -> Result<&LayoutState, LayoutError> {
        Ok(self.node(id)?.state())
    }

    /// Cached request of `id`.
    pub fn requested_size(&self, id: WidgetId) -> Result<Option<Size>, LayoutError> {
        Ok(self.state(id)?.requested_size())
    }

    /// Cached allocation of `id`.
    pub fn allocated_size(&self, id: WidgetId) -> Result<Option<SizeAllocation>, LayoutError> {
        Ok(self.state(id)?.allocated_size())
    }

    /// The container holding `id`, if it is still alive.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes
            .get(&id)?
            .parent
            .filter(|parent| self.nodes.contains_key(parent))
    }

    /// Children of container `id`, in cell order. Empty cells are skipped.
    pub fn children(
        &self,
        id: WidgetId,
    ) -> Result<impl Iterator<Item = WidgetId> + '_, LayoutError> {
        Ok(self.container(id)?.cells.iter().filter_map(Cell::child))
    }

    /// Live widgets without a parent, in id order.
    pub fn roots(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.nodes
            .keys()
            .copied()
            .filter(|&id| self.parent(id).is_none())
    }

    /// The cell holding `child` inside `container`.
    pub fn cell(&self, container: WidgetId, child: WidgetId) -> Result<&Cell, LayoutError> {
        let target = self.container(container)?;
        target
            .cell_index(child)
            .map(|index| &target.cells[index])
            .ok_or(LayoutError::NotAChild { container, child })
    }

    fn cell_mut(&mut self, container: WidgetId, child: WidgetId) -> Result<&mut Cell, LayoutError> {
        let target = self.container_mut(container)?;
        match target.cell_index(child) {
            Some(index) => Ok(&mut target.cells[index]),
            None => Err(LayoutError::NotAChild { container, child }),
        }
    }

    /// Put `child` into `container` at `at`, wrapped in a new cell.
    pub fn add_child(
        &mut self,
        container: WidgetId,
        child: WidgetId,
        at: Where,
        options: CellOptions,
    ) -> Result<(), LayoutError> {
        self.container(container)?;
        if !self.node(child)?.parentable {
            return Err(LayoutError::NoParentSlot { child });
        }
        if let Some(parent) = self.parent(child) {
            return Err(LayoutError::AlreadyParented { child, parent });
        }
        if self.is_ancestor_or_self(child, container) {
            return Err(LayoutError::WouldCycle { container, child });
        }

        let target = self.container_mut(container)?;
        if target.is_full() {
            return Err(LayoutError::ContainerFull { container });
        }
        let index = at.resolve(container, &target.cells)?;
        target.cells.insert(index, Cell::new(Some(child), options));
        self.node_mut(child)?.parent = Some(container);

        crate::trace!(%container, %child, index, "child added");
        Ok(())
    }

    /// Insert a cell with no child: padding only.
    pub fn add_spacer(
        &mut self,
        container: WidgetId,
        at: Where,
        options: CellOptions,
    ) -> Result<(), LayoutError> {
        let target = self.container_mut(container)?;
        if target.is_full() {
            return Err(LayoutError::ContainerFull { container });
        }
        let index = at.resolve(container, &target.cells)?;
        target.cells.insert(index, Cell::empty(options));
        Ok(())
    }

    /// Take `child` out of `container`, returning its cell.
    pub fn remove_child(&mut self, container: WidgetId, child: WidgetId) -> Result<Cell, LayoutError> {
        let target = self.container_mut(container)?;
        let index = target
            .cell_index(child)
            .ok_or(LayoutError::NotAChild { container, child })?;
        let cell = target.cells.remove(index);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = None;
        }
        crate::trace!(%container, %child, "child removed");
        Ok(cell)
    }

    /// Drop a widget. It leaves its container; its own children are orphaned.
    pub fn remove(&mut self, id: WidgetId) -> Result<(), LayoutError> {
        self.node(id)?;
        if let Some(parent) = self.parent(id) {
            self.remove_child(parent, id)?;
        }
        self.nodes.remove(&id);
        Ok(())
    }

    fn is_ancestor_or_self(&self, candidate: WidgetId, of: WidgetId) -> bool {
        let mut cursor = Some(of);
        while let Some(id) = cursor {
            if id == candidate {
                return true;
            }
            cursor = self.parent(id);
        }
        false
    }

    /// Replace the padding of `child`'s cell.
    pub fn set_padding(
        &mut self,
        container: WidgetId,
        child: WidgetId,
        padding: impl Into<Padding>,
    ) -> Result<(), LayoutError> {
        self.cell_mut(container, child)?.set_padding(padding.into());
        Ok(())
    }

    /// Replace the expansion mode of `child`'s cell along `axis`.
    pub fn set_expand(
        &mut self,
        container: WidgetId,
        child: WidgetId,
        axis: Axis,
        mode: Expand,
    ) -> Result<(), LayoutError> {
        self.cell_mut(container, child)?.set_expand(axis, mode);
        Ok(())
    }

    /// Override (or stop overriding) the request of `id`.
    pub fn set_forced_size(&mut self, id: WidgetId, forced: Option<Size>) -> Result<(), LayoutError> {
        self.node_mut(id)?.state_mut().set_forced_size(forced);
        Ok(())
    }

    /// Allow or forbid `id` to be allocated beyond its request along `axis`.
    pub fn set_can_expand(&mut self, id: WidgetId, axis: Axis, allowed: bool) -> Result<(), LayoutError> {
        self.node_mut(id)?.state_mut().set_can_expand(axis, allowed);
        Ok(())
    }

    /// Move a board child. The next allocation keeps it at `pos`.
    pub fn move_child(&mut self, board: WidgetId, child: WidgetId, pos: Pos) -> Result<(), LayoutError> {
        let target = self.container_mut(board)?;
        if !matches!(target.layout, Layout::Board(_)) {
            return Err(LayoutError::NotABoard { id: board });
        }
        let index = target.cell_index(child).ok_or(LayoutError::NotAChild {
            container: board,
            child,
        })?;
        target.cells[index].set_position(pos);
        Ok(())
    }

    /// Request the size of `id`, recursing into the whole subtree first.
    pub fn request_size(&mut self, id: WidgetId) -> Result<Size, LayoutError> {
        self.request_size_with(id, true)
    }

    /// Request the size of `id`.
    ///
    /// With `forward` unset, a container reuses its children's cached
    /// requests instead of asking them again.
    pub fn request_size_with(&mut self, id: WidgetId, forward: bool) -> Result<Size, LayoutError> {
        let _span = crate::trace_span!("request", widget = %id).entered();
        if let Widget::Leaf(leaf) = &mut self.node_mut(id)?.widget {
            let requested = leaf.request_size();
            crate::trace!(widget = %id, %requested, "leaf request");
            return Ok(requested);
        }

        let children: Vec<Option<WidgetId>> =
            self.container(id)?.cells.iter().map(Cell::child).collect();
        let mut padded = Vec::with_capacity(children.len());
        for child in children {
            let size = match child {
                None => None,
                Some(child) if forward => Some(self.request_size_with(child, true)?),
                Some(child) => Some(
                    self.state(child)?
                        .requested_size()
                        .ok_or(LayoutError::NotRequested)?,
                ),
            };
            padded.push(size);
        }

        let container = self.container_mut(id)?;
        for (cell, size) in container.cells.iter_mut().zip(padded) {
            cell.request_size(size);
        }
        let computed = container.layout.request_size(&container.cells)?;
        let requested = container.state.record_request(computed);
        crate::trace!(widget = %id, layout = container.layout.name(), %requested, "container request");
        Ok(requested)
    }

    /// Allocate `allocation` to `id`, then to every descendant.
    pub fn allocate_size(&mut self, id: WidgetId, allocation: SizeAllocation) -> Result<(), LayoutError> {
        let _span = crate::trace_span!("allocate", widget = %id).entered();
        let placements: Vec<(WidgetId, SizeAllocation)> = match &mut self.node_mut(id)?.widget {
            Widget::Leaf(leaf) => {
                leaf.allocate_size(allocation)?;
                crate::trace!(widget = %id, %allocation, "leaf allocation");
                return Ok(());
            }
            Widget::Container(container) => {
                let requested = container.state.admit(allocation)?;
                container
                    .layout
                    .allocate_size(allocation, requested, &mut container.cells)?;
                container
                    .cells
                    .iter()
                    .filter_map(|cell| Some((cell.child()?, cell.padded_allocation()?)))
                    .collect()
            }
        };
        crate::trace!(widget = %id, %allocation, children = placements.len(), "container allocation");

        for (child, child_allocation) in placements {
            self.allocate_size(child, child_allocation)?;
        }
        Ok(())
    }

    /// Request, then allocate exactly the request at the previous position.
    pub fn negotiate_size(&mut self, id: WidgetId) -> Result<SizeAllocation, LayoutError> {
        let _span = crate::debug_span!("negotiate", widget = %id).entered();
        let requested = self.request_size(id)?;
        let allocation = SizeAllocation::new(self.state(id)?.previous_pos(), requested);
        self.allocate_size(id, allocation)?;
        Ok(allocation)
    }

    /// Re-allocate the previous size of `id` at `pos`.
    pub fn move_to(&mut self, id: WidgetId, pos: Pos) -> Result<SizeAllocation, LayoutError> {
        let previous = self.previous_allocation(id)?;
        self.move_and_resize(id, SizeAllocation::new(pos, previous.size))
    }

    /// Re-allocate `id` at its previous position with a new `size`.
    pub fn resize(&mut self, id: WidgetId, size: Size) -> Result<SizeAllocation, LayoutError> {
        let previous = self.previous_allocation(id)?;
        self.move_and_resize(id, SizeAllocation::new(previous.pos, size))
    }

    /// Replace the previous allocation of `id` and re-place its subtree.
    ///
    /// Cached requests are reused; call [`WidgetTree::request_size`] first
    /// if anything changed since the last request phase.
    pub fn move_and_resize(
        &mut self,
        id: WidgetId,
        allocation: SizeAllocation,
    ) -> Result<SizeAllocation, LayoutError> {
        let _span = crate::debug_span!("move_and_resize", widget = %id).entered();
        self.previous_allocation(id)?;
        self.allocate_size(id, allocation)?;
        Ok(allocation)
    }

    fn previous_allocation(&self, id: WidgetId) -> Result<SizeAllocation, LayoutError> {
        self.state(id)?
            .allocated_size()
            .ok_or(LayoutError::NotAllocated)
    }

    /// Serializable view of every widget, in id order.
    #[must_use]
    pub fn snapshot(&self) -> LayoutSnapshot {
        let nodes = self
            .nodes
            .iter()
            .map(|(&id, node)| NodeSnapshot {
                id,
                parent: self.parent(id),
                kind: node.kind().to_owned(),
                requested: node.state().requested_size(),
                allocated: node.state().allocated_size(),
                children: match &node.widget {
                    Widget::Container(container) => {
                        container.cells.iter().filter_map(Cell::child).collect()
                    }
                    Widget::Leaf(_) => Vec::new(),
                },
            })
            .collect();
        LayoutSnapshot { nodes }
    }
}
