//! Serializable dump of a widget tree's negotiation results.

use serde::{Deserialize, Serialize};
use sizekit_core::{Size, SizeAllocation};

use crate::tree::WidgetId;

/// One widget as seen by [`LayoutSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: WidgetId,
    #[serde(default)]
    pub parent: Option<WidgetId>,
    /// Layout name for containers, leaf kind otherwise.
    pub kind: String,
    #[serde(default)]
    pub requested: Option<Size>,
    #[serde(default)]
    pub allocated: Option<SizeAllocation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WidgetId>,
}

/// Every widget of a tree in canonical id order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub nodes: Vec<NodeSnapshot>,
}

impl LayoutSnapshot {
    /// Look up a widget by id.
    pub fn node(&self, id: WidgetId) -> Option<&NodeSnapshot> {
        self.nodes
            .binary_search_by_key(&id, |node| node.id)
            .ok()
            .map(|index| &self.nodes[index])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
