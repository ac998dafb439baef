//! Dense indexing of event ids.
//!
//! Event ids are arbitrary non-negative integers; the graph stores per-node
//! data in vectors, so each event is mapped to a compact node index.

use rustc_hash::FxHashMap;

use crate::models::EventId;

/// Position of an event in the graph's node vectors.
pub type NodeIndex = u32;

/// Bidirectional mapping between event ids and node indices.
#[derive(Debug, Clone)]
pub struct EventIndex {
    to_node: FxHashMap<EventId, NodeIndex>,
    from_node: Vec<EventId>,
}

impl EventIndex {
    /// Build an index from event ids, assigning node indices in ascending id
    /// order. Duplicate ids are collapsed.
    pub fn from_events(events: impl IntoIterator<Item = EventId>) -> Self {
        let mut ids: Vec<EventId> = events.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();

        let to_node = ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i as NodeIndex))
            .collect();

        Self {
            to_node,
            from_node: ids,
        }
    }

    #[inline]
    pub fn node(&self, event: EventId) -> Option<NodeIndex> {
        self.to_node.get(&event).copied()
    }

    #[inline]
    pub fn event(&self, node: NodeIndex) -> Option<EventId> {
        self.from_node.get(node as usize).copied()
    }

    /// Event ids in node-index order (ascending).
    pub fn events(&self) -> &[EventId] {
        &self.from_node
    }

    pub fn len(&self) -> usize {
        self.from_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_node.is_empty()
    }
}
