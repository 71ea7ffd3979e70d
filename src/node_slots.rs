use std::collections::HashMap;

use crate::node_id::NodeId;

/// A position in a [`NodeSlots`]. Stable across insertions and removals of
/// other nodes.  A key is handed out again only once it and every key above
/// it have been removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey(usize);

impl SlotKey {
    /// The zero-based column this slot occupies in matrix-like
    /// representations.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Insertion-ordered node registry that assigns every node a stable slot.
///
/// Slots double as column indices for the weight matrix and the incidence
/// bit vectors.  Removing a node leaves a hole rather than shifting later
/// nodes down, so slot keys held elsewhere stay valid.  Holes at the end are
/// reclaimed immediately; holes between live nodes are kept until `clear`,
/// so internal storage is bounded by the highest live slot rather than the
/// live node count.  Dense views skip holes.  Iteration order is insertion
/// order, which is the node enumeration order every algorithm uses for
/// tie-breaking.
#[derive(Clone, Debug)]
pub(crate) struct NodeSlots<N> {
    slots: Vec<Option<N>>,
    lookup: HashMap<N, SlotKey>,
}

impl<N: NodeId> NodeSlots<N> {
    pub fn new() -> Self {
        NodeSlots {
            slots: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Gets the number of live nodes.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    pub fn contains(&self, id: &N) -> bool {
        self.lookup.contains_key(id)
    }

    pub fn key(&self, id: &N) -> Option<SlotKey> {
        self.lookup.get(id).copied()
    }

    pub fn get(&self, key: SlotKey) -> Option<&N> {
        self.slots.get(key.0).and_then(Option::as_ref)
    }

    /// Inserts a new node, returning its slot, or `None` if the id is
    /// already present.
    pub fn insert(&mut self, id: N) -> Option<SlotKey> {
        if self.lookup.contains_key(&id) {
            return None;
        }
        let key = SlotKey(self.slots.len());
        self.slots.push(Some(id.clone()));
        self.lookup.insert(id, key);
        Some(key)
    }

    /// Removes a node, returning the slot it occupied.
    pub fn remove(&mut self, id: &N) -> Option<SlotKey> {
        let key = self.lookup.remove(id)?;
        self.slots[key.0] = None;
        while let Some(None) = self.slots.last() {
            self.slots.pop();
        }
        Some(key)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.lookup.clear();
    }

    /// Iterates over live nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, &N)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|id| (SlotKey(i), id)))
    }

    /// Iterates over live node ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &N> + '_ {
        self.iter().map(|(_, id)| id)
    }
}
