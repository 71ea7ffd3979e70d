use bitvec::vec::BitVec;

use crate::{edge::EdgeKey, node_slots::SlotKey};

/// One incidence row: the membership vector of a single edge, indexed by
/// node slot.  Bits past the end of the vector read as zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct IncidenceRow {
    pub key: EdgeKey,
    members: BitVec,
}

impl IncidenceRow {
    fn new(key: EdgeKey, source: SlotKey, target: SlotKey) -> Self {
        let width = source.index().max(target.index()) + 1;
        let mut members = BitVec::repeat(false, width);
        members.set(source.index(), true);
        members.set(target.index(), true);
        IncidenceRow { key, members }
    }

    /// Returns true if the node in `slot` is an endpoint of this edge.
    pub fn contains(&self, slot: SlotKey) -> bool {
        self.members
            .get(slot.index())
            .map(|bit| *bit)
            .unwrap_or(false)
    }

    /// Iterates over the endpoint slots of this edge.  Yields a single slot
    /// for a self-loop.
    pub fn members(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter_ones()
    }
}

/// Per-edge membership vectors, kept index-aligned with the edge list:
/// `rows[i]` always describes the same edge as `edge_list[i]`.
#[derive(Clone, Debug, Default)]
pub(crate) struct IncidenceMatrix {
    rows: Vec<IncidenceRow>,
}

impl IncidenceMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: EdgeKey, source: SlotKey, target: SlotKey) {
        self.rows.push(IncidenceRow::new(key, source, target));
    }

    pub fn remove(&mut self, index: usize) -> IncidenceRow {
        self.rows.remove(index)
    }

    pub fn rows(&self) -> &[IncidenceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_slots::NodeSlots;

    #[test]
    fn test_row_flags_both_endpoints() {
        let mut slots = NodeSlots::new();
        let a = slots.insert("a").unwrap();
        let b = slots.insert("b").unwrap();
        let c = slots.insert("c").unwrap();
        let mut m = IncidenceMatrix::new();
        m.push(EdgeKey(0), c, a);
        let row = &m.rows()[0];
        assert!(row.contains(a));
        assert!(!row.contains(b));
        assert!(row.contains(c));
        assert_eq!(row.members().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_self_loop_has_single_member() {
        let mut slots = NodeSlots::new();
        let a = slots.insert("a").unwrap();
        let mut m = IncidenceMatrix::new();
        m.push(EdgeKey(7), a, a);
        assert_eq!(m.rows()[0].members().count(), 1);
        assert_eq!(m.remove(0).key, EdgeKey(7));
        assert_eq!(m.len(), 0);
    }

    #[test]
    fn test_bits_beyond_row_width_read_as_absent() {
        let mut slots = NodeSlots::new();
        let a = slots.insert("a").unwrap();
        let b = slots.insert("b").unwrap();
        let late = slots.insert("late").unwrap();
        let mut m = IncidenceMatrix::new();
        m.push(EdgeKey(0), a, b);
        assert!(!m.rows()[0].contains(late));
    }
}
