use std::collections::HashMap;

use crate::node_slots::SlotKey;

/// Edge weights are plain floating point numbers.
pub type Weight = f64;

/// Hash-based weight matrix keyed by node slot.
///
/// The matrix itself is asymmetric; undirected graphs store both
/// reciprocal cells explicitly.  An absent cell means "no edge".
#[derive(Clone, Debug, Default)]
pub(crate) struct WeightMatrix {
    /// Maps each row slot to a map of column slots and their weights.
    entries: HashMap<SlotKey, HashMap<SlotKey, Weight>>,
    /// Tracks the total number of cells for efficient length queries.
    entry_count: usize,
}

impl WeightMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, row: SlotKey, col: SlotKey, weight: Weight) -> Option<Weight> {
        let old = self.entries.entry(row).or_default().insert(col, weight);
        if old.is_none() {
            self.entry_count += 1;
        }
        old
    }

    pub fn get(&self, row: SlotKey, col: SlotKey) -> Option<Weight> {
        self.entries.get(&row).and_then(|m| m.get(&col)).copied()
    }

    /// Overwrites an existing cell, returning the previous weight.  Does
    /// nothing and returns `None` if the cell is absent.
    pub fn update(&mut self, row: SlotKey, col: SlotKey, weight: Weight) -> Option<Weight> {
        let cell = self.entries.get_mut(&row).and_then(|m| m.get_mut(&col))?;
        Some(std::mem::replace(cell, weight))
    }

    pub fn remove(&mut self, row: SlotKey, col: SlotKey) -> Option<Weight> {
        let targets = self.entries.get_mut(&row)?;
        let weight = targets.remove(&col)?;
        if targets.is_empty() {
            self.entries.remove(&row);
        }
        self.entry_count -= 1;
        Some(weight)
    }

    /// Returns true if the slot has any cell in its row or its column.
    /// Scans every row.
    pub fn touches(&self, slot: SlotKey) -> bool {
        self.entries.contains_key(&slot)
            || self.entries.values().any(|targets| targets.contains_key(&slot))
    }

    pub fn len(&self) -> usize {
        self.entry_count
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.entry_count = 0;
    }

    /// Iterates over all cells as `(row, col, weight)` in no particular
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, SlotKey, Weight)> + '_ {
        self.entries
            .iter()
            .flat_map(|(&row, targets)| targets.iter().map(move |(&col, &w)| (row, col, w)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_slots::NodeSlots;

    fn slots() -> (SlotKey, SlotKey, SlotKey) {
        let mut s = NodeSlots::new();
        (
            s.insert("a").unwrap(),
            s.insert("b").unwrap(),
            s.insert("c").unwrap(),
        )
    }

    #[test]
    fn test_insert_get_remove() {
        let (a, b, c) = slots();
        let mut m = WeightMatrix::new();
        assert_eq!(m.insert(a, b, 2.5), None);
        assert_eq!(m.insert(b, c, 1.0), None);
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(a, b), Some(2.5));
        assert_eq!(m.get(b, a), None);
        assert_eq!(m.remove(a, b), Some(2.5));
        assert_eq!(m.remove(a, b), None);
        assert_eq!(m.len(), 1);
        assert!(!m.touches(a));
        assert!(m.touches(c));
    }

    #[test]
    fn test_update_only_touches_existing_cells() {
        let (a, b, _) = slots();
        let mut m = WeightMatrix::new();
        assert_eq!(m.update(a, b, 3.0), None);
        assert_eq!(m.len(), 0);
        m.insert(a, b, 1.0);
        assert_eq!(m.update(a, b, 3.0), Some(1.0));
        assert_eq!(m.get(a, b), Some(3.0));
    }

    #[test]
    fn test_iter_yields_every_cell() {
        let (a, b, c) = slots();
        let mut m = WeightMatrix::new();
        m.insert(a, b, 1.0);
        m.insert(b, a, 1.0);
        m.insert(c, c, 4.0);
        let mut cells: Vec<_> = m.iter().map(|(r, c, _)| (r.index(), c.index())).collect();
        cells.sort();
        assert_eq!(cells, vec![(0, 1), (1, 0), (2, 2)]);
    }
}
