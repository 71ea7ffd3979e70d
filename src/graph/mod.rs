//! The general (directed or undirected) weighted graph and its four
//! synchronized representations.

mod snapshot;

use std::{collections::HashMap, fmt::Debug, marker::PhantomData};

use derivative::Derivative;

pub use self::snapshot::{GraphSnapshot, IncidenceView, MatrixView};
use crate::{
    edge::{DEFAULT_WEIGHT, Edge, EdgeEntry, EdgeKey},
    error::{GraphError, Result},
    incidence::IncidenceMatrix,
    node_id::NodeId,
    node_slots::{NodeSlots, SlotKey},
    tracing_support::debug,
    weight_matrix::{Weight, WeightMatrix},
    Directed, Directedness, Undirected,
};

/// A directed graph.
pub type DirectedGraph<N> = GenericGraph<N, Directed>;

/// An undirected graph.
pub type UndirectedGraph<N> = GenericGraph<N, Undirected>;

/// A weighted graph held simultaneously as a weight matrix, an incidence
/// structure, an adjacency list and an edge list.
///
/// The four representations are private and only change through the
/// mutation methods, each of which validates its input before writing
/// anything.  After every successful mutation an edge exists in one
/// representation if and only if it exists in all of them, and
/// `incidence[i]` describes the same edge as `edge_list[i]`.
///
/// The graph is not synchronized.  Mutations take `&mut self`, so sharing
/// it between tasks requires the caller to serialize access (for example
/// behind a `Mutex`).
///
/// # Type Parameters
/// * `N` - The caller-assigned node id type
/// * `D` - The directedness ([`Directed`] or [`Undirected`])
#[derive(Derivative)]
#[derivative(Clone(bound = "N: Clone"), Debug(bound = "N: Debug"))]
pub struct GenericGraph<N, D = Directed> {
    nodes: NodeSlots<N>,
    adjacency: HashMap<N, Vec<N>>,
    weights: WeightMatrix,
    incidence: IncidenceMatrix,
    edge_list: Vec<EdgeEntry<N>>,
    num_nodes: usize,
    num_edges: usize,
    next_edge_key: usize,
    directedness: PhantomData<D>,
}

impl<N: NodeId, D: Directedness> Default for GenericGraph<N, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeId, D: Directedness> GenericGraph<N, D> {
    /// Creates a new, empty graph.
    pub fn new() -> Self {
        GenericGraph {
            nodes: NodeSlots::new(),
            adjacency: HashMap::new(),
            weights: WeightMatrix::new(),
            incidence: IncidenceMatrix::new(),
            edge_list: Vec::new(),
            num_nodes: 0,
            num_edges: 0,
            next_edge_key: 0,
            directedness: PhantomData,
        }
    }

    /// Returns true if the graph is directed.
    pub fn is_directed(&self) -> bool {
        D::is_directed()
    }

    // Nodes

    /// Gets the number of nodes in the graph.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Checks whether a node is present.
    pub fn contains_node(&self, id: &N) -> bool {
        self.nodes.contains(id)
    }

    /// Iterates over node ids in enumeration (insertion) order.
    pub fn node_ids(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.ids()
    }

    /// Adds an isolated node.
    pub fn add_node(&mut self, id: N) -> Result<()> {
        if self.nodes.contains(&id) {
            return Err(GraphError::DuplicateNode(id.to_string()));
        }
        debug!(node = %id, "add node");
        self.adjacency.insert(id.clone(), Vec::new());
        self.nodes.insert(id);
        self.num_nodes += 1;
        self.debug_check();
        Ok(())
    }

    /// Removes every edge touching `id`, returning the removed edges in
    /// edge-list order.  The node itself stays.
    pub fn isolate_node(&mut self, id: &N) -> Result<Vec<Edge<N>>> {
        self.slot(id)?;
        let keys: Vec<EdgeKey> = self
            .edge_list
            .iter()
            .filter(|entry| entry.edge.touches(id))
            .map(|entry| entry.key)
            .collect();
        let mut removed = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(index) = self.index_of(key) {
                removed.push(self.commit_remove_edge(index));
            }
        }
        debug!(node = %id, edges = removed.len(), "isolate node");
        self.debug_check();
        Ok(removed)
    }

    /// Removes a node after removing every edge touching it.  Returns the
    /// edges that were removed along with it.
    pub fn remove_node(&mut self, id: &N) -> Result<Vec<Edge<N>>> {
        let removed = self.isolate_node(id)?;
        self.adjacency.remove(id);
        if let Some(slot) = self.nodes.remove(id) {
            debug_assert!(!self.weights.touches(slot));
        }
        self.num_nodes -= 1;
        debug!(node = %id, "remove node");
        self.debug_check();
        Ok(removed)
    }

    /// Removes all nodes and edges.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.adjacency.clear();
        self.weights.clear();
        self.incidence.clear();
        self.edge_list.clear();
        self.num_nodes = 0;
        self.num_edges = 0;
        debug!("clear graph");
    }

    /// Gets the outgoing neighbors of a node in insertion order.  For
    /// undirected graphs this is every neighbor.
    pub fn neighbors(&self, id: &N) -> Option<&[N]> {
        self.adjacency.get(id).map(Vec::as_slice)
    }

    // Edges

    /// Gets the number of edges in the graph.  An undirected edge counts
    /// once.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Adds an edge, returning its stable key.
    ///
    /// Fails without modifying anything if an endpoint is missing, if the
    /// weight is not finite, or if the same edge already exists.
    pub fn add_edge(&mut self, edge: Edge<N>) -> Result<EdgeKey> {
        let source = self.slot(&edge.source)?;
        let target = self.slot(&edge.target)?;
        if !edge.weight.is_finite() {
            return Err(self.invalid_weight(&edge));
        }
        if self.weights.get(source, target).is_some() {
            return Err(GraphError::DuplicateEdge {
                from: edge.source.to_string(),
                to: edge.target.to_string(),
            });
        }

        let key = EdgeKey(self.next_edge_key);
        self.next_edge_key += 1;
        debug!(key = %key, edge = %edge, "add edge");

        self.weights.insert(source, target, edge.weight);
        self.incidence.push(key, source, target);
        self.push_neighbor(&edge.source, &edge.target);
        if !D::is_directed() && source != target {
            self.weights.insert(target, source, edge.weight);
            self.push_neighbor(&edge.target, &edge.source);
        }
        self.edge_list.push(EdgeEntry { key, edge });
        self.num_edges += 1;
        self.debug_check();
        Ok(key)
    }

    /// Removes the edge from `edge.source` to `edge.target` (either
    /// orientation in an undirected graph); `edge.weight` is ignored.
    ///
    /// When `known` is given the edge with that key is removed, provided it
    /// actually connects the two endpoints; otherwise the edge list is
    /// searched.
    pub fn remove_edge(&mut self, edge: &Edge<N>, known: Option<EdgeKey>) -> Result<Edge<N>> {
        let index = self.locate(edge, known)?;
        let removed = self.commit_remove_edge(index);
        self.debug_check();
        Ok(removed)
    }

    /// Overwrites the weight of an existing edge in the weight matrix and
    /// the edge list, returning the previous weight.  Structure is
    /// unchanged.
    pub fn update_weight(&mut self, edge: &Edge<N>, known: Option<EdgeKey>) -> Result<Weight> {
        let index = self.locate(edge, known)?;
        if !edge.weight.is_finite() {
            return Err(self.invalid_weight(edge));
        }
        let entry = &mut self.edge_list[index];
        let source = self.nodes.key(&entry.edge.source);
        let target = self.nodes.key(&entry.edge.target);
        let (Some(source), Some(target)) = (source, target) else {
            return Err(GraphError::Inconsistent(format!(
                "edge {} references a missing node",
                entry.key
            )));
        };
        let old = std::mem::replace(&mut entry.edge.weight, edge.weight);
        debug!(key = %entry.key, old, new = edge.weight, "update weight");
        self.weights.update(source, target, edge.weight);
        if !D::is_directed() {
            self.weights.update(target, source, edge.weight);
        }
        self.debug_check();
        Ok(old)
    }

    /// Finds the key of the edge connecting `source` to `target` (either
    /// orientation in an undirected graph).
    pub fn find_edge(&self, source: &N, target: &N) -> Option<EdgeKey> {
        self.edge_list
            .iter()
            .find(|entry| entry.edge.connects(source, target, D::is_directed()))
            .map(|entry| entry.key)
    }

    /// Gets the edge with the given key.
    pub fn edge(&self, key: EdgeKey) -> Option<&Edge<N>> {
        self.index_of(key).map(|index| &self.edge_list[index].edge)
    }

    /// Gets the 1-based row the edge occupies in the edge list.  Rows are
    /// always dense: removing an edge shifts the rows of later edges up.
    pub fn edge_position(&self, key: EdgeKey) -> Option<usize> {
        self.index_of(key).map(|index| index + 1)
    }

    /// Gets the weight of the edge from `source` to `target`, if any.
    pub fn weight(&self, source: &N, target: &N) -> Option<Weight> {
        let source = self.nodes.key(source)?;
        let target = self.nodes.key(target)?;
        self.weights.get(source, target)
    }

    /// Returns true if any edge has a weight other than the default.
    pub fn has_custom_weights(&self) -> bool {
        self.edge_list
            .iter()
            .any(|entry| entry.edge.weight != DEFAULT_WEIGHT)
    }

    // Representations

    /// The edge list, in insertion order.
    pub fn edge_list(&self) -> &[EdgeEntry<N>] {
        &self.edge_list
    }

    /// Iterates over the adjacency list in node enumeration order.
    pub fn adjacency_list(&self) -> impl Iterator<Item = (&N, &[N])> + '_ {
        self.nodes.ids().map(|id| {
            let neighbors = self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[]);
            (id, neighbors)
        })
    }

    /// A dense copy of the weight matrix with rows and columns in node
    /// enumeration order.
    pub fn weight_matrix(&self) -> MatrixView<N> {
        let slots: Vec<(SlotKey, &N)> = self.nodes.iter().collect();
        let cells = slots
            .iter()
            .map(|&(row, _)| {
                slots
                    .iter()
                    .map(|&(col, _)| self.weights.get(row, col))
                    .collect()
            })
            .collect();
        MatrixView {
            nodes: slots.into_iter().map(|(_, id)| id.clone()).collect(),
            cells,
        }
    }

    /// A dense copy of the incidence structure: one row per edge, in
    /// edge-list order, with one column per node in enumeration order.
    pub fn incidence_matrix(&self) -> IncidenceView<N> {
        let slots: Vec<(SlotKey, &N)> = self.nodes.iter().collect();
        let rows = self
            .incidence
            .rows()
            .iter()
            .map(|row| {
                (
                    row.key,
                    slots.iter().map(|&(slot, _)| row.contains(slot)).collect(),
                )
            })
            .collect();
        IncidenceView {
            nodes: slots.into_iter().map(|(_, id)| id.clone()).collect(),
            rows,
        }
    }

    /// A read-only copy of all four representations and both counters.
    pub fn snapshot(&self) -> GraphSnapshot<N> {
        GraphSnapshot {
            num_nodes: self.num_nodes,
            num_edges: self.num_edges,
            adjacency: self
                .adjacency_list()
                .map(|(id, neighbors)| (id.clone(), neighbors.to_vec()))
                .collect(),
            weight_matrix: self.weight_matrix(),
            incidence: self.incidence_matrix(),
            edge_list: self.edge_list.clone(),
        }
    }

    /// Checks that the four representations and the counters agree.
    pub fn verify_consistency(&self) -> Result<()> {
        let fail = |msg: String| -> Result<()> { Err(GraphError::Inconsistent(msg)) };

        if self.num_nodes != self.nodes.len() || self.num_nodes != self.adjacency.len() {
            return fail(format!(
                "node count {} disagrees with {} slots and {} adjacency rows",
                self.num_nodes,
                self.nodes.len(),
                self.adjacency.len()
            ));
        }
        if self.num_edges != self.edge_list.len() || self.num_edges != self.incidence.len() {
            return fail(format!(
                "edge count {} disagrees with {} edge list rows and {} incidence rows",
                self.num_edges,
                self.edge_list.len(),
                self.incidence.len()
            ));
        }

        let mut expected_cells = 0;
        for (entry, row) in self.edge_list.iter().zip(self.incidence.rows()) {
            if entry.key != row.key {
                return fail(format!(
                    "incidence row {} is not aligned with edge {}",
                    row.key, entry.key
                ));
            }
            let (Some(source), Some(target)) = (
                self.nodes.key(&entry.edge.source),
                self.nodes.key(&entry.edge.target),
            ) else {
                return fail(format!("edge {} references a missing node", entry.key));
            };
            let mut members: Vec<usize> = vec![source.index(), target.index()];
            members.sort_unstable();
            members.dedup();
            if row.members().collect::<Vec<_>>() != members {
                return fail(format!("incidence row {} has wrong members", row.key));
            }

            let mut cells = vec![(source, target, &entry.edge.source, &entry.edge.target)];
            if !D::is_directed() && source != target {
                cells.push((target, source, &entry.edge.target, &entry.edge.source));
            }
            for (row_slot, col_slot, from, to) in cells {
                if self.weights.get(row_slot, col_slot) != Some(entry.edge.weight) {
                    return fail(format!("matrix cell {from} -> {to} disagrees with edge list"));
                }
                let listed = self
                    .adjacency
                    .get(from)
                    .map(|neighbors| neighbors.iter().filter(|n| *n == to).count())
                    .unwrap_or(0);
                if listed != 1 {
                    return fail(format!(
                        "adjacency of {from} lists {to} {listed} times, expected once"
                    ));
                }
                expected_cells += 1;
            }
        }

        if let Some((row, col, _)) = self
            .weights
            .iter()
            .find(|&(row, col, _)| self.nodes.get(row).is_none() || self.nodes.get(col).is_none())
        {
            return fail(format!(
                "matrix cell ({}, {}) refers to a removed node",
                row.index(),
                col.index()
            ));
        }

        let listed: usize = self.adjacency.values().map(Vec::len).sum();
        if self.weights.len() != expected_cells || listed != expected_cells {
            return fail(format!(
                "{} matrix cells and {} adjacency entries, expected {}",
                self.weights.len(),
                listed,
                expected_cells
            ));
        }
        Ok(())
    }

    // Internal helpers shared with the algorithms.

    pub(crate) fn slot(&self, id: &N) -> Result<SlotKey> {
        self.nodes.key(id).ok_or_else(|| GraphError::unknown_node(id))
    }

    pub(crate) fn slots(&self) -> impl Iterator<Item = (SlotKey, &N)> + '_ {
        self.nodes.iter()
    }

    pub(crate) fn cell(&self, source: SlotKey, target: SlotKey) -> Option<Weight> {
        self.weights.get(source, target)
    }

    fn index_of(&self, key: EdgeKey) -> Option<usize> {
        self.edge_list.iter().position(|entry| entry.key == key)
    }

    /// Resolves the edge-list index of the edge to remove or update,
    /// without modifying anything.
    fn locate(&self, edge: &Edge<N>, known: Option<EdgeKey>) -> Result<usize> {
        self.slot(&edge.source)?;
        self.slot(&edge.target)?;
        let index = match known {
            Some(key) => self.index_of(key).filter(|&index| {
                self.edge_list[index]
                    .edge
                    .connects(&edge.source, &edge.target, D::is_directed())
            }),
            None => self.edge_list.iter().position(|entry| {
                entry
                    .edge
                    .connects(&edge.source, &edge.target, D::is_directed())
            }),
        };
        index.ok_or_else(|| GraphError::edge_not_found(&edge.source, &edge.target))
    }

    /// Removes the edge at `index` from every representation.  The index
    /// must be valid.
    fn commit_remove_edge(&mut self, index: usize) -> Edge<N> {
        let EdgeEntry { key, edge } = self.edge_list.remove(index);
        let row = self.incidence.remove(index);
        debug_assert_eq!(row.key, key);
        debug!(key = %key, edge = %edge, "remove edge");

        if let (Some(source), Some(target)) =
            (self.nodes.key(&edge.source), self.nodes.key(&edge.target))
        {
            self.weights.remove(source, target);
            if !D::is_directed() {
                self.weights.remove(target, source);
            }
        }
        self.pop_neighbor(&edge.source, &edge.target);
        if !D::is_directed() && edge.source != edge.target {
            self.pop_neighbor(&edge.target, &edge.source);
        }
        self.num_edges -= 1;
        edge
    }

    fn push_neighbor(&mut self, from: &N, to: &N) {
        if let Some(neighbors) = self.adjacency.get_mut(from) {
            neighbors.push(to.clone());
        }
    }

    fn pop_neighbor(&mut self, from: &N, to: &N) {
        if let Some(neighbors) = self.adjacency.get_mut(from)
            && let Some(pos) = neighbors.iter().position(|n| n == to)
        {
            neighbors.remove(pos);
        }
    }

    fn invalid_weight(&self, edge: &Edge<N>) -> GraphError {
        GraphError::InvalidWeight {
            from: edge.source.to_string(),
            to: edge.target.to_string(),
            weight: edge.weight,
        }
    }

    /// Panics if the representations have drifted apart, but only in debug
    /// builds without the `unchecked` feature.
    fn debug_check(&self) {
        #[cfg(all(debug_assertions, not(feature = "unchecked")))]
        if let Err(err) = self.verify_consistency() {
            panic!("{err}");
        }
    }
}
