//! Untraced structural queries backed by the `pathfinding` crate.
//!
//! These answer questions about the current shape of a graph directly and
//! record no trace steps.

use std::collections::HashSet;

use crate::{
    Directedness, GenericGraph,
    error::Result,
    graph::{DirectedGraph, UndirectedGraph},
    node_id::NodeId,
};

impl<N: NodeId, D: Directedness> GenericGraph<N, D> {
    /// Finds every node reachable from `start` by following edges,
    /// including `start` itself, in breadth-first order.
    pub fn reachable_from(&self, start: &N) -> Result<Vec<N>> {
        self.slot(start)?;
        Ok(pathfinding::prelude::bfs_reach(start.clone(), |nid| self.successors(nid)).collect())
    }

    fn successors(&self, id: &N) -> Vec<N> {
        self.neighbors(id).map(<[N]>::to_vec).unwrap_or_default()
    }
}

/// Queries that only make sense on directed graphs.
pub trait GraphDirected<N> {
    /// Finds the strongly connected component containing the given node.
    fn strongly_connected_component(&self, start: &N) -> Result<Vec<N>>;

    /// Partitions the graph into strongly connected components.
    fn strongly_connected_components(&self) -> Vec<Vec<N>>;
}

impl<N: NodeId> GraphDirected<N> for DirectedGraph<N> {
    fn strongly_connected_component(&self, start: &N) -> Result<Vec<N>> {
        self.slot(start)?;
        Ok(pathfinding::prelude::strongly_connected_component(
            start,
            |nid| self.successors(nid),
        ))
    }

    fn strongly_connected_components(&self) -> Vec<Vec<N>> {
        pathfinding::prelude::strongly_connected_components(
            &self.node_ids().cloned().collect::<Vec<_>>(),
            |nid| self.successors(nid),
        )
    }
}

/// Queries that only make sense on undirected graphs.
pub trait GraphUndirected<N> {
    /// Partitions the graph into connected components.
    fn connected_components(&self) -> Vec<HashSet<N>>;
}

impl<N: NodeId> GraphUndirected<N> for UndirectedGraph<N> {
    fn connected_components(&self) -> Vec<HashSet<N>> {
        pathfinding::prelude::connected_components(
            &self.node_ids().cloned().collect::<Vec<_>>(),
            |nid| self.successors(nid),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Edge, GraphError};

    #[test]
    fn test_reachable_from() {
        let mut graph = DirectedGraph::new();
        for id in 0..4 {
            graph.add_node(id).unwrap();
        }
        graph.add_edge(Edge::new(0, 1)).unwrap();
        graph.add_edge(Edge::new(1, 2)).unwrap();
        graph.add_edge(Edge::new(3, 0)).unwrap();
        assert_eq!(graph.reachable_from(&0), Ok(vec![0, 1, 2]));
        assert_eq!(graph.reachable_from(&2), Ok(vec![2]));
        assert_eq!(graph.reachable_from(&9), Err(GraphError::UnknownNode("9".into())));
    }

    #[test]
    fn test_strongly_connected_components() {
        let mut graph = DirectedGraph::new();
        for id in ["a", "b", "c", "d"] {
            graph.add_node(id).unwrap();
        }
        graph.add_edge(Edge::new("a", "b")).unwrap();
        graph.add_edge(Edge::new("b", "a")).unwrap();
        graph.add_edge(Edge::new("b", "c")).unwrap();

        let mut component = graph.strongly_connected_component(&"a").unwrap();
        component.sort();
        assert_eq!(component, vec!["a", "b"]);

        let components = graph.strongly_connected_components();
        assert_eq!(components.len(), 3);
        assert_eq!(components.iter().map(Vec::len).sum::<usize>(), 4);
    }

    #[test]
    fn test_connected_components() {
        let mut graph = UndirectedGraph::new();
        for id in ["a", "b", "c", "d", "e"] {
            graph.add_node(id).unwrap();
        }
        graph.add_edge(Edge::new("a", "b")).unwrap();
        graph.add_edge(Edge::new("c", "b")).unwrap();
        graph.add_edge(Edge::new("d", "e")).unwrap();

        let components = graph.connected_components();
        assert_eq!(components.len(), 2);
        assert!(components.contains(&HashSet::from(["a", "b", "c"])));
        assert!(components.contains(&HashSet::from(["d", "e"])));
    }
}
