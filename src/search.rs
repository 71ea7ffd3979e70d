use std::collections::{HashSet, VecDeque};

use crate::{
    Directedness, GenericGraph,
    error::Result,
    node_id::NodeId,
    trace::{AlgorithmKind, Trace, TraceBuilder, TraceOutcome},
    tracing_support::info_span,
};

const DEFAULT_HASH_SET_CAPACITY: usize = 64;

impl<N: NodeId, D: Directedness> GenericGraph<N, D> {
    /// Breadth-first search from `start`.
    ///
    /// The trace opens with `visit(none, start)` and then records one
    /// `visit(node, neighbor)` for every newly discovered neighbor, taking
    /// dequeued nodes in order and their neighbors in adjacency-list order.
    /// Every reachable node is visited exactly once.
    pub fn bfs(&self, start: &N) -> Result<Trace<N>> {
        self.slot(start)?;
        let _span = info_span!("bfs", start = %start).entered();

        let mut trace = TraceBuilder::new(AlgorithmKind::Bfs);
        let mut visited: HashSet<&N> = HashSet::with_capacity(DEFAULT_HASH_SET_CAPACITY);
        let mut queue: VecDeque<&N> = VecDeque::new();

        visited.insert(start);
        queue.push_back(start);
        trace.visit(None, start);

        while let Some(node) = queue.pop_front() {
            for neighbor in self.neighbors(node).unwrap_or(&[]) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                    trace.visit(Some(node), neighbor);
                }
            }
        }
        Ok(trace.finish(TraceOutcome::None))
    }

    /// Iterative depth-first search from `start`.
    ///
    /// The node on top of the stack advances to its first unvisited
    /// neighbor in adjacency-list order, which is recorded as
    /// `visit(node, neighbor)` and pushed.  A node without unvisited
    /// neighbors is popped silently.
    pub fn dfs(&self, start: &N) -> Result<Trace<N>> {
        self.slot(start)?;
        let _span = info_span!("dfs", start = %start).entered();

        let mut trace = TraceBuilder::new(AlgorithmKind::Dfs);
        let mut visited: HashSet<&N> = HashSet::with_capacity(DEFAULT_HASH_SET_CAPACITY);
        // Each frame remembers how far through its neighbor list it got, so
        // resuming after a backtrack skips neighbors already inspected.
        let mut stack: Vec<(&N, usize)> = vec![(start, 0)];

        visited.insert(start);
        trace.visit(None, start);

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            let neighbors = self.neighbors(node).unwrap_or(&[]);
            let next = neighbors[cursor..]
                .iter()
                .position(|n| !visited.contains(n))
                .map(|offset| cursor + offset);
            match next {
                Some(index) => {
                    frame.1 = index + 1;
                    let neighbor = &neighbors[index];
                    visited.insert(neighbor);
                    trace.visit(Some(node), neighbor);
                    stack.push((neighbor, 0));
                }
                None => {
                    stack.pop();
                }
            }
        }
        Ok(trace.finish(TraceOutcome::None))
    }
}

#[cfg(test)]
mod tests {
    use crate::{DirectedGraph, Edge, GraphError, Step, UndirectedGraph};

    fn create_simple_graph() -> DirectedGraph<&'static str> {
        let mut graph = DirectedGraph::new();
        for id in ["A", "B", "C", "D"] {
            graph.add_node(id).unwrap();
        }
        graph.add_edge(Edge::new("A", "B")).unwrap();
        graph.add_edge(Edge::new("A", "C")).unwrap();
        graph.add_edge(Edge::new("B", "D")).unwrap();
        graph
    }

    fn create_cyclic_graph() -> DirectedGraph<u32> {
        let mut graph = DirectedGraph::new();
        for id in 0..3 {
            graph.add_node(id).unwrap();
        }
        graph.add_edge(Edge::new(0, 1)).unwrap();
        graph.add_edge(Edge::new(1, 2)).unwrap();
        graph.add_edge(Edge::new(2, 0)).unwrap();
        graph
    }

    #[test]
    fn test_bfs_simple_graph() {
        let trace = create_simple_graph().bfs(&"A").unwrap();
        assert_eq!(
            trace.visited().copied().collect::<Vec<_>>(),
            vec!["A", "B", "C", "D"]
        );
        assert_eq!(
            trace.steps()[0].step,
            Step::Visit {
                from: None,
                to: "A"
            }
        );
        assert_eq!(
            trace.steps()[3].step,
            Step::Visit {
                from: Some("B"),
                to: "D"
            }
        );
        assert_eq!(trace.log().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_bfs_skips_unreachable() {
        let trace = create_simple_graph().bfs(&"B").unwrap();
        assert_eq!(trace.visited().copied().collect::<Vec<_>>(), vec!["B", "D"]);
    }

    #[test]
    fn test_bfs_handles_cycles() {
        let trace = create_cyclic_graph().bfs(&0).unwrap();
        assert_eq!(trace.len(), 3);
    }

    #[test]
    fn test_bfs_unknown_start() {
        assert_eq!(
            create_simple_graph().bfs(&"Z").map(|t| t.len()),
            Err(GraphError::UnknownNode("Z".into()))
        );
    }

    #[test]
    fn test_dfs_simple_graph() {
        let trace = create_simple_graph().dfs(&"A").unwrap();
        assert_eq!(
            trace.visited().copied().collect::<Vec<_>>(),
            vec!["A", "B", "D", "C"]
        );
        // C is discovered from A after backtracking out of B and D.
        assert_eq!(
            trace.steps()[3].step,
            Step::Visit {
                from: Some("A"),
                to: "C"
            }
        );
    }

    #[test]
    fn test_dfs_handles_cycles() {
        let trace = create_cyclic_graph().dfs(&1).unwrap();
        assert_eq!(trace.visited().copied().collect::<Vec<_>>(), vec![1, 2, 0]);
    }

    #[test]
    fn test_dfs_undirected_goes_back_through_edges() {
        let mut graph = UndirectedGraph::new();
        for id in ["A", "B", "C"] {
            graph.add_node(id).unwrap();
        }
        graph.add_edge(Edge::new("A", "B")).unwrap();
        graph.add_edge(Edge::new("C", "B")).unwrap();
        let trace = graph.dfs(&"C").unwrap();
        assert_eq!(
            trace.visited().copied().collect::<Vec<_>>(),
            vec!["C", "B", "A"]
        );
    }

    #[test]
    fn test_bfs_dfs_visit_same_nodes() {
        let graph = create_simple_graph();
        let mut bfs: Vec<_> = graph.bfs(&"A").unwrap().visited().copied().collect();
        let mut dfs: Vec<_> = graph.dfs(&"A").unwrap().visited().copied().collect();
        bfs.sort();
        dfs.sort();
        assert_eq!(bfs, dfs);
    }
}
