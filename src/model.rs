//! The closed set of graph variants behind one algorithm entry point.

use std::fmt::Debug;

use derivative::Derivative;

use crate::{
    Directedness,
    error::{GraphError, Result},
    graph::{DirectedGraph, UndirectedGraph},
    node_id::NodeId,
    trace::{AlgorithmKind, Trace},
    tree::BinaryTree,
};

/// A directed graph, an undirected graph, or a binary tree.
///
/// The variants differ only in ways that are known up front: whether edges
/// are written reciprocally, and whether relations live in child slots or
/// in an edge list.  [`run_algorithm`](Self::run_algorithm) routes every
/// [`AlgorithmKind`] to the variant that supports it.
#[derive(Derivative)]
#[derivative(Clone(bound = "N: Clone"), Debug(bound = "N: Debug"))]
pub enum GraphModel<N> {
    Directed(DirectedGraph<N>),
    Undirected(UndirectedGraph<N>),
    Tree(BinaryTree<N>),
}

impl<N: NodeId> GraphModel<N> {
    pub fn directed() -> Self {
        GraphModel::Directed(DirectedGraph::new())
    }

    pub fn undirected() -> Self {
        GraphModel::Undirected(UndirectedGraph::new())
    }

    pub fn tree() -> Self {
        GraphModel::Tree(BinaryTree::new())
    }

    /// Human-readable name of the variant.
    pub fn variant_name(&self) -> &'static str {
        match self {
            GraphModel::Directed(_) => crate::Directed::NAME,
            GraphModel::Undirected(_) => crate::Undirected::NAME,
            GraphModel::Tree(_) => "binary tree",
        }
    }

    pub fn num_nodes(&self) -> usize {
        match self {
            GraphModel::Directed(g) => g.num_nodes(),
            GraphModel::Undirected(g) => g.num_nodes(),
            GraphModel::Tree(t) => t.num_nodes(),
        }
    }

    /// Gets the number of edges; for a tree, the number of parent-child
    /// links.
    pub fn num_edges(&self) -> usize {
        match self {
            GraphModel::Directed(g) => g.num_edges(),
            GraphModel::Undirected(g) => g.num_edges(),
            GraphModel::Tree(t) => t.num_edges(),
        }
    }

    pub fn contains_node(&self, id: &N) -> bool {
        match self {
            GraphModel::Directed(g) => g.contains_node(id),
            GraphModel::Undirected(g) => g.contains_node(id),
            GraphModel::Tree(t) => t.contains_node(id),
        }
    }

    pub fn add_node(&mut self, id: N) -> Result<()> {
        match self {
            GraphModel::Directed(g) => g.add_node(id),
            GraphModel::Undirected(g) => g.add_node(id),
            GraphModel::Tree(t) => t.add_node(id),
        }
    }

    /// Removes a node together with everything attached to it.
    pub fn remove_node(&mut self, id: &N) -> Result<()> {
        match self {
            GraphModel::Directed(g) => g.remove_node(id).map(drop),
            GraphModel::Undirected(g) => g.remove_node(id).map(drop),
            GraphModel::Tree(t) => t.remove_node(id),
        }
    }

    pub fn clear(&mut self) {
        match self {
            GraphModel::Directed(g) => g.clear(),
            GraphModel::Undirected(g) => g.clear(),
            GraphModel::Tree(t) => t.clear(),
        }
    }

    /// Runs `kind` and returns its complete trace.
    ///
    /// Graph searches need `start`.  Tree algorithms other than `Leaves`
    /// use `start` when given and fall back to the tree root otherwise.
    /// Kruskal and `Leaves` ignore `start`.  Fails with
    /// [`GraphError::UnsupportedAlgorithm`] if the variant cannot run
    /// `kind`.
    pub fn run_algorithm(&self, kind: AlgorithmKind, start: Option<&N>) -> Result<Trace<N>> {
        if kind.requires_start() && start.is_none() {
            return Err(GraphError::MissingStart(kind));
        }
        match self {
            GraphModel::Directed(g) => run_on_graph(g, kind, start, self.variant_name()),
            GraphModel::Undirected(g) => run_on_graph(g, kind, start, self.variant_name()),
            GraphModel::Tree(t) => run_on_tree(t, kind, start),
        }
    }
}

impl<N> From<DirectedGraph<N>> for GraphModel<N> {
    fn from(graph: DirectedGraph<N>) -> Self {
        GraphModel::Directed(graph)
    }
}

impl<N> From<UndirectedGraph<N>> for GraphModel<N> {
    fn from(graph: UndirectedGraph<N>) -> Self {
        GraphModel::Undirected(graph)
    }
}

impl<N> From<BinaryTree<N>> for GraphModel<N> {
    fn from(tree: BinaryTree<N>) -> Self {
        GraphModel::Tree(tree)
    }
}

fn run_on_graph<N: NodeId, D: Directedness>(
    graph: &crate::GenericGraph<N, D>,
    kind: AlgorithmKind,
    start: Option<&N>,
    variant: &'static str,
) -> Result<Trace<N>> {
    let need_start = || start.ok_or(GraphError::MissingStart(kind));
    match kind {
        AlgorithmKind::Bfs => graph.bfs(need_start()?),
        AlgorithmKind::Dfs => graph.dfs(need_start()?),
        AlgorithmKind::Dijkstra => graph.dijkstra(need_start()?),
        AlgorithmKind::Kruskal => graph.kruskal(),
        _ => Err(GraphError::UnsupportedAlgorithm { kind, variant }),
    }
}

fn run_on_tree<N: NodeId>(
    tree: &BinaryTree<N>,
    kind: AlgorithmKind,
    start: Option<&N>,
) -> Result<Trace<N>> {
    match kind {
        AlgorithmKind::Preorder => tree.preorder(start),
        AlgorithmKind::Inorder => tree.inorder(start),
        AlgorithmKind::Postorder => tree.postorder(start),
        AlgorithmKind::Height => tree.height(start),
        AlgorithmKind::Leaves => tree.leaves(),
        AlgorithmKind::DirectChildren => tree.direct_children(start),
        AlgorithmKind::AllDescendants => tree.all_descendants(start),
        _ => Err(GraphError::UnsupportedAlgorithm {
            kind,
            variant: "binary tree",
        }),
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::{Edge, Side, Step, TraceOutcome};

    fn directed() -> GraphModel<&'static str> {
        let mut graph = DirectedGraph::new();
        for id in ["A", "B"] {
            graph.add_node(id).unwrap();
        }
        graph.add_edge(Edge::new("A", "B")).unwrap();
        graph.into()
    }

    fn tree() -> GraphModel<&'static str> {
        let mut tree = BinaryTree::new();
        tree.add_node("R").unwrap();
        tree.add_node("L").unwrap();
        tree.add_child(&"R", &"L", Side::Left).unwrap();
        tree.into()
    }

    #[test]
    fn test_graph_algorithms_dispatch() {
        let model = directed();
        let trace = model.run_algorithm(AlgorithmKind::Bfs, Some(&"A")).unwrap();
        assert_eq!(trace.kind(), AlgorithmKind::Bfs);
        assert_eq!(trace.len(), 2);
        let trace = model.run_algorithm(AlgorithmKind::Kruskal, None).unwrap();
        assert!(matches!(trace.outcome(), TraceOutcome::SpanningForest { .. }));
    }

    #[test]
    fn test_missing_start_is_reported() {
        assert_eq!(
            directed()
                .run_algorithm(AlgorithmKind::Dijkstra, None)
                .map(|t| t.len()),
            Err(GraphError::MissingStart(AlgorithmKind::Dijkstra))
        );
    }

    #[test]
    fn test_tree_algorithms_need_a_tree() {
        let model = directed();
        assert_eq!(
            model.run_algorithm(AlgorithmKind::Height, None).map(|t| t.len()),
            Err(GraphError::UnsupportedAlgorithm {
                kind: AlgorithmKind::Height,
                variant: "directed graph"
            })
        );
        assert_eq!(
            tree().run_algorithm(AlgorithmKind::Kruskal, None).map(|t| t.len()),
            Err(GraphError::UnsupportedAlgorithm {
                kind: AlgorithmKind::Kruskal,
                variant: "binary tree"
            })
        );
    }

    #[test]
    fn test_every_kind_runs_on_its_variant() {
        let graph = directed();
        let tree = tree();
        for kind in AlgorithmKind::iter() {
            let model = if kind.is_tree_algorithm() { &tree } else { &graph };
            let start = if kind.is_tree_algorithm() { None } else { Some(&"A") };
            assert!(model.run_algorithm(kind, start).is_ok(), "{kind} failed");
        }
    }

    #[test]
    fn test_tree_dispatch_uses_root() {
        let trace = tree()
            .run_algorithm(AlgorithmKind::DirectChildren, None)
            .unwrap();
        assert_eq!(
            trace.steps()[0].step,
            Step::Visit {
                from: Some("R"),
                to: "L"
            }
        );
    }

    #[test]
    fn test_node_forwarding() {
        let mut model: GraphModel<u32> = GraphModel::undirected();
        model.add_node(1).unwrap();
        model.add_node(2).unwrap();
        assert_eq!(model.num_nodes(), 2);
        model.remove_node(&1).unwrap();
        assert!(!model.contains_node(&1));
        assert_eq!(model.num_edges(), 0);
        model.clear();
        assert_eq!(model.num_nodes(), 0);
        assert_eq!(GraphModel::<u32>::tree().variant_name(), "binary tree");
    }
}
