//! Convenience re-exports of the types most callers need.

pub use crate::{
    AlgorithmKind, BinaryTree, Directed, DirectedGraph, Edge, GenericGraph, GraphError,
    GraphModel, Side, Step, Trace, TraceOutcome, Undirected, UndirectedGraph,
};
#[cfg(feature = "pathfinding")]
pub use crate::{GraphDirected, GraphUndirected};
