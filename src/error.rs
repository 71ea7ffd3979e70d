use thiserror::Error;

use crate::trace::AlgorithmKind;

/// Errors reported by mutations, root discovery and algorithm dispatch.
///
/// Node ids are carried in their `Display` form so the error type does not
/// depend on the id type of the graph that produced it.
///
/// Every mutation checks its preconditions before touching any
/// representation, so receiving one of these errors from a mutation means
/// the graph or tree is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// An edge, child relation or algorithm start refers to a node that is
    /// not in the store.
    #[error("node {0} does not exist")]
    UnknownNode(String),

    /// A node with this id is already present.
    #[error("node {0} already exists")]
    DuplicateNode(String),

    /// The edge (or child relation) to remove or update is not present.
    #[error("no edge from {from} to {to}")]
    EdgeNotFound { from: String, to: String },

    /// An edge between the same endpoints is already present.
    #[error("an edge from {from} to {to} already exists")]
    DuplicateEdge { from: String, to: String },

    /// More than one node has no parent, so the tree root is ambiguous.
    #[error("tree root is ambiguous: {} candidates ({})", .0.len(), .0.join(", "))]
    MultipleRoots(Vec<String>),

    /// The tree has no parentless node at all (it is empty).
    #[error("tree has no root")]
    NoRoot,

    /// A node with a parent was selected as the root.
    #[error("node {0} has a parent and cannot be the root")]
    NotARoot(String),

    /// Attaching the child would make it an ancestor of itself.
    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCreateCycle { parent: String, child: String },

    /// A weight was rejected, either because it is not finite or because a
    /// shortest-path search found a negative weight.
    #[error("invalid weight {weight} on edge from {from} to {to}")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },

    /// The algorithm needs a start node but none was supplied.
    #[error("{0} requires a start node")]
    MissingStart(AlgorithmKind),

    /// The algorithm cannot run on this kind of graph.
    #[error("{kind} is not available for {variant}")]
    UnsupportedAlgorithm {
        kind: AlgorithmKind,
        variant: &'static str,
    },

    /// The representations disagree with each other.
    #[error("representations are inconsistent: {0}")]
    Inconsistent(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;

impl GraphError {
    pub(crate) fn unknown_node(id: &impl std::fmt::Display) -> Self {
        GraphError::UnknownNode(id.to_string())
    }

    pub(crate) fn edge_not_found(
        from: &impl std::fmt::Display,
        to: &impl std::fmt::Display,
    ) -> Self {
        GraphError::EdgeNotFound {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_roots_message_lists_candidates() {
        let err = GraphError::MultipleRoots(vec!["A".into(), "B".into()]);
        assert_eq!(
            err.to_string(),
            "tree root is ambiguous: 2 candidates (A, B)"
        );
    }

    #[test]
    fn test_missing_start_names_algorithm() {
        let err = GraphError::MissingStart(AlgorithmKind::Dijkstra);
        assert_eq!(err.to_string(), "dijkstra requires a start node");
    }
}
