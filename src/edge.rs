use std::fmt::{self, Debug, Display};

use derivative::Derivative;

use crate::weight_matrix::Weight;

/// Weight given to edges created with [`Edge::new`].
pub const DEFAULT_WEIGHT: Weight = 1.0;

/// A weighted edge between two caller-assigned node ids.
///
/// In an undirected graph the edge is still stored once in the edge list
/// (and once in the incidence structure), while the weight matrix and the
/// adjacency list hold it in both directions.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "N: Clone"),
    Debug(bound = "N: Debug"),
    PartialEq(bound = "N: PartialEq")
)]
pub struct Edge<N> {
    pub source: N,
    pub target: N,
    pub weight: Weight,
}

impl<N> Edge<N> {
    /// Creates an edge with the default weight of 1.
    pub fn new(source: N, target: N) -> Self {
        Self::weighted(source, target, DEFAULT_WEIGHT)
    }

    pub fn weighted(source: N, target: N, weight: Weight) -> Self {
        Edge {
            source,
            target,
            weight,
        }
    }

    /// Returns true if the edge connects `a` to `b`.  When `directed` is
    /// false the orientation is ignored.
    pub fn connects(&self, a: &N, b: &N, directed: bool) -> bool
    where
        N: PartialEq,
    {
        (&self.source == a && &self.target == b)
            || (!directed && &self.source == b && &self.target == a)
    }

    /// Returns true if `node` is one of the endpoints.
    pub fn touches(&self, node: &N) -> bool
    where
        N: PartialEq,
    {
        &self.source == node || &self.target == node
    }
}

impl<N: Display> Display for Edge<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.source, self.target, self.weight)
    }
}

/// Stable identity of an edge within one graph.
///
/// Keys are handed out in increasing order and never reused, so removing an
/// edge does not disturb the identity of any other.  The dense, 1-based row
/// an edge occupies in a table is available through
/// [`GenericGraph::edge_position`](crate::GenericGraph::edge_position).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(pub(crate) usize);

impl Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// An edge-list entry: the edge and its stable key.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "N: Clone"),
    Debug(bound = "N: Debug"),
    PartialEq(bound = "N: PartialEq")
)]
pub struct EdgeEntry<N> {
    pub key: EdgeKey,
    pub edge: Edge<N>,
}
