use std::fmt::Debug;

use derivative::Derivative;

use crate::{
    edge::{EdgeEntry, EdgeKey},
    weight_matrix::Weight,
};

/// Dense copy of a weight matrix.  `cells[i][j]` is the weight of the edge
/// from `nodes[i]` to `nodes[j]`, or `None` if there is no such edge.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "N: Clone"),
    Debug(bound = "N: Debug"),
    PartialEq(bound = "N: PartialEq")
)]
pub struct MatrixView<N> {
    pub nodes: Vec<N>,
    pub cells: Vec<Vec<Option<Weight>>>,
}

impl<N: PartialEq> MatrixView<N> {
    /// Looks up a cell by node ids.
    pub fn get(&self, source: &N, target: &N) -> Option<Weight> {
        let row = self.nodes.iter().position(|n| n == source)?;
        let col = self.nodes.iter().position(|n| n == target)?;
        self.cells[row][col]
    }
}

/// Dense copy of the incidence structure.  Each row pairs an edge key with
/// one flag per node in `nodes`, in edge-list order.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "N: Clone"),
    Debug(bound = "N: Debug"),
    PartialEq(bound = "N: PartialEq")
)]
pub struct IncidenceView<N> {
    pub nodes: Vec<N>,
    pub rows: Vec<(EdgeKey, Vec<bool>)>,
}

/// A point-in-time copy of every representation of a graph.  Two snapshots
/// compare equal exactly when the graphs they were taken from held the
/// same data in the same order.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "N: Clone"),
    Debug(bound = "N: Debug"),
    PartialEq(bound = "N: PartialEq")
)]
pub struct GraphSnapshot<N> {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub adjacency: Vec<(N, Vec<N>)>,
    pub weight_matrix: MatrixView<N>,
    pub incidence: IncidenceView<N>,
    pub edge_list: Vec<EdgeEntry<N>>,
}
