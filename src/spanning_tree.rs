//! Traced Kruskal minimum spanning forest.

use std::collections::HashMap;

use crate::{
    Directedness, GenericGraph,
    edge::Edge,
    error::Result,
    node_id::NodeId,
    trace::{AlgorithmKind, Trace, TraceBuilder, TraceOutcome},
    tracing_support::{debug, info_span},
    weight_matrix::Weight,
};

/// Step log of the annotation emitted once the edges are in order.
pub const EDGES_SORTED: &str = "edges sorted";

/// Component labels for cycle detection.  Every node starts in a component
/// of its own, labelled by itself.  Merging relabels every member of one
/// component with a linear scan; there is no path compression.
struct ComponentLabels<'a, N> {
    order: Vec<&'a N>,
    labels: HashMap<&'a N, &'a N>,
}

impl<'a, N: NodeId> ComponentLabels<'a, N> {
    fn new(nodes: impl Iterator<Item = &'a N>) -> Self {
        let order: Vec<&N> = nodes.collect();
        let labels = order.iter().map(|&n| (n, n)).collect();
        ComponentLabels { order, labels }
    }

    fn label(&self, node: &N) -> Option<&'a N> {
        self.labels.get(node).copied()
    }

    /// Joins the components of `source` and `target` under the label of
    /// `source`.  Returns false if they were already one component.
    fn merge(&mut self, source: &N, target: &N) -> bool {
        let (Some(keep), Some(old)) = (self.label(source), self.label(target)) else {
            return false;
        };
        if keep == old {
            return false;
        }
        for node in &self.order {
            if let Some(label) = self.labels.get_mut(node)
                && *label == old
            {
                *label = keep;
            }
        }
        true
    }
}

impl<N: NodeId, D: Directedness> GenericGraph<N, D> {
    /// Kruskal's algorithm over a sorted copy of the edge list.
    ///
    /// The trace starts with an `annotate("edges sorted")` step, followed by
    /// one `visit(source, target)` for every accepted edge, logged as
    /// `"source - target"`.  Edges joining nodes already in one component
    /// are skipped silently.  On a disconnected graph the result is a
    /// spanning forest.  The edge list of the graph is left untouched.
    ///
    /// Edge direction is ignored for the purpose of cycle detection.
    pub fn kruskal(&self) -> Result<Trace<N>> {
        let _span = info_span!("kruskal", edges = self.num_edges()).entered();

        let mut sorted: Vec<&Edge<N>> = self.edge_list().iter().map(|e| &e.edge).collect();
        sorted.sort_by(|a, b| a.weight.total_cmp(&b.weight));

        let mut trace = TraceBuilder::new(AlgorithmKind::Kruskal);
        trace.annotate(EDGES_SORTED);

        let mut components = ComponentLabels::new(self.node_ids());
        let mut accepted: Vec<Edge<N>> = Vec::new();
        let mut total: Weight = 0.0;
        for edge in sorted {
            if !components.merge(&edge.source, &edge.target) {
                continue;
            }
            trace.visit_with_log(
                Some(&edge.source),
                &edge.target,
                format!("{} - {}", edge.source, edge.target),
            );
            total += edge.weight;
            accepted.push(edge.clone());
        }

        trace.summary_line(format!("total weight: {total}"));
        debug!(accepted = accepted.len(), total, "kruskal finished");
        Ok(trace.finish(TraceOutcome::SpanningForest {
            edges: accepted,
            total_weight: total,
        }))
    }
}
