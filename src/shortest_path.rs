//! Traced Dijkstra shortest paths over the weight matrix.

use crate::{
    Directedness, GenericGraph,
    error::{GraphError, Result},
    node_id::NodeId,
    node_slots::SlotKey,
    trace::{AlgorithmKind, Distance, Trace, TraceBuilder, TraceOutcome},
    tracing_support::{debug, info_span},
    weight_matrix::Weight,
};

/// Returns the part of `old` that is no longer on the best route once `new`
/// replaces it: the last node the two routes share followed by every node
/// after it.  Consecutive pairs of the result name the edges to retract.
fn stale_suffix<N: PartialEq + Clone>(old: &[N], new: &[N]) -> Vec<N> {
    let shared = old
        .iter()
        .zip(new)
        .take_while(|(a, b)| a == b)
        .count();
    old[shared.saturating_sub(1)..].to_vec()
}

impl<N: NodeId, D: Directedness> GenericGraph<N, D> {
    /// Single-source shortest paths from `start` using the O(V²) selection
    /// variant of Dijkstra's algorithm.
    ///
    /// The trace opens with `visit(none, start)` followed by one
    /// `visit(start, i)` for every direct neighbor in node enumeration
    /// order.  Each settled node then relaxes its outgoing edges with a
    /// positive weight; an improvement first retracts the superseded part
    /// of the old route (when there was one) and then records the new edge.
    ///
    /// The retracted part is everything in the old route after the last
    /// node it shares with the new one, including edges that still belong
    /// to other nodes' best routes.  A replay that applies every `Visit`
    /// and retracts every `Unmark` pair therefore only guarantees that each
    /// node's final incoming edge was the last one drawn into it; the full
    /// shortest-path tree is the `route` of each [`Distance`] in the
    /// outcome.
    ///
    /// Negative weights are not supported: if the graph holds any, the call
    /// fails with [`GraphError::InvalidWeight`] before a trace is started.
    pub fn dijkstra(&self, start: &N) -> Result<Trace<N>> {
        let origin = self.slot(start)?;
        if let Some(entry) = self.edge_list().iter().find(|e| e.edge.weight < 0.0) {
            return Err(GraphError::InvalidWeight {
                from: entry.edge.source.to_string(),
                to: entry.edge.target.to_string(),
                weight: entry.edge.weight,
            });
        }
        let _span = info_span!("dijkstra", start = %start).entered();

        let nodes: Vec<(SlotKey, &N)> = self.slots().collect();
        let n = nodes.len();
        let mut dist: Vec<Weight> = vec![Weight::INFINITY; n];
        let mut routes: Vec<Vec<N>> = vec![Vec::new(); n];
        let mut settled = vec![false; n];
        let mut trace = TraceBuilder::new(AlgorithmKind::Dijkstra);

        trace.visit(None, start);
        for (i, &(slot, id)) in nodes.iter().enumerate() {
            if slot == origin {
                dist[i] = 0.0;
                settled[i] = true;
                routes[i] = vec![start.clone()];
                continue;
            }
            if let Some(weight) = self.cell(origin, slot).filter(|&w| w > 0.0) {
                dist[i] = weight;
                routes[i] = vec![start.clone(), id.clone()];
                trace.visit(Some(start), id);
            }
        }

        // Pick the unsettled node with the smallest finite distance; the
        // strict comparison keeps the first one in enumeration order on ties.
        while let Some(k) = (0..n)
            .filter(|&i| !settled[i] && dist[i].is_finite())
            .fold(None, |best: Option<usize>, i| match best {
                Some(b) if dist[b] <= dist[i] => Some(b),
                _ => Some(i),
            })
        {
            settled[k] = true;
            let (from_slot, from) = nodes[k];
            for (i, &(slot, to)) in nodes.iter().enumerate() {
                let Some(weight) = self.cell(from_slot, slot).filter(|&w| w > 0.0) else {
                    continue;
                };
                let candidate = dist[k] + weight;
                if candidate >= dist[i] {
                    continue;
                }
                dist[i] = candidate;
                let mut route = routes[k].clone();
                route.push(to.clone());
                let old = std::mem::replace(&mut routes[i], route);
                if !old.is_empty() {
                    trace.unmark(stale_suffix(&old, &routes[i]));
                }
                trace.visit(Some(from), to);
            }
        }

        let mut distances = Vec::with_capacity(n);
        for (i, &(_, id)) in nodes.iter().enumerate() {
            let distance = dist[i].is_finite().then_some(dist[i]);
            match distance {
                Some(d) => trace.summary_line(format!("{id}: {d}")),
                None => trace.summary_line(format!("{id}: unreachable")),
            }
            distances.push(Distance {
                node: id.clone(),
                distance,
                route: std::mem::take(&mut routes[i]),
            });
        }
        debug!(
            reached = distances.iter().filter(|d| d.distance.is_some()).count(),
            "dijkstra finished"
        );
        Ok(trace.finish(TraceOutcome::Distances(distances)))
    }
}
