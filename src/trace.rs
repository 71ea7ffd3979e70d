//! Replayable execution traces.
//!
//! Algorithms do not hand back just an answer: they return a [`Trace`], the
//! complete ordered list of steps they took.  A presentation layer replays
//! the steps index by index, forward or backward, by applying or retracting
//! highlight state.  A trace is produced in full by one synchronous call and
//! is immutable afterwards.

use std::fmt::Debug;

use derivative::Derivative;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{edge::Edge, node_id::NodeId, weight_matrix::Weight};

/// The algorithms that can be run through
/// [`GraphModel::run_algorithm`](crate::GraphModel::run_algorithm).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum AlgorithmKind {
    Bfs,
    Dfs,
    Dijkstra,
    Kruskal,
    Preorder,
    Inorder,
    Postorder,
    Height,
    Leaves,
    DirectChildren,
    AllDescendants,
}

impl AlgorithmKind {
    /// Returns true for the algorithms that run on a binary tree.
    pub fn is_tree_algorithm(self) -> bool {
        !matches!(
            self,
            AlgorithmKind::Bfs | AlgorithmKind::Dfs | AlgorithmKind::Dijkstra | AlgorithmKind::Kruskal
        )
    }

    /// Returns true if the algorithm cannot run without a start node.
    ///
    /// Tree algorithms other than `Leaves` are node-rooted too, but they fall
    /// back to the tree root when no start is given.
    pub fn requires_start(self) -> bool {
        matches!(
            self,
            AlgorithmKind::Bfs | AlgorithmKind::Dfs | AlgorithmKind::Dijkstra
        )
    }
}

/// A single highlight operation.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "N: Clone"),
    Debug(bound = "N: Debug"),
    PartialEq(bound = "N: PartialEq")
)]
pub enum Step<N> {
    /// A node is discovered, optionally through the edge from `from`.
    Visit { from: Option<N>, to: N },
    /// A previously highlighted path segment is retracted.  Consecutive
    /// nodes name the edges to un-highlight.
    Unmark { nodes: Vec<N> },
    /// A non-visual informational marker.
    Annotate { message: String },
}

/// A step together with its human-readable log line.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "N: Clone"),
    Debug(bound = "N: Debug"),
    PartialEq(bound = "N: PartialEq")
)]
pub struct TraceStep<N> {
    pub step: Step<N>,
    pub log: String,
}

/// Final distance and route to one node, as computed by Dijkstra.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "N: Clone"),
    Debug(bound = "N: Debug"),
    PartialEq(bound = "N: PartialEq")
)]
pub struct Distance<N> {
    pub node: N,
    /// `None` if the node is unreachable from the start.
    pub distance: Option<Weight>,
    /// Nodes along the best route, start first.  Empty when unreachable.
    pub route: Vec<N>,
}

/// The typed result an algorithm produced alongside its steps.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "N: Clone"),
    Debug(bound = "N: Debug"),
    PartialEq(bound = "N: PartialEq")
)]
pub enum TraceOutcome<N> {
    /// The steps are the whole answer (traversals, leaf and descendant
    /// queries).
    None,
    /// Shortest distances from the start, one entry per node in node
    /// enumeration order.
    Distances(Vec<Distance<N>>),
    /// Accepted edges of a minimum spanning forest and their total weight.
    SpanningForest {
        edges: Vec<Edge<N>>,
        total_weight: Weight,
    },
    /// Height of the subtree rooted at the start node.
    Height(usize),
}

/// The complete, immutable record of one algorithm run.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "N: Clone"),
    Debug(bound = "N: Debug"),
    PartialEq(bound = "N: PartialEq")
)]
pub struct Trace<N> {
    kind: AlgorithmKind,
    steps: Vec<TraceStep<N>>,
    summary: Vec<String>,
    outcome: TraceOutcome<N>,
}

impl<N> Trace<N> {
    pub fn kind(&self) -> AlgorithmKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Gets the step at `index`, for players that seek back and forth.
    pub fn get(&self, index: usize) -> Option<&TraceStep<N>> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[TraceStep<N>] {
        &self.steps
    }

    /// Iterates over the bare steps.  Each call starts from the beginning.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Step<N>> + '_ {
        self.steps.iter().map(|s| &s.step)
    }

    /// Per-step log lines, in step order.
    pub fn log(&self) -> impl Iterator<Item = &str> + '_ {
        self.steps.iter().map(|s| s.log.as_str())
    }

    /// Lines written once the algorithm finished (final distances, total
    /// weight, height).
    pub fn summary(&self) -> &[String] {
        &self.summary
    }

    pub fn outcome(&self) -> &TraceOutcome<N> {
        &self.outcome
    }

    /// The `to` node of every `Visit` step, in order.
    pub fn visited(&self) -> impl Iterator<Item = &N> + '_ {
        self.iter().filter_map(|step| match step {
            Step::Visit { to, .. } => Some(to),
            _ => None,
        })
    }
}

impl<'a, N> IntoIterator for &'a Trace<N> {
    type Item = &'a TraceStep<N>;
    type IntoIter = std::slice::Iter<'a, TraceStep<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Accumulates steps while an algorithm runs.  Only a finished builder
/// becomes a [`Trace`], so an algorithm that fails part way never leaks a
/// partial trace.
pub(crate) struct TraceBuilder<N> {
    kind: AlgorithmKind,
    steps: Vec<TraceStep<N>>,
    summary: Vec<String>,
}

impl<N: NodeId> TraceBuilder<N> {
    pub fn new(kind: AlgorithmKind) -> Self {
        TraceBuilder {
            kind,
            steps: Vec::new(),
            summary: Vec::new(),
        }
    }

    /// Records a visit; the log line is the visited node.
    pub fn visit(&mut self, from: Option<&N>, to: &N) {
        crate::tracing_support::trace!(kind = %self.kind, from = ?from, to = %to, "visit");
        self.push(
            Step::Visit {
                from: from.cloned(),
                to: to.clone(),
            },
            to.to_string(),
        );
    }

    /// Records a visit with a caller-supplied log line.
    pub fn visit_with_log(&mut self, from: Option<&N>, to: &N, log: String) {
        crate::tracing_support::trace!(kind = %self.kind, from = ?from, to = %to, "visit");
        self.push(
            Step::Visit {
                from: from.cloned(),
                to: to.clone(),
            },
            log,
        );
    }

    pub fn unmark(&mut self, nodes: Vec<N>) {
        crate::tracing_support::trace!(kind = %self.kind, nodes = ?nodes, "unmark");
        let log = nodes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" - ");
        self.push(Step::Unmark { nodes }, log);
    }

    pub fn annotate(&mut self, message: impl Into<String>) {
        let message = message.into();
        crate::tracing_support::trace!(kind = %self.kind, text = %message, "annotate");
        self.push(
            Step::Annotate {
                message: message.clone(),
            },
            message,
        );
    }

    /// Number of steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn summary_line(&mut self, line: String) {
        self.summary.push(line);
    }

    fn push(&mut self, step: Step<N>, log: String) {
        self.steps.push(TraceStep { step, log });
    }

    pub fn finish(self, outcome: TraceOutcome<N>) -> Trace<N> {
        crate::tracing_support::debug!(kind = %self.kind, steps = self.steps.len(), "trace complete");
        Trace {
            kind: self.kind,
            steps: self.steps,
            summary: self.summary,
            outcome,
        }
    }
}
