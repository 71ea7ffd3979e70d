//! Graph and binary tree stores that keep several textbook representations
//! in step, plus classic algorithms that return a replayable trace of every
//! step they took.
//!
//! A [`GenericGraph`] holds the same edges four ways at once: a weight
//! matrix, an incidence structure, an adjacency list and an edge list.  A
//! [`BinaryTree`] holds a parent array, a standard (left/right child) form
//! and a path form.  All changes go through a small mutation API that
//! validates before it writes, so a failed call never leaves the
//! representations disagreeing with each other.
//!
//! Algorithms (BFS, DFS, Dijkstra, Kruskal and the tree traversals and
//! queries) return a [`Trace`]: the ordered list of visit, unmark and
//! annotate steps with one log line each, ready to be animated forward or
//! backward by a presentation layer.  [`GraphModel::run_algorithm`] is the
//! single entry point over all three graph variants.
//!
//! # Features
//!
//! - `tracing` (default): structured logging of mutations and algorithm
//!   runs through the `tracing` crate.
//! - `pathfinding` (default): untraced reachability and component queries.
//! - `unchecked`: skips the consistency self-check run after every mutation
//!   in debug builds.
//!
//! # Concurrency
//!
//! Everything is synchronous and single-threaded.  The stores are plain
//! owned values; mutations take `&mut self`, so sharing one between tasks
//! requires the caller to serialize access, for example behind a `Mutex`.

mod directedness;
mod edge;
mod error;
mod graph;
mod incidence;
mod model;
mod node_id;
mod node_slots;
pub mod prelude;
mod search;
mod shortest_path;
mod spanning_tree;
#[cfg(feature = "pathfinding")]
mod structure;
mod trace;
pub mod tracing_support;
mod tree;
mod weight_matrix;

pub use crate::directedness::{Directed, Directedness, Undirected};
pub use crate::edge::{DEFAULT_WEIGHT, Edge, EdgeEntry, EdgeKey};
pub use crate::error::{GraphError, Result};
pub use crate::graph::{
    DirectedGraph, GenericGraph, GraphSnapshot, IncidenceView, MatrixView, UndirectedGraph,
};
pub use crate::model::GraphModel;
pub use crate::node_id::NodeId;
pub use crate::spanning_tree::EDGES_SORTED;
#[cfg(feature = "pathfinding")]
pub use crate::structure::{GraphDirected, GraphUndirected};
pub use crate::trace::{AlgorithmKind, Distance, Step, Trace, TraceOutcome, TraceStep};
pub use crate::tree::{BinaryTree, Children, ROOT_MARKER, Side, TreePath, TreeSnapshot};
pub use crate::weight_matrix::Weight;
