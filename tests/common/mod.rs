//! Random mutation scripts for property tests.
#![allow(dead_code)]

use quickcheck::{Arbitrary, Gen};
use tracegraph::{BinaryTree, Directedness, Edge, GenericGraph, Result, Side};

/// Ids are drawn from a small range so that scripts hit existing nodes,
/// duplicates and missing nodes alike.
const NODE_RANGE: u8 = 8;

fn node(g: &mut Gen) -> u8 {
    u8::arbitrary(g) % NODE_RANGE
}

#[derive(Clone, Debug)]
pub enum GraphOp {
    AddNode(u8),
    RemoveNode(u8),
    IsolateNode(u8),
    AddEdge(u8, u8, u8),
    RemoveEdge(u8, u8),
    UpdateWeight(u8, u8, u8),
}

impl Arbitrary for GraphOp {
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 10 {
            0..=2 => GraphOp::AddNode(node(g)),
            3 => GraphOp::RemoveNode(node(g)),
            4 => GraphOp::IsolateNode(node(g)),
            5..=7 => GraphOp::AddEdge(node(g), node(g), u8::arbitrary(g) % 10),
            8 => GraphOp::RemoveEdge(node(g), node(g)),
            _ => GraphOp::UpdateWeight(node(g), node(g), u8::arbitrary(g) % 10),
        }
    }
}

impl GraphOp {
    pub fn apply<D: Directedness>(&self, graph: &mut GenericGraph<u8, D>) -> Result<()> {
        match *self {
            GraphOp::AddNode(id) => graph.add_node(id),
            GraphOp::RemoveNode(id) => graph.remove_node(&id).map(drop),
            GraphOp::IsolateNode(id) => graph.isolate_node(&id).map(drop),
            GraphOp::AddEdge(s, t, w) => graph.add_edge(Edge::weighted(s, t, w.into())).map(drop),
            GraphOp::RemoveEdge(s, t) => graph.remove_edge(&Edge::new(s, t), None).map(drop),
            GraphOp::UpdateWeight(s, t, w) => graph
                .update_weight(&Edge::weighted(s, t, w.into()), None)
                .map(drop),
        }
    }
}

#[derive(Clone, Debug)]
pub enum TreeOp {
    AddNode(u8),
    RemoveNode(u8),
    AddChild(u8, u8, Side),
    RemoveChild(u8, u8),
}

impl Arbitrary for TreeOp {
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 8 {
            0..=2 => TreeOp::AddNode(node(g)),
            3 => TreeOp::RemoveNode(node(g)),
            4..=6 => {
                let side = if bool::arbitrary(g) { Side::Left } else { Side::Right };
                TreeOp::AddChild(node(g), node(g), side)
            }
            _ => TreeOp::RemoveChild(node(g), node(g)),
        }
    }
}

impl TreeOp {
    pub fn apply(&self, tree: &mut BinaryTree<u8>) -> Result<()> {
        match *self {
            TreeOp::AddNode(id) => tree.add_node(id),
            TreeOp::RemoveNode(id) => tree.remove_node(&id),
            TreeOp::AddChild(p, c, side) => tree.add_child(&p, &c, side).map(drop),
            TreeOp::RemoveChild(p, c) => tree.remove_child(&p, &c).map(drop),
        }
    }
}

/// A bounded sequence of operations.
#[derive(Clone, Debug)]
pub struct Script<Op> {
    pub ops: Vec<Op>,
}

impl<Op: Arbitrary> Arbitrary for Script<Op> {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 60;
        Script {
            ops: (0..len).map(|_| Op::arbitrary(g)).collect(),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.ops.shrink().map(|ops| Script { ops }))
    }
}

/// Builds a graph by running every op of a script, ignoring failures.
pub fn build_graph<D: Directedness>(script: &Script<GraphOp>) -> GenericGraph<u8, D> {
    let mut graph = GenericGraph::new();
    for op in &script.ops {
        let _ = op.apply(&mut graph);
    }
    graph
}
