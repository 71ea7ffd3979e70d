//! Traced binary tree algorithms.
//!
//! Each algorithm takes an optional start node.  Without one it starts at
//! the designated root, or at the single parentless node when no root has
//! been designated yet.

use super::BinaryTree;
use crate::{
    error::{GraphError, Result},
    node_id::NodeId,
    trace::{AlgorithmKind, Trace, TraceBuilder, TraceOutcome},
    tracing_support::{debug, info_span},
};

#[derive(Clone, Copy)]
enum Order {
    Pre,
    In,
    Post,
}

impl<N: NodeId> BinaryTree<N> {
    /// Visits the node, then its left subtree, then its right subtree.
    pub fn preorder(&self, start: Option<&N>) -> Result<Trace<N>> {
        self.traverse(AlgorithmKind::Preorder, Order::Pre, start)
    }

    /// Visits the left subtree, then the node, then its right subtree.
    pub fn inorder(&self, start: Option<&N>) -> Result<Trace<N>> {
        self.traverse(AlgorithmKind::Inorder, Order::In, start)
    }

    /// Visits the left subtree, then the right subtree, then the node.
    pub fn postorder(&self, start: Option<&N>) -> Result<Trace<N>> {
        self.traverse(AlgorithmKind::Postorder, Order::Post, start)
    }

    /// Height of the subtree rooted at the start node.  A node without
    /// children has height 0.
    pub fn height(&self, start: Option<&N>) -> Result<Trace<N>> {
        let start = self.resolve_start(start)?;
        let _span = info_span!("height", start = %start).entered();
        let height = self.subtree_height(start);
        let mut trace = TraceBuilder::new(AlgorithmKind::Height);
        trace.annotate(format!("height of {start}: {height}"));
        trace.summary_line(format!("height: {height}"));
        Ok(trace.finish(TraceOutcome::Height(height)))
    }

    /// Visits every node with no children, in node enumeration order.
    pub fn leaves(&self) -> Result<Trace<N>> {
        let _span = info_span!("leaves").entered();
        let mut trace = TraceBuilder::new(AlgorithmKind::Leaves);
        for id in self.node_ids() {
            if self.children(id).is_none_or(|c| c.is_leaf()) {
                trace.visit(None, id);
            }
        }
        Ok(trace.finish(TraceOutcome::None))
    }

    /// Visits the left and then the right child of the start node.
    pub fn direct_children(&self, start: Option<&N>) -> Result<Trace<N>> {
        let start = self.resolve_start(start)?;
        let _span = info_span!("direct_children", start = %start).entered();
        let mut trace = TraceBuilder::new(AlgorithmKind::DirectChildren);
        if let Some(children) = self.children(start) {
            for (_, child) in children.iter() {
                trace.visit(Some(start), child);
            }
        }
        Ok(trace.finish(TraceOutcome::None))
    }

    /// Visits every descendant of the start node: each child is recorded
    /// and then its own descendants, left before right.
    pub fn all_descendants(&self, start: Option<&N>) -> Result<Trace<N>> {
        let start = self.resolve_start(start)?;
        let _span = info_span!("all_descendants", start = %start).entered();
        let mut trace = TraceBuilder::new(AlgorithmKind::AllDescendants);
        self.collect_descendants(start, &mut trace);
        debug!(found = trace.len(), "descendants collected");
        Ok(trace.finish(TraceOutcome::None))
    }

    fn traverse(&self, kind: AlgorithmKind, order: Order, start: Option<&N>) -> Result<Trace<N>> {
        let start = self.resolve_start(start)?;
        let _span = info_span!("traverse", kind = %kind, start = %start).entered();
        let mut trace = TraceBuilder::new(kind);
        self.walk(start, order, &mut trace);
        Ok(trace.finish(TraceOutcome::None))
    }

    // Recursion depth is bounded by the tree height; child links are
    // acyclic by construction.
    fn walk(&self, node: &N, order: Order, trace: &mut TraceBuilder<N>) {
        let children = self.children(node);
        let left = children.and_then(|c| c.left.as_ref());
        let right = children.and_then(|c| c.right.as_ref());

        if let Order::Pre = order {
            trace.visit(None, node);
        }
        if let Some(left) = left {
            self.walk(left, order, trace);
        }
        if let Order::In = order {
            trace.visit(None, node);
        }
        if let Some(right) = right {
            self.walk(right, order, trace);
        }
        if let Order::Post = order {
            trace.visit(None, node);
        }
    }

    fn subtree_height(&self, node: &N) -> usize {
        match self.children(node) {
            Some(children) if !children.is_leaf() => {
                1 + children
                    .iter()
                    .map(|(_, child)| self.subtree_height(child))
                    .max()
                    .unwrap_or(0)
            }
            _ => 0,
        }
    }

    fn collect_descendants(&self, node: &N, trace: &mut TraceBuilder<N>) {
        let Some(children) = self.children(node) else {
            return;
        };
        for (_, child) in children.iter() {
            trace.visit(Some(node), child);
            self.collect_descendants(child, trace);
        }
    }

    fn resolve_start<'a>(&'a self, start: Option<&'a N>) -> Result<&'a N> {
        match start {
            Some(id) if self.contains_node(id) => Ok(id),
            Some(id) => Err(GraphError::unknown_node(id)),
            None => match self.root() {
                Some(root) => Ok(root),
                None => self.find_root(),
            },
        }
    }
}
