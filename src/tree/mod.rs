//! The binary tree variant: parent array, standard form and path form kept
//! in step by one mutation API.

mod algorithms;
mod forms;

use std::{collections::HashMap, fmt::Debug};

use derivative::Derivative;

pub use self::forms::{Children, ROOT_MARKER, Side, TreePath, TreeSnapshot};
use crate::{
    error::{GraphError, Result},
    node_id::NodeId,
    node_slots::NodeSlots,
    tracing_support::debug,
};

/// A binary tree (or forest, while it is being built) over caller-assigned
/// node ids.
///
/// Three representations are kept in step:
/// * the parent array, mapping every node to its parent (or none),
/// * the standard form, mapping every node to its left and right child,
/// * the path form, mapping every node to its [`TreePath`] from the root of
///   its own tree.
///
/// Every node has at most one parent, and child links can never form a
/// cycle.  Mutations validate before they write, so a failed call leaves
/// the tree unchanged.  Like [`GenericGraph`](crate::GenericGraph), the
/// tree needs external serialization to be shared between tasks.
#[derive(Derivative)]
#[derivative(Clone(bound = "N: Clone"), Debug(bound = "N: Debug"))]
pub struct BinaryTree<N> {
    nodes: NodeSlots<N>,
    parent: HashMap<N, Option<N>>,
    children: HashMap<N, Children<N>>,
    paths: HashMap<N, TreePath>,
    root: Option<N>,
}

impl<N: NodeId> Default for BinaryTree<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeId> BinaryTree<N> {
    pub fn new() -> Self {
        BinaryTree {
            nodes: NodeSlots::new(),
            parent: HashMap::new(),
            children: HashMap::new(),
            paths: HashMap::new(),
            root: None,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Gets the number of parent-child links.
    pub fn num_edges(&self) -> usize {
        self.parent.values().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, id: &N) -> bool {
        self.nodes.contains(id)
    }

    /// Iterates over node ids in enumeration (insertion) order.
    pub fn node_ids(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.ids()
    }

    /// Adds a detached node.  It is a root of its own one-node tree until it
    /// is attached as somebody's child.
    pub fn add_node(&mut self, id: N) -> Result<()> {
        if self.nodes.contains(&id) {
            return Err(GraphError::DuplicateNode(id.to_string()));
        }
        debug!(node = %id, "add tree node");
        self.parent.insert(id.clone(), None);
        self.children.insert(id.clone(), Children::default());
        self.paths.insert(id.clone(), TreePath::root());
        self.nodes.insert(id);
        self.debug_check();
        Ok(())
    }

    /// Attaches `child` under `parent` on the given side.
    ///
    /// A child that already hangs somewhere else is moved.  A different node
    /// occupying the slot is detached and becomes a root.  Returns that
    /// displaced node, if any.  The paths of every node in a moved subtree
    /// are recomputed.
    ///
    /// Fails with [`GraphError::WouldCreateCycle`] if `child` is `parent`
    /// or one of its ancestors.
    pub fn add_child(&mut self, parent: &N, child: &N, side: Side) -> Result<Option<N>> {
        let slots = self.children_of(parent)?;
        self.children_of(child)?;
        if slots.get(side) == Some(child) {
            return Ok(None);
        }
        if self.ancestors_and_self(parent).any(|n| n == child) {
            return Err(GraphError::WouldCreateCycle {
                parent: parent.to_string(),
                child: child.to_string(),
            });
        }

        debug!(parent = %parent, child = %child, side = %side, "add child");
        self.detach(child);
        let displaced = self
            .children
            .get_mut(parent)
            .and_then(|slots| slots.slot_mut(side).replace(child.clone()));
        if let Some(old) = &displaced {
            debug!(node = %old, "displaced child becomes a root");
            self.parent.insert(old.clone(), None);
            self.repath(old, TreePath::root());
        }
        self.parent.insert(child.clone(), Some(parent.clone()));
        if self.root.as_ref() == Some(child) {
            self.root = None;
        }
        let path = self.path_of(parent).child(side);
        self.repath(child, path);
        self.debug_check();
        Ok(displaced)
    }

    /// Detaches `child` from `parent`, clearing only the slot that holds
    /// it.  The child keeps its own subtree and becomes a root.  Returns the
    /// side the child occupied.
    pub fn remove_child(&mut self, parent: &N, child: &N) -> Result<Side> {
        let slots = self.children_of(parent)?;
        self.children_of(child)?;
        let side = slots
            .side_of(child)
            .ok_or_else(|| GraphError::edge_not_found(parent, child))?;
        debug!(parent = %parent, child = %child, "remove child");
        self.detach(child);
        self.debug_check();
        Ok(side)
    }

    /// Removes a node.  It is first detached from its parent; its children
    /// become roots of their own subtrees.
    pub fn remove_node(&mut self, id: &N) -> Result<()> {
        let children = self.children_of(id)?.clone();
        debug!(node = %id, "remove tree node");
        self.detach(id);
        for (_, child) in children.iter() {
            self.parent.insert(child.clone(), None);
            self.repath(child, TreePath::root());
        }
        self.parent.remove(id);
        self.children.remove(id);
        self.paths.remove(id);
        self.nodes.remove(id);
        if self.root.as_ref() == Some(id) {
            self.root = None;
        }
        self.debug_check();
        Ok(())
    }

    /// Removes every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.parent.clear();
        self.children.clear();
        self.paths.clear();
        self.root = None;
        debug!("clear tree");
    }

    // Roots

    /// The node designated as root by [`search_root`](Self::search_root) or
    /// [`select_root`](Self::select_root), if any.
    pub fn root(&self) -> Option<&N> {
        self.root.as_ref()
    }

    /// Iterates over parentless nodes in enumeration order.
    pub fn roots(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes
            .ids()
            .filter(|id| matches!(self.parent.get(*id), Some(None)))
    }

    /// Finds the single parentless node without designating it.
    pub fn find_root(&self) -> Result<&N> {
        let mut roots = self.roots();
        let first = roots.next().ok_or(GraphError::NoRoot)?;
        if roots.next().is_none() {
            return Ok(first);
        }
        Err(GraphError::MultipleRoots(
            self.roots().map(ToString::to_string).collect(),
        ))
    }

    /// Finds the single parentless node and designates it as the root.
    /// When several candidates exist the caller must pick one with
    /// [`select_root`](Self::select_root).
    pub fn search_root(&mut self) -> Result<N> {
        let root = self.find_root()?.clone();
        debug!(root = %root, "root found");
        self.root = Some(root.clone());
        Ok(root)
    }

    /// Designates a parentless node as the root.
    pub fn select_root(&mut self, id: &N) -> Result<()> {
        match self.parent.get(id) {
            None => Err(GraphError::unknown_node(id)),
            Some(Some(_)) => Err(GraphError::NotARoot(id.to_string())),
            Some(None) => {
                debug!(root = %id, "root selected");
                self.root = Some(id.clone());
                Ok(())
            }
        }
    }

    // Representations

    pub fn parent(&self, id: &N) -> Option<&N> {
        self.parent.get(id).and_then(Option::as_ref)
    }

    pub fn children(&self, id: &N) -> Option<&Children<N>> {
        self.children.get(id)
    }

    pub fn path(&self, id: &N) -> Option<&TreePath> {
        self.paths.get(id)
    }

    /// Parent of every node in enumeration order.
    pub fn parent_array(&self) -> Vec<(N, Option<N>)> {
        self.nodes
            .ids()
            .map(|id| (id.clone(), self.parent(id).cloned()))
            .collect()
    }

    /// Children of every node in enumeration order.
    pub fn standard_form(&self) -> Vec<(N, Children<N>)> {
        self.nodes
            .ids()
            .map(|id| (id.clone(), self.children.get(id).cloned().unwrap_or_default()))
            .collect()
    }

    /// Path of every node in enumeration order.
    pub fn path_form(&self) -> Vec<(N, TreePath)> {
        self.nodes
            .ids()
            .map(|id| (id.clone(), self.path_of(id)))
            .collect()
    }

    /// Fully bracketed form, e.g. `A(B,C(,D))`: a node with children is
    /// followed by its left and right subtree in parentheses, an absent
    /// child left empty.  Trees of a forest are separated by spaces, in
    /// the enumeration order of their roots.
    pub fn bracket_form(&self) -> String {
        let mut out = String::new();
        for (i, root) in self.roots().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            self.write_bracket(root, &mut out);
        }
        out
    }

    pub fn snapshot(&self) -> TreeSnapshot<N> {
        TreeSnapshot {
            root: self.root.clone(),
            parent_array: self.parent_array(),
            standard_form: self.standard_form(),
            path_form: self.path_form(),
            bracket_form: self.bracket_form(),
        }
    }

    /// Checks that the parent array, the standard form and the path form
    /// agree.
    pub fn verify_consistency(&self) -> Result<()> {
        let fail = |msg: String| -> Result<()> { Err(GraphError::Inconsistent(msg)) };
        let n = self.nodes.len();
        if self.parent.len() != n || self.children.len() != n || self.paths.len() != n {
            return fail(format!(
                "{n} nodes but {} parent, {} child and {} path entries",
                self.parent.len(),
                self.children.len(),
                self.paths.len()
            ));
        }
        for id in self.nodes.ids() {
            if let Some(parent) = self.parent(id) {
                let linked = self
                    .children
                    .get(parent)
                    .and_then(|slots| slots.side_of(id));
                let Some(side) = linked else {
                    return fail(format!("{id} names {parent} as parent but is not its child"));
                };
                if self.path_of(id) != self.path_of(parent).child(side) {
                    return fail(format!("path of {id} is stale"));
                }
            } else if !self.path_of(id).is_root() {
                return fail(format!("root {id} has path {}", self.path_of(id)));
            }
            for (_, child) in self.children.get(id).into_iter().flat_map(|c| c.iter()) {
                if self.parent(child) != Some(id) {
                    return fail(format!("{child} is a child of {id} but has another parent"));
                }
            }
        }
        if let Some(root) = &self.root
            && self.parent.get(root) != Some(&None)
        {
            return fail(format!("designated root {root} is not parentless"));
        }
        Ok(())
    }

    // Internal helpers

    fn children_of(&self, id: &N) -> Result<&Children<N>> {
        self.children
            .get(id)
            .ok_or_else(|| GraphError::unknown_node(id))
    }

    fn path_of(&self, id: &N) -> TreePath {
        self.paths.get(id).cloned().unwrap_or_else(TreePath::root)
    }

    /// Walks from `id` up to the root of its tree.
    fn ancestors_and_self<'a>(&'a self, id: &'a N) -> impl Iterator<Item = &'a N> + 'a {
        std::iter::successors(Some(id), move |n| self.parent(n))
    }

    /// Unlinks `child` from its parent, if it has one, and makes it a root.
    fn detach(&mut self, child: &N) {
        let Some(Some(parent)) = self.parent.insert(child.clone(), None) else {
            return;
        };
        if let Some(slots) = self.children.get_mut(&parent)
            && let Some(side) = slots.side_of(child)
        {
            *slots.slot_mut(side) = None;
        }
        self.repath(child, TreePath::root());
    }

    /// Assigns `path` to `id` and recomputes every descendant, pre-order.
    fn repath(&mut self, id: &N, path: TreePath) {
        let mut pending = vec![(id.clone(), path)];
        while let Some((node, path)) = pending.pop() {
            if let Some(slots) = self.children.get(&node) {
                // Right is pushed first so the left subtree is handled first.
                for (side, child) in slots.iter().collect::<Vec<_>>().into_iter().rev() {
                    pending.push((child.clone(), path.child(side)));
                }
            }
            self.paths.insert(node, path);
        }
    }

    fn write_bracket(&self, id: &N, out: &mut String) {
        out.push_str(&id.to_string());
        let Some(slots) = self.children.get(id).filter(|s| !s.is_leaf()) else {
            return;
        };
        out.push('(');
        if let Some(left) = &slots.left {
            self.write_bracket(left, out);
        }
        out.push(',');
        if let Some(right) = &slots.right {
            self.write_bracket(right, out);
        }
        out.push(')');
    }

    fn debug_check(&self) {
        #[cfg(all(debug_assertions, not(feature = "unchecked")))]
        if let Err(err) = self.verify_consistency() {
            panic!("{err}");
        }
    }
}
