use std::fmt::{self, Debug, Display};

use derivative::Derivative;
use strum::{Display as StrumDisplay, EnumIter};

/// First character of every path string: the position of a root.
pub const ROOT_MARKER: char = '*';

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, StrumDisplay, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The letter this side contributes to a path string.
    pub fn marker(self) -> char {
        match self {
            Side::Left => 'L',
            Side::Right => 'R',
        }
    }
}

/// Route from the root of a node's tree to the node: [`ROOT_MARKER`]
/// followed by one `L` or `R` per level.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TreePath(String);

impl TreePath {
    /// The path of a root.
    pub fn root() -> Self {
        TreePath(ROOT_MARKER.to_string())
    }

    /// The path of the child on `side` of the node at this path.
    pub fn child(&self, side: Side) -> Self {
        let mut path = self.0.clone();
        path.push(side.marker());
        TreePath(path)
    }

    pub fn is_root(&self) -> bool {
        self.depth() == 0
    }

    /// Number of edges between the node and its root.
    pub fn depth(&self) -> usize {
        self.0.len() - ROOT_MARKER.len_utf8()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two child slots of a node (the node's column of the standard form).
#[derive(Derivative)]
#[derivative(
    Clone(bound = "N: Clone"),
    Debug(bound = "N: Debug"),
    PartialEq(bound = "N: PartialEq"),
    Default(bound = "")
)]
pub struct Children<N> {
    pub left: Option<N>,
    pub right: Option<N>,
}

impl<N> Children<N> {
    pub fn get(&self, side: Side) -> Option<&N> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, side: Side) -> &mut Option<N> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Finds the slot holding `child`.
    pub fn side_of(&self, child: &N) -> Option<Side>
    where
        N: PartialEq,
    {
        if self.left.as_ref() == Some(child) {
            Some(Side::Left)
        } else if self.right.as_ref() == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Iterates over present children, left first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &N)> + '_ {
        self.left
            .iter()
            .map(|n| (Side::Left, n))
            .chain(self.right.iter().map(|n| (Side::Right, n)))
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A point-in-time copy of every tree representation, each listed in node
/// enumeration order.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "N: Clone"),
    Debug(bound = "N: Debug"),
    PartialEq(bound = "N: PartialEq")
)]
pub struct TreeSnapshot<N> {
    pub root: Option<N>,
    pub parent_array: Vec<(N, Option<N>)>,
    pub standard_form: Vec<(N, Children<N>)>,
    pub path_form: Vec<(N, TreePath)>,
    pub bracket_form: String,
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_path_grows_one_marker_per_level() {
        let root = TreePath::root();
        assert!(root.is_root());
        let path = root.child(Side::Left).child(Side::Right);
        assert_eq!(path.as_str(), "*LR");
        assert_eq!(path.depth(), 2);
        assert_eq!(path.to_string(), "*LR");
    }

    #[test]
    fn test_children_slots() {
        let mut children: Children<&str> = Children::default();
        assert!(children.is_leaf());
        *children.slot_mut(Side::Right) = Some("b");
        assert_eq!(children.get(Side::Right), Some(&"b"));
        assert_eq!(children.side_of(&"b"), Some(Side::Right));
        assert_eq!(children.side_of(&"a"), None);
        *children.slot_mut(Side::Left) = Some("a");
        assert_eq!(
            children.iter().collect::<Vec<_>>(),
            vec![(Side::Left, &"a"), (Side::Right, &"b")]
        );
    }

    #[test]
    fn test_side_names() {
        let names: Vec<String> = Side::iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["left", "right"]);
        assert_eq!(Side::Left.marker(), 'L');
    }
}
