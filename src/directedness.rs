/// Marker type representing directed graph edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Directed;

/// Marker type representing undirected graph edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Undirected;

/// Trait defining the directedness behavior of graph edges.
///
/// This trait is implemented by [`Directed`] and [`Undirected`] marker types
/// to provide compile-time specialization of graph behavior.  The only
/// behavioral difference is whether an edge is also written as its
/// reciprocal into the weight matrix and the adjacency list.
pub trait Directedness: Sized + Default + Copy + 'static {
    /// Human-readable name of the variant, used in error messages.
    const NAME: &'static str;

    fn is_directed() -> bool;
}

impl Directedness for Directed {
    const NAME: &'static str = "directed graph";

    fn is_directed() -> bool {
        true
    }
}

impl Directedness for Undirected {
    const NAME: &'static str = "undirected graph";

    fn is_directed() -> bool {
        false
    }
}
