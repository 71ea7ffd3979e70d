use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// A trait representing a caller-assigned node identifier.
///
/// This trait has no methods but serves as a marker for types that can be
/// used as node identifiers.  It is implemented automatically for every type
/// with the required bounds, so strings and integers work out of the box.
/// `Display` is required because every trace step carries a log line naming
/// the nodes involved.
pub trait NodeId: Eq + Hash + Clone + Debug + Display {}

impl<T> NodeId for T where T: Eq + Hash + Clone + Debug + Display {}
