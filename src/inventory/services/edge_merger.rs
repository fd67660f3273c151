use super::graph_builder::EdgeFragment;
use crate::inventory::domain::ComponentRef;
use std::collections::{BTreeMap, BTreeSet};

/// The merged dependency-edge set: each distinct source ref maps to
/// exactly one target set. Ordered maps keep iteration deterministic
/// for serialization.
pub type EdgeSet = BTreeMap<ComponentRef, BTreeSet<ComponentRef>>;

/// Collapses edge fragments that share a source ref into one entry,
/// unioning their target sets.
///
/// Set union over ordered sets is associative and commutative, so the
/// result is independent of fragment processing order.
pub fn merge_edges<I>(fragments: I) -> EdgeSet
where
    I: IntoIterator<Item = EdgeFragment>,
{
    let mut edges = EdgeSet::new();
    for fragment in fragments {
        edges
            .entry(fragment.source)
            .or_default()
            .extend(fragment.targets);
    }
    edges
}
