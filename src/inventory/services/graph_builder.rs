use crate::inventory::domain::{derive_ref, Component, ComponentRef};
use std::collections::{BTreeSet, HashMap, HashSet};

/// A single parent→children edge entry produced during the walk. The
/// merger later unions fragments that share a source ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeFragment {
    pub source: ComponentRef,
    pub targets: BTreeSet<ComponentRef>,
}

/// Result of walking one category's forest: the deduplicated component
/// arena with its insertion-order index, the edge fragments, the
/// deduplicated top-level refs, and any degenerate refs encountered.
#[derive(Debug, Default)]
pub struct BuiltGraph {
    arena: HashMap<ComponentRef, Component>,
    order: Vec<ComponentRef>,
    pub fragments: Vec<EdgeFragment>,
    pub top_level: Vec<ComponentRef>,
    /// Refs derived from components with no usable name. Surfaced to
    /// the caller rather than hidden; never fatal.
    pub degenerate_refs: Vec<ComponentRef>,
}

impl BuiltGraph {
    /// Canonical components in first-seen walk order. The explicit
    /// order index is what makes document output deterministic even
    /// though the arena itself is an unordered map.
    pub fn components(&self) -> impl Iterator<Item = (&ComponentRef, &Component)> {
        self.order
            .iter()
            .map(move |r| (r, &self.arena[r]))
    }

    pub fn into_ordered_components(mut self) -> Vec<(ComponentRef, Component)> {
        self.order
            .drain(..)
            .map(|r| {
                let component = self
                    .arena
                    .remove(&r)
                    .unwrap_or_default();
                (r, component)
            })
            .collect()
    }

    pub fn contains(&self, r: &ComponentRef) -> bool {
        self.arena.contains_key(r)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Walks a forest of component trees, deriving refs, registering
/// first-seen components and recording parent→children edges.
///
/// The walk is memoized by ref: an already-registered ref is never
/// descended into again, which bounds the work to O(distinct refs)
/// instead of O(tree nodes) and terminates any cyclic ref chain. The
/// trade-off is intentional and visible: when two occurrences of the
/// same ref carry different children lists, only the first-encountered
/// children set is recorded.
pub struct GraphBuilder {
    graph: BuiltGraph,
    /// Refs whose children are currently being processed. A child that
    /// refers back to an ancestor ref hits this set and the descent
    /// stops, which is what makes true cycles safe.
    in_progress: HashSet<ComponentRef>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: BuiltGraph::default(),
            in_progress: HashSet::new(),
        }
    }

    /// Builds the graph for one category's forest.
    pub fn build(forest: &[Component]) -> BuiltGraph {
        let mut builder = Self::new();
        for component in forest {
            let r = builder.visit(component);
            if !builder.graph.top_level.contains(&r) {
                builder.graph.top_level.push(r);
            }
        }
        builder.graph
    }

    fn visit(&mut self, component: &Component) -> ComponentRef {
        let r = derive_ref(component);

        // Memoization doubles as the dedup and cycle guard: a ref that
        // is already canonical or still in progress is not descended
        // into, and its edges are not recomputed.
        if self.graph.arena.contains_key(&r) || self.in_progress.contains(&r) {
            return r;
        }

        if r.is_degenerate() {
            self.graph.degenerate_refs.push(r.clone());
        }

        self.in_progress.insert(r.clone());
        self.graph.order.push(r.clone());

        let mut targets = BTreeSet::new();
        for child in &component.children {
            targets.insert(self.visit(child));
        }

        // Every component declares its dependency status explicitly: a
        // leaf still emits a fragment with an empty target set.
        self.graph.fragments.push(EdgeFragment {
            source: r.clone(),
            targets,
        });

        self.in_progress.remove(&r);
        self.graph.arena.insert(r.clone(), flatten(component));
        r
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical arena entries are flat: the nested children lists have
/// been turned into edges at this point.
fn flatten(component: &Component) -> Component {
    Component {
        name: component.name.clone(),
        version: component.version.clone(),
        kind: component.kind,
        origin: component.origin.clone(),
        location: component.location.clone(),
        group: component.group.clone(),
        description: component.description.clone(),
        properties: component.properties.clone(),
        children: Vec::new(),
    }
}
