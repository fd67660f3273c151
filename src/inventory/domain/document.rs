use super::category::Category;
use super::component::Component;
use super::component_ref::ComponentRef;

/// The synthetic root node representing the scanned host, carrying the
/// host descriptive properties as ordered key/value pairs (keys repeat
/// for multi-valued entries such as `logged_in_user`).
#[derive(Debug, Clone)]
pub struct RootNode {
    pub bom_ref: ComponentRef,
    pub name: String,
    pub version: String,
    pub properties: Vec<(String, String)>,
}

/// One fully assembled document for a single category, ready for
/// serialization.
///
/// Well-formedness invariants maintained by the assembler:
/// - every ref in `dependencies` targets is either the root's target
///   or a key in `components`;
/// - every component has exactly one `dependencies` entry (possibly
///   with empty targets);
/// - the first `dependencies` entry is the root edge, listing the
///   deduplicated top-level refs.
#[derive(Debug, Clone)]
pub struct BomDocument {
    pub serial_number: String,
    pub timestamp: String,
    pub category: Category,
    pub root: RootNode,
    /// Deduplicated component set in first-seen walk order.
    pub components: Vec<(ComponentRef, Component)>,
    /// Root edge first, remaining entries sorted by source ref.
    pub dependencies: Vec<(ComponentRef, Vec<ComponentRef>)>,
}

impl BomDocument {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Output file name for this document:
    /// `<hostname>.<stamp>.<category>.sbom.json`.
    pub fn file_name(&self, stamp: &str) -> String {
        format!(
            "{}.{}.{}.sbom.json",
            self.root.name,
            stamp,
            self.category.label()
        )
    }
}
