use std::collections::BTreeMap;

/// The kind of a discovered software unit.
///
/// The wire format collapses extension kinds into library-like
/// components; this enum keeps the distinction for ref derivation and
/// description templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Library,
    Application,
    IdeExtension,
    BrowserExtension,
    McpServer,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Library => "library",
            ComponentKind::Application => "application",
            ComponentKind::IdeExtension => "ide-extension",
            ComponentKind::BrowserExtension => "browser-extension",
            ComponentKind::McpServer => "mcp-server",
        }
    }
}

impl Default for ComponentKind {
    fn default() -> Self {
        ComponentKind::Library
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A software unit discovered on the endpoint.
///
/// Produced immutably by scanners and consumed read-only by the graph
/// builder. `children` holds nested/transitive dependencies; the same
/// logical component may appear as a subtree under multiple parents,
/// so nothing here assumes tree-exclusive ownership.
///
/// `properties` is an ordered map so that serialized output is stable
/// across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Component {
    pub name: String,
    pub version: Option<String>,
    pub kind: ComponentKind,
    /// Package manager / source of truth, e.g. "npm", "brew".
    pub origin: Option<String>,
    pub location: Option<String>,
    pub group: Option<String>,
    pub description: Option<String>,
    pub properties: BTreeMap<String, String>,
    pub children: Vec<Component>,
}

impl Component {
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Sets a property only if it is not already present, preserving
    /// values a scanner attached itself.
    pub fn set_property_if_absent(&mut self, key: &str, value: &str) {
        if !self.properties.contains_key(key) {
            self.properties.insert(key.to_string(), value.to_string());
        }
    }
}
