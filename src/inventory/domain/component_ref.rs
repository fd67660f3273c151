use super::component::{Component, ComponentKind};

/// A derived, deterministic string identity for a component.
///
/// Refs are the dedup key and graph node identifier: two components
/// with the same `(origin, name, version)` (or `(kind, name, version)`
/// when origin is absent) derive the same ref, which is exactly what
/// collapses duplicates in the component set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentRef(String);

impl ComponentRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Refs in the `pkg:` namespace double as package URLs.
    pub fn is_purl(&self) -> bool {
        self.0.starts_with("pkg:")
    }

    /// A degenerate ref comes from a component with no usable name.
    /// It is still a valid map key, but worth surfacing to the caller
    /// as a data-quality problem.
    pub fn is_degenerate(&self) -> bool {
        let rest = self
            .0
            .split_once(':')
            .map(|(_, rest)| rest)
            .unwrap_or(&self.0);
        let last_segment = rest.rsplit('/').next().unwrap_or(rest);
        let name = last_segment.split('@').next().unwrap_or("");
        name.is_empty()
    }
}

impl std::fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps a scanner origin to its canonical package-URL scheme token.
/// Unknown origins pass through as-is.
fn canonical_scheme(origin: &str) -> &str {
    match origin {
        "npm" | "yarn" | "pnpm" | "npm-local" => "npm",
        "pip" | "pip-local" => "pypi",
        "gem" | "gem-local" => "gem",
        "brew" => "brew",
        "cargo" => "cargo",
        "go" => "golang",
        "composer" => "composer",
        "chocolatey" => "choco",
        other => other,
    }
}

/// Derives the stable ref for a component. Total and deterministic:
/// never fails, never mutates, and components lacking a name degrade
/// to a degenerate ref instead of panicking.
pub fn derive_ref(component: &Component) -> ComponentRef {
    let version = component
        .version
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| format!("@{}", v))
        .unwrap_or_default();

    let origin = component.origin.as_deref().filter(|o| !o.is_empty());
    let value = match origin {
        Some(origin) => format!(
            "pkg:{}/{}{}",
            canonical_scheme(origin),
            component.name,
            version
        ),
        None => match component.kind {
            ComponentKind::Application => format!("app:{}{}", component.name, version),
            ComponentKind::BrowserExtension => format!("browser-ext:{}{}", component.name, version),
            ComponentKind::IdeExtension => format!("ide-ext:{}{}", component.name, version),
            ComponentKind::Library | ComponentKind::McpServer => {
                format!("{}{}", component.name, version)
            }
        },
    };

    ComponentRef::new(value)
}
