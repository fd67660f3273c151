use crate::inventory::domain::{BomDocument, Component, ComponentKind, RootNode};
use crate::shared::{Result, SbomError};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Bom {
    #[serde(rename = "bomFormat")]
    bom_format: String,
    #[serde(rename = "specVersion")]
    spec_version: String,
    version: u32,
    #[serde(rename = "serialNumber")]
    serial_number: String,
    metadata: Metadata,
    components: Vec<WireComponent>,
    dependencies: Vec<WireDependency>,
}

#[derive(Debug, Serialize)]
struct Metadata {
    timestamp: String,
    component: WireComponent,
}

#[derive(Debug, Serialize)]
struct WireComponent {
    #[serde(rename = "bom-ref")]
    bom_ref: String,
    #[serde(rename = "type")]
    component_type: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purl: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    properties: Vec<WireProperty>,
}

#[derive(Debug, Serialize)]
struct WireProperty {
    name: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct WireDependency {
    #[serde(rename = "ref")]
    bom_ref: String,
    #[serde(rename = "dependsOn")]
    depends_on: Vec<String>,
}

/// Renders an assembled document as CycloneDX 1.6 JSON.
///
/// Rendering is the last step before persistence; an encoding failure
/// here is fatal for the whole invocation.
pub struct CycloneDxSerializer;

impl CycloneDxSerializer {
    pub fn new() -> Self {
        Self
    }

    pub fn serialize(&self, document: &BomDocument) -> Result<String> {
        let bom = Bom {
            bom_format: "CycloneDX".to_string(),
            spec_version: "1.6".to_string(),
            version: 1,
            serial_number: document.serial_number.clone(),
            metadata: Metadata {
                timestamp: document.timestamp.clone(),
                component: build_root(&document.root),
            },
            components: document
                .components
                .iter()
                .map(|(r, c)| build_component(r.as_str(), c))
                .collect(),
            dependencies: document
                .dependencies
                .iter()
                .map(|(source, targets)| WireDependency {
                    bom_ref: source.as_str().to_string(),
                    depends_on: targets.iter().map(|t| t.as_str().to_string()).collect(),
                })
                .collect(),
        };

        serde_json::to_string_pretty(&bom).map_err(|e| {
            SbomError::DocumentEncode {
                category: document.category.label().to_string(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for CycloneDxSerializer {
    fn default() -> Self {
        Self::new()
    }
}

fn build_root(root: &RootNode) -> WireComponent {
    WireComponent {
        bom_ref: root.bom_ref.as_str().to_string(),
        component_type: "device".to_string(),
        name: root.name.clone(),
        version: Some(root.version.clone()),
        group: None,
        description: None,
        purl: None,
        properties: root
            .properties
            .iter()
            .map(|(name, value)| WireProperty {
                name: name.clone(),
                value: value.clone(),
            })
            .collect(),
    }
}

/// Extension and MCP kinds have no dedicated CycloneDX component type;
/// they serialize as library-like / application-like per the ref
/// scheme that already encodes the distinction.
fn wire_type(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Library
        | ComponentKind::IdeExtension
        | ComponentKind::BrowserExtension => "library",
        ComponentKind::Application | ComponentKind::McpServer => "application",
    }
}

fn build_component(bom_ref: &str, component: &Component) -> WireComponent {
    let mut properties: Vec<WireProperty> = component
        .properties
        .iter()
        .map(|(name, value)| WireProperty {
            name: name.clone(),
            value: value.clone(),
        })
        .collect();
    if let Some(origin) = &component.origin {
        properties.push(WireProperty {
            name: "package_manager".to_string(),
            value: origin.clone(),
        });
    }
    if let Some(location) = &component.location {
        properties.push(WireProperty {
            name: "location".to_string(),
            value: location.clone(),
        });
    }

    WireComponent {
        bom_ref: bom_ref.to_string(),
        component_type: wire_type(component.kind).to_string(),
        name: component.name.clone(),
        version: component.version.clone(),
        group: component.group.clone(),
        description: component.description.clone(),
        purl: bom_ref.starts_with("pkg:").then(|| bom_ref.to_string()),
        properties,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::domain::{Category, ComponentRef};

    fn document() -> BomDocument {
        let lodash = Component::new("lodash", ComponentKind::Library)
            .with_version("4.17.21")
            .with_origin("npm")
            .with_property("install_type", "current");
        BomDocument {
            serial_number: "urn:uuid:11111111-2222-3333-4444-555555555555".to_string(),
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
            category: Category::PackageManagers,
            root: RootNode {
                bom_ref: ComponentRef::new("device:laptop-01"),
                name: "laptop-01".to_string(),
                version: "14.2".to_string(),
                properties: vec![("os".to_string(), "macos".to_string())],
            },
            components: vec![(ComponentRef::new("pkg:npm/lodash@4.17.21"), lodash)],
            dependencies: vec![
                (
                    ComponentRef::new("device:laptop-01"),
                    vec![ComponentRef::new("pkg:npm/lodash@4.17.21")],
                ),
                (ComponentRef::new("pkg:npm/lodash@4.17.21"), vec![]),
            ],
        }
    }

    #[test]
    fn test_serialize_top_level_shape() {
        let json = CycloneDxSerializer::new().serialize(&document()).unwrap();
        assert!(json.contains("\"bomFormat\": \"CycloneDX\""));
        assert!(json.contains("\"specVersion\": \"1.6\""));
        assert!(json.contains("\"version\": 1"));
        assert!(json.contains(
            "\"serialNumber\": \"urn:uuid:11111111-2222-3333-4444-555555555555\""
        ));
        assert!(json.contains("\"timestamp\": \"2026-01-01T00:00:00+00:00\""));
    }

    #[test]
    fn test_serialize_root_node() {
        let json = CycloneDxSerializer::new().serialize(&document()).unwrap();
        assert!(json.contains("\"bom-ref\": \"device:laptop-01\""));
        assert!(json.contains("\"type\": \"device\""));
        assert!(json.contains("\"name\": \"os\""));
        assert!(json.contains("\"value\": \"macos\""));
    }

    #[test]
    fn test_serialize_component_with_purl_and_properties() {
        let json = CycloneDxSerializer::new().serialize(&document()).unwrap();
        assert!(json.contains("\"purl\": \"pkg:npm/lodash@4.17.21\""));
        assert!(json.contains("\"package_manager\""));
        assert!(json.contains("\"install_type\""));
    }

    #[test]
    fn test_serialize_dependencies_root_first() {
        let json = CycloneDxSerializer::new().serialize(&document()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let dependencies = parsed["dependencies"].as_array().unwrap();
        assert_eq!(dependencies[0]["ref"], "device:laptop-01");
        assert_eq!(dependencies[0]["dependsOn"][0], "pkg:npm/lodash@4.17.21");
        // Leaves keep an explicit empty dependsOn array.
        assert_eq!(dependencies[1]["ref"], "pkg:npm/lodash@4.17.21");
        assert!(dependencies[1]["dependsOn"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_non_purl_component_has_no_purl_field() {
        let mut doc = document();
        let slack = Component::new("Slack", ComponentKind::Application).with_version("4.36");
        doc.components = vec![(ComponentRef::new("app:Slack@4.36"), slack)];
        doc.dependencies = vec![
            (
                ComponentRef::new("device:laptop-01"),
                vec![ComponentRef::new("app:Slack@4.36")],
            ),
            (ComponentRef::new("app:Slack@4.36"), vec![]),
        ];

        let json = CycloneDxSerializer::new().serialize(&doc).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let component = &parsed["components"][0];
        assert_eq!(component["type"], "application");
        assert!(component.get("purl").is_none());
    }

    #[test]
    fn test_serialize_is_idempotent_for_same_document() {
        let doc = document();
        let serializer = CycloneDxSerializer::new();
        assert_eq!(
            serializer.serialize(&doc).unwrap(),
            serializer.serialize(&doc).unwrap()
        );
    }
}
