use super::edge_merger::EdgeSet;
use super::graph_builder::BuiltGraph;
use crate::inventory::domain::{
    BomDocument, Category, Component, ComponentKind, HostInfo, RootNode,
};
use chrono::Utc;
use uuid::Uuid;

/// Assembles one category's canonical graph into a complete document:
/// synthetic root node, root edge to the top-level refs, generation
/// metadata and host properties.
pub struct DocumentAssembler;

impl DocumentAssembler {
    /// Builds the final document from a built graph and its merged
    /// edge set. The root edge is placed first; the remaining
    /// dependency entries follow in ref-sorted order.
    pub fn assemble(
        host: &HostInfo,
        category: Category,
        graph: BuiltGraph,
        edges: EdgeSet,
    ) -> BomDocument {
        let root = RootNode {
            bom_ref: host.root_ref(),
            name: host.hostname.clone(),
            version: host.os_version.clone(),
            properties: Self::host_properties(host, category),
        };

        let top_level = graph.top_level.clone();
        let components: Vec<_> = graph
            .into_ordered_components()
            .into_iter()
            .map(|(r, mut component)| {
                Self::enhance_description(&mut component);
                (r, component)
            })
            .collect();

        let mut dependencies = Vec::with_capacity(edges.len() + 1);
        dependencies.push((root.bom_ref.clone(), top_level));
        for (source, targets) in edges {
            dependencies.push((source, targets.into_iter().collect()));
        }

        BomDocument {
            serial_number: format!("urn:uuid:{}", Uuid::new_v4()),
            timestamp: Utc::now().to_rfc3339(),
            category,
            root,
            components,
            dependencies,
        }
    }

    fn host_properties(host: &HostInfo, category: Category) -> Vec<(String, String)> {
        let mut properties = vec![
            ("os".to_string(), host.os_name.clone()),
            ("os_version".to_string(), host.os_version.clone()),
            ("scan_category".to_string(), category.label().to_string()),
        ];
        for user in &host.users {
            properties.push(("logged_in_user".to_string(), user.clone()));
        }
        for ip in &host.local_ips {
            properties.push(("local_ip".to_string(), ip.clone()));
        }
        if let Some(public_ip) = &host.public_ip {
            properties.push(("public_ip".to_string(), public_ip.clone()));
        }
        properties
    }

    /// Type-specific description templates. Purely cosmetic: identity
    /// was derived before this runs.
    fn enhance_description(component: &mut Component) {
        let suffix = match component.kind {
            ComponentKind::IdeExtension | ComponentKind::McpServer => component
                .properties
                .get("ide")
                .map(|ide| format!("IDE: {}", ide)),
            ComponentKind::BrowserExtension => {
                component.properties.get("browser").map(|browser| {
                    match component.properties.get("profile") {
                        Some(profile) => format!("Browser: {} | Profile: {}", browser, profile),
                        None => format!("Browser: {}", browser),
                    }
                })
            }
            ComponentKind::Library => component
                .properties
                .get("project_path")
                .map(|path| format!("Project: {}", path)),
            ComponentKind::Application => None,
        };

        if let Some(suffix) = suffix {
            component.description = Some(match component.description.take() {
                Some(existing) if !existing.is_empty() => format!("{} | {}", existing, suffix),
                _ => suffix,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::services::edge_merger::merge_edges;
    use crate::inventory::services::graph_builder::GraphBuilder;
    use crate::inventory::domain::ComponentRef;

    fn host() -> HostInfo {
        HostInfo {
            hostname: "laptop-01".to_string(),
            os_name: "macos".to_string(),
            os_version: "14.2".to_string(),
            users: vec!["alice".to_string(), "bob".to_string()],
            local_ips: vec!["192.168.1.10".to_string()],
            public_ip: None,
        }
    }

    fn npm(name: &str, version: &str) -> Component {
        Component::new(name, ComponentKind::Library)
            .with_version(version)
            .with_origin("npm")
    }

    fn assemble(forest: &[Component], category: Category) -> BomDocument {
        let graph = GraphBuilder::build(forest);
        let edges = merge_edges(graph.fragments.clone());
        DocumentAssembler::assemble(&host(), category, graph, edges)
    }

    #[test]
    fn test_root_edge_first_with_deduplicated_top_level_refs() {
        let mut react = npm("react", "18.2.0");
        react.children.push(npm("left-pad", "1.3.0"));
        let forest = vec![npm("left-pad", "1.3.0"), react];

        let document = assemble(&forest, Category::PackageManagers);

        assert_eq!(document.component_count(), 2);
        let (root_ref, root_targets) = &document.dependencies[0];
        assert_eq!(root_ref.as_str(), "device:laptop-01");
        assert_eq!(
            root_targets,
            &vec![
                ComponentRef::new("pkg:npm/left-pad@1.3.0"),
                ComponentRef::new("pkg:npm/react@18.2.0"),
            ]
        );
    }

    #[test]
    fn test_every_component_has_exactly_one_dependency_entry() {
        let mut react = npm("react", "18.2.0");
        react.children.push(npm("scheduler", "0.23.0"));
        let document = assemble(&[react], Category::PackageManagers);

        for (r, _) in &document.components {
            let entries = document
                .dependencies
                .iter()
                .filter(|(source, _)| source == r)
                .count();
            assert_eq!(entries, 1, "wrong entry count for {}", r);
        }
    }

    #[test]
    fn test_no_dangling_edges_except_root() {
        let mut react = npm("react", "18.2.0");
        react.children.push(npm("left-pad", "1.3.0"));
        let document = assemble(&[react], Category::PackageManagers);

        let known: Vec<&ComponentRef> = document.components.iter().map(|(r, _)| r).collect();
        for (source, targets) in document.dependencies.iter().skip(1) {
            assert!(known.contains(&source));
            for target in targets {
                assert!(known.contains(&target), "dangling edge to {}", target);
            }
        }
    }

    #[test]
    fn test_host_properties_on_root() {
        let document = assemble(&[npm("lodash", "4.17.21")], Category::PackageManagers);

        let properties = &document.root.properties;
        assert!(properties.contains(&("os".to_string(), "macos".to_string())));
        assert!(properties.contains(&("os_version".to_string(), "14.2".to_string())));
        assert!(properties.contains(&(
            "scan_category".to_string(),
            "package-managers".to_string()
        )));
        let users: Vec<_> = properties
            .iter()
            .filter(|(k, _)| k == "logged_in_user")
            .collect();
        assert_eq!(users.len(), 2);
        assert!(properties.contains(&("local_ip".to_string(), "192.168.1.10".to_string())));
        assert!(!properties.iter().any(|(k, _)| k == "public_ip"));
    }

    #[test]
    fn test_public_ip_included_when_available() {
        let mut host = host();
        host.public_ip = Some("203.0.113.7".to_string());
        let graph = GraphBuilder::build(&[npm("lodash", "4.17.21")]);
        let edges = merge_edges(graph.fragments.clone());
        let document =
            DocumentAssembler::assemble(&host, Category::PackageManagers, graph, edges);

        assert!(document
            .root
            .properties
            .contains(&("public_ip".to_string(), "203.0.113.7".to_string())));
    }

    #[test]
    fn test_serial_number_is_urn_uuid() {
        let document = assemble(&[npm("lodash", "4.17.21")], Category::PackageManagers);
        assert!(document.serial_number.starts_with("urn:uuid:"));
        assert!(Uuid::parse_str(&document.serial_number["urn:uuid:".len()..]).is_ok());
    }

    #[test]
    fn test_ide_extension_description_template() {
        let ext = Component::new("rust-analyzer", ComponentKind::IdeExtension)
            .with_version("0.4.1")
            .with_property("ide", "vscode");
        let document = assemble(&[ext], Category::IdeExtensions);

        let (_, component) = &document.components[0];
        assert_eq!(component.description.as_deref(), Some("IDE: vscode"));
    }

    #[test]
    fn test_browser_extension_description_template_appends() {
        let mut ext = Component::new("ublock-origin", ComponentKind::BrowserExtension)
            .with_version("1.55")
            .with_property("browser", "chrome")
            .with_property("profile", "Default");
        ext.description = Some("Content blocker".to_string());
        let document = assemble(&[ext], Category::BrowserExtensions);

        let (_, component) = &document.components[0];
        assert_eq!(
            component.description.as_deref(),
            Some("Content blocker | Browser: chrome | Profile: Default")
        );
    }

    #[test]
    fn test_library_project_path_description() {
        let lib = npm("local-dep", "0.1.0").with_property("project_path", "/home/alice/app");
        let document = assemble(&[lib], Category::PackageManagers);

        let (_, component) = &document.components[0];
        assert_eq!(
            component.description.as_deref(),
            Some("Project: /home/alice/app")
        );
    }

    #[test]
    fn test_spec_example_scenario() {
        // Two trees: left-pad alone, and react with left-pad nested.
        let mut react = npm("react", "18.2.0");
        react.children.push(npm("left-pad", "1.3.0"));
        let forest = vec![npm("left-pad", "1.3.0"), react];

        let document = assemble(&forest, Category::PackageManagers);

        assert_eq!(document.component_count(), 2);
        // 1 root entry + 2 component entries.
        assert_eq!(document.dependencies.len(), 3);

        let react_entry = document
            .dependencies
            .iter()
            .find(|(s, _)| s.as_str() == "pkg:npm/react@18.2.0")
            .unwrap();
        assert_eq!(react_entry.1, vec![ComponentRef::new("pkg:npm/left-pad@1.3.0")]);

        let left_pad_entry = document
            .dependencies
            .iter()
            .find(|(s, _)| s.as_str() == "pkg:npm/left-pad@1.3.0")
            .unwrap();
        assert!(left_pad_entry.1.is_empty());

        let (_, root_targets) = &document.dependencies[0];
        assert_eq!(root_targets.len(), 2);
    }
}
