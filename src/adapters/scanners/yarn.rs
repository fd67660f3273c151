use super::{command_available, run_command};
use crate::config::Config;
use crate::inventory::domain::{Category, Component, ComponentKind};
use crate::ports::Scanner;
use crate::shared::Result;
use serde::Deserialize;

/// Scans globally installed yarn packages. Yarn emits newline-delimited
/// JSON objects; the one with `type == "tree"` carries the package
/// trees.
pub struct YarnScanner;

impl Scanner for YarnScanner {
    fn name(&self) -> &'static str {
        "yarn"
    }

    fn category(&self) -> Category {
        Category::PackageManagers
    }

    fn scan(&self, config: &Config) -> Result<Vec<Component>> {
        if !command_available("yarn") {
            if config.debug {
                eprintln!("yarn not found, skipping");
            }
            return Ok(Vec::new());
        }

        let Some(output) = run_command("yarn", &["global", "list", "--json"]) else {
            return Ok(Vec::new());
        };

        Ok(parse_yarn_global_list(&output))
    }
}

#[derive(Debug, Deserialize)]
struct YarnLine {
    #[serde(rename = "type")]
    line_type: String,
    #[serde(default)]
    data: YarnData,
}

#[derive(Debug, Deserialize, Default)]
struct YarnData {
    #[serde(default)]
    trees: Vec<YarnTree>,
}

#[derive(Debug, Deserialize)]
struct YarnTree {
    name: String,
    #[serde(default)]
    children: Vec<YarnTree>,
}

/// Parses `yarn global list --json` NDJSON output. Unparseable lines
/// and non-tree records are skipped.
pub fn parse_yarn_global_list(output: &str) -> Vec<Component> {
    output
        .lines()
        .filter_map(|line| serde_json::from_str::<YarnLine>(line).ok())
        .filter(|parsed| parsed.line_type == "tree")
        .flat_map(|parsed| parsed.data.trees)
        .filter_map(|tree| convert_tree(&tree))
        .collect()
}

fn convert_tree(tree: &YarnTree) -> Option<Component> {
    // Tree names are "name@version"; scoped packages keep their
    // leading @, so split on the last separator.
    let (name, version) = match tree.name.rsplit_once('@') {
        Some((name, version)) if !name.is_empty() => (name, Some(version)),
        _ => (tree.name.as_str(), None),
    };
    if name.is_empty() {
        return None;
    }

    let mut component = Component::new(name, ComponentKind::Library).with_origin("yarn");
    component.version = version.map(str::to_string);
    component.children = tree.children.iter().filter_map(convert_tree).collect();
    Some(component)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::domain::derive_ref;

    #[test]
    fn test_parse_yarn_global_list() {
        let output = concat!(
            r#"{"type":"activityStart","data":{"id":0}}"#,
            "\n",
            r#"{"type":"tree","data":{"type":"list","trees":[{"name":"prettier@3.2.4","children":[]},{"name":"typescript@5.3.3","children":[{"name":"semver@7.5.4"}]}]}}"#,
            "\n",
        );
        let components = parse_yarn_global_list(output);

        assert_eq!(components.len(), 2);
        assert_eq!(components[0].name, "prettier");
        assert_eq!(components[0].version.as_deref(), Some("3.2.4"));
        assert_eq!(components[0].origin.as_deref(), Some("yarn"));
        assert_eq!(components[1].children.len(), 1);
        assert_eq!(components[1].children[0].name, "semver");
    }

    #[test]
    fn test_scoped_package_splits_on_last_at() {
        let output = r#"{"type":"tree","data":{"trees":[{"name":"@angular/cli@17.1.0"}]}}"#;
        let components = parse_yarn_global_list(output);

        assert_eq!(components[0].name, "@angular/cli");
        assert_eq!(components[0].version.as_deref(), Some("17.1.0"));
        // yarn shares the npm ecosystem's ref namespace.
        assert_eq!(
            derive_ref(&components[0]).as_str(),
            "pkg:npm/@angular/cli@17.1.0"
        );
    }

    #[test]
    fn test_garbage_lines_are_skipped() {
        assert!(parse_yarn_global_list("not json\n{\"type\":\"info\"}\n").is_empty());
    }
}
