use super::{command_available, run_command};
use crate::config::Config;
use crate::inventory::domain::{Category, Component, ComponentKind};
use crate::ports::Scanner;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Scans globally installed npm packages, including the full
/// transitive dependency tree. This is the scanner most likely to
/// produce shared and repeated subtrees, which the graph builder
/// collapses downstream.
pub struct NpmScanner;

impl Scanner for NpmScanner {
    fn name(&self) -> &'static str {
        "npm"
    }

    fn category(&self) -> Category {
        Category::PackageManagers
    }

    fn scan(&self, config: &Config) -> Result<Vec<Component>> {
        if !command_available("npm") {
            if config.debug {
                eprintln!("npm not found, skipping");
            }
            return Ok(Vec::new());
        }

        let Some(output) = run_command("npm", &["ls", "-g", "--all", "--json", "--depth=999"])
        else {
            return Ok(Vec::new());
        };

        parse_npm_tree(&output)
    }
}

// BTreeMap keys keep sibling order stable across runs; npm itself
// emits objects in arbitrary order.
#[derive(Debug, Deserialize)]
struct NpmListResult {
    #[serde(default)]
    dependencies: BTreeMap<String, NpmPackage>,
}

#[derive(Debug, Deserialize)]
struct NpmPackage {
    version: Option<String>,
    resolved: Option<String>,
    #[serde(default)]
    dependencies: BTreeMap<String, NpmPackage>,
}

/// Parses `npm ls --json` output into component trees.
pub fn parse_npm_tree(json: &str) -> Result<Vec<Component>> {
    let result: NpmListResult = serde_json::from_str(json)?;
    Ok(convert_dependencies(&result.dependencies))
}

fn convert_dependencies(dependencies: &BTreeMap<String, NpmPackage>) -> Vec<Component> {
    dependencies
        .iter()
        .map(|(name, package)| {
            let mut component = Component::new(name, ComponentKind::Library).with_origin("npm");
            component.version = package.version.clone();
            if let Some(resolved) = &package.resolved {
                component
                    .properties
                    .insert("resolved".to_string(), resolved.clone());
            }
            component.children = convert_dependencies(&package.dependencies);
            component
        })
        .collect()
}
