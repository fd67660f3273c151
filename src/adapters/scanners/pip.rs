use super::{command_available, run_command};
use crate::config::Config;
use crate::inventory::domain::{Category, Component, ComponentKind};
use crate::ports::Scanner;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::BTreeSet;

/// Scans pip-installed Python packages across the interpreter variants
/// commonly on PATH.
pub struct PipScanner;

const PIP_COMMANDS: [&[&str]; 4] = [
    &["pip", "list", "--format=json"],
    &["pip3", "list", "--format=json"],
    &["python", "-m", "pip", "list", "--format=json"],
    &["python3", "-m", "pip", "list", "--format=json"],
];

impl Scanner for PipScanner {
    fn name(&self) -> &'static str {
        "pip"
    }

    fn category(&self) -> Category {
        Category::PackageManagers
    }

    fn scan(&self, config: &Config) -> Result<Vec<Component>> {
        let mut components = Vec::new();
        let mut seen = BTreeSet::new();

        // Different pip entry points frequently resolve to the same
        // environment; dedup on name@version so one interpreter's
        // packages are not reported four times.
        for command in PIP_COMMANDS {
            if !command_available(command[0]) {
                continue;
            }
            let Some(output) = run_command(command[0], &command[1..]) else {
                if config.debug {
                    eprintln!("pip scan failed for {}", command[0]);
                }
                continue;
            };
            let Ok(packages) = parse_pip_list(&output) else {
                continue;
            };
            for component in packages {
                let key = format!(
                    "{}@{}",
                    component.name,
                    component.version.as_deref().unwrap_or("")
                );
                if seen.insert(key) {
                    components.push(component);
                }
            }
        }

        Ok(components)
    }
}

#[derive(Debug, Deserialize)]
struct PipPackage {
    name: String,
    version: String,
}

/// Parses `pip list --format=json` output.
pub fn parse_pip_list(json: &str) -> Result<Vec<Component>> {
    let packages: Vec<PipPackage> = serde_json::from_str(json)?;
    Ok(packages
        .into_iter()
        .map(|package| {
            Component::new(package.name, ComponentKind::Library)
                .with_version(package.version)
                .with_origin("pip")
        })
        .collect())
}
