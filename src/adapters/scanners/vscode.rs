use crate::config::Config;
use crate::inventory::domain::{Category, Component, ComponentKind};
use crate::ports::Scanner;
use crate::shared::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Scans VS Code extensions from the per-user extensions directory.
/// Each extension directory carries a `package.json` manifest.
pub struct VsCodeScanner;

impl Scanner for VsCodeScanner {
    fn name(&self) -> &'static str {
        "vscode"
    }

    fn category(&self) -> Category {
        Category::IdeExtensions
    }

    fn scan(&self, config: &Config) -> Result<Vec<Component>> {
        let Some(home) = dirs::home_dir() else {
            return Ok(Vec::new());
        };
        let extensions_dir = home.join(".vscode").join("extensions");
        if config.is_path_excluded(&extensions_dir) {
            return Ok(Vec::new());
        }
        Ok(scan_extensions_dir(&extensions_dir, "vscode"))
    }
}

#[derive(Debug, Deserialize)]
struct ExtensionManifest {
    name: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    publisher: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Reads every `<dir>/<extension>/package.json` under an extensions
/// directory. Missing directory or unreadable manifests degrade to an
/// empty/partial result; unparseable entries are skipped.
pub fn scan_extensions_dir(extensions_dir: &Path, ide: &str) -> Vec<Component> {
    let Ok(entries) = fs::read_dir(extensions_dir) else {
        return Vec::new();
    };

    let mut components: Vec<Component> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let manifest_path = entry.path().join("package.json");
            let data = fs::read_to_string(&manifest_path).ok()?;
            let manifest: ExtensionManifest = serde_json::from_str(&data).ok()?;
            Some(manifest_to_component(
                manifest,
                ide,
                &entry.path().to_string_lossy(),
            ))
        })
        .collect();

    components.sort_by(|a, b| a.name.cmp(&b.name));
    components
}

fn manifest_to_component(manifest: ExtensionManifest, ide: &str, location: &str) -> Component {
    let mut component = Component::new(manifest.name, ComponentKind::IdeExtension)
        .with_property("ide", ide);
    component.version = manifest.version;
    component.group = manifest.publisher;
    component.description = manifest.description;
    component.location = Some(location.to_string());
    component
}
