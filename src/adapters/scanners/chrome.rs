use crate::config::Config;
use crate::inventory::domain::{Category, Component, ComponentKind};
use crate::ports::Scanner;
use crate::shared::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Scans Chrome browser extensions across all discovered profiles.
///
/// Disabled by default (see `Config::default`): reading browser
/// profile directories triggers TCC permission popups on unmanaged
/// macOS hosts.
pub struct ChromeScanner;

impl Scanner for ChromeScanner {
    fn name(&self) -> &'static str {
        "chrome-extensions"
    }

    fn category(&self) -> Category {
        Category::BrowserExtensions
    }

    fn scan(&self, config: &Config) -> Result<Vec<Component>> {
        let Some(base) = chrome_base_dir() else {
            return Ok(Vec::new());
        };

        let mut components = Vec::new();
        for profile in discover_profiles(&base) {
            let extensions_dir = base.join(&profile).join("Extensions");
            if config.is_path_excluded(&extensions_dir) {
                continue;
            }
            components.extend(scan_profile_extensions(&extensions_dir, &profile));
        }
        Ok(components)
    }
}

fn chrome_base_dir() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    let base = if cfg!(target_os = "macos") {
        home.join("Library")
            .join("Application Support")
            .join("Google")
            .join("Chrome")
    } else if cfg!(windows) {
        home.join("AppData")
            .join("Local")
            .join("Google")
            .join("Chrome")
            .join("User Data")
    } else {
        home.join(".config").join("google-chrome")
    };
    base.is_dir().then_some(base)
}

/// Profile directories are the ones that contain an Extensions
/// subdirectory ("Default", "Profile 1", ...).
fn discover_profiles(base: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(base) else {
        return Vec::new();
    };
    let mut profiles: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.path().join("Extensions").is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    profiles.sort();
    profiles
}

#[derive(Debug, Deserialize)]
struct ChromeManifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Walks `<profile>/Extensions/<id>/<version>/manifest.json`, taking
/// the lexically newest version directory when several coexist during
/// an update.
pub fn scan_profile_extensions(extensions_dir: &Path, profile: &str) -> Vec<Component> {
    let Ok(entries) = fs::read_dir(extensions_dir) else {
        return Vec::new();
    };

    let mut components = Vec::new();
    let mut ids: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    ids.sort();

    for id_dir in ids {
        let Ok(versions) = fs::read_dir(&id_dir) else {
            continue;
        };
        let mut version_dirs: Vec<PathBuf> = versions
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        version_dirs.sort();

        let Some(latest) = version_dirs.last() else {
            continue;
        };
        let Ok(data) = fs::read_to_string(latest.join("manifest.json")) else {
            continue;
        };
        let Ok(manifest) = serde_json::from_str::<ChromeManifest>(&data) else {
            continue;
        };

        let extension_id = id_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        components.push(manifest_to_component(manifest, &extension_id, profile, latest));
    }
    components
}

fn manifest_to_component(
    manifest: ChromeManifest,
    extension_id: &str,
    profile: &str,
    location: &Path,
) -> Component {
    // Locale-keyed names (__MSG_appName__) are useless as identity;
    // fall back to the extension id.
    let name = match manifest.name {
        Some(name) if !name.starts_with("__MSG_") => name,
        _ => extension_id.to_string(),
    };

    let mut component = Component::new(name, ComponentKind::BrowserExtension)
        .with_property("browser", "chrome")
        .with_property("profile", profile)
        .with_property("extension_id", extension_id);
    component.version = manifest.version;
    component.description = manifest.description;
    component.location = Some(location.to_string_lossy().into_owned());
    component
}
