use crate::config::Config;
use crate::inventory::domain::{Category, Component, ComponentKind};
use crate::ports::Scanner;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Scans OS-level installed applications.
///
/// On macOS this reads `.app` bundles from the standard application
/// folders and pulls version info out of `Contents/Info.plist`.
/// On Linux it parses `.desktop` entries. Windows registry scanning
/// is not supported.
pub struct ApplicationScanner;

impl Scanner for ApplicationScanner {
    fn name(&self) -> &'static str {
        "applications"
    }

    fn category(&self) -> Category {
        Category::Applications
    }

    fn scan(&self, config: &Config) -> Result<Vec<Component>> {
        let search_paths: &[&str] = if cfg!(target_os = "macos") {
            &[
                "/Applications",
                "/System/Applications",
                "/System/Library/CoreServices",
            ]
        } else if cfg!(target_os = "linux") {
            &["/usr/share/applications", "/usr/local/share/applications"]
        } else {
            &[]
        };

        let mut components = Vec::new();
        for search_path in search_paths {
            let dir = Path::new(search_path);
            if config.is_path_excluded(dir) {
                continue;
            }
            if cfg!(target_os = "macos") {
                components.extend(scan_app_bundles(dir, config));
            } else {
                components.extend(scan_desktop_entries(dir, config));
            }
        }
        components.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(components)
    }
}

fn scan_app_bundles(dir: &Path, config: &Config) -> Vec<Component> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut components = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !path.is_dir() || !file_name.ends_with(".app") {
            continue;
        }
        if config.is_path_excluded(&path) {
            continue;
        }

        let plist = fs::read_to_string(path.join("Contents").join("Info.plist"))
            .unwrap_or_default();
        let bundle_id = extract_plist_value(&plist, "CFBundleIdentifier");
        let version = extract_plist_value(&plist, "CFBundleShortVersionString")
            .or_else(|| extract_plist_value(&plist, "CFBundleVersion"));
        let display_name = extract_plist_value(&plist, "CFBundleDisplayName");

        let name = display_name
            .unwrap_or_else(|| file_name.trim_end_matches(".app").to_string());

        let mut component = Component::new(name, ComponentKind::Application);
        component.version = version;
        component.location = Some(path.to_string_lossy().into_owned());
        if let Some(id) = bundle_id {
            component = component.with_property("bundle_identifier", id);
        }
        components.push(component);
    }
    components
}

/// Minimal plist reader: finds `<key>NAME</key>` and returns the
/// following `<string>` value. Binary plists are not handled.
fn extract_plist_value(plist: &str, key: &str) -> Option<String> {
    let key_tag = format!("<key>{key}</key>");
    let after_key = &plist[plist.find(&key_tag)? + key_tag.len()..];
    let start = after_key.find("<string>")? + "<string>".len();
    let end = after_key[start..].find("</string>")? + start;
    let value = after_key[start..end].trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn scan_desktop_entries(dir: &Path, config: &Config) -> Vec<Component> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut components = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() || path.extension().map_or(true, |ext| ext != "desktop") {
            continue;
        }
        if config.is_path_excluded(&path) {
            continue;
        }
        let Ok(data) = fs::read_to_string(&path) else {
            continue;
        };
        if let Some(component) = parse_desktop_entry(&data, &path) {
            components.push(component);
        }
    }
    components
}

fn parse_desktop_entry(data: &str, path: &Path) -> Option<Component> {
    let mut name = None;
    let mut version = None;
    let mut comment = None;
    let mut exec = None;

    for line in data.lines() {
        let line = line.trim();
        if let Some(value) = line.strip_prefix("Name=") {
            name.get_or_insert_with(|| value.to_string());
        } else if let Some(value) = line.strip_prefix("Version=") {
            version.get_or_insert_with(|| value.to_string());
        } else if let Some(value) = line.strip_prefix("Comment=") {
            comment.get_or_insert_with(|| value.to_string());
        } else if let Some(value) = line.strip_prefix("Exec=") {
            exec.get_or_insert_with(|| value.to_string());
        }
    }

    let name = name?;
    let mut component = Component::new(name, ComponentKind::Application);
    component.version = version;
    component.description = comment;
    component.location = Some(path.to_string_lossy().into_owned());
    if let Some(exec) = exec {
        component = component.with_property("exec", exec);
    }
    Some(component)
}
