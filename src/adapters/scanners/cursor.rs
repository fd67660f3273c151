use super::vscode::scan_extensions_dir;
use crate::config::Config;
use crate::inventory::domain::{Category, Component, ComponentKind};
use crate::ports::Scanner;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Scans Cursor IDE extensions and configured MCP servers.
///
/// Extensions live in `~/.cursor/extensions` with the same manifest
/// layout VS Code uses. MCP servers come from Cursor's `mcp.json`;
/// only non-secret details (command, argument and env var counts) are
/// recorded.
pub struct CursorScanner;

impl Scanner for CursorScanner {
    fn name(&self) -> &'static str {
        "cursor"
    }

    fn category(&self) -> Category {
        Category::IdeExtensions
    }

    fn scan(&self, config: &Config) -> Result<Vec<Component>> {
        let Some(home) = dirs::home_dir() else {
            return Ok(Vec::new());
        };

        let mut components = Vec::new();

        let extensions_dir = home.join(".cursor").join("extensions");
        if !config.is_path_excluded(&extensions_dir) {
            components.extend(scan_extensions_dir(&extensions_dir, "cursor"));
        }

        for config_path in mcp_config_paths(&home) {
            if config.is_path_excluded(&config_path) {
                continue;
            }
            let Ok(data) = fs::read_to_string(&config_path) else {
                continue;
            };
            components.extend(parse_mcp_config(&data, &config_path));
        }

        Ok(components)
    }
}

fn mcp_config_paths(home: &Path) -> Vec<PathBuf> {
    let global_storage = if cfg!(target_os = "macos") {
        home.join("Library")
            .join("Application Support")
            .join("Cursor")
    } else if cfg!(windows) {
        home.join("AppData").join("Roaming").join("Cursor")
    } else {
        home.join(".config").join("Cursor")
    };
    vec![
        home.join(".cursor").join("mcp.json"),
        global_storage
            .join("User")
            .join("globalStorage")
            .join("mcp.json"),
    ]
}

#[derive(Debug, Deserialize)]
struct McpConfig {
    #[serde(rename = "mcpServers", default)]
    mcp_servers: BTreeMap<String, McpServerEntry>,
}

#[derive(Debug, Deserialize, Default)]
struct McpServerEntry {
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    args: Vec<serde_json::Value>,
    #[serde(default)]
    env: BTreeMap<String, serde_json::Value>,
}

/// Parses an `mcp.json` file into MCP server components. Env values
/// and argument contents frequently hold tokens, so only their counts
/// are kept.
pub fn parse_mcp_config(data: &str, config_path: &Path) -> Vec<Component> {
    let Ok(config) = serde_json::from_str::<McpConfig>(data) else {
        return Vec::new();
    };

    config
        .mcp_servers
        .into_iter()
        .map(|(name, entry)| {
            let mut component =
                Component::new(name, ComponentKind::McpServer).with_property("ide", "cursor");
            component.location = Some(config_path.to_string_lossy().into_owned());
            if let Some(command) = entry.command {
                component = component.with_property("command", command);
            }
            if !entry.args.is_empty() {
                component =
                    component.with_property("args_count", entry.args.len().to_string());
            }
            if !entry.env.is_empty() {
                component =
                    component.with_property("env_vars_count", entry.env.len().to_string());
            }
            component
        })
        .collect()
}
