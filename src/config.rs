//! Configuration file support for endpoint-sbom.
//!
//! Provides YAML-based configuration through `endpoint-sbom.yaml`
//! files, including data structures, file loading, and validation.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::shared::{Result, SbomError};

const CONFIG_FILENAME: &str = "endpoint-sbom.yaml";

/// Application configuration. CLI flags override file values; file
/// values override the defaults below.
#[derive(Debug, Clone)]
pub struct Config {
    /// Paths excluded from directory-walking scanners.
    pub exclude_paths: Vec<String>,
    /// Scanner names that must not run.
    pub disabled_scanners: Vec<String>,
    /// Where SBOM files are written.
    pub output_dir: PathBuf,
    pub debug: bool,
    pub verbose: bool,
    /// Opt-in public IP lookup from external services.
    pub fetch_public_ip: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude_paths: vec![
                // Never descend into credential material.
                "/etc/shadow".to_string(),
                "/root/.ssh".to_string(),
                ".ssh".to_string(),
                ".gnupg".to_string(),
                ".aws".to_string(),
                ".kube".to_string(),
                ".docker".to_string(),
                ".netrc".to_string(),
                ".git-credentials".to_string(),
            ],
            // Browser scanners are opt-in to avoid macOS TCC
            // permission popups on unmanaged machines.
            disabled_scanners: vec!["chrome-extensions".to_string()],
            output_dir: PathBuf::from("scans"),
            debug: false,
            verbose: false,
            fetch_public_ip: false,
        }
    }
}

impl Config {
    pub fn is_scanner_disabled(&self, scanner: &str) -> bool {
        self.disabled_scanners.iter().any(|d| d == scanner)
    }

    pub fn enable_scanner(&mut self, scanner: &str) {
        self.disabled_scanners.retain(|d| d != scanner);
    }

    /// Checks whether a path falls under any excluded path, by exact
    /// match or directory-prefix match on normalized paths.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        let candidate = normalize(path);
        self.exclude_paths.iter().any(|excluded| {
            let excluded = normalize(Path::new(excluded));
            candidate == excluded
                || candidate.starts_with(&format!("{}/", excluded))
                || candidate.ends_with(&format!("/{}", excluded))
                || candidate.contains(&format!("/{}/", excluded))
        })
    }
}

fn normalize(path: &Path) -> String {
    let cleaned: PathBuf = path.components().collect();
    cleaned.to_string_lossy().into_owned()
}

/// On-disk configuration schema. All fields optional; unknown fields
/// are collected for warnings instead of failing the load.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub exclude_paths: Option<Vec<String>>,
    pub disabled_scanners: Option<Vec<String>>,
    pub output_dir: Option<PathBuf>,
    pub debug: Option<bool>,
    pub verbose: Option<bool>,
    pub fetch_public_ip: Option<bool>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Merges file values over the given base configuration.
    /// `exclude_paths` appends rather than replaces, so the default
    /// sensitive-path exclusions always hold.
    pub fn apply_to(self, mut config: Config) -> Config {
        if let Some(paths) = self.exclude_paths {
            config.exclude_paths.extend(paths);
        }
        if let Some(disabled) = self.disabled_scanners {
            config.disabled_scanners = disabled;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(debug) = self.debug {
            config.debug = debug;
        }
        if let Some(verbose) = self.verbose {
            config.verbose = verbose;
        }
        if let Some(fetch) = self.fetch_public_ip {
            config.fetch_public_ip = fetch;
        }
        config
    }
}

/// Load config from an explicit path. Returns an error if the file is
/// not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|e| SbomError::ConfigRead {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    let config: ConfigFile =
        serde_yaml_ng::from_str(&content).map_err(|e| SbomError::ConfigParse {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

    warn_unknown_fields(&config);
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not
/// found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    load_config_from_path(&config_path).map(Some)
}

fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}
