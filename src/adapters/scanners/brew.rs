use super::{command_available, run_command};
use crate::config::Config;
use crate::inventory::domain::{Category, Component, ComponentKind};
use crate::ports::Scanner;
use crate::shared::Result;
use serde::Deserialize;

/// Scans Homebrew formulae and casks (macOS/Linux).
pub struct BrewScanner;

impl Scanner for BrewScanner {
    fn name(&self) -> &'static str {
        "brew"
    }

    fn category(&self) -> Category {
        Category::PackageManagers
    }

    fn scan(&self, config: &Config) -> Result<Vec<Component>> {
        if cfg!(windows) || !command_available("brew") {
            if config.debug {
                eprintln!("brew not found, skipping");
            }
            return Ok(Vec::new());
        }

        let mut components = Vec::new();

        if let Some(output) = run_command("brew", &["info", "--json=v1", "--installed"]) {
            if let Ok(formulae) = parse_brew_formulae(&output) {
                components.extend(formulae);
            }
        }

        if let Some(output) = run_command("brew", &["list", "--cask", "--json"]) {
            if let Ok(casks) = parse_brew_casks(&output) {
                components.extend(casks);
            }
        }

        Ok(components)
    }
}

#[derive(Debug, Deserialize)]
struct BrewFormula {
    name: String,
    #[serde(default)]
    desc: Option<String>,
    #[serde(default)]
    homepage: Option<String>,
    #[serde(default)]
    installed: Vec<BrewInstall>,
}

#[derive(Debug, Deserialize)]
struct BrewInstall {
    version: String,
}

#[derive(Debug, Deserialize)]
struct BrewCask {
    token: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    caskroom_path: Option<String>,
}

/// Parses `brew info --json=v1 --installed` output.
pub fn parse_brew_formulae(json: &str) -> Result<Vec<Component>> {
    let formulae: Vec<BrewFormula> = serde_json::from_str(json)?;
    Ok(formulae
        .into_iter()
        .map(|formula| {
            let mut component =
                Component::new(formula.name, ComponentKind::Library).with_origin("brew");
            component.version = formula.installed.first().map(|i| i.version.clone());
            component.description = formula.desc;
            if let Some(homepage) = formula.homepage {
                component
                    .properties
                    .insert("homepage".to_string(), homepage);
            }
            component
        })
        .collect())
}

/// Parses `brew list --cask --json` output. Casks are full
/// applications rather than libraries.
pub fn parse_brew_casks(json: &str) -> Result<Vec<Component>> {
    let casks: Vec<BrewCask> = serde_json::from_str(json)?;
    Ok(casks
        .into_iter()
        .map(|cask| {
            let mut component =
                Component::new(cask.token, ComponentKind::Application).with_origin("brew-cask");
            component.version = cask.version;
            component.location = cask.caskroom_path;
            component
        })
        .collect())
}
