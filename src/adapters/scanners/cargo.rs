use super::{command_available, run_command};
use crate::config::Config;
use crate::inventory::domain::{Category, Component, ComponentKind};
use crate::ports::Scanner;
use crate::shared::Result;

/// Scans binaries installed via `cargo install`.
pub struct CargoScanner;

impl Scanner for CargoScanner {
    fn name(&self) -> &'static str {
        "cargo"
    }

    fn category(&self) -> Category {
        Category::PackageManagers
    }

    fn scan(&self, config: &Config) -> Result<Vec<Component>> {
        if !command_available("cargo") {
            if config.debug {
                eprintln!("cargo not found, skipping");
            }
            return Ok(Vec::new());
        }

        let Some(output) = run_command("cargo", &["install", "--list"]) else {
            return Ok(Vec::new());
        };

        Ok(parse_cargo_install_list(&output))
    }
}

/// Parses `cargo install --list` output. Unindented lines are
/// `package-name v0.1.0:` headers; indented lines list the installed
/// binaries and are skipped.
pub fn parse_cargo_install_list(output: &str) -> Vec<Component> {
    output
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with(' ') && !line.starts_with('\t'))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let name = fields.next()?;
            let version = fields
                .next()?
                .trim_end_matches(':')
                .trim_start_matches('v');
            Some(
                Component::new(name, ComponentKind::Library)
                    .with_version(version)
                    .with_origin("cargo"),
            )
        })
        .collect()
}
