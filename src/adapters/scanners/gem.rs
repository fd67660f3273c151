use super::{command_available, run_command};
use crate::config::Config;
use crate::inventory::domain::{Category, Component, ComponentKind};
use crate::ports::Scanner;
use crate::shared::Result;

/// Scans locally installed Ruby gems.
pub struct GemScanner;

impl Scanner for GemScanner {
    fn name(&self) -> &'static str {
        "gem"
    }

    fn category(&self) -> Category {
        Category::PackageManagers
    }

    fn scan(&self, config: &Config) -> Result<Vec<Component>> {
        if !command_available("gem") {
            if config.debug {
                eprintln!("gem not found, skipping");
            }
            return Ok(Vec::new());
        }

        let Some(output) = run_command("gem", &["list", "--local"]) else {
            return Ok(Vec::new());
        };

        Ok(parse_gem_list(&output))
    }
}

/// Parses `gem list --local` output. Lines look like
/// `rake (13.1.0, 13.0.6)`; a gem with several installed versions
/// yields one component per version.
pub fn parse_gem_list(output: &str) -> Vec<Component> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let (name, versions) = line.split_once(' ')?;
            let versions = versions.trim().strip_prefix('(')?.strip_suffix(')')?;
            Some((name, versions))
        })
        .flat_map(|(name, versions)| {
            versions.split(',').filter_map(move |version| {
                let version = version.trim();
                // "default: x.y.z" markers on stdlib gems
                let version = version.strip_prefix("default: ").unwrap_or(version);
                if version.is_empty() {
                    return None;
                }
                Some(
                    Component::new(name, ComponentKind::Library)
                        .with_version(version)
                        .with_origin("gem"),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gem_list() {
        let output = "\n*** LOCAL GEMS ***\n\nrake (13.1.0)\nnokogiri (1.16.0, 1.15.4)\n";
        let components = parse_gem_list(output);

        assert_eq!(components.len(), 3);
        assert_eq!(components[0].name, "rake");
        assert_eq!(components[0].version.as_deref(), Some("13.1.0"));
        assert_eq!(components[0].origin.as_deref(), Some("gem"));
        assert_eq!(components[1].name, "nokogiri");
        assert_eq!(components[1].version.as_deref(), Some("1.16.0"));
        assert_eq!(components[2].version.as_deref(), Some("1.15.4"));
    }

    #[test]
    fn test_parse_gem_list_default_gem_marker() {
        let components = parse_gem_list("json (default: 2.7.1)\n");
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].version.as_deref(), Some("2.7.1"));
    }

    #[test]
    fn test_parse_gem_list_skips_header_and_blank_lines() {
        assert!(parse_gem_list("*** LOCAL GEMS ***\n\n").is_empty());
    }
}
