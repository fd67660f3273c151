use super::{command_available, run_command};
use crate::config::Config;
use crate::inventory::domain::{Category, Component, ComponentKind};
use crate::ports::Scanner;
use crate::shared::Result;

/// Scans Go modules visible from the current module context via
/// `go list -m all`. Outside a module the command produces no module
/// lines and the scan yields nothing.
pub struct GoScanner;

impl Scanner for GoScanner {
    fn name(&self) -> &'static str {
        "go"
    }

    fn category(&self) -> Category {
        Category::PackageManagers
    }

    fn scan(&self, config: &Config) -> Result<Vec<Component>> {
        if !command_available("go") {
            if config.debug {
                eprintln!("go not found, skipping");
            }
            return Ok(Vec::new());
        }

        let Some(output) = run_command("go", &["list", "-m", "all"]) else {
            return Ok(Vec::new());
        };

        Ok(parse_go_module_list(&output))
    }
}

/// Parses `go list -m all` output: one `<module-path> <version>` pair
/// per line. The main-module line has no version field and is skipped.
pub fn parse_go_module_list(output: &str) -> Vec<Component> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let name = fields.next()?;
            let version = fields.next()?;
            Some(
                Component::new(name, ComponentKind::Library)
                    .with_version(version.trim_start_matches('v'))
                    .with_origin("go"),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::domain::derive_ref;

    #[test]
    fn test_parse_go_module_list() {
        let output = "example.com/mytool\ngolang.org/x/net v0.19.0\ngithub.com/spf13/cobra v1.8.0\n";
        let components = parse_go_module_list(output);

        assert_eq!(components.len(), 2);
        assert_eq!(components[0].name, "golang.org/x/net");
        assert_eq!(components[0].version.as_deref(), Some("0.19.0"));
        assert_eq!(components[0].origin.as_deref(), Some("go"));
    }

    #[test]
    fn test_go_origin_derives_golang_purl() {
        let components = parse_go_module_list("golang.org/x/net v0.19.0\n");
        assert_eq!(
            derive_ref(&components[0]).as_str(),
            "pkg:golang/golang.org/x/net@0.19.0"
        );
    }

    #[test]
    fn test_parse_go_module_list_empty() {
        assert!(parse_go_module_list("").is_empty());
    }
}
