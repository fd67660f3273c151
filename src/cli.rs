use clap::Parser;

use crate::config::Config;

/// Generate CycloneDX software inventories for this endpoint
#[derive(Parser, Debug)]
#[command(name = "endpoint-sbom")]
#[command(version)]
#[command(about = "Generate CycloneDX software inventories for this endpoint", long_about = None)]
pub struct Args {
    /// Path to a configuration file (defaults to endpoint-sbom.yaml
    /// in the current directory when present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output directory for generated documents
    #[arg(short, long)]
    pub output: Option<String>,

    /// Scanners to disable, comma separated (e.g. npm,pip,vscode)
    #[arg(long = "disable", value_delimiter = ',', value_name = "SCANNER")]
    pub disable: Vec<String>,

    /// Scanners or scanner groups to enable, comma separated
    /// (e.g. browser-extensions, chrome-extensions)
    #[arg(long = "enable", value_delimiter = ',', value_name = "SCANNER")]
    pub enable: Vec<String>,

    /// Query external services for this host's public IP address
    #[arg(long = "fetch-public-ip")]
    pub fetch_public_ip: bool,

    /// Enable all optional features (browser extensions, public IP lookup)
    #[arg(long = "all")]
    pub all: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Layers the command-line flags over a loaded configuration.
    /// Flags win over file values; `--enable` is applied after
    /// `--disable` so it can re-enable default-disabled scanners.
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(output) = &self.output {
            config.output_dir = output.into();
        }
        config
            .disabled_scanners
            .extend(self.disable.iter().cloned());
        if self.all {
            config.fetch_public_ip = true;
            for scanner in expand_scanner_groups(&["browser-extensions".to_string()]) {
                config.enable_scanner(&scanner);
            }
        }
        for scanner in expand_scanner_groups(&self.enable) {
            config.enable_scanner(&scanner);
        }
        if self.fetch_public_ip {
            config.fetch_public_ip = true;
        }
        config.debug |= self.debug;
        config.verbose |= self.verbose;
        config
    }
}

/// Expands shorthand scanner groups into individual scanner names.
/// Unrecognized names pass through unchanged.
pub fn expand_scanner_groups(scanners: &[String]) -> Vec<String> {
    let mut expanded = Vec::new();
    for scanner in scanners {
        match scanner.as_str() {
            "browser-extensions" => {
                expanded.push("chrome-extensions".to_string());
            }
            other => expanded.push(other.to_string()),
        }
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_browser_extensions_group() {
        let expanded = expand_scanner_groups(&["browser-extensions".to_string()]);
        assert_eq!(expanded, vec!["chrome-extensions".to_string()]);
    }

    #[test]
    fn test_expand_passes_plain_names_through() {
        let expanded =
            expand_scanner_groups(&["npm".to_string(), "chrome-extensions".to_string()]);
        assert_eq!(
            expanded,
            vec!["npm".to_string(), "chrome-extensions".to_string()]
        );
    }

    #[test]
    fn test_apply_to_output_override() {
        let args = Args::parse_from(["endpoint-sbom", "--output", "/tmp/sboms"]);
        let config = args.apply_to(Config::default());
        assert_eq!(config.output_dir, std::path::PathBuf::from("/tmp/sboms"));
    }

    #[test]
    fn test_apply_to_disable_then_enable() {
        let args = Args::parse_from([
            "endpoint-sbom",
            "--disable",
            "npm,pip",
            "--enable",
            "npm",
        ]);
        let config = args.apply_to(Config::default());
        assert!(!config.is_scanner_disabled("npm"));
        assert!(config.is_scanner_disabled("pip"));
    }

    #[test]
    fn test_enable_group_turns_on_chrome_extensions() {
        let args = Args::parse_from(["endpoint-sbom", "--enable", "browser-extensions"]);
        let config = args.apply_to(Config::default());
        assert!(!config.is_scanner_disabled("chrome-extensions"));
    }

    #[test]
    fn test_all_flag_enables_optional_features() {
        let args = Args::parse_from(["endpoint-sbom", "--all"]);
        let config = args.apply_to(Config::default());
        assert!(config.fetch_public_ip);
        assert!(!config.is_scanner_disabled("chrome-extensions"));
    }

    #[test]
    fn test_public_ip_off_by_default() {
        let args = Args::parse_from(["endpoint-sbom"]);
        let config = args.apply_to(Config::default());
        assert!(!config.fetch_public_ip);
    }
}
