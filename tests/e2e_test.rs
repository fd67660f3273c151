/// End-to-end tests for the CLI
mod exit_code_tests {
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("endpoint-sbom")
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("CycloneDX"))
            .stdout(predicate::str::contains("--disable"))
            .stdout(predicate::str::contains("--fetch-public-ip"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("endpoint-sbom")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("endpoint-sbom"));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("endpoint-sbom")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 1: Application error - missing config file
    #[test]
    fn test_exit_code_missing_config() {
        cargo_bin_cmd!("endpoint-sbom")
            .args(["--config", "/nonexistent/endpoint-sbom.yaml"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("An error occurred"));
    }
}

mod run_tests {
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;
    use tempfile::TempDir;

    const ALL_SCANNERS: &str =
        "npm,yarn,pip,gem,go,brew,cargo,applications,vscode,cursor,chrome-extensions";

    /// With every scanner disabled the run succeeds, creates the
    /// output directory and writes no documents.
    #[test]
    fn test_all_scanners_disabled_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("scans");

        cargo_bin_cmd!("endpoint-sbom")
            .current_dir(dir.path())
            .args(["--disable", ALL_SCANNERS])
            .args(["--output", out.to_str().unwrap()])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("0 document(s)"));

        assert!(out.is_dir());
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
    }

    /// A config file in the working directory is discovered without
    /// the --config flag.
    #[test]
    fn test_config_file_discovered_in_cwd() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("endpoint-sbom.yaml"),
            format!(
                "output_dir: from-config\ndisabled_scanners:\n{}",
                ALL_SCANNERS
                    .split(',')
                    .map(|s| format!("  - {s}\n"))
                    .collect::<String>()
            ),
        )
        .unwrap();

        cargo_bin_cmd!("endpoint-sbom")
            .current_dir(dir.path())
            .assert()
            .code(0);

        assert!(dir.path().join("from-config").is_dir());
    }

    /// Unknown config keys warn but do not fail the run.
    #[test]
    fn test_unknown_config_key_is_nonfatal() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("endpoint-sbom.yaml"),
            "output_dir: scans\nupload_url: https://example.com\n",
        )
        .unwrap();

        cargo_bin_cmd!("endpoint-sbom")
            .current_dir(dir.path())
            .args(["--disable", ALL_SCANNERS])
            .assert()
            .code(0)
            .stderr(predicate::str::contains("upload_url"));
    }
}
