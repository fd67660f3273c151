//! Scanner adapters - discovery collaborators at the boundary of the
//! document pipeline.
//!
//! Each scanner shells out to a package-manager CLI or walks a
//! well-known directory, degrades silently when the tool is absent on
//! this host, and never fails the scan fatally. Output parsing is kept
//! in free functions so it can be tested without the tools installed.

pub mod applications;
pub mod brew;
pub mod cargo;
pub mod chrome;
pub mod cursor;
pub mod gem;
pub mod golang;
pub mod npm;
pub mod pip;
pub mod vscode;
pub mod yarn;

pub use applications::ApplicationScanner;
pub use brew::BrewScanner;
pub use cargo::CargoScanner;
pub use chrome::ChromeScanner;
pub use cursor::CursorScanner;
pub use gem::GemScanner;
pub use golang::GoScanner;
pub use npm::NpmScanner;
pub use pip::PipScanner;
pub use vscode::VsCodeScanner;
pub use yarn::YarnScanner;

use std::path::Path;
use std::process::Command;

/// Checks if a command is available in PATH.
pub(crate) fn command_available(name: &str) -> bool {
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| {
        let candidate = dir.join(name);
        is_executable(&candidate)
            || (cfg!(windows) && is_executable(&dir.join(format!("{}.exe", name))))
    })
}

fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Runs a command and returns its stdout as UTF-8. Some tools (npm ls
/// in particular) exit non-zero while still printing a usable tree, so
/// a non-zero status with non-empty stdout is not treated as failure.
pub(crate) fn run_command(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if output.stdout.is_empty() && !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_available_for_missing_command() {
        assert!(!command_available("definitely-not-a-real-command-xyz"));
    }

    #[test]
    fn test_run_command_missing_program_is_none() {
        assert!(run_command("definitely-not-a-real-command-xyz", &[]).is_none());
    }
}
