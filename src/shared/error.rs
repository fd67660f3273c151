use std::path::PathBuf;
use thiserror::Error;

/// Application-specific errors for SBOM document generation.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
///
/// Data-quality problems in scanned components (missing names or
/// versions) are deliberately NOT represented here: they degrade the
/// derived ref and are surfaced through the progress reporter, but
/// never abort a scan. Encoding and persistence failures are fatal for
/// the whole invocation.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("Failed to encode SBOM document for category '{category}'\nDetails: {details}\n\n💡 Hint: This is a bug in the document model; please report it with the scan summary")]
    DocumentEncode { category: String, details: String },

    #[error("Failed to write SBOM file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid output directory: {path}\nReason: {reason}\n\n💡 Hint: Please specify a writable directory with --output")]
    InvalidOutputDir { path: PathBuf, reason: String },

    #[error("Failed to read config file: {path}\nDetails: {details}\n\n💡 Hint: Check that the file exists and is readable")]
    ConfigRead { path: PathBuf, details: String },

    #[error("Failed to parse config file: {path}\nDetails: {details}\n\n💡 Hint: Ensure the file contains valid YAML syntax")]
    ConfigParse { path: PathBuf, details: String },

    #[error("Failed to gather host information\nDetails: {details}")]
    HostProbe { details: String },
}
