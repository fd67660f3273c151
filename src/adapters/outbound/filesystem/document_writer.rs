use crate::ports::DocumentWriter;
use crate::shared::{Result, SbomError};
use std::fs;
use std::path::{Path, PathBuf};

/// SbomFileWriter adapter for persisting serialized documents into the
/// output directory, one file per category.
#[derive(Debug)]
pub struct SbomFileWriter {
    output_dir: PathBuf,
}

impl SbomFileWriter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Validates the output directory, creating it when missing.
    /// Rejects symlinked directories so documents never land outside
    /// the configured location.
    pub fn prepare(output_dir: &Path) -> Result<Self> {
        if output_dir.exists() {
            let metadata =
                fs::symlink_metadata(output_dir).map_err(|e| SbomError::InvalidOutputDir {
                    path: output_dir.to_path_buf(),
                    reason: format!("Failed to read directory metadata: {}", e),
                })?;
            if metadata.is_symlink() {
                return Err(SbomError::InvalidOutputDir {
                    path: output_dir.to_path_buf(),
                    reason: "Output directory is a symbolic link".to_string(),
                }
                .into());
            }
            if !output_dir.is_dir() {
                return Err(SbomError::InvalidOutputDir {
                    path: output_dir.to_path_buf(),
                    reason: "Not a directory".to_string(),
                }
                .into());
            }
        } else {
            fs::create_dir_all(output_dir).map_err(|e| SbomError::InvalidOutputDir {
                path: output_dir.to_path_buf(),
                reason: format!("Failed to create directory: {}", e),
            })?;
        }

        Ok(Self::new(output_dir.to_path_buf()))
    }
}

impl DocumentWriter for SbomFileWriter {
    fn write_document(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);

        // Never follow a symlink that appeared at the target path.
        if path.exists() {
            let metadata = fs::symlink_metadata(&path).map_err(|e| SbomError::FileWriteError {
                path: path.clone(),
                details: format!("Failed to read file metadata: {}", e),
            })?;
            if metadata.is_symlink() {
                return Err(SbomError::FileWriteError {
                    path,
                    details: "Output path is a symbolic link".to_string(),
                }
                .into());
            }
        }

        fs::write(&path, content).map_err(|e| SbomError::FileWriteError {
            path: path.clone(),
            details: e.to_string(),
        })?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_document_success() {
        let dir = TempDir::new().unwrap();
        let writer = SbomFileWriter::prepare(dir.path()).unwrap();

        let path = writer
            .write_document("host.20260101-000000.package-managers.sbom.json", "{}")
            .unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_prepare_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("scans").join("2026");

        let writer = SbomFileWriter::prepare(&nested).unwrap();
        assert!(nested.is_dir());

        writer.write_document("a.sbom.json", "{}").unwrap();
        assert!(nested.join("a.sbom.json").exists());
    }

    #[test]
    fn test_prepare_rejects_file_as_output_dir() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("not-a-dir");
        fs::write(&file_path, "x").unwrap();

        let result = SbomFileWriter::prepare(&file_path);
        assert!(result.is_err());
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Not a directory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_document_rejects_symlink_target() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.json");
        fs::write(&real, "original").unwrap();
        let link = dir.path().join("linked.sbom.json");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let writer = SbomFileWriter::new(dir.path().to_path_buf());
        let result = writer.write_document("linked.sbom.json", "{}");

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&real).unwrap(), "original");
    }
}
