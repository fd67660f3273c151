use crate::shared::Result;
use std::path::PathBuf;

/// DocumentWriter port for persisting serialized documents.
///
/// # Errors
/// A write failure is fatal for the whole invocation: the caller does
/// not retry and aborts the remaining categories.
pub trait DocumentWriter {
    /// Writes one serialized document under the given file name and
    /// returns the full path it was written to.
    fn write_document(&self, file_name: &str, content: &str) -> Result<PathBuf>;
}
