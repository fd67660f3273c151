//! Ports - interfaces between the document pipeline and its
//! collaborators (scanners, host probe, filesystem, console).

pub mod document_writer;
pub mod host_probe;
pub mod progress_reporter;
pub mod scanner;

pub use document_writer::DocumentWriter;
pub use host_probe::HostProbe;
pub use progress_reporter::{NullProgressReporter, ProgressReporter};
pub use scanner::Scanner;
