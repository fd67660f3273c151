/// Data Transfer Objects for the application layer
///
/// DTOs are used to transfer results between the use case and the
/// CLI adapter, keeping the domain layer isolated.
mod scan_summary;

pub use scan_summary::{CategoryResult, ScanSummary};
