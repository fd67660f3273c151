/// ProgressReporter port for reporting scan progress.
///
/// This port abstracts the progress destination (stderr, test
/// collector) so the pipeline never writes to the console directly.
pub trait ProgressReporter {
    /// Reports a general progress message.
    fn report(&self, message: &str);

    /// Reports incremental progress through a known number of steps.
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a non-fatal problem (scanner failure, data-quality
    /// degradation).
    fn report_error(&self, message: &str);

    /// Reports completion of the whole run.
    fn report_completion(&self, message: &str);
}

/// Reporter that swallows everything. Useful for embedding the
/// pipeline in tests or other tools.
pub struct NullProgressReporter;

impl ProgressReporter for NullProgressReporter {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_error(&self, _message: &str) {}
    fn report_completion(&self, _message: &str) {}
}
