use crate::ports::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::cell::RefCell;

const BAR_TEMPLATE: &str = "  {bar:30.green/white} {pos}/{len} {msg}";

/// Reports scan progress on stderr, keeping stdout clean for piping.
///
/// In normal mode scanner advancement renders as a single indicatif
/// bar with the current scanner name as its message. With `verbose`
/// the bar is skipped in favour of one plain line per scanner, which
/// keeps log capture and non-tty output readable.
pub struct StderrProgressReporter {
    verbose: bool,
    bar: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            bar: RefCell::new(None),
        }
    }

    /// Prints a line without drawing over an active bar.
    fn emit(&self, line: &str) {
        match self.bar.borrow().as_ref() {
            Some(bar) => bar.println(line),
            None => eprintln!("{line}"),
        }
    }

    fn bar_for(&self, total: usize) -> ProgressBar {
        let mut slot = self.bar.borrow_mut();
        if let Some(bar) = slot.as_ref() {
            return bar.clone();
        }
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .map(|style| style.progress_chars("=> "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        *slot = Some(bar.clone());
        bar
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        if self.verbose {
            self.emit(message);
        }
    }

    fn report_progress(&self, current: usize, total: usize, scanner: Option<&str>) {
        if self.verbose {
            match scanner {
                Some(name) => self.emit(&format!("[{current}/{total}] scanning {name}")),
                None => self.emit(&format!("[{current}/{total}]")),
            }
            return;
        }
        let bar = self.bar_for(total);
        bar.set_position(current as u64);
        if let Some(name) = scanner {
            bar.set_message(format!("scanning {name}"));
        }
    }

    fn report_error(&self, message: &str) {
        self.emit(&format!("{}", message.yellow()));
    }

    fn report_completion(&self, message: &str) {
        if let Some(bar) = self.bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
        eprintln!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_reporter_full_cycle() {
        let reporter = StderrProgressReporter::new(false);
        reporter.report("Gathering host information...");
        reporter.report_progress(1, 3, Some("npm"));
        reporter.report_progress(2, 3, Some("pip"));
        reporter.report_error("Scanner 'pip' failed: exit status 1");
        reporter.report_completion("Wrote 1 document(s)");
        assert!(reporter.bar.borrow().is_none());
    }

    #[test]
    fn test_verbose_reporter_never_creates_a_bar() {
        let reporter = StderrProgressReporter::new(true);
        reporter.report_progress(1, 2, Some("brew"));
        reporter.report_progress(2, 2, None);
        assert!(reporter.bar.borrow().is_none());
    }
}
