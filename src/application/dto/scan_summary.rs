use crate::inventory::domain::Category;
use std::path::PathBuf;

/// Per-category outcome of one inventory run.
#[derive(Debug, Clone)]
pub struct CategoryResult {
    pub category: Category,
    pub component_count: usize,
    pub output_path: PathBuf,
}

/// ScanSummary - result DTO returned by the SBOM generation use case.
///
/// Carries everything the CLI needs to print its closing report
/// without reaching back into the domain layer.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    pub results: Vec<CategoryResult>,
    /// Scanner names that failed, with the failure message. Scanner
    /// failures are non-fatal and do not abort the run.
    pub scanner_errors: Vec<(String, String)>,
    /// Degenerate refs surfaced by graph construction, kept for
    /// data-quality reporting.
    pub degenerate_refs: Vec<String>,
}

impl ScanSummary {
    pub fn total_components(&self) -> usize {
        self.results.iter().map(|r| r.component_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_components_sums_categories() {
        let summary = ScanSummary {
            results: vec![
                CategoryResult {
                    category: Category::PackageManagers,
                    component_count: 12,
                    output_path: PathBuf::from("/tmp/a.sbom.json"),
                },
                CategoryResult {
                    category: Category::Applications,
                    component_count: 3,
                    output_path: PathBuf::from("/tmp/b.sbom.json"),
                },
            ],
            ..Default::default()
        };
        assert_eq!(summary.total_components(), 15);
    }
}
