use crate::adapters::outbound::formatters::CycloneDxSerializer;
use crate::application::dto::{CategoryResult, ScanSummary};
use crate::config::Config;
use crate::inventory::domain::{Category, Component};
use crate::inventory::services::{merge_edges, DocumentAssembler, GraphBuilder};
use crate::ports::{DocumentWriter, HostProbe, ProgressReporter, Scanner};
use crate::shared::Result;
use chrono::Local;
use std::collections::BTreeMap;

/// GenerateSbomsUseCase - orchestrates one full inventory run.
///
/// Probes the host, runs every enabled scanner, canonicalizes each
/// category's component forest into a deduplicated graph, and persists
/// one CycloneDX document per non-empty category.
///
/// Scanner failures are reported and skipped; serialization and write
/// failures abort the whole run.
///
/// # Type Parameters
/// * `H` - HostProbe implementation
/// * `P` - ProgressReporter implementation
/// * `W` - DocumentWriter implementation
pub struct GenerateSbomsUseCase<H, P, W>
where
    H: HostProbe,
    P: ProgressReporter,
    W: DocumentWriter,
{
    host_probe: H,
    progress: P,
    writer: W,
    serializer: CycloneDxSerializer,
}

impl<H, P, W> GenerateSbomsUseCase<H, P, W>
where
    H: HostProbe,
    P: ProgressReporter,
    W: DocumentWriter,
{
    pub fn new(host_probe: H, progress: P, writer: W) -> Self {
        Self {
            host_probe,
            progress,
            writer,
            serializer: CycloneDxSerializer::new(),
        }
    }

    /// Runs the scanners and writes one document per non-empty
    /// category. All documents from one invocation share the same
    /// timestamp stamp in their file names.
    pub fn execute(&self, scanners: &[Box<dyn Scanner>], config: &Config) -> Result<ScanSummary> {
        let mut summary = ScanSummary::default();

        self.progress.report("Gathering host information...");
        let host = self.host_probe.probe(config.fetch_public_ip)?;

        let mut forests: BTreeMap<Category, Vec<Component>> = BTreeMap::new();
        let total = scanners.len();
        for (index, scanner) in scanners.iter().enumerate() {
            self.progress
                .report_progress(index + 1, total, Some(scanner.name()));
            match scanner.scan(config) {
                Ok(mut components) => {
                    for component in &mut components {
                        tag_provenance(component, scanner.name());
                    }
                    forests
                        .entry(scanner.category())
                        .or_default()
                        .extend(components);
                }
                Err(err) => {
                    self.progress
                        .report_error(&format!("Scanner '{}' failed: {err}", scanner.name()));
                    summary
                        .scanner_errors
                        .push((scanner.name().to_string(), err.to_string()));
                }
            }
        }

        let stamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
        for category in Category::ALL {
            let Some(forest) = forests.get(&category) else {
                continue;
            };
            if forest.is_empty() {
                continue;
            }

            let mut graph = GraphBuilder::build(forest);
            for degenerate in &graph.degenerate_refs {
                self.progress.report_error(&format!(
                    "Degenerate ref '{}' in {category} output",
                    degenerate.as_str()
                ));
                summary.degenerate_refs.push(degenerate.as_str().to_string());
            }

            let fragments = std::mem::take(&mut graph.fragments);
            let edges = merge_edges(fragments);
            let document = DocumentAssembler::assemble(&host, category, graph, edges);

            let content = self.serializer.serialize(&document)?;
            let file_name = document.file_name(&stamp);
            let output_path = self.writer.write_document(&file_name, &content)?;

            self.progress.report(&format!(
                "{category}: {} components -> {}",
                document.component_count(),
                output_path.display()
            ));
            summary.results.push(CategoryResult {
                category,
                component_count: document.component_count(),
                output_path,
            });
        }

        self.progress.report_completion(&format!(
            "Wrote {} document(s), {} component(s) total",
            summary.results.len(),
            summary.total_components()
        ));
        Ok(summary)
    }
}

/// Stamps provenance on a component tree. Scanner-provided values are
/// kept; only missing keys are filled in.
fn tag_provenance(component: &mut Component, scanner_name: &str) {
    component.set_property_if_absent("install_type", "current");
    component.set_property_if_absent("source", scanner_name);
    for child in &mut component.children {
        tag_provenance(child, scanner_name);
    }
}
