//! endpoint-sbom - software inventory tool for endpoints
//!
//! This library discovers the software installed on the local machine
//! (package managers, applications, IDE and browser extensions),
//! canonicalizes each category into a deduplicated component graph,
//! and serializes one CycloneDX 1.6 JSON document per category.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`inventory`): Component model, ref derivation,
//!   graph canonicalization and document assembly
//! - **Application Layer** (`application`): Use cases orchestrating
//!   scanners and persistence
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Scanners, formatters, filesystem and
//!   console implementations
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use endpoint_sbom::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let config = Config::default();
//! let writer = SbomFileWriter::new(PathBuf::from("scans"));
//! let use_case = GenerateSbomsUseCase::new(
//!     SysinfoHostProbe::new(),
//!     StderrProgressReporter::new(false),
//!     writer,
//! );
//!
//! let scanners: Vec<Box<dyn Scanner>> = vec![Box::new(NpmScanner)];
//! let summary = use_case.execute(&scanners, &config)?;
//! println!("{} component(s)", summary.total_components());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod inventory;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::SbomFileWriter;
    pub use crate::adapters::outbound::formatters::CycloneDxSerializer;
    pub use crate::adapters::outbound::system::SysinfoHostProbe;
    pub use crate::adapters::scanners::{
        ApplicationScanner, BrewScanner, CargoScanner, ChromeScanner, CursorScanner, GemScanner,
        GoScanner, NpmScanner, PipScanner, VsCodeScanner, YarnScanner,
    };
    pub use crate::application::dto::{CategoryResult, ScanSummary};
    pub use crate::application::use_cases::GenerateSbomsUseCase;
    pub use crate::config::Config;
    pub use crate::inventory::domain::{
        BomDocument, Category, Component, ComponentKind, ComponentRef, HostInfo,
    };
    pub use crate::inventory::services::{
        merge_edges, DocumentAssembler, EdgeSet, GraphBuilder,
    };
    pub use crate::ports::{
        DocumentWriter, HostProbe, NullProgressReporter, ProgressReporter, Scanner,
    };
    pub use crate::shared::Result;
}
