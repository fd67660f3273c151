pub mod cyclonedx;

pub use cyclonedx::CycloneDxSerializer;
