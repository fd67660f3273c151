pub mod document_writer;

pub use document_writer::SbomFileWriter;
