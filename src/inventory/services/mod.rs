pub mod document_assembler;
pub mod edge_merger;
pub mod graph_builder;

pub use document_assembler::DocumentAssembler;
pub use edge_merger::{merge_edges, EdgeSet};
pub use graph_builder::{BuiltGraph, EdgeFragment, GraphBuilder};
