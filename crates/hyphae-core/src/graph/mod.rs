pub mod dependency_graph;
pub mod file_index;

pub use dependency_graph::{DependencyGraph, FileVertex, SizePolicy};
pub use file_index::FileIndex;
