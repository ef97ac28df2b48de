//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use hyphae_core::config::{DependencyEdge, ScanConfig, ScanResult};
use hyphae_core::languages::PatternCatalogue;
use hyphae_core::phases::extraction::extract_dependencies;
use hyphae_core::tree::{FileNode, FileTree};

// ---------------------------------------------------------------------------
// Fixture path resolution
// ---------------------------------------------------------------------------

/// Resolve `tests/fixtures/{name}` relative to the workspace root.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .join("../../tests/fixtures")
        .join(name)
        .canonicalize()
        .unwrap_or_else(|_| {
            Path::new(manifest_dir)
                .join("../../tests/fixtures")
                .join(name)
        })
}

/// Default config pointed at a fixture directory.
pub fn fixture_config(name: &str) -> ScanConfig {
    ScanConfig {
        repo_path: fixture_path(name).to_string_lossy().to_string(),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Phase runners
// ---------------------------------------------------------------------------

/// Walk a fixture directory into a file tree.
pub fn fixture_tree(name: &str) -> FileTree {
    hyphae_core::phases::structure::build_tree_from_disk(
        &fixture_config(name),
        &PatternCatalogue::builtin(),
    )
    .unwrap()
}

/// Run the whole pipeline on a fixture directory.
pub fn run_fixture(name: &str) -> ScanResult {
    hyphae_core::pipeline::run_pipeline(&fixture_config(name), None).unwrap()
}

/// Build a flat in-memory tree from `(path, content)` pairs.
pub fn memory_tree(files: &[(&str, &str)]) -> FileTree {
    FileTree::from_files(
        files
            .iter()
            .map(|(path, text)| FileNode::in_memory(*path, *text))
            .collect(),
    )
}

/// Raw edges for an in-memory tree with the built-in catalogue.
pub fn extract(files: &[(&str, &str)]) -> Vec<DependencyEdge> {
    extract_dependencies(
        &memory_tree(files),
        &PatternCatalogue::builtin(),
        &ScanConfig::default(),
        None,
        None,
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Extractors
// ---------------------------------------------------------------------------

/// Edge pairs (source, target) in emission order.
pub fn edge_pairs(edges: &[DependencyEdge]) -> Vec<(String, String)> {
    edges
        .iter()
        .map(|e| (e.source.clone(), e.target.clone()))
        .collect()
}

/// Link pairs (source, target) from a scan result.
pub fn link_pairs(result: &ScanResult) -> Vec<(String, String)> {
    result
        .graph
        .links
        .iter()
        .map(|l| (l.source.clone(), l.target.clone()))
        .collect()
}

/// Node ids from a scan result.
pub fn node_ids(result: &ScanResult) -> Vec<String> {
    result.graph.nodes.iter().map(|n| n.id.clone()).collect()
}

/// Convenience for building expected pairs.
pub fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(s, t)| (s.to_string(), t.to_string()))
        .collect()
}
