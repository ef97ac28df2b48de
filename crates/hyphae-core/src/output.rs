//! JSON result assembly and serialisation.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::Utc;

use crate::config::{GraphOutput, ScanConfig, ScanResult};
use crate::graph::{DependencyGraph, FileIndex};
use crate::languages::PatternCatalogue;
use crate::phases::extraction::ExtractionReport;

/// Count indexed files per language. Files without a known language are not counted.
fn count_languages(index: &FileIndex, catalogue: &PatternCatalogue) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for file in index.nodes() {
        if let Some(lang) = file
            .extension()
            .and_then(|ext| catalogue.language_for_extension(&ext).map(String::from))
        {
            *counts.entry(lang).or_insert(0) += 1;
        }
    }
    counts
}

/// Build the ScanResult from the finished phases.
pub fn build_result(
    config: &ScanConfig,
    catalogue: &PatternCatalogue,
    report: &ExtractionReport,
    graph: &DependencyGraph,
    output: GraphOutput,
    timings: &HashMap<String, f64>,
    total_ms: f64,
) -> ScanResult {
    let repo_path = Path::new(&config.repo_path)
        .canonicalize()
        .unwrap_or_else(|_| Path::new(&config.repo_path).to_path_buf());
    let repo_name = repo_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut metadata = HashMap::new();
    metadata.insert(
        "repo_name".to_string(),
        serde_json::Value::String(repo_name),
    );
    metadata.insert(
        "repo_path".to_string(),
        serde_json::Value::String(repo_path.to_string_lossy().to_string()),
    );
    metadata.insert(
        "analysed_at".to_string(),
        serde_json::Value::String(Utc::now().to_rfc3339()),
    );
    metadata.insert(
        "hyphae_version".to_string(),
        serde_json::Value::String(env!("CARGO_PKG_VERSION").to_string()),
    );
    metadata.insert(
        "analysis_duration_ms".to_string(),
        serde_json::json!(((total_ms * 10.0).round() / 10.0)),
    );
    metadata.insert(
        "phase_timings".to_string(),
        serde_json::to_value(timings).unwrap_or_default(),
    );

    let languages = count_languages(&report.index, catalogue);
    let mut stats = HashMap::new();
    stats.insert("files".to_string(), serde_json::json!(graph.file_count()));
    stats.insert(
        "scanned_files".to_string(),
        serde_json::json!(report.scanned_files),
    );
    stats.insert(
        "raw_references".to_string(),
        serde_json::json!(report.edges.len()),
    );
    stats.insert("links".to_string(), serde_json::json!(graph.link_count()));
    stats.insert(
        "isolated_files".to_string(),
        serde_json::json!(graph.isolated_count()),
    );
    stats.insert(
        "languages".to_string(),
        serde_json::to_value(&languages).unwrap_or_default(),
    );

    ScanResult {
        version: "1.0".to_string(),
        metadata,
        stats,
        graph: output,
    }
}

/// Write the scan result to a JSON file.
pub fn write_output(result: &ScanResult, output_path: &str) -> std::io::Result<()> {
    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(result).map_err(std::io::Error::other)?;
    std::fs::write(output_path, json)
}
