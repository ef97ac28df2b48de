//! Sequential phase orchestrator with timing.

use std::collections::HashMap;
use std::time::Instant;

use crate::config::{ScanConfig, ScanResult};
use crate::error::Result;
use crate::languages::PatternCatalogue;
use crate::output::build_result;
use crate::phases;
use crate::tree::FileTree;

pub use crate::phases::extraction::{CancelToken, ProgressCallback};

/// Phase labels for progress reporting.
const PHASE_LABELS: &[(&str, &str)] = &[
    ("structure", "Mapping file tree"),
    ("extraction", "Scanning references"),
    ("assembly", "Assembling dependency graph"),
];

fn announce(progress: Option<&ProgressCallback>, name: &str) {
    if let Some(cb) = progress {
        let label = PHASE_LABELS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, l)| *l)
            .unwrap_or(name);
        cb(label);
    }
}

/// Walk `config.repo_path` and run every phase with the built-in catalogue.
pub fn run_pipeline(config: &ScanConfig, progress: Option<&ProgressCallback>) -> Result<ScanResult> {
    run_with(None, &PatternCatalogue::builtin(), config, progress, None)
}

/// Run extraction and assembly over an already-built tree.
pub fn run_tree(
    tree: FileTree,
    config: &ScanConfig,
    progress: Option<&ProgressCallback>,
) -> Result<ScanResult> {
    run_with(Some(tree), &PatternCatalogue::builtin(), config, progress, None)
}

/// Full pipeline. With no `tree`, the structure phase walks `config.repo_path`.
pub fn run_with(
    tree: Option<FileTree>,
    catalogue: &PatternCatalogue,
    config: &ScanConfig,
    progress: Option<&ProgressCallback>,
    cancel: Option<&CancelToken>,
) -> Result<ScanResult> {
    let mut timings: HashMap<String, f64> = HashMap::new();
    let total_start = Instant::now();

    let tree = match tree {
        Some(tree) => tree,
        None => {
            announce(progress, "structure");
            let start = Instant::now();
            let tree = phases::structure::build_tree_from_disk(config, catalogue)?;
            timings.insert("structure".to_string(), start.elapsed().as_secs_f64());
            tree
        }
    };

    announce(progress, "extraction");
    let start = Instant::now();
    let report = phases::extraction::run_extraction(&tree, catalogue, config, progress, cancel)?;
    timings.insert("extraction".to_string(), start.elapsed().as_secs_f64());

    announce(progress, "assembly");
    let start = Instant::now();
    let graph = phases::assembly::build_graph(&report.index, &report.edges);
    let output = phases::assembly::graph_output(&graph, &config.size_policy());
    timings.insert("assembly".to_string(), start.elapsed().as_secs_f64());

    for (phase, secs) in &timings {
        log::debug!("Phase {} took {:.3}s", phase, secs);
    }
    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;

    Ok(build_result(
        config, catalogue, &report, &graph, output, &timings, total_ms,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::FileNode;
    use std::sync::{Arc, Mutex};

    #[test]
    fn in_memory_tree_skips_structure_phase() {
        let tree = FileTree::from_files(vec![
            FileNode::in_memory("main.go", "import \"app/util\""),
            FileNode::in_memory("app/util.go", ""),
        ]);
        let result = run_tree(tree, &ScanConfig::default(), None).unwrap();
        let timings = &result.metadata["phase_timings"];
        assert!(timings.get("structure").is_none());
        assert!(timings.get("extraction").is_some());
        assert!(timings.get("assembly").is_some());
        assert!(result.graph.has_link("main.go", "app/util.go"));
    }

    #[test]
    fn phase_labels_go_through_progress() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let cb: ProgressCallback = Box::new(move |msg| sink.lock().unwrap().push(msg.to_string()));
        let tree = FileTree::from_files(vec![FileNode::in_memory("a.ts", "")]);
        run_tree(tree, &ScanConfig::default(), Some(&cb)).unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "Scanning references",
                "Scanned 1/1 files (0 references)",
                "Assembling dependency graph",
            ]
        );
    }
}
