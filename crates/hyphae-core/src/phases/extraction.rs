//! Extraction phase: run the pattern catalogue over every file and resolve
//! each captured reference to a file in the tree.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::config::{DependencyEdge, ScanConfig};
use crate::error::{HyphaeError, Result};
use crate::graph::FileIndex;
use crate::languages::PatternCatalogue;
use crate::phases::resolution::resolve_reference;
use crate::tree::{FileNode, FileTree};

/// Progress callback type: receives a human-readable status line.
pub type ProgressCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Cooperative cancellation flag, checked before each file.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Everything the extraction phase produced.
#[derive(Debug, Default)]
pub struct ExtractionReport {
    /// One edge per resolved match, in file order. Duplicates are kept.
    pub edges: Vec<DependencyEdge>,
    /// Files that had patterns and were read successfully.
    pub scanned_files: usize,
    pub index: FileIndex,
}

/// Extract every resolvable reference in `tree`.
pub fn extract_dependencies(
    tree: &FileTree,
    catalogue: &PatternCatalogue,
    config: &ScanConfig,
    progress: Option<&ProgressCallback>,
    cancel: Option<&CancelToken>,
) -> Result<Vec<DependencyEdge>> {
    run_extraction(tree, catalogue, config, progress, cancel).map(|report| report.edges)
}

/// Extraction with scan statistics and the file index it built.
pub fn run_extraction(
    tree: &FileTree,
    catalogue: &PatternCatalogue,
    config: &ScanConfig,
    progress: Option<&ProgressCallback>,
    cancel: Option<&CancelToken>,
) -> Result<ExtractionReport> {
    tree.validate()?;
    let files = tree.files();
    let index = FileIndex::from_tree(tree);

    let tracker = Tracker {
        total: files.len(),
        interval: config.progress_interval.max(1),
        done: AtomicUsize::new(0),
        edges: AtomicUsize::new(0),
        progress,
    };

    let visit = |file: &&FileNode| -> Result<Option<Vec<DependencyEdge>>> {
        if cancel.is_some_and(|c| c.is_cancelled()) {
            return Err(HyphaeError::Cancelled);
        }
        let found = scan_file(file, &index, catalogue, config);
        tracker.record(found.as_ref().map_or(0, Vec::len));
        Ok(found)
    };

    let per_file: Vec<Option<Vec<DependencyEdge>>> = if config.parallel {
        files.par_iter().map(visit).collect::<Result<_>>()?
    } else {
        files.iter().map(visit).collect::<Result<_>>()?
    };
    tracker.finish();

    let scanned_files = per_file.iter().filter(|f| f.is_some()).count();
    let edges: Vec<DependencyEdge> = per_file.into_iter().flatten().flatten().collect();

    Ok(ExtractionReport {
        edges,
        scanned_files,
        index,
    })
}

/// Scan one file. `None` when the file was skipped (no patterns, filtered
/// language, unreadable or oversized).
fn scan_file(
    file: &FileNode,
    index: &FileIndex,
    catalogue: &PatternCatalogue,
    config: &ScanConfig,
) -> Option<Vec<DependencyEdge>> {
    let ext = file.extension()?;
    let rules = catalogue.patterns_for(&ext);
    let profile = catalogue.profile_for(&ext)?;
    if rules.is_empty() || !config.accepts_language(&profile.name) {
        return None;
    }

    if let Some(len) = file.content.as_ref().and_then(|c| c.len_hint()) {
        if len > config.max_file_size {
            log::debug!("Skipping {} ({} bytes over limit)", file.path, len);
            return None;
        }
    }

    let text = match file.read() {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Could not read {}: {}", file.path, e);
            return None;
        }
    };
    if text.len() as u64 > config.max_file_size {
        log::debug!("Skipping {} ({} bytes over limit)", file.path, text.len());
        return None;
    }

    let mut edges = Vec::new();
    for rule in rules {
        for raw in rule.references(&text) {
            let reference = rule.anchor(raw);
            match resolve_reference(
                &file.path,
                &reference,
                index,
                profile,
                catalogue.general_extensions(),
            ) {
                Some(target) => edges.push(DependencyEdge::new(file.path.clone(), target)),
                None => log::trace!("Unresolved '{}' in {}", raw, file.path),
            }
        }
    }
    Some(edges)
}

struct Tracker<'a> {
    total: usize,
    interval: usize,
    done: AtomicUsize,
    edges: AtomicUsize,
    progress: Option<&'a ProgressCallback>,
}

impl Tracker<'_> {
    fn record(&self, found: usize) {
        let edges = self.edges.fetch_add(found, Ordering::Relaxed) + found;
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if done % self.interval == 0 && done != self.total {
            self.emit(done, edges);
        }
    }

    fn finish(&self) {
        self.emit(
            self.done.load(Ordering::Relaxed),
            self.edges.load(Ordering::Relaxed),
        );
    }

    fn emit(&self, done: usize, edges: usize) {
        if let Some(cb) = self.progress {
            cb(&format!(
                "Scanned {}/{} files ({} references)",
                done, self.total, edges
            ));
        }
    }
}
