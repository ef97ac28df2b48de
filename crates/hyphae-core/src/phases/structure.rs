//! Structure phase: walk a directory on disk and build the file tree.

use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::error::{HyphaeError, Result};
use crate::languages::PatternCatalogue;
use crate::tree::{file_extension, DiskContent, FileNode, FileTree};

/// Default patterns to exclude from a scan.
const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "bower_components",
    "__pycache__",
    ".vs",
    ".vscode",
    ".idea",
    "bin",
    "obj",
    "dist",
    "build",
    "target",
    "packages",
    "vendor",
    "TestResults",
    ".mypy_cache",
    ".pytest_cache",
    ".tox",
    ".eggs",
    ".venv",
    "venv",
    ".env",
];

/// Suffix of files written by `hyphae analyze`; never part of a scan.
const OUTPUT_SUFFIX: &str = ".hyphae.json";

/// Walk `config.repo_path` and return a tree of every included file.
///
/// Each file leaf reads lazily from disk. Walk errors below the root are
/// logged and skipped.
pub fn build_tree_from_disk(config: &ScanConfig, catalogue: &PatternCatalogue) -> Result<FileTree> {
    let repo_path = Path::new(&config.repo_path);
    if !repo_path.is_dir() {
        return Err(HyphaeError::Io {
            path: repo_path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let exclude_patterns: Vec<&str> = DEFAULT_EXCLUDES
        .iter()
        .copied()
        .chain(config.exclude_patterns.iter().map(|s| s.as_str()))
        .collect();

    let mut files = Vec::new();
    for entry in WalkDir::new(repo_path)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            if exclude_patterns.iter().any(|p| name == *p) {
                return false;
            }
            !(e.file_type().is_dir() && name.starts_with('.'))
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let abs_path = entry.path();
        let rel_path = abs_path
            .strip_prefix(repo_path)
            .unwrap_or(abs_path)
            .to_string_lossy()
            .replace('\\', "/");
        if rel_path.is_empty() || rel_path.ends_with(OUTPUT_SUFFIX) {
            continue;
        }

        if config.languages.is_some() {
            let language = file_extension(&entry.file_name().to_string_lossy())
                .and_then(|ext| catalogue.language_for_extension(ext))
                .map(String::from);
            match language {
                Some(ref lang) if config.accepts_language(lang) => {}
                _ => continue,
            }
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        if size > config.max_file_size {
            log::debug!("Skipping {} ({} bytes over limit)", rel_path, size);
            continue;
        }

        files.push(FileNode::file(rel_path, DiskContent::new(abs_path)));
    }

    Ok(FileTree::from_files(files))
}
