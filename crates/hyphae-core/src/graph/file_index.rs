//! Path-to-file index used during reference resolution.

use std::collections::{BTreeMap, HashMap};

use crate::tree::{base_name, FileNode, FileTree};

/// Every file leaf of a tree, keyed by path in lexicographic order.
///
/// Built once per scan and read-only afterwards.
#[derive(Debug, Default)]
pub struct FileIndex {
    files: BTreeMap<String, FileNode>,
    /// base name → paths (sorted) sharing it, for suffix scans.
    by_name: HashMap<String, Vec<String>>,
}

impl FileIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tree(tree: &FileTree) -> Self {
        let mut index = Self::new();
        for file in tree.files() {
            index.insert(file.clone());
        }
        index
    }

    pub fn insert(&mut self, node: FileNode) {
        let name = base_name(&node.path).to_string();
        let paths = self.by_name.entry(name).or_default();
        if let Err(pos) = paths.binary_search(&node.path) {
            paths.insert(pos, node.path.clone());
        }
        self.files.insert(node.path.clone(), node);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<&FileNode> {
        self.files.get(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paths in lexicographic order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|k| k.as_str())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &FileNode> {
        self.files.values()
    }

    /// First path (lexicographically) equal to `suffix` or ending with
    /// `/` + `suffix`. A match never starts mid-segment.
    pub fn find_suffix(&self, suffix: &str) -> Option<&str> {
        let suffix = suffix.trim_start_matches('/');
        if suffix.is_empty() || suffix.ends_with('/') {
            return None;
        }
        self.by_name
            .get(base_name(suffix))?
            .iter()
            .find(|path| ends_at_segment(path, suffix))
            .map(|p| p.as_str())
    }
}

fn ends_at_segment(path: &str, suffix: &str) -> bool {
    match path.strip_suffix(suffix) {
        Some("") => true,
        Some(rest) => rest.ends_with('/'),
        None => false,
    }
}
