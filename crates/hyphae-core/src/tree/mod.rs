//! In-memory file tree handed to the extraction phase.
//!
//! The tree is built once by whichever collaborator acquired the files (the
//! disk walker, a JSON manifest, or test code) and is never mutated afterwards.

pub mod content;
pub mod manifest;

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::io;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{HyphaeError, Result};

pub use content::{ContentSource, DiskContent, MemoryContent};

/// Whether a node is a file leaf or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Directory,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the source tree.
#[derive(Debug, Clone)]
pub struct FileNode {
    /// Full `/`-separated path from the tree root.
    pub path: String,
    pub name: String,
    pub kind: FileKind,
    pub children: Option<Vec<FileNode>>,
    pub content: Option<Arc<dyn ContentSource>>,
}

impl FileNode {
    /// A file leaf backed by the given content source.
    pub fn file(path: impl Into<String>, content: impl ContentSource + 'static) -> Self {
        let path = path.into();
        Self {
            name: base_name(&path).to_string(),
            path,
            kind: FileKind::File,
            children: None,
            content: Some(Arc::new(content)),
        }
    }

    /// A file leaf whose content is held in memory.
    pub fn in_memory(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self::file(path, MemoryContent::new(text))
    }

    pub fn directory(path: impl Into<String>, children: Vec<FileNode>) -> Self {
        let path = path.into();
        Self {
            name: base_name(&path).to_string(),
            path,
            kind: FileKind::Directory,
            children: Some(children),
            content: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }

    /// Lower-cased extension of the base name, if any.
    pub fn extension(&self) -> Option<String> {
        file_extension(&self.name).map(|e| e.to_ascii_lowercase())
    }

    /// Containing directory path; empty for entries at the root.
    pub fn parent_dir(&self) -> &str {
        parent_dir(&self.path)
    }

    /// Read the file's text through its content source.
    pub fn read(&self) -> io::Result<String> {
        match self.content {
            Some(ref source) => source.read(),
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' is a {} and has no content", self.path, self.kind),
            )),
        }
    }
}

/// An ordered forest of file nodes.
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    pub roots: Vec<FileNode>,
}

impl FileTree {
    pub fn new(roots: Vec<FileNode>) -> Self {
        Self { roots }
    }

    /// Build the directory hierarchy for a flat list of file leaves.
    ///
    /// Intermediate directories are synthesised and children are ordered by
    /// name, so the same set of files always yields the same tree.
    pub fn from_files(files: Vec<FileNode>) -> Self {
        let mut root = DirBuilder::default();
        for file in files {
            let segments: Vec<String> = file.path.split('/').map(String::from).collect();
            root.insert(&segments, file);
        }
        Self {
            roots: root.into_children(""),
        }
    }

    /// Check the structural invariants of every node.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for root in &self.roots {
            validate_node(root, None, &mut seen)?;
        }
        Ok(())
    }

    /// File leaves in depth-first tree order. Directories are never returned.
    pub fn files(&self) -> Vec<&FileNode> {
        let mut out = Vec::new();
        let mut stack: Vec<&FileNode> = self.roots.iter().rev().collect();
        while let Some(node) = stack.pop() {
            match node.kind {
                FileKind::File => out.push(node),
                FileKind::Directory => {
                    if let Some(ref children) = node.children {
                        stack.extend(children.iter().rev());
                    }
                }
            }
        }
        out
    }

    pub fn file_count(&self) -> usize {
        self.files().len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

fn validate_node<'a>(
    node: &'a FileNode,
    parent: Option<&FileNode>,
    seen: &mut HashSet<&'a str>,
) -> Result<()> {
    if node.path.is_empty() {
        let at = parent.map(|p| p.path.as_str()).unwrap_or("<root>");
        return Err(HyphaeError::malformed(at, "entry with an empty path"));
    }
    if node.path.contains('\\') {
        return Err(HyphaeError::malformed(
            &node.path,
            "path must use '/' separators",
        ));
    }
    if node.path.starts_with('/') || node.path.ends_with('/') {
        return Err(HyphaeError::malformed(
            &node.path,
            "path must not start or end with '/'",
        ));
    }
    if node.name != base_name(&node.path) {
        return Err(HyphaeError::malformed(
            &node.path,
            format!("name '{}' does not match the path", node.name),
        ));
    }
    if let Some(parent) = parent {
        let prefix = format!("{}/", parent.path);
        if !node.path.starts_with(&prefix) {
            return Err(HyphaeError::malformed(
                &node.path,
                format!("not nested under parent directory '{}'", parent.path),
            ));
        }
    }
    if !seen.insert(node.path.as_str()) {
        return Err(HyphaeError::malformed(&node.path, "duplicate path"));
    }

    match node.kind {
        FileKind::File => {
            if node.children.is_some() {
                return Err(HyphaeError::malformed(&node.path, "file has children"));
            }
            if node.content.is_none() {
                return Err(HyphaeError::malformed(
                    &node.path,
                    "file has no content handle",
                ));
            }
        }
        FileKind::Directory => {
            if node.content.is_some() {
                return Err(HyphaeError::malformed(
                    &node.path,
                    "directory has a content handle",
                ));
            }
            let children = node.children.as_ref().ok_or_else(|| {
                HyphaeError::malformed(&node.path, "directory has no children list")
            })?;
            for child in children {
                validate_node(child, Some(node), seen)?;
            }
        }
    }
    Ok(())
}

#[derive(Default)]
struct DirBuilder {
    dirs: BTreeMap<String, DirBuilder>,
    files: BTreeMap<String, FileNode>,
}

impl DirBuilder {
    fn insert(&mut self, segments: &[String], file: FileNode) {
        match segments {
            [] => {}
            [_] => {
                self.files.insert(file.name.clone(), file);
            }
            [dir, rest @ ..] => self.dirs.entry(dir.clone()).or_default().insert(rest, file),
        }
    }

    fn into_children(self, prefix: &str) -> Vec<FileNode> {
        let mut entries: Vec<(String, FileNode)> = Vec::new();
        for (name, builder) in self.dirs {
            let path = join_path(prefix, &name);
            let children = builder.into_children(&path);
            entries.push((name, FileNode::directory(path, children)));
        }
        entries.extend(self.files);
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.into_iter().map(|(_, node)| node).collect()
    }
}

/// Last `/`-separated segment of a path.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Everything before the last `/`, or empty for root-level entries.
pub fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Extension of a base name. Dotfiles such as `.bashrc` have none.
pub fn file_extension(name: &str) -> Option<&str> {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}

pub(crate) fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}
