//! JSON tree manifests.
//!
//! A manifest describes a file tree without requiring it to exist on disk:
//!
//! ```json
//! [
//!   { "path": "src", "kind": "directory", "children": [
//!     { "path": "src/index.ts", "kind": "file", "content": "import './app'" },
//!     { "path": "src/app.ts", "kind": "file", "source": "checkout/src/app.ts" }
//!   ]}
//! ]
//! ```
//!
//! `content` is inline text; `source` is a disk path relative to the manifest.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{base_name, DiskContent, FileKind, FileNode, FileTree, MemoryContent};
use crate::error::{HyphaeError, Result};

/// Serialised form of one tree entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: String,
    #[serde(default)]
    pub name: Option<String>,
    pub kind: FileKind,
    #[serde(default)]
    pub children: Option<Vec<ManifestEntry>>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Parse a manifest from JSON text. Disk sources resolve against `base_dir`.
pub fn parse_manifest(json: &str, base_dir: &Path) -> Result<FileTree> {
    let entries: Vec<ManifestEntry> = serde_json::from_str(json)?;
    let roots = entries
        .into_iter()
        .map(|e| convert(e, base_dir))
        .collect::<Result<Vec<_>>>()?;
    let tree = FileTree::new(roots);
    tree.validate()?;
    Ok(tree)
}

/// Load and validate a manifest file.
pub fn load_manifest(path: &Path) -> Result<FileTree> {
    let json = std::fs::read_to_string(path).map_err(|source| HyphaeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or(Path::new(""));
    parse_manifest(&json, base_dir)
}

fn convert(entry: ManifestEntry, base_dir: &Path) -> Result<FileNode> {
    let path = entry.path.replace('\\', "/");
    let name = entry.name.unwrap_or_else(|| base_name(&path).to_string());

    match entry.kind {
        FileKind::File => {
            if entry.children.is_some() {
                return Err(HyphaeError::malformed(&path, "file entry has children"));
            }
            let mut node = match (entry.content, entry.source) {
                (Some(text), None) => FileNode::file(path, MemoryContent::new(text)),
                (None, Some(source)) => FileNode::file(path, DiskContent::new(base_dir.join(source))),
                (Some(_), Some(_)) => {
                    return Err(HyphaeError::malformed(
                        &path,
                        "file entry has both 'content' and 'source'",
                    ))
                }
                (None, None) => {
                    return Err(HyphaeError::malformed(
                        &path,
                        "file entry needs 'content' or 'source'",
                    ))
                }
            };
            node.name = name;
            Ok(node)
        }
        FileKind::Directory => {
            if entry.content.is_some() || entry.source.is_some() {
                return Err(HyphaeError::malformed(
                    &path,
                    "directory entry has content",
                ));
            }
            let children = entry
                .children
                .unwrap_or_default()
                .into_iter()
                .map(|c| convert(c, base_dir))
                .collect::<Result<Vec<_>>>()?;
            let mut node = FileNode::directory(path, children);
            node.name = name;
            Ok(node)
        }
    }
}
