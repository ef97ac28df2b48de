//! Content sources for file leaves.

use std::fmt::Debug;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Anything that can produce the text of a file on demand.
pub trait ContentSource: Debug + Send + Sync {
    fn read(&self) -> io::Result<String>;

    /// Size in bytes if it is known without reading.
    fn len_hint(&self) -> Option<u64> {
        None
    }
}

/// Live handle to a file on disk. Read lazily; invalid UTF-8 is replaced.
#[derive(Debug, Clone)]
pub struct DiskContent {
    path: PathBuf,
}

impl DiskContent {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentSource for DiskContent {
    fn read(&self) -> io::Result<String> {
        let bytes = std::fs::read(&self.path)?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }

    fn len_hint(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }
}

/// Text already held in memory.
#[derive(Debug, Clone)]
pub struct MemoryContent {
    text: Arc<str>,
}

impl MemoryContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Arc::from(text.into()),
        }
    }
}

impl ContentSource for MemoryContent {
    fn read(&self) -> io::Result<String> {
        Ok(self.text.to_string())
    }

    fn len_hint(&self) -> Option<u64> {
        Some(self.text.len() as u64)
    }
}
