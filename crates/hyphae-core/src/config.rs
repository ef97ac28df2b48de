//! Core data types and configuration for Hyphae scans.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::graph::SizePolicy;

/// A resolved reference from one file to another.
///
/// The extraction phase emits one edge per match, so duplicates are expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub source: String,
    pub target: String,
}

impl DependencyEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Configuration for a scan run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub repo_path: String,
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default = "default_node_base_size")]
    pub node_base_size: f64,
    #[serde(default = "default_node_size_factor")]
    pub node_size_factor: f64,
    #[serde(default = "default_node_size_cap")]
    pub node_size_cap: f64,
}

fn default_max_file_size() -> u64 {
    1_000_000
}
fn default_progress_interval() -> usize {
    10
}
fn default_parallel() -> bool {
    true
}
fn default_node_base_size() -> f64 {
    5.0
}
fn default_node_size_factor() -> f64 {
    2.0
}
fn default_node_size_cap() -> f64 {
    20.0
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            repo_path: String::new(),
            languages: None,
            exclude_patterns: Vec::new(),
            max_file_size: default_max_file_size(),
            progress_interval: default_progress_interval(),
            parallel: default_parallel(),
            node_base_size: default_node_base_size(),
            node_size_factor: default_node_size_factor(),
            node_size_cap: default_node_size_cap(),
        }
    }
}

impl ScanConfig {
    /// Node sizing derived from the configured base, factor and cap.
    pub fn size_policy(&self) -> SizePolicy {
        SizePolicy {
            base: self.node_base_size,
            factor: self.node_size_factor,
            cap: self.node_size_cap,
        }
    }

    /// Whether a language passes the optional language filter.
    pub fn accepts_language(&self, language: &str) -> bool {
        match self.languages {
            Some(ref filter) => filter.iter().any(|f| f.eq_ignore_ascii_case(language)),
            None => true,
        }
    }
}

/// A file node as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeOutput {
    pub id: String,
    pub name: String,
    /// Containing directory, `/`-delimited. Empty for files at the root.
    pub group: String,
    pub size: f64,
    #[serde(default)]
    pub in_degree: usize,
}

/// A deduplicated link between two known nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkOutput {
    pub source: String,
    pub target: String,
    /// How many raw matches collapsed into this link.
    #[serde(default = "default_weight")]
    pub weight: usize,
}

fn default_weight() -> usize {
    1
}

/// The dependency graph consumed by the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphOutput {
    #[serde(default)]
    pub nodes: Vec<NodeOutput>,
    #[serde(default)]
    pub links: Vec<LinkOutput>,
}

impl GraphOutput {
    pub fn node(&self, id: &str) -> Option<&NodeOutput> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn has_link(&self, source: &str, target: &str) -> bool {
        self.links
            .iter()
            .any(|l| l.source == source && l.target == target)
    }
}

/// Result of a scan run, in the shape of the JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub stats: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub graph: GraphOutput,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for ScanResult {
    fn default() -> Self {
        Self {
            version: default_version(),
            metadata: HashMap::new(),
            stats: HashMap::new(),
            graph: GraphOutput::default(),
        }
    }
}
