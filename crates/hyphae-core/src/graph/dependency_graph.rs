//! File dependency graph backed by petgraph::DiGraph.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use crate::tree::{base_name, parent_dir};

/// Node sizing: `base + min(cap, in_degree * factor)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizePolicy {
    pub base: f64,
    pub factor: f64,
    pub cap: f64,
}

impl SizePolicy {
    pub fn size_for(&self, in_degree: usize) -> f64 {
        self.base + (in_degree as f64 * self.factor).min(self.cap)
    }

    pub fn max_size(&self) -> f64 {
        self.base + self.cap
    }
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self {
            base: 5.0,
            factor: 2.0,
            cap: 20.0,
        }
    }
}

/// Node data stored in the graph.
#[derive(Debug, Clone)]
pub struct FileVertex {
    pub path: String,
    pub name: String,
    pub group: String,
}

/// Directed graph of files; parallel references collapse into one weighted edge.
pub struct DependencyGraph {
    graph: DiGraph<FileVertex, usize>,
    /// O(1) path → NodeIndex lookup.
    id_index: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            id_index: HashMap::new(),
        }
    }

    /// Get or create the node for a file path.
    pub fn add_file(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.id_index.get(path) {
            return idx;
        }
        let idx = self.graph.add_node(FileVertex {
            path: path.to_string(),
            name: base_name(path).to_string(),
            group: parent_dir(path).to_string(),
        });
        self.id_index.insert(path.to_string(), idx);
        idx
    }

    /// Record one reference. Returns `false` (and records nothing) when either
    /// endpoint is not a known file.
    pub fn add_reference(&mut self, source: &str, target: &str) -> bool {
        let (Some(&from), Some(&to)) = (self.id_index.get(source), self.id_index.get(target))
        else {
            return false;
        };
        match self.graph.find_edge(from, to) {
            Some(edge) => {
                if let Some(weight) = self.graph.edge_weight_mut(edge) {
                    *weight += 1;
                }
            }
            None => {
                self.graph.add_edge(from, to, 1);
            }
        }
        true
    }

    /// Number of distinct files referencing `path`.
    pub fn in_degree(&self, path: &str) -> usize {
        self.id_index
            .get(path)
            .map(|&idx| self.graph.edges_directed(idx, Direction::Incoming).count())
            .unwrap_or(0)
    }

    pub fn out_degree(&self, path: &str) -> usize {
        self.id_index
            .get(path)
            .map(|&idx| self.graph.edges_directed(idx, Direction::Outgoing).count())
            .unwrap_or(0)
    }

    pub fn file_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn files(&self) -> impl Iterator<Item = &FileVertex> {
        self.graph.node_weights()
    }

    /// All links as `(source, target, weight)`.
    pub fn links(&self) -> Vec<(String, String, usize)> {
        self.graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].path.clone(),
                    self.graph[e.target()].path.clone(),
                    *e.weight(),
                )
            })
            .collect()
    }

    /// Files with neither incoming nor outgoing links.
    pub fn isolated_count(&self) -> usize {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors_undirected(idx).next().is_none())
            .count()
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
