//! Assembly phase: collapse raw edges into the node/link graph.

use crate::config::{DependencyEdge, GraphOutput, LinkOutput, NodeOutput};
use crate::graph::{DependencyGraph, FileIndex, SizePolicy};

/// Build the node/link graph for every indexed file.
pub fn assemble_graph(
    index: &FileIndex,
    edges: &[DependencyEdge],
    policy: &SizePolicy,
) -> GraphOutput {
    graph_output(&build_graph(index, edges), policy)
}

/// One vertex per indexed file, one weighted edge per distinct pair.
/// Edges naming an unknown file are dropped.
pub fn build_graph(index: &FileIndex, edges: &[DependencyEdge]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for path in index.paths() {
        graph.add_file(path);
    }
    for edge in edges {
        if !graph.add_reference(&edge.source, &edge.target) {
            log::debug!(
                "Dropping dangling edge {} -> {}",
                edge.source,
                edge.target
            );
        }
    }
    graph
}

/// Render nodes in path order and links in (source, target) order.
pub fn graph_output(graph: &DependencyGraph, policy: &SizePolicy) -> GraphOutput {
    let mut nodes: Vec<NodeOutput> = graph
        .files()
        .map(|file| {
            let in_degree = graph.in_degree(&file.path);
            NodeOutput {
                id: file.path.clone(),
                name: file.name.clone(),
                group: file.group.clone(),
                size: policy.size_for(in_degree),
                in_degree,
            }
        })
        .collect();
    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    let mut links: Vec<LinkOutput> = graph
        .links()
        .into_iter()
        .map(|(source, target, weight)| LinkOutput {
            source,
            target,
            weight,
        })
        .collect();
    links.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));

    GraphOutput { nodes, links }
}
