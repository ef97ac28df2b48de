//! Graph assembly properties.

mod common;

use common::*;
use hyphae_core::config::DependencyEdge;
use hyphae_core::graph::{FileIndex, SizePolicy};
use hyphae_core::phases::assembly::assemble_graph;
use hyphae_core::tree::FileNode;

fn index(paths: &[&str]) -> FileIndex {
    let mut idx = FileIndex::new();
    for p in paths {
        idx.insert(FileNode::in_memory(*p, ""));
    }
    idx
}

#[test]
fn one_link_per_pair_with_raw_count_weight() {
    let idx = index(&["a.py", "b.py"]);
    let edges = vec![DependencyEdge::new("a.py", "b.py"); 3];
    let graph = assemble_graph(&idx, &edges, &SizePolicy::default());
    assert_eq!(graph.links.len(), 1);
    assert_eq!(graph.links[0].weight, 3);
    assert_eq!(graph.node("b.py").unwrap().in_degree, 1);
}

#[test]
fn size_grows_with_in_degree_and_is_bounded() {
    let policy = SizePolicy::default();
    let mut paths: Vec<String> = (0..30).map(|i| format!("src/f{i:02}.ts")).collect();
    paths.push("src/hub.ts".to_string());
    let refs: Vec<&str> = paths.iter().map(String::as_str).collect();
    let idx = index(&refs);
    let edges: Vec<DependencyEdge> = (0..30)
        .map(|i| DependencyEdge::new(format!("src/f{i:02}.ts"), "src/hub.ts"))
        .chain((1..5).map(|i| DependencyEdge::new(format!("src/f{i:02}.ts"), "src/f00.ts")))
        .collect();
    let graph = assemble_graph(&idx, &edges, &policy);

    let hub = graph.node("src/hub.ts").unwrap();
    let f00 = graph.node("src/f00.ts").unwrap();
    let leaf = graph.node("src/f29.ts").unwrap();
    assert!(hub.size >= f00.size && f00.size > leaf.size);
    for node in &graph.nodes {
        assert!(node.size >= policy.base && node.size <= policy.max_size());
    }
    assert_eq!(hub.size, policy.max_size());
}

#[test]
fn no_dangling_links() {
    let idx = index(&["a.ts", "b.ts"]);
    let edges = vec![
        DependencyEdge::new("a.ts", "b.ts"),
        DependencyEdge::new("a.ts", "gone.ts"),
        DependencyEdge::new("ghost.ts", "b.ts"),
    ];
    let graph = assemble_graph(&idx, &edges, &SizePolicy::default());
    for link in &graph.links {
        assert!(graph.node(&link.source).is_some());
        assert!(graph.node(&link.target).is_some());
    }
    assert_eq!(graph.links.len(), 1);
}

#[test]
fn output_order_is_stable() {
    let idx = index(&["z.ts", "m/a.ts", "a.ts"]);
    let edges = vec![
        DependencyEdge::new("z.ts", "a.ts"),
        DependencyEdge::new("a.ts", "z.ts"),
        DependencyEdge::new("a.ts", "m/a.ts"),
    ];
    let graph = assemble_graph(&idx, &edges, &SizePolicy::default());
    let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["a.ts", "m/a.ts", "z.ts"]);
    let links: Vec<_> = graph
        .links
        .iter()
        .map(|l| (l.source.as_str(), l.target.as_str()))
        .collect();
    assert_eq!(
        links,
        vec![("a.ts", "m/a.ts"), ("a.ts", "z.ts"), ("z.ts", "a.ts")]
    );
    assert_eq!(graph.node("m/a.ts").unwrap().group, "m");
    assert_eq!(graph.node("a.ts").unwrap().group, "");
}

#[test]
fn graph_serialises_as_nodes_and_links() {
    let idx = index(&["a.ts", "b.ts"]);
    let graph = assemble_graph(
        &idx,
        &[DependencyEdge::new("a.ts", "b.ts")],
        &SizePolicy::default(),
    );
    let json = serde_json::to_value(&graph).unwrap();
    assert_eq!(json["nodes"][1]["id"], "b.ts");
    assert_eq!(json["nodes"][1]["name"], "b.ts");
    assert_eq!(json["nodes"][1]["size"], 7.0);
    assert_eq!(json["links"][0]["source"], "a.ts");
    assert_eq!(json["links"][0]["target"], "b.ts");
    assert_eq!(link_count(&json), 1);
}

fn link_count(json: &serde_json::Value) -> usize {
    json["links"].as_array().map(Vec::len).unwrap_or(0)
}

#[test]
fn scenario_typescript_app() {
    let result = run_fixture("ts_app");
    assert_eq!(
        link_pairs(&result),
        pairs(&[
            ("src/app.test.ts", "src/app.ts"),
            ("src/app.ts", "src/utils/format.ts"),
            ("src/index.ts", "src/app.ts"),
            ("src/index.ts", "src/utils/index.ts"),
            ("src/utils/index.ts", "src/utils/format.ts"),
        ])
    );
    let app = result.graph.node("src/app.ts").unwrap();
    assert_eq!(app.in_degree, 2);
    assert_eq!(app.size, 9.0);
    assert_eq!(result.graph.node("README.md").unwrap().size, 5.0);
}

#[test]
fn two_sources_twice_each_give_two_links() {
    let idx = index(&["a.ts", "b.ts", "x.ts"]);
    let edges = vec![
        DependencyEdge::new("a.ts", "x.ts"),
        DependencyEdge::new("a.ts", "x.ts"),
        DependencyEdge::new("b.ts", "x.ts"),
        DependencyEdge::new("b.ts", "x.ts"),
    ];
    let graph = assemble_graph(&idx, &edges, &SizePolicy::default());
    assert_eq!(graph.links.len(), 2);
    assert!(graph.links.iter().all(|l| l.weight == 2));
    assert_eq!(graph.node("x.ts").unwrap().in_degree, 2);
}

#[test]
fn scenario_index_and_test_both_import_app() {
    let tree = memory_tree(&[
        ("src/index.ts", "import { run } from './app';"),
        ("src/app.ts", ""),
        ("src/app.test.ts", "import './app';"),
    ]);
    let result =
        hyphae_core::pipeline::run_tree(tree, &hyphae_core::config::ScanConfig::default(), None)
            .unwrap();
    assert_eq!(
        link_pairs(&result),
        pairs(&[
            ("src/app.test.ts", "src/app.ts"),
            ("src/index.ts", "src/app.ts"),
        ])
    );
    assert_eq!(result.graph.node("src/app.ts").unwrap().in_degree, 2);
}

#[test]
fn scenario_external_package_leaves_isolated_node() {
    let tree = memory_tree(&[("src/main.ts", "import _ from 'lodash';")]);
    let result =
        hyphae_core::pipeline::run_tree(tree, &hyphae_core::config::ScanConfig::default(), None)
            .unwrap();
    assert!(result.graph.links.is_empty());
    assert_eq!(node_ids(&result), vec!["src/main.ts"]);
    assert_eq!(result.stats["isolated_files"], 1);
}

#[test]
fn scenario_directory_import_resolves_to_index() {
    let edges = extract(&[
        ("src/main.ts", "import { fmt } from './utils';"),
        ("src/utils/index.ts", ""),
    ]);
    assert_eq!(
        edge_pairs(&edges),
        pairs(&[("src/main.ts", "src/utils/index.ts")])
    );
}
