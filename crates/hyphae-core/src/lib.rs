//! Hyphae Core: heuristic file dependency extraction.
//!
//! This crate holds the whole engine: the in-memory file tree, the
//! per-language pattern catalogue, reference resolution, parallel extraction
//! and assembly of the node/link graph handed to a renderer.

pub mod config;
pub mod error;
pub mod graph;
pub mod languages;
pub mod output;
pub mod phases;
pub mod pipeline;
pub mod tree;
