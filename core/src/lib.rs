//! Graphflow Core
//!
//! Maximum flow over caller-owned directed graphs. The crate never copies a
//! graph: augmentors insert synthetic vertices and edges into the caller's
//! graph, algorithms run on it, and every augmentation is rolled back
//! afterwards (explicitly, or on drop).
//!
//! - [`ReversedEdgeAugmentor`] completes a graph with reverse edges
//! - [`GraphAugmentor`] adds a super-source and super-sink, wired to every
//!   vertex or to two chosen vertex sets
//! - [`EdmondsKarpMaxFlow`] computes a maximum flow with shortest augmenting
//!   paths
//! - [`GraphBalancer`] routes lower-bound imbalances through a balancing
//!   source and sink
//! - [`MaximumBipartiteMatching`] composes the above with unit capacities
//!
//! ```
//! use std::collections::HashMap;
//! use graphflow_core::{AdjacencyGraph, Edge, EdmondsKarpMaxFlow, ReversedEdgeAugmentor};
//!
//! let mut graph = AdjacencyGraph::from_edges(vec![Edge::new('s', 'a'), Edge::new('a', 't')]);
//! let capacities: HashMap<Edge<char>, f64> =
//!     [(Edge::new('s', 'a'), 2.0), (Edge::new('a', 't'), 1.0)].into_iter().collect();
//!
//! let mut reversed = ReversedEdgeAugmentor::new(&mut graph, |s: &char, t: &char| Edge::new(*s, *t));
//! reversed.add_reversed_edges().unwrap();
//! let mut solver = EdmondsKarpMaxFlow::new(&reversed, |e: &Edge<char>| {
//!     capacities.get(e).copied().unwrap_or(0.0)
//! });
//! assert_eq!(solver.compute_between('s', 't'), Ok(1.0));
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;

pub use algorithm::{
    AllVertices, AllVerticesAugmentor, AugmentationStrategy, Bipartite, BipartiteAugmentor,
    EdmondsKarpMaxFlow, FlowConfig, FlowError, FlowMetrics, GraphAugmentor, GraphBalancer,
    MaximumBipartiteMatching, ReversedEdgeAugmentor, ReversedEdges, VertexColor,
};
pub use data_structures::{
    AdjacencyGraph, BidirectionalGraph, Edge, GraphEdge, IncidenceGraph, MutableGraph, TaggedEdge,
};
