//! Graph capability contract and reference adjacency-list graph
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod graph;

pub use self::graph::{
    AdjacencyGraph, BidirectionalGraph, Edge, GraphEdge, IncidenceGraph, MutableGraph, TaggedEdge,
};
