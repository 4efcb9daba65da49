//! Flow network augmentation and maximum flow
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod augmentor;
pub mod balancer;
pub mod error;
pub mod matching;
pub mod max_flow;
pub mod reversed_edges;

pub use self::augmentor::{
    AllVertices, AllVerticesAugmentor, AugmentationStrategy, Bipartite, BipartiteAugmentor,
    GraphAugmentor,
};
pub use self::balancer::GraphBalancer;
pub use self::error::FlowError;
pub use self::matching::MaximumBipartiteMatching;
pub use self::max_flow::{Capacity, EdmondsKarpMaxFlow, Flow, FlowMetrics, FlowPath};
pub use self::reversed_edges::{unpaired_edges, ReversedEdgeAugmentor, ReversedEdges};
