//! Maximum Bipartite Matching via Unit-Capacity Flow
//!
//! The matching is read off a maximum flow: a super-source feeds every left
//! vertex, every right vertex drains into a super-sink, and every edge
//! carries capacity one. Original left-to-right edges that carry flow form
//! the matching. All synthetic vertices and edges are removed before
//! [`MaximumBipartiteMatching::compute`] returns.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashSet;

use log::debug;

use crate::algorithm::config::FlowConfig;
use crate::algorithm::graph::augmentor::GraphAugmentor;
use crate::algorithm::graph::error::FlowError;
use crate::algorithm::graph::max_flow::EdmondsKarpMaxFlow;
use crate::algorithm::graph::reversed_edges::ReversedEdgeAugmentor;
use crate::data_structures::graph::{GraphEdge, IncidenceGraph, MutableGraph};

/// Maximum cardinality matching between two vertex sets
pub struct MaximumBipartiteMatching<'g, G, VF, EF>
where
    G: MutableGraph,
    VF: FnMut() -> G::Vertex,
    EF: Fn(&G::Vertex, &G::Vertex) -> G::Edge,
{
    graph: &'g mut G,
    vertex_factory: VF,
    edge_factory: EF,
    config: FlowConfig,
    matched_edges: Vec<G::Edge>,
}

impl<'g, G, VF, EF> MaximumBipartiteMatching<'g, G, VF, EF>
where
    G: MutableGraph,
    VF: FnMut() -> G::Vertex,
    EF: Fn(&G::Vertex, &G::Vertex) -> G::Edge,
{
    pub fn new(graph: &'g mut G, vertex_factory: VF, edge_factory: EF) -> Self {
        Self {
            graph,
            vertex_factory,
            edge_factory,
            config: FlowConfig::default(),
            matched_edges: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: FlowConfig) -> Self {
        self.config = config;
        self
    }

    /// Matches `left` against `right` and returns the matched edges
    ///
    /// Only edges from a left vertex to a right vertex are eligible.
    pub fn compute(&mut self, left: &[G::Vertex], right: &[G::Vertex]) -> Result<&[G::Edge], FlowError> {
        self.matched_edges.clear();

        let left_set: HashSet<&G::Vertex> = left.iter().collect();
        let right_set: HashSet<&G::Vertex> = right.iter().collect();
        let candidates: Vec<G::Edge> = self
            .graph
            .edges()
            .filter(|edge| left_set.contains(edge.source()) && right_set.contains(edge.target()))
            .cloned()
            .collect();
        let mut unit_edges: HashSet<G::Edge> = candidates.iter().cloned().collect();

        let mut super_vertices = GraphAugmentor::bipartite(
            &mut *self.graph,
            left.to_vec(),
            right.to_vec(),
            &mut self.vertex_factory,
            &self.edge_factory,
        );
        super_vertices.compute()?;
        unit_edges.extend(super_vertices.augmented_edges().iter().cloned());
        let source = super_vertices
            .super_source()
            .cloned()
            .ok_or(FlowError::MissingSource)?;
        let sink = super_vertices
            .super_sink()
            .cloned()
            .ok_or(FlowError::MissingSink)?;

        let (size, matched) = {
            let mut reversed = ReversedEdgeAugmentor::new(super_vertices.graph_mut(), &self.edge_factory);
            reversed.add_reversed_edges()?;
            let result = {
                let mut solver = EdmondsKarpMaxFlow::new(&reversed, |edge: &G::Edge| {
                    if unit_edges.contains(edge) {
                        1.0
                    } else {
                        0.0
                    }
                })
                .with_config(self.config.clone());
                let size = solver.compute_between(source, sink)?;
                let matched: Vec<G::Edge> = candidates
                    .iter()
                    .filter(|edge| solver.flow(edge) > 0.0)
                    .cloned()
                    .collect();
                (size, matched)
            };
            reversed.remove_reversed_edges()?;
            result
        };
        super_vertices.rollback();

        debug!("Bipartite matching of size {} ({} candidate edges)", size, candidates.len());
        self.matched_edges = matched;
        Ok(&self.matched_edges)
    }

    /// Edges matched by the last successful compute
    pub fn matched_edges(&self) -> &[G::Edge] {
        &self.matched_edges
    }

    pub fn size(&self) -> usize {
        self.matched_edges.len()
    }

    pub fn graph(&self) -> &G {
        &*self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::graph::{AdjacencyGraph, Edge};

    fn vertex_factory() -> impl FnMut() -> u32 {
        let mut next = 100;
        move || {
            next += 1;
            next
        }
    }

    fn edge_factory(source: &u32, target: &u32) -> Edge<u32> {
        Edge::new(*source, *target)
    }

    #[test]
    fn test_perfect_matching_needs_augmenting_reversal() {
        // Greedy 1-10 would leave 2 unmatched
        let mut graph = AdjacencyGraph::from_edges(vec![
            Edge::new(1, 10),
            Edge::new(1, 11),
            Edge::new(2, 10),
            Edge::new(3, 11),
            Edge::new(3, 12),
        ]);
        let mut matching = MaximumBipartiteMatching::new(&mut graph, vertex_factory(), edge_factory);
        let matched = matching.compute(&[1, 2, 3], &[10, 11, 12]).unwrap().to_vec();

        assert_eq!(matched.len(), 3);
        let lefts: HashSet<u32> = matched.iter().map(|e| e.source).collect();
        let rights: HashSet<u32> = matched.iter().map(|e| e.target).collect();
        assert_eq!(lefts.len(), 3);
        assert_eq!(rights.len(), 3);
        assert!(matched.contains(&Edge::new(2, 10)));
        assert!(matched.contains(&Edge::new(1, 11)));
        assert!(matched.contains(&Edge::new(3, 12)));

        assert_eq!(matching.graph().vertex_count(), 6);
        assert_eq!(matching.graph().edge_count(), 5);
    }

    #[test]
    fn test_contended_right_vertex() {
        let mut graph = AdjacencyGraph::from_edges(vec![Edge::new(1, 10), Edge::new(2, 10)]);
        let mut matching = MaximumBipartiteMatching::new(&mut graph, vertex_factory(), edge_factory);
        matching.compute(&[1, 2], &[10]).unwrap();
        assert_eq!(matching.size(), 1);
    }

    #[test]
    fn test_edges_outside_the_bipartition_are_ignored() {
        let mut graph = AdjacencyGraph::from_edges(vec![
            Edge::new(1, 10),
            Edge::new(10, 2),
            Edge::new(2, 1),
        ]);
        let mut matching = MaximumBipartiteMatching::new(&mut graph, vertex_factory(), edge_factory);
        let matched = matching.compute(&[1, 2], &[10]).unwrap();
        assert_eq!(matched, &[Edge::new(1, 10)]);
    }

    #[test]
    fn test_unknown_vertex_leaves_graph_clean() {
        let mut graph = AdjacencyGraph::from_edges(vec![Edge::new(1, 10)]);
        {
            let mut matching = MaximumBipartiteMatching::new(&mut graph, vertex_factory(), edge_factory);
            assert_eq!(
                matching.compute(&[1, 7], &[10]),
                Err(FlowError::VertexNotFound("7".to_string()))
            );
            assert!(matching.matched_edges().is_empty());
        }
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }
}
