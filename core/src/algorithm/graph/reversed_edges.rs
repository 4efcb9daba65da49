//! Reverse-edge augmentation of a caller-owned graph
//!
//! Residual flow algorithms need, for every edge `(u, v)`, an edge `(v, u)`
//! along which pushed flow can later be cancelled. [`ReversedEdgeAugmentor`]
//! completes a graph in place: an opposite edge that already exists is
//! adopted as the reverse, otherwise one is minted through the edge factory
//! and inserted. The correspondence is kept in [`ReversedEdges`], a
//! bidirectional map whose lookups satisfy `reverse(reverse(e)) == e`.
//!
//! The augmentation is scoped: [`ReversedEdgeAugmentor::remove_reversed_edges`]
//! deletes exactly the edges that were minted, and dropping a still-augmented
//! augmentor performs the same removal.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::hash_map;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use log::{debug, warn};

use crate::algorithm::events::{EventHandlers, HandlerId};
use crate::algorithm::graph::error::FlowError;
use crate::algorithm::traits::{Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmParameter};
use crate::data_structures::graph::{GraphEdge, IncidenceGraph, MutableGraph};

/// Two-way edge to reverse-edge correspondence
///
/// `forward` maps each edge that was paired first to its reverse and
/// `backward` maps the reverse back. A self-loop is its own reverse and
/// appears in both maps.
#[derive(Debug, Clone)]
pub struct ReversedEdges<E> {
    forward: HashMap<E, E>,
    backward: HashMap<E, E>,
}

impl<E: Clone + Eq + Hash> ReversedEdges<E> {
    pub fn new() -> Self {
        Self {
            forward: HashMap::new(),
            backward: HashMap::new(),
        }
    }

    /// The reverse of `edge`, looked up in either direction
    pub fn get(&self, edge: &E) -> Option<&E> {
        self.forward.get(edge).or_else(|| self.backward.get(edge))
    }

    pub fn contains(&self, edge: &E) -> bool {
        self.forward.contains_key(edge) || self.backward.contains_key(edge)
    }

    /// Number of edge/reverse pairs
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterates `(edge, reverse)` pairs, each pair once
    pub fn pairs(&self) -> hash_map::Iter<'_, E, E> {
        self.forward.iter()
    }

    fn pair(&mut self, edge: E, reverse: E) {
        self.forward.insert(edge.clone(), reverse.clone());
        self.backward.insert(reverse, edge);
    }

    fn clear(&mut self) {
        self.forward.clear();
        self.backward.clear();
    }
}

impl<E: Clone + Eq + Hash> Default for ReversedEdges<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Inserts and later removes the reverse edges of a graph
pub struct ReversedEdgeAugmentor<'g, G, F>
where
    G: MutableGraph,
    F: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    graph: &'g mut G,
    edge_factory: F,
    reversed_edges: ReversedEdges<G::Edge>,
    augmented_edges: Vec<G::Edge>,
    augmented: bool,
    reversed_edge_added: EventHandlers<G::Edge>,
}

impl<'g, G, F> ReversedEdgeAugmentor<'g, G, F>
where
    G: MutableGraph,
    F: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    pub fn new(graph: &'g mut G, edge_factory: F) -> Self {
        Self {
            graph,
            edge_factory,
            reversed_edges: ReversedEdges::new(),
            augmented_edges: Vec::new(),
            augmented: false,
            reversed_edge_added: EventHandlers::new(),
        }
    }

    /// Completes the graph so every edge has a mapped reverse
    pub fn add_reversed_edges(&mut self) -> Result<(), FlowError> {
        if self.augmented {
            return Err(FlowError::AlreadyAugmented);
        }

        let edges: Vec<G::Edge> = self.graph.edges().cloned().collect();
        let mut unpaired = Vec::new();
        for edge in edges {
            if self.reversed_edges.contains(&edge) {
                continue;
            }
            if edge.is_self_loop() {
                self.reversed_edges.pair(edge.clone(), edge);
                continue;
            }
            match self.find_unpaired_reverse(&edge) {
                Some(existing) => self.reversed_edges.pair(edge, existing),
                None => unpaired.push(edge),
            }
        }

        for edge in unpaired {
            let reversed = (self.edge_factory)(edge.target(), edge.source());
            if !self.graph.add_edge(reversed.clone()) {
                self.discard_partial_augmentation();
                return Err(FlowError::edge_rejected(&reversed));
            }
            self.augmented_edges.push(reversed.clone());
            self.reversed_edges.pair(edge, reversed.clone());
            self.reversed_edge_added.emit(&reversed);
        }

        self.augmented = true;
        debug!(
            "Reverse-edge augmentation: {} pairs, {} synthetic edges added",
            self.reversed_edges.len(),
            self.augmented_edges.len()
        );
        Ok(())
    }

    /// Removes the synthetic reverse edges and forgets the correspondence
    pub fn remove_reversed_edges(&mut self) -> Result<(), FlowError> {
        if !self.augmented {
            return Err(FlowError::NotAugmented);
        }
        let removed = self.augmented_edges.len();
        self.discard_partial_augmentation();
        self.augmented = false;
        debug!("Reverse-edge augmentation rolled back: {} edges removed", removed);
        Ok(())
    }

    pub fn is_augmented(&self) -> bool {
        self.augmented
    }

    pub fn graph(&self) -> &G {
        &*self.graph
    }

    pub fn reversed_edges(&self) -> &ReversedEdges<G::Edge> {
        &self.reversed_edges
    }

    /// Synthetic edges added by this augmentor, in insertion order
    pub fn augmented_edges(&self) -> &[G::Edge] {
        &self.augmented_edges
    }

    pub fn is_augmented_edge(&self, edge: &G::Edge) -> bool {
        self.augmented_edges.contains(edge)
    }

    pub fn on_reversed_edge_added<H>(&mut self, handler: H) -> HandlerId
    where
        H: FnMut(&G::Edge) + 'static,
    {
        self.reversed_edge_added.subscribe(handler)
    }

    /// Opposite edge of `edge` not yet claimed by another pair
    fn find_unpaired_reverse(&self, edge: &G::Edge) -> Option<G::Edge> {
        self.graph
            .out_edges(edge.target())
            .iter()
            .find(|candidate| {
                candidate.target() == edge.source()
                    && *candidate != edge
                    && !self.reversed_edges.contains(candidate)
            })
            .cloned()
    }

    fn discard_partial_augmentation(&mut self) {
        for edge in self.augmented_edges.drain(..) {
            self.graph.remove_edge(&edge);
        }
        self.reversed_edges.clear();
    }
}

impl<'g, G, F> Drop for ReversedEdgeAugmentor<'g, G, F>
where
    G: MutableGraph,
    F: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    fn drop(&mut self) {
        if self.augmented {
            warn!("Reverse-edge augmentor dropped while augmented; removing synthetic edges");
            if let Err(e) = self.remove_reversed_edges() {
                warn!("Reverse-edge rollback on drop failed: {}", e);
            }
        }
    }
}

impl<'g, G, F> fmt::Debug for ReversedEdgeAugmentor<'g, G, F>
where
    G: MutableGraph,
    F: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReversedEdgeAugmentor")
            .field("augmented", &self.augmented)
            .field("pairs", &self.reversed_edges.len())
            .field("augmented_edges", &self.augmented_edges)
            .finish()
    }
}

impl<'g, G, F> Algorithm for ReversedEdgeAugmentor<'g, G, F>
where
    G: MutableGraph,
    F: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    fn name(&self) -> &'static str {
        "Reversed Edge Augmentor"
    }

    fn category(&self) -> &'static str {
        "augmentation"
    }

    fn description(&self) -> String {
        "Completes a directed graph with a zero-capacity reverse edge for every edge, \
         reusing existing opposite edges, so residual flow can be cancelled."
            .to_string()
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O(E * d_max)", "O(E)")
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        Vec::new()
    }

    fn set_parameter(&mut self, name: &str, _value: &str) -> Result<(), AlgorithmError> {
        Err(AlgorithmError::UnknownParameter(name.to_string()))
    }
}

/// Edges of `graph` that have no mapped reverse in `reversed`
pub fn unpaired_edges<G>(graph: &G, reversed: &ReversedEdges<G::Edge>) -> HashSet<G::Edge>
where
    G: IncidenceGraph,
{
    graph
        .edges()
        .filter(|edge| !reversed.contains(edge))
        .cloned()
        .collect()
}
