//! Mutable incidence graph contract and adjacency-list implementation
//!
//! The flow engine never owns graph storage: it mutates a caller-owned graph
//! through the capability traits defined here. [`IncidenceGraph`] gives
//! read access (vertex/edge enumeration, out-edges, existence checks),
//! [`BidirectionalGraph`] adds in-edges and [`MutableGraph`] adds insertion
//! and removal. Vertex and edge identity is the host type's `Eq`/`Hash`.
//!
//! [`AdjacencyGraph`] is the reference implementation: out- and in-adjacency
//! lists keyed by vertex, insertion-ordered vertex enumeration and
//! synchronous add/remove notifications.
//!
//! # Complexity
//! - `add_vertex`, `add_edge`: O(1) amortized (O(deg) when parallel edges
//!   are rejected)
//! - `remove_edge`: O(deg)
//! - `remove_vertex`: O(V + deg) because of the ordered vertex list
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::algorithm::events::{EventHandlers, HandlerId};

/// Directed edge between two vertices
pub trait GraphEdge: Clone + Eq + Hash + Debug {
    type Vertex: Clone + Eq + Hash + Debug;

    fn source(&self) -> &Self::Vertex;

    fn target(&self) -> &Self::Vertex;

    /// True if source and target coincide
    fn is_self_loop(&self) -> bool {
        self.source() == self.target()
    }
}

/// Read access to a directed graph with out-edge enumeration
pub trait IncidenceGraph {
    type Vertex: Clone + Eq + Hash + Debug;
    type Edge: GraphEdge<Vertex = Self::Vertex>;

    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;

    fn contains_edge(&self, edge: &Self::Edge) -> bool;

    /// True if at least one edge `source -> target` exists
    fn contains_edge_between(&self, source: &Self::Vertex, target: &Self::Vertex) -> bool;

    fn vertices(&self) -> Box<dyn Iterator<Item = &Self::Vertex> + '_>;

    fn edges(&self) -> Box<dyn Iterator<Item = &Self::Edge> + '_>;

    /// Out-edges of `vertex`; empty for an unknown vertex
    fn out_edges(&self, vertex: &Self::Vertex) -> &[Self::Edge];

    fn out_degree(&self, vertex: &Self::Vertex) -> usize {
        self.out_edges(vertex).len()
    }
}

/// Incidence graph that also enumerates in-edges
pub trait BidirectionalGraph: IncidenceGraph {
    /// In-edges of `vertex`; empty for an unknown vertex
    fn in_edges(&self, vertex: &Self::Vertex) -> &[Self::Edge];

    fn in_degree(&self, vertex: &Self::Vertex) -> usize {
        self.in_edges(vertex).len()
    }
}

/// Incidence graph supporting in-place mutation
///
/// Every method reports whether the graph changed; `false` means the vertex
/// or edge was already present (insertion) or absent (removal), or, for
/// `add_edge`, that an endpoint is missing or the edge would be a rejected
/// parallel edge.
pub trait MutableGraph: IncidenceGraph {
    fn add_vertex(&mut self, vertex: Self::Vertex) -> bool;

    /// Removes the vertex together with every incident edge
    fn remove_vertex(&mut self, vertex: &Self::Vertex) -> bool;

    fn add_edge(&mut self, edge: Self::Edge) -> bool;

    fn remove_edge(&mut self, edge: &Self::Edge) -> bool;
}

/// Plain directed edge identified by its endpoints
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge<V> {
    pub source: V,
    pub target: V,
}

impl<V> Edge<V> {
    pub fn new(source: V, target: V) -> Self {
        Self { source, target }
    }
}

impl<V: Clone + Eq + Hash + Debug> GraphEdge for Edge<V> {
    type Vertex = V;

    fn source(&self) -> &V {
        &self.source
    }

    fn target(&self) -> &V {
        &self.target
    }
}

/// Directed edge carrying a tag, so parallel edges stay distinguishable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedEdge<V> {
    pub source: V,
    pub target: V,
    pub tag: usize,
}

impl<V> TaggedEdge<V> {
    pub fn new(source: V, target: V, tag: usize) -> Self {
        Self { source, target, tag }
    }
}

impl<V: Clone + Eq + Hash + Debug> GraphEdge for TaggedEdge<V> {
    type Vertex = V;

    fn source(&self) -> &V {
        &self.source
    }

    fn target(&self) -> &V {
        &self.target
    }
}

/// Adjacency-list directed graph with in-edge tracking
pub struct AdjacencyGraph<V, E> {
    /// Vertices in insertion order
    vertices: Vec<V>,
    out_adjacency: HashMap<V, Vec<E>>,
    in_adjacency: HashMap<V, Vec<E>>,
    edge_count: usize,
    allow_parallel_edges: bool,
    vertex_added: EventHandlers<V>,
    vertex_removed: EventHandlers<V>,
    edge_added: EventHandlers<E>,
    edge_removed: EventHandlers<E>,
}

impl<V, E> AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: GraphEdge<Vertex = V>,
{
    /// Creates an empty graph that rejects parallel edges
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            out_adjacency: HashMap::new(),
            in_adjacency: HashMap::new(),
            edge_count: 0,
            allow_parallel_edges: false,
            vertex_added: EventHandlers::new(),
            vertex_removed: EventHandlers::new(),
            edge_added: EventHandlers::new(),
            edge_removed: EventHandlers::new(),
        }
    }

    /// Creates an empty graph that accepts distinct edges sharing endpoints
    pub fn with_parallel_edges() -> Self {
        Self {
            allow_parallel_edges: true,
            ..Self::new()
        }
    }

    /// Builds a graph from edges, adding missing endpoints on the way
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_vertices_and_edge(edge);
        }
        graph
    }

    pub fn allows_parallel_edges(&self) -> bool {
        self.allow_parallel_edges
    }

    /// Adds the edge after inserting whichever endpoints are missing
    pub fn add_vertices_and_edge(&mut self, edge: E) -> bool {
        let source = edge.source().clone();
        let target = edge.target().clone();
        self.add_vertex(source);
        self.add_vertex(target);
        self.add_edge(edge)
    }

    /// Edges `source -> target`, in insertion order
    pub fn edges_between(&self, source: &V, target: &V) -> Vec<&E> {
        self.out_edges(source)
            .iter()
            .filter(|edge| edge.target() == target)
            .collect()
    }

    pub fn on_vertex_added<F>(&mut self, handler: F) -> HandlerId
    where
        F: FnMut(&V) + 'static,
    {
        self.vertex_added.subscribe(handler)
    }

    pub fn on_vertex_removed<F>(&mut self, handler: F) -> HandlerId
    where
        F: FnMut(&V) + 'static,
    {
        self.vertex_removed.subscribe(handler)
    }

    pub fn on_edge_added<F>(&mut self, handler: F) -> HandlerId
    where
        F: FnMut(&E) + 'static,
    {
        self.edge_added.subscribe(handler)
    }

    pub fn on_edge_removed<F>(&mut self, handler: F) -> HandlerId
    where
        F: FnMut(&E) + 'static,
    {
        self.edge_removed.subscribe(handler)
    }

    fn detach_in_edge(&mut self, edge: &E) {
        if let Some(incoming) = self.in_adjacency.get_mut(edge.target()) {
            if let Some(position) = incoming.iter().position(|candidate| candidate == edge) {
                incoming.remove(position);
            }
        }
    }

    fn detach_out_edge(&mut self, edge: &E) {
        if let Some(outgoing) = self.out_adjacency.get_mut(edge.source()) {
            if let Some(position) = outgoing.iter().position(|candidate| candidate == edge) {
                outgoing.remove(position);
            }
        }
    }
}

impl<V, E> Default for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: GraphEdge<Vertex = V>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> Debug for AdjacencyGraph<V, E>
where
    V: Debug,
    E: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdjacencyGraph")
            .field("vertices", &self.vertices)
            .field("edge_count", &self.edge_count)
            .field("allow_parallel_edges", &self.allow_parallel_edges)
            .finish()
    }
}

impl<V, E> IncidenceGraph for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: GraphEdge<Vertex = V>,
{
    type Vertex = V;
    type Edge = E;

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.out_adjacency.contains_key(vertex)
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.out_adjacency
            .get(edge.source())
            .map_or(false, |outgoing| outgoing.contains(edge))
    }

    fn contains_edge_between(&self, source: &V, target: &V) -> bool {
        self.out_edges(source).iter().any(|edge| edge.target() == target)
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = &V> + '_> {
        Box::new(self.vertices.iter())
    }

    fn edges(&self) -> Box<dyn Iterator<Item = &E> + '_> {
        Box::new(
            self.vertices
                .iter()
                .flat_map(move |vertex| self.out_edges(vertex).iter()),
        )
    }

    fn out_edges(&self, vertex: &V) -> &[E] {
        self.out_adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl<V, E> BidirectionalGraph for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: GraphEdge<Vertex = V>,
{
    fn in_edges(&self, vertex: &V) -> &[E] {
        self.in_adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl<V, E> MutableGraph for AdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: GraphEdge<Vertex = V>,
{
    fn add_vertex(&mut self, vertex: V) -> bool {
        if self.contains_vertex(&vertex) {
            return false;
        }
        self.out_adjacency.insert(vertex.clone(), Vec::new());
        self.in_adjacency.insert(vertex.clone(), Vec::new());
        self.vertices.push(vertex.clone());
        self.vertex_added.emit(&vertex);
        true
    }

    fn remove_vertex(&mut self, vertex: &V) -> bool {
        let Some(outgoing) = self.out_adjacency.remove(vertex) else {
            return false;
        };
        let incoming = self.in_adjacency.remove(vertex).unwrap_or_default();

        let mut removed = Vec::with_capacity(outgoing.len() + incoming.len());
        for edge in outgoing {
            if !edge.is_self_loop() {
                self.detach_in_edge(&edge);
            }
            removed.push(edge);
        }
        // Self-loops were already collected from the out-list
        for edge in incoming {
            if edge.is_self_loop() {
                continue;
            }
            self.detach_out_edge(&edge);
            removed.push(edge);
        }

        self.edge_count -= removed.len();
        self.vertices.retain(|candidate| candidate != vertex);

        for edge in &removed {
            self.edge_removed.emit(edge);
        }
        self.vertex_removed.emit(vertex);
        true
    }

    fn add_edge(&mut self, edge: E) -> bool {
        if !self.contains_vertex(edge.source()) || !self.contains_vertex(edge.target()) {
            return false;
        }
        if self.contains_edge(&edge) {
            return false;
        }
        if !self.allow_parallel_edges && self.contains_edge_between(edge.source(), edge.target()) {
            return false;
        }

        if let Some(outgoing) = self.out_adjacency.get_mut(edge.source()) {
            outgoing.push(edge.clone());
        }
        if let Some(incoming) = self.in_adjacency.get_mut(edge.target()) {
            incoming.push(edge.clone());
        }
        self.edge_count += 1;
        self.edge_added.emit(&edge);
        true
    }

    fn remove_edge(&mut self, edge: &E) -> bool {
        if !self.contains_edge(edge) {
            return false;
        }
        self.detach_out_edge(edge);
        self.detach_in_edge(edge);
        self.edge_count -= 1;
        self.edge_removed.emit(edge);
        true
    }
}
