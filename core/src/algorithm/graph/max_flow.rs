//! Edmonds-Karp Maximum Flow Implementation
//!
//! This module implements the Edmonds-Karp specialisation of Ford-Fulkerson:
//! every iteration finds a shortest (fewest edges) augmenting path with a
//! breadth-first search over the residual graph and pushes the path's
//! bottleneck capacity along it.
//!
//! # Residual Graph
//! The solver never builds its own network. It runs on a caller-owned graph
//! that a [`ReversedEdgeAugmentor`] has completed with reverse edges, reading
//! capacities through a caller-supplied function. Residual capacities are
//! seeded from that function the first time an edge is examined, which is
//! also when a negative capacity is detected.
//!
//! Pushing `f` units along `e` lowers `residual(e)` by `f` and raises
//! `residual(reverse(e))` by `f`, so later searches can cancel flow.
//!
//! # Algorithmic Complexity
//! - **Time Complexity**: O(V * E^2) - at most O(V * E) augmentations of O(E)
//! - **Space Complexity**: O(V + E) - residual map, colors and predecessor tree
//!
//! # Termination
//! Each iteration pushes a strictly positive bottleneck and the flow value is
//! bounded by the minimum cut. When the final search leaves the sink White,
//! the Black vertices form the source side of a minimum cut.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::config::FlowConfig;
use crate::algorithm::graph::error::FlowError;
use crate::algorithm::graph::reversed_edges::{ReversedEdgeAugmentor, ReversedEdges};
use crate::algorithm::state::{SearchState, VertexColor};
use crate::algorithm::traits::{
    parse_parameter, Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmParameter,
    ParameterType,
};
use crate::data_structures::graph::{GraphEdge, IncidenceGraph, MutableGraph};

/// Flow capacity type with algebraic properties
pub type Capacity = f64;

/// Flow value type supporting arithmetic operations
pub type Flow = f64;

/// One augmenting path and the flow pushed along it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowPath<V> {
    /// Path vertices, source first
    pub path: Vec<V>,
    /// Flow amount along path
    pub flow: Flow,
}

/// Flow algorithm performance metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowMetrics {
    /// Number of augmenting paths pushed
    pub augmenting_paths: usize,
    /// Number of breadth-first searches run
    pub searches: usize,
    /// Vertices dequeued across all searches
    pub vertices_explored: usize,
    /// Out-edges examined across all searches
    pub edges_scanned: usize,
    /// Algorithm execution time
    pub execution_time_ms: f64,
}

/// Edmonds-Karp solver over a reverse-edge augmented graph
pub struct EdmondsKarpMaxFlow<'a, G, C>
where
    G: IncidenceGraph,
    C: Fn(&G::Edge) -> Capacity,
{
    graph: &'a G,
    reversed_edges: &'a ReversedEdges<G::Edge>,
    augmented: bool,
    capacities: C,
    config: FlowConfig,
    source: Option<G::Vertex>,
    sink: Option<G::Vertex>,
    residual_capacities: HashMap<G::Edge, Capacity>,
    search: SearchState<G::Vertex, G::Edge>,
    flow_paths: Vec<FlowPath<G::Vertex>>,
    max_flow: Flow,
    computed: bool,
    metrics: FlowMetrics,
}

impl<'a, G, C> EdmondsKarpMaxFlow<'a, G, C>
where
    G: IncidenceGraph,
    C: Fn(&G::Edge) -> Capacity,
{
    /// Creates a solver over the graph held by `augmentor`
    ///
    /// The augmentor must have added its reverse edges before
    /// [`EdmondsKarpMaxFlow::compute`] is called.
    pub fn new<'g, F>(augmentor: &'a ReversedEdgeAugmentor<'g, G, F>, capacities: C) -> Self
    where
        G: MutableGraph,
        F: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
    {
        Self::build(
            augmentor.graph(),
            augmentor.reversed_edges(),
            augmentor.is_augmented(),
            capacities,
        )
    }

    /// Creates a solver from a graph and an externally maintained
    /// correspondence; completeness is verified on every compute
    pub fn from_parts(graph: &'a G, reversed_edges: &'a ReversedEdges<G::Edge>, capacities: C) -> Self {
        Self::build(graph, reversed_edges, true, capacities)
    }

    fn build(
        graph: &'a G,
        reversed_edges: &'a ReversedEdges<G::Edge>,
        augmented: bool,
        capacities: C,
    ) -> Self {
        Self {
            graph,
            reversed_edges,
            augmented,
            capacities,
            config: FlowConfig::default(),
            source: None,
            sink: None,
            residual_capacities: HashMap::new(),
            search: SearchState::new(),
            flow_paths: Vec::new(),
            max_flow: 0.0,
            computed: false,
            metrics: FlowMetrics::default(),
        }
    }

    pub fn with_config(mut self, config: FlowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_source(&mut self, source: G::Vertex) {
        self.source = Some(source);
    }

    pub fn set_sink(&mut self, sink: G::Vertex) {
        self.sink = Some(sink);
    }

    pub fn source(&self) -> Option<&G::Vertex> {
        self.source.as_ref()
    }

    pub fn sink(&self) -> Option<&G::Vertex> {
        self.sink.as_ref()
    }

    /// Sets source and sink, then computes the maximum flow
    pub fn compute_between(&mut self, source: G::Vertex, sink: G::Vertex) -> Result<Flow, FlowError> {
        self.set_source(source);
        self.set_sink(sink);
        self.compute()
    }

    /// Computes the maximum flow between the configured source and sink
    ///
    /// Any failure discards the partial state: no flow value survives an
    /// error.
    pub fn compute(&mut self) -> Result<Flow, FlowError> {
        let source = self.source.clone().ok_or(FlowError::MissingSource)?;
        let sink = self.sink.clone().ok_or(FlowError::MissingSink)?;
        if !self.graph.contains_vertex(&source) {
            return Err(FlowError::vertex_not_found(&source));
        }
        if !self.graph.contains_vertex(&sink) {
            return Err(FlowError::vertex_not_found(&sink));
        }
        if source == sink {
            return Err(FlowError::SourceEqualsSink);
        }
        self.ensure_residual_graph()?;

        let started = Instant::now();
        self.reset();
        match self.run(&source, &sink) {
            Ok(()) => {
                self.computed = true;
                self.metrics.execution_time_ms = started.elapsed().as_secs_f64() * 1000.0;
                debug!(
                    "Edmonds-Karp {:?} -> {:?}: max flow {} after {} augmenting paths",
                    source, sink, self.max_flow, self.metrics.augmenting_paths
                );
                Ok(self.max_flow)
            }
            Err(e) => {
                self.reset();
                Err(e)
            }
        }
    }

    fn run(&mut self, source: &G::Vertex, sink: &G::Vertex) -> Result<(), FlowError> {
        while self.search_augmenting_path(source, sink)? {
            let Some(path) = self.search.path_to(source, sink) else {
                break;
            };
            let bottleneck = self.augment(&path)?;
            self.max_flow += bottleneck;
        }
        Ok(())
    }

    /// One BFS over edges with positive residual capacity
    ///
    /// Returns true once the sink has been discovered.
    fn search_augmenting_path(&mut self, source: &G::Vertex, sink: &G::Vertex) -> Result<bool, FlowError> {
        let graph = self.graph;
        self.search.reset(graph.vertices());
        self.search.start(source.clone());
        self.metrics.searches += 1;

        while let Some(vertex) = self.search.next_vertex() {
            self.metrics.vertices_explored += 1;
            for edge in graph.out_edges(&vertex) {
                self.metrics.edges_scanned += 1;
                if self.residual_of(edge)? <= 0.0 {
                    continue;
                }
                if self.search.color(edge.target()) != VertexColor::White {
                    continue;
                }
                self.search.discover(edge);
                if self.config.stop_at_sink && edge.target() == sink {
                    return Ok(true);
                }
            }
            self.search.finish(&vertex);
        }

        Ok(self.search.color(sink) != VertexColor::White)
    }

    /// Pushes the path bottleneck along `path`; returns the amount pushed
    fn augment(&mut self, path: &[G::Edge]) -> Result<Flow, FlowError> {
        let mut bottleneck = Flow::INFINITY;
        for edge in path {
            bottleneck = bottleneck.min(self.residual_of(edge)?);
        }

        for edge in path {
            let reverse = self
                .reversed_edges
                .get(edge)
                .cloned()
                .ok_or(FlowError::NotAugmented)?;
            self.residual_of(&reverse)?;
            if let Some(residual) = self.residual_capacities.get_mut(edge) {
                *residual -= bottleneck;
            }
            if let Some(residual) = self.residual_capacities.get_mut(&reverse) {
                // Two opposite f64::MAX edges would otherwise overflow to infinity
                *residual = (*residual + bottleneck).min(Capacity::MAX);
            }
        }

        let mut vertices = Vec::with_capacity(path.len() + 1);
        if let Some(first) = path.first() {
            vertices.push(first.source().clone());
        }
        vertices.extend(path.iter().map(|edge| edge.target().clone()));
        trace!("Augmenting path {:?} carries {}", vertices, bottleneck);

        self.flow_paths.push(FlowPath {
            path: vertices,
            flow: bottleneck,
        });
        self.metrics.augmenting_paths += 1;
        Ok(bottleneck)
    }

    /// Residual capacity of `edge`, seeded from the capacity function
    fn residual_of(&mut self, edge: &G::Edge) -> Result<Capacity, FlowError> {
        if let Some(residual) = self.residual_capacities.get(edge) {
            return Ok(*residual);
        }
        let capacity = (self.capacities)(edge);
        if let Some(e) = FlowError::capacity(edge, capacity) {
            return Err(e);
        }
        self.residual_capacities.insert(edge.clone(), capacity);
        Ok(capacity)
    }

    /// Every edge must have a reverse that is present in the graph
    fn ensure_residual_graph(&self) -> Result<(), FlowError> {
        if !self.augmented {
            return Err(FlowError::NotAugmented);
        }
        for edge in self.graph.edges() {
            match self.reversed_edges.get(edge) {
                Some(reverse) if self.graph.contains_edge(reverse) => {}
                _ => return Err(FlowError::NotAugmented),
            }
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.residual_capacities.clear();
        self.search.reset(std::iter::empty::<&G::Vertex>());
        self.flow_paths.clear();
        self.max_flow = 0.0;
        self.computed = false;
        self.metrics = FlowMetrics::default();
    }

    /// Maximum flow found by the last successful compute
    pub fn max_flow(&self) -> Flow {
        self.max_flow
    }

    pub fn is_computed(&self) -> bool {
        self.computed
    }

    /// Residual capacities of every edge examined so far
    pub fn residual_capacities(&self) -> &HashMap<G::Edge, Capacity> {
        &self.residual_capacities
    }

    /// Residual capacity of `edge`; an edge never examined still holds its
    /// full capacity
    pub fn residual_capacity(&self, edge: &G::Edge) -> Capacity {
        self.residual_capacities
            .get(edge)
            .copied()
            .unwrap_or_else(|| (self.capacities)(edge))
    }

    /// Net flow pushed along `edge`: `capacity - residual`
    pub fn flow(&self, edge: &G::Edge) -> Flow {
        (self.capacities)(edge) - self.residual_capacity(edge)
    }

    /// Tree edges of the final search
    pub fn predecessors(&self) -> &HashMap<G::Vertex, G::Edge> {
        self.search.predecessors()
    }

    pub fn vertex_colors(&self) -> &HashMap<G::Vertex, VertexColor> {
        self.search.colors()
    }

    /// Color of `vertex` after the final search
    pub fn vertex_color(&self, vertex: &G::Vertex) -> Result<VertexColor, FlowError> {
        if !self.graph.contains_vertex(vertex) {
            return Err(FlowError::vertex_not_found(vertex));
        }
        Ok(self.search.color(vertex))
    }

    /// Source side of the minimum cut: vertices the final search reached
    pub fn min_cut_source_side(&self) -> Vec<G::Vertex> {
        self.graph
            .vertices()
            .filter(|vertex| self.search.color(vertex) != VertexColor::White)
            .cloned()
            .collect()
    }

    /// Edges leaving the source side of the minimum cut
    pub fn min_cut_edges(&self) -> Vec<G::Edge> {
        self.graph
            .edges()
            .filter(|edge| {
                self.search.color(edge.source()) != VertexColor::White
                    && self.search.color(edge.target()) == VertexColor::White
            })
            .cloned()
            .collect()
    }

    /// Augmenting paths pushed by the last compute, in discovery order
    pub fn flow_paths(&self) -> &[FlowPath<G::Vertex>] {
        &self.flow_paths
    }

    pub fn metrics(&self) -> &FlowMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn graph(&self) -> &G {
        self.graph
    }
}

impl<'a, G, C> fmt::Debug for EdmondsKarpMaxFlow<'a, G, C>
where
    G: IncidenceGraph,
    C: Fn(&G::Edge) -> Capacity,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdmondsKarpMaxFlow")
            .field("source", &self.source)
            .field("sink", &self.sink)
            .field("max_flow", &self.max_flow)
            .field("computed", &self.computed)
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl<'a, G, C> Algorithm for EdmondsKarpMaxFlow<'a, G, C>
where
    G: IncidenceGraph,
    C: Fn(&G::Edge) -> Capacity,
{
    fn name(&self) -> &'static str {
        "Edmonds-Karp"
    }

    fn category(&self) -> &'static str {
        "max_flow"
    }

    fn description(&self) -> String {
        "Maximum flow by repeated shortest augmenting paths found with breadth-first \
         search over a reverse-edge augmented residual graph."
            .to_string()
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O(V * E^2)", "O(V + E)")
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        vec![AlgorithmParameter::new(
            "stop_at_sink",
            self.config.stop_at_sink.to_string(),
            ParameterType::Boolean,
            "End each search as soon as the sink is discovered",
        )]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "stop_at_sink" => {
                self.config.stop_at_sink = parse_parameter::<bool>(name, value)?;
                Ok(())
            }
            _ => Err(AlgorithmError::UnknownParameter(name.to_string())),
        }
    }
}
