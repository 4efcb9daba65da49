//! Super-source / super-sink graph augmentation
//!
//! Single-source single-sink flow algorithms solve multi-source or
//! multi-sink problems once two synthetic vertices are inserted: a
//! super-source wired to every admissible source-side vertex and a
//! super-sink wired from every admissible sink-side vertex.
//! [`GraphAugmentor`] performs the insertion on the caller's graph and
//! delegates the wiring to an [`AugmentationStrategy`]:
//!
//! - [`AllVertices`]: `super_source -> v` and `v -> super_sink` for every
//!   original vertex `v`
//! - [`Bipartite`]: `super_source -> v` for `v` in the source side and
//!   `v -> super_sink` for `v` in the sink side
//!
//! [`GraphAugmentor::rollback`] removes both super vertices, and with them
//! every connector edge, restoring the original vertex and edge counts.
//! Dropping an augmented instance rolls back automatically.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};

use crate::algorithm::config::FlowConfig;
use crate::algorithm::events::{EventHandlers, HandlerId};
use crate::algorithm::graph::error::FlowError;
use crate::algorithm::traits::{
    parse_parameter, validate_capacity, Algorithm, AlgorithmComplexity, AlgorithmError,
    AlgorithmParameter, ParameterType,
};
use crate::data_structures::graph::{IncidenceGraph, MutableGraph};

/// Policy deciding which connector edges join the super vertices to a graph
pub trait AugmentationStrategy<G: IncidenceGraph> {
    fn name(&self) -> &'static str;

    /// Connector edges to insert, as `(source, target)` pairs
    ///
    /// Called after both super vertices have been added to `graph`.
    fn connections(
        &self,
        graph: &G,
        super_source: &G::Vertex,
        super_sink: &G::Vertex,
    ) -> Result<Vec<(G::Vertex, G::Vertex)>, FlowError>;
}

/// Connects every original vertex to both super vertices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllVertices;

impl<G: IncidenceGraph> AugmentationStrategy<G> for AllVertices {
    fn name(&self) -> &'static str {
        "All Vertices Augmentor"
    }

    fn connections(
        &self,
        graph: &G,
        super_source: &G::Vertex,
        super_sink: &G::Vertex,
    ) -> Result<Vec<(G::Vertex, G::Vertex)>, FlowError> {
        let mut connections = Vec::with_capacity(2 * graph.vertex_count());
        for vertex in graph.vertices() {
            if vertex == super_source || vertex == super_sink {
                continue;
            }
            connections.push((super_source.clone(), vertex.clone()));
            connections.push((vertex.clone(), super_sink.clone()));
        }
        Ok(connections)
    }
}

/// Connects two caller-chosen vertex subsets, as in bipartite matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bipartite<V> {
    source_to_vertices: Vec<V>,
    vertices_to_sink: Vec<V>,
}

impl<V> Bipartite<V> {
    pub fn new(source_to_vertices: Vec<V>, vertices_to_sink: Vec<V>) -> Self {
        Self {
            source_to_vertices,
            vertices_to_sink,
        }
    }

    pub fn source_to_vertices(&self) -> &[V] {
        &self.source_to_vertices
    }

    pub fn vertices_to_sink(&self) -> &[V] {
        &self.vertices_to_sink
    }
}

impl<G: IncidenceGraph> AugmentationStrategy<G> for Bipartite<G::Vertex> {
    fn name(&self) -> &'static str {
        "Bipartite To Maximum Flow Augmentor"
    }

    fn connections(
        &self,
        graph: &G,
        super_source: &G::Vertex,
        super_sink: &G::Vertex,
    ) -> Result<Vec<(G::Vertex, G::Vertex)>, FlowError> {
        if let Some(missing) = self
            .source_to_vertices
            .iter()
            .chain(self.vertices_to_sink.iter())
            .find(|vertex| !graph.contains_vertex(vertex))
        {
            return Err(FlowError::vertex_not_found(missing));
        }

        let outgoing = self
            .source_to_vertices
            .iter()
            .map(|vertex| (super_source.clone(), vertex.clone()));
        let incoming = self
            .vertices_to_sink
            .iter()
            .map(|vertex| (vertex.clone(), super_sink.clone()));
        Ok(outgoing.chain(incoming).collect())
    }
}

/// Inserts a super-source and super-sink into a caller-owned graph
pub struct GraphAugmentor<'g, G, S, VF, EF>
where
    G: MutableGraph,
    S: AugmentationStrategy<G>,
    VF: FnMut() -> G::Vertex,
    EF: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    graph: &'g mut G,
    strategy: S,
    vertex_factory: VF,
    edge_factory: EF,
    config: FlowConfig,
    super_source: Option<G::Vertex>,
    super_sink: Option<G::Vertex>,
    augmented_edges: Vec<G::Edge>,
    augmented: bool,
    super_source_added: EventHandlers<G::Vertex>,
    super_sink_added: EventHandlers<G::Vertex>,
    edge_added: EventHandlers<G::Edge>,
}

/// Augmentor wiring every vertex to the super vertices
pub type AllVerticesAugmentor<'g, G, VF, EF> = GraphAugmentor<'g, G, AllVertices, VF, EF>;

/// Augmentor wiring two vertex subsets to the super vertices
pub type BipartiteAugmentor<'g, G, VF, EF> =
    GraphAugmentor<'g, G, Bipartite<<G as IncidenceGraph>::Vertex>, VF, EF>;

impl<'g, G, S, VF, EF> GraphAugmentor<'g, G, S, VF, EF>
where
    G: MutableGraph,
    S: AugmentationStrategy<G>,
    VF: FnMut() -> G::Vertex,
    EF: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    pub fn new(graph: &'g mut G, strategy: S, vertex_factory: VF, edge_factory: EF) -> Self {
        Self {
            graph,
            strategy,
            vertex_factory,
            edge_factory,
            config: FlowConfig::default(),
            super_source: None,
            super_sink: None,
            augmented_edges: Vec::new(),
            augmented: false,
            super_source_added: EventHandlers::new(),
            super_sink_added: EventHandlers::new(),
            edge_added: EventHandlers::new(),
        }
    }

    pub fn with_config(mut self, config: FlowConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds the super vertices and the strategy's connector edges
    ///
    /// On failure every synthetic vertex and edge added so far is removed
    /// before the error is returned.
    pub fn compute(&mut self) -> Result<(), FlowError> {
        if self.augmented {
            return Err(FlowError::AlreadyAugmented);
        }
        self.augmented_edges.clear();

        let super_source = self.add_super_vertex()?;
        self.super_source = Some(super_source.clone());
        self.super_source_added.emit(&super_source);

        let super_sink = match self.add_super_vertex() {
            Ok(vertex) => vertex,
            Err(e) => {
                self.discard_super_vertices();
                return Err(e);
            }
        };
        self.super_sink = Some(super_sink.clone());
        self.super_sink_added.emit(&super_sink);

        let connections = match self
            .strategy
            .connections(&*self.graph, &super_source, &super_sink)
        {
            Ok(connections) => connections,
            Err(e) => {
                self.discard_super_vertices();
                return Err(e);
            }
        };

        for (source, target) in connections {
            if let Err(e) = self.add_augmented_edge(&source, &target) {
                self.discard_super_vertices();
                return Err(e);
            }
        }

        self.augmented = true;
        debug!(
            "{}: super vertices {:?}/{:?}, {} connector edges",
            self.strategy.name(),
            super_source,
            super_sink,
            self.augmented_edges.len()
        );
        Ok(())
    }

    /// Removes the super vertices and their connector edges
    ///
    /// A rollback of a graph that is not augmented does nothing.
    pub fn rollback(&mut self) {
        if !self.augmented {
            return;
        }
        self.augmented = false;
        let removed = self.augmented_edges.len();
        self.discard_super_vertices();
        debug!("{}: rolled back {} connector edges", self.strategy.name(), removed);
    }

    pub fn is_augmented(&self) -> bool {
        self.augmented
    }

    pub fn super_source(&self) -> Option<&G::Vertex> {
        self.super_source.as_ref()
    }

    pub fn super_sink(&self) -> Option<&G::Vertex> {
        self.super_sink.as_ref()
    }

    /// Connector edges added by the last `compute`, in insertion order
    pub fn augmented_edges(&self) -> &[G::Edge] {
        &self.augmented_edges
    }

    /// Capacity of every connector edge, as configured
    pub fn connector_capacities(&self) -> HashMap<G::Edge, f64> {
        self.augmented_edges
            .iter()
            .map(|edge| (edge.clone(), self.config.connector_capacity))
            .collect()
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn graph(&self) -> &G {
        &*self.graph
    }

    /// Mutable access for nesting further augmentations
    ///
    /// Anything added through this handle must be removed before
    /// [`GraphAugmentor::rollback`] if it touches only original vertices.
    pub fn graph_mut(&mut self) -> &mut G {
        &mut *self.graph
    }

    pub fn on_super_source_added<H>(&mut self, handler: H) -> HandlerId
    where
        H: FnMut(&G::Vertex) + 'static,
    {
        self.super_source_added.subscribe(handler)
    }

    pub fn on_super_sink_added<H>(&mut self, handler: H) -> HandlerId
    where
        H: FnMut(&G::Vertex) + 'static,
    {
        self.super_sink_added.subscribe(handler)
    }

    pub fn on_edge_added<H>(&mut self, handler: H) -> HandlerId
    where
        H: FnMut(&G::Edge) + 'static,
    {
        self.edge_added.subscribe(handler)
    }

    fn add_super_vertex(&mut self) -> Result<G::Vertex, FlowError> {
        let vertex = (self.vertex_factory)();
        if !self.graph.add_vertex(vertex.clone()) {
            return Err(FlowError::vertex_rejected(&vertex));
        }
        Ok(vertex)
    }

    fn add_augmented_edge(&mut self, source: &G::Vertex, target: &G::Vertex) -> Result<(), FlowError> {
        let edge = (self.edge_factory)(source, target);
        if !self.graph.add_edge(edge.clone()) {
            return Err(FlowError::edge_rejected(&edge));
        }
        self.augmented_edges.push(edge.clone());
        self.edge_added.emit(&edge);
        Ok(())
    }

    fn discard_super_vertices(&mut self) {
        // Removing the vertices cascades to every connector edge
        if let Some(source) = self.super_source.take() {
            self.graph.remove_vertex(&source);
        }
        if let Some(sink) = self.super_sink.take() {
            self.graph.remove_vertex(&sink);
        }
        self.augmented_edges.clear();
    }
}

impl<'g, G, VF, EF> GraphAugmentor<'g, G, AllVertices, VF, EF>
where
    G: MutableGraph,
    VF: FnMut() -> G::Vertex,
    EF: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    pub fn all_vertices(graph: &'g mut G, vertex_factory: VF, edge_factory: EF) -> Self {
        Self::new(graph, AllVertices, vertex_factory, edge_factory)
    }
}

impl<'g, G, VF, EF> GraphAugmentor<'g, G, Bipartite<G::Vertex>, VF, EF>
where
    G: MutableGraph,
    VF: FnMut() -> G::Vertex,
    EF: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    pub fn bipartite(
        graph: &'g mut G,
        source_to_vertices: Vec<G::Vertex>,
        vertices_to_sink: Vec<G::Vertex>,
        vertex_factory: VF,
        edge_factory: EF,
    ) -> Self {
        Self::new(
            graph,
            Bipartite::new(source_to_vertices, vertices_to_sink),
            vertex_factory,
            edge_factory,
        )
    }
}

impl<'g, G, S, VF, EF> Drop for GraphAugmentor<'g, G, S, VF, EF>
where
    G: MutableGraph,
    S: AugmentationStrategy<G>,
    VF: FnMut() -> G::Vertex,
    EF: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    fn drop(&mut self) {
        if self.augmented {
            warn!("{} dropped while augmented; rolling back", self.strategy.name());
            self.rollback();
        }
    }
}

impl<'g, G, S, VF, EF> fmt::Debug for GraphAugmentor<'g, G, S, VF, EF>
where
    G: MutableGraph,
    S: AugmentationStrategy<G>,
    VF: FnMut() -> G::Vertex,
    EF: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphAugmentor")
            .field("strategy", &self.strategy.name())
            .field("augmented", &self.augmented)
            .field("super_source", &self.super_source)
            .field("super_sink", &self.super_sink)
            .field("augmented_edges", &self.augmented_edges.len())
            .finish()
    }
}

impl<'g, G, S, VF, EF> Algorithm for GraphAugmentor<'g, G, S, VF, EF>
where
    G: MutableGraph,
    S: AugmentationStrategy<G>,
    VF: FnMut() -> G::Vertex,
    EF: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    fn name(&self) -> &'static str {
        self.strategy.name()
    }

    fn category(&self) -> &'static str {
        "augmentation"
    }

    fn description(&self) -> String {
        format!(
            "{}: inserts a super-source and a super-sink and wires them to the graph \
             with effectively unconstrained connector edges; fully reversible.",
            self.strategy.name()
        )
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O(V)", "O(V)")
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        vec![AlgorithmParameter::new(
            "connector_capacity",
            self.config.connector_capacity.to_string(),
            ParameterType::Float,
            "Capacity reported for connector edges",
        )]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "connector_capacity" => {
                let capacity = parse_parameter::<f64>(name, value)?;
                self.config.connector_capacity = validate_capacity(name, capacity)?;
                Ok(())
            }
            _ => Err(AlgorithmError::UnknownParameter(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::graph::{AdjacencyGraph, BidirectionalGraph, Edge, GraphEdge};
    use std::cell::RefCell;
    use std::rc::Rc;

    type TestGraph = AdjacencyGraph<u32, Edge<u32>>;

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

    fn diamond() -> TestGraph {
        AdjacencyGraph::from_edges(vec![
            Edge::new(0, 1),
            Edge::new(0, 2),
            Edge::new(1, 3),
            Edge::new(2, 3),
        ])
    }

    #[test]
    fn test_all_vertices_connects_every_vertex_once() {
        let mut graph = diamond();
        let mut augmentor = GraphAugmentor::all_vertices(&mut graph, vertex_factory(), edge_factory);
        augmentor.compute().unwrap();

        let source = *augmentor.super_source().unwrap();
        let sink = *augmentor.super_sink().unwrap();
        let graph = augmentor.graph();

        assert_eq!(graph.vertex_count(), 6);
        assert_eq!(graph.edge_count(), 4 + 2 * 4);
        for vertex in 0..4 {
            let from_source = graph.in_edges(&vertex).iter().filter(|e| *e.source() == source).count();
            let to_sink = graph.out_edges(&vertex).iter().filter(|e| *e.target() == sink).count();
            assert_eq!(from_source, 1);
            assert_eq!(to_sink, 1);
        }
        assert!(!graph.contains_edge_between(&source, &sink));
        assert!(!graph.contains_edge_between(&source, &source));
    }

    #[test]
    fn test_compute_rollback_round_trip_is_stable() {
        let mut graph = diamond();
        {
            let mut augmentor = GraphAugmentor::all_vertices(&mut graph, vertex_factory(), edge_factory);
            for _ in 0..3 {
                augmentor.compute().unwrap();
                assert_eq!(augmentor.graph().vertex_count(), 6);
                augmentor.rollback();
                assert_eq!(augmentor.graph().vertex_count(), 4);
                assert_eq!(augmentor.graph().edge_count(), 4);
                assert!(augmentor.super_source().is_none());
                assert!(augmentor.augmented_edges().is_empty());
            }
        }
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_double_compute_is_rejected() {
        let mut graph = diamond();
        let mut augmentor = GraphAugmentor::all_vertices(&mut graph, vertex_factory(), edge_factory);
        augmentor.compute().unwrap();
        assert_eq!(augmentor.compute(), Err(FlowError::AlreadyAugmented));
        assert_eq!(augmentor.graph().vertex_count(), 6);
    }

    #[test]
    fn test_rollback_without_compute_is_a_no_op() {
        let mut graph = diamond();
        let mut augmentor = GraphAugmentor::all_vertices(&mut graph, vertex_factory(), edge_factory);
        augmentor.rollback();
        assert_eq!(augmentor.graph().vertex_count(), 4);
    }

    #[test]
    fn test_bipartite_wires_only_the_chosen_sides() {
        let mut graph = diamond();
        let mut augmentor =
            GraphAugmentor::bipartite(&mut graph, vec![1, 2], vec![3], vertex_factory(), edge_factory);
        augmentor.compute().unwrap();

        let source = *augmentor.super_source().unwrap();
        let sink = *augmentor.super_sink().unwrap();
        assert_eq!(
            augmentor.augmented_edges(),
            &[Edge::new(source, 1), Edge::new(source, 2), Edge::new(3, sink)]
        );
        assert_eq!(augmentor.graph().edge_count(), 7);
    }

    #[test]
    fn test_bipartite_missing_vertex_leaves_graph_clean() {
        let mut graph = diamond();
        let mut augmentor =
            GraphAugmentor::bipartite(&mut graph, vec![1, 42], vec![3], vertex_factory(), edge_factory);

        assert_eq!(
            augmentor.compute(),
            Err(FlowError::VertexNotFound("42".to_string()))
        );
        assert!(!augmentor.is_augmented());
        assert_eq!(augmentor.graph().vertex_count(), 4);
        assert_eq!(augmentor.graph().edge_count(), 4);
    }

    #[test]
    fn test_notifications_fire_during_compute() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut graph = diamond();
        let mut augmentor = GraphAugmentor::all_vertices(&mut graph, vertex_factory(), edge_factory);

        let sources = Rc::clone(&log);
        augmentor.on_super_source_added(move |v: &u32| sources.borrow_mut().push(format!("source {}", v)));
        let sinks = Rc::clone(&log);
        augmentor.on_super_sink_added(move |v: &u32| sinks.borrow_mut().push(format!("sink {}", v)));
        let edges = Rc::clone(&log);
        augmentor.on_edge_added(move |_: &Edge<u32>| edges.borrow_mut().push("edge".to_string()));

        augmentor.compute().unwrap();

        let log = log.borrow();
        assert_eq!(log[0], "source 101");
        assert_eq!(log[1], "sink 102");
        assert_eq!(log.iter().filter(|entry| *entry == "edge").count(), 8);
    }

    #[test]
    fn test_drop_rolls_back() {
        let mut graph = diamond();
        {
            let mut augmentor = GraphAugmentor::all_vertices(&mut graph, vertex_factory(), edge_factory);
            augmentor.compute().unwrap();
        }
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_colliding_vertex_factory_is_rejected() {
        let mut graph = diamond();
        let mut augmentor = GraphAugmentor::all_vertices(&mut graph, || 0u32, edge_factory);
        assert_eq!(
            augmentor.compute(),
            Err(FlowError::VertexRejected("0".to_string()))
        );
        assert_eq!(augmentor.graph().vertex_count(), 4);
        assert_eq!(augmentor.graph().edge_count(), 4);
    }

    #[test]
    fn test_connector_capacities_follow_configuration() {
        let mut graph = diamond();
        let mut augmentor = GraphAugmentor::all_vertices(&mut graph, vertex_factory(), edge_factory)
            .with_config(FlowConfig::default().with_connector_capacity(50.0));
        augmentor.compute().unwrap();

        let capacities = augmentor.connector_capacities();
        assert_eq!(capacities.len(), 8);
        assert!(capacities.values().all(|c| *c == 50.0));

        augmentor.set_parameter("connector_capacity", "7").unwrap();
        assert_eq!(augmentor.get_parameter("connector_capacity"), Some("7".to_string()));
        assert!(augmentor.set_parameter("connector_capacity", "-1").is_err());
        assert!(augmentor.set_parameter("unknown", "1").is_err());
    }
}
