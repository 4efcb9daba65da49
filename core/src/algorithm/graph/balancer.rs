//! Graph Balancing for Lower-Bounded Flows
//!
//! Every original edge carries a preflow lower bound `l(e)`. The balancing
//! index of a vertex is
//!
//! ```text
//! index(v) = Σ l(out-edges of v) - Σ l(in-edges of v)
//! ```
//!
//! A vertex with a negative index receives more forced flow than it emits
//! and is a *surplus* vertex, fed from the balancing source with capacity
//! `-index`. A vertex with a positive index is *deficient* and drains into
//! the balancing sink with capacity `index`. The balancing source is also
//! wired to the flow source, and the flow sink to the balancing sink.
//!
//! Original edges keep `capacity - lower_bound` in the balanced network, so
//! a maximum flow from the balancing source to the balancing sink that
//! saturates every balancing edge yields a feasible lower-bounded flow.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::{debug, warn};

use crate::algorithm::config::FlowConfig;
use crate::algorithm::events::{EventHandlers, HandlerId};
use crate::algorithm::graph::error::FlowError;
use crate::algorithm::traits::{
    parse_parameter, validate_capacity, Algorithm, AlgorithmComplexity, AlgorithmError,
    AlgorithmParameter, ParameterType,
};
use crate::data_structures::graph::{BidirectionalGraph, IncidenceGraph, MutableGraph};

/// Adds balancing vertices and edges around a source/sink pair
pub struct GraphBalancer<'g, G, VF, EF>
where
    G: MutableGraph + BidirectionalGraph,
    VF: FnMut() -> G::Vertex,
    EF: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    graph: &'g mut G,
    source: G::Vertex,
    sink: G::Vertex,
    vertex_factory: VF,
    edge_factory: EF,
    config: FlowConfig,
    lower_bounds: HashMap<G::Edge, f64>,
    capacities: HashMap<G::Edge, f64>,
    balancing_source: Option<G::Vertex>,
    balancing_sink: Option<G::Vertex>,
    balancing_source_edge: Option<G::Edge>,
    balancing_sink_edge: Option<G::Edge>,
    surplus_vertices: Vec<G::Vertex>,
    deficient_vertices: Vec<G::Vertex>,
    augmented_edges: Vec<G::Edge>,
    synthetic_capacities: HashMap<G::Edge, f64>,
    balanced: bool,
    balancing_source_added: EventHandlers<G::Vertex>,
    balancing_sink_added: EventHandlers<G::Vertex>,
    edge_added: EventHandlers<G::Edge>,
    surplus_vertex_added: EventHandlers<G::Vertex>,
    deficient_vertex_added: EventHandlers<G::Vertex>,
}

impl<'g, G, VF, EF> GraphBalancer<'g, G, VF, EF>
where
    G: MutableGraph + BidirectionalGraph,
    VF: FnMut() -> G::Vertex,
    EF: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    pub fn new(
        graph: &'g mut G,
        source: G::Vertex,
        sink: G::Vertex,
        vertex_factory: VF,
        edge_factory: EF,
    ) -> Self {
        Self {
            graph,
            source,
            sink,
            vertex_factory,
            edge_factory,
            config: FlowConfig::default(),
            lower_bounds: HashMap::new(),
            capacities: HashMap::new(),
            balancing_source: None,
            balancing_sink: None,
            balancing_source_edge: None,
            balancing_sink_edge: None,
            surplus_vertices: Vec::new(),
            deficient_vertices: Vec::new(),
            augmented_edges: Vec::new(),
            synthetic_capacities: HashMap::new(),
            balanced: false,
            balancing_source_added: EventHandlers::new(),
            balancing_sink_added: EventHandlers::new(),
            edge_added: EventHandlers::new(),
            surplus_vertex_added: EventHandlers::new(),
            deficient_vertex_added: EventHandlers::new(),
        }
    }

    pub fn with_config(mut self, config: FlowConfig) -> Self {
        self.config = config;
        self
    }

    /// Per-edge lower bounds; edges not listed use `FlowConfig::lower_bound`
    pub fn with_lower_bounds(mut self, lower_bounds: HashMap<G::Edge, f64>) -> Self {
        self.lower_bounds = lower_bounds;
        self
    }

    /// Per-edge capacities; edges not listed are unconstrained
    pub fn with_capacities(mut self, capacities: HashMap<G::Edge, f64>) -> Self {
        self.capacities = capacities;
        self
    }

    /// Inserts the balancing vertices and classifies every other vertex
    ///
    /// On failure every synthetic vertex and edge added so far is removed
    /// before the error is returned.
    pub fn balance(&mut self) -> Result<(), FlowError> {
        if self.balanced {
            return Err(FlowError::AlreadyBalanced);
        }
        if !self.graph.contains_vertex(&self.source) {
            return Err(FlowError::vertex_not_found(&self.source));
        }
        if !self.graph.contains_vertex(&self.sink) {
            return Err(FlowError::vertex_not_found(&self.sink));
        }
        if self.source == self.sink {
            return Err(FlowError::SourceEqualsSink);
        }

        // Indices are taken before any synthetic edge exists
        let mut indices = Vec::new();
        for vertex in self.graph.vertices() {
            if *vertex == self.source || *vertex == self.sink {
                continue;
            }
            let index = self.balancing_index(vertex)?;
            if index != 0.0 {
                indices.push((vertex.clone(), index));
            }
        }

        if let Err(e) = self.add_balancing_structure(indices) {
            self.discard_balancing_structure();
            return Err(e);
        }

        self.balanced = true;
        debug!(
            "Balanced graph around {:?} -> {:?}: {} surplus, {} deficient, {} edges added",
            self.source,
            self.sink,
            self.surplus_vertices.len(),
            self.deficient_vertices.len(),
            self.augmented_edges.len()
        );
        Ok(())
    }

    fn add_balancing_structure(&mut self, indices: Vec<(G::Vertex, f64)>) -> Result<(), FlowError> {
        let balancing_source = self.add_balancing_vertex()?;
        self.balancing_source = Some(balancing_source.clone());
        self.balancing_source_added.emit(&balancing_source);

        let balancing_sink = self.add_balancing_vertex()?;
        self.balancing_sink = Some(balancing_sink.clone());
        self.balancing_sink_added.emit(&balancing_sink);

        let connector = self.config.connector_capacity;
        let source = self.source.clone();
        let sink = self.sink.clone();
        self.balancing_source_edge = Some(self.add_balancing_edge(&balancing_source, &source, connector)?);
        self.balancing_sink_edge = Some(self.add_balancing_edge(&sink, &balancing_sink, connector)?);

        for (vertex, index) in indices {
            if index < 0.0 {
                self.add_balancing_edge(&balancing_source, &vertex, -index)?;
                self.surplus_vertex_added.emit(&vertex);
                self.surplus_vertices.push(vertex);
            } else {
                self.add_balancing_edge(&vertex, &balancing_sink, index)?;
                self.deficient_vertex_added.emit(&vertex);
                self.deficient_vertices.push(vertex);
            }
        }
        Ok(())
    }

    /// Removes the balancing vertices and edges and clears the classification
    pub fn unbalance(&mut self) -> Result<(), FlowError> {
        if !self.balanced {
            return Err(FlowError::NotBalanced);
        }
        let removed = self.augmented_edges.len();
        self.discard_balancing_structure();
        self.balanced = false;
        debug!("Unbalanced graph: {} edges removed", removed);
        Ok(())
    }

    /// `Σ l(out) - Σ l(in)` over the original edges of `vertex`
    pub fn balancing_index(&self, vertex: &G::Vertex) -> Result<f64, FlowError> {
        if !self.graph.contains_vertex(vertex) {
            return Err(FlowError::vertex_not_found(vertex));
        }
        let synthetic: HashSet<&G::Edge> = self.augmented_edges.iter().collect();

        let mut index = 0.0;
        for edge in self.graph.out_edges(vertex) {
            if !synthetic.contains(edge) {
                index += self.checked_lower_bound(edge)?;
            }
        }
        for edge in self.graph.in_edges(vertex) {
            if !synthetic.contains(edge) {
                index -= self.checked_lower_bound(edge)?;
            }
        }
        Ok(index)
    }

    fn checked_lower_bound(&self, edge: &G::Edge) -> Result<f64, FlowError> {
        let lower_bound = self.lower_bound(edge);
        match FlowError::capacity(edge, lower_bound) {
            Some(e) => Err(e),
            None => Ok(lower_bound),
        }
    }

    pub fn lower_bound(&self, edge: &G::Edge) -> f64 {
        self.lower_bounds
            .get(edge)
            .copied()
            .unwrap_or(self.config.lower_bound)
    }

    /// Capacity of `edge` in the balanced network
    ///
    /// Balancing edges report their recorded capacity; original edges report
    /// `capacity - lower_bound`, floored at zero.
    pub fn capacity(&self, edge: &G::Edge) -> f64 {
        if let Some(capacity) = self.synthetic_capacities.get(edge) {
            return *capacity;
        }
        let capacity = self.capacities.get(edge).copied().unwrap_or(f64::MAX);
        (capacity - self.lower_bound(edge)).max(0.0)
    }

    /// Capacities of every edge currently in the graph
    pub fn capacities(&self) -> HashMap<G::Edge, f64> {
        self.graph
            .edges()
            .map(|edge| (edge.clone(), self.capacity(edge)))
            .collect()
    }

    pub fn is_balanced(&self) -> bool {
        self.balanced
    }

    pub fn source(&self) -> &G::Vertex {
        &self.source
    }

    pub fn sink(&self) -> &G::Vertex {
        &self.sink
    }

    pub fn balancing_source(&self) -> Option<&G::Vertex> {
        self.balancing_source.as_ref()
    }

    pub fn balancing_sink(&self) -> Option<&G::Vertex> {
        self.balancing_sink.as_ref()
    }

    /// Edge from the balancing source to the flow source
    pub fn balancing_source_edge(&self) -> Option<&G::Edge> {
        self.balancing_source_edge.as_ref()
    }

    /// Edge from the flow sink to the balancing sink
    pub fn balancing_sink_edge(&self) -> Option<&G::Edge> {
        self.balancing_sink_edge.as_ref()
    }

    pub fn surplus_vertices(&self) -> &[G::Vertex] {
        &self.surplus_vertices
    }

    pub fn deficient_vertices(&self) -> &[G::Vertex] {
        &self.deficient_vertices
    }

    pub fn augmented_edges(&self) -> &[G::Edge] {
        &self.augmented_edges
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn graph(&self) -> &G {
        &*self.graph
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut *self.graph
    }

    pub fn on_balancing_source_added<H>(&mut self, handler: H) -> HandlerId
    where
        H: FnMut(&G::Vertex) + 'static,
    {
        self.balancing_source_added.subscribe(handler)
    }

    pub fn on_balancing_sink_added<H>(&mut self, handler: H) -> HandlerId
    where
        H: FnMut(&G::Vertex) + 'static,
    {
        self.balancing_sink_added.subscribe(handler)
    }

    pub fn on_edge_added<H>(&mut self, handler: H) -> HandlerId
    where
        H: FnMut(&G::Edge) + 'static,
    {
        self.edge_added.subscribe(handler)
    }

    pub fn on_surplus_vertex_added<H>(&mut self, handler: H) -> HandlerId
    where
        H: FnMut(&G::Vertex) + 'static,
    {
        self.surplus_vertex_added.subscribe(handler)
    }

    pub fn on_deficient_vertex_added<H>(&mut self, handler: H) -> HandlerId
    where
        H: FnMut(&G::Vertex) + 'static,
    {
        self.deficient_vertex_added.subscribe(handler)
    }

    fn add_balancing_vertex(&mut self) -> Result<G::Vertex, FlowError> {
        let vertex = (self.vertex_factory)();
        if !self.graph.add_vertex(vertex.clone()) {
            return Err(FlowError::vertex_rejected(&vertex));
        }
        Ok(vertex)
    }

    fn add_balancing_edge(
        &mut self,
        source: &G::Vertex,
        target: &G::Vertex,
        capacity: f64,
    ) -> Result<G::Edge, FlowError> {
        let edge = (self.edge_factory)(source, target);
        if !self.graph.add_edge(edge.clone()) {
            return Err(FlowError::edge_rejected(&edge));
        }
        self.augmented_edges.push(edge.clone());
        self.synthetic_capacities.insert(edge.clone(), capacity);
        self.edge_added.emit(&edge);
        Ok(edge)
    }

    fn discard_balancing_structure(&mut self) {
        // Removing the vertices cascades to every balancing edge
        if let Some(vertex) = self.balancing_source.take() {
            self.graph.remove_vertex(&vertex);
        }
        if let Some(vertex) = self.balancing_sink.take() {
            self.graph.remove_vertex(&vertex);
        }
        self.balancing_source_edge = None;
        self.balancing_sink_edge = None;
        self.surplus_vertices.clear();
        self.deficient_vertices.clear();
        self.augmented_edges.clear();
        self.synthetic_capacities.clear();
    }
}

impl<'g, G, VF, EF> Drop for GraphBalancer<'g, G, VF, EF>
where
    G: MutableGraph + BidirectionalGraph,
    VF: FnMut() -> G::Vertex,
    EF: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    fn drop(&mut self) {
        if self.balanced {
            warn!("Graph balancer dropped while balanced; removing balancing vertices");
            if let Err(e) = self.unbalance() {
                warn!("Unbalance on drop failed: {}", e);
            }
        }
    }
}

impl<'g, G, VF, EF> fmt::Debug for GraphBalancer<'g, G, VF, EF>
where
    G: MutableGraph + BidirectionalGraph,
    VF: FnMut() -> G::Vertex,
    EF: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphBalancer")
            .field("source", &self.source)
            .field("sink", &self.sink)
            .field("balanced", &self.balanced)
            .field("balancing_source", &self.balancing_source)
            .field("balancing_sink", &self.balancing_sink)
            .field("surplus_vertices", &self.surplus_vertices)
            .field("deficient_vertices", &self.deficient_vertices)
            .finish()
    }
}

impl<'g, G, VF, EF> Algorithm for GraphBalancer<'g, G, VF, EF>
where
    G: MutableGraph + BidirectionalGraph,
    VF: FnMut() -> G::Vertex,
    EF: FnMut(&G::Vertex, &G::Vertex) -> G::Edge,
{
    fn name(&self) -> &'static str {
        "Graph Balancer"
    }

    fn category(&self) -> &'static str {
        "augmentation"
    }

    fn description(&self) -> String {
        "Routes lower-bound imbalances through a balancing source and sink so a \
         maximum flow can test feasibility of a lower-bounded flow."
            .to_string()
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity::new("O(V + E)", "O(V)")
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        vec![
            AlgorithmParameter::new(
                "lower_bound",
                self.config.lower_bound.to_string(),
                ParameterType::Float,
                "Preflow lower bound of edges without an explicit bound",
            ),
            AlgorithmParameter::new(
                "connector_capacity",
                self.config.connector_capacity.to_string(),
                ParameterType::Float,
                "Capacity of the source and sink balancing edges",
            ),
        ]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "lower_bound" => {
                let lower_bound = parse_parameter::<f64>(name, value)?;
                validate_capacity(name, lower_bound)?;
                self.config.lower_bound = lower_bound;
                Ok(())
            }
            "connector_capacity" => {
                let capacity = parse_parameter::<f64>(name, value)?;
                validate_capacity(name, capacity)?;
                self.config.connector_capacity = capacity;
                Ok(())
            }
            _ => Err(AlgorithmError::UnknownParameter(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::graph::max_flow::EdmondsKarpMaxFlow;
    use crate::algorithm::graph::reversed_edges::ReversedEdgeAugmentor;
    use crate::data_structures::graph::{AdjacencyGraph, Edge};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Network = AdjacencyGraph<u32, Edge<u32>>;

    const S: u32 = 0;
    const A: u32 = 1;
    const B: u32 = 2;
    const C: u32 = 3;
    const T: u32 = 4;

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

    // a has one more outgoing than incoming edge, b one more incoming
    fn network() -> Network {
        AdjacencyGraph::from_edges(vec![
            Edge::new(S, A),
            Edge::new(A, B),
            Edge::new(A, C),
            Edge::new(C, B),
            Edge::new(B, T),
        ])
    }

    #[test]
    fn test_balancing_indices() {
        let mut graph = network();
        let balancer = GraphBalancer::new(&mut graph, S, T, vertex_factory(), edge_factory);

        assert_eq!(balancer.balancing_index(&A), Ok(1.0));
        assert_eq!(balancer.balancing_index(&B), Ok(-1.0));
        assert_eq!(balancer.balancing_index(&C), Ok(0.0));
        assert_eq!(
            balancer.balancing_index(&42),
            Err(FlowError::VertexNotFound("42".to_string()))
        );
    }

    #[test]
    fn test_balance_classifies_and_wires_vertices() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut graph = network();
        let mut balancer = GraphBalancer::new(&mut graph, S, T, vertex_factory(), edge_factory);
        balancer.balance().unwrap();

        assert!(balancer.is_balanced());
        assert_eq!(balancer.balancing_source(), Some(&101));
        assert_eq!(balancer.balancing_sink(), Some(&102));
        assert_eq!(balancer.surplus_vertices(), &[B]);
        assert_eq!(balancer.deficient_vertices(), &[A]);
        assert_eq!(balancer.balancing_source_edge(), Some(&Edge::new(101, S)));
        assert_eq!(balancer.balancing_sink_edge(), Some(&Edge::new(T, 102)));

        let graph = balancer.graph();
        assert!(graph.contains_edge(&Edge::new(101, B)));
        assert!(graph.contains_edge(&Edge::new(A, 102)));
        assert_eq!(graph.edge_count(), 9);

        assert_eq!(balancer.capacity(&Edge::new(101, B)), 1.0);
        assert_eq!(balancer.capacity(&Edge::new(A, 102)), 1.0);
        assert_eq!(balancer.capacity(&Edge::new(101, S)), f64::MAX);
        // Indices ignore the balancing edges
        assert_eq!(balancer.balancing_index(&B), Ok(-1.0));
    }

    #[test]
    fn test_unbalance_restores_graph() {
        let mut graph = network();
        {
            let mut balancer = GraphBalancer::new(&mut graph, S, T, vertex_factory(), edge_factory);
            balancer.balance().unwrap();
            balancer.unbalance().unwrap();

            assert!(!balancer.is_balanced());
            assert!(balancer.surplus_vertices().is_empty());
            assert!(balancer.deficient_vertices().is_empty());
            assert!(balancer.balancing_source().is_none());
            assert!(balancer.augmented_edges().is_empty());
        }
        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn test_lifecycle_errors() {
        let mut graph = network();
        let mut balancer = GraphBalancer::new(&mut graph, S, T, vertex_factory(), edge_factory);

        assert_eq!(balancer.unbalance(), Err(FlowError::NotBalanced));
        balancer.balance().unwrap();
        assert_eq!(balancer.balance(), Err(FlowError::AlreadyBalanced));
        assert_eq!(balancer.graph().vertex_count(), 7);
    }

    #[test]
    fn test_invalid_endpoints() {
        let mut graph = network();
        let mut balancer = GraphBalancer::new(&mut graph, S, 99, vertex_factory(), edge_factory);
        assert_eq!(balancer.balance(), Err(FlowError::VertexNotFound("99".to_string())));
        drop(balancer);

        let mut balancer = GraphBalancer::new(&mut graph, S, S, vertex_factory(), edge_factory);
        assert_eq!(balancer.balance(), Err(FlowError::SourceEqualsSink));
    }

    #[test]
    fn test_negative_lower_bound_leaves_graph_clean() {
        let mut graph = network();
        let mut lower_bounds = HashMap::new();
        lower_bounds.insert(Edge::new(A, C), -2.0);
        {
            let mut balancer = GraphBalancer::new(&mut graph, S, T, vertex_factory(), edge_factory)
                .with_lower_bounds(lower_bounds);
            assert!(matches!(
                balancer.balance(),
                Err(FlowError::NegativeCapacity { .. })
            ));
            assert!(!balancer.is_balanced());
        }
        assert_eq!(graph.vertex_count(), 5);
    }

    #[test]
    fn test_colliding_vertex_factory_is_rejected() {
        let mut graph = network();
        {
            let mut balancer = GraphBalancer::new(&mut graph, S, T, || A, edge_factory);
            assert_eq!(balancer.balance(), Err(FlowError::VertexRejected("1".to_string())));
        }
        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn test_notifications() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut graph = network();
        let mut balancer = GraphBalancer::new(&mut graph, S, T, vertex_factory(), edge_factory);

        let recorder = Rc::clone(&log);
        balancer.on_balancing_source_added(move |v: &u32| recorder.borrow_mut().push(format!("source {}", v)));
        let recorder = Rc::clone(&log);
        balancer.on_balancing_sink_added(move |v: &u32| recorder.borrow_mut().push(format!("sink {}", v)));
        let recorder = Rc::clone(&log);
        balancer.on_surplus_vertex_added(move |v: &u32| recorder.borrow_mut().push(format!("surplus {}", v)));
        let recorder = Rc::clone(&log);
        balancer.on_deficient_vertex_added(move |v: &u32| recorder.borrow_mut().push(format!("deficient {}", v)));
        let edges = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&edges);
        balancer.on_edge_added(move |_: &Edge<u32>| *counter.borrow_mut() += 1);

        balancer.balance().unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["source 101", "sink 102", "deficient 1", "surplus 2"]
        );
        assert_eq!(*edges.borrow(), 4);
    }

    #[test]
    fn test_balanced_network_carries_lower_bound_flow() {
        let mut graph = network();
        let capacities: HashMap<Edge<u32>, f64> =
            graph.edges().map(|edge| (edge.clone(), 3.0)).collect();
        let mut balancer = GraphBalancer::new(&mut graph, S, T, vertex_factory(), edge_factory)
            .with_capacities(capacities);
        balancer.balance().unwrap();

        let balanced = balancer.capacities();
        assert_eq!(balanced[&Edge::new(A, B)], 2.0);
        let source = *balancer.balancing_source().unwrap();
        let sink = *balancer.balancing_sink().unwrap();

        {
            let mut reversed = ReversedEdgeAugmentor::new(balancer.graph_mut(), edge_factory);
            reversed.add_reversed_edges().unwrap();
            let mut solver = EdmondsKarpMaxFlow::new(&reversed, |e: &Edge<u32>| {
                balanced.get(e).copied().unwrap_or(0.0)
            });
            assert_eq!(solver.compute_between(source, sink), Ok(3.0));
            assert_eq!(solver.flow(&Edge::new(source, B)), 1.0);
            assert_eq!(solver.flow(&Edge::new(A, sink)), 1.0);
        }

        balancer.unbalance().unwrap();
    }

    #[test]
    fn test_parameters() {
        let mut graph = network();
        let mut balancer = GraphBalancer::new(&mut graph, S, T, vertex_factory(), edge_factory);

        balancer.set_parameter("lower_bound", "2").unwrap();
        assert_eq!(balancer.balancing_index(&A), Ok(2.0));
        assert!(balancer.set_parameter("lower_bound", "-1").is_err());
        assert!(balancer.set_parameter("unknown", "1").is_err());
        assert_eq!(balancer.get_parameter("lower_bound"), Some("2".to_string()));
    }
}
