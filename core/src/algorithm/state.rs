//! Breadth-first search bookkeeping for augmenting-path discovery
//!
//! Each augmenting-path search walks the tri-color state machine
//! White (unvisited) -> Gray (discovered, queued) -> Black (dequeued, all
//! out-edges examined). [`SearchState`] owns the colors, the predecessor
//! tree and the FIFO frontier, and is reset at the start of every search.

use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::data_structures::graph::GraphEdge;

/// BFS visitation state of a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VertexColor {
    /// Not yet discovered in the current search
    #[default]
    White,
    /// Discovered and waiting in the frontier
    Gray,
    /// Dequeued with every out-edge examined
    Black,
}

/// Colors, predecessor tree and frontier of one search
#[derive(Debug, Clone)]
pub struct SearchState<V, E> {
    colors: HashMap<V, VertexColor>,
    predecessors: HashMap<V, E>,
    frontier: VecDeque<V>,
}

impl<V, E> SearchState<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: GraphEdge<Vertex = V>,
{
    pub fn new() -> Self {
        Self {
            colors: HashMap::new(),
            predecessors: HashMap::new(),
            frontier: VecDeque::new(),
        }
    }

    /// Paints every vertex White and forgets the previous tree
    pub fn reset<'a, I>(&mut self, vertices: I)
    where
        I: IntoIterator<Item = &'a V>,
        V: 'a,
    {
        self.colors.clear();
        self.predecessors.clear();
        self.frontier.clear();
        for vertex in vertices {
            self.colors.insert(vertex.clone(), VertexColor::White);
        }
    }

    pub fn color(&self, vertex: &V) -> VertexColor {
        self.colors.get(vertex).copied().unwrap_or_default()
    }

    pub fn colors(&self) -> &HashMap<V, VertexColor> {
        &self.colors
    }

    pub fn predecessors(&self) -> &HashMap<V, E> {
        &self.predecessors
    }

    /// Marks the search root Gray and enqueues it
    pub fn start(&mut self, root: V) {
        self.colors.insert(root.clone(), VertexColor::Gray);
        self.frontier.push_back(root);
    }

    /// Marks the edge target Gray, records the tree edge and enqueues it
    pub fn discover(&mut self, tree_edge: &E) {
        let target = tree_edge.target().clone();
        self.colors.insert(target.clone(), VertexColor::Gray);
        self.predecessors.insert(target.clone(), tree_edge.clone());
        self.frontier.push_back(target);
    }

    /// Dequeues the next frontier vertex
    pub fn next_vertex(&mut self) -> Option<V> {
        self.frontier.pop_front()
    }

    pub fn finish(&mut self, vertex: &V) {
        self.colors.insert(vertex.clone(), VertexColor::Black);
    }

    /// Tree edges from `root` to `vertex`, in path order
    ///
    /// Returns `None` if `vertex` is not connected to `root` through the
    /// predecessor tree.
    pub fn path_to(&self, root: &V, vertex: &V) -> Option<Vec<E>> {
        let mut path = Vec::new();
        let mut current = vertex.clone();
        while &current != root {
            let edge = self.predecessors.get(&current)?;
            // A tree has at most |V| - 1 edges; anything longer is a cycle
            if path.len() > self.predecessors.len() {
                return None;
            }
            path.push(edge.clone());
            current = edge.source().clone();
        }
        path.reverse();
        Some(path)
    }
}

impl<V, E> Default for SearchState<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: GraphEdge<Vertex = V>,
{
    fn default() -> Self {
        Self::new()
    }
}
