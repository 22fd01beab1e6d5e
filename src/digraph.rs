//! Edge-weighted directed graph and single source shortest paths over it.
//!
//! The assignment solver only talks to [`ShortestPathOracle`], so any algorithm that handles
//! non-negative edge weights can replace [`DijkstraSP`].

use crate::error::{AssignmentError, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::trace;

/// Weighted arc `from -> to`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectedEdge {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

impl DirectedEdge {
    pub fn new(from: usize, to: usize, weight: f64) -> Self {
        Self { from, to, weight }
    }
}

/// Adjacency list digraph with a fixed number of vertices
#[derive(Debug, Clone)]
pub struct EdgeWeightedDigraph {
    adj: Vec<Vec<DirectedEdge>>,
    num_edges: usize,
}

impl EdgeWeightedDigraph {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            adj: vec![Vec::new(); num_vertices],
            num_edges: 0,
        }
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn add_edge(&mut self, edge: DirectedEdge) -> Result<()> {
        let num_vertices = self.num_vertices();
        if edge.from >= num_vertices || edge.to >= num_vertices {
            return Err(AssignmentError::InvalidInput(format!(
                "edge {}->{} leaves the vertex range 0..{}",
                edge.from, edge.to, num_vertices
            )));
        }
        if edge.weight.is_nan() {
            return Err(AssignmentError::InvalidInput(format!(
                "edge {}->{} has NaN weight",
                edge.from, edge.to
            )));
        }
        self.adj[edge.from].push(edge);
        self.num_edges += 1;
        Ok(())
    }

    /// Edges leaving vertex v
    #[inline]
    pub fn adj(&self, v: usize) -> &[DirectedEdge] {
        &self.adj[v]
    }

    pub fn edges(&self) -> impl Iterator<Item = &DirectedEdge> {
        self.adj.iter().flatten()
    }
}

/// Single source shortest path query over a digraph with non-negative edge weights
pub trait ShortestPathOracle: Sized {
    /// Computes shortest paths from `source` to every vertex of `graph`.
    fn search(graph: &EdgeWeightedDigraph, source: usize) -> Result<Self>;

    /// Length of the shortest path to v, `f64::INFINITY` if v is unreachable.
    fn dist_to(&self, v: usize) -> f64;

    fn has_path_to(&self, v: usize) -> bool {
        self.dist_to(v) < f64::INFINITY
    }

    /// Edges of a shortest path ordered from the source to v, `None` if v is unreachable.
    fn path_to(&self, v: usize) -> Option<Vec<DirectedEdge>>;
}

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    dist: f64,
    vertex: usize,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, flip the order to pop the closest vertex first
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

///
/// Dijkstra's algorithm with a binary heap and lazy deletion of stale entries
///
#[derive(Debug, Clone)]
pub struct DijkstraSP {
    source: usize,
    dist_to: Vec<f64>,
    edge_to: Vec<Option<DirectedEdge>>,
}

impl ShortestPathOracle for DijkstraSP {
    fn search(graph: &EdgeWeightedDigraph, source: usize) -> Result<Self> {
        let num_vertices = graph.num_vertices();
        if source >= num_vertices {
            return Err(AssignmentError::InvalidInput(format!(
                "source {} is not between 0 and {}",
                source,
                num_vertices as i64 - 1
            )));
        }
        if let Some(edge) = graph.edges().find(|e| e.weight < 0.) {
            return Err(AssignmentError::InvalidInput(format!(
                "edge {}->{} has negative weight {}",
                edge.from, edge.to, edge.weight
            )));
        }

        let mut dist_to = vec![f64::INFINITY; num_vertices];
        let mut edge_to = vec![None; num_vertices];
        let mut settled = vec![false; num_vertices];
        let mut heap = BinaryHeap::with_capacity(num_vertices);

        dist_to[source] = 0.;
        heap.push(HeapEntry {
            dist: 0.,
            vertex: source,
        });

        while let Some(HeapEntry { dist, vertex }) = heap.pop() {
            if settled[vertex] || dist > dist_to[vertex] {
                continue;
            }
            settled[vertex] = true;

            for edge in graph.adj(vertex) {
                let candidate = dist + edge.weight;
                if candidate < dist_to[edge.to] {
                    dist_to[edge.to] = candidate;
                    edge_to[edge.to] = Some(*edge);
                    heap.push(HeapEntry {
                        dist: candidate,
                        vertex: edge.to,
                    });
                }
            }
        }
        trace!("dist_to: {:?}", dist_to);

        Ok(Self {
            source,
            dist_to,
            edge_to,
        })
    }

    #[inline]
    fn dist_to(&self, v: usize) -> f64 {
        self.dist_to[v]
    }

    fn path_to(&self, v: usize) -> Option<Vec<DirectedEdge>> {
        if !self.has_path_to(v) {
            return None;
        }
        let mut path = Vec::new();
        let mut current = v;
        while current != self.source {
            let edge = self.edge_to[current]?;
            path.push(edge);
            current = edge.from;
        }
        path.reverse();
        Some(path)
    }
}
