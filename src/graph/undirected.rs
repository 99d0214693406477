//! Adjacency-list graph.

use crate::error::InstanceError;

/// Undirected simple graph over vertices `0..n`.
///
/// Adjacency is symmetric: `u` appears in `neighbors(v)` exactly when `v`
/// appears in `neighbors(u)`. Duplicate edges collapse into one.
///
/// # Examples
///
/// ```
/// use u_mwcs::graph::UndirectedGraph;
///
/// let graph = UndirectedGraph::new(3, &[(0, 1), (1, 2)]).unwrap();
/// assert_eq!(graph.neighbors(1), &[0, 2]);
/// assert!(graph.is_connected(&[0, 1, 2]));
/// assert!(!graph.is_connected(&[0, 2]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndirectedGraph {
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl UndirectedGraph {
    /// Builds a graph from an edge list.
    ///
    /// Fails on an endpoint outside `0..vertex_count` or on a self-loop.
    pub fn new(vertex_count: usize, edges: &[(usize, usize)]) -> Result<Self, InstanceError> {
        let mut adjacency = vec![Vec::new(); vertex_count];
        for &(u, v) in edges {
            if u >= vertex_count || v >= vertex_count {
                return Err(InstanceError::EdgeOutOfRange { u, v, vertex_count });
            }
            if u == v {
                return Err(InstanceError::SelfLoop { vertex: u });
            }
            adjacency[u].push(v);
            adjacency[v].push(u);
        }

        let mut degree_sum = 0;
        for list in &mut adjacency {
            list.sort_unstable();
            list.dedup();
            degree_sum += list.len();
        }

        Ok(Self {
            adjacency,
            edge_count: degree_sum / 2,
        })
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Neighbors of `v` in ascending order.
    #[inline]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adjacency[v]
    }

    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    /// Returns `true` if the subgraph induced by `subset` is connected.
    ///
    /// A single vertex is connected. The empty subset is treated as
    /// vacuously connected, which keeps "removing `v` leaves the rest
    /// connected" true for a one-vertex selection.
    pub fn is_connected(&self, subset: &[usize]) -> bool {
        let Some(&start) = subset.first() else {
            return true;
        };

        let mut member = vec![false; self.vertex_count()];
        for &v in subset {
            member[v] = true;
        }

        let mut visited = vec![false; self.vertex_count()];
        let mut stack = vec![start];
        visited[start] = true;
        let mut reached = 1usize;

        while let Some(v) = stack.pop() {
            for &u in &self.adjacency[v] {
                if member[u] && !visited[u] {
                    visited[u] = true;
                    reached += 1;
                    stack.push(u);
                }
            }
        }

        // `subset` may repeat vertices; count distinct members.
        let distinct = member.iter().filter(|&&m| m).count();
        reached == distinct
    }

    /// A vertex of maximum degree, lowest index on ties.
    ///
    /// Returns `None` for the empty graph.
    pub fn highest_degree_vertex(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (v, list) in self.adjacency.iter().enumerate() {
            match best {
                Some((_, degree)) if degree >= list.len() => {}
                _ => best = Some((v, list.len())),
            }
        }
        best.map(|(v, _)| v)
    }
}
