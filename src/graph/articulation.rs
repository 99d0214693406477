//! Cut-vertex detection on induced subgraphs.

use super::UndirectedGraph;

const UNVISITED: u32 = u32::MAX;
const NO_PARENT: usize = usize::MAX;

/// Finds the removable (non-articulation) vertices of an induced subgraph.
///
/// A single depth-first traversal records each vertex's discovery depth and
/// low-link. A non-root vertex `v` is an articulation point iff some DFS
/// child `c` has `low[c] >= depth[v]`; the root is one iff it has more than
/// one DFS child. Everything else can be removed without disconnecting the
/// subgraph.
///
/// Scratch buffers are kept between calls and reset only for the vertices a
/// call touched, so each call costs `O(|S| + deg(S))` regardless of graph
/// size.
///
/// # Examples
///
/// ```
/// use u_mwcs::graph::{ArticulationAnalyzer, UndirectedGraph};
///
/// // 0 - 1 - 2 - 3
/// let graph = UndirectedGraph::new(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
/// let mut analyzer = ArticulationAnalyzer::new(graph.vertex_count());
/// let mut removable = Vec::new();
/// analyzer.removable_vertices(&graph, &[0, 1, 2], &mut removable);
/// removable.sort();
/// assert_eq!(removable, vec![0, 2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArticulationAnalyzer {
    member: Vec<bool>,
    depth: Vec<u32>,
    low: Vec<u32>,
    parent: Vec<usize>,
    next_edge: Vec<usize>,
    articulation: Vec<bool>,
    stack: Vec<usize>,
}

impl ArticulationAnalyzer {
    /// Creates an analyzer with scratch space for `vertex_count` vertices.
    pub fn new(vertex_count: usize) -> Self {
        let mut analyzer = Self::default();
        analyzer.ensure_capacity(vertex_count);
        analyzer
    }

    fn ensure_capacity(&mut self, vertex_count: usize) {
        if self.member.len() < vertex_count {
            self.member.resize(vertex_count, false);
            self.depth.resize(vertex_count, UNVISITED);
            self.low.resize(vertex_count, UNVISITED);
            self.parent.resize(vertex_count, NO_PARENT);
            self.next_edge.resize(vertex_count, 0);
            self.articulation.resize(vertex_count, false);
        }
    }

    /// Writes into `out` the vertices of `vertices` whose removal leaves the
    /// induced subgraph connected, in the order they appear in `vertices`.
    ///
    /// `vertices` is expected to induce a connected subgraph. Vertices the
    /// traversal cannot reach from the first one are never reported.
    pub fn removable_vertices(
        &mut self,
        graph: &UndirectedGraph,
        vertices: &[usize],
        out: &mut Vec<usize>,
    ) {
        out.clear();
        let Some(&root) = vertices.first() else {
            return;
        };
        self.ensure_capacity(graph.vertex_count());

        for &v in vertices {
            self.member[v] = true;
        }

        let root_children = self.traverse(graph, root);
        if root_children > 1 {
            self.articulation[root] = true;
        }

        debug_assert!(
            vertices.iter().all(|&v| self.depth[v] != UNVISITED),
            "induced subgraph is not connected"
        );

        out.extend(
            vertices
                .iter()
                .copied()
                .filter(|&v| self.depth[v] != UNVISITED && !self.articulation[v]),
        );

        for &v in vertices {
            self.member[v] = false;
            self.depth[v] = UNVISITED;
            self.low[v] = UNVISITED;
            self.parent[v] = NO_PARENT;
            self.next_edge[v] = 0;
            self.articulation[v] = false;
        }
    }

    /// Iterative DFS from `root` over member vertices. Returns the number of
    /// DFS children of the root.
    fn traverse(&mut self, graph: &UndirectedGraph, root: usize) -> usize {
        let mut root_children = 0;
        self.depth[root] = 0;
        self.low[root] = 0;
        self.stack.clear();
        self.stack.push(root);

        while let Some(&v) = self.stack.last() {
            let adjacent = graph.neighbors(v);
            if let Some(&u) = adjacent.get(self.next_edge[v]) {
                self.next_edge[v] += 1;
                if !self.member[u] {
                    continue;
                }
                if self.depth[u] == UNVISITED {
                    self.parent[u] = v;
                    self.depth[u] = self.depth[v] + 1;
                    self.low[u] = self.depth[u];
                    self.stack.push(u);
                    if v == root {
                        root_children += 1;
                    }
                } else if u != self.parent[v] {
                    // back edge
                    self.low[v] = self.low[v].min(self.depth[u]);
                }
                continue;
            }

            self.stack.pop();
            if let Some(&p) = self.stack.last() {
                self.low[p] = self.low[p].min(self.low[v]);
                if p != root && self.low[v] >= self.depth[p] {
                    self.articulation[p] = true;
                }
            }
        }

        root_children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn removable(graph: &UndirectedGraph, vertices: &[usize]) -> Vec<usize> {
        let mut analyzer = ArticulationAnalyzer::new(graph.vertex_count());
        let mut out = Vec::new();
        analyzer.removable_vertices(graph, vertices, &mut out);
        out.sort_unstable();
        out
    }

    #[test]
    fn test_empty_selection() {
        let graph = UndirectedGraph::new(3, &[(0, 1)]).unwrap();
        assert!(removable(&graph, &[]).is_empty());
    }

    #[test]
    fn test_single_vertex_is_removable() {
        let graph = UndirectedGraph::new(3, &[(0, 1)]).unwrap();
        assert_eq!(removable(&graph, &[2]), vec![2]);
    }

    #[test]
    fn test_path_middle_is_articulation() {
        let graph = UndirectedGraph::new(3, &[(0, 1), (1, 2)]).unwrap();
        assert_eq!(removable(&graph, &[0, 1, 2]), vec![0, 2]);
        // Root in the middle: two DFS children.
        assert_eq!(removable(&graph, &[1, 0, 2]), vec![0, 2]);
    }

    #[test]
    fn test_cycle_has_no_articulation() {
        let graph = UndirectedGraph::new(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        assert_eq!(removable(&graph, &[2, 0, 1, 3]), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_bowtie_center() {
        // Two triangles sharing vertex 2.
        let graph =
            UndirectedGraph::new(5, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)]).unwrap();
        assert_eq!(removable(&graph, &[0, 1, 2, 3, 4]), vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_induced_subgraph_only() {
        // Cycle 0-1-2-3-0; without 3 the rest is a path with 1 in the middle.
        let graph = UndirectedGraph::new(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        assert_eq!(removable(&graph, &[0, 1, 2]), vec![0, 2]);
    }

    #[test]
    fn test_scratch_reset_between_calls() {
        let graph = UndirectedGraph::new(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let mut analyzer = ArticulationAnalyzer::new(4);
        let mut out = Vec::new();
        analyzer.removable_vertices(&graph, &[0, 1, 2, 3], &mut out);
        out.sort_unstable();
        assert_eq!(out, vec![0, 3]);
        analyzer.removable_vertices(&graph, &[2, 3], &mut out);
        out.sort_unstable();
        assert_eq!(out, vec![2, 3]);
    }

    #[test]
    fn test_deep_path_does_not_overflow() {
        let n = 200_000;
        let edges: Vec<(usize, usize)> = (1..n).map(|v| (v - 1, v)).collect();
        let graph = UndirectedGraph::new(n, &edges).unwrap();
        let vertices: Vec<usize> = (0..n).collect();
        assert_eq!(removable(&graph, &vertices), vec![0, n - 1]);
    }
}
