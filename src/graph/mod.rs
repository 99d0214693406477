//! Static undirected graph and cut-vertex analysis.
//!
//! [`UndirectedGraph`] is built once from an edge list and never mutated.
//! [`ArticulationAnalyzer`] finds the vertices of an induced subgraph whose
//! removal keeps it connected.
//!
//! Both traversals use an explicit stack, so deep graphs cannot overflow
//! the call stack.
//!
//! # References
//!
//! - Hopcroft & Tarjan (1973), "Algorithm 447: Efficient Algorithms for
//!   Graph Manipulation"

mod articulation;
mod undirected;

pub use articulation::ArticulationAnalyzer;
pub use undirected::UndirectedGraph;
