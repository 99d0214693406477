//! Validated instance data.

use crate::error::InstanceError;
use crate::graph::UndirectedGraph;

/// Graph, weights, values and capacity of one knapsack-constrained
/// connected subgraph problem.
///
/// # Examples
///
/// ```
/// use u_mwcs::instance::ProblemInstance;
///
/// let instance = ProblemInstance::from_edges(
///     2.0,
///     vec![1.0, 1.0, 1.0],
///     vec![5.0, 3.0, 4.0],
///     &[(0, 1), (1, 2)],
/// )
/// .unwrap();
/// assert_eq!(instance.vertex_count(), 3);
/// assert_eq!(instance.weight(2), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    graph: UndirectedGraph,
    weights: Vec<f64>,
    values: Vec<f64>,
    capacity: f64,
}

impl ProblemInstance {
    /// Validates and assembles an instance.
    ///
    /// Weights must be finite and non-negative, values finite, and the
    /// capacity finite and non-negative. Both arrays must have one entry per
    /// vertex.
    pub fn new(
        graph: UndirectedGraph,
        capacity: f64,
        weights: Vec<f64>,
        values: Vec<f64>,
    ) -> Result<Self, InstanceError> {
        let n = graph.vertex_count();
        if weights.len() != n {
            return Err(InstanceError::WeightCountMismatch {
                expected: n,
                actual: weights.len(),
            });
        }
        if values.len() != n {
            return Err(InstanceError::ValueCountMismatch {
                expected: n,
                actual: values.len(),
            });
        }
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(InstanceError::InvalidCapacity(capacity));
        }
        if let Some((vertex, &weight)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(InstanceError::InvalidWeight { vertex, weight });
        }
        if let Some((vertex, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(InstanceError::InvalidValue { vertex, value });
        }

        Ok(Self {
            graph,
            weights,
            values,
            capacity,
        })
    }

    /// Builds the graph from `edges` and validates everything in one step.
    pub fn from_edges(
        capacity: f64,
        weights: Vec<f64>,
        values: Vec<f64>,
        edges: &[(usize, usize)],
    ) -> Result<Self, InstanceError> {
        let graph = UndirectedGraph::new(weights.len(), edges)?;
        Self::new(graph, capacity, weights, values)
    }

    #[inline]
    pub fn graph(&self) -> &UndirectedGraph {
        &self.graph
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    #[inline]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    #[inline]
    pub fn weight(&self, v: usize) -> f64 {
        self.weights[v]
    }

    #[inline]
    pub fn value(&self, v: usize) -> f64 {
        self.values[v]
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Vertices by descending value/weight ratio, lowest index first on ties.
    ///
    /// A zero-weight vertex with positive value ranks above everything else;
    /// one with zero value ranks as ratio 0.
    pub fn vertices_by_ratio(&self) -> Vec<usize> {
        let ratio = |v: usize| {
            let r = self.values[v] / self.weights[v];
            if r.is_nan() {
                0.0
            } else {
                r
            }
        };
        let mut order: Vec<usize> = (0..self.vertex_count()).collect();
        order.sort_by(|&a, &b| ratio(b).total_cmp(&ratio(a)).then(a.cmp(&b)));
        order
    }
}
