//! Selection state with incremental bookkeeping.

use super::IndexedSet;
use crate::graph::ArticulationAnalyzer;
use crate::instance::ProblemInstance;

/// Value copy of a [`SolutionState`], taken before a trial move and either
/// dropped (commit) or handed back to [`SolutionState::restore`] (rollback).
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    selected: IndexedSet,
    frontier: IndexedSet,
    adjacency_count: Vec<u32>,
    cost: f64,
    value: f64,
    removable: Vec<usize>,
    removable_stale: bool,
}

impl Checkpoint {
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of selected vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected vertices in ascending order.
    pub fn vertices(&self) -> Vec<usize> {
        let mut vertices = self.selected.as_slice().to_vec();
        vertices.sort_unstable();
        vertices
    }
}

/// Mutable candidate solution over one [`ProblemInstance`].
///
/// Between completed moves the selection induces a connected subgraph, its
/// weight stays within capacity, `frontier` holds exactly the unselected
/// vertices with a selected neighbor, and `removable` holds exactly the
/// selected vertices that are not articulation points. Inside a move these
/// may be violated transiently: [`add`](Self::add) does not check capacity,
/// and [`remove`](Self::remove) trusts the caller to pick from
/// [`removable`](Self::removable).
///
/// # Examples
///
/// ```
/// use u_mwcs::instance::ProblemInstance;
/// use u_mwcs::state::SolutionState;
///
/// let instance = ProblemInstance::from_edges(
///     2.0,
///     vec![1.0, 1.0, 1.0],
///     vec![5.0, 3.0, 4.0],
///     &[(0, 1), (1, 2)],
/// )
/// .unwrap();
/// let mut state = SolutionState::new(&instance);
/// assert!(state.can_add(0));
/// state.add(0);
/// assert!(!state.can_add(2)); // not adjacent to the selection
/// state.add(1);
/// assert_eq!(state.value(), 8.0);
/// assert!(!state.can_add(2)); // over capacity
/// ```
#[derive(Debug, Clone)]
pub struct SolutionState<'p> {
    instance: &'p ProblemInstance,
    selected: IndexedSet,
    frontier: IndexedSet,
    adjacency_count: Vec<u32>,
    cost: f64,
    value: f64,
    removable: Vec<usize>,
    removable_stale: bool,
    analyzer: ArticulationAnalyzer,
}

impl<'p> SolutionState<'p> {
    /// Creates an empty selection.
    pub fn new(instance: &'p ProblemInstance) -> Self {
        let n = instance.vertex_count();
        Self {
            instance,
            selected: IndexedSet::new(n),
            frontier: IndexedSet::new(n),
            adjacency_count: vec![0; n],
            cost: 0.0,
            value: 0.0,
            removable: Vec::new(),
            removable_stale: false,
            analyzer: ArticulationAnalyzer::new(n),
        }
    }

    #[inline]
    pub fn instance(&self) -> &'p ProblemInstance {
        self.instance
    }

    #[inline]
    pub fn selected(&self) -> &IndexedSet {
        &self.selected
    }

    #[inline]
    pub fn frontier(&self) -> &IndexedSet {
        &self.frontier
    }

    /// Number of selected neighbors of `v`.
    #[inline]
    pub fn adjacency_count(&self, v: usize) -> u32 {
        self.adjacency_count[v]
    }

    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    #[inline]
    pub fn is_within_capacity(&self) -> bool {
        self.cost <= self.instance.capacity()
    }

    /// Whether `v` fits in the remaining capacity.
    #[inline]
    pub fn fits(&self, v: usize) -> bool {
        self.instance.weight(v) + self.cost <= self.instance.capacity()
    }

    /// Admission test: `v` fits and touches the selection (or the selection
    /// is empty).
    pub fn can_add(&self, v: usize) -> bool {
        if self.selected.contains(v) || !self.fits(v) {
            return false;
        }
        self.selected.is_empty() || self.frontier.contains(v)
    }

    /// Adds `v` to the selection.
    ///
    /// `v` must be unselected and either on the frontier or the first vertex
    /// of an empty selection. Capacity is not checked.
    pub fn add(&mut self, v: usize) {
        debug_assert!(!self.selected.contains(v), "vertex {v} already selected");
        debug_assert!(
            self.selected.is_empty() || self.frontier.contains(v),
            "vertex {v} is not adjacent to the selection"
        );

        let instance = self.instance;
        self.selected.insert(v);
        self.frontier.remove(v);
        for &u in instance.graph().neighbors(v) {
            self.adjacency_count[u] += 1;
            if !self.selected.contains(u) {
                self.frontier.insert(u);
            }
        }
        self.cost += instance.weight(v);
        self.value += instance.value(v);
        self.removable_stale = true;
    }

    /// Removes `v` from the selection.
    ///
    /// Connectivity of what remains is the caller's responsibility; draw `v`
    /// from [`removable`](Self::removable).
    pub fn remove(&mut self, v: usize) {
        debug_assert!(self.selected.contains(v), "vertex {v} is not selected");

        let instance = self.instance;
        self.selected.remove(v);
        if self.adjacency_count[v] > 0 {
            self.frontier.insert(v);
        }
        for &u in instance.graph().neighbors(v) {
            self.adjacency_count[u] -= 1;
            if self.adjacency_count[u] == 0 {
                self.frontier.remove(u);
            }
        }

        if self.selected.is_empty() {
            // drop accumulated rounding error
            self.cost = 0.0;
            self.value = 0.0;
        } else {
            self.cost -= instance.weight(v);
            self.value -= instance.value(v);
        }
        self.removable_stale = true;
    }

    /// Recomputes the removable-vertex cache from scratch.
    pub fn refresh_removable(&mut self) {
        self.analyzer.removable_vertices(
            self.instance.graph(),
            self.selected.as_slice(),
            &mut self.removable,
        );
        self.removable_stale = false;
    }

    /// Selected vertices whose removal keeps the selection connected.
    ///
    /// Only valid after [`refresh_removable`](Self::refresh_removable)
    /// following the last structural change.
    #[inline]
    pub fn removable(&self) -> &[usize] {
        debug_assert!(!self.removable_stale, "removable set read while stale");
        &self.removable
    }

    #[inline]
    pub fn is_removable_stale(&self) -> bool {
        self.removable_stale
    }

    /// Copies every derived field into a [`Checkpoint`].
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            selected: self.selected.clone(),
            frontier: self.frontier.clone(),
            adjacency_count: self.adjacency_count.clone(),
            cost: self.cost,
            value: self.value,
            removable: self.removable.clone(),
            removable_stale: self.removable_stale,
        }
    }

    /// Replaces the current state with `checkpoint`.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        debug_assert_eq!(
            checkpoint.adjacency_count.len(),
            self.adjacency_count.len(),
            "checkpoint from a different instance"
        );
        self.selected = checkpoint.selected;
        self.frontier = checkpoint.frontier;
        self.adjacency_count = checkpoint.adjacency_count;
        self.cost = checkpoint.cost;
        self.value = checkpoint.value;
        self.removable = checkpoint.removable;
        self.removable_stale = checkpoint.removable_stale;
    }

    /// Selected vertices in ascending order.
    pub fn vertices(&self) -> Vec<usize> {
        let mut vertices = self.selected.as_slice().to_vec();
        vertices.sort_unstable();
        vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 - 1 - 2 - 3 with a chord 1 - 3
    fn instance() -> ProblemInstance {
        ProblemInstance::from_edges(
            3.0,
            vec![1.0, 1.0, 1.0, 1.0],
            vec![5.0, 3.0, 4.0, 2.0],
            &[(0, 1), (1, 2), (2, 3), (1, 3)],
        )
        .unwrap()
    }

    fn assert_frontier_consistent(state: &SolutionState<'_>) {
        let n = state.instance().vertex_count();
        for v in 0..n {
            let expected = state
                .instance()
                .graph()
                .neighbors(v)
                .iter()
                .filter(|&&u| state.selected().contains(u))
                .count() as u32;
            assert_eq!(state.adjacency_count(v), expected, "count of {v}");
            let on_frontier = !state.selected().contains(v) && expected > 0;
            assert_eq!(state.frontier().contains(v), on_frontier, "frontier of {v}");
        }
    }

    #[test]
    fn test_empty_state_admits_any_fitting_vertex() {
        let instance = instance();
        let state = SolutionState::new(&instance);
        assert!((0..4).all(|v| state.can_add(v)));
        assert!(state.frontier().is_empty());
    }

    #[test]
    fn test_add_updates_frontier_and_totals() {
        let instance = instance();
        let mut state = SolutionState::new(&instance);
        state.add(1);
        assert_frontier_consistent(&state);
        assert_eq!(state.frontier().len(), 3);
        state.add(3);
        assert_frontier_consistent(&state);
        assert_eq!(state.adjacency_count(2), 2);
        assert_eq!(state.cost(), 2.0);
        assert_eq!(state.value(), 5.0);
        assert!(!state.can_add(1));
    }

    #[test]
    fn test_remove_updates_frontier_and_totals() {
        let instance = instance();
        let mut state = SolutionState::new(&instance);
        state.add(0);
        state.add(1);
        state.add(2);
        state.remove(0);
        assert_frontier_consistent(&state);
        assert!(state.frontier().contains(0));
        assert_eq!(state.value(), 7.0);

        state.remove(2);
        state.remove(1);
        assert_frontier_consistent(&state);
        assert!(state.is_empty());
        assert!(state.frontier().is_empty());
        assert_eq!(state.cost(), 0.0);
        assert_eq!(state.value(), 0.0);
    }

    #[test]
    fn test_can_add_respects_capacity() {
        let instance = instance();
        let mut state = SolutionState::new(&instance);
        state.add(0);
        state.add(1);
        state.add(2);
        assert!(state.frontier().contains(3));
        assert!(!state.can_add(3));
    }

    #[test]
    fn test_removable_refresh() {
        let instance = instance();
        let mut state = SolutionState::new(&instance);
        state.add(0);
        state.add(1);
        state.add(2);
        assert!(state.is_removable_stale());
        state.refresh_removable();
        let mut removable = state.removable().to_vec();
        removable.sort_unstable();
        assert_eq!(removable, vec![0, 2]);
    }

    #[test]
    fn test_checkpoint_restore_is_exact() {
        let instance = instance();
        let mut state = SolutionState::new(&instance);
        state.add(1);
        state.add(2);
        state.refresh_removable();
        let before = state.checkpoint();

        state.add(3);
        state.remove(2);
        state.add(0);
        state.refresh_removable();
        assert_ne!(state.checkpoint(), before);

        state.restore(before.clone());
        assert_eq!(state.checkpoint(), before);
        assert_frontier_consistent(&state);
        assert_eq!(before.vertices(), vec![1, 2]);
        assert_eq!(before.value(), 7.0);
    }
}
