//! Move generation.

use rand::Rng;

use crate::state::SolutionState;

/// Which of the two move shapes was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    GrowThenShrink,
    ShrinkThenGrow,
}

/// Applies one randomized move per call.
///
/// The state's removable set must be fresh on entry; it is fresh again on
/// return. Drawing from an empty candidate set is a no-op for that step.
///
/// An empty selection has no frontier, so while the selection is empty every
/// vertex that fits the capacity counts as an add candidate. Without that a
/// move that removed the last vertex would strand the search.
#[derive(Debug, Clone)]
pub struct MoveGenerator {
    grow_probability: f64,
    candidates: Vec<usize>,
}

impl MoveGenerator {
    /// `grow_probability` is the chance of a grow-then-shrink move, in `[0, 1]`.
    pub fn new(grow_probability: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&grow_probability));
        Self {
            grow_probability,
            candidates: Vec::new(),
        }
    }

    /// Picks a move shape and applies it.
    pub fn apply<R: Rng>(&mut self, state: &mut SolutionState<'_>, rng: &mut R) -> MoveKind {
        if rng.random_bool(self.grow_probability) {
            self.grow_then_shrink(state, rng);
            MoveKind::GrowThenShrink
        } else {
            self.shrink_then_grow(state, rng);
            MoveKind::ShrinkThenGrow
        }
    }

    /// Adds a random frontier vertex, then removes random removable vertices
    /// until the selection is back within capacity.
    pub fn grow_then_shrink<R: Rng>(&mut self, state: &mut SolutionState<'_>, rng: &mut R) {
        let pick = if state.is_empty() {
            self.collect_feasible(state);
            choose(&self.candidates, rng)
        } else {
            state.frontier().choose(rng)
        };
        if let Some(v) = pick {
            state.add(v);
            state.refresh_removable();
        }

        while !state.is_within_capacity() {
            let Some(v) = choose(state.removable(), rng) else {
                break;
            };
            state.remove(v);
            // removing one vertex can turn others into cut vertices
            state.refresh_removable();
        }
    }

    /// Removes a random removable vertex, then adds random frontier vertices
    /// that fit until none is left.
    pub fn shrink_then_grow<R: Rng>(&mut self, state: &mut SolutionState<'_>, rng: &mut R) {
        if let Some(v) = choose(state.removable(), rng) {
            state.remove(v);
        }

        loop {
            self.collect_feasible(state);
            let Some(v) = choose(&self.candidates, rng) else {
                break;
            };
            state.add(v);
        }

        if state.is_removable_stale() {
            state.refresh_removable();
        }
    }

    /// Fills `candidates` with the unselected vertices that may be added
    /// without exceeding capacity.
    fn collect_feasible(&mut self, state: &SolutionState<'_>) {
        self.candidates.clear();
        if state.is_empty() {
            let n = state.instance().vertex_count();
            self.candidates.extend((0..n).filter(|&v| state.fits(v)));
        } else {
            self.candidates
                .extend(state.frontier().iter().filter(|&v| state.fits(v)));
        }
    }
}

fn choose<R: Rng>(items: &[usize], rng: &mut R) -> Option<usize> {
    if items.is_empty() {
        None
    } else {
        Some(items[rng.random_range(0..items.len())])
    }
}
