//! Incremental solution state.
//!
//! [`SolutionState`] keeps a connected, capacity-feasible vertex selection
//! together with everything derived from it: the frontier of admissible
//! additions, per-vertex counts of selected neighbors, running cost and
//! value, and the cached set of vertices that can be removed without
//! disconnecting the selection.
//!
//! [`Checkpoint`] is a full value copy of that state, used for
//! snapshot/rollback around trial moves and for keeping the best solution.

mod indexed_set;
mod solution;

pub use indexed_set::IndexedSet;
pub use solution::{Checkpoint, SolutionState};
