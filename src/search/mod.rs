//! Numerical search for a delta satisfying the continuity bound
//!
//! For a point `a` and tolerance `epsilon` the search scans candidate deltas
//! in ascending order. A candidate holds when every sample in `[a - delta, a]`
//! and `[a, a + delta]` evaluates finite and lies strictly within `epsilon` of
//! `f(a)`. The first candidate that holds is returned.

mod engine;
mod policy;
mod query;
mod sweep;

pub use engine::{DeltaResult, DeltaSearch, search};
pub use policy::{
    DEFAULT_BOUNDED_CANDIDATES, DEFAULT_FIXED_CANDIDATES, DEFAULT_MAX_DELTA, DEFAULT_MIN_DELTA,
    DEFAULT_SAMPLES_PER_SIDE, PolicyKind, SearchPolicy,
};
pub use query::{ContinuityQuery, QueryError, QueryResult};
pub use sweep::{EpsilonGrid, SweepRow, SweepTable, sweep, sweep_grid};
