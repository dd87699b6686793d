//! Map coloring as a constraint satisfaction problem.
//!
//! Search engine layers, leaf first:
//! - [`domain`]: per-variable admissible colors with an undo journal.
//! - [`graph`]: symmetric adjacency, fixed for the duration of a solve.
//! - [`heuristic`]: MRV / degree variable ordering.
//! - [`consistency`] and [`propagate`]: legality check and forward checking.
//! - [`search`]: depth-first backtracking over an explicit frame stack.
//! - [`greedy`]: degree-ordered single pass, used when search comes back empty.
//!
//! Variables and colors are opaque: any `Ord + Clone + Debug` key works as a
//! variable, any `Clone + Eq + Debug` value as a color.

pub mod cancel;
pub mod consistency;
pub mod domain;
pub mod generate;
pub mod graph;
pub mod greedy;
pub mod heuristic;
pub mod observer;
pub mod problem;
pub mod propagate;
pub mod sat;
pub mod search;
pub mod validate;

use std::collections::BTreeMap;
use std::fmt::Debug;

pub use cancel::{CancelToken, Cancellation, NeverCancel};
pub use graph::{Adjacency, ConstraintGraph};
pub use heuristic::HeuristicConfig;
pub use observer::{NoopObserver, StepEvent, StepObserver, StepRecorder};
pub use problem::{Problem, SolveError};
pub use search::{Search, SearchStats, SolveReport, SolveResult};

/// Identity of a CSP variable (a region).
pub trait Variable: Ord + Clone + Debug {}
impl<T: Ord + Clone + Debug> Variable for T {}

/// A color value drawn from a palette.
pub trait Value: Clone + Eq + Debug {}
impl<T: Clone + Eq + Debug> Value for T {}

/// Committed colors, keyed by variable.
pub type Assignment<V, C> = BTreeMap<V, C>;

/// Greedy output: a color per variable, `None` where no palette color was free.
pub type GreedyColoring<V, C> = BTreeMap<V, Option<C>>;

/// Validate the input and run backtracking search with forward checking.
pub fn solve<V: Variable, C: Value>(
    variables: &[V],
    adjacency: &Adjacency<V>,
    initial_domains: &BTreeMap<V, Vec<C>>,
    config: HeuristicConfig,
) -> Result<SolveResult<V, C>, SolveError> {
    let problem = Problem::new(variables, adjacency, initial_domains)?;
    let report = Search::new(&problem, config).run(&mut NoopObserver, &NeverCancel);
    Ok(report.result)
}

/// Validate the input and color it greedily by descending degree.
pub fn greedy_color<V: Variable, C: Value>(
    variables: &[V],
    adjacency: &Adjacency<V>,
    palette: &[C],
) -> Result<GreedyColoring<V, C>, SolveError> {
    if palette.is_empty() {
        return Err(SolveError::EmptyPalette);
    }
    let graph = ConstraintGraph::build(variables, adjacency)?;
    Ok(greedy::greedy_color(&graph, palette))
}
