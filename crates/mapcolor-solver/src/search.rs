//! Backtracking search with forward checking.
//!
//! The search is depth-first over an explicit stack of frames rather than
//! native recursion, so deep graphs cannot overflow the call stack. Each frame
//! owns one variable, the colors it may still try, and the journal mark taken
//! when its current color was committed. Exploration order is exactly that of
//! the recursive formulation:
//!
//! 1. All variables assigned: success.
//! 2. Select a variable; push a frame with a copy of its current domain.
//! 3. For each candidate in domain order: skip if inconsistent, commit, narrow
//!    the variable's own domain, forward check. A wipeout undoes the commit
//!    and moves on to the next candidate; otherwise descend (back to 1).
//! 4. Candidates exhausted: pop the frame, and the parent undoes its own
//!    commit and tries its next candidate. Popping the root frame means
//!    there is no solution.
//!
//! Undo is a single journal rewind to the frame's mark, which restores both
//! the narrowing and the pruning done for that commit.

use log::{debug, trace};
use serde::Serialize;

use crate::cancel::Cancellation;
use crate::consistency::is_consistent;
use crate::domain::{DomainStore, Mark};
use crate::heuristic::{select_variable, HeuristicConfig};
use crate::observer::StepObserver;
use crate::problem::Problem;
use crate::propagate::forward_check;
use crate::{Assignment, Value, Variable};

/// Outcome of a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult<V, C> {
    /// A complete, conflict-free assignment within every initial domain.
    Complete(Assignment<V, C>),
    /// The search space was exhausted without a complete assignment.
    Incomplete,
    /// Cancellation was requested before the search finished.
    Aborted,
}

impl<V, C> SolveResult<V, C> {
    pub fn is_complete(&self) -> bool {
        matches!(self, SolveResult::Complete(_))
    }

    pub fn assignment(&self) -> Option<&Assignment<V, C>> {
        match self {
            SolveResult::Complete(assignment) => Some(assignment),
            _ => None,
        }
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Tentative commits.
    pub nodes: u64,
    /// Commits undone.
    pub backtracks: u64,
    /// Colors removed from neighbour domains by forward checking.
    pub prunings: u64,
    /// Commits rejected because forward checking emptied a domain.
    pub wipeouts: u64,
    /// Deepest frame stack reached.
    pub max_depth: usize,
}

#[derive(Debug, Clone)]
pub struct SolveReport<V, C> {
    pub result: SolveResult<V, C>,
    pub stats: SearchStats,
}

struct Frame<V, C> {
    variable: V,
    candidates: Vec<C>,
    next: usize,
    committed: Option<Mark>,
}

/// One search over a validated [`Problem`].
///
/// The search owns its domain store and assignment. Both are back at their
/// initial state whenever [`Search::run`] returns.
pub struct Search<'p, V, C> {
    problem: &'p Problem<V, C>,
    config: HeuristicConfig,
    domains: DomainStore<V, C>,
    assignment: Assignment<V, C>,
    stats: SearchStats,
}

impl<'p, V: Variable, C: Value> Search<'p, V, C> {
    pub fn new(problem: &'p Problem<V, C>, config: HeuristicConfig) -> Self {
        Self {
            problem,
            config,
            domains: DomainStore::new(problem.initial_domains().clone()),
            assignment: Assignment::new(),
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> HeuristicConfig {
        self.config
    }

    pub fn domains(&self) -> &DomainStore<V, C> {
        &self.domains
    }

    pub fn run(
        &mut self,
        observer: &mut dyn StepObserver<V, C>,
        cancellation: &dyn Cancellation,
    ) -> SolveReport<V, C> {
        self.stats = SearchStats::default();
        debug!(
            "solving {} variables with {}",
            self.problem.len(),
            self.config.label()
        );

        let root = self.domains.mark();
        let mut stack: Vec<Frame<V, C>> = Vec::new();
        let result = self.explore(&mut stack, observer, cancellation);

        if matches!(result, SolveResult::Aborted) {
            while let Some(frame) = stack.pop() {
                if frame.committed.is_some() {
                    observer.on_step(&frame.variable, None);
                }
            }
        }
        self.domains.rewind(root);
        self.assignment.clear();

        debug!(
            "search finished: {} after {} nodes, {} backtracks, {} wipeouts",
            match &result {
                SolveResult::Complete(_) => "complete",
                SolveResult::Incomplete => "incomplete",
                SolveResult::Aborted => "aborted",
            },
            self.stats.nodes,
            self.stats.backtracks,
            self.stats.wipeouts
        );
        SolveReport {
            result,
            stats: self.stats,
        }
    }

    fn explore(
        &mut self,
        stack: &mut Vec<Frame<V, C>>,
        observer: &mut dyn StepObserver<V, C>,
        cancellation: &dyn Cancellation,
    ) -> SolveResult<V, C> {
        let problem = self.problem;
        let graph = problem.graph();

        loop {
            // Top of a new frame.
            if cancellation.should_abort(&self.stats) {
                return SolveResult::Aborted;
            }
            if self.assignment.len() == graph.len() {
                return SolveResult::Complete(self.assignment.clone());
            }
            let Some(variable) =
                select_variable(graph, &self.domains, &self.assignment, self.config)
            else {
                return SolveResult::Complete(self.assignment.clone());
            };
            let candidates = self.domains.domain(&variable).to_vec();
            stack.push(Frame {
                variable,
                candidates,
                next: 0,
                committed: None,
            });
            self.stats.max_depth = self.stats.max_depth.max(stack.len());

            // Advance the top frame until a commit survives propagation.
            loop {
                let Some(frame) = stack.last_mut() else {
                    return SolveResult::Incomplete;
                };

                if let Some(mark) = frame.committed.take() {
                    self.assignment.remove(&frame.variable);
                    self.domains.rewind(mark);
                    self.stats.backtracks += 1;
                    trace!("undo {:?}", frame.variable);
                    observer.on_step(&frame.variable, None);
                }

                let mut chosen = None;
                while let Some(color) = frame.candidates.get(frame.next) {
                    frame.next += 1;
                    if is_consistent(graph, &self.assignment, &frame.variable, color) {
                        chosen = Some(color.clone());
                        break;
                    }
                }
                let Some(color) = chosen else {
                    stack.pop();
                    continue;
                };

                frame.committed = Some(self.domains.mark());
                self.domains.narrow(&frame.variable, &color);
                self.assignment.insert(frame.variable.clone(), color.clone());
                self.stats.nodes += 1;
                trace!("try {:?} = {:?}", frame.variable, color);
                observer.on_step(&frame.variable, Some(&color));

                match forward_check(
                    graph,
                    &mut self.domains,
                    &self.assignment,
                    &frame.variable,
                    &color,
                ) {
                    Ok(pruned) => {
                        self.stats.prunings += pruned.len() as u64;
                        break;
                    }
                    Err(wipeout) => {
                        self.stats.prunings += wipeout.pruned.len() as u64;
                        self.stats.wipeouts += 1;
                    }
                }
            }
        }
    }
}
