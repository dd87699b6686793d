//! Run every heuristic combination on the same problem, in parallel.
//!
//! Each mode gets its own [`LimitChecker`] over the same limits and cancel
//! token. The SAT verdict is computed without limits.

use std::collections::BTreeSet;

use mapcolor_solver::sat::{self, SatError};
use mapcolor_solver::{
    CancelToken, HeuristicConfig, NoopObserver, Problem, Search, SearchStats, SolveResult, Value,
    Variable,
};
use rayon::prelude::*;
use serde::Serialize;

use crate::limits::{LimitChecker, SolveLimits, StopReason};

/// One heuristic mode's outcome.
#[derive(Debug, Clone)]
pub struct HeuristicRun<V, C> {
    pub heuristics: HeuristicConfig,
    pub result: SolveResult<V, C>,
    pub stats: SearchStats,
    pub stop_reason: StopReason,
}

impl<V, C: Ord> HeuristicRun<V, C> {
    pub fn colors_used(&self) -> usize {
        self.result
            .assignment()
            .map_or(0, |a| a.values().collect::<BTreeSet<_>>().len())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            label: self.heuristics.label(),
            solved: self.result.is_complete(),
            colors_used: self.colors_used(),
            stats: self.stats,
            stop_reason: self.stop_reason,
        }
    }
}

/// Serializable row of a comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub label: &'static str,
    pub solved: bool,
    pub colors_used: usize,
    pub stats: SearchStats,
    pub stop_reason: StopReason,
}

/// All four modes, in [`HeuristicConfig::all`] order, plus the SAT verdict.
#[derive(Debug, Clone)]
pub struct Comparison<V, C> {
    pub runs: Vec<HeuristicRun<V, C>>,
    pub colorable: bool,
}

impl<V, C: Ord> Comparison<V, C> {
    /// Every mode that ran to completion agrees with the SAT oracle.
    pub fn is_consistent(&self) -> bool {
        self.runs
            .iter()
            .filter(|run| !matches!(run.result, SolveResult::Aborted))
            .all(|run| run.result.is_complete() == self.colorable)
    }

    pub fn summaries(&self) -> Vec<RunSummary> {
        self.runs.iter().map(HeuristicRun::summary).collect()
    }
}

pub fn compare_heuristics<V, C>(
    problem: &Problem<V, C>,
    limits: SolveLimits,
    cancel: &CancelToken,
) -> Result<Comparison<V, C>, SatError>
where
    V: Variable + Send + Sync,
    C: Value + Send + Sync,
{
    let runs = HeuristicConfig::all()
        .par_iter()
        .map(|&heuristics| {
            let checker = LimitChecker::new(limits, cancel.clone());
            let report = Search::new(problem, heuristics).run(&mut NoopObserver, &checker);
            HeuristicRun {
                heuristics,
                result: report.result,
                stats: report.stats,
                stop_reason: checker.stop_reason(),
            }
        })
        .collect();
    let colorable = sat::is_colorable(problem)?;
    Ok(Comparison { runs, colorable })
}
