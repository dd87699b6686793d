//! The "auto color" operation and the in-memory map registry.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use mapcolor_ir::parse::{parse_map, ParseError};
use mapcolor_ir::types::HeuristicToggles;
use mapcolor_ir::{Color, MapError, RegionId, RegionMap};
use mapcolor_solver::greedy::greedy_color;
use mapcolor_solver::observer::Paced;
use mapcolor_solver::sat::SatError;
use mapcolor_solver::validate::coloring_conflicts;
use mapcolor_solver::{
    CancelToken, HeuristicConfig, Problem, Search, SearchStats, SolveError, SolveResult,
    StepObserver,
};
use serde::Serialize;

use crate::config::SolverOptions;
use crate::limits::{LimitChecker, StopReason};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Map parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid map: {0}")]
    Map(#[from] MapError),

    #[error("Invalid problem: {0}")]
    Solve(#[from] SolveError),

    #[error("SAT oracle error: {0}")]
    Sat(#[from] SatError),

    #[error("Options error: {0}")]
    Options(#[from] serde_json::Error),

    #[error("Unknown map: {0}")]
    UnknownMap(String),
}

/// How the coloring in a report was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColoringMethod {
    /// Backtracking search found a proper coloring.
    Backtracking,
    /// Search found nothing; the greedy pass colored what it could.
    GreedyFallback,
    /// Search found nothing and the fallback was disabled.
    Unsolved,
    /// A limit or the user stopped the search.
    Aborted,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColoringReport {
    pub method: ColoringMethod,
    pub heuristics: HeuristicConfig,
    /// Every region, `None` where it was left uncolored.
    pub coloring: BTreeMap<RegionId, Option<Color>>,
    pub colors_used: usize,
    pub unassigned: Vec<RegionId>,
    /// Bordering regions that ended up with the same color.
    pub conflicts: Vec<(RegionId, RegionId)>,
    pub stats: SearchStats,
    pub stop_reason: StopReason,
}

impl ColoringReport {
    fn new(
        method: ColoringMethod,
        heuristics: HeuristicConfig,
        coloring: BTreeMap<RegionId, Option<Color>>,
        problem: &Problem<RegionId, Color>,
        stats: SearchStats,
        stop_reason: StopReason,
    ) -> Self {
        let colors_used = coloring
            .values()
            .flatten()
            .collect::<BTreeSet<_>>()
            .len();
        let unassigned = coloring
            .iter()
            .filter(|(_, c)| c.is_none())
            .map(|(id, _)| *id)
            .collect();
        let conflicts = coloring_conflicts(problem.graph(), &coloring)
            .into_iter()
            .map(|c| (c.a, c.b))
            .collect();
        Self {
            method,
            heuristics,
            coloring,
            colors_used,
            unassigned,
            conflicts,
            stats,
            stop_reason,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.method == ColoringMethod::Backtracking
    }

    /// Show this coloring on `map`.
    pub fn apply(&self, map: &mut RegionMap) {
        map.apply_coloring(&self.coloring);
    }
}

impl fmt::Display for ColoringReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.method {
            ColoringMethod::Backtracking => write!(
                f,
                "Map colored successfully using {} colors ({} + Forward Checking).",
                self.colors_used,
                self.heuristics.label()
            ),
            ColoringMethod::GreedyFallback => {
                writeln!(
                    f,
                    "No valid coloring found with current palette; using greedy fallback."
                )?;
                write!(
                    f,
                    "Map colored using {} colors (Greedy Degree Fallback).",
                    self.colors_used
                )?;
                if !self.unassigned.is_empty() {
                    let ids: Vec<String> = self.unassigned.iter().map(u32::to_string).collect();
                    write!(f, "\nRegions left uncolored: {}.", ids.join(", "))?;
                }
                Ok(())
            }
            ColoringMethod::Unsolved => {
                write!(f, "No valid coloring found with current palette.")
            }
            ColoringMethod::Aborted => write!(f, "Coloring stopped: {}.", self.stop_reason),
        }
    }
}

/// One-line summary of a map, as shown above the canvas.
pub fn status_line(map: &RegionMap, heuristics: HeuristicConfig) -> String {
    let on_off = |b: bool| if b { "ON" } else { "OFF" };
    let mut line = format!("Regions: {}", map.len());
    let used = map.colors_used();
    if used > 0 {
        line.push_str(&format!(" | Colors: {used}"));
    }
    line.push_str(&format!(
        " | MRV={} | Degree={}",
        on_off(heuristics.use_mrv),
        on_off(heuristics.use_degree)
    ));
    line
}

/// Color `map`: backtracking with forward checking, then the greedy pass
/// over the map palette if the search comes back empty.
///
/// `map` is not modified; use [`ColoringReport::apply`] to show the result.
pub fn auto_color(
    map: &RegionMap,
    options: &SolverOptions,
    observer: &mut dyn StepObserver<RegionId, Color>,
    cancel: &CancelToken,
) -> Result<ColoringReport, SessionError> {
    let problem = Problem::new(&map.region_ids(), &map.adjacency(), &map.initial_domains())?;
    let checker = LimitChecker::new(options.limits, cancel.clone());
    let heuristics = options.heuristics;

    let forward = |v: &RegionId, c: Option<&Color>| observer.on_step(v, c);
    let mut paced = Paced::new(forward, options.step_delay());
    let report = Search::new(&problem, heuristics).run(&mut paced, &checker);
    let stop_reason = checker.stop_reason();

    let (method, coloring) = match report.result {
        SolveResult::Complete(assignment) => (
            ColoringMethod::Backtracking,
            assignment.into_iter().map(|(id, c)| (id, Some(c))).collect(),
        ),
        SolveResult::Incomplete if options.greedy_fallback => {
            info!("No valid coloring found with current palette; using greedy fallback.");
            (
                ColoringMethod::GreedyFallback,
                greedy_color(problem.graph(), map.palette().colors()),
            )
        }
        SolveResult::Incomplete => (ColoringMethod::Unsolved, uncolored(map)),
        SolveResult::Aborted => (ColoringMethod::Aborted, uncolored(map)),
    };

    let report = ColoringReport::new(
        method,
        heuristics,
        coloring,
        &problem,
        report.stats,
        stop_reason,
    );
    match report.method {
        ColoringMethod::Backtracking | ColoringMethod::GreedyFallback => info!("{report}"),
        ColoringMethod::Unsolved | ColoringMethod::Aborted => warn!("{report}"),
    }
    if report.method == ColoringMethod::GreedyFallback && !report.unassigned.is_empty() {
        warn!(
            "greedy fallback left {} regions uncolored",
            report.unassigned.len()
        );
    }
    Ok(report)
}

fn uncolored(map: &RegionMap) -> BTreeMap<RegionId, Option<Color>> {
    map.region_ids().into_iter().map(|id| (id, None)).collect()
}

/// A loaded map and the heuristic toggles it was saved with.
#[derive(Debug, Clone)]
pub struct MapSession {
    pub id: String,
    pub map: RegionMap,
    pub heuristics: Option<HeuristicToggles>,
}

/// Maps loaded into this process, keyed `map-0001`, `map-0002`, ...
pub struct SessionManager {
    sessions: Mutex<HashMap<String, MapSession>>,
    next_id: Mutex<u64>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            next_id: Mutex::new(1),
        }
    }

    /// Parse a JSON map document and register it.
    pub fn load(&self, json: &str) -> Result<String, SessionError> {
        let document = parse_map(json)?;
        let map = RegionMap::from_document(&document)?;

        let id = {
            let mut next = lock(&self.next_id);
            let id = format!("map-{:04}", *next);
            *next += 1;
            id
        };
        debug!("loaded {id} with {} regions", map.len());

        let session = MapSession {
            id: id.clone(),
            map,
            heuristics: document.heuristics,
        };
        lock(&self.sessions).insert(id.clone(), session);
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Option<MapSession> {
        lock(&self.sessions).get(id).cloned()
    }

    pub fn remove(&self, id: &str) -> Option<MapSession> {
        lock(&self.sessions).remove(id)
    }

    pub fn count(&self) -> usize {
        lock(&self.sessions).len()
    }

    /// Color a registered map and store the result on it.
    ///
    /// The map's own heuristic toggles override `options.heuristics`.
    /// The registry is not locked while the search runs.
    pub fn color(
        &self,
        id: &str,
        options: &SolverOptions,
        observer: &mut dyn StepObserver<RegionId, Color>,
        cancel: &CancelToken,
    ) -> Result<ColoringReport, SessionError> {
        let session = self
            .get(id)
            .ok_or_else(|| SessionError::UnknownMap(id.to_string()))?;
        let options = options.clone().with_toggles(session.heuristics);
        let report = auto_color(&session.map, &options, observer, cancel)?;

        if let Some(stored) = lock(&self.sessions).get_mut(id) {
            report.apply(&mut stored.map);
        }
        Ok(report)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
