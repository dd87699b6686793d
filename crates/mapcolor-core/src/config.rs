use std::time::Duration;

use mapcolor_ir::types::HeuristicToggles;
use mapcolor_solver::HeuristicConfig;
use serde::{Deserialize, Serialize};

use crate::limits::SolveLimits;

/// Everything that shapes one coloring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    pub heuristics: HeuristicConfig,
    pub limits: SolveLimits,
    /// Run the greedy pass when backtracking finds nothing.
    pub greedy_fallback: bool,
    /// Pause after each commit, for animated observers. Zero disables pacing.
    pub step_delay_ms: u64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            heuristics: HeuristicConfig::default(),
            limits: SolveLimits::default(),
            greedy_fallback: true,
            step_delay_ms: 0,
        }
    }
}

impl SolverOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Take the heuristic toggles stored with a map, if any.
    pub fn with_toggles(mut self, toggles: Option<HeuristicToggles>) -> Self {
        if let Some(t) = toggles {
            self.heuristics = HeuristicConfig::new(t.use_mrv, t.use_degree);
        }
        self
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}
