//! Resource limits for a coloring run.
//!
//! A search that hits a limit stops cleanly with an aborted result rather
//! than failing; the [`StopReason`] says why.

use std::fmt;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use mapcolor_solver::{CancelToken, Cancellation, SearchStats};
use serde::{Deserialize, Serialize};

/// Caps on a single run. `None` means unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveLimits {
    /// Maximum tentative commits.
    pub max_steps: Option<u64>,
    /// Maximum wall-clock seconds.
    pub max_wall_secs: Option<u64>,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The search ran to its natural end, solved or not.
    Complete,
    StepLimitExceeded,
    WallTimeExceeded,
    UserAborted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Complete => "search complete",
            Self::StepLimitExceeded => "step limit exceeded",
            Self::WallTimeExceeded => "time limit exceeded",
            Self::UserAborted => "aborted by user",
        };
        f.write_str(text)
    }
}

/// Checks a running search against its limits and a user cancel flag.
///
/// The first limit to trip is remembered and reported by
/// [`LimitChecker::stop_reason`].
#[derive(Debug)]
pub struct LimitChecker {
    limits: SolveLimits,
    token: CancelToken,
    start_time: Instant,
    tripped: OnceLock<StopReason>,
}

impl LimitChecker {
    pub fn new(limits: SolveLimits, token: CancelToken) -> Self {
        Self {
            limits,
            token,
            start_time: Instant::now(),
            tripped: OnceLock::new(),
        }
    }

    /// The reason to stop now, if any. User cancellation wins over limits.
    pub fn check(&self, stats: &SearchStats) -> Option<StopReason> {
        if self.token.is_cancelled() {
            return Some(StopReason::UserAborted);
        }
        if let Some(max) = self.limits.max_steps {
            if stats.nodes >= max {
                return Some(StopReason::StepLimitExceeded);
            }
        }
        if let Some(max) = self.limits.max_wall_secs {
            if self.start_time.elapsed() >= Duration::from_secs(max) {
                return Some(StopReason::WallTimeExceeded);
            }
        }
        None
    }

    pub fn stop_reason(&self) -> StopReason {
        self.tripped.get().copied().unwrap_or(StopReason::Complete)
    }
}

impl Cancellation for LimitChecker {
    fn should_abort(&self, stats: &SearchStats) -> bool {
        match self.check(stats) {
            Some(reason) => {
                let _ = self.tripped.set(reason);
                true
            }
            None => false,
        }
    }
}
