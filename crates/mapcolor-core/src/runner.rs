//! Background coloring on the tokio blocking pool.
//!
//! The search itself is synchronous; a [`ColoringTask`] wraps it so async
//! hosts can await the report, cancel it, and watch steps stream in.

use crossbeam::channel::Receiver;
use log::debug;
use mapcolor_ir::{Color, RegionId, RegionMap};
use mapcolor_solver::observer::ChannelObserver;
use mapcolor_solver::{CancelToken, NoopObserver, StepEvent};
use tokio::task::{JoinError, JoinHandle};

use crate::config::SolverOptions;
use crate::session::{auto_color, ColoringReport, SessionError};

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Coloring task failed: {0}")]
    Join(#[from] JoinError),
}

/// A coloring running in the background.
pub struct ColoringTask {
    handle: JoinHandle<Result<ColoringReport, SessionError>>,
    token: CancelToken,
}

impl ColoringTask {
    /// Ask the search to stop at its next frame. The task still completes,
    /// with an aborted report.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub async fn wait(self) -> Result<ColoringReport, RunnerError> {
        Ok(self.handle.await??)
    }
}

/// Start coloring `map`. Must be called from within a tokio runtime.
pub fn spawn_coloring(map: RegionMap, options: SolverOptions) -> ColoringTask {
    let token = CancelToken::new();
    let cancel = token.clone();
    let handle = tokio::task::spawn_blocking(move || {
        debug!("background coloring of {} regions", map.len());
        auto_color(&map, &options, &mut NoopObserver, &cancel)
    });
    ColoringTask { handle, token }
}

/// Like [`spawn_coloring`], also streaming every step to the returned
/// receiver. The stream ends when the search does.
pub fn spawn_coloring_with_events(
    map: RegionMap,
    options: SolverOptions,
) -> (ColoringTask, Receiver<StepEvent<RegionId, Color>>) {
    let (mut observer, events) = ChannelObserver::unbounded();
    let token = CancelToken::new();
    let cancel = token.clone();
    let handle = tokio::task::spawn_blocking(move || {
        auto_color(&map, &options, &mut observer, &cancel)
    });
    (ColoringTask { handle, token }, events)
}
