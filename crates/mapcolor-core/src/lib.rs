//! Host orchestration for the map coloring engine.
//!
//! Ties the editable [`mapcolor_ir::RegionMap`] to the solver: options and
//! limits, the "auto color" session with its greedy fallback, parallel
//! heuristic comparison, and an async runner for long searches.

pub mod cli;
pub mod compare;
pub mod config;
pub mod limits;
pub mod runner;
pub mod session;

pub use config::SolverOptions;
pub use limits::{LimitChecker, SolveLimits, StopReason};
pub use session::{auto_color, ColoringMethod, ColoringReport, SessionError, SessionManager};
