//! Command line options for the `mapcolor` binary.
//!
//! `mapcolor <MAP.json> [--no-mrv] [--no-degree] [--max-steps N]
//! [--timeout SECS] [--no-fallback] [--compare] [--json]`

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};
use mapcolor_solver::HeuristicConfig;

use crate::config::SolverOptions;
use crate::limits::SolveLimits;

fn make_options_parser() -> Command {
    Command::new("mapcolor")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Color a map so that no two bordering regions share a color")
        .arg(
            Arg::new("map")
                .value_name("MAP.json")
                .help("Map document to color")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("options")
                .long("options")
                .value_name("FILE")
                .help("Solver options as JSON; flags below override it")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("no-mrv")
                .long("no-mrv")
                .help("Disable minimum-remaining-values ordering")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-degree")
                .long("no-degree")
                .help("Disable degree ordering")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-steps")
                .long("max-steps")
                .value_name("N")
                .help("Stop after N tentative assignments")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECS")
                .help("Stop after SECS seconds")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("no-fallback")
                .long("no-fallback")
                .help("Do not run the greedy pass when search fails")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("compare")
                .long("compare")
                .help("Run all four heuristic modes and compare them")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print JSON instead of text")
                .action(ArgAction::SetTrue),
        )
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub map: PathBuf,
    pub options_file: Option<PathBuf>,
    /// Heuristics named on the command line; `None` keeps the map's own.
    pub heuristics: Option<HeuristicConfig>,
    pub max_steps: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub greedy_fallback: bool,
    pub compare: bool,
    pub json: bool,
}

impl CliOptions {
    /// Parse arguments, program name first.
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = make_options_parser().try_get_matches_from(args)?;
        let flag = |name: &str| matches.get_flag(name);

        let heuristics = (flag("no-mrv") || flag("no-degree"))
            .then(|| HeuristicConfig::new(!flag("no-mrv"), !flag("no-degree")));

        Ok(Self {
            map: matches.get_one::<PathBuf>("map").cloned().unwrap_or_default(),
            options_file: matches.get_one::<PathBuf>("options").cloned(),
            heuristics,
            max_steps: matches.get_one::<u64>("max-steps").copied(),
            timeout_secs: matches.get_one::<u64>("timeout").copied(),
            greedy_fallback: !flag("no-fallback"),
            compare: flag("compare"),
            json: flag("json"),
        })
    }

    /// Layer the command line over `base`.
    pub fn apply(&self, base: SolverOptions) -> SolverOptions {
        SolverOptions {
            heuristics: self.heuristics.unwrap_or(base.heuristics),
            limits: SolveLimits {
                max_steps: self.max_steps.or(base.limits.max_steps),
                max_wall_secs: self.timeout_secs.or(base.limits.max_wall_secs),
            },
            greedy_fallback: base.greedy_fallback && self.greedy_fallback,
            step_delay_ms: base.step_delay_ms,
        }
    }
}
