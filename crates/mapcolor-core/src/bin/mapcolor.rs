use std::error::Error;
use std::process::ExitCode;

use mapcolor_core::cli::CliOptions;
use mapcolor_core::compare::compare_heuristics;
use mapcolor_core::session::{auto_color, status_line, ColoringMethod};
use mapcolor_core::SolverOptions;
use mapcolor_ir::parse::parse_map;
use mapcolor_ir::RegionMap;
use mapcolor_solver::{CancelToken, NoopObserver, Problem};

fn main() -> ExitCode {
    if std::env::var("MAPCOLOR_LOG").is_ok() {
        let env = env_logger::Env::new()
            .filter("MAPCOLOR_LOG")
            .write_style("MAPCOLOR_LOG_STYLE");
        env_logger::init_from_env(env);
    }

    let cli = match CliOptions::parse_from_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };
    log::debug!("options from command line: {cli:?}");

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the map was properly colored.
fn run(cli: &CliOptions) -> Result<bool, Box<dyn Error>> {
    let base = match &cli.options_file {
        Some(path) => SolverOptions::from_json(&std::fs::read_to_string(path)?)?,
        None => SolverOptions::default(),
    };
    let document = parse_map(&std::fs::read_to_string(&cli.map)?)?;
    let map = RegionMap::from_document(&document)?;
    let options = cli.apply(base.with_toggles(document.heuristics));

    if cli.compare {
        let problem = Problem::new(&map.region_ids(), &map.adjacency(), &map.initial_domains())?;
        let comparison = compare_heuristics(&problem, options.limits, &CancelToken::new())?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&comparison.summaries())?);
        } else {
            println!(
                "{:<14} {:>6} {:>6} {:>8} {:>10} {:>9}  stop",
                "mode", "solved", "colors", "nodes", "backtracks", "wipeouts"
            );
            for row in comparison.summaries() {
                println!(
                    "{:<14} {:>6} {:>6} {:>8} {:>10} {:>9}  {}",
                    row.label,
                    row.solved,
                    row.colors_used,
                    row.stats.nodes,
                    row.stats.backtracks,
                    row.stats.wipeouts,
                    row.stop_reason
                );
            }
            println!(
                "SAT oracle: {}",
                if comparison.colorable { "colorable" } else { "not colorable" }
            );
        }
        return Ok(comparison.colorable);
    }

    let report = auto_color(&map, &options, &mut NoopObserver, &CancelToken::new())?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
        for (id, color) in &report.coloring {
            match color {
                Some(color) => println!("  region {id}: {color}"),
                None => println!("  region {id}: uncolored"),
            }
        }
        let mut shown = map.clone();
        report.apply(&mut shown);
        println!("{}", status_line(&shown, options.heuristics));
    }
    Ok(report.method == ColoringMethod::Backtracking)
}
