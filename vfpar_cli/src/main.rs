//! vfpar CLI
//!
//! Loads a pattern and a target graph in grf format and enumerates every
//! induced embedding of the pattern in the target, in parallel by default.

#[global_allocator]
/// Global allocator using jemalloc for better performance in parallel workloads.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;

use std::fs::File;
use std::io::BufWriter;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::info;
use vfpar_engine::{
    EngineConfig, EngineError, MatchingEngine, ParallelMatchingEngine, SearchOutcome,
    SequentialMatchingEngine, StatsSnapshot,
};
use vfpar_graph::{CoreSet, Vf2State, read_grf};

use args::Args;

/// What a finished search reports back to the user.
struct Report {
    outcome: SearchOutcome,
    count: usize,
    first_solution: Option<Duration>,
    stats: StatsSnapshot,
    solutions: Vec<CoreSet>,
}

fn run_all<'g, E>(engine: &E, root: &Vf2State<'g>) -> Result<Report, EngineError>
where
    E: MatchingEngine<Vf2State<'g>>,
{
    let outcome = engine.find_all_matchings(root)?;
    Ok(Report {
        outcome,
        count: engine.solutions_count(),
        first_solution: engine.first_solution_time(),
        stats: engine.stats(),
        solutions: engine.solutions(),
    })
}

fn run_first(config: &EngineConfig, root: &Vf2State<'_>) -> Result<Report, EngineError> {
    let engine = SequentialMatchingEngine::new(config)?;
    let first = engine.find_first_matching(root)?;
    Ok(Report {
        outcome: if first.is_some() {
            SearchOutcome::Stopped
        } else {
            SearchOutcome::Exhausted
        },
        count: engine.solutions_count(),
        first_solution: engine.first_solution_time(),
        stats: engine.stats(),
        solutions: first.into_iter().collect(),
    })
}

/// Executes the vfpar matcher.
///
/// This function:
/// 1. Initializes logging
/// 2. Parses command-line arguments
/// 3. Loads both graphs
/// 4. Runs the selected engine
/// 5. Prints the results and optionally writes the solutions
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    let config = args.to_config()?;

    let pattern = read_grf(&args.pattern)?;
    let target = read_grf(&args.target)?;
    info!(
        pattern_nodes = pattern.node_count(),
        target_nodes = target.node_count(),
        "graphs loaded"
    );

    let root = Vf2State::new(&pattern, &target);
    let started = Instant::now();
    let report = if args.first {
        run_first(&config, &root)?
    } else if args.sequential {
        run_all(&SequentialMatchingEngine::new(&config)?, &root)?
    } else {
        run_all(&ParallelMatchingEngine::new(config.clone())?, &root)?
    };
    let elapsed = started.elapsed();

    println!("solutions: {}", report.count);
    match report.first_solution {
        Some(t) => println!("first solution after: {t:?}"),
        None => println!("first solution after: -"),
    }
    println!("total time: {elapsed:?}");
    println!("outcome: {:?}", report.outcome);
    println!("stats: {}", serde_json::to_string(&report.stats)?);

    if let Some(path) = &args.solutions_out {
        let out = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(out, &report.solutions)?;
        info!(path = %path.display(), stored = report.solutions.len(), "solutions written");
    }

    Ok(())
}
