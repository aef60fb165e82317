use std::path::PathBuf;

use clap::Parser;
use vfpar_engine::{EngineConfig, EngineError};

/// vfpar - Count induced subgraph isomorphisms between two grf graphs
#[derive(Parser, Debug)]
#[command(name = "vfpar")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Pattern graph (.grf)
    pub pattern: PathBuf,

    /// Target graph (.grf)
    pub target: PathBuf,

    /// Number of worker threads (defaults to the number of logical CPUs)
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Pin worker i to CPU <cpu> + i
    #[arg(long)]
    pub cpu: Option<usize>,

    /// Keep every solution instead of only counting them
    #[arg(short = 's', long, default_value_t = false)]
    pub store_solutions: bool,

    /// Load the engine configuration from a JSON file; overrides the flags above
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Use the single-threaded engine
    #[arg(long, default_value_t = false)]
    pub sequential: bool,

    /// Stop at the first match (single-threaded)
    #[arg(long, default_value_t = false, conflicts_with = "sequential")]
    pub first: bool,

    /// Write the solutions as JSON to this file (enables solution storage)
    #[arg(short = 'o', long)]
    pub solutions_out: Option<PathBuf>,
}

impl Args {
    /// Convert command-line arguments into an engine configuration
    pub fn to_config(&self) -> Result<EngineConfig, EngineError> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_json_file(path)?,
            None => EngineConfig {
                num_threads: self.threads.unwrap_or_else(logical_cpus),
                store_solutions: self.store_solutions,
                cpu: self.cpu,
            },
        };
        if self.solutions_out.is_some() {
            config.store_solutions = true;
        }
        config.validate()?;
        Ok(config)
    }
}

fn logical_cpus() -> usize {
    sysinfo::System::new_all().cpus().len().max(1)
}
