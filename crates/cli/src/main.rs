//! Hawkeye trace-replay CLI.
//!
//! Replays a memory-access trace through one or more replacement policies and
//! reports hit rates and predictor activity. It performs:
//! 1. **Config:** Built-in defaults, optionally overridden by a JSON file.
//! 2. **Replay:** One fresh cache per requested policy, same trace.
//! 3. **Report:** Plain-text tables, or JSON with `--json`.

use std::path::PathBuf;
use std::{fs, process};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use hawkeye_core::config::{Config, ReplacementPolicy};
use hawkeye_core::sim::{self, ReplayReport, trace};

#[derive(Parser, Debug)]
#[command(
    name = "hawkeye-sim",
    author,
    version,
    about = "Hawkeye cache replacement trace replayer",
    long_about = "Replay `<addr> <pc>` traces through a set-associative cache.\n\nExamples:\n  hawkeye-sim replay trace.txt\n  hawkeye-sim replay trace.txt --policy hawkeye --policy srrip\n  hawkeye-sim replay trace.txt --config l2.json --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a trace through one or more policies.
    Replay {
        /// Trace file (`<addr> <pc>` per line).
        trace: PathBuf,

        /// Policies to compare. Defaults to the policy in the config.
        #[arg(short, long, value_enum)]
        policy: Vec<PolicyArg>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print reports as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    Hawkeye,
    Srrip,
}

impl From<PolicyArg> for ReplacementPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Hawkeye => Self::Hawkeye,
            PolicyArg::Srrip => Self::Srrip,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Replay {
            trace,
            policy,
            config,
            json,
        } => cmd_replay(&trace, &policy, config.as_deref(), json),
    }
}

/// Prints `msg` and exits with status 1.
fn fatal(msg: impl std::fmt::Display) -> ! {
    eprintln!("[!] FATAL: {msg}");
    process::exit(1);
}

/// Loads the configuration, replays the trace under each policy, and prints the reports.
fn cmd_replay(
    trace_path: &std::path::Path,
    policies: &[PolicyArg],
    config_path: Option<&std::path::Path>,
    json: bool,
) {
    let config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .unwrap_or_else(|e| fatal(format!("could not read '{}': {e}", path.display())));
            Config::from_json(&text).unwrap_or_else(|e| fatal(e))
        }
        None => Config::default(),
    };

    let records = trace::load(trace_path)
        .unwrap_or_else(|e| fatal(format!("{}: {e}", trace_path.display())));
    tracing::info!(accesses = records.len(), "trace loaded");

    let kinds: Vec<ReplacementPolicy> = if policies.is_empty() {
        vec![config.cache.policy]
    } else {
        policies.iter().map(|&p| p.into()).collect()
    };

    let reports: Vec<ReplayReport> = kinds
        .into_iter()
        .map(|kind| {
            let mut cache = config.cache.clone();
            cache.policy = kind;
            sim::replay(&cache, &records).unwrap_or_else(|e| fatal(e))
        })
        .collect();

    if json {
        match serde_json::to_string_pretty(&reports) {
            Ok(out) => println!("{out}"),
            Err(e) => fatal(e),
        }
    } else {
        println!(
            "Configuration: {} B, {} B lines, {} ways, {} sets",
            config.cache.size_bytes,
            config.cache.line_bytes,
            config.cache.ways,
            config.cache.num_sets()
        );
        println!("Trace: {} ({} accesses)", trace_path.display(), records.len());
        for report in &reports {
            println!();
            print!("{report}");
        }
    }
}
