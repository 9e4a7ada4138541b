use anyhow::Result;
use bench_report::config::ReportConfig;
use bench_report::grammar::Grammar;
use bench_report::report::{run_report, ReportOptions};
use bench_report::sample::{SampleConfig, SampleGenerator};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bench-report")]
#[command(about = "Throughput comparison charts for concurrent list and queue benchmarks")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ReportArgs {
    /// Benchmark results CSV (defaults to the family's usual file name)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory for charts
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Also write aggregated points to this JSON file
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chart list benchmark results, one figure per list size
    List(ReportArgs),

    /// Chart queue benchmark results, one panel per operation count
    Queue(ReportArgs),

    /// Write synthetic benchmark results for trying the report
    Sample {
        /// Benchmark family to generate
        #[arg(short, long, value_enum)]
        family: Grammar,

        /// Output CSV (defaults to the family's usual file name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Repeated trials per configuration
        #[arg(short, long, default_value = "3")]
        trials: usize,

        /// Random seed for sample generation
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        "bench_report=debug"
    } else {
        "bench_report=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::List(args) => report(Grammar::List, args)?,
        Commands::Queue(args) => report(Grammar::Queue, args)?,
        Commands::Sample {
            family,
            output,
            trials,
            seed,
        } => {
            let config = ReportConfig::for_grammar(family);
            let path = output.unwrap_or_else(|| PathBuf::from(config.default_input));

            let sample = SampleConfig {
                trials,
                seed,
                ..SampleConfig::new(family)
            };
            let rows = SampleGenerator::new(sample).write_to(&path)?;
            info!(rows, family = family.name(), "wrote sample results");
            println!("Created: {} ({} rows)", path.display(), rows);
        }
    }

    Ok(())
}

fn report(grammar: Grammar, args: ReportArgs) -> Result<()> {
    let config = ReportConfig::for_grammar(grammar);
    let options = ReportOptions {
        input: args
            .input
            .unwrap_or_else(|| PathBuf::from(config.default_input)),
        output_dir: args.output,
        json: args.json,
    };

    run_report(&config, &options)?;
    Ok(())
}
