//! VTES booster generator - Main Binary
//!
//! Generates N boosters of a set and writes the drawn cards as an import
//! listing.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use vtes_booster::{
    booster::{generate, GeneratorConfig, RunReport, DEFAULT_OUTPUT},
    loader::RecordStore,
    logger::{category, OutputFormat, RunLogger, VerbosityLevel},
    lookup, output,
};

/// Verbosity level for console output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

/// Console output format
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// One JSON object per line
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "booster")]
#[command(about = "VTES booster generator - draws randomized booster packs from a set", long_about = None)]
struct Cli {
    /// Set abbreviation or full name (case-insensitive)
    #[arg(value_name = "SET")]
    set: Option<String>,

    /// Number of boosters to generate (positive integer)
    #[arg(value_name = "COUNT", allow_negative_numbers = true)]
    count: Option<String>,

    /// Unexpected extra arguments; any present prints the usage
    #[arg(hide = true, allow_negative_numbers = true)]
    extra: Vec<String>,

    /// Directory holding vtescrypt.csv, vteslib.csv, vtessets.csv and vtesboosters.csv
    #[arg(long, default_value = "Resources")]
    resources: PathBuf,

    /// Output listing file
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Also write the full run report as JSON
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Set random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Abort the whole run when a booster slot cannot be filled
    #[arg(long)]
    strict: bool,

    /// Verbosity level for console output (0=silent, 1=minimal, 2=normal, 3=verbose)
    #[arg(long, default_value = "normal", short = 'v')]
    verbosity: VerbosityArg,

    /// Console output format
    #[arg(long, value_enum, default_value = "text")]
    format: FormatArg,

    /// Look up a card or set after the run (repeatable; trailing * allowed)
    #[arg(long, value_name = "QUERY")]
    lookup: Vec<String>,

    /// Read lookup queries from stdin after the run
    #[arg(long)]
    interactive: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let start = Instant::now();

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\nError: {e:#}");
            ExitCode::FAILURE
        }
    };

    println!("\nRunning time: {:.2}s", start.elapsed().as_secs_f64());
    code
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let store = RecordStore::load(&cli.resources)
        .await
        .with_context(|| format!("loading tables from {}", cli.resources.display()))?;

    let Some(config) = run_config(&cli, &store) else {
        print_usage(&store);
        return Ok(ExitCode::FAILURE);
    };

    let mut logger = RunLogger::with_verbosity(cli.verbosity.into());
    logger.set_output_format(cli.format.into());

    let report = generate(&store, &config, &logger)?;

    output::write_listing(&config.output, &report.tally)
        .with_context(|| format!("writing {}", config.output.display()))?;
    if let Some(path) = &cli.report {
        output::write_report(path, &report).with_context(|| format!("writing {}", path.display()))?;
    }

    log_listing(&logger, &config, &report);

    for query in &cli.lookup {
        match lookup::lookup(&store, query) {
            Some(hit) => println!("{}", lookup::describe(&hit, Some(&report))),
            None => println!("Could not find card by name: {query}"),
        }
    }

    if cli.interactive {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        lookup::run_prompt(&store, Some(&report), stdin, tokio::io::stdout()).await?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Run configuration from the positional arguments, None when they are missing or invalid
fn run_config(cli: &Cli, store: &RecordStore) -> Option<GeneratorConfig> {
    if !cli.extra.is_empty() {
        return None;
    }
    let set = store.resolve_set(cli.set.as_deref()?)?;
    let count = cli.count.as_deref()?.trim().parse::<usize>().ok().filter(|&n| n > 0)?;

    let mut config = GeneratorConfig::new(set.abbrev.as_str(), count)
        .with_output(cli.output.clone())
        .strict(cli.strict);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    Some(config)
}

fn print_usage(store: &RecordStore) {
    println!("Please pass a valid set as SET and the number of boosters as COUNT.");
    println!("Valid sets are:\n");
    for set in store.sets() {
        println!("{set}");
    }
}

fn log_listing(logger: &RunLogger, config: &GeneratorConfig, report: &RunReport) {
    logger.normal(category::LISTING, "");
    logger.normal(category::LISTING, "All cards:");
    for line in report.tally.lines() {
        logger.normal(category::LISTING, &line);
    }
    logger.minimal(
        category::SUMMARY,
        &format!(
            "Wrote {} cards ({} distinct) to {}",
            report.total_draws(),
            report.tally.len(),
            config.output.display()
        ),
    );
}
