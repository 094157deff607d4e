mod config;
mod logging;
mod state;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use elfproef_core::BsnError;
use elfproef_generate::{ElfproefEngine, validate};
use thiserror::Error;

use config::{CliConfig, load_config};
use logging::init_logging;
use state::{load_state, save_state};

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Bsn(#[from] BsnError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("state file error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("state path {} does not name a file", .0.display())]
    InvalidStatePath(PathBuf),
    #[error("retry budget exhausted; diagnostics written to stderr")]
    Reported,
}

pub(crate) type CliResult<T> = Result<T, CliError>;

#[derive(Parser, Debug)]
#[command(
    name = "elfproef",
    version,
    about = "Generate and validate numbers that pass the eleven test"
)]
struct Cli {
    /// Config file (defaults to ./elfproef.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// State file holding generated and excluded numbers.
    #[arg(long, global = true)]
    state: Option<PathBuf>,
    /// Append JSON logs to this file instead of logging to stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// Seed for reproducible output.
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate numbers; a prefix starting with 999 gives invalid ones.
    Generate(GenerateArgs),
    /// Check numbers against the eleven test.
    Validate(ValuesArgs),
    /// Add numbers that must never be generated.
    Exclude(ValuesArgs),
    /// Print the generated or excluded numbers.
    List(SetArgs),
    /// Forget the generated or excluded numbers.
    Clear(SetArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Leading digits of the generated number.
    #[arg(long, default_value = "")]
    prefix: String,
    /// Number of digits: 6, 7, 8 or 9.
    #[arg(long)]
    length: Option<usize>,
    /// How many numbers to generate.
    #[arg(long, default_value_t = 1)]
    count: usize,
    /// Allow numbers generated before.
    #[arg(long, default_value_t = false)]
    no_unique: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Lines)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct ValuesArgs {
    #[arg(required = true, value_name = "NUMBER")]
    values: Vec<String>,
}

#[derive(Args, Debug)]
struct SetArgs {
    #[arg(value_enum)]
    set: SetKind,
    #[arg(long, value_enum, default_value_t = OutputFormat::Lines)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SetKind {
    Generated,
    Excluded,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Lines,
    Json,
    Csv,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Reported) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    init_logging(cli.log_file.as_deref())?;

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.engine.seed = Some(seed);
    }
    if let Some(state) = cli.state {
        config.state_path = state;
    }

    match cli.command {
        Command::Generate(args) => run_generate(&config, args),
        Command::Validate(args) => run_validate(args),
        Command::Exclude(args) => run_exclude(&config, args),
        Command::List(args) => run_list(&config, args),
        Command::Clear(args) => run_clear(&config, args),
    }
}

fn open_engine(config: &CliConfig) -> CliResult<ElfproefEngine> {
    let mut engine = ElfproefEngine::new(config.engine.clone());
    let snapshot = load_state(&config.state_path)?;
    engine.restore(snapshot)?;
    Ok(engine)
}

fn run_generate(config: &CliConfig, args: GenerateArgs) -> CliResult<()> {
    let mut engine = open_engine(config)?;
    let length = args.length.unwrap_or(config.default_length);
    let unique = !args.no_unique;

    let mut values = Vec::with_capacity(args.count);
    let mut failure = None;
    for _ in 0..args.count {
        match engine.generate(&args.prefix, length, unique) {
            Ok(value) => values.push(value.into_string()),
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }

    if unique && !values.is_empty() {
        save_state(&config.state_path, &engine.snapshot())?;
    }
    print_values(&values, args.format)?;

    tracing::info!(
        requested = args.count,
        generated = values.len(),
        prefix = %args.prefix,
        length,
        unique,
        "generate finished"
    );

    let Some(err) = failure else {
        return Ok(());
    };
    if matches!(args.format, OutputFormat::Json) {
        if let Some(report) = exhaustion_report(&err)? {
            eprintln!("{report}");
            return Err(CliError::Reported);
        }
    }
    Err(err.into())
}

/// JSON document for a generation that ran out of attempts.
fn exhaustion_report(err: &BsnError) -> CliResult<Option<String>> {
    let BsnError::RetryExhausted(diagnostics) = err else {
        return Ok(None);
    };
    let report = serde_json::json!({
        "error": "retry_exhausted",
        "message": err.to_string(),
        "nearly_exhausted": diagnostics.nearly_exhausted(),
        "diagnostics": diagnostics,
    });
    Ok(Some(serde_json::to_string_pretty(&report)?))
}

fn run_validate(args: ValuesArgs) -> CliResult<()> {
    for value in &args.values {
        validate(value)?;
        println!("{value}: valid");
    }
    Ok(())
}

fn run_exclude(config: &CliConfig, args: ValuesArgs) -> CliResult<()> {
    let mut engine = open_engine(config)?;
    engine.exclude(&args.values)?;
    save_state(&config.state_path, &engine.snapshot())?;
    println!("{} excluded numbers", engine.excluded().len());
    Ok(())
}

fn run_list(config: &CliConfig, args: SetArgs) -> CliResult<()> {
    let engine = open_engine(config)?;
    let values = match args.set {
        SetKind::Generated => engine.generated(),
        SetKind::Excluded => engine.excluded(),
    };
    print_values(&values, args.format)
}

fn run_clear(config: &CliConfig, args: SetArgs) -> CliResult<()> {
    let mut engine = open_engine(config)?;
    let count = match args.set {
        SetKind::Generated => engine.clear_generated(),
        SetKind::Excluded => engine.clear_excluded(),
    };
    save_state(&config.state_path, &engine.snapshot())?;
    match args.format {
        OutputFormat::Lines => println!("cleared {count} numbers"),
        OutputFormat::Json => println!("{}", serde_json::json!({ "cleared": count })),
        OutputFormat::Csv => println!("cleared\n{count}"),
    }
    Ok(())
}

fn print_values(values: &[String], format: OutputFormat) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_values(&mut out, values, format)?;
    out.flush()?;
    Ok(())
}

fn write_values<W: Write>(out: &mut W, values: &[String], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Lines => {
            for value in values {
                writeln!(out, "{value}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, values)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut *out);
            writer.write_record(["bsn"])?;
            for value in values {
                writer.write_record([value])?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}
