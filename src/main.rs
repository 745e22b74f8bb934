use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use mentor_tools::config::Config;
use mentor_tools::sync;
use mentor_tools::{Result, ToolError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Export(args) => {
            let config = load_config(args.config.as_deref())?;
            ensure_exists(&args.input)?;
            let written = sync::export_full(&args.input, &args.output, &config)?;
            println!(
                "File: {} is successfully written ({written} mentors).",
                args.output.display()
            );
            Ok(())
        }
        Command::Append(args) => {
            let config = load_config(args.config.as_deref())?;
            ensure_exists(&args.input)?;
            let appended =
                sync::export_incremental(&args.input, &args.existing, args.skip_rows, &config)?;
            println!("Appended {appended} mentors to {}.", args.existing.display());
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ToolError::MissingInput(path.to_path_buf()))
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Convert the mentors spreadsheet into the directory's YAML document."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Regenerate the whole mentors document from the spreadsheet.
    Export(ExportArgs),
    /// Append mentors missing from an existing mentors document.
    Append(AppendArgs),
}

#[derive(clap::Args)]
struct ExportArgs {
    /// Spreadsheet with the mentors sheet.
    #[arg(long)]
    input: PathBuf,

    /// Output YAML file path.
    #[arg(long)]
    output: PathBuf,

    /// Optional YAML file overriding column positions and defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(clap::Args)]
struct AppendArgs {
    /// Spreadsheet with the mentors sheet.
    #[arg(long)]
    input: PathBuf,

    /// Previously generated mentors document to extend.
    #[arg(long)]
    existing: PathBuf,

    /// Number of data rows at the top of the sheet to ignore.
    #[arg(long, default_value_t = 0)]
    skip_rows: usize,

    /// Optional YAML file overriding column positions and defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}
