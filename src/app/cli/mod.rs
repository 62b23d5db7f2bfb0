//! CLI Adapter.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::api::{self, GenerateOutcome, GenerateRequest};
use crate::domain::AppError;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "HELMGEN_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(name = "helmgen")]
#[command(version)]
#[command(
    about = "Reconcile multi-application deployment intent into Helm charts",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask deployment questions and write Helm charts for the selected applications
    #[clap(visible_alias = "g")]
    Generate {
        /// Output directory for charts, scripts and the stored configuration
        #[arg(short, long, env = "HELMGEN_DIR", default_value = ".")]
        dir: PathBuf,
        /// Answer the questions from a TOML file instead of prompting
        #[arg(short, long, env = "HELMGEN_ANSWERS")]
        answers: Option<PathBuf>,
        /// Skip the Helm client check
        #[arg(long)]
        skip_checks: bool,
        /// Print the reconciled plan without storing or writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the stored configuration
    #[clap(visible_alias = "s")]
    Show {
        /// Output directory holding the stored configuration
        #[arg(short, long, env = "HELMGEN_DIR", default_value = ".")]
        dir: PathBuf,
    },
}

/// Entry point for the CLI.
pub fn run() {
    init_logging();
    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Generate { dir, answers, skip_checks, dry_run } => {
            run_generate(GenerateRequest { dir, answers, skip_checks, dry_run })
        }
        Commands::Show { dir } => run_show(dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if e.is_pipeline_rejection() {
            eprintln!("No configuration was saved and no files were written.");
        }
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
}

fn run_generate(request: GenerateRequest) -> Result<(), AppError> {
    let GenerateOutcome { plan, report, written, committed } = api::generate(&request)?;

    if !committed {
        let yaml = serde_yaml::to_string(&plan).map_err(|e| AppError::serialize("deployment plan", e))?;
        print!("{}", yaml);
        for warning in &report.warnings {
            eprintln!("⚠️  {}", warning);
        }
        return Ok(());
    }

    println!("Wrote {} file(s) to {}", written.len(), request.dir.display());
    println!("{}", report);
    Ok(())
}

fn run_show(dir: PathBuf) -> Result<(), AppError> {
    match api::show(&dir)? {
        Some(stored) => {
            let json =
                serde_json::to_string_pretty(&stored).map_err(|e| AppError::serialize("stored configuration", e))?;
            println!("{}", json);
        }
        None => println!("No stored configuration in {}", dir.display()),
    }
    Ok(())
}
