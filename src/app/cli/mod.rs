//! CLI Adapter.

use std::io::{BufRead, ErrorKind, IsTerminal};

use clap::{ArgAction, Parser, Subcommand};
use dialoguer::{Error as DialoguerError, Input};

use crate::domain::AppError;
use crate::{ScaffoldMode, ScaffoldOutcome, ValuesUpdate};

#[derive(Parser)]
#[command(name = "modchart")]
#[command(version)]
#[command(about = "Scaffold Helm charts composed of named modules", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Silence log output
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a chart, or add a module when run inside a chart
    #[clap(visible_alias = "c")]
    Create {
        /// Chart name, or module name inside a chart
        name: Option<String>,
        /// Starter chart to clone (absolute path or name in the starters directory)
        #[arg(short = 'p', long)]
        starter: Option<String>,
    },
    /// Add one manifest for a module to the chart in the current directory
    #[clap(visible_alias = "m")]
    Manifest {
        /// ingress, deployment, service, serviceaccount, hpa, helpers, test-connection
        kind: String,
        /// Module name
        name: String,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Create { name, starter } => run_create(name, starter),
        Commands::Manifest { kind, name } => run_manifest(&kind, &name),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env().filter_level(level).init();
}

fn run_create(name: Option<String>, starter: Option<String>) -> Result<(), AppError> {
    let name = match name {
        Some(name) => name,
        None => prompt_name()?,
    };
    println!("Creating {}", name);

    if let Some(starter) = starter {
        let outcome = crate::create_from(&name, &starter)?;
        println!(
            "✅ Created chart at {}/ from starter {}",
            outcome.chart_root.display(),
            outcome.starter.display()
        );
        return Ok(());
    }

    let outcome = crate::create(&name, &mut std::io::stderr())?;
    print_outcome(&outcome);
    Ok(())
}

fn run_manifest(kind: &str, name: &str) -> Result<(), AppError> {
    let outcome = crate::create_manifest(kind, name, &mut std::io::stderr())?;
    println!(
        "✅ Added {} manifest for module {} to {}/",
        kind,
        outcome.module,
        outcome.root.display()
    );
    print_values_note(&outcome);
    Ok(())
}

fn print_outcome(outcome: &ScaffoldOutcome) {
    match outcome.mode {
        ScaffoldMode::NewChart => println!("✅ Created chart at {}/", outcome.root.display()),
        ScaffoldMode::AddModule => {
            println!("✅ Added module {} to {}/", outcome.module, outcome.root.display());
            print_values_note(outcome);
        }
    }
}

fn print_values_note(outcome: &ScaffoldOutcome) {
    match &outcome.values {
        ValuesUpdate::Failed(_) => {
            println!("⚠️  values.yaml was not updated; add the {} block by hand", outcome.module)
        }
        ValuesUpdate::SkippedExistingKey => {
            println!("⚠️  values.yaml already has a {} block; left unchanged", outcome.module)
        }
        ValuesUpdate::MissingKeys(keys) => {
            println!("⚠️  values.yaml block of {} lacks {}; add them by hand", outcome.module, keys.join(", "))
        }
        ValuesUpdate::Created | ValuesUpdate::Appended | ValuesUpdate::Merged(_) => {}
    }
}

/// Ask for the chart name: a prompt on a terminal, one line of stdin otherwise.
fn prompt_name() -> Result<String, AppError> {
    if std::io::stdin().is_terminal() && std::io::stdout().is_terminal() {
        return match Input::<String>::new().with_prompt("Chart name").interact_text() {
            Ok(value) => Ok(value.trim().to_string()),
            Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => {
                Err(AppError::config_error("Chart name prompt was cancelled"))
            }
            Err(err) => Err(AppError::config_error(format!("Failed to read chart name: {}", err))),
        };
    }

    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .map_err(|e| AppError::config_error(format!("Failed to read chart name: {}", e)))?;
    Ok(input.trim().to_string())
}
