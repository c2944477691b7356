//! dfatrace - Deterministic finite automaton simulator
//!
//! Loads automata from definition files (or builds them interactively),
//! validates strings with execution traces, and renders diagrams.

mod commands;
mod config;
mod interactive;
mod repl;
mod session;

use clap::{Parser, Subcommand};
use colored::Colorize;
use config::Config;
use dfatrace_render::OutputFormat;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dfatrace")]
#[command(about = "Simulate deterministic finite automata and render execution traces")]
#[command(version)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "DFATRACE_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate input strings against an automaton
    Check {
        /// Definition file
        file: PathBuf,

        /// Input strings
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the automaton diagram, optionally highlighting a trace
    Render {
        /// Definition file
        file: PathBuf,

        /// Input string whose trace is highlighted
        #[arg(short, long)]
        input: Option<String>,

        /// Output path without extension
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (dot, png, svg, pdf)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Show a summary of an automaton
    Inspect {
        /// Definition file
        file: PathBuf,

        /// Print the normalized definition instead
        #[arg(long)]
        dsl: bool,
    },

    /// Start an interactive simulation session
    Repl {
        /// Definition file
        file: PathBuf,
    },

    /// Build an automaton interactively, then start a simulation session
    New {
        /// Save the definition to this file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Repl { file } => run_repl(&file, &config),
        Commands::New { save } => interactive::run(&config, save.as_deref()),
        cmd => commands::execute(cmd, &config).map(|output| println!("{}", output)),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn run_repl(file: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let automaton = dfatrace_core::load_file(file)?;
    repl::run(&automaton, config, &model_name(file))
}

/// Names a model after its definition file.
fn model_name(file: &Path) -> String {
    file.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string())
}
