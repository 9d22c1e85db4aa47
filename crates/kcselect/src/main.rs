//
// main.rs
//
// Copyright (C) 2024-2025 Posit Software, PBC. All rights reserved.
//
//

//! kcselect
//!
//! Scores the installed kernel specs against an interpreter and a notebook,
//! showing which kernel the selector would pick.

use std::fs::File;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kcselect::language::compute_language;
use kcselect::matcher::{find_best_match, score_kernel_spec};
use kcselect::spec_loader::{load_kernel_spec, load_kernels_dir, user_kernels_dir};
use kcselect::SelectError;
use kcshared::interpreter::{InterpreterDescriptor, Version};
use kcshared::kernel_spec::KernelSpec;
use kcshared::notebook_metadata::NotebookMetadata;
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode, WriteLogger};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The log level to use. Valid values are "trace", "debug", "info", "warn",
    /// and "error". If not specified, the default log level is "warn", or the
    /// value of `RUST_LOG` if set.
    #[arg(short, long)]
    log_level: Option<String>,

    /// The path to a log file. If specified, log output will be written to this
    /// file in addition to standard streams.
    #[arg(long)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score kernel specs and print the best match
    Match {
        /// A directory of kernel specs (`<name>/kernel.json`). Defaults to the
        /// user's Jupyter kernels directory when no --kernel-spec is given.
        #[arg(long)]
        kernels_dir: Option<PathBuf>,

        /// A `kernel.json` file to consider; may be repeated
        #[arg(long)]
        kernel_spec: Vec<PathBuf>,

        /// The path of the interpreter to match
        #[arg(short, long)]
        interpreter: Option<String>,

        /// The interpreter's version, e.g. "3.11"
        #[arg(long, requires = "interpreter")]
        interpreter_version: Option<String>,

        /// A notebook (`.ipynb`) whose declared kernel should be matched
        #[arg(short, long)]
        notebook: Option<PathBuf>,
    },

    /// Print the reporting category of a kernel language
    Language {
        /// The kernel language
        language: Option<String>,
    },
}

fn init_logging(args: &Args) {
    // Derive the log level
    let log_level = match args.log_level {
        Some(ref level) => level.to_string(),
        None => std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
    };

    let log_level = match log_level.as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => {
            eprintln!("Invalid log level '{}'; using 'warn'", log_level);
            LevelFilter::Warn
        }
    };

    let result = match args.log_file {
        Some(ref log_file) => {
            let file = match File::create(log_file) {
                Ok(file) => file,
                Err(err) => {
                    eprintln!("Failed to create log file '{}': {}", log_file, err);
                    std::process::exit(1);
                }
            };
            CombinedLogger::init(vec![
                TermLogger::new(
                    log_level,
                    Config::default(),
                    TerminalMode::Stderr,
                    ColorChoice::Auto,
                ),
                WriteLogger::new(log_level, Config::default(), file),
            ])
        }
        None => TermLogger::init(
            log_level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
    };

    // Consider it a fatal error if we can't initialize logging
    if let Err(err) = result {
        eprintln!("Failed to initialize logging: {}", err);
        std::process::exit(1);
    }
}

fn collect_specs(
    kernels_dir: Option<PathBuf>,
    spec_files: Vec<PathBuf>,
) -> Result<Vec<KernelSpec>, SelectError> {
    let kernels_dir = match kernels_dir {
        Some(dir) => Some(dir),
        None if spec_files.is_empty() => user_kernels_dir(),
        None => None,
    };

    let mut specs = match kernels_dir {
        Some(dir) if dir.is_dir() => load_kernels_dir(&dir)?,
        Some(dir) => {
            log::warn!("Kernels directory {} does not exist", dir.display());
            Vec::new()
        }
        None => Vec::new(),
    };
    for spec_file in spec_files {
        specs.push(load_kernel_spec(&spec_file)?);
    }
    Ok(specs)
}

fn run_match(
    kernels_dir: Option<PathBuf>,
    spec_files: Vec<PathBuf>,
    interpreter: Option<String>,
    interpreter_version: Option<String>,
    notebook: Option<PathBuf>,
) -> Result<(), anyhow::Error> {
    let specs = collect_specs(kernels_dir, spec_files)?;

    let interpreter = match interpreter {
        Some(path) => {
            let mut interpreter = InterpreterDescriptor::new(path);
            if let Some(version) = interpreter_version {
                interpreter = interpreter.with_version(version.parse::<Version>()?);
            }
            Some(interpreter)
        }
        None => None,
    };

    let notebook = match notebook {
        Some(path) => Some(NotebookMetadata::from_notebook_file(path)?),
        None => None,
    };

    for spec in &specs {
        println!(
            "{:>4}  {:<24} {}",
            score_kernel_spec(spec, interpreter.as_ref(), notebook.as_ref()),
            spec.name,
            spec.label()
        );
    }

    let outcome = find_best_match(interpreter.as_ref(), notebook.as_ref(), &specs);
    match outcome.best {
        Some(best) => {
            log::info!("Best match is '{}' with score {}", best.name, outcome.score);
            println!("{}", serde_json::to_string_pretty(best)?);
        }
        None => println!("No kernel specs found"),
    }
    Ok(())
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();
    init_logging(&args);

    let result = match args.command {
        Commands::Match {
            kernels_dir,
            kernel_spec,
            interpreter,
            interpreter_version,
            notebook,
        } => run_match(
            kernels_dir,
            kernel_spec,
            interpreter,
            interpreter_version,
            notebook,
        ),
        Commands::Language { language } => {
            println!("{}", compute_language(language.as_deref()));
            Ok(())
        }
    };

    if let Err(err) = result {
        log::error!("{}", err);
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
