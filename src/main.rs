// SPDX-License-Identifier: PMPL-1.0-or-later

//! enigma-breaker: Enigma machine simulator and crib-driven codebreaker
//!
//! Encodes messages on a configured machine, replays the worked
//! demonstrations, and recovers unknown settings by exhaustive search.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use enigma_breaker::demos::{self, DemoKind};
use enigma_breaker::report::{
    self, ConsoleSink, CrackReport, FanOut, ReportOutputFormat, TextFileSink,
};
use enigma_breaker::settings::{SearchHints, Settings};
use enigma_breaker::{tasks, EncryptionEngine, MatchRecord, MatchSink, SearchEngine, SearchOptions};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "enigma-breaker")]
#[command(version)]
#[command(about = "Enigma machine simulator and crib-driven codebreaker")]
#[command(long_about = None)]
struct Cli {
    /// Verbose logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode or decode a message on a fully specified machine
    Encode {
        /// Message to encode (defaults to `code` from the settings file)
        #[arg(value_name = "MESSAGE")]
        message: Option<String>,

        /// Settings file (json/yaml) instead of the flags below
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Rotor names, leftmost first
        #[arg(long, default_value = "I II III")]
        rotors: String,

        /// Reflector name or 26-letter wiring
        #[arg(long, default_value = "B")]
        reflector: String,

        /// Ring settings, leftmost first
        #[arg(long, default_value = "1 1 1")]
        rings: String,

        /// Initial window letters, leftmost first
        #[arg(long, default_value = "A A A")]
        positions: String,

        /// Plug pairs, e.g. "HL MO AJ"
        #[arg(long, default_value = "")]
        plugboard: String,
    },

    /// Replay the worked demonstrations
    Demo {
        #[arg(short, long, value_enum, default_value = "machine")]
        kind: DemoKind,
    },

    /// Recover the unknown settings in a settings file
    Crack {
        /// Settings file (json/yaml) with UNKNOWN fields
        #[arg(value_name = "SETTINGS")]
        settings: PathBuf,

        /// Save the crack report to file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ReportOutputFormat,

        /// Append matches to a text results file
        #[arg(long)]
        results_file: Option<PathBuf>,

        /// Evaluate candidates on the calling thread only
        #[arg(long)]
        sequential: bool,

        /// Stop after this many matches
        #[arg(long)]
        max_matches: Option<usize>,
    },

    /// Run the built-in codebreaking tasks
    Tasks {
        /// Run only this task (1-5)
        #[arg(long)]
        only: Option<usize>,

        /// Results file, replaced on each run
        #[arg(long, default_value = "codebreak.txt")]
        results_file: PathBuf,

        /// Evaluate candidates on the calling thread only
        #[arg(long)]
        sequential: bool,
    },
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("building log filter")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("installing log subscriber")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Encode {
            message,
            settings,
            rotors,
            reflector,
            rings,
            positions,
            plugboard,
        } => {
            let settings = match settings {
                Some(path) => Settings::load(&path)?,
                None => Settings {
                    label: None,
                    code: None,
                    crib: None,
                    rotors,
                    reflector,
                    ring_settings: rings,
                    initial_positions: positions,
                    plugboard_pairs: plugboard,
                    search: SearchHints::default(),
                },
            };
            let message = message
                .or_else(|| settings.code.clone())
                .context("no message given and the settings file has no code")?;
            let config = settings.to_configuration()?;

            println!("Machine: {}", config);
            let output = EncryptionEngine::encode_message(&config, &message)?;
            println!("Input:  {}", message.to_ascii_uppercase());
            println!("Output: {}", output.text.bold().green());
            println!(
                "Final positions: {}",
                output
                    .final_positions
                    .iter()
                    .map(char::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            );
        }

        Commands::Demo { kind } => {
            let results = demos::run(kind)?;
            for result in &results {
                let demo = &result.demonstration;
                println!("\n{}", format!("****** {} ******", demo.title).bold());
                println!("  {}", demo.configuration);
                println!("  {} -> {}", demo.input, result.output.text);
                let status = if result.passed() {
                    "PASSED".green()
                } else {
                    "FAILED".red()
                };
                println!("  Expected {}: {}", demo.expected, status);
            }
            let failed = results.iter().filter(|r| !r.passed()).count();
            if failed > 0 {
                anyhow::bail!("{} demonstration(s) failed", failed);
            }
        }

        Commands::Crack {
            settings,
            output,
            format,
            results_file,
            sequential,
            max_matches,
        } => {
            let path = settings;
            let settings = Settings::load(&path)?;
            let label = settings
                .label
                .clone()
                .unwrap_or_else(|| path.display().to_string());
            let task = settings
                .to_task()
                .with_context(|| format!("preparing search from {}", path.display()))?;

            let mut options = settings.search_options();
            if sequential {
                options.parallel = false;
            }
            if max_matches.is_some() {
                options.max_matches = max_matches;
            }

            println!("Cracking: {}", label.bold());
            for dimension in task.dimensions() {
                println!("  Searching {}", dimension);
            }

            let mut console = ConsoleSink::new();
            let mut collected: Vec<MatchRecord> = Vec::new();
            let mut text_file = results_file
                .as_deref()
                .map(|p| TextFileSink::append(p, &label))
                .transpose()
                .context("opening results file")?;

            let summary = {
                let mut sinks: Vec<&mut dyn MatchSink> = vec![&mut console, &mut collected];
                if let Some(sink) = text_file.as_mut() {
                    sinks.push(sink);
                }
                SearchEngine::new(options).run(&task, &mut FanOut::new(sinks))?
            };
            if let Some(sink) = text_file {
                let path = sink.path().display().to_string();
                sink.finish().with_context(|| format!("writing {}", path))?;
            }

            let crack = CrackReport::new(&label, &task, summary, collected);
            println!();
            report::print_summary(&crack.summary);
            if let Some(output_path) = output {
                report::save_report(&crack, output_path, format)?;
            }
        }

        Commands::Tasks {
            only,
            results_file,
            sequential,
        } => {
            if results_file.exists() {
                fs::remove_file(&results_file)
                    .with_context(|| format!("removing {}", results_file.display()))?;
            }
            let options = sequential.then(|| SearchOptions {
                parallel: false,
                max_matches: None,
            });
            let numbers: Vec<usize> = match only {
                Some(number) => vec![number],
                None => tasks::numbers().collect(),
            };

            for number in numbers {
                let label = tasks::label(number)?;
                println!("\n{}", label.bold().cyan());

                let mut console = ConsoleSink::new();
                let mut text_file = TextFileSink::append(&results_file, &label)
                    .with_context(|| format!("opening {}", results_file.display()))?;
                let sinks: Vec<&mut dyn MatchSink> = vec![&mut console, &mut text_file];
                let outcome = tasks::run(number, options.clone(), &mut FanOut::new(sinks))?;
                text_file
                    .finish()
                    .with_context(|| format!("writing {}", results_file.display()))?;
                report::print_summary(&outcome.summary);
            }
            println!("\nResults written to: {}", results_file.display());
        }
    }

    Ok(())
}
