use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tulind_config::{OutputFormat, TulindConfig};
use tulind_indicators::{IndicatorInfo, IndicatorKind, IndicatorType, OptionValue};

use crate::telemetry::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "tulind", version, about = "Inspect the Tulip Indicators catalog")]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./tulind.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Output format, overrides the configured one
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,
    /// Log filter directive, overrides the configured one
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List indicators, optionally filtered by classification
    List {
        #[arg(long = "type")]
        indicator_type: Option<IndicatorType>,
    },
    /// Show the metadata of one indicator
    Info { name: String },
    /// Print the input index of the first output sample for the given options
    Start {
        name: String,
        #[arg(allow_hyphen_values = true)]
        options: Vec<String>,
    },
    /// Validate a call shape and print the resulting output geometry
    Check {
        name: String,
        /// Length of every input series
        #[arg(long)]
        len: usize,
        #[arg(allow_hyphen_values = true)]
        options: Vec<String>,
    },
}

#[derive(Serialize)]
struct StartReport {
    indicator: &'static str,
    start: usize,
}

#[derive(Serialize)]
struct CheckReport {
    indicator: &'static str,
    inputs: usize,
    input_len: usize,
    start: usize,
    output_len: usize,
    outputs: &'static [&'static str],
}

/// Parses the command line, loads configuration and runs the command against stdout.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = TulindConfig::load(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    init_tracing(&config.log)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli.command, config.output.format, &mut out)
}

/// Runs a parsed command, writing its report to `out`.
pub fn execute(command: &Command, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    debug!(?command, %format, "executing command");
    match command {
        Command::List { indicator_type } => {
            let infos: Vec<&'static IndicatorInfo> = IndicatorKind::ALL
                .iter()
                .map(|kind| kind.info())
                .filter(|info| indicator_type.map_or(true, |ty| info.indicator_type == ty))
                .collect();
            match format {
                OutputFormat::Json => write_json(out, &infos)?,
                OutputFormat::Text => {
                    for info in infos {
                        writeln!(
                            out,
                            "{:<16} {:<10} {}",
                            info.name, info.indicator_type, info.full_name
                        )?;
                    }
                }
            }
        }
        Command::Info { name } => {
            let info = resolve(name)?.info();
            match format {
                OutputFormat::Json => write_json(out, info)?,
                OutputFormat::Text => write_info(out, info)?,
            }
        }
        Command::Start { name, options } => {
            let kind = resolve(name)?;
            let start = kind.start_index(&option_values(options))?;
            match format {
                OutputFormat::Json => write_json(
                    out,
                    &StartReport {
                        indicator: kind.name(),
                        start,
                    },
                )?,
                OutputFormat::Text => writeln!(out, "{start}")?,
            }
        }
        Command::Check { name, len, options } => {
            let kind = resolve(name)?;
            let info = kind.info();
            let lengths = vec![*len; info.inputs];
            let plan = kind.plan(&lengths, &option_values(options))?;
            let report = CheckReport {
                indicator: info.name,
                inputs: info.inputs,
                input_len: plan.input_len(),
                start: plan.start(),
                output_len: plan.output_len(),
                outputs: info.output_names,
            };
            match format {
                OutputFormat::Json => write_json(out, &report)?,
                OutputFormat::Text => {
                    writeln!(out, "indicator:  {}", report.indicator)?;
                    writeln!(out, "input_len:  {}", report.input_len)?;
                    writeln!(out, "start:      {}", report.start)?;
                    writeln!(out, "output_len: {}", report.output_len)?;
                    writeln!(out, "outputs:    {}", report.outputs.join(", "))?;
                }
            }
        }
    }
    Ok(())
}

fn resolve(name: &str) -> Result<IndicatorKind> {
    name.parse::<IndicatorKind>().with_context(|| {
        format!(
            "run `tulind list` to see the {} known indicators",
            IndicatorKind::ALL.len()
        )
    })
}

fn option_values(raw: &[String]) -> Vec<OptionValue> {
    raw.iter().map(|value| OptionValue::from(value.as_str())).collect()
}

fn write_info(out: &mut impl Write, info: &IndicatorInfo) -> Result<()> {
    writeln!(out, "{} ({})", info.full_name, info.name)?;
    writeln!(out, "type:    {}", info.indicator_type)?;
    writeln!(out, "inputs:  {} [{}]", info.inputs, info.input_names.join(", "))?;
    writeln!(out, "options: {} [{}]", info.options, info.option_names.join(", "))?;
    writeln!(out, "outputs: {} [{}]", info.outputs, info.output_names.join(", "))?;
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
