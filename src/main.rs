// Kaleidux Intervals - GPL-3.0-or-later
// This file is part of Kaleidux Intervals.
//
// Copyright (C) 2026 The Kaleidux Intervals authors
//
// Kaleidux Intervals is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Kaleidux Intervals is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Kaleidux Intervals.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use kaleidux_intervals::config::UserConfig;
use kaleidux_intervals::core::{find_latest_log, open_log, scan, DEFAULT_LOG_FILE};
use kaleidux_intervals::output::{BurstReporter, IntervalWriter, RecordLayout};
use kaleidux_intervals::parser::TIMESTAMP_FORMAT;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kaleidux-intervals")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
#[command(about = "Measure time between consecutive content changes in kaleidux daemon logs", long_about = None)]
struct Cli {
    /// Increase diagnostic output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write every interval as `<output>: <delta>s` to a file
    Intervals {
        #[command(flatten)]
        input: InputArgs,

        /// Output file [default: intervals.txt]
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Write every interval with its timestamp to a file; requires a log path
    Annotated {
        #[command(flatten)]
        input: InputArgs,

        /// Output file [default: intervals_new.txt]
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print intervals shorter than 200ms to stdout
    Bursts {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Daemon log file to scan
    #[arg(value_name = "LOG")]
    log: Option<PathBuf>,

    /// Scan the newest daemon log in the kaleidux log directory
    #[arg(long, conflicts_with = "log")]
    latest: bool,
}

impl InputArgs {
    /// Resolve the log path: explicit path, then `--latest`, then `fallback`
    fn resolve(&self, config: &UserConfig, fallback: Option<&str>) -> Result<Option<PathBuf>> {
        if let Some(path) = &self.log {
            return Ok(Some(path.clone()));
        }
        if self.latest {
            let dir = config
                .log_dir()
                .context("Could not determine kaleidux log directory")?;
            let latest = find_latest_log(&dir)
                .with_context(|| format!("Cannot list log directory {}", dir.display()))?
                .with_context(|| format!("No daemon logs in {}", dir.display()))?;
            return Ok(Some(latest));
        }
        Ok(fallback.map(PathBuf::from))
    }
}

/// Log timestamps in the daemon's own `YYYY-MM-DD HH:MM:SS.mmm` layout
struct DaemonTimer;

impl FormatTime for DaemonTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format(TIMESTAMP_FORMAT))
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(DaemonTimer)
        .with_target(false)
        .init();
}

fn write_intervals<W: Write>(
    input: &InputArgs,
    output: Option<PathBuf>,
    layout: RecordLayout,
    config: &UserConfig,
    stdout: &mut W,
) -> Result<ExitCode> {
    let fallback = match layout {
        RecordLayout::Plain => Some(DEFAULT_LOG_FILE),
        RecordLayout::Annotated => None,
    };
    let Some(log_path) = input.resolve(config, fallback)? else {
        writeln!(stdout, "Usage: kaleidux-intervals annotated <log_file>")?;
        return Ok(ExitCode::FAILURE);
    };

    let lines = open_log(&log_path)
        .with_context(|| format!("Cannot open log file {}", log_path.display()))?;
    let output = output.unwrap_or_else(|| config.output_for(layout));
    let writer = IntervalWriter::create(&output, layout)
        .with_context(|| format!("Cannot create output file {}", output.display()))?;

    scan(lines, writer).with_context(|| format!("Scan of {} failed", log_path.display()))?;
    Ok(ExitCode::SUCCESS)
}

fn report_bursts<W: Write>(input: &InputArgs, config: &UserConfig, stdout: &mut W) -> Result<()> {
    let log_path = input
        .resolve(config, Some(DEFAULT_LOG_FILE))?
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    let lines = open_log(&log_path)
        .with_context(|| format!("Cannot open log file {}", log_path.display()))?;
    scan(lines, BurstReporter::new(stdout))?;
    Ok(())
}

/// Execute one subcommand, writing user-facing text to `stdout`/`stderr`
fn run<O: Write, E: Write>(
    command: Command,
    config: &UserConfig,
    stdout: &mut O,
    stderr: &mut E,
) -> ExitCode {
    let result = match command {
        Command::Intervals { input, output } => {
            write_intervals(&input, output, RecordLayout::Plain, config, stdout)
        }
        Command::Annotated { input, output } => {
            write_intervals(&input, output, RecordLayout::Annotated, config, stdout)
        }
        Command::Bursts { input } => {
            // Burst reports never fail the process; errors are reported inline
            if let Err(e) = report_bursts(&input, config, stdout) {
                let _ = writeln!(stdout, "Error: {e:#}");
            }
            Ok(ExitCode::SUCCESS)
        }
    };

    result.unwrap_or_else(|e| {
        let _ = writeln!(stderr, "Error: {e:#}");
        ExitCode::FAILURE
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    tracing::info!(
        "kaleidux-intervals starting up (version {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    );

    let config = UserConfig::load();
    run(
        cli.command,
        &config,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )
}
