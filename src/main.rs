mod config;

use crate::config::{Command, Configuration};
use anyhow::{Context, Result};
use clap::Parser;
use mimetable::MimeTypeLookup;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<ExitCode> {
    // Load config
    let config = Configuration::parse();

    // Set up logging, stdout is reserved for results
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set global tracing subscriber")?;
    info!("Starting mimetable version {}...", env!("CARGO_PKG_VERSION"));

    // Log configuration values
    config.log();

    let lookup = config
        .build_lookup()
        .context("Failed to set up lookup table")?;
    info!("Table has {} entries", lookup.table().len());

    let mut stdout = std::io::stdout().lock();
    run(&lookup, &config.command, &mut stdout).context("Failed to write result")
}

fn run(lookup: &MimeTypeLookup, command: &Command, out: &mut impl Write) -> io::Result<ExitCode> {
    match command {
        Command::Mime { format, default } => print_or_fail(
            out,
            lookup.mime_type_or(Some(format), default.as_deref()).as_deref(),
        ),
        Command::NonNull { format } => {
            writeln!(out, "{}", lookup.non_null_mime_type(Some(format)))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Formats { mime_type } => {
            for format in lookup.formats(Some(mime_type)) {
                writeln!(out, "{format}")?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::First { mime_type, default } => print_or_fail(
            out,
            lookup.first_format_or(Some(mime_type), default.as_deref()),
        ),
        Command::List => {
            for (format, mime_type) in lookup.table().entries() {
                writeln!(out, "{format}\t{mime_type}")?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_or_fail(out: &mut impl Write, result: Option<&str>) -> io::Result<ExitCode> {
    if let Some(result) = result {
        writeln!(out, "{result}")?;
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
