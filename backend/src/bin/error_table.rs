//! Print the domain error catalog with resolved HTTP statuses as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Write};

use clap::Parser;
use domain_errors::domain::{ErrorGroup, catalog};
use domain_errors::inbound::http::HttpStatusMapper;
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `error-table` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "error-table",
    about = "Print domain error codes, messages, groups and HTTP statuses",
    version
)]
struct CliArgs {
    /// Print a single code instead of the whole catalog.
    #[arg(long = "code", value_name = "CODE")]
    code: Option<String>,
}

#[derive(Debug, Serialize)]
struct TableRow<'a> {
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<ErrorGroup>,
    status: u16,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let mapper = HttpStatusMapper::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.code.as_deref() {
        Some(code) => {
            let row = row_for_code(&mapper, code);
            write_row(&mut out, &row)?;
        }
        None => {
            for entry in catalog() {
                let row = TableRow {
                    code: entry.error().code(),
                    message: Some(entry.error().message()),
                    group: Some(entry.group()),
                    status: mapper.status_for(entry.error()).as_u16(),
                };
                write_row(&mut out, &row)?;
            }
            debug!(entries = catalog().len(), "catalog printed");
        }
    }
    out.flush()
}

fn row_for_code<'a>(mapper: &HttpStatusMapper, code: &'a str) -> TableRow<'a> {
    let entry = catalog().iter().find(|entry| entry.error().code() == code);
    if entry.is_none() {
        debug!(code, "code not in catalog; showing resolved status only");
    }
    TableRow {
        code,
        message: entry.map(|entry| entry.error().message()),
        group: entry.map(|entry| entry.group()),
        status: mapper.status_for_code(code).as_u16(),
    }
}

fn write_row(out: &mut impl Write, row: &TableRow<'_>) -> io::Result<()> {
    serde_json::to_writer(&mut *out, row).map_err(io::Error::other)?;
    writeln!(out)
}
