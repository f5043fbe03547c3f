//! Purpose: `trafficlog` CLI entry point.
//! Role: Parses args, installs logging, runs one action, prints the result.
//! Invariants: Every failure is reported as a message on stderr; nothing is retried.
//! Invariants: Process exit code is derived from `error::to_exit_code`.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};
use serde_json::{Value, json};
use time::Date;
use tracing_subscriber::EnvFilter;

mod command_dispatch;

use trafficlog::{
    config::Config,
    error::{Error, to_exit_code},
    types::{Fine, ViolationId, ViolationType},
    violation::parse_date,
};

#[derive(Parser)]
#[command(
    name = "trafficlog",
    version,
    about = "Log traffic violations, search plate history, analyze trends and export reports",
    long_about = None,
    after_help = r#"EXAMPLES
  $ trafficlog log --plate MH12AB1234 --type speeding --date 2024-03-01
  $ trafficlog search MH12AB1234
  $ trafficlog update 2 --fine 2500
  $ trafficlog export pdf --output Report.pdf

The data file defaults to ./Violations.csv (override with --file or TRAFFICLOG_FILE).
New ids continue from the largest id in the file, so deleting the newest
violation lets its id be assigned again by a later run."#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Violation CSV file (default: $TRAFFICLOG_FILE or ./Violations.csv)",
        value_hint = ValueHint::FilePath
    )]
    file: Option<PathBuf>,
    #[arg(long, global = true, help = "Emit JSON instead of human readable text")]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log a new violation; the fine comes from the fine schedule
    Log {
        #[arg(long, help = "License plate as written on the vehicle")]
        plate: String,
        #[arg(long = "type", value_parser = parse_violation_type, help = "Violation type label or slug, e.g. speeding")]
        violation_type: ViolationType,
        #[arg(long, value_parser = parse_date_arg, help = "Violation date YYYY-MM-DD (default: today)")]
        date: Option<Date>,
    },
    /// Show every stored violation
    View,
    /// List the violations recorded against a plate
    Search {
        /// Exact license plate to look up
        plate: String,
    },
    /// Most common violations, hourly distribution and total fines
    Analyze,
    /// Change the fine of a violation
    Update {
        /// Violation id
        id: ViolationId,
        #[arg(long, allow_negative_numbers = true, help = "New fine amount")]
        fine: Fine,
    },
    /// Delete a violation
    Delete {
        /// Violation id
        id: ViolationId,
    },
    /// Export all violations as a report
    Export {
        #[command(subcommand)]
        format: ExportFormat,
    },
    /// Print the fixed fine schedule
    Fines,
}

#[derive(Subcommand)]
enum ExportFormat {
    /// Comma separated values (text/csv)
    Csv {
        #[arg(long, value_hint = ValueHint::FilePath, help = "Output file (default: Report.csv)")]
        output: Option<PathBuf>,
    },
    /// Paginated table document (application/pdf)
    Pdf {
        #[arg(long, value_hint = ValueHint::FilePath, help = "Output file (default: Report.pdf)")]
        output: Option<PathBuf>,
        #[arg(long, help = "Title printed at the top of every page")]
        title: Option<String>,
    },
}

fn parse_violation_type(value: &str) -> Result<ViolationType, Error> {
    value.parse()
}

fn parse_date_arg(value: &str) -> Result<Date, Error> {
    parse_date(value)
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let json = cli.json;

    let mut config = Config::from_env();
    if let Some(file) = cli.file {
        config.data_file = file;
    }

    let exit_code = match command_dispatch::dispatch_command(cli.command, &config, json) {
        Ok(()) => 0,
        Err(err) => {
            emit_error(&err, json);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn emit_error(err: &Error, json: bool) {
    if json {
        let value = json!({
            "error": {
                "kind": format!("{:?}", err.kind()),
                "message": err.to_string(),
                "id": err.id(),
            }
        });
        eprintln!("{value}");
    } else {
        eprintln!("error: {err}");
    }
}

fn emit_json(value: Value) {
    println!("{value}");
}
