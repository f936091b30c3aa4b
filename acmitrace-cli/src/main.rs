//! ACMITrace CLI - Command-line interface
//!
//! Decodes an extracted ACMI recording file and prints an inventory of
//! the recorded objects, their lifecycle events, and weapon-to-launcher
//! attribution.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use acmitrace::logging::{default_log_dir, default_log_file, init_logging};
use acmitrace::{Decoder, FileRecording};

mod error;
mod report;

use error::CliError;

#[derive(Parser)]
#[command(name = "acmitrace")]
#[command(version = acmitrace::VERSION)]
#[command(about = "Decode an ACMI flight recording and summarize its contents", long_about = None)]
struct Args {
    /// Path to the extracted recording (.txt.acmi)
    recording: PathBuf,

    /// Keep decoding past failing lines and report them at the end
    #[arg(long)]
    best_effort: bool,
}

fn main() {
    if let Err(err) = run(Args::parse()) {
        err.exit();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let _guard = init_logging(default_log_dir(), default_log_file())
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    let recording = FileRecording::open(&args.recording).map_err(|error| CliError::Open {
        path: args.recording.display().to_string(),
        error,
    })?;
    info!(
        "decoding {} ({} lines)",
        args.recording.display(),
        recording.line_count()
    );

    let mut decoder = Decoder::new();
    if args.best_effort {
        let report = decoder.decode_lenient(&recording).map_err(CliError::Decode)?;
        report::print_summary(&decoder);
        if !report.is_clean() {
            eprintln!();
            eprintln!(
                "{} of {} lines failed to decode:",
                report.errors.len(),
                report.lines_read
            );
            for line_error in &report.errors {
                eprintln!("  {line_error}");
            }
        }
    } else {
        decoder.decode(&recording).map_err(CliError::Decode)?;
        report::print_summary(&decoder);
    }

    Ok(())
}
