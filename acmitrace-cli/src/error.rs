//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent
//! formatting and appropriate exit codes.

use std::fmt;
use std::process;

use acmitrace::DecodeError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Failed to read the recording file
    Open { path: String, error: DecodeError },
    /// The recording failed to decode
    Decode(DecodeError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        if let CliError::Decode(DecodeError::AtLine { source, .. }) = self {
            if matches!(**source, DecodeError::UnresolvedParent { .. }) {
                eprintln!();
                eprintln!("The recording creates a weapon before any launch platform.");
                eprintln!("Re-run with --best-effort to keep decoding past this line.");
            }
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Open { path, error } => {
                write!(f, "Failed to read recording {}: {}", path, error)
            }
            CliError::Decode(error) => write!(f, "Failed to decode recording: {}", error),
        }
    }
}
