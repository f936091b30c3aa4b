//! Raw line acquisition.
//!
//! A [`LineSource`] yields the recording's logical lines in order and can
//! restart from the top, which is all the decoder needs. Extracting the
//! text from a zipped container is left to the caller; plug a
//! container-aware source in behind the same trait.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::DecodeError;

/// An ordered, finite, restartable-from-start sequence of raw lines.
pub trait LineSource {
    /// A fresh snapshot of the recording's lines, from the start.
    fn lines(&self) -> Result<Vec<String>, DecodeError>;
}

/// Line source backed by an extracted recording file on disk.
///
/// The file is read eagerly; bytes that are not valid UTF-8 are
/// substituted rather than failing the whole read, matching how
/// recorders occasionally emit mojibake in free-text fields.
#[derive(Debug, Clone)]
pub struct FileRecording {
    path: PathBuf,
    lines: Vec<String>,
}

impl FileRecording {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DecodeError> {
        let path = path.as_ref().to_path_buf();
        let bytes = fs::read(&path)?;
        let text = String::from_utf8_lossy(&bytes);
        let lines: Vec<String> = text.lines().map(str::to_owned).collect();
        debug!("read {} lines from {}", lines.len(), path.display());
        Ok(Self { path, lines })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for FileRecording {
    fn lines(&self) -> Result<Vec<String>, DecodeError> {
        Ok(self.lines.clone())
    }
}

/// In-memory line source, mostly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecording {
    lines: Vec<String>,
}

impl MemoryRecording {
    pub fn from_lines(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| (*l).to_owned()).collect(),
        }
    }
}

impl LineSource for MemoryRecording {
    fn lines(&self) -> Result<Vec<String>, DecodeError> {
        Ok(self.lines.clone())
    }
}
