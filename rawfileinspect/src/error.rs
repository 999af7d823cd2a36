use std::fmt::Display;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::constants::Device;

/// Failures reported by a [`RawSource`](crate::RawSource).
///
/// An absent device is an expected outcome when probing instrument indices and
/// callers are free to skip it. Anything else is fatal to the current report.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no {device} device at index {index}")]
    AbsentDevice { device: Device, index: usize },
    #[error("{0}")]
    Fatal(String),
}

impl SourceError {
    pub fn fatal<S: Into<String>>(message: S) -> Self {
        Self::Fatal(message.into())
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::AbsentDevice { .. })
    }
}

/// Bad command line input, caught before any data source is opened.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a file path is required")]
    EmptyPath,
    #[error("no file exists at {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),
    #[error("scan numbers must be greater than zero, got {0}")]
    NonPositiveScan(i32),
    #[error("range upper bound {hi} must be greater than or equal to lower bound {lo}")]
    InvertedRange { lo: i32, hi: i32 },
    #[error("a scan range takes at most two values, got {0}")]
    TooManyValues(usize),
}

/// The three ways an opened source can refuse to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCondition {
    NotOpen,
    HasError,
    InAcquisition,
}

impl Display for SourceCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotOpen => f.write_str("is not open"),
            Self::HasError => f.write_str("reported an error"),
            Self::InAcquisition => f.write_str("is still being acquired"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("cannot read {}: {reason}", .path.display())]
    UnsupportedFormat { path: PathBuf, reason: String },
    #[error("failed to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("raw file {file} {condition}: {detail}")]
    SourceState {
        file: String,
        condition: SourceCondition,
        detail: String,
    },
    #[error("processing failed: {0}")]
    Processing(#[from] SourceError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// The process exit status for this failure. Argument parsing failures
    /// never reach here, `clap` exits with 2 on its own.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 3,
            Self::UnsupportedFormat { .. } | Self::Open { .. } | Self::SourceState { .. } => 4,
            Self::Processing(_) | Self::Io(_) => 1,
        }
    }
}
