//! Route a parsed [`Config`] to its validator and report, managing the source's lifetime.
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{AppError, ValidationError};
use crate::guard::SourceGuard;
use crate::report::{IsolationOptions, write_info, write_isolation};
use crate::source::RawSource;
use crate::validate::{validate_file, validate_scan_range};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Info,
    Isolation,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Isolation => "isolation",
        }
    }

    pub fn spec(&self) -> &'static CommandSpec {
        match self {
            Self::Info => &INFO,
            Self::Isolation => &ISOLATION,
        }
    }
}

/// Everything one invocation needs, as parsed from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub command: Command,
    pub file: PathBuf,
    /// Zero, one or two scan numbers. Only read by [`Command::Isolation`].
    pub scan_numbers: Vec<i32>,
    pub master_scan: bool,
}

type Validator = fn(&Config) -> Result<(), ValidationError>;
type Handler = fn(&Config, &mut dyn RawSource, &mut dyn Write) -> Result<(), AppError>;

/// A subcommand's input checks and its report
pub struct CommandSpec {
    pub command: Command,
    pub validate: Validator,
    pub run: Handler,
}

impl CommandSpec {
    pub fn name(&self) -> &'static str {
        self.command.name()
    }
}

static INFO: CommandSpec = CommandSpec {
    command: Command::Info,
    validate: validate_info,
    run: run_info,
};

static ISOLATION: CommandSpec = CommandSpec {
    command: Command::Isolation,
    validate: validate_isolation,
    run: run_isolation,
};

pub static COMMANDS: [&CommandSpec; 2] = [&INFO, &ISOLATION];

fn validate_info(config: &Config) -> Result<(), ValidationError> {
    validate_file(&config.file)
}

fn run_info(
    _config: &Config,
    source: &mut dyn RawSource,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    write_info(source, out)
}

fn validate_isolation(config: &Config) -> Result<(), ValidationError> {
    validate_file(&config.file)?;
    validate_scan_range(&config.scan_numbers).map(|_| ())
}

fn run_isolation(
    config: &Config,
    source: &mut dyn RawSource,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    let options = IsolationOptions {
        range: validate_scan_range(&config.scan_numbers)?,
        master_scan: config.master_scan,
    };
    write_isolation(source, &options, out)
}

pub fn find_command(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().copied().find(|spec| spec.name() == name)
}

/// Validate `config`, open its file with `opener`, and write the requested report to `out`.
///
/// Nothing is opened unless validation passes. Once opened, the source is closed
/// exactly once before this returns, whether the report succeeds or not.
pub fn dispatch<F>(config: &Config, opener: F, out: &mut dyn Write) -> Result<(), AppError>
where
    F: FnOnce(&Path) -> Result<Box<dyn RawSource>, AppError>,
{
    let spec = config.command.spec();
    (spec.validate)(config)?;

    let mut guard = SourceGuard::new(opener(&config.file)?);
    guard.check_state()?;
    info!("Running {} on {}", spec.name(), config.file.display());
    (spec.run)(config, guard.source(), out)?;
    debug!("Finished {}", spec.name());
    Ok(())
}
