use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::dispatch::{Command, Config};

/// Print file, instrument and MS2 isolation reports from Thermo RAW files
#[derive(Debug, Parser)]
#[command(name = "rawfileinspect")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print system, file, sample and instrument information
    Info {
        /// The RAW file (or JSON snapshot) to read
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,
    },

    /// Print isolation and precursor details for each MS2 scan
    Isolation {
        /// The RAW file (or JSON snapshot) to read
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,

        /// A single scan number, or the first and last scan of an inclusive range
        #[arg(
            short,
            long,
            value_name = "SCAN",
            num_args = 1..=2,
            allow_negative_numbers = true
        )]
        num: Vec<i32>,

        /// Also print the master scan number and ionization mode of each scan
        #[arg(long)]
        master_scan: bool,
    },
}

impl From<Commands> for Config {
    fn from(value: Commands) -> Self {
        match value {
            Commands::Info { file } => Config {
                command: Command::Info,
                file,
                scan_numbers: Vec::new(),
                master_scan: false,
            },
            Commands::Isolation {
                file,
                num,
                master_scan,
            } => Config {
                command: Command::Isolation,
                file,
                scan_numbers: num,
                master_scan,
            },
        }
    }
}
