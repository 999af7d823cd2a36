use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use rawfileinspect::cli::Cli;
use rawfileinspect::{AppError, Config, dispatch, open_path};

pub fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = Config::from(cli.command);
    debug!("{config:?}");

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let result =
        dispatch(&config, open_path, &mut out).and_then(|_| out.flush().map_err(AppError::from));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Keep whatever was reported before the failure
            let _ = out.flush();
            debug!("{} failed: {e:?}", config.command.name());
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
