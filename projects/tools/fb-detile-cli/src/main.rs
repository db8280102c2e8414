#![allow(unexpected_cfgs)]
#![cfg(not(tarpaulin_include))]

mod commands;
mod error;
mod util;
use argh::{EarlyExit, FromArgs};
use commands::detile::DetileCmd;
use error::CliError;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cmd = match parse_args() {
        Ok(cmd) => cmd,
        Err(code) => return code,
    };

    match commands::detile::handle_detile_command(&cmd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Parses the command line.
///
/// Unlike `argh::from_env`, a usage error exits with `EINVAL` rather than 1.
fn parse_args() -> Result<DetileCmd, ExitCode> {
    let args: Vec<String> = std::env::args().collect();
    let (command, rest) = match args.split_first() {
        Some((command, rest)) => (command.as_str(), rest),
        None => ("fb-detile", &[][..]),
    };
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

    DetileCmd::from_args(&[command], &rest)
        .map_err(|early_exit| ExitCode::from(early_exit_code(early_exit)))
}

/// Reports an early exit from argument parsing and returns the process exit code.
fn early_exit_code(early_exit: EarlyExit) -> u8 {
    match early_exit.status {
        // --help
        Ok(()) => {
            println!("{}", early_exit.output);
            0
        }
        Err(()) => {
            let e = CliError::Usage(early_exit.output);
            eprintln!("{e}");
            e.exit_code()
        }
    }
}
