mod app;
mod cli;
mod logging;
mod output;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use seed_logging::{level_for_verbosity, seed_error};

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::initialize(&cli.log_destination(), level_for_verbosity(cli.verbose));

    let stdout = io::stdout();
    match app::run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            seed_error!("{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
