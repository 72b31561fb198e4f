//! Logger initialization for the `seedurls` binary.
//!
//! Logs go to stderr by default so stdout only carries results.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to stderr.
    Terminal,
    /// Write to the given file, truncating it.
    File(PathBuf),
}

pub fn initialize(destination: &LogDestination, level: LevelFilter) {
    let config = build_config();

    let logger: Box<dyn SharedLogger> = match destination {
        LogDestination::Terminal => {
            TermLogger::new(level, config, TerminalMode::Stderr, ColorChoice::Auto)
        }
        LogDestination::File(path) => match create_file_logger(level, config, path) {
            Some(file_logger) => file_logger,
            None => return,
        },
    };

    let _ = CombinedLogger::init(vec![logger]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    path: &Path,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
