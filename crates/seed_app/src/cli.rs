use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};

use crate::logging::LogDestination;

/// Expand the start urls of a crawl spec.
#[derive(Debug, Parser)]
#[command(name = "seedurls", version)]
#[command(about = "Expand crawl spec start urls", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print results as a JSON array.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Generator type for legacy entries, overriding the spec file.
    #[arg(long, global = true)]
    pub default_type: Option<String>,

    /// Largest number of values a range fragment may expand to.
    #[arg(long, global = true)]
    pub max_range: Option<usize>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every generated start url, in spec order.
    Urls {
        /// Crawl spec file (.json or .ron).
        spec: PathBuf,

        /// Stop after this many urls.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the spec entries that remain after deduplication.
    Uniq {
        /// Crawl spec file (.json or .ron).
        spec: PathBuf,
    },

    /// Print the domains the spec is allowed to crawl.
    Domains {
        /// Crawl spec file (.json or .ron).
        spec: PathBuf,
    },
}

impl Command {
    pub fn spec(&self) -> &Path {
        match self {
            Command::Urls { spec, .. } | Command::Uniq { spec } | Command::Domains { spec } => spec,
        }
    }
}

impl Cli {
    pub fn log_destination(&self) -> LogDestination {
        match &self.log_file {
            Some(path) => LogDestination::File(path.clone()),
            None => LogDestination::Terminal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_with_limit_and_global_flags() {
        let cli = Cli::try_parse_from([
            "seedurls", "urls", "spider.json", "--limit", "5", "--json", "-vv",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.command.spec(), Path::new("spider.json"));
        assert!(matches!(cli.command, Command::Urls { limit: Some(5), .. }));
        assert!(matches!(cli.log_destination(), LogDestination::Terminal));
    }

    #[test]
    fn log_file_selects_file_destination() {
        let cli = Cli::try_parse_from([
            "seedurls",
            "--log-file",
            "seed.log",
            "domains",
            "spider.ron",
        ])
        .unwrap();

        assert!(matches!(
            cli.log_destination(),
            LogDestination::File(path) if path == Path::new("seed.log")
        ));
        assert!(matches!(cli.command, Command::Domains { .. }));
    }

    #[test]
    fn spec_path_is_required() {
        assert!(Cli::try_parse_from(["seedurls", "uniq"]).is_err());
    }
}
