/// Command-line arguments.
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::Level;

#[derive(Debug, Clone, Parser)]
#[command(name = "pathsize", version)]
#[command(about = "List a directory's entries sorted by cumulative size")]
pub struct Cli {
    /// Directory (or file) to report on.
    #[arg(default_value = ".", conflicts_with = "delete")]
    pub path: String,

    /// Extra exclusion pattern (regex, anchored at the start of the full path).
    /// May be given multiple times.
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Drop the configured exclusion patterns before applying `--exclude`.
    #[arg(long)]
    pub clear_excludes: bool,

    /// Configuration file (JSON). Defaults to the platform config directory.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only list the N largest entries.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Delete a single file instead of listing, and report the space freed.
    /// A symlink is removed itself, not its target.
    #[arg(long, value_name = "FILE", conflicts_with = "top")]
    pub delete: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace). The default is info.
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Maximum log level selected by `-v` / `-q`.
    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
