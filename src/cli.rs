//! Command-line interface for gloc.

use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use tracing::debug;

use crate::analyze::{Analysis, OutputMode};
use crate::config::Config;
use crate::model::RowOrder;
use crate::tools::SystemToolchain;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Count lines of code in a remote repository.
///
/// Clones the repository into a temporary directory, runs cloc on it and
/// prints a per-language summary of file and code-line counts.
#[derive(Parser, Debug)]
#[command(name = "gloc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Repository URL, e.g. https://github.com/owner/repo
    pub url: String,

    /// Show all raw analyzer output instead of a summary
    #[arg(long)]
    pub raw: bool,

    /// Summary format (ignored with --raw)
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Row order for the summary (default: from config, else name)
    #[arg(short, long, value_enum)]
    pub sort: Option<SortArg>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Clone only the most recent N commits
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub depth: Option<u32>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Summary output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
}

/// Row order as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Name,
    Code,
    Files,
}

impl From<SortArg> for RowOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => RowOrder::Name,
            SortArg::Code => RowOrder::Code,
            SortArg::Files => RowOrder::Files,
        }
    }
}

impl Cli {
    /// Output mode after applying flags over config defaults.
    pub fn output_mode(&self, config: &Config) -> OutputMode {
        let order = self.sort.map(RowOrder::from).unwrap_or(config.sort);
        match (self.raw, self.format) {
            (true, _) => OutputMode::Raw,
            (false, Format::Table) => OutputMode::Table(order),
            (false, Format::Json) => OutputMode::Json(order),
        }
    }

    /// Merge command-line overrides into `config`.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(depth) = self.depth {
            config.clone_depth = Some(depth);
        }
    }
}

/// Run gloc with parsed arguments.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let (mut config, source) = Config::load(cli.config.as_deref())?;
    match &source {
        Some(path) => debug!(path = %path.display(), "loaded config"),
        None => debug!("using default config"),
    }
    cli.apply_overrides(&mut config);

    let mode = cli.output_mode(&config);
    let tools = SystemToolchain::from_config(&config);
    let analysis = Analysis::new(config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = analysis.run(&cli.url, mode, &tools, &mut out) {
        eprintln!("Error: {}", e);
        return Ok(EXIT_FAILURE);
    }

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("gloc").chain(args.iter().copied()))
    }

    #[test]
    fn test_requires_exactly_one_url() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["https://github.com/a/b", "https://github.com/c/d"]).is_err());
        assert!(parse(&["https://github.com/a/b"]).is_ok());
    }

    #[test]
    fn test_raw_overrides_format() {
        let cli = parse(&["--raw", "--format", "json", "https://github.com/a/b"]).unwrap();
        assert_eq!(cli.output_mode(&Config::default()), OutputMode::Raw);
    }

    #[test]
    fn test_default_mode_is_table_by_name() {
        let cli = parse(&["https://github.com/a/b"]).unwrap();
        assert_eq!(
            cli.output_mode(&Config::default()),
            OutputMode::Table(RowOrder::Name)
        );
    }

    #[test]
    fn test_sort_flag_beats_config() {
        let config = Config {
            sort: RowOrder::Files,
            ..Config::default()
        };
        let cli = parse(&["https://github.com/a/b"]).unwrap();
        assert_eq!(cli.output_mode(&config), OutputMode::Table(RowOrder::Files));

        let cli = parse(&["-s", "code", "-f", "json", "https://github.com/a/b"]).unwrap();
        assert_eq!(cli.output_mode(&config), OutputMode::Json(RowOrder::Code));
    }

    #[test]
    fn test_depth_override() {
        let cli = parse(&["--depth", "1", "https://github.com/a/b"]).unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.clone_depth, Some(1));

        assert!(parse(&["--depth", "0", "https://github.com/a/b"]).is_err());
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = parse(&["-vv", "https://github.com/a/b"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
