use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::charts::histogram::DEFAULT_BINS;
use crate::data::filter::EmptySelection;

pub const DEFAULT_DATA_PATH: &str = "financials.csv";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Reading of an empty product / segment pick, as spelled on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EmptyPick {
    /// An empty pick places no constraint on its dimension.
    All,
    /// An empty pick matches no records.
    #[value(name = "none", alias = "literal")]
    Nothing,
}

impl From<EmptyPick> for EmptySelection {
    fn from(pick: EmptyPick) -> Self {
        match pick {
            EmptyPick::All => EmptySelection::MatchAll,
            EmptyPick::Nothing => EmptySelection::Literal,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "findash",
    about = "Interactive dashboard over a table of financial records."
)]
pub struct Cli {
    /// Data file to load (.csv, .tsv, .json or .parquet).
    #[arg(env = "FINDASH_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// How an empty product or segment pick filters the records.
    #[arg(
        long,
        env = "FINDASH_EMPTY_SELECTION",
        value_enum,
        ignore_case = true,
        default_value_t = EmptyPick::All
    )]
    pub empty_selection: EmptyPick,

    /// Number of bins in the cost histogram.
    #[arg(
        long,
        env = "FINDASH_HISTOGRAM_BINS",
        value_name = "N",
        default_value_t = DEFAULT_BINS,
        value_parser = parse_bin_count
    )]
    pub histogram_bins: usize,
}

fn parse_bin_count(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(bins) => Ok(bins),
        Err(e) => Err(e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

/// Settings resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Data file loaded before the window opens.
    pub data_path: PathBuf,
    /// How empty product / segment picks are read.
    pub empty_selection: EmptySelection,
    /// Bin count for the cost histogram.
    pub histogram_bins: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            empty_selection: EmptySelection::default(),
            histogram_bins: DEFAULT_BINS,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            data_path: cli.data,
            empty_selection: cli.empty_selection.into(),
            histogram_bins: cli.histogram_bins,
        }
    }
}

impl Config {
    /// Resolve from the process arguments and environment. `--help`,
    /// `--version` and invalid values print a message and exit.
    pub fn from_env() -> Self {
        Cli::parse().into()
    }

    /// Resolve from explicit arguments; the first item is the program name.
    /// Unset options still fall back to their environment variables.
    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Cli::try_parse_from(args).map(Config::from)
    }
}
