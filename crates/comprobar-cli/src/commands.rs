//! CLI command definitions using clap

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use comprobar::{BrowserKind, Suite, Viewport, DEFAULT_SCENARIO_BUDGET_MS};

use crate::config::ColorChoice;

/// Comprobador: end-to-end storefront checks for the OpenCart demo shop
#[derive(Parser, Debug)]
#[command(name = "comprobador")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run scenarios against the storefront
    Run(RunArgs),

    /// List registered scenarios
    List(ListArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    /// Run only this suite (layout, search, cart, account, catalog, checkout)
    #[arg(short, long, value_parser = Suite::from_str)]
    pub suite: Option<Suite>,

    /// Filter scenarios by substring over their suite::name identifier
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Browser family to drive (chromium, chrome, edge)
    #[arg(short, long, value_parser = BrowserKind::from_str)]
    pub browser: Option<BrowserKind>,

    /// Viewport preset (desktop, tablet, mobile, ...) or WIDTHxHEIGHT
    #[arg(long, value_parser = Viewport::from_str)]
    pub viewport: Option<Viewport>,

    /// Storefront base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Explicit browser executable, overriding detection
    #[arg(long)]
    pub executable: Option<PathBuf>,

    /// Show the browser window while scenarios run
    #[arg(long)]
    pub headed: bool,

    /// Stop after the first failure
    #[arg(long)]
    pub fail_fast: bool,

    /// Also run scenarios marked skip-by-default
    #[arg(long)]
    pub include_skipped: bool,

    /// Per-scenario wall-clock budget in milliseconds
    #[arg(long, default_value_t = DEFAULT_SCENARIO_BUDGET_MS)]
    pub timeout: u64,

    /// Directory for failure screenshots
    #[arg(long, default_value = "target/comprobar")]
    pub artifacts: PathBuf,

    /// Write a JSON report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Write a JUnit XML report to this path
    #[arg(long)]
    pub junit: Option<PathBuf>,

    /// Output format on stdout (text, json)
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// List only this suite
    #[arg(short, long, value_parser = Suite::from_str)]
    pub suite: Option<Suite>,

    /// Filter scenarios by substring over their suite::name identifier
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Output format on stdout (text, json)
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for run results and the scenario listing
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable console output
    #[default]
    Text,
    /// Machine-readable JSON on stdout
    Json,
}

/// Color argument accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Use colors when stdout is a terminal
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
