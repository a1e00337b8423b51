//! Comprobador CLI library
//!
//! Command-line plumbing for the comprobar storefront suites: argument
//! definitions, console output, and the run-command driver. The binary in
//! `main.rs` stays thin on top of this.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{Cli, ColorArg, Commands, ListArgs, OutputFormat, RunArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::ProgressReporter;
pub use runner::{build_suite_config, select_scenarios, ScenarioRunner};
