//! Comprobador: drive the storefront scenario suites from the shell
//!
//! ## Usage
//!
//! ```bash
//! comprobador run                      # run every suite
//! comprobador run --suite cart        # run one suite
//! comprobador run --filter lifecycle  # substring selection
//! comprobador list                    # show registered scenarios
//! ```

use clap::Parser;
use comprobador::{
    select_scenarios, Cli, CliConfig, CliError, CliResult, Commands, ListArgs, OutputFormat,
    ScenarioRunner, Verbosity,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every executed scenario passed.
fn run() -> CliResult<bool> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity);

    match cli.command {
        Commands::Run(args) => {
            let report = ScenarioRunner::new(&config).run(&args)?;
            Ok(report.all_passed())
        }
        Commands::List(args) => {
            list_scenarios(&args)?;
            Ok(true)
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };
    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(cli.color.into())
}

/// `RUST_LOG` wins when set; the verbosity flags pick the default otherwise.
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.tracing_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn list_scenarios(args: &ListArgs) -> CliResult<()> {
    let scenarios = select_scenarios(args.suite, args.filter.as_deref());
    if args.format == OutputFormat::Json {
        let entries: Vec<_> = scenarios
            .iter()
            .map(|scenario| {
                serde_json::json!({
                    "id": scenario.id.to_string(),
                    "suite": scenario.id.suite.to_string(),
                    "name": scenario.id.name,
                    "summary": scenario.summary,
                    "skip_by_default": scenario.skip_by_default,
                })
            })
            .collect();
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| CliError::report_generation(e.to_string()))?;
        println!("{json}");
        return Ok(());
    }
    let mut current_suite = None;
    for scenario in &scenarios {
        if current_suite != Some(scenario.id.suite) {
            current_suite = Some(scenario.id.suite);
            println!();
            println!("{}:", scenario.id.suite);
        }
        let id = scenario.id.to_string();
        let mut line = format!("  {id:<42} {}", scenario.summary);
        if scenario.skip_by_default {
            line.push_str(" [skipped by default]");
        }
        println!("{line}");
    }
    println!();
    println!("{} scenarios", scenarios.len());
    Ok(())
}
