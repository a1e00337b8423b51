//! Scenario selection and execution behind the run command

use std::time::{Duration, Instant};

use comprobar::{
    registry, run_all, RunOptions, RunReport, Scenario, ScenarioStatus, Suite, SuiteConfig,
};
use tracing::debug;

use crate::commands::{OutputFormat, RunArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;

/// Registered scenarios matching the suite and name filters, in registry order
#[must_use]
pub fn select_scenarios(suite: Option<Suite>, filter: Option<&str>) -> Vec<Scenario> {
    registry()
        .into_iter()
        .filter(|scenario| scenario.matches(suite, filter))
        .collect()
}

/// Build the storefront configuration: environment first, CLI flags on top
///
/// # Errors
///
/// Returns a configuration error if a `COMPROBAR_*` override fails to parse.
pub fn build_suite_config(args: &RunArgs) -> CliResult<SuiteConfig> {
    let mut config = SuiteConfig::from_env()?;
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(browser) = args.browser {
        config = config.with_browser(browser);
    }
    if let Some(viewport) = args.viewport {
        config = config.with_viewport(viewport);
    }
    if let Some(executable) = &args.executable {
        config = config.with_executable(executable.clone());
    }
    if args.headed {
        config = config.with_headless(false);
    }
    Ok(config)
}

/// Drives a run-command invocation: selection, execution, console output,
/// and report files.
#[derive(Debug)]
pub struct ScenarioRunner {
    reporter: ProgressReporter,
}

impl ScenarioRunner {
    /// Create a runner with output behavior taken from the CLI configuration
    #[must_use]
    pub fn new(config: &CliConfig) -> Self {
        let reporter =
            ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
        Self { reporter }
    }

    /// Run the selected scenarios and write any requested report files
    ///
    /// # Errors
    ///
    /// Fails when nothing matches the filters, the configuration is invalid,
    /// the async runtime cannot start, or a report file cannot be written.
    /// Scenario failures are not an `Err`; they land in the report.
    pub fn run(&mut self, args: &RunArgs) -> CliResult<RunReport> {
        let scenarios = select_scenarios(args.suite, args.filter.as_deref());
        if scenarios.is_empty() {
            return Err(CliError::invalid_argument(
                "no scenarios match the given suite or filter (try `comprobador list`)",
            ));
        }

        let suite_config = build_suite_config(args)?;
        let options = RunOptions::new()
            .with_fail_fast(args.fail_fast)
            .with_include_skipped(args.include_skipped)
            .with_budget(Duration::from_millis(args.timeout))
            .with_artifact_dir(args.artifacts.clone());
        debug!(
            scenarios = scenarios.len(),
            base_url = %suite_config.base_url,
            browser = %suite_config.browser,
            "starting run"
        );

        self.reporter.header(&format!(
            "Running {} scenarios against {}",
            scenarios.len(),
            suite_config.base_url
        ));
        self.reporter
            .start_progress(scenarios.len() as u64, "starting");

        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| CliError::suite_execution(format!("cannot start async runtime: {e}")))?;

        let started = Instant::now();
        let reporter = &self.reporter;
        let report = runtime.block_on(run_all(
            &scenarios,
            &suite_config,
            &options,
            |scenario, outcome| {
                reporter.set_message(&scenario.id.to_string());
                match outcome.status {
                    ScenarioStatus::Passed => reporter.success(&format!(
                        "{} ({}ms)",
                        outcome.name,
                        outcome.duration.as_millis()
                    )),
                    ScenarioStatus::Failed => reporter.failure(&format!(
                        "{}: {}",
                        outcome.name,
                        outcome.error.as_deref().unwrap_or("failed")
                    )),
                    ScenarioStatus::Skipped => reporter.skipped(&outcome.name),
                }
                reporter.increment(1);
            },
        ));
        self.reporter.finish();

        self.reporter.summary(
            report.passed_count(),
            report.failed_count(),
            report.skipped_count(),
            started.elapsed(),
        );

        if let Some(path) = &args.report {
            report
                .write_json(path)
                .map_err(|e| CliError::report_generation(e.to_string()))?;
            self.reporter.info(&format!("JSON report: {}", path.display()));
        }
        if let Some(path) = &args.junit {
            report
                .write_junit(path)
                .map_err(|e| CliError::report_generation(e.to_string()))?;
            self.reporter.info(&format!("JUnit report: {}", path.display()));
        }

        // Console output goes to stderr, so stdout stays clean JSON.
        if args.format == OutputFormat::Json {
            let json = report
                .render_json()
                .map_err(|e| CliError::report_generation(e.to_string()))?;
            println!("{json}");
        }

        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::Parser;

    fn run_args(argv: &[&str]) -> RunArgs {
        let mut full = vec!["run"];
        full.extend_from_slice(argv);
        RunArgs::try_parse_from(full).unwrap()
    }

    mod selection_tests {
        use super::*;

        #[test]
        fn test_no_filters_selects_everything() {
            assert_eq!(select_scenarios(None, None).len(), registry().len());
        }

        #[test]
        fn test_suite_filter_narrows() {
            let selected = select_scenarios(Some(Suite::Checkout), None);
            assert!(!selected.is_empty());
            assert!(selected.iter().all(|s| s.id.suite == Suite::Checkout));
        }

        #[test]
        fn test_name_filter_narrows_to_one() {
            let selected = select_scenarios(None, Some("cart::lifecycle"));
            assert_eq!(selected.len(), 1);
        }

        #[test]
        fn test_disjoint_filters_select_nothing() {
            let selected = select_scenarios(Some(Suite::Search), Some("lifecycle"));
            assert!(selected.is_empty());
        }
    }

    mod config_tests {
        use super::*;
        use comprobar::{BrowserKind, Viewport};
        use std::path::PathBuf;

        #[test]
        fn test_defaults_pass_through() {
            let config = build_suite_config(&run_args(&[])).unwrap();
            assert!(config.headless);
        }

        #[test]
        fn test_cli_flags_override() {
            let args = run_args(&[
                "--base-url",
                "http://localhost:8080/shop",
                "--browser",
                "edge",
                "--viewport",
                "tablet",
                "--executable",
                "/opt/edge/msedge",
                "--headed",
            ]);
            let config = build_suite_config(&args).unwrap();
            assert_eq!(config.base_url, "http://localhost:8080/shop/");
            assert_eq!(config.browser, BrowserKind::Edge);
            assert_eq!(config.viewport, Viewport::TABLET);
            assert_eq!(config.executable, Some(PathBuf::from("/opt/edge/msedge")));
            assert!(!config.headless);
        }
    }

    mod runner_tests {
        use super::*;
        use crate::config::CliConfig;

        #[test]
        fn test_empty_selection_is_an_argument_error() {
            let args = run_args(&["--suite", "search", "--filter", "lifecycle"]);
            let error = ScenarioRunner::new(&CliConfig::new()).run(&args).unwrap_err();
            assert!(error.to_string().contains("no scenarios match"));
        }
    }
}
