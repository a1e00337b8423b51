//! Scenario registry types and the sequential runner.
//!
//! A [`Scenario`] pairs a qualified identifier with an async body that drives
//! one journey through the storefront. The runner launches a fresh
//! [`Session`] per scenario so no cart state or cookie leaks between runs,
//! enforces a wall-clock budget, captures a failure screenshot when an
//! artifact directory is configured, and records a [`ScenarioOutcome`]
//! either way.

use crate::config::{BrowserKind, SuiteConfig};
use crate::report::{RunReport, ScenarioOutcome};
use crate::result::{ComprobarError, ComprobarResult};
use crate::session::Session;
use crate::viewport::Viewport;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Default per-scenario wall-clock budget in milliseconds.
///
/// Generous on purpose: a scenario walks several pages of a shared demo
/// server, and the inner condition waits already bound each step.
pub const DEFAULT_SCENARIO_BUDGET_MS: u64 = 120_000;

// ===== Suites =====

/// Functional grouping of scenarios, used for filtering and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suite {
    /// Storefront layout, responsive behavior, and cross-browser checks.
    Layout,
    /// Product search journeys.
    Search,
    /// Cart manipulation journeys.
    Cart,
    /// Login, registration, and protected-route access.
    Account,
    /// Category browsing.
    Catalog,
    /// Guest checkout entry.
    Checkout,
}

impl Suite {
    /// Every suite, in execution order.
    pub const ALL: [Self; 6] = [
        Self::Layout,
        Self::Search,
        Self::Cart,
        Self::Account,
        Self::Catalog,
        Self::Checkout,
    ];

    /// Lowercase name used in scenario identifiers and CLI filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::Search => "search",
            Self::Cart => "cart",
            Self::Account => "account",
            Self::Catalog => "catalog",
            Self::Checkout => "checkout",
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Suite {
    type Err = ComprobarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "layout" => Ok(Self::Layout),
            "search" => Ok(Self::Search),
            "cart" => Ok(Self::Cart),
            "account" => Ok(Self::Account),
            "catalog" => Ok(Self::Catalog),
            "checkout" => Ok(Self::Checkout),
            other => Err(ComprobarError::InvalidConfig {
                message: format!(
                    "unknown suite '{other}' (expected layout, search, cart, account, catalog or checkout)"
                ),
            }),
        }
    }
}

// ===== Scenario =====

/// Qualified scenario identifier, rendered as `suite::name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioId {
    /// Owning suite.
    pub suite: Suite,
    /// Scenario name, unique within its suite.
    pub name: &'static str,
}

impl ScenarioId {
    /// Build an identifier.
    #[must_use]
    pub const fn new(suite: Suite, name: &'static str) -> Self {
        Self { suite, name }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.suite, self.name)
    }
}

/// Boxing alias for scenario bodies; keeps the registry on plain fn pointers.
pub type ScenarioFuture<'a> = Pin<Box<dyn Future<Output = ComprobarResult<()>> + Send + 'a>>;

/// A scenario body. Borrows the live session for the duration of the run;
/// the effective [`SuiteConfig`] is reachable through the session.
pub type ScenarioFn = for<'a> fn(&'a Session) -> ScenarioFuture<'a>;

/// One registered end-to-end journey.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    /// Qualified identifier.
    pub id: ScenarioId,
    /// One-line description shown by `list`.
    pub summary: &'static str,
    /// Viewport override; `None` runs at the configured default.
    pub viewport: Option<Viewport>,
    /// Browser override; `None` runs on the configured browser.
    pub browser: Option<BrowserKind>,
    /// Skipped unless explicitly included (environment-dependent checks).
    pub skip_by_default: bool,
    /// Async body.
    pub run: ScenarioFn,
}

impl Scenario {
    /// Register a scenario with no overrides.
    #[must_use]
    pub const fn new(
        suite: Suite,
        name: &'static str,
        summary: &'static str,
        run: ScenarioFn,
    ) -> Self {
        Self {
            id: ScenarioId::new(suite, name),
            summary,
            viewport: None,
            browser: None,
            skip_by_default: false,
            run,
        }
    }

    /// Pin the scenario to a specific viewport.
    #[must_use]
    pub const fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Pin the scenario to a specific browser.
    #[must_use]
    pub const fn with_browser(mut self, browser: BrowserKind) -> Self {
        self.browser = Some(browser);
        self
    }

    /// Mark the scenario as skip-by-default.
    #[must_use]
    pub const fn with_skip_by_default(mut self) -> Self {
        self.skip_by_default = true;
        self
    }

    /// Base configuration with this scenario's overrides applied.
    #[must_use]
    pub fn effective_config(&self, base: &SuiteConfig) -> SuiteConfig {
        let mut config = base.clone();
        if let Some(viewport) = self.viewport {
            config = config.with_viewport(viewport);
        }
        if let Some(browser) = self.browser {
            config = config.with_browser(browser);
        }
        config
    }

    /// Whether this scenario passes the given suite and name filters.
    ///
    /// The name filter is a substring match over the qualified identifier,
    /// so `cart`, `lifecycle` and `cart::lifecycle` all select
    /// `cart::lifecycle`.
    #[must_use]
    pub fn matches(&self, suite: Option<Suite>, filter: Option<&str>) -> bool {
        let suite_ok = suite.map_or(true, |s| s == self.id.suite);
        let name_ok = filter.map_or(true, |f| self.id.to_string().contains(f));
        suite_ok && name_ok
    }
}

// ===== Runner =====

/// Runner knobs independent of the storefront configuration.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Stop after the first failure.
    pub fail_fast: bool,
    /// Run scenarios marked skip-by-default instead of recording a skip.
    pub include_skipped: bool,
    /// Directory for failure screenshots; `None` disables capture.
    pub artifact_dir: Option<PathBuf>,
    /// Wall-clock budget for one scenario body.
    pub budget: Duration,
}

impl RunOptions {
    /// Defaults: run everything not skipped, no artifacts, 120s budget.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fail_fast: false,
            include_skipped: false,
            artifact_dir: None,
            budget: Duration::from_millis(DEFAULT_SCENARIO_BUDGET_MS),
        }
    }

    /// Stop after the first failure.
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Also run skip-by-default scenarios.
    #[must_use]
    pub const fn with_include_skipped(mut self, include_skipped: bool) -> Self {
        self.include_skipped = include_skipped;
        self
    }

    /// Override the per-scenario budget.
    #[must_use]
    pub const fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    /// Capture failure screenshots into this directory.
    #[must_use]
    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = Some(dir.into());
        self
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a single scenario against a fresh browser session.
///
/// Always returns an outcome; launch failures, body errors, and budget
/// overruns all land in a `Failed` outcome rather than an `Err`. The skip
/// flag is honored by [`run_all`], not here, so an explicitly invoked
/// scenario always executes.
#[instrument(skip_all, fields(scenario = %scenario.id))]
pub async fn run_one(
    scenario: &Scenario,
    base: &SuiteConfig,
    options: &RunOptions,
) -> ScenarioOutcome {
    let name = scenario.id.to_string();
    let config = scenario.effective_config(base);
    let started = Instant::now();

    let session = match Session::launch(&config).await {
        Ok(session) => session,
        Err(error) => {
            warn!("{name}: session launch failed: {error}");
            return ScenarioOutcome::failed(&name, started.elapsed(), error.to_string());
        }
    };

    let verdict = tokio::time::timeout(options.budget, (scenario.run)(&session)).await;
    let duration = started.elapsed();

    let mut outcome = match verdict {
        Ok(Ok(())) => ScenarioOutcome::passed(&name, duration),
        Ok(Err(error)) => ScenarioOutcome::failed(&name, duration, error.to_string()),
        Err(_) => ScenarioOutcome::failed(
            &name,
            duration,
            format!("scenario exceeded its {}ms budget", options.budget.as_millis()),
        ),
    };

    if outcome.status.is_failed() {
        if let Some(dir) = &options.artifact_dir {
            if let Some(path) = capture_failure_screenshot(&session, dir, scenario.id).await {
                outcome = outcome.with_screenshot(path);
            }
        }
    }

    if let Err(error) = session.close().await {
        debug!("{name}: session close failed: {error}");
    }

    outcome
}

/// Run scenarios in order, recording one outcome each.
///
/// Skip-by-default scenarios record a skip unless `include_skipped` is set.
/// With `fail_fast`, execution stops after the first failure and unreached
/// scenarios are not recorded. `on_outcome` fires after every recorded
/// outcome; the CLI hangs its progress output on it.
pub async fn run_all<F>(
    scenarios: &[Scenario],
    config: &SuiteConfig,
    options: &RunOptions,
    mut on_outcome: F,
) -> RunReport
where
    F: FnMut(&Scenario, &ScenarioOutcome),
{
    let mut report = RunReport::new(suite_label(scenarios));
    for scenario in scenarios {
        let outcome = if scenario.skip_by_default && !options.include_skipped {
            ScenarioOutcome::skipped(scenario.id.to_string())
        } else {
            run_one(scenario, config, options).await
        };
        on_outcome(scenario, &outcome);
        let failed = outcome.status.is_failed();
        report.record(outcome);
        if failed && options.fail_fast {
            break;
        }
    }
    report
}

/// Screenshot the page a failed scenario left behind. Best effort: any
/// error is logged and swallowed so artifact trouble never masks the
/// scenario's own verdict.
async fn capture_failure_screenshot(
    session: &Session,
    dir: &Path,
    id: ScenarioId,
) -> Option<PathBuf> {
    let png = match session.screenshot_png().await {
        Ok(png) => png,
        Err(error) => {
            debug!("{id}: failure screenshot unavailable: {error}");
            return None;
        }
    };
    if let Err(error) = std::fs::create_dir_all(dir) {
        debug!("{id}: cannot create artifact dir: {error}");
        return None;
    }
    let path = dir.join(format!("{}-{}.png", id.suite, id.name));
    match std::fs::write(&path, png) {
        Ok(()) => Some(path),
        Err(error) => {
            debug!("{id}: cannot write screenshot: {error}");
            None
        }
    }
}

fn suite_label(scenarios: &[Scenario]) -> String {
    let Some(first) = scenarios.first() else {
        return "comprobar".to_string();
    };
    if scenarios.iter().all(|s| s.id.suite == first.id.suite) {
        first.id.suite.to_string()
    } else {
        "comprobar".to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn noop(_: &Session) -> ScenarioFuture<'_> {
        Box::pin(async { Ok(()) })
    }

    mod suite_tests {
        use super::*;

        #[test]
        fn names_round_trip() {
            for suite in Suite::ALL {
                assert_eq!(suite.as_str().parse::<Suite>().unwrap(), suite);
            }
        }

        #[test]
        fn parse_is_case_insensitive() {
            assert_eq!("Cart".parse::<Suite>().unwrap(), Suite::Cart);
            assert_eq!(" LAYOUT ".parse::<Suite>().unwrap(), Suite::Layout);
        }

        #[test]
        fn parse_rejects_unknown() {
            let error = "wishlist".parse::<Suite>().unwrap_err();
            assert!(error.to_string().contains("unknown suite 'wishlist'"));
        }
    }

    mod scenario_id_tests {
        use super::*;

        #[test]
        fn display_is_suite_qualified() {
            let id = ScenarioId::new(Suite::Cart, "lifecycle");
            assert_eq!(id.to_string(), "cart::lifecycle");
        }
    }

    mod scenario_tests {
        use super::*;

        #[test]
        fn new_has_no_overrides() {
            let scenario = Scenario::new(Suite::Search, "known_product", "finds a product", noop);
            assert_eq!(scenario.id.to_string(), "search::known_product");
            assert!(scenario.viewport.is_none());
            assert!(scenario.browser.is_none());
            assert!(!scenario.skip_by_default);
        }

        #[test]
        fn effective_config_applies_overrides() {
            let scenario = Scenario::new(Suite::Layout, "responsive_mobile", "", noop)
                .with_viewport(Viewport::MOBILE)
                .with_browser(BrowserKind::Edge);
            let config = scenario.effective_config(&SuiteConfig::new());
            assert_eq!(config.viewport, Viewport::MOBILE);
            assert_eq!(config.browser, BrowserKind::Edge);
        }

        #[test]
        fn effective_config_keeps_base_without_overrides() {
            let scenario = Scenario::new(Suite::Cart, "lifecycle", "", noop);
            let base = SuiteConfig::new().with_viewport(Viewport::TABLET);
            let config = scenario.effective_config(&base);
            assert_eq!(config.viewport, Viewport::TABLET);
        }

        #[test]
        fn matches_by_suite_and_substring() {
            let scenario = Scenario::new(Suite::Cart, "lifecycle", "", noop);
            assert!(scenario.matches(None, None));
            assert!(scenario.matches(Some(Suite::Cart), None));
            assert!(!scenario.matches(Some(Suite::Search), None));
            assert!(scenario.matches(None, Some("life")));
            assert!(scenario.matches(None, Some("cart::life")));
            assert!(!scenario.matches(None, Some("checkout")));
        }
    }

    mod run_options_tests {
        use super::*;

        #[test]
        fn defaults() {
            let options = RunOptions::default();
            assert!(!options.fail_fast);
            assert!(!options.include_skipped);
            assert!(options.artifact_dir.is_none());
            assert_eq!(options.budget, Duration::from_millis(120_000));
        }

        #[test]
        fn builders_set_fields() {
            let options = RunOptions::new()
                .with_fail_fast(true)
                .with_include_skipped(true)
                .with_budget(Duration::from_secs(5))
                .with_artifact_dir("artifacts");
            assert!(options.fail_fast);
            assert!(options.include_skipped);
            assert_eq!(options.artifact_dir, Some(PathBuf::from("artifacts")));
            assert_eq!(options.budget, Duration::from_secs(5));
        }
    }

    // Runner mechanics run against the inert session stand-in, so these
    // tests stay hermetic. With the browser feature on, launching would
    // require a local Chrome.
    #[cfg(not(feature = "browser"))]
    mod runner_tests {
        use super::*;
        use crate::report::ScenarioStatus;

        fn fail(_: &Session) -> ScenarioFuture<'_> {
            Box::pin(async {
                Err(ComprobarError::AssertionFailed {
                    message: "forced failure".to_string(),
                })
            })
        }

        fn slow(_: &Session) -> ScenarioFuture<'_> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_millis(250)).await;
                Ok(())
            })
        }

        #[tokio::test]
        async fn run_one_records_pass() {
            let scenario = Scenario::new(Suite::Cart, "noop", "", noop);
            let outcome = run_one(&scenario, &SuiteConfig::new(), &RunOptions::new()).await;
            assert_eq!(outcome.status, ScenarioStatus::Passed);
            assert_eq!(outcome.name, "cart::noop");
        }

        #[tokio::test]
        async fn run_one_records_failure_message() {
            let scenario = Scenario::new(Suite::Cart, "fails", "", fail);
            let outcome = run_one(&scenario, &SuiteConfig::new(), &RunOptions::new()).await;
            assert_eq!(outcome.status, ScenarioStatus::Failed);
            assert!(outcome.error.unwrap().contains("forced failure"));
        }

        #[tokio::test]
        async fn run_one_enforces_budget() {
            let scenario = Scenario::new(Suite::Cart, "slow", "", slow);
            let options = RunOptions::new().with_budget(Duration::from_millis(20));
            let outcome = run_one(&scenario, &SuiteConfig::new(), &options).await;
            assert_eq!(outcome.status, ScenarioStatus::Failed);
            assert!(outcome.error.unwrap().contains("budget"));
        }

        #[tokio::test]
        async fn run_one_closes_the_session_exactly_once_on_failure() {
            use crate::session::lifecycle_log;
            // Unique base URL keys this test's lifecycle events; the config
            // normalizes it with a trailing slash.
            let base = "http://teardown-on-error.invalid/";
            let config = SuiteConfig::new().with_base_url(base);
            let scenario = Scenario::new(Suite::Cart, "teardown", "", fail);
            let outcome = run_one(&scenario, &config, &RunOptions::new()).await;
            assert_eq!(outcome.status, ScenarioStatus::Failed);
            assert_eq!(lifecycle_log::count(base, "launch"), 1);
            assert_eq!(lifecycle_log::count(base, "close"), 1);
        }

        #[tokio::test]
        async fn run_one_closes_the_session_exactly_once_on_success() {
            use crate::session::lifecycle_log;
            let base = "http://teardown-on-pass.invalid/";
            let config = SuiteConfig::new().with_base_url(base);
            let scenario = Scenario::new(Suite::Cart, "teardown_pass", "", noop);
            let outcome = run_one(&scenario, &config, &RunOptions::new()).await;
            assert_eq!(outcome.status, ScenarioStatus::Passed);
            assert_eq!(lifecycle_log::count(base, "launch"), 1);
            assert_eq!(lifecycle_log::count(base, "close"), 1);
        }

        #[tokio::test]
        async fn run_one_executes_skip_flagged_scenario() {
            let scenario =
                Scenario::new(Suite::Layout, "edge", "", noop).with_skip_by_default();
            let outcome = run_one(&scenario, &SuiteConfig::new(), &RunOptions::new()).await;
            assert_eq!(outcome.status, ScenarioStatus::Passed);
        }

        #[tokio::test]
        async fn run_all_skips_flagged_scenarios_by_default() {
            let scenarios = [
                Scenario::new(Suite::Layout, "always", "", noop),
                Scenario::new(Suite::Layout, "edge_only", "", noop).with_skip_by_default(),
            ];
            let report = run_all(
                &scenarios,
                &SuiteConfig::new(),
                &RunOptions::new(),
                |_, _| {},
            )
            .await;
            assert_eq!(report.passed_count(), 1);
            assert_eq!(report.skipped_count(), 1);
        }

        #[tokio::test]
        async fn run_all_includes_skipped_when_asked() {
            let scenarios =
                [Scenario::new(Suite::Layout, "edge_only", "", noop).with_skip_by_default()];
            let options = RunOptions::new().with_include_skipped(true);
            let report = run_all(&scenarios, &SuiteConfig::new(), &options, |_, _| {}).await;
            assert_eq!(report.passed_count(), 1);
            assert_eq!(report.skipped_count(), 0);
        }

        #[tokio::test]
        async fn run_all_fail_fast_stops_the_line() {
            let scenarios = [
                Scenario::new(Suite::Cart, "first_fails", "", fail),
                Scenario::new(Suite::Cart, "never_runs", "", noop),
            ];
            let options = RunOptions::new().with_fail_fast(true);
            let report = run_all(&scenarios, &SuiteConfig::new(), &options, |_, _| {}).await;
            assert_eq!(report.total_count(), 1);
            assert_eq!(report.failed_count(), 1);
        }

        #[tokio::test]
        async fn run_all_labels_single_suite_runs() {
            let scenarios = [Scenario::new(Suite::Search, "one", "", noop)];
            let report = run_all(
                &scenarios,
                &SuiteConfig::new(),
                &RunOptions::new(),
                |_, _| {},
            )
            .await;
            assert_eq!(report.suite_name, "search");
        }

        #[tokio::test]
        async fn run_all_labels_mixed_runs() {
            let scenarios = [
                Scenario::new(Suite::Search, "one", "", noop),
                Scenario::new(Suite::Cart, "two", "", noop),
            ];
            let report = run_all(
                &scenarios,
                &SuiteConfig::new(),
                &RunOptions::new(),
                |_, _| {},
            )
            .await;
            assert_eq!(report.suite_name, "comprobar");
        }
    }
}
