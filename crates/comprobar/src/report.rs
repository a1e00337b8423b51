//! Run reporting for scenario outcomes.
//!
//! The runner records one [`ScenarioOutcome`] per executed scenario into a
//! [`RunReport`], which renders a console summary line, a JSON report file,
//! and JUnit XML for CI dashboards.

use crate::result::ComprobarResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome status of a single scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    /// Scenario ran to completion.
    Passed,
    /// Scenario returned an error or exceeded its budget.
    Failed,
    /// Scenario was not run (skip-by-default, not explicitly included).
    Skipped,
}

impl ScenarioStatus {
    /// Check if the status is passing.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Check if the status is failing.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// Result of running one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Fully qualified scenario name (`suite::name`).
    pub name: String,
    /// Outcome status.
    pub status: ScenarioStatus,
    /// Wall-clock duration of the scenario body.
    pub duration: Duration,
    /// Error message when failed.
    pub error: Option<String>,
    /// Path of the failure screenshot, when one was captured.
    pub screenshot: Option<PathBuf>,
}

impl ScenarioOutcome {
    /// Create a passing outcome.
    #[must_use]
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: ScenarioStatus::Passed,
            duration,
            error: None,
            screenshot: None,
        }
    }

    /// Create a failing outcome.
    #[must_use]
    pub fn failed(name: impl Into<String>, duration: Duration, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ScenarioStatus::Failed,
            duration,
            error: Some(error.into()),
            screenshot: None,
        }
    }

    /// Create a skipped outcome.
    #[must_use]
    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ScenarioStatus::Skipped,
            duration: Duration::ZERO,
            error: None,
            screenshot: None,
        }
    }

    /// Attach the path of a captured failure screenshot.
    #[must_use]
    pub fn with_screenshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.screenshot = Some(path.into());
        self
    }
}

/// Aggregated outcomes of one runner invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Display name of the run (CLI uses the suite filter or "comprobar").
    pub suite_name: String,
    /// Recorded outcomes, in execution order.
    pub outcomes: Vec<ScenarioOutcome>,
    /// When the run started.
    pub started_at: DateTime<Utc>,
}

impl RunReport {
    /// Create an empty report.
    #[must_use]
    pub fn new(suite_name: impl Into<String>) -> Self {
        Self {
            suite_name: suite_name.into(),
            outcomes: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Record one scenario outcome.
    pub fn record(&mut self, outcome: ScenarioOutcome) {
        self.outcomes.push(outcome);
    }

    /// Count of passed scenarios.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_passed()).count()
    }

    /// Count of failed scenarios.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_failed()).count()
    }

    /// Count of skipped scenarios.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == ScenarioStatus::Skipped)
            .count()
    }

    /// Total number of recorded outcomes.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Pass rate over non-skipped scenarios, 0.0 to 1.0.
    ///
    /// An empty report counts as fully passing.
    #[must_use]
    pub fn pass_rate(&self) -> f64 {
        let considered = self.total_count() - self.skipped_count();
        if considered == 0 {
            return 1.0;
        }
        self.passed_count() as f64 / considered as f64
    }

    /// Whether no scenario failed. Drives the process exit code.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed_count() == 0
    }

    /// Sum of all scenario durations.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.outcomes.iter().map(|o| o.duration).sum()
    }

    /// Recorded outcomes.
    #[must_use]
    pub fn outcomes(&self) -> &[ScenarioOutcome] {
        &self.outcomes
    }

    /// Failing outcomes only.
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status.is_failed())
            .collect()
    }

    /// Generate the one-line run summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}: {}/{} passed ({:.1}%)",
            self.suite_name,
            self.passed_count(),
            self.total_count(),
            self.pass_rate() * 100.0
        )
    }

    /// Render the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_json(&self) -> ComprobarResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON report to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub fn write_json(&self, output_path: &Path) -> ComprobarResult<()> {
        let json = self.render_json()?;
        std::fs::write(output_path, json)?;
        Ok(())
    }

    /// Render JUnit XML content.
    #[must_use]
    pub fn render_junit(&self) -> String {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<testsuite name="{}" tests="{}" failures="{}" skipped="{}" time="{:.3}">"#,
            escape_xml(&self.suite_name),
            self.total_count(),
            self.failed_count(),
            self.skipped_count(),
            self.total_duration().as_secs_f64()
        ));
        xml.push('\n');

        for outcome in &self.outcomes {
            xml.push_str(&format!(
                r#"  <testcase name="{}" time="{:.3}">"#,
                escape_xml(&outcome.name),
                outcome.duration.as_secs_f64()
            ));
            xml.push('\n');

            if let Some(error) = &outcome.error {
                xml.push_str(&format!(
                    r#"    <failure message="{}">{}</failure>"#,
                    escape_xml(error),
                    escape_xml(error)
                ));
                xml.push('\n');
            }

            if outcome.status == ScenarioStatus::Skipped {
                xml.push_str("    <skipped/>\n");
            }

            xml.push_str("  </testcase>\n");
        }

        xml.push_str("</testsuite>\n");
        xml
    }

    /// Write JUnit XML to a file for CI integration.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_junit(&self, output_path: &Path) -> ComprobarResult<()> {
        let xml = self.render_junit();
        std::fs::write(output_path, xml)?;
        Ok(())
    }
}

/// Escape XML special characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod scenario_status_tests {
        use super::*;

        #[test]
        fn status_is_passed() {
            assert!(ScenarioStatus::Passed.is_passed());
            assert!(!ScenarioStatus::Failed.is_passed());
            assert!(!ScenarioStatus::Skipped.is_passed());
        }

        #[test]
        fn status_is_failed() {
            assert!(!ScenarioStatus::Passed.is_failed());
            assert!(ScenarioStatus::Failed.is_failed());
            assert!(!ScenarioStatus::Skipped.is_failed());
        }
    }

    mod scenario_outcome_tests {
        use super::*;

        #[test]
        fn passed_outcome() {
            let outcome = ScenarioOutcome::passed("cart::lifecycle", Duration::from_millis(100));
            assert_eq!(outcome.name, "cart::lifecycle");
            assert_eq!(outcome.status, ScenarioStatus::Passed);
            assert!(outcome.error.is_none());
        }

        #[test]
        fn failed_outcome() {
            let outcome = ScenarioOutcome::failed(
                "search::known_product",
                Duration::from_millis(50),
                "Timed out after 10000ms waiting for search results",
            );
            assert_eq!(outcome.status, ScenarioStatus::Failed);
            assert_eq!(
                outcome.error.as_deref(),
                Some("Timed out after 10000ms waiting for search results")
            );
        }

        #[test]
        fn skipped_outcome_has_zero_duration() {
            let outcome = ScenarioOutcome::skipped("layout::edge_compatibility");
            assert_eq!(outcome.status, ScenarioStatus::Skipped);
            assert_eq!(outcome.duration, Duration::ZERO);
        }

        #[test]
        fn with_screenshot_records_path() {
            let outcome = ScenarioOutcome::failed("cart::lifecycle", Duration::ZERO, "boom")
                .with_screenshot("artifacts/cart-lifecycle.png");
            assert_eq!(
                outcome.screenshot,
                Some(PathBuf::from("artifacts/cart-lifecycle.png"))
            );
        }
    }

    mod run_report_tests {
        use super::*;

        fn sample_report() -> RunReport {
            let mut report = RunReport::new("cart");
            report.record(ScenarioOutcome::passed(
                "cart::quantity_one_accepted",
                Duration::from_millis(1200),
            ));
            report.record(ScenarioOutcome::failed(
                "cart::lifecycle",
                Duration::from_millis(800),
                "Assertion failed: cart line missing",
            ));
            report.record(ScenarioOutcome::skipped("layout::edge_compatibility"));
            report
        }

        #[test]
        fn empty_report_passes() {
            let report = RunReport::new("comprobar");
            assert_eq!(report.total_count(), 0);
            assert!(report.all_passed());
            assert!((report.pass_rate() - 1.0).abs() < f64::EPSILON);
        }

        #[test]
        fn counts_by_status() {
            let report = sample_report();
            assert_eq!(report.total_count(), 3);
            assert_eq!(report.passed_count(), 1);
            assert_eq!(report.failed_count(), 1);
            assert_eq!(report.skipped_count(), 1);
            assert!(!report.all_passed());
        }

        #[test]
        fn pass_rate_ignores_skips() {
            let report = sample_report();
            assert!((report.pass_rate() - 0.5).abs() < f64::EPSILON);
        }

        #[test]
        fn pass_rate_all_skipped_counts_as_passing() {
            let mut report = RunReport::new("comprobar");
            report.record(ScenarioOutcome::skipped("layout::edge_compatibility"));
            assert!((report.pass_rate() - 1.0).abs() < f64::EPSILON);
            assert!(report.all_passed());
        }

        #[test]
        fn summary_format() {
            let report = sample_report();
            assert_eq!(report.summary(), "cart: 1/3 passed (50.0%)");
        }

        #[test]
        fn total_duration_sums_outcomes() {
            let report = sample_report();
            assert_eq!(report.total_duration(), Duration::from_millis(2000));
        }

        #[test]
        fn failures_lists_only_failed() {
            let report = sample_report();
            let failures = report.failures();
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].name, "cart::lifecycle");
        }
    }

    mod render_tests {
        use super::*;

        #[test]
        fn junit_header_and_counts() {
            let mut report = RunReport::new("cart");
            report.record(ScenarioOutcome::passed(
                "cart::quantity_one_accepted",
                Duration::from_millis(1500),
            ));
            report.record(ScenarioOutcome::failed(
                "cart::lifecycle",
                Duration::from_millis(500),
                "boom",
            ));
            let xml = report.render_junit();
            assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
            assert!(xml.contains(
                r#"<testsuite name="cart" tests="2" failures="1" skipped="0" time="2.000">"#
            ));
            assert!(xml.contains(r#"<testcase name="cart::quantity_one_accepted" time="1.500">"#));
            assert!(xml.ends_with("</testsuite>\n"));
        }

        #[test]
        fn junit_escapes_failure_message() {
            let mut report = RunReport::new("search");
            report.record(ScenarioOutcome::failed(
                "search::no_match",
                Duration::ZERO,
                "expected <div> & got nothing",
            ));
            let xml = report.render_junit();
            assert!(xml.contains("expected &lt;div&gt; &amp; got nothing"));
            assert!(!xml.contains("<div> &"));
        }

        #[test]
        fn junit_marks_skipped() {
            let mut report = RunReport::new("layout");
            report.record(ScenarioOutcome::skipped("layout::edge_compatibility"));
            let xml = report.render_junit();
            assert!(xml.contains("<skipped/>"));
        }

        #[test]
        fn json_round_trips() {
            let mut report = RunReport::new("cart");
            report.record(ScenarioOutcome::passed(
                "cart::cookie_clear",
                Duration::from_millis(900),
            ));
            let json = report.render_json().unwrap();
            let parsed: RunReport = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed.suite_name, "cart");
            assert_eq!(parsed.total_count(), 1);
            assert_eq!(parsed.outcomes[0].name, "cart::cookie_clear");
        }
    }

    mod write_tests {
        use super::*;

        #[test]
        fn write_json_creates_readable_report() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("report.json");
            let mut report = RunReport::new("comprobar");
            report.record(ScenarioOutcome::passed(
                "layout::storefront_title",
                Duration::from_millis(400),
            ));
            report.write_json(&path).unwrap();
            let raw = std::fs::read_to_string(&path).unwrap();
            let parsed: RunReport = serde_json::from_str(&raw).unwrap();
            assert!(parsed.all_passed());
        }

        #[test]
        fn write_junit_creates_xml_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("report.xml");
            let report = RunReport::new("comprobar");
            report.write_junit(&path).unwrap();
            let raw = std::fs::read_to_string(&path).unwrap();
            assert!(raw.contains("<testsuite"));
        }
    }
}
