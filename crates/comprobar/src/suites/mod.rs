//! The scenario registry: every journey the suite knows how to run.
//!
//! Bodies live in one module per suite and are registered here in execution
//! order. Each body borrows the fresh session the runner hands it and states
//! its steps through the page objects in [`crate::page`]; no selector or
//! storefront wording appears at this level.

mod account;
mod cart;
mod catalog;
mod checkout;
mod layout;
mod search;

use crate::result::{ComprobarError, ComprobarResult};
use crate::scenario::Scenario;

/// Every registered scenario, grouped by suite in execution order.
#[must_use]
pub fn registry() -> Vec<Scenario> {
    let mut scenarios = Vec::new();
    scenarios.extend(layout::scenarios());
    scenarios.extend(search::scenarios());
    scenarios.extend(cart::scenarios());
    scenarios.extend(account::scenarios());
    scenarios.extend(catalog::scenarios());
    scenarios.extend(checkout::scenarios());
    scenarios
}

/// Fail the scenario with `message` unless `condition` holds.
fn ensure(condition: bool, message: impl Into<String>) -> ComprobarResult<()> {
    if condition {
        Ok(())
    } else {
        Err(ComprobarError::AssertionFailed {
            message: message.into(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::BrowserKind;
    use crate::scenario::Suite;
    use crate::viewport::Viewport;
    use std::collections::HashSet;

    #[test]
    fn test_registry_covers_every_suite() {
        let scenarios = registry();
        for suite in Suite::ALL {
            assert!(
                scenarios.iter().any(|s| s.id.suite == suite),
                "no scenarios registered for suite {suite}"
            );
        }
    }

    #[test]
    fn test_registry_size_per_suite() {
        let scenarios = registry();
        let count = |suite| scenarios.iter().filter(|s| s.id.suite == suite).count();
        assert_eq!(count(Suite::Layout), 10);
        assert_eq!(count(Suite::Search), 4);
        assert_eq!(count(Suite::Cart), 5);
        assert_eq!(count(Suite::Account), 5);
        assert_eq!(count(Suite::Catalog), 3);
        assert_eq!(count(Suite::Checkout), 2);
        assert_eq!(scenarios.len(), 29);
    }

    #[test]
    fn test_identifiers_are_unique() {
        let scenarios = registry();
        let mut seen = HashSet::new();
        for scenario in &scenarios {
            assert!(
                seen.insert(scenario.id.to_string()),
                "duplicate scenario id {}",
                scenario.id
            );
        }
    }

    #[test]
    fn test_registry_is_grouped_by_suite_order() {
        let scenarios = registry();
        let position =
            |suite| Suite::ALL.iter().position(|s| *s == suite).unwrap();
        let positions: Vec<_> = scenarios.iter().map(|s| position(s.id.suite)).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_every_scenario_has_a_summary() {
        for scenario in registry() {
            assert!(!scenario.summary.is_empty(), "{} has no summary", scenario.id);
        }
    }

    #[test]
    fn test_responsive_scenarios_pin_their_viewports() {
        let scenarios = registry();
        let viewport_of = |name: &str| {
            scenarios
                .iter()
                .find(|s| s.id.name == name)
                .unwrap()
                .viewport
                .unwrap()
        };
        assert_eq!(viewport_of("responsive_desktop"), Viewport::DESKTOP);
        assert_eq!(viewport_of("responsive_tablet"), Viewport::TABLET);
        assert_eq!(viewport_of("responsive_mobile"), Viewport::MOBILE);
        assert_eq!(
            viewport_of("responsive_mobile_landscape"),
            Viewport::MOBILE_LANDSCAPE
        );
        assert_eq!(viewport_of("responsive_large_desktop"), Viewport::LARGE_DESKTOP);
    }

    #[test]
    fn test_cross_browser_scenarios_pin_their_browsers() {
        let scenarios = registry();
        let browser_of = |name: &str| {
            scenarios
                .iter()
                .find(|s| s.id.name == name)
                .unwrap()
                .browser
                .unwrap()
        };
        assert_eq!(browser_of("chrome_compatibility"), BrowserKind::Chrome);
        assert_eq!(browser_of("edge_compatibility"), BrowserKind::Edge);
    }

    #[test]
    fn test_only_edge_is_skipped_by_default() {
        let skipped: Vec<_> = registry()
            .into_iter()
            .filter(|s| s.skip_by_default)
            .map(|s| s.id.to_string())
            .collect();
        assert_eq!(skipped, ["layout::edge_compatibility"]);
    }

    #[test]
    fn test_ensure_reports_the_message() {
        assert!(ensure(true, "fine").is_ok());
        let error = ensure(false, "cart stayed full").unwrap_err();
        assert!(error.to_string().contains("cart stayed full"));
    }
}
