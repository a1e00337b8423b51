//! Layout suite: responsive rendering, readiness, the load budget, and
//! cross-browser configuration runs.

use std::time::{Duration, Instant};

use super::ensure;
use crate::config::BrowserKind;
use crate::locator::Locator;
use crate::page::{settle_storefront, wait_title_contains, HomePage, PageObject, STOREFRONT_TITLE};
use crate::scenario::{Scenario, ScenarioFuture, Suite};
use crate::session::Session;
use crate::viewport::Viewport;
use crate::wait::WaitOptions;

/// Wall-clock budget for a cold home-page load
const LOAD_BUDGET: Duration = Duration::from_secs(5);

// Audit depths for the accessibility checks. Shallow on purpose: the home
// page's header and first product row are what every visitor sees.
const AUDIT_IMAGE_LIMIT: u64 = 10;
const AUDIT_LINK_LIMIT: u64 = 20;

pub(super) fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            Suite::Layout,
            "responsive_desktop",
            "Header, search and menu render at 1920x1080",
            responsive,
        )
        .with_viewport(Viewport::DESKTOP),
        Scenario::new(
            Suite::Layout,
            "responsive_tablet",
            "Header, search and menu render at 768x1024",
            responsive,
        )
        .with_viewport(Viewport::TABLET),
        Scenario::new(
            Suite::Layout,
            "responsive_mobile",
            "Header and search render at 375x667",
            responsive,
        )
        .with_viewport(Viewport::MOBILE),
        Scenario::new(
            Suite::Layout,
            "responsive_mobile_landscape",
            "Header and search render at 667x375",
            responsive,
        )
        .with_viewport(Viewport::MOBILE_LANDSCAPE),
        Scenario::new(
            Suite::Layout,
            "responsive_large_desktop",
            "Header, search and menu render at 2560x1440",
            responsive,
        )
        .with_viewport(Viewport::LARGE_DESKTOP),
        Scenario::new(
            Suite::Layout,
            "storefront_title",
            "Document title names the storefront",
            storefront_title,
        ),
        Scenario::new(
            Suite::Layout,
            "page_load_budget",
            "Home page becomes usable inside the load budget",
            page_load_budget,
        ),
        Scenario::new(
            Suite::Layout,
            "accessibility_basics",
            "Images, headings and links pass the basic audits",
            accessibility_basics,
        ),
        Scenario::new(
            Suite::Layout,
            "chrome_compatibility",
            "Desktop layout holds on Google Chrome",
            responsive,
        )
        .with_browser(BrowserKind::Chrome)
        .with_viewport(Viewport::DESKTOP),
        Scenario::new(
            Suite::Layout,
            "edge_compatibility",
            "Desktop layout holds on Microsoft Edge",
            responsive,
        )
        .with_browser(BrowserKind::Edge)
        .with_viewport(Viewport::DESKTOP)
        .with_skip_by_default(),
    ]
}

/// Shared body for every viewport and browser variant: the session's own
/// configuration decides which layout to expect.
fn responsive(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let home = HomePage::new(session);
        home.open().await?;
        home.wait_search_visible().await?;
        if session.config().viewport.is_compact() {
            // Theme versions differ on whether the collapsed toggler exists
            // at narrow widths; any count means the header rendered.
            home.nav_toggler_count().await?;
        } else {
            home.wait_menu_visible().await?;
        }
        Ok(())
    })
}

/// The storefront-readiness check: the one place the challenge fallback's
/// reload retry applies.
fn storefront_title(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        session.goto(session.config().home_url()).await?;
        settle_storefront(session).await?;
        wait_title_contains(session, STOREFRONT_TITLE, session.wait_options()).await?;
        Ok(())
    })
}

fn page_load_budget(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let home = HomePage::new(session);
        let started = Instant::now();
        session.goto(session.config().home_url()).await?;
        Locator::new(session, home.ready_selector())
            .with_wait(WaitOptions::new().with_timeout(LOAD_BUDGET))
            .wait_visible()
            .await?;
        let elapsed = started.elapsed();
        ensure(
            elapsed < LOAD_BUDGET,
            format!(
                "home page took {}ms against a {}ms budget",
                elapsed.as_millis(),
                LOAD_BUDGET.as_millis()
            ),
        )
    })
}

fn accessibility_basics(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let home = HomePage::new(session);
        home.open().await?;

        let missing_alt = home.images_missing_alt(AUDIT_IMAGE_LIMIT).await?;
        ensure(
            missing_alt == 0,
            format!("{missing_alt} of the first {AUDIT_IMAGE_LIMIT} images lack an alt attribute"),
        )?;

        let mut headings = 0;
        for level in 1..=3 {
            headings += home.heading_count(level).await?;
        }
        ensure(headings > 0, "no h1-h3 headings on the home page")?;

        let unlabeled = home.links_without_label(AUDIT_LINK_LIMIT).await?;
        ensure(
            unlabeled == 0,
            format!(
                "{unlabeled} of the first {AUDIT_LINK_LIMIT} links carry no accessible label"
            ),
        )
    })
}
