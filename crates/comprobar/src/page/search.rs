//! Search results, reached through the header search box.

use super::{routes, wait_url_contains, PageObject};
use crate::locator::{Locator, Selector};
use crate::result::ComprobarResult;
use crate::session::Session;

const CONTENT: &str = "#content";
const RESULT_TILE: &str = ".product-thumb";

// Wording the storefront shows for a query with no hits
const NO_MATCH_NOTICE: &str = "There is no product that matches the search criteria";

/// Search results page
#[derive(Debug)]
pub struct SearchResultsPage<'a> {
    session: &'a Session,
    tiles: Locator<'a>,
    no_match_notice: Locator<'a>,
}

impl<'a> SearchResultsPage<'a> {
    /// Bind the results page to a session
    #[must_use]
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            tiles: Locator::new(session, Selector::css(RESULT_TILE)),
            no_match_notice: Locator::new(session, Selector::text(NO_MATCH_NOTICE)),
        }
    }

    /// Wait until the browser has landed on the results route
    ///
    /// # Errors
    ///
    /// Times out if the results page never loads.
    pub async fn wait_arrived(&self) -> ComprobarResult<()> {
        let options = self.session.wait_options();
        wait_url_contains(self.session, routes::SEARCH, options).await?;
        self.wait_loaded().await
    }

    /// How many result tiles are rendered right now
    ///
    /// # Errors
    ///
    /// Fails only if the probe script cannot run.
    pub async fn result_count(&self) -> ComprobarResult<u64> {
        self.tiles.count().await
    }

    /// Wait until at least `minimum` result tiles render, returning the count
    ///
    /// # Errors
    ///
    /// Times out if the results never reach `minimum`.
    pub async fn wait_results_at_least(&self, minimum: u64) -> ComprobarResult<u64> {
        self.tiles.wait_count_at_least(minimum).await
    }

    /// Wait until the no-match notice renders
    ///
    /// # Errors
    ///
    /// Times out if the notice never appears.
    pub async fn wait_no_match_notice(&self) -> ComprobarResult<()> {
        self.no_match_notice.wait_visible().await
    }

    /// Wait until a result links to the named product
    ///
    /// # Errors
    ///
    /// Times out if no result carries the name.
    pub async fn wait_result_named(&self, name: &str) -> ComprobarResult<()> {
        Locator::new(self.session, Selector::partial_link_text(name))
            .wait_visible()
            .await
    }
}

impl PageObject for SearchResultsPage<'_> {
    fn page_name(&self) -> &'static str {
        "search results"
    }

    fn ready_selector(&self) -> Selector {
        Selector::css(CONTENT)
    }

    fn session(&self) -> &Session {
        self.session
    }
}
