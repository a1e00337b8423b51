//! The storefront landing page: header chrome, navigation, and search entry.

use super::{wait_first_contact, PageObject, SearchResultsPage};
use crate::locator::{Locator, Selector};
use crate::result::ComprobarResult;
use crate::session::Session;

const LOGO: &str = "#logo";
const SEARCH_BOX: &str = "#search";
const SEARCH_INPUT: &str = "input[name='search']";
const SEARCH_BUTTON: &str = "#search button";
const MENU: &str = "#menu";
const NAV_TOGGLER: &str = ".navbar-toggler";

/// Marker the storefront home page carries in its document title
pub const STOREFRONT_TITLE: &str = "Your Store";

/// Landing page of the storefront
#[derive(Debug)]
pub struct HomePage<'a> {
    session: &'a Session,
    search_box: Locator<'a>,
    search_input: Locator<'a>,
    search_button: Locator<'a>,
    menu: Locator<'a>,
    nav_toggler: Locator<'a>,
}

impl<'a> HomePage<'a> {
    /// Bind the home page to a session
    #[must_use]
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            search_box: Locator::new(session, Selector::css(SEARCH_BOX)),
            search_input: Locator::new(session, Selector::css(SEARCH_INPUT)),
            search_button: Locator::new(session, Selector::css(SEARCH_BUTTON)),
            menu: Locator::new(session, Selector::css(MENU)),
            nav_toggler: Locator::new(session, Selector::css(NAV_TOGGLER)),
        }
    }

    /// Navigate to the storefront root and wait until it is usable
    ///
    /// # Errors
    ///
    /// Times out if the storefront never renders.
    pub async fn open(&self) -> ComprobarResult<()> {
        self.session.goto(self.session.config().home_url()).await?;
        wait_first_contact(self.session).await?;
        self.wait_loaded().await
    }

    /// Submit a search from the header box and land on the results page
    ///
    /// # Errors
    ///
    /// Times out if the search controls or the results page never appear.
    pub async fn search(&self, query: &str) -> ComprobarResult<SearchResultsPage<'a>> {
        self.search_input.fill(query).await?;
        self.search_button.click().await?;
        let results = SearchResultsPage::new(self.session);
        results.wait_arrived().await?;
        Ok(results)
    }

    /// Wait until the header search box renders
    ///
    /// # Errors
    ///
    /// Times out if the search box never appears.
    pub async fn wait_search_visible(&self) -> ComprobarResult<()> {
        self.search_box.wait_visible().await
    }

    /// Wait until the full navigation menu renders
    ///
    /// # Errors
    ///
    /// Times out if the menu never appears.
    pub async fn wait_menu_visible(&self) -> ComprobarResult<()> {
        self.menu.wait_visible().await
    }

    /// How many compact-layout menu togglers the header carries right now.
    ///
    /// Asked as a count because theme versions differ on whether the
    /// toggler exists at narrow widths; the caller treats zero-or-more as
    /// layout-intact.
    ///
    /// # Errors
    ///
    /// Fails only if the probe script cannot run.
    pub async fn nav_toggler_count(&self) -> ComprobarResult<u64> {
        self.nav_toggler.count().await
    }

    /// Open a category listing through the navigation menu.
    ///
    /// Clicks the menu entry by its exact link text, then the "Show All"
    /// link inside the dropdown it opens.
    ///
    /// # Errors
    ///
    /// Times out if either menu link never appears.
    pub async fn open_category_via_menu(
        &self,
        category: &str,
        show_all: &str,
    ) -> ComprobarResult<()> {
        Locator::new(self.session, Selector::link_text(category))
            .click()
            .await?;
        Locator::new(self.session, Selector::link_text(show_all))
            .click()
            .await
    }

    /// How many of the first `limit` images lack an `alt` attribute.
    ///
    /// Blank `alt` values are fine (decorative images); only a missing
    /// attribute counts.
    ///
    /// # Errors
    ///
    /// Fails only if the probe script cannot run.
    pub async fn images_missing_alt(&self, limit: u64) -> ComprobarResult<u64> {
        self.session.eval_u64(alt_audit_js(limit)).await
    }

    /// How many headings of the given level the page carries
    ///
    /// # Errors
    ///
    /// Fails only if the probe script cannot run.
    pub async fn heading_count(&self, level: u8) -> ComprobarResult<u64> {
        self.session
            .eval_u64(format!("document.querySelectorAll('h{level}').length"))
            .await
    }

    /// How many of the first `limit` links carry no accessible label.
    ///
    /// A link counts as labeled when it has text, an `aria-label`, or an
    /// image child with alt text.
    ///
    /// # Errors
    ///
    /// Fails only if the probe script cannot run.
    pub async fn links_without_label(&self, limit: u64) -> ComprobarResult<u64> {
        self.session.eval_u64(link_label_audit_js(limit)).await
    }
}

fn alt_audit_js(limit: u64) -> String {
    format!(
        "Array.from(document.querySelectorAll('img')).slice(0, {limit}).filter(el => \
         !el.hasAttribute('alt')).length"
    )
}

fn link_label_audit_js(limit: u64) -> String {
    format!(
        "Array.from(document.querySelectorAll('a')).slice(0, {limit}).filter(el => \
         el.textContent.trim() === '' && !el.getAttribute('aria-label') && \
         !el.querySelector('img[alt]')).length"
    )
}

impl PageObject for HomePage<'_> {
    fn page_name(&self) -> &'static str {
        "home"
    }

    fn ready_selector(&self) -> Selector {
        Selector::css(LOGO)
    }

    fn session(&self) -> &Session {
        self.session
    }
}
