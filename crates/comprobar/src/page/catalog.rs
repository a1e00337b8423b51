//! Category listings and the browse-into-product round trip.

use super::{wait_first_contact, PageObject};
use crate::locator::{Locator, Selector};
use crate::result::ComprobarResult;
use crate::session::Session;

const CONTENT: &str = "#content";
const PRODUCT_TILE: &str = ".product-thumb";
const TILE_LINK: &str = ".product-thumb a";
const PRODUCT_HEADING: &str = "#content h1";
const COMPARE_BUTTON: &str = "button[title='Compare this Product']";
const ANY_BANNER: &str = ".alert";

// Fragment of the storefront's added-to-comparison wording
const COMPARE_BANNER_MARKER: &str = "product comparison";

/// Category listing page
#[derive(Debug)]
pub struct CategoryPage<'a> {
    session: &'a Session,
    tiles: Locator<'a>,
    first_tile_link: Locator<'a>,
    product_heading: Locator<'a>,
    compare_button: Locator<'a>,
}

impl<'a> CategoryPage<'a> {
    /// Bind the category page to a session
    #[must_use]
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            tiles: Locator::new(session, Selector::css(PRODUCT_TILE)),
            first_tile_link: Locator::new(session, Selector::css(TILE_LINK)),
            product_heading: Locator::new(session, Selector::css(PRODUCT_HEADING)),
            compare_button: Locator::new(session, Selector::css(COMPARE_BUTTON)),
        }
    }

    /// Navigate to a category by path and wait until it is usable
    ///
    /// # Errors
    ///
    /// Times out if the listing never renders.
    pub async fn open(&self, path: &str) -> ComprobarResult<()> {
        let url = self.session.config().category_url(path);
        self.session.goto(&url).await?;
        wait_first_contact(self.session).await?;
        self.wait_loaded().await
    }

    /// How many product tiles the listing shows right now
    ///
    /// # Errors
    ///
    /// Fails only if the probe script cannot run.
    pub async fn product_count(&self) -> ComprobarResult<u64> {
        self.tiles.count().await
    }

    /// Wait until at least `minimum` product tiles render, returning the count
    ///
    /// # Errors
    ///
    /// Times out if the listing never reaches `minimum`.
    pub async fn wait_products_at_least(&self, minimum: u64) -> ComprobarResult<u64> {
        self.tiles.wait_count_at_least(minimum).await
    }

    /// Follow the first tile into its product page
    ///
    /// # Errors
    ///
    /// Times out if the tile link or the product page never appear.
    pub async fn open_first_product(&self) -> ComprobarResult<()> {
        self.first_tile_link.click().await?;
        self.product_heading.wait_visible().await
    }

    /// Go back to the listing and wait for the tiles to return
    ///
    /// # Errors
    ///
    /// Times out if the listing never comes back.
    pub async fn back_to_listing(&self) -> ComprobarResult<u64> {
        self.session.back().await?;
        self.tiles.wait_count_at_least(1).await
    }

    /// Send the first tile's product to the comparison list
    ///
    /// # Errors
    ///
    /// Times out if no compare control appears.
    pub async fn compare_first_product(&self) -> ComprobarResult<()> {
        self.compare_button.click().await
    }

    /// Wait for the added-to-comparison confirmation, returning its text
    ///
    /// # Errors
    ///
    /// Times out if the confirmation never appears.
    pub async fn wait_compare_confirmation(&self) -> ComprobarResult<String> {
        Locator::new(self.session, Selector::css(ANY_BANNER))
            .wait_text_contains(COMPARE_BANNER_MARKER)
            .await
    }
}

impl PageObject for CategoryPage<'_> {
    fn page_name(&self) -> &'static str {
        "category"
    }

    fn ready_selector(&self) -> Selector {
        Selector::css(CONTENT)
    }

    fn session(&self) -> &Session {
        self.session
    }
}
