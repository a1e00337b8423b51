//! A single product's page: quantity, cart, and wish-list actions.

use std::time::Duration;

use super::{wait_first_contact, PageObject};
use crate::locator::{Locator, Selector};
use crate::result::{ComprobarError, ComprobarResult};
use crate::session::Session;
use crate::wait::WaitOptions;

const NAME_HEADING: &str = "#content h1";
const QUANTITY_INPUT: &str = "#input-quantity";
const ADD_TO_CART: &str = "#button-cart";
const SUCCESS_BANNER: &str = ".alert-success";
const ANY_BANNER: &str = ".alert";
const WISHLIST_BUTTON: &str = "button[title='Add to Wish List']";
const INFO_ROW: &str = "#content li";

// Fragments of the storefront's confirmation wording
const CART_BANNER_MARKER: &str = "shopping cart";
const LOGIN_PROMPT_MARKER: &str = "login";
const AVAILABILITY_MARKER: &str = "Availability";

/// Product detail page
#[derive(Debug)]
pub struct ProductPage<'a> {
    session: &'a Session,
    name_heading: Locator<'a>,
    quantity_input: Locator<'a>,
    add_to_cart_button: Locator<'a>,
    wishlist_button: Locator<'a>,
}

impl<'a> ProductPage<'a> {
    /// Bind the product page to a session
    #[must_use]
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            name_heading: Locator::new(session, Selector::css(NAME_HEADING)),
            quantity_input: Locator::new(session, Selector::css(QUANTITY_INPUT)),
            add_to_cart_button: Locator::new(session, Selector::css(ADD_TO_CART)),
            wishlist_button: Locator::new(session, Selector::css(WISHLIST_BUTTON)),
        }
    }

    /// Navigate to a product by id and wait until the page is usable
    ///
    /// # Errors
    ///
    /// Times out if the product page never renders.
    pub async fn open(&self, product_id: u32) -> ComprobarResult<()> {
        let url = self.session.config().product_url(product_id);
        self.session.goto(&url).await?;
        wait_first_contact(self.session).await?;
        self.wait_loaded().await
    }

    /// Product name from the page heading
    ///
    /// # Errors
    ///
    /// Times out if the heading never renders.
    pub async fn name(&self) -> ComprobarResult<String> {
        let text = self.name_heading.text().await?;
        Ok(text.trim().to_string())
    }

    /// Replace the quantity field's value
    ///
    /// # Errors
    ///
    /// Times out if the quantity field never appears.
    pub async fn set_quantity(&self, quantity: &str) -> ComprobarResult<()> {
        self.quantity_input.fill(quantity).await
    }

    /// Click the add-to-cart button
    ///
    /// # Errors
    ///
    /// Times out if the button never appears.
    pub async fn add_to_cart(&self) -> ComprobarResult<()> {
        self.add_to_cart_button.click().await
    }

    /// Wait for the added-to-cart confirmation, returning the banner text
    ///
    /// # Errors
    ///
    /// Times out if the confirmation never appears.
    pub async fn wait_cart_confirmation(&self) -> ComprobarResult<String> {
        Locator::new(self.session, Selector::css(SUCCESS_BANNER))
            .wait_text_contains(CART_BANNER_MARKER)
            .await
    }

    /// Watch the banner area for `window` and fail if a cart confirmation
    /// shows up.
    ///
    /// The storefront answers a rejected quantity by simply not confirming,
    /// so the only observable is the banner's absence over a bounded window.
    /// A timeout here is the passing outcome.
    ///
    /// # Errors
    ///
    /// Fails if a success banner appears within the window, or if the
    /// banner probe itself cannot run.
    pub async fn expect_no_cart_confirmation(&self, window: Duration) -> ComprobarResult<()> {
        let options = WaitOptions::new().with_timeout(window);
        let banner = Locator::new(self.session, Selector::css(SUCCESS_BANNER)).with_wait(options);
        match banner.wait_count_at_least(1).await {
            Ok(_) => Err(ComprobarError::AssertionFailed {
                message: "cart confirmation appeared for a quantity the store should reject"
                    .to_string(),
            }),
            Err(ComprobarError::Timeout { .. }) => Ok(()),
            Err(error) => Err(error),
        }
    }

    /// Wait for the availability row, returning its text
    ///
    /// # Errors
    ///
    /// Times out if the product information never lists availability.
    pub async fn wait_availability(&self) -> ComprobarResult<String> {
        Locator::new(
            self.session,
            Selector::css_with_text(INFO_ROW, AVAILABILITY_MARKER),
        )
        .text()
        .await
    }

    /// Click the wish-list button
    ///
    /// # Errors
    ///
    /// Times out if the button never appears.
    pub async fn add_to_wishlist(&self) -> ComprobarResult<()> {
        self.wishlist_button.click().await
    }

    /// Wait for the banner telling an anonymous visitor to log in.
    ///
    /// The storefront answers a logged-out wish-list click with exactly this
    /// banner, so the scenario has a single expectation regardless of how
    /// the visit went.
    ///
    /// # Errors
    ///
    /// Times out if the prompt never appears.
    pub async fn wait_login_prompt(&self) -> ComprobarResult<String> {
        Locator::new(self.session, Selector::css(ANY_BANNER))
            .wait_text_contains(LOGIN_PROMPT_MARKER)
            .await
    }
}

impl PageObject for ProductPage<'_> {
    fn page_name(&self) -> &'static str {
        "product"
    }

    fn ready_selector(&self) -> Selector {
        Selector::css(NAME_HEADING)
    }

    fn session(&self) -> &Session {
        self.session
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_wishlist_button_uses_title_attribute() {
        assert!(WISHLIST_BUTTON.contains("title='Add to Wish List'"));
    }

    #[test]
    fn test_banner_markers_stay_lowercase_fragments() {
        // Matched with contains(), so fragments must not pin sentence case
        // or punctuation.
        assert_eq!(CART_BANNER_MARKER, "shopping cart");
        assert_eq!(LOGIN_PROMPT_MARKER, "login");
    }

    #[test]
    fn test_availability_query_narrows_to_info_rows() {
        let selector = Selector::css_with_text(INFO_ROW, AVAILABILITY_MARKER);
        let query = selector.to_query();
        assert!(query.contains("#content li"));
        assert!(query.contains("Availability"));
    }
}
