//! Shopping cart contents and line-item edits.

use super::{routes, wait_first_contact, PageObject};
use crate::locator::{Locator, Selector};
use crate::result::ComprobarResult;
use crate::session::Session;

const CONTENT: &str = "#content";
const LINE_QUANTITY: &str = "input[name^='quantity']";
const UPDATE_BUTTON: &str = "button[title='Update']";
const REMOVE_BUTTON: &str = ".btn-danger";
const SUCCESS_BANNER: &str = ".alert-success";
const CHECKOUT_LINK: &str = "Checkout";

// Wording the storefront shows for an empty cart
const EMPTY_MARKER: &str = "Your shopping cart is empty!";
const MODIFIED_BANNER_MARKER: &str = "modified";

/// Shopping cart page
#[derive(Debug)]
pub struct CartPage<'a> {
    session: &'a Session,
    line_quantity: Locator<'a>,
    update_button: Locator<'a>,
    remove_button: Locator<'a>,
    empty_marker: Locator<'a>,
}

impl<'a> CartPage<'a> {
    /// Bind the cart page to a session
    #[must_use]
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            line_quantity: Locator::new(session, Selector::css(LINE_QUANTITY)),
            update_button: Locator::new(session, Selector::css(UPDATE_BUTTON)),
            remove_button: Locator::new(session, Selector::css(REMOVE_BUTTON)),
            empty_marker: Locator::new(session, Selector::text(EMPTY_MARKER)),
        }
    }

    /// Navigate to the cart and wait until it is usable
    ///
    /// # Errors
    ///
    /// Times out if the cart page never renders.
    pub async fn open(&self) -> ComprobarResult<()> {
        self.session.goto_route(routes::CART).await?;
        wait_first_contact(self.session).await?;
        self.wait_loaded().await
    }

    /// Wait until the cart reports itself empty
    ///
    /// # Errors
    ///
    /// Times out if the empty notice never appears.
    pub async fn wait_empty(&self) -> ComprobarResult<()> {
        self.empty_marker.wait_visible().await
    }

    /// Whether the cart reports itself empty right now
    ///
    /// # Errors
    ///
    /// Fails only if the probe script cannot run.
    pub async fn is_empty(&self) -> ComprobarResult<bool> {
        self.empty_marker.is_visible().await
    }

    /// Wait until a cart line links to the named product
    ///
    /// # Errors
    ///
    /// Times out if no line carries the name.
    pub async fn wait_line_named(&self, name: &str) -> ComprobarResult<()> {
        Locator::new(self.session, Selector::partial_link_text(name))
            .wait_visible()
            .await
    }

    /// Replace the first line's quantity field
    ///
    /// # Errors
    ///
    /// Times out if no line quantity field appears.
    pub async fn set_line_quantity(&self, quantity: &str) -> ComprobarResult<()> {
        self.line_quantity.fill(quantity).await
    }

    /// Current value of the first line's quantity field
    ///
    /// # Errors
    ///
    /// Times out if no line quantity field appears.
    pub async fn line_quantity(&self) -> ComprobarResult<String> {
        self.line_quantity.value().await
    }

    /// Apply the edited quantity
    ///
    /// # Errors
    ///
    /// Times out if the update control never appears.
    pub async fn update(&self) -> ComprobarResult<()> {
        self.update_button.click().await
    }

    /// Wait for the cart-modified confirmation, returning the banner text
    ///
    /// # Errors
    ///
    /// Times out if the confirmation never appears.
    pub async fn wait_modified_confirmation(&self) -> ComprobarResult<String> {
        Locator::new(self.session, Selector::css(SUCCESS_BANNER))
            .wait_text_contains(MODIFIED_BANNER_MARKER)
            .await
    }

    /// Remove the first line from the cart
    ///
    /// # Errors
    ///
    /// Times out if the remove control never appears.
    pub async fn remove_first_line(&self) -> ComprobarResult<()> {
        self.remove_button.click().await
    }

    /// Follow the Checkout link out of the cart
    ///
    /// # Errors
    ///
    /// Times out if the link never appears.
    pub async fn proceed_to_checkout(&self) -> ComprobarResult<()> {
        Locator::new(self.session, Selector::link_text(CHECKOUT_LINK))
            .click()
            .await
    }
}

impl PageObject for CartPage<'_> {
    fn page_name(&self) -> &'static str {
        "cart"
    }

    fn ready_selector(&self) -> Selector {
        Selector::css(CONTENT)
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
    fn test_empty_marker_matches_storefront_wording() {
        assert_eq!(EMPTY_MARKER, "Your shopping cart is empty!");
    }

    #[test]
    fn test_line_quantity_matches_indexed_field_names() {
        // Cart rows post quantities as quantity[<cart id>], so the prefix
        // match is what keeps this stable across rows.
        assert!(LINE_QUANTITY.contains("^="));
    }
}
