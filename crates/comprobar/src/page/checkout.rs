//! Checkout entry, up to the guest option step.
//!
//! Scenarios stop at the checkout options. Nothing here places an order, so
//! the shared demo never accumulates test orders.

use super::{routes, wait_url_contains, PageObject};
use crate::locator::{Locator, Selector};
use crate::result::ComprobarResult;
use crate::session::Session;

const CONTENT: &str = "#content";
const GUEST_RADIO: &str = "input[value='guest']";

/// Checkout page, reached through the cart's Checkout link.
///
/// The storefront bounces an empty-cart checkout back to the cart, so
/// callers put something in the cart before coming here.
#[derive(Debug)]
pub struct CheckoutPage<'a> {
    session: &'a Session,
    guest_radio: Locator<'a>,
}

impl<'a> CheckoutPage<'a> {
    /// Bind the checkout page to a session
    #[must_use]
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            guest_radio: Locator::new(session, Selector::css(GUEST_RADIO)),
        }
    }

    /// Wait until the browser has landed on the checkout route
    ///
    /// # Errors
    ///
    /// Times out if the checkout never loads.
    pub async fn wait_arrived(&self) -> ComprobarResult<()> {
        let options = self.session.wait_options();
        wait_url_contains(self.session, routes::CHECKOUT, options).await?;
        self.wait_loaded().await
    }

    /// How many guest-checkout options the page offers right now.
    ///
    /// Asked as a count because a storefront configured without guest
    /// checkout renders none; the caller branches instead of failing.
    ///
    /// # Errors
    ///
    /// Fails only if the probe script cannot run.
    pub async fn guest_option_count(&self) -> ComprobarResult<u64> {
        self.guest_radio.count().await
    }

    /// Pick the guest checkout option
    ///
    /// # Errors
    ///
    /// Times out if the option never becomes clickable.
    pub async fn choose_guest(&self) -> ComprobarResult<()> {
        self.guest_radio.wait_clickable().await?;
        self.guest_radio.click().await
    }
}

impl PageObject for CheckoutPage<'_> {
    fn page_name(&self) -> &'static str {
        "checkout"
    }

    fn ready_selector(&self) -> Selector {
        Selector::css(CONTENT)
    }

    fn session(&self) -> &Session {
        self.session
    }
}
