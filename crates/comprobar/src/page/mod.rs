//! Page objects for the demo storefront.
//!
//! Each page owns its selectors as private constants, so scenarios state
//! intent (`home.search("MacBook")`) and never touch markup. When the
//! storefront's markup shifts, the fix is one constant in one file.
//!
//! Every `open` settles first contact through [`wait_first_contact`], because
//! the demo host occasionally serves a transient challenge page before the
//! real storefront on a fresh profile. That wait is patient but fails hard;
//! the one reload-and-rewait retry lives in [`settle_storefront`], which
//! only the storefront-readiness check uses.

use std::time::Duration;

use crate::locator::{Locator, Selector};
use crate::result::ComprobarResult;
use crate::session::Session;
use crate::wait::{await_condition, WaitOptions};

mod account;
mod cart;
mod catalog;
mod checkout;
mod contact;
mod home;
mod product;
mod search;

pub use account::{LoginPage, RegisterPage};
pub use cart::CartPage;
pub use catalog::CategoryPage;
pub use checkout::CheckoutPage;
pub use contact::ContactPage;
pub use home::{HomePage, STOREFRONT_TITLE};
pub use product::ProductPage;
pub use search::SearchResultsPage;

/// Storefront routes, as they appear after `index.php?route=`
pub mod routes {
    /// Customer login form
    pub const LOGIN: &str = "account/login";
    /// Account registration form
    pub const REGISTER: &str = "account/register";
    /// Account dashboard, reachable only when logged in
    pub const ACCOUNT: &str = "account/account";
    /// Wish list, reachable only when logged in
    pub const WISHLIST: &str = "account/wishlist";
    /// Shopping cart contents
    pub const CART: &str = "checkout/cart";
    /// Checkout flow
    pub const CHECKOUT: &str = "checkout/checkout";
    /// Search results
    pub const SEARCH: &str = "product/search";
    /// Contact / enquiry form
    pub const CONTACT: &str = "information/contact";
}

// Header element present on every storefront page and absent from the
// challenge interstitial.
const STOREFRONT_HEADER: &str = "#logo";

// First-contact budgets: the interstitial usually resolves on its own well
// inside a minute; the post-reload re-wait gets half that.
const FIRST_CONTACT_TIMEOUT: Duration = Duration::from_secs(60);
const CHALLENGE_RETRY_TIMEOUT: Duration = Duration::from_secs(30);

/// A storefront page bound to a live session.
///
/// The ready selector is the one element that is visible exactly when the
/// page is usable; `wait_loaded` is what every `open` settles on.
#[allow(async_fn_in_trait)]
pub trait PageObject {
    /// Name for wait descriptions and failure messages
    fn page_name(&self) -> &'static str;

    /// Selector that is visible exactly when the page is usable
    fn ready_selector(&self) -> Selector;

    /// Session driving this page
    fn session(&self) -> &Session;

    /// Whether the ready marker is rendered right now
    ///
    /// # Errors
    ///
    /// Fails only if the probe script cannot run.
    async fn is_loaded(&self) -> ComprobarResult<bool> {
        Locator::new(self.session(), self.ready_selector())
            .is_visible()
            .await
    }

    /// Wait until the ready marker renders
    ///
    /// # Errors
    ///
    /// Times out if the page never becomes usable.
    async fn wait_loaded(&self) -> ComprobarResult<()> {
        Locator::new(self.session(), self.ready_selector())
            .wait_visible()
            .await
    }
}

/// Wait out the demo host's first-contact challenge.
///
/// A fresh profile's first navigation sometimes lands on a transient
/// challenge page that resolves into the storefront on its own. Waits up to
/// a minute for the storefront header, then fails hard; there is no retry
/// here.
///
/// # Errors
///
/// Times out if the storefront never appears.
pub async fn wait_first_contact(session: &Session) -> ComprobarResult<()> {
    let patient = WaitOptions::new().with_timeout(FIRST_CONTACT_TIMEOUT);
    Locator::new(session, Selector::css(STOREFRONT_HEADER))
        .with_wait(patient)
        .wait_visible()
        .await
}

/// Storefront readiness, with the single sanctioned reload retry.
///
/// When first contact times out, reloads the page once and re-waits before
/// giving up. Only the storefront-readiness check goes through here; every
/// other navigation fails on its first timeout.
///
/// # Errors
///
/// Times out if the storefront never appears, even after the reload.
pub async fn settle_storefront(session: &Session) -> ComprobarResult<()> {
    if wait_first_contact(session).await.is_err() {
        session.reload().await?;
        let retry = WaitOptions::new().with_timeout(CHALLENGE_RETRY_TIMEOUT);
        Locator::new(session, Selector::css(STOREFRONT_HEADER))
            .with_wait(retry)
            .wait_visible()
            .await?;
    }
    Ok(())
}

/// Wait until the document title contains `needle`, returning the title.
///
/// # Errors
///
/// Times out if the title never carries the needle.
pub async fn wait_title_contains(
    session: &Session,
    needle: &str,
    options: WaitOptions,
) -> ComprobarResult<String> {
    await_condition(
        &format!("page title to contain \"{needle}\""),
        options,
        || {
            let probe = session.title();
            async move {
                let title = probe.await?;
                Ok(title.contains(needle).then_some(title))
            }
        },
    )
    .await
}

/// Wait until the page URL contains `needle`, returning the URL.
///
/// # Errors
///
/// Times out if the URL never carries the needle.
pub async fn wait_url_contains(
    session: &Session,
    needle: &str,
    options: WaitOptions,
) -> ComprobarResult<String> {
    await_condition(
        &format!("page URL to contain \"{needle}\""),
        options,
        || {
            let probe = session.current_url();
            async move {
                let url = probe.await?;
                Ok(url.contains(needle).then_some(url))
            }
        },
    )
    .await
}
