//! Cart suite: quantity partitions and the full add-edit-remove lifecycle.

use std::time::Duration;

use super::ensure;
use crate::data::{MACBOOK_NAME, MACBOOK_PRODUCT_ID, QUANTITY_ACCEPTED, QUANTITY_REJECTED};
use crate::page::{CartPage, ProductPage};
use crate::result::ComprobarResult;
use crate::scenario::{Scenario, ScenarioFuture, Suite};
use crate::session::Session;

/// How long a rejected quantity is given to (not) produce a confirmation
const REJECTION_WINDOW: Duration = Duration::from_secs(4);

pub(super) fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            Suite::Cart,
            "quantity_zero_rejected",
            "Quantity 0 adds nothing to the cart",
            quantity_zero_rejected,
        ),
        Scenario::new(
            Suite::Cart,
            "quantity_one_accepted",
            "Quantity 1 is confirmed into the cart",
            quantity_one_accepted,
        ),
        Scenario::new(
            Suite::Cart,
            "negative_quantity_rejected",
            "Negative quantity adds nothing to the cart",
            negative_quantity_rejected,
        ),
        Scenario::new(
            Suite::Cart,
            "lifecycle",
            "Add, edit, and remove walk the cart back to empty",
            lifecycle,
        ),
        Scenario::new(
            Suite::Cart,
            "cookie_clear_empties_cart",
            "Clearing cookies abandons the cart",
            cookie_clear_empties_cart,
        ),
    ]
}

/// Open the anchor product and submit an add-to-cart with this quantity.
async fn add_anchor_product<'a>(
    session: &'a Session,
    quantity: &str,
) -> ComprobarResult<ProductPage<'a>> {
    let product = ProductPage::new(session);
    product.open(MACBOOK_PRODUCT_ID).await?;
    product.set_quantity(quantity).await?;
    product.add_to_cart().await?;
    Ok(product)
}

/// Shared body for the rejected partition: submit the quantity, then hold
/// the page open long enough to see that no confirmation appears.
async fn reject_quantity(session: &Session, quantity: &str) -> ComprobarResult<()> {
    let product = add_anchor_product(session, quantity).await?;
    product.expect_no_cart_confirmation(REJECTION_WINDOW).await
}

fn quantity_zero_rejected(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(reject_quantity(session, QUANTITY_REJECTED[0]))
}

fn quantity_one_accepted(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let product = add_anchor_product(session, QUANTITY_ACCEPTED[0]).await?;
        product.wait_cart_confirmation().await?;
        Ok(())
    })
}

fn negative_quantity_rejected(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(reject_quantity(session, QUANTITY_REJECTED[1]))
}

fn lifecycle(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let product = add_anchor_product(session, QUANTITY_ACCEPTED[0]).await?;
        product.wait_cart_confirmation().await?;

        let cart = CartPage::new(session);
        cart.open().await?;
        cart.wait_line_named(MACBOOK_NAME).await?;
        ensure(!cart.is_empty().await?, "cart reads empty after an add")?;

        let raised = QUANTITY_ACCEPTED[1];
        cart.set_line_quantity(raised).await?;
        cart.update().await?;
        cart.wait_modified_confirmation().await?;
        let held = cart.line_quantity().await?;
        ensure(
            held == raised,
            format!("cart line holds quantity {held:?} after updating to {raised}"),
        )?;

        cart.remove_first_line().await?;
        cart.wait_empty().await
    })
}

fn cookie_clear_empties_cart(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let product = add_anchor_product(session, QUANTITY_ACCEPTED[0]).await?;
        product.wait_cart_confirmation().await?;

        session.clear_cookies().await?;

        let cart = CartPage::new(session);
        cart.open().await?;
        cart.wait_empty().await
    })
}
