//! Checkout suite: guest entry into checkout and the contact-form
//! partitions. Neither scenario submits anything to the shared demo.

use super::ensure;
use crate::data::{unique_email, ContactForm, MACBOOK_PRODUCT_ID, MALFORMED_EMAIL};
use crate::page::{CartPage, CheckoutPage, ContactPage, ProductPage};
use crate::scenario::{Scenario, ScenarioFuture, Suite};
use crate::session::Session;

pub(super) fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            Suite::Checkout,
            "guest_reaches_checkout",
            "A full cart reaches checkout without an account",
            guest_reaches_checkout,
        ),
        Scenario::new(
            Suite::Checkout,
            "contact_form_partitions",
            "Contact form holds invalid and valid emails without submitting",
            contact_form_partitions,
        ),
    ]
}

fn guest_reaches_checkout(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let product = ProductPage::new(session);
        product.open(MACBOOK_PRODUCT_ID).await?;
        product.set_quantity("1").await?;
        product.add_to_cart().await?;
        product.wait_cart_confirmation().await?;

        let cart = CartPage::new(session);
        cart.open().await?;
        cart.proceed_to_checkout().await?;

        let checkout = CheckoutPage::new(session);
        checkout.wait_arrived().await?;

        // Guest checkout can be disabled server-side; reaching the options
        // step is the assertion, picking guest is opportunistic.
        if checkout.guest_option_count().await? > 0 {
            checkout.choose_guest().await?;
        }
        Ok(())
    })
}

fn contact_form_partitions(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let contact = ContactPage::new(session);
        contact.open().await?;

        let form = ContactForm::valid().with_email(MALFORMED_EMAIL);
        contact.fill(&form).await?;
        let held = contact.email_value().await?;
        ensure(
            held == MALFORMED_EMAIL,
            format!("email field held {held:?} after typing the malformed address"),
        )?;
        let enquiry = contact.enquiry_value().await?;
        ensure(
            enquiry == form.enquiry,
            "enquiry field did not hold the typed text",
        )?;

        let valid = unique_email();
        contact.set_email(&valid).await?;
        let held = contact.email_value().await?;
        ensure(
            held == valid,
            format!("email field held {held:?} after typing a valid address"),
        )
    })
}
