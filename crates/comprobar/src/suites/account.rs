//! Account suite: credential rejection, protected routes, registration
//! field boundaries, and the logged-out wish-list and compare paths.

use super::ensure;
use crate::data::{
    boundary_name, RegistrationForm, DESKTOPS_CATEGORY_PATH, MACBOOK_PRODUCT_ID, NAME_FIELD_MAX,
    VALID_PASSWORD, WRONG_EMAIL, WRONG_PASSWORD,
};
use crate::page::{
    routes, wait_url_contains, CategoryPage, LoginPage, PageObject, ProductPage, RegisterPage,
};
use crate::result::ComprobarResult;
use crate::scenario::{Scenario, ScenarioFuture, Suite};
use crate::session::Session;

pub(super) fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            Suite::Account,
            "login_rejects_bad_credentials",
            "Unknown credentials are rejected on the login page",
            login_rejects_bad_credentials,
        ),
        Scenario::new(
            Suite::Account,
            "protected_route_redirects",
            "Logged-out account dashboard lands on the login form",
            protected_route_redirects,
        ),
        Scenario::new(
            Suite::Account,
            "registration_name_boundaries",
            "Registration fields hold boundary-length values without submitting",
            registration_name_boundaries,
        ),
        Scenario::new(
            Suite::Account,
            "wishlist_requires_login",
            "Logged-out wish-list click prompts for login",
            wishlist_requires_login,
        ),
        Scenario::new(
            Suite::Account,
            "compare_shows_confirmation",
            "Compare from a listing confirms without an account",
            compare_shows_confirmation,
        ),
    ]
}

fn login_rejects_bad_credentials(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let login = LoginPage::new(session);
        login.open().await?;
        login.login(WRONG_EMAIL, WRONG_PASSWORD).await?;
        login.wait_rejection().await?;
        wait_url_contains(session, routes::LOGIN, session.wait_options()).await?;
        Ok(())
    })
}

fn protected_route_redirects(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        session.goto_route(routes::ACCOUNT).await?;
        wait_url_contains(session, routes::LOGIN, session.wait_options()).await?;
        LoginPage::new(session).wait_loaded().await
    })
}

/// Fill a field, read it back, and fail unless the value survived.
async fn round_trip<F, R>(fill: F, read: R, value: &str, field: &str) -> ComprobarResult<()>
where
    F: std::future::Future<Output = ComprobarResult<()>>,
    R: std::future::Future<Output = ComprobarResult<String>>,
{
    fill.await?;
    let held = read.await?;
    ensure(
        held == value,
        format!("{field} held {:?} after typing {} chars", held, value.len()),
    )
}

fn registration_name_boundaries(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let register = RegisterPage::new(session);
        register.open().await?;

        // Populate the form the way a registering visitor would; the
        // boundary loops below then rewrite individual fields in place.
        let identity = RegistrationForm::unique();
        register.fill_identity(&identity).await?;
        let held = register.first_name_value().await?;
        ensure(
            held == identity.first_name,
            format!("first name held {held:?} after filling the form"),
        )?;

        // Name lengths at and around the field maximum. The form is never
        // submitted, so no account lands on the shared demo.
        for len in [1, NAME_FIELD_MAX, NAME_FIELD_MAX + 1] {
            let name = boundary_name(len);
            round_trip(
                register.set_first_name(&name),
                register.first_name_value(),
                &name,
                "first name",
            )
            .await?;
        }

        for password in ["abc", VALID_PASSWORD] {
            round_trip(
                register.set_password(password),
                register.password_value(),
                password,
                "password",
            )
            .await?;
        }
        Ok(())
    })
}

fn wishlist_requires_login(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let product = ProductPage::new(session);
        product.open(MACBOOK_PRODUCT_ID).await?;
        product.add_to_wishlist().await?;
        product.wait_login_prompt().await?;
        Ok(())
    })
}

fn compare_shows_confirmation(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let category = CategoryPage::new(session);
        category.open(DESKTOPS_CATEGORY_PATH).await?;
        category.wait_products_at_least(1).await?;
        category.compare_first_product().await?;
        category.wait_compare_confirmation().await?;
        Ok(())
    })
}
