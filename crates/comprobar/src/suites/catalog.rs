//! Catalog suite: category listings, the browse-into-product round trip,
//! and product detail content.

use super::ensure;
use crate::data::{DESKTOPS_CATEGORY_PATH, MACBOOK_NAME, MACBOOK_PRODUCT_ID};
use crate::page::{CategoryPage, HomePage, ProductPage};
use crate::scenario::{Scenario, ScenarioFuture, Suite};
use crate::session::Session;

// Menu wording for the anchor category
const DESKTOPS_MENU: &str = "Desktops";
const DESKTOPS_SHOW_ALL: &str = "Show All Desktops";

pub(super) fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            Suite::Catalog,
            "category_lists_products",
            "Desktops category lists at least one product",
            category_lists_products,
        ),
        Scenario::new(
            Suite::Catalog,
            "browse_and_return",
            "Menu into a product and back lands on the same listing",
            browse_and_return,
        ),
        Scenario::new(
            Suite::Catalog,
            "product_availability_shown",
            "Product detail states its availability",
            product_availability_shown,
        ),
    ]
}

fn category_lists_products(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let category = CategoryPage::new(session);
        category.open(DESKTOPS_CATEGORY_PATH).await?;
        category.wait_products_at_least(1).await?;
        Ok(())
    })
}

fn browse_and_return(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let home = HomePage::new(session);
        home.open().await?;
        home.open_category_via_menu(DESKTOPS_MENU, DESKTOPS_SHOW_ALL)
            .await?;

        let category = CategoryPage::new(session);
        category.wait_products_at_least(1).await?;
        category.open_first_product().await?;
        category.back_to_listing().await?;
        Ok(())
    })
}

fn product_availability_shown(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let product = ProductPage::new(session);
        product.open(MACBOOK_PRODUCT_ID).await?;
        let name = product.name().await?;
        ensure(
            name.contains(MACBOOK_NAME),
            format!("product heading {name:?} does not name {MACBOOK_NAME}"),
        )?;
        let availability = product.wait_availability().await?;
        ensure(
            !availability.trim().is_empty(),
            "availability row rendered without text",
        )
    })
}
