//! Search suite: query partitions from empty through boundary-length input.

use super::ensure;
use crate::data::{very_long_query, KNOWN_QUERY, MACBOOK_NAME};
use crate::page::HomePage;
use crate::scenario::{Scenario, ScenarioFuture, Suite};
use crate::session::Session;

pub(super) fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            Suite::Search,
            "empty_query",
            "Empty search still lands on a rendered results page",
            empty_query,
        ),
        Scenario::new(
            Suite::Search,
            "single_character",
            "One-character search lands on a rendered results page",
            single_character,
        ),
        Scenario::new(
            Suite::Search,
            "known_product",
            "Searching a stock product lists it",
            known_product,
        ),
        Scenario::new(
            Suite::Search,
            "very_long_query",
            "Boundary-length search yields an empty, intact results page",
            very_long,
        ),
    ]
}

fn empty_query(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let home = HomePage::new(session);
        home.open().await?;
        // wait_arrived inside search() is the whole assertion: the results
        // route renders rather than erroring out.
        home.search("").await?;
        Ok(())
    })
}

fn single_character(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let home = HomePage::new(session);
        home.open().await?;
        home.search("a").await?;
        Ok(())
    })
}

fn known_product(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let home = HomePage::new(session);
        home.open().await?;
        let results = home.search(KNOWN_QUERY).await?;
        results.wait_results_at_least(1).await?;
        results.wait_result_named(MACBOOK_NAME).await?;
        Ok(())
    })
}

fn very_long(session: &Session) -> ScenarioFuture<'_> {
    Box::pin(async move {
        let home = HomePage::new(session);
        home.open().await?;
        let results = home.search(&very_long_query()).await?;
        results.wait_no_match_notice().await?;
        let count = results.result_count().await?;
        ensure(
            count == 0,
            format!("boundary-length query still matched {count} products"),
        )
    })
}
