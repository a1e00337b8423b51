//! Comprobar: end-to-end checks for the OpenCart demo storefront.
//!
//! Comprobar (Spanish: "to verify") drives a real Chromium-family browser
//! over the Chrome DevTools Protocol through complete shopper journeys:
//! searching the catalog, filling the cart, entering checkout, and probing
//! the account pages, at a matrix of window sizes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                   COMPROBAR Architecture                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌───────────┐   ┌──────────┐   ┌──────────┐ │
//! │  │ Scenario │   │ Page      │   │ Bounded  │   │ Browser  │ │
//! │  │ Registry │──►│ Objects   │──►│ Waits    │──►│ Session  │ │
//! │  │          │   │ (selectors│   │ (poll ≤  │   │ (CDP)    │ │
//! │  │          │   │  + intent)│   │  budget) │   │          │ │
//! │  └──────────┘   └───────────┘   └──────────┘   └──────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every scenario gets a fresh session, every step waits for a named
//! condition instead of sleeping, and every selector lives in exactly one
//! page object.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod config;
pub mod data;
mod locator;
pub mod page;
mod report;
mod result;
mod scenario;
mod session;
pub mod suites;
mod viewport;
mod wait;

pub use config::{
    BrowserKind, SuiteConfig, DEFAULT_BASE_URL, ENV_BASE_URL, ENV_BROWSER, ENV_EXECUTABLE,
    ENV_HEADLESS,
};
pub use locator::{Locator, Selector};
pub use report::{RunReport, ScenarioOutcome, ScenarioStatus};
pub use result::{ComprobarError, ComprobarResult};
pub use scenario::{
    run_all, run_one, RunOptions, Scenario, ScenarioFn, ScenarioFuture, ScenarioId, Suite,
    DEFAULT_SCENARIO_BUDGET_MS,
};
pub use session::Session;
pub use suites::registry;
pub use viewport::{Viewport, NAV_COLLAPSE_WIDTH};
pub use wait::{
    await_condition, await_flag, WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS,
};
