//! Selector indirection and element interaction.
//!
//! Scenarios never embed raw CSS: they go through a [`Selector`], so a markup
//! change in the storefront is a one-line fix in the owning page object. A
//! selector compiles to a JavaScript expression evaluating to the matched
//! element (or `null`), and a [`Locator`] pairs one with a session to click,
//! fill, and read through the bounded waits in [`crate::wait`].
//!
//! Absence is data here: a missing element is a zero count or a `false`
//! visibility probe, never an error. Only an exhausted wait budget fails.

use crate::result::ComprobarResult;
use crate::session::Session;
use crate::wait::{await_condition, await_flag, WaitOptions};

// ============================================================================
// Selectors
// ============================================================================

/// Strategy for finding one element in the live page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector, first match wins
    Css(String),
    /// Element id lookup
    Id(String),
    /// Form control `name` attribute, first match wins
    Name(String),
    /// Anchor whose trimmed text equals the needle
    LinkText(String),
    /// Anchor whose text contains the needle
    PartialLinkText(String),
    /// Any element whose text contains the needle
    Text(String),
    /// CSS match narrowed to elements whose text contains the needle
    CssWithText {
        /// CSS selector for the candidate set
        css: String,
        /// Text the matched element must contain
        text: String,
    },
}

impl Selector {
    /// CSS selector
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Element id (without the `#`)
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Form control `name` attribute
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Anchor with exactly this trimmed text
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::LinkText(text.into())
    }

    /// Anchor containing this text
    pub fn partial_link_text(text: impl Into<String>) -> Self {
        Self::PartialLinkText(text.into())
    }

    /// Any element containing this text
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// CSS match that must also contain this text
    pub fn css_with_text(css: impl Into<String>, text: impl Into<String>) -> Self {
        Self::CssWithText {
            css: css.into(),
            text: text.into(),
        }
    }

    /// JavaScript expression yielding the matched element or `null`.
    ///
    /// String arguments are embedded with Rust debug formatting, which
    /// produces a double-quoted, escaped literal that is also valid
    /// JavaScript.
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(css) => format!("document.querySelector({css:?})"),
            Self::Id(id) => format!("document.getElementById({id:?})"),
            Self::Name(name) => {
                format!("(document.getElementsByName({name:?})[0] || null)")
            }
            Self::LinkText(text) => format!(
                "(Array.from(document.querySelectorAll('a')).find(el => \
                 el.textContent.trim() === {text:?}) || null)"
            ),
            Self::PartialLinkText(text) => format!(
                "(Array.from(document.querySelectorAll('a')).find(el => \
                 el.textContent.includes({text:?})) || null)"
            ),
            Self::Text(text) => format!(
                "(Array.from(document.querySelectorAll('body *')).find(el => \
                 el.textContent.includes({text:?})) || null)"
            ),
            Self::CssWithText { css, text } => format!(
                "(Array.from(document.querySelectorAll({css:?})).find(el => \
                 el.textContent.includes({text:?})) || null)"
            ),
        }
    }

    /// JavaScript expression yielding how many elements match
    #[must_use]
    pub fn to_count_query(&self) -> String {
        match self {
            Self::Css(css) => format!("document.querySelectorAll({css:?}).length"),
            Self::Id(id) => format!("(document.getElementById({id:?}) ? 1 : 0)"),
            Self::Name(name) => format!("document.getElementsByName({name:?}).length"),
            Self::LinkText(text) => format!(
                "Array.from(document.querySelectorAll('a')).filter(el => \
                 el.textContent.trim() === {text:?}).length"
            ),
            Self::PartialLinkText(text) => format!(
                "Array.from(document.querySelectorAll('a')).filter(el => \
                 el.textContent.includes({text:?})).length"
            ),
            Self::Text(text) => format!(
                "Array.from(document.querySelectorAll('body *')).filter(el => \
                 el.textContent.includes({text:?})).length"
            ),
            Self::CssWithText { css, text } => format!(
                "Array.from(document.querySelectorAll({css:?})).filter(el => \
                 el.textContent.includes({text:?})).length"
            ),
        }
    }

    /// Human-readable description for wait and assertion messages
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Css(css) => format!("css `{css}`"),
            Self::Id(id) => format!("element `#{id}`"),
            Self::Name(name) => format!("control named `{name}`"),
            Self::LinkText(text) => format!("link \"{text}\""),
            Self::PartialLinkText(text) => format!("link containing \"{text}\""),
            Self::Text(text) => format!("text \"{text}\""),
            Self::CssWithText { css, text } => {
                format!("css `{css}` containing \"{text}\"")
            }
        }
    }

    fn click_js(&self) -> String {
        // Clickable means rendered with a box and not disabled; clicking a
        // hidden or disabled control would report success the page never saw.
        format!(
            "(() => {{ const el = {query}; \
             if (!el || el.disabled) return false; \
             if (!(el.offsetWidth || el.offsetHeight || el.getClientRects().length)) \
             return false; \
             el.scrollIntoView({{block: 'center'}}); el.click(); return true; }})()",
            query = self.to_query()
        )
    }

    fn clickable_js(&self) -> String {
        format!(
            "(() => {{ const el = {query}; return !!(el && !el.disabled && \
             (el.offsetWidth || el.offsetHeight || el.getClientRects().length)); }})()",
            query = self.to_query()
        )
    }

    fn fill_js(&self, text: &str) -> String {
        format!(
            "(() => {{ const el = {query}; if (!el) return false; el.focus(); \
             el.value = {text:?}; \
             el.dispatchEvent(new Event('input', {{bubbles: true}})); \
             el.dispatchEvent(new Event('change', {{bubbles: true}})); \
             return true; }})()",
            query = self.to_query()
        )
    }

    fn text_js(&self) -> String {
        format!(
            "(() => {{ const el = {query}; return el ? el.textContent : null; }})()",
            query = self.to_query()
        )
    }

    fn value_js(&self) -> String {
        format!(
            "(() => {{ const el = {query}; return el ? String(el.value) : null; }})()",
            query = self.to_query()
        )
    }

    fn visible_js(&self) -> String {
        format!(
            "(() => {{ const el = {query}; return !!(el && (el.offsetWidth || \
             el.offsetHeight || el.getClientRects().length)); }})()",
            query = self.to_query()
        )
    }
}

// ============================================================================
// Locator
// ============================================================================

/// A selector bound to a live session.
///
/// Every acting method polls until the action lands or the wait budget runs
/// out, so callers never race the storefront's rendering. Reading methods
/// prefixed `wait_` share that contract; the bare readers observe the page as
/// it is right now.
#[derive(Debug)]
pub struct Locator<'a> {
    session: &'a Session,
    selector: Selector,
    wait: WaitOptions,
}

impl<'a> Locator<'a> {
    /// Bind `selector` to `session` with the session's wait options
    #[must_use]
    pub fn new(session: &'a Session, selector: Selector) -> Self {
        let wait = session.wait_options();
        Self {
            session,
            selector,
            wait,
        }
    }

    /// Override the wait options for this locator
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// The underlying selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Click the element, polling until it is clickable and the click lands
    ///
    /// # Errors
    ///
    /// Times out if no clickable element appears within the wait budget.
    pub async fn click(&self) -> ComprobarResult<()> {
        let what = format!("click on {}", self.selector.describe());
        let js = self.selector.click_js();
        await_flag(&what, self.wait, || self.session.eval_bool(js.clone())).await
    }

    /// Replace the element's value with `text`, firing input and change events
    ///
    /// # Errors
    ///
    /// Times out if no matching element appears within the wait budget.
    pub async fn fill(&self, text: &str) -> ComprobarResult<()> {
        let what = format!("fill {}", self.selector.describe());
        let js = self.selector.fill_js(text);
        await_flag(&what, self.wait, || self.session.eval_bool(js.clone())).await
    }

    /// Clear the element's value
    ///
    /// # Errors
    ///
    /// Times out if no matching element appears within the wait budget.
    pub async fn clear(&self) -> ComprobarResult<()> {
        self.fill("").await
    }

    /// Wait until the element is rendered with a nonzero box
    ///
    /// # Errors
    ///
    /// Times out if the element never becomes visible.
    pub async fn wait_visible(&self) -> ComprobarResult<()> {
        let what = format!("{} to be visible", self.selector.describe());
        let js = self.selector.visible_js();
        await_flag(&what, self.wait, || self.session.eval_bool(js.clone())).await
    }

    /// Wait until the element is visible and not disabled
    ///
    /// # Errors
    ///
    /// Times out if the element never becomes clickable.
    pub async fn wait_clickable(&self) -> ComprobarResult<()> {
        let what = format!("{} to be clickable", self.selector.describe());
        let js = self.selector.clickable_js();
        await_flag(&what, self.wait, || self.session.eval_bool(js.clone())).await
    }

    /// Wait until at least one element matches
    ///
    /// # Errors
    ///
    /// Times out if no matching element appears.
    pub async fn wait_present(&self) -> ComprobarResult<()> {
        self.wait_count_at_least(1).await.map(|_| ())
    }

    /// Wait until at least `minimum` elements match, returning the count seen
    ///
    /// # Errors
    ///
    /// Times out if the count never reaches `minimum`.
    pub async fn wait_count_at_least(&self, minimum: u64) -> ComprobarResult<u64> {
        let what = format!("at least {minimum} of {}", self.selector.describe());
        let js = self.selector.to_count_query();
        await_condition(&what, self.wait, || {
            let probe = self.session.eval_u64(js.clone());
            async move {
                let count = probe.await?;
                Ok((count >= minimum).then_some(count))
            }
        })
        .await
    }

    /// Wait for the element and return its text content
    ///
    /// # Errors
    ///
    /// Times out if no matching element appears.
    pub async fn text(&self) -> ComprobarResult<String> {
        let what = format!("text of {}", self.selector.describe());
        let js = self.selector.text_js();
        await_condition(&what, self.wait, || self.session.eval_opt_string(js.clone())).await
    }

    /// Wait until the element's text contains `needle`, returning the full text
    ///
    /// # Errors
    ///
    /// Times out if no matching element ever carries the text.
    pub async fn wait_text_contains(&self, needle: &str) -> ComprobarResult<String> {
        let what = format!("{} to contain \"{needle}\"", self.selector.describe());
        let js = self.selector.text_js();
        await_condition(&what, self.wait, || {
            let probe = self.session.eval_opt_string(js.clone());
            let needle = needle.to_string();
            async move {
                Ok(probe
                    .await?
                    .filter(|text| text.contains(&needle)))
            }
        })
        .await
    }

    /// Wait for the element and return its current input value
    ///
    /// # Errors
    ///
    /// Times out if no matching element appears.
    pub async fn value(&self) -> ComprobarResult<String> {
        let what = format!("value of {}", self.selector.describe());
        let js = self.selector.value_js();
        await_condition(&what, self.wait, || self.session.eval_opt_string(js.clone())).await
    }

    /// How many elements match right now, without waiting
    ///
    /// # Errors
    ///
    /// Fails only if the probe script cannot run.
    pub async fn count(&self) -> ComprobarResult<u64> {
        self.session.eval_u64(self.selector.to_count_query()).await
    }

    /// Whether the element is rendered right now, without waiting
    ///
    /// # Errors
    ///
    /// Fails only if the probe script cannot run.
    pub async fn is_visible(&self) -> ComprobarResult<bool> {
        self.session.eval_bool(self.selector.visible_js()).await
    }
}
