//! Suite configuration: target storefront, browser choice, and wait budgets.
//!
//! Configuration resolves in two layers: compiled defaults aimed at the public
//! OpenCart demo shop, then `COMPROBAR_*` environment overrides so CI can point
//! the same scenarios at a staging install or a locally bundled browser.

use std::path::PathBuf;
use std::str::FromStr;

use crate::result::{ComprobarError, ComprobarResult};
use crate::viewport::Viewport;
use crate::wait::WaitOptions;

/// Storefront the suite runs against unless overridden
pub const DEFAULT_BASE_URL: &str = "https://tutorialsninja.com/demo/";

/// Override the storefront base URL
pub const ENV_BASE_URL: &str = "COMPROBAR_BASE_URL";
/// Override the browser kind (`chromium`, `chrome`, `edge`)
pub const ENV_BROWSER: &str = "COMPROBAR_BROWSER";
/// Set to `0`/`false`/`no` to watch the browser while scenarios run
pub const ENV_HEADLESS: &str = "COMPROBAR_HEADLESS";
/// Explicit path to the browser executable
pub const ENV_EXECUTABLE: &str = "COMPROBAR_CHROME";

/// Which browser family a session should drive.
///
/// All three speak the DevTools protocol, so the same session code drives
/// each of them; only executable discovery differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserKind {
    /// Chromium or any auto-detected Chromium build
    #[default]
    Chromium,
    /// Google Chrome
    Chrome,
    /// Microsoft Edge
    Edge,
}

impl BrowserKind {
    /// Lowercase name used in logs and error messages
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chromium => "chromium",
            Self::Chrome => "chrome",
            Self::Edge => "edge",
        }
    }

    /// Executable names to probe on `PATH` when no explicit path is set.
    ///
    /// Chromium relies on the launcher's own detection; the branded
    /// browsers must resolve to their own binaries, or a session asked for
    /// Chrome could silently run on a detected Chromium instead.
    #[must_use]
    pub const fn executable_candidates(self) -> &'static [&'static str] {
        match self {
            Self::Chromium => &[],
            Self::Chrome => &["google-chrome", "google-chrome-stable"],
            Self::Edge => &["microsoft-edge", "microsoft-edge-stable"],
        }
    }
}

impl std::fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrowserKind {
    type Err = ComprobarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" => Ok(Self::Chromium),
            "chrome" | "google-chrome" => Ok(Self::Chrome),
            "edge" | "microsoft-edge" => Ok(Self::Edge),
            other => Err(ComprobarError::InvalidConfig {
                message: format!("unknown browser '{other}' (expected chromium, chrome or edge)"),
            }),
        }
    }
}

/// Everything a scenario run needs to know about its environment
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Storefront base URL, always with a trailing slash
    pub base_url: String,
    /// Browser family to launch
    pub browser: BrowserKind,
    /// Run without a visible window
    pub headless: bool,
    /// Window size for the session
    pub viewport: Viewport,
    /// Explicit browser executable, overriding detection
    pub executable: Option<PathBuf>,
    /// Default polling budget for waits in this run
    pub wait: WaitOptions,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            browser: BrowserKind::Chromium,
            headless: true,
            viewport: Viewport::DESKTOP,
            executable: None,
            wait: WaitOptions::default(),
        }
    }
}

impl SuiteConfig {
    /// Create a configuration with compiled defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with defaults plus `COMPROBAR_*` overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ComprobarError::InvalidConfig`] if an override fails to parse.
    pub fn from_env() -> ComprobarResult<Self> {
        Self::default().apply_env_pairs(std::env::vars())
    }

    /// Set the storefront base URL, normalizing the trailing slash
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    /// Set the browser family
    #[must_use]
    pub const fn with_browser(mut self, browser: BrowserKind) -> Self {
        self.browser = browser;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the window size
    #[must_use]
    pub const fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set an explicit browser executable
    #[must_use]
    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Set the default wait budget
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Storefront landing page URL
    #[must_use]
    pub fn home_url(&self) -> &str {
        &self.base_url
    }

    /// URL for an `index.php?route=` page such as `account/login`
    #[must_use]
    pub fn route_url(&self, route: &str) -> String {
        format!("{}index.php?route={route}", self.base_url)
    }

    /// URL for a product detail page
    #[must_use]
    pub fn product_url(&self, product_id: u32) -> String {
        format!(
            "{}index.php?route=product/product&product_id={product_id}",
            self.base_url
        )
    }

    /// URL for a category listing page
    #[must_use]
    pub fn category_url(&self, path: &str) -> String {
        format!(
            "{}index.php?route=product/category&path={path}",
            self.base_url
        )
    }

    fn apply_env_pairs<I>(mut self, pairs: I) -> ComprobarResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in pairs {
            match key.as_str() {
                ENV_BASE_URL => self = self.with_base_url(value),
                ENV_BROWSER => self.browser = value.parse()?,
                ENV_HEADLESS => self.headless = parse_headless(&value)?,
                ENV_EXECUTABLE => self.executable = Some(PathBuf::from(value)),
                _ => {}
            }
        }
        Ok(self)
    }
}

fn parse_headless(value: &str) -> ComprobarResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ComprobarError::InvalidConfig {
            message: format!("{ENV_HEADLESS} must be a boolean, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod browser_kind_tests {
        use super::*;

        #[test]
        fn test_default_is_chromium() {
            assert_eq!(BrowserKind::default(), BrowserKind::Chromium);
        }

        #[test]
        fn test_parse_accepts_aliases() {
            assert_eq!(
                "google-chrome".parse::<BrowserKind>().unwrap(),
                BrowserKind::Chrome
            );
            assert_eq!(
                "Microsoft-Edge".parse::<BrowserKind>().unwrap(),
                BrowserKind::Edge
            );
        }

        #[test]
        fn test_parse_rejects_unknown() {
            let err = "safari".parse::<BrowserKind>().unwrap_err();
            assert!(err.to_string().contains("safari"));
        }

        #[test]
        fn test_only_branded_browsers_carry_candidates() {
            assert!(BrowserKind::Chromium.executable_candidates().is_empty());
            assert!(BrowserKind::Chrome
                .executable_candidates()
                .contains(&"google-chrome"));
            assert!(BrowserKind::Edge
                .executable_candidates()
                .contains(&"microsoft-edge"));
        }

        #[test]
        fn test_display_matches_as_str() {
            assert_eq!(BrowserKind::Edge.to_string(), "edge");
        }
    }

    mod defaults_tests {
        use super::*;

        #[test]
        fn test_default_config_targets_demo_shop() {
            let config = SuiteConfig::default();
            assert_eq!(config.base_url, DEFAULT_BASE_URL);
            assert!(config.headless);
            assert_eq!(config.viewport, Viewport::DESKTOP);
            assert!(config.executable.is_none());
        }

        #[test]
        fn test_builders_chain() {
            let config = SuiteConfig::new()
                .with_browser(BrowserKind::Chrome)
                .with_headless(false)
                .with_viewport(Viewport::MOBILE)
                .with_executable("/usr/bin/google-chrome");
            assert_eq!(config.browser, BrowserKind::Chrome);
            assert!(!config.headless);
            assert_eq!(config.viewport, Viewport::MOBILE);
            assert_eq!(
                config.executable,
                Some(PathBuf::from("/usr/bin/google-chrome"))
            );
        }
    }

    mod url_tests {
        use super::*;

        #[test]
        fn test_base_url_gains_trailing_slash() {
            let config = SuiteConfig::new().with_base_url("http://localhost:8080/shop");
            assert_eq!(config.base_url, "http://localhost:8080/shop/");
        }

        #[test]
        fn test_route_url() {
            let config = SuiteConfig::default();
            assert_eq!(
                config.route_url("account/login"),
                "https://tutorialsninja.com/demo/index.php?route=account/login"
            );
        }

        #[test]
        fn test_product_url() {
            let config = SuiteConfig::default();
            assert_eq!(
                config.product_url(43),
                "https://tutorialsninja.com/demo/index.php?route=product/product&product_id=43"
            );
        }

        #[test]
        fn test_category_url() {
            let config = SuiteConfig::default();
            assert_eq!(
                config.category_url("20"),
                "https://tutorialsninja.com/demo/index.php?route=product/category&path=20"
            );
        }
    }

    mod env_tests {
        use super::*;

        fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
            entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect()
        }

        #[test]
        fn test_env_overrides_apply() {
            let config = SuiteConfig::default()
                .apply_env_pairs(pairs(&[
                    (ENV_BASE_URL, "http://staging.example.com/shop"),
                    (ENV_BROWSER, "edge"),
                    (ENV_HEADLESS, "false"),
                    (ENV_EXECUTABLE, "/opt/edge/msedge"),
                ]))
                .unwrap();
            assert_eq!(config.base_url, "http://staging.example.com/shop/");
            assert_eq!(config.browser, BrowserKind::Edge);
            assert!(!config.headless);
            assert_eq!(config.executable, Some(PathBuf::from("/opt/edge/msedge")));
        }

        #[test]
        fn test_unrelated_env_vars_are_ignored() {
            let config = SuiteConfig::default()
                .apply_env_pairs(pairs(&[("PATH", "/usr/bin"), ("HOME", "/root")]))
                .unwrap();
            assert_eq!(config.base_url, DEFAULT_BASE_URL);
        }

        #[test]
        fn test_bad_browser_value_is_rejected() {
            let result =
                SuiteConfig::default().apply_env_pairs(pairs(&[(ENV_BROWSER, "netscape")]));
            assert!(result.is_err());
        }

        #[test]
        fn test_headless_parse_variants() {
            assert!(parse_headless("1").unwrap());
            assert!(parse_headless("Yes").unwrap());
            assert!(!parse_headless("0").unwrap());
            assert!(!parse_headless("off").unwrap());
            assert!(parse_headless("maybe").is_err());
        }
    }
}
