//! Browser session provisioning over the Chrome DevTools Protocol.
//!
//! [`Session::launch`] owns the whole lifecycle: resolve an executable, start
//! the browser sized to the suite's viewport, drive the CDP message stream on
//! a background task, and open the single page a scenario works in. Every
//! scenario gets a fresh session with a fresh profile directory, so no state
//! leaks between runs.
//!
//! With the `browser` feature off, a no-op stand-in with the same API keeps
//! unit tests and downstream builds Chrome-free.

use crate::config::SuiteConfig;
use crate::result::{ComprobarError, ComprobarResult};
use crate::wait::WaitOptions;

// ============================================================================
// Real CDP Implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};

    use base64::Engine;
    use chromiumoxide::browser::{Browser, BrowserConfig, HeadlessMode};
    use chromiumoxide::cdp::browser_protocol::network::ClearBrowserCookiesParams;
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::Page;
    use futures::StreamExt;
    use serde::de::DeserializeOwned;
    use tracing::{debug, info, instrument};

    static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

    /// A live browser with one page, scoped to a single scenario run
    #[derive(Debug)]
    pub struct Session {
        config: SuiteConfig,
        browser: Browser,
        page: Page,
        handler: tokio::task::JoinHandle<()>,
        profile_dir: PathBuf,
    }

    impl Session {
        /// Launch a browser for `config` and open a blank page.
        ///
        /// # Errors
        ///
        /// Returns [`ComprobarError::BrowserNotFound`] when no executable can
        /// be located, or [`ComprobarError::SessionLaunch`] when the browser
        /// starts but the CDP handshake or first page fails.
        #[instrument(skip_all, fields(browser = %config.browser, viewport = %config.viewport))]
        pub async fn launch(config: &SuiteConfig) -> ComprobarResult<Self> {
            let profile_dir = fresh_profile_dir();
            let browser_config = build_browser_config(config, &profile_dir)?;

            info!(
                "Launching {} session ({}, headless: {})",
                config.browser, config.viewport, config.headless
            );

            let (browser, mut messages) = Browser::launch(browser_config).await.map_err(|e| {
                ComprobarError::SessionLaunch {
                    message: e.to_string(),
                }
            })?;

            // Drive CDP messages until the browser goes away.
            let handler = tokio::spawn(async move {
                while let Some(event) = messages.next().await {
                    if event.is_err() {
                        debug!("CDP message stream ended");
                        break;
                    }
                }
            });

            let page = browser.new_page("about:blank").await.map_err(|e| {
                ComprobarError::SessionLaunch {
                    message: e.to_string(),
                }
            })?;

            Ok(Self {
                config: config.clone(),
                browser,
                page,
                handler,
                profile_dir,
            })
        }

        /// Suite configuration this session was launched with
        #[must_use]
        pub const fn config(&self) -> &SuiteConfig {
            &self.config
        }

        /// Default wait options for this session
        #[must_use]
        pub const fn wait_options(&self) -> WaitOptions {
            self.config.wait
        }

        /// Navigate to an absolute URL and wait for the load to finish
        ///
        /// # Errors
        ///
        /// Returns [`ComprobarError::Navigation`] when the browser rejects
        /// the navigation.
        pub async fn goto(&self, url: &str) -> ComprobarResult<()> {
            debug!("goto {url}");
            self.page
                .goto(url)
                .await
                .map_err(|e| ComprobarError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            Ok(())
        }

        /// Navigate to a storefront route such as `account/login`
        ///
        /// # Errors
        ///
        /// Same contract as [`Session::goto`].
        pub async fn goto_route(&self, route: &str) -> ComprobarResult<()> {
            self.goto(&self.config.route_url(route)).await
        }

        /// URL the page is currently on
        ///
        /// # Errors
        ///
        /// Returns [`ComprobarError::Script`] when the page is unreachable.
        pub async fn current_url(&self) -> ComprobarResult<String> {
            let url = self.page.url().await.map_err(|e| ComprobarError::Script {
                message: e.to_string(),
            })?;
            Ok(url.unwrap_or_default())
        }

        /// Document title of the current page
        ///
        /// # Errors
        ///
        /// Returns [`ComprobarError::Script`] when evaluation fails.
        pub async fn title(&self) -> ComprobarResult<String> {
            self.eval_string("document.title").await
        }

        /// Go one step back in session history
        ///
        /// # Errors
        ///
        /// Returns [`ComprobarError::Script`] when evaluation fails.
        pub async fn back(&self) -> ComprobarResult<()> {
            self.eval_bool("(() => { history.back(); return true; })()")
                .await
                .map(|_| ())
        }

        /// Reload the current page
        ///
        /// # Errors
        ///
        /// Returns [`ComprobarError::Script`] when evaluation fails.
        pub async fn reload(&self) -> ComprobarResult<()> {
            self.eval_bool("(() => { location.reload(); return true; })()")
                .await
                .map(|_| ())
        }

        /// Drop every cookie the browser holds.
        ///
        /// The storefront keeps its cart in a server-side session keyed by
        /// cookie, so this resets the visit to a first-contact state.
        ///
        /// # Errors
        ///
        /// Returns [`ComprobarError::Script`] when the CDP command fails.
        pub async fn clear_cookies(&self) -> ComprobarResult<()> {
            self.page
                .execute(ClearBrowserCookiesParams::default())
                .await
                .map_err(|e| ComprobarError::Script {
                    message: e.to_string(),
                })?;
            Ok(())
        }

        /// Evaluate JavaScript expecting a boolean
        ///
        /// # Errors
        ///
        /// Returns [`ComprobarError::Script`] when evaluation or conversion
        /// fails.
        pub async fn eval_bool(&self, js: impl Into<String>) -> ComprobarResult<bool> {
            self.eval(js.into()).await
        }

        /// Evaluate JavaScript expecting a count
        ///
        /// # Errors
        ///
        /// Returns [`ComprobarError::Script`] when evaluation or conversion
        /// fails.
        pub async fn eval_u64(&self, js: impl Into<String>) -> ComprobarResult<u64> {
            self.eval(js.into()).await
        }

        /// Evaluate JavaScript expecting a string
        ///
        /// # Errors
        ///
        /// Returns [`ComprobarError::Script`] when evaluation or conversion
        /// fails.
        pub async fn eval_string(&self, js: impl Into<String>) -> ComprobarResult<String> {
            self.eval(js.into()).await
        }

        /// Evaluate JavaScript expecting a string or `null`
        ///
        /// # Errors
        ///
        /// Returns [`ComprobarError::Script`] when evaluation or conversion
        /// fails.
        pub async fn eval_opt_string(
            &self,
            js: impl Into<String>,
        ) -> ComprobarResult<Option<String>> {
            self.eval(js.into()).await
        }

        /// Evaluate JavaScript returning whatever JSON it yields
        ///
        /// # Errors
        ///
        /// Returns [`ComprobarError::Script`] when evaluation fails.
        pub async fn eval_json(&self, js: impl Into<String>) -> ComprobarResult<serde_json::Value> {
            self.eval(js.into()).await
        }

        async fn eval<T: DeserializeOwned>(&self, js: String) -> ComprobarResult<T> {
            let outcome = self
                .page
                .evaluate(js)
                .await
                .map_err(|e| ComprobarError::Script {
                    message: e.to_string(),
                })?;
            outcome.into_value().map_err(|e| ComprobarError::Script {
                message: e.to_string(),
            })
        }

        /// Capture the visible viewport as PNG bytes
        ///
        /// # Errors
        ///
        /// Returns [`ComprobarError::Script`] when capture or decoding fails.
        pub async fn screenshot_png(&self) -> ComprobarResult<Vec<u8>> {
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();

            let shot = self
                .page
                .execute(params)
                .await
                .map_err(|e| ComprobarError::Script {
                    message: e.to_string(),
                })?;

            base64::engine::general_purpose::STANDARD
                .decode(&shot.data)
                .map_err(|e| ComprobarError::Script {
                    message: e.to_string(),
                })
        }

        /// Shut the browser down and discard the session profile.
        ///
        /// # Errors
        ///
        /// Returns [`ComprobarError::SessionLaunch`] when the browser does
        /// not exit cleanly.
        pub async fn close(mut self) -> ComprobarResult<()> {
            self.browser
                .close()
                .await
                .map_err(|e| ComprobarError::SessionLaunch {
                    message: e.to_string(),
                })?;
            self.handler.abort();
            let _ = std::fs::remove_dir_all(&self.profile_dir);
            Ok(())
        }
    }

    impl Drop for Session {
        // Last resort for a leaked session; close() already aborted the
        // handler on the orderly path, and abort is idempotent.
        fn drop(&mut self) {
            self.handler.abort();
        }
    }

    pub(super) fn build_browser_config(
        config: &SuiteConfig,
        profile_dir: &std::path::Path,
    ) -> ComprobarResult<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .window_size(config.viewport.width, config.viewport.height)
            .user_data_dir(profile_dir)
            .no_sandbox()
            // Keeps navigator.webdriver unset so the storefront serves the
            // same markup it serves a human visitor.
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--exclude-switches=enable-automation")
            .arg("--disable-infobars")
            .arg("--no-default-browser-check")
            .arg("--no-first-run")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");

        builder = if config.headless {
            // Old headless was removed in Chrome 132
            builder.headless_mode(HeadlessMode::New)
        } else {
            builder.with_head()
        };

        if let Some(path) = &config.executable {
            builder = builder.chrome_executable(path);
        } else {
            let candidates = config.browser.executable_candidates();
            if !candidates.is_empty() {
                // A branded browser must resolve to its own binary; falling
                // through to auto-detection could launch a plain Chromium
                // and defeat the configuration under test.
                let found = resolve_on_path(candidates).ok_or_else(|| {
                    ComprobarError::BrowserNotFound {
                        kind: config.browser.to_string(),
                    }
                })?;
                builder = builder.chrome_executable(found);
            }
        }

        builder.build().map_err(|message| {
            if message.contains("Could not auto detect") {
                ComprobarError::BrowserNotFound {
                    kind: config.browser.to_string(),
                }
            } else {
                ComprobarError::SessionLaunch { message }
            }
        })
    }

    // First matching candidate anywhere on PATH, in candidate priority order.
    pub(super) fn resolve_on_path(candidates: &[&str]) -> Option<PathBuf> {
        let path = std::env::var_os("PATH")?;
        let dirs: Vec<PathBuf> = std::env::split_paths(&path).collect();
        for candidate in candidates {
            for dir in &dirs {
                let full = dir.join(candidate);
                if full.is_file() {
                    return Some(full);
                }
            }
        }
        None
    }

    // Unique per session so parallel runs never fight over a profile lock.
    fn fresh_profile_dir() -> PathBuf {
        let stamp = SESSION_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("comprobar-{}-{stamp}", std::process::id()));
        if dir.exists() {
            let _ = std::fs::remove_dir_all(&dir);
        }
        dir
    }
}

// ============================================================================
// Mock Implementation (when `browser` feature is NOT enabled)
// ============================================================================

#[cfg(not(feature = "browser"))]
#[allow(clippy::unused_async)] // API parity with the CDP-backed session
mod mock {
    use super::*;


    /// No-op stand-in for a live browser session.
    ///
    /// Launching always succeeds, navigation goes nowhere, and every probe
    /// reports an inert page: `false`, zero, empty. Lets the rest of the
    /// crate compile and unit-test without Chrome installed.
    #[derive(Debug)]
    pub struct Session {
        config: SuiteConfig,
    }

    impl Session {
        /// Pretend to launch a browser
        ///
        /// # Errors
        ///
        /// Never fails.
        pub async fn launch(config: &SuiteConfig) -> ComprobarResult<Self> {
            #[cfg(test)]
            lifecycle_log::record(&config.base_url, "launch");
            Ok(Self {
                config: config.clone(),
            })
        }

        /// Suite configuration this session was launched with
        #[must_use]
        pub const fn config(&self) -> &SuiteConfig {
            &self.config
        }

        /// Default wait options for this session
        #[must_use]
        pub const fn wait_options(&self) -> WaitOptions {
            self.config.wait
        }

        /// Pretend to navigate
        ///
        /// # Errors
        ///
        /// Never fails.
        pub async fn goto(&self, _url: &str) -> ComprobarResult<()> {
            Ok(())
        }

        /// Pretend to navigate to a storefront route
        ///
        /// # Errors
        ///
        /// Never fails.
        pub async fn goto_route(&self, _route: &str) -> ComprobarResult<()> {
            Ok(())
        }

        /// Always `about:blank`
        ///
        /// # Errors
        ///
        /// Never fails.
        pub async fn current_url(&self) -> ComprobarResult<String> {
            Ok(String::from("about:blank"))
        }

        /// Always empty
        ///
        /// # Errors
        ///
        /// Never fails.
        pub async fn title(&self) -> ComprobarResult<String> {
            Ok(String::new())
        }

        /// No-op
        ///
        /// # Errors
        ///
        /// Never fails.
        pub async fn back(&self) -> ComprobarResult<()> {
            Ok(())
        }

        /// No-op
        ///
        /// # Errors
        ///
        /// Never fails.
        pub async fn reload(&self) -> ComprobarResult<()> {
            Ok(())
        }

        /// No-op
        ///
        /// # Errors
        ///
        /// Never fails.
        pub async fn clear_cookies(&self) -> ComprobarResult<()> {
            Ok(())
        }

        /// Always `false`
        ///
        /// # Errors
        ///
        /// Never fails.
        pub async fn eval_bool(&self, _js: impl Into<String>) -> ComprobarResult<bool> {
            Ok(false)
        }

        /// Always zero
        ///
        /// # Errors
        ///
        /// Never fails.
        pub async fn eval_u64(&self, _js: impl Into<String>) -> ComprobarResult<u64> {
            Ok(0)
        }

        /// Always empty
        ///
        /// # Errors
        ///
        /// Never fails.
        pub async fn eval_string(&self, _js: impl Into<String>) -> ComprobarResult<String> {
            Ok(String::new())
        }

        /// Always `None`
        ///
        /// # Errors
        ///
        /// Never fails.
        pub async fn eval_opt_string(
            &self,
            _js: impl Into<String>,
        ) -> ComprobarResult<Option<String>> {
            Ok(None)
        }

        /// Always `null`
        ///
        /// # Errors
        ///
        /// Never fails.
        pub async fn eval_json(
            &self,
            _js: impl Into<String>,
        ) -> ComprobarResult<serde_json::Value> {
            Ok(serde_json::Value::Null)
        }

        /// Always empty
        ///
        /// # Errors
        ///
        /// Never fails.
        pub async fn screenshot_png(&self) -> ComprobarResult<Vec<u8>> {
            Ok(Vec::new())
        }

        /// No-op
        ///
        /// # Errors
        ///
        /// Never fails.
        pub async fn close(self) -> ComprobarResult<()> {
            #[cfg(test)]
            lifecycle_log::record(&self.config.base_url, "close");
            Ok(())
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::Session;
#[cfg(not(feature = "browser"))]
pub use mock::Session;
#[cfg(all(test, not(feature = "browser")))]
pub(crate) use mock::lifecycle_log;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[cfg(feature = "browser")]
    mod launch_config_tests {
        use super::*;
        use crate::viewport::Viewport;
        use std::path::PathBuf;

        #[test]
        fn test_explicit_executable_builds_without_detection() {
            let config = SuiteConfig::new()
                .with_executable(PathBuf::from("/usr/bin/env"))
                .with_viewport(Viewport::MOBILE);
            let dir = std::env::temp_dir().join("comprobar-config-test");
            let built = cdp::build_browser_config(&config, &dir);
            assert!(built.is_ok());
        }

        #[test]
        fn test_headed_builds_with_explicit_executable() {
            let config = SuiteConfig::new()
                .with_executable(PathBuf::from("/usr/bin/env"))
                .with_headless(false);
            let dir = std::env::temp_dir().join("comprobar-config-test-headed");
            assert!(cdp::build_browser_config(&config, &dir).is_ok());
        }

        #[test]
        fn test_path_resolution_finds_a_real_binary() {
            // `env` sits on PATH everywhere the suite runs.
            let found = cdp::resolve_on_path(&["env"]);
            assert!(found.is_some_and(|p| p.is_file()));
        }

        #[test]
        fn test_path_resolution_misses_an_unknown_binary() {
            assert!(cdp::resolve_on_path(&["comprobar-no-such-browser"]).is_none());
        }

        #[test]
        fn test_branded_browser_without_binary_is_rejected() {
            let config = SuiteConfig::new().with_browser(crate::config::BrowserKind::Chrome);
            let dir = std::env::temp_dir().join("comprobar-config-test-chrome");
            match cdp::build_browser_config(&config, &dir) {
                Err(ComprobarError::BrowserNotFound { kind }) => assert_eq!(kind, "chrome"),
                // A machine with Chrome actually installed resolves instead.
                Ok(_) => assert!(cdp::resolve_on_path(
                    crate::config::BrowserKind::Chrome.executable_candidates()
                )
                .is_some()),
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
    }

    #[cfg(not(feature = "browser"))]
    mod mock_tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_session_is_inert() {
            let config = SuiteConfig::new();
            let session = Session::launch(&config).await.unwrap();
            session.goto("https://example.com/").await.unwrap();
            assert_eq!(session.current_url().await.unwrap(), "about:blank");
            assert!(!session.eval_bool("true").await.unwrap());
            assert_eq!(session.eval_u64("1 + 1").await.unwrap(), 0);
            session.close().await.unwrap();
        }
    }
}
