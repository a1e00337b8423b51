//! Error types shared by every layer of the harness.
//!
//! Scenario code reports exactly one failure kind per condition: a wait that
//! never settles is a [`ComprobarError::Timeout`], a page-state check that
//! settles on the wrong value is an [`ComprobarError::AssertionFailed`].
//! A missing element is never an error by itself; locators count matches and
//! report zero, and it is the surrounding wait or assertion that decides
//! whether zero is acceptable.

use thiserror::Error;

/// Result type alias for harness operations
pub type ComprobarResult<T> = Result<T, ComprobarError>;

/// Errors that can occur while driving the storefront
#[derive(Debug, Error)]
pub enum ComprobarError {
    /// No usable browser executable was found for the requested kind
    #[error("No {kind} executable found; install it or set COMPROBAR_CHROME")]
    BrowserNotFound {
        /// Browser kind that could not be located
        kind: String,
    },

    /// Browser process failed to start or the CDP handshake failed
    #[error("Failed to launch browser session: {message}")]
    SessionLaunch {
        /// Underlying launch error
        message: String,
    },

    /// The session was closed or lost while an operation was in flight
    #[error("Browser session closed: {message}")]
    SessionClosed {
        /// What the session was doing when it went away
        message: String,
    },

    /// Navigation to a URL failed outright
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// Target URL
        url: String,
        /// Underlying CDP error
        message: String,
    },

    /// A JavaScript evaluation failed or returned an unexpected shape
    #[error("Script evaluation failed: {message}")]
    Script {
        /// Underlying evaluation error
        message: String,
    },

    /// A bounded wait elapsed without its condition settling
    #[error("Timed out after {ms}ms waiting for {what}")]
    Timeout {
        /// Human-readable description of the awaited condition
        what: String,
        /// Timeout budget in milliseconds
        ms: u64,
    },

    /// A page-state check settled on the wrong value
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// What was expected and what was observed
        message: String,
    },

    /// Suite configuration could not be parsed or is inconsistent
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What was wrong with the configuration
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod display_tests {
        use super::*;

        #[test]
        fn test_browser_not_found_display() {
            let err = ComprobarError::BrowserNotFound {
                kind: "edge".to_string(),
            };
            assert!(err.to_string().contains("edge"));
            assert!(err.to_string().contains("COMPROBAR_CHROME"));
        }

        #[test]
        fn test_session_launch_display() {
            let err = ComprobarError::SessionLaunch {
                message: "chrome exited early".to_string(),
            };
            assert!(err.to_string().contains("launch"));
            assert!(err.to_string().contains("chrome exited early"));
        }

        #[test]
        fn test_navigation_display() {
            let err = ComprobarError::Navigation {
                url: "https://tutorialsninja.com/demo/".to_string(),
                message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            };
            assert!(err.to_string().contains("tutorialsninja.com"));
            assert!(err.to_string().contains("ERR_NAME_NOT_RESOLVED"));
        }

        #[test]
        fn test_timeout_display_names_condition_and_budget() {
            let err = ComprobarError::Timeout {
                what: "search results under #content".to_string(),
                ms: 10_000,
            };
            assert!(err.to_string().contains("10000ms"));
            assert!(err.to_string().contains("search results"));
        }

        #[test]
        fn test_assertion_failed_display() {
            let err = ComprobarError::AssertionFailed {
                message: "expected title to contain 'Your Store', got 'Challenge'".to_string(),
            };
            assert!(err.to_string().starts_with("Assertion failed"));
            assert!(err.to_string().contains("Your Store"));
        }

        #[test]
        fn test_invalid_config_display() {
            let err = ComprobarError::InvalidConfig {
                message: "unknown browser 'safari'".to_string(),
            };
            assert!(err.to_string().contains("safari"));
        }
    }

    mod conversion_tests {
        use super::*;

        #[test]
        fn test_io_error_from() {
            let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
            let err: ComprobarError = io_err.into();
            assert!(matches!(err, ComprobarError::Io(_)));
            assert!(err.to_string().contains("IO error"));
        }

        #[test]
        fn test_json_error_from() {
            let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
            let err: ComprobarError = json_err.into();
            assert!(matches!(err, ComprobarError::Json(_)));
        }
    }

    mod matching_tests {
        use super::*;

        #[test]
        fn test_timeout_fields_are_matchable() {
            let err = ComprobarError::Timeout {
                what: "cart badge".to_string(),
                ms: 500,
            };
            match err {
                ComprobarError::Timeout { what, ms } => {
                    assert_eq!(what, "cart badge");
                    assert_eq!(ms, 500);
                }
                other => panic!("expected Timeout, got {other:?}"),
            }
        }

        #[test]
        fn test_session_closed_carries_context() {
            let err = ComprobarError::SessionClosed {
                message: "browser process exited".to_string(),
            };
            assert!(err.to_string().contains("closed"));
            assert!(err.to_string().contains("browser process exited"));
        }
    }
}
