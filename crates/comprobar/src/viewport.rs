//! Window geometry for responsive layout checks.
//!
//! The storefront collapses its category navigation into a hamburger toggler
//! below the Bootstrap `md` breakpoint, so scenarios pick a [`Viewport`] per
//! run and assert against the layout that width implies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::result::ComprobarError;

/// Width below which the navbar collapses into a toggler, in CSS pixels
pub const NAV_COLLAPSE_WIDTH: u32 = 768;

/// A browser window size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Window width
    pub width: u32,
    /// Window height
    pub height: u32,
}

impl Viewport {
    /// Standard desktop window
    pub const DESKTOP: Self = Self::new(1920, 1080);
    /// Oversized desktop window
    pub const LARGE_DESKTOP: Self = Self::new(2560, 1440);
    /// Tablet in portrait orientation
    pub const TABLET: Self = Self::new(768, 1024);
    /// Phone in portrait orientation
    pub const MOBILE: Self = Self::new(375, 667);
    /// Phone in landscape orientation
    pub const MOBILE_LANDSCAPE: Self = Self::new(667, 375);

    /// Create a viewport from explicit dimensions
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether this width collapses the navbar into a toggler
    #[must_use]
    pub const fn is_compact(self) -> bool {
        self.width < NAV_COLLAPSE_WIDTH
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::DESKTOP
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Viewport {
    type Err = ComprobarError;

    /// Parse a preset name such as `mobile`, or a `WIDTHxHEIGHT` pair such
    /// as `1920x1080`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => return Ok(Self::DESKTOP),
            "large-desktop" => return Ok(Self::LARGE_DESKTOP),
            "tablet" => return Ok(Self::TABLET),
            "mobile" => return Ok(Self::MOBILE),
            "mobile-landscape" => return Ok(Self::MOBILE_LANDSCAPE),
            _ => {}
        }
        let invalid = || ComprobarError::InvalidConfig {
            message: format!("expected a preset name or WIDTHxHEIGHT, got '{s}'"),
        };
        let (w, h) = s.split_once('x').ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}
