//! Site configuration.
//!
//! Locale prefix and UI thresholds come from the embedding site. Configuration
//! can be loaded from environment variables or constructed programmatically.

use std::env;

/// Locale information used to build every fragment path.
#[derive(Clone, Debug, Default)]
pub struct Locale {
    /// Path prefix for the active locale, e.g. `/de` (empty for the default
    /// locale).
    pub prefix: String,
}

/// Site-level configuration consumed by decorators.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub locale: Locale,
    /// Viewport width at or below which clicks toggle menus instead of
    /// navigating.
    pub mobile_breakpoint: u32,
    /// OS-level dark-mode preference, used when no color scheme has been
    /// persisted yet.
    pub prefers_dark: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            mobile_breakpoint: 1280,
            prefers_dark: false,
        }
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `SITE_LOCALE_PREFIX`: locale path prefix (default: empty)
    /// - `SITE_MOBILE_BREAKPOINT`: mobile toggle threshold in px (default: 1280)
    /// - `SITE_PREFERS_DARK`: set to "1" when the OS prefers a dark scheme
    #[must_use]
    pub fn from_env() -> Self {
        let prefix = env::var("SITE_LOCALE_PREFIX").unwrap_or_default();
        let mobile_breakpoint = env::var("SITE_MOBILE_BREAKPOINT")
            .ok()
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(1280)
            .max(1);
        let prefers_dark = env::var("SITE_PREFERS_DARK").ok().as_deref() == Some("1");
        Self {
            locale: Locale { prefix },
            mobile_breakpoint,
            prefers_dark,
        }
    }

    /// Prefix a site-relative fragment path with the locale prefix.
    #[must_use]
    pub fn fragment_path(&self, path: &str) -> String {
        format!("{}{}", self.locale.prefix, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_path_applies_locale_prefix() {
        let config = SiteConfig {
            locale: Locale {
                prefix: "/de".to_string(),
            },
            ..SiteConfig::default()
        };
        assert_eq!(config.fragment_path("/fragments/nav/header"), "/de/fragments/nav/header");
    }

    #[test]
    fn default_breakpoint_matches_desktop_cutoff() {
        assert_eq!(SiteConfig::default().mobile_breakpoint, 1280);
    }
}
