#![forbid(unsafe_code)]

//! Per-creator selector configuration.

use std::borrow::Cow;

/// Configuration shared by every selector a creator builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Name attached to build and cache events and to `Debug` output.
    /// Default: `"selector"`.
    pub label: Cow<'static, str>,

    /// Emit `selector.hit` / `selector.miss` trace events on every call.
    /// Default: false.
    pub log_cache_events: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            label: Cow::Borrowed("selector"),
            log_cache_events: false,
        }
    }
}

impl SelectorConfig {
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_cache_events(mut self, enabled: bool) -> Self {
        self.log_cache_events = enabled;
        self
    }
}
