//! Page configuration with defaults for every field.
//!
//! A page may override any subset of names or timings by embedding JSON in
//! `<script id="site-prefs-config" type="application/json">`. Missing fields
//! fall back to [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::Deserialize;

use crate::consts::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub notice: NoticeConfig,
    pub theme: ThemeConfig,
}

/// Names and timings used by [`crate::consent::ConsentNotice`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NoticeConfig {
    pub element_id: String,
    pub cookie_name: String,
    pub expiry_days: u32,
    pub accepted_class: String,
    pub visible_class: String,
    pub reveal_delay_ms: u64,
    pub dismiss_delay_ms: u64,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            element_id: NOTICE_ELEMENT_ID.to_owned(),
            cookie_name: CONSENT_COOKIE.to_owned(),
            expiry_days: CONSENT_EXPIRY_DAYS,
            accepted_class: NOTICE_ACCEPTED_CLASS.to_owned(),
            visible_class: NOTICE_VISIBLE_CLASS.to_owned(),
            reveal_delay_ms: NOTICE_REVEAL_DELAY_MS,
            dismiss_delay_ms: NOTICE_DISMISS_DELAY_MS,
        }
    }
}

impl NoticeConfig {
    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    #[must_use]
    pub fn dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.dismiss_delay_ms)
    }
}

/// Names used by [`crate::theme::ThemeController`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub root_attribute: String,
    pub button_class: String,
    pub button_attribute: String,
    pub active_class: String,
    pub dark_query: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: THEME_STORAGE_KEY.to_owned(),
            root_attribute: THEME_ROOT_ATTRIBUTE.to_owned(),
            button_class: THEME_BUTTON_CLASS.to_owned(),
            button_attribute: THEME_BUTTON_ATTRIBUTE.to_owned(),
            active_class: THEME_ACTIVE_CLASS.to_owned(),
            dark_query: DARK_SCHEME_QUERY.to_owned(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate a JSON config. Absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for empty names or a cookie lifetime outside
    /// 1..=400 days.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("notice.element_id", &self.notice.element_id),
            ("notice.cookie_name", &self.notice.cookie_name),
            ("notice.accepted_class", &self.notice.accepted_class),
            ("notice.visible_class", &self.notice.visible_class),
            ("theme.storage_key", &self.theme.storage_key),
            ("theme.root_attribute", &self.theme.root_attribute),
            ("theme.button_class", &self.theme.button_class),
            ("theme.button_attribute", &self.theme.button_attribute),
            ("theme.active_class", &self.theme.active_class),
            ("theme.dark_query", &self.theme.dark_query),
        ];
        if let Some(&(field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Invalid { field, reason: "must not be empty" });
        }
        if self.notice.cookie_name.contains(['=', ';', ' ']) {
            return Err(ConfigError::Invalid {
                field: "notice.cookie_name",
                reason: "must not contain '=', ';' or spaces",
            });
        }
        if self.notice.expiry_days == 0 {
            return Err(ConfigError::Invalid { field: "notice.expiry_days", reason: "must be at least 1" });
        }
        if self.notice.expiry_days > MAX_CONSENT_EXPIRY_DAYS {
            return Err(ConfigError::Invalid { field: "notice.expiry_days", reason: "must be at most 400" });
        }
        Ok(())
    }
}
