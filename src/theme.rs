//! Light/dark theme selection.
//!
//! The chosen theme is written verbatim to the root's `data-theme`
//! attribute, including `system`; stylesheets pair `[data-theme="system"]`
//! with `prefers-color-scheme` to pick the concrete colors.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ThemeConfig;
use crate::error::ThemeParseError;
use crate::host::{ColorScheme, Dom, KeyValueStore, log_failure};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the environment's color-scheme preference.
    #[default]
    System,
}

impl Theme {
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::System];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(ThemeParseError(other.to_owned())),
        }
    }
}

/// Concrete theme the environment asks for.
#[must_use]
pub fn resolve_system_theme(scheme: &impl ColorScheme) -> Theme {
    if scheme.prefers_dark() { Theme::Dark } else { Theme::Light }
}

pub struct ThemeController<S, D> {
    config: ThemeConfig,
    storage: S,
    dom: D,
}

impl<S: KeyValueStore, D: Dom> ThemeController<S, D> {
    pub fn new(config: ThemeConfig, storage: S, dom: D) -> Self {
        Self { config, storage, dom }
    }

    /// The persisted preference, or [`Theme::System`] when there is none.
    ///
    /// Unreadable storage and unrecognized values count as "none".
    #[must_use]
    pub fn stored(&self) -> Theme {
        let raw = match self.storage.get(&self.config.storage_key) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("theme read: {e}");
                None
            }
        };
        match raw.as_deref().map(str::parse::<Theme>) {
            Some(Ok(theme)) => theme,
            Some(Err(e)) => {
                log::warn!("ignoring stored {e}");
                Theme::System
            }
            None => Theme::System,
        }
    }

    /// Apply the persisted preference. Runs once at script load.
    pub fn init(&self) {
        let theme = self.stored();
        log::debug!("initial theme {theme}");
        self.apply(theme);
    }

    /// Set the root attribute, persist the choice and move the active marker
    /// to the matching button.
    pub fn apply(&self, theme: Theme) {
        log_failure(
            "set theme attribute",
            self.dom.set_root_attribute(&self.config.root_attribute, theme.as_str()),
        );
        log_failure("persist theme", self.storage.set(&self.config.storage_key, theme.as_str()));
        self.mark_active(theme);
    }

    fn mark_active(&self, theme: Theme) {
        let group = &self.config.button_class;
        let values = self.dom.group_values(group, &self.config.button_attribute);
        for (index, value) in values.iter().enumerate() {
            let on = value.as_deref() == Some(theme.as_str());
            log_failure(
                "mark theme button",
                self.dom.set_group_class(group, index, &self.config.active_class, on),
            );
        }
    }

    /// Click handler for a theme button, given the clicked button's own
    /// theme attribute value.
    ///
    /// Buttons without a recognizable theme value are ignored.
    pub fn on_button_click(&self, value: Option<&str>) {
        match value.map(str::parse::<Theme>) {
            Some(Ok(theme)) => self.apply(theme),
            Some(Err(e)) => log::warn!("theme button: {e}"),
            None => log::warn!("theme button has no {}", self.config.button_attribute),
        }
    }

    /// Handler for changes to the environment's color-scheme preference.
    ///
    /// Only the root attribute is rewritten, and only while `system` is
    /// applied; stored preference and buttons are left alone.
    pub fn on_system_change(&self) {
        if self.current() == Some(Theme::System) {
            log_failure(
                "refresh system theme",
                self.dom.set_root_attribute(&self.config.root_attribute, Theme::System.as_str()),
            );
        }
    }

    /// Theme currently on the root element.
    #[must_use]
    pub fn current(&self) -> Option<Theme> {
        match self.dom.root_attribute(&self.config.root_attribute)?.parse() {
            Ok(theme) => Some(theme),
            Err(_) => None,
        }
    }

    /// Applied theme with [`Theme::System`] resolved against `scheme`.
    #[must_use]
    pub fn effective(&self, scheme: &impl ColorScheme) -> Theme {
        match self.current().unwrap_or_default() {
            Theme::System => resolve_system_theme(scheme),
            theme => theme,
        }
    }
}
