//! Shared names and timings for the page controllers.
//!
//! The delays must match the CSS transitions on `cookie-visible` and
//! `cookie-accepted`; change them together.

// ── Consent notice ──────────────────────────────────────────────

/// Id of the cookie notice element.
pub const NOTICE_ELEMENT_ID: &str = "cookieNotice";

/// Cookie carrying the consent flag.
pub const CONSENT_COOKIE: &str = "cookie_accepted";

/// Value stored in [`CONSENT_COOKIE`] once the user accepts.
pub const CONSENT_ACCEPTED: &str = "true";

/// Lifetime of the consent cookie, in days.
pub const CONSENT_EXPIRY_DAYS: u32 = 365;

/// Longest cookie lifetime accepted from config. Browsers cap `Expires`
/// at 400 days anyway.
pub const MAX_CONSENT_EXPIRY_DAYS: u32 = 400;

/// Class that starts the dismissal transition.
pub const NOTICE_ACCEPTED_CLASS: &str = "cookie-accepted";

/// Class that reveals the notice.
pub const NOTICE_VISIBLE_CLASS: &str = "cookie-visible";

/// Delay before an unaccepted notice is revealed, so it doesn't flash in
/// while the page settles.
pub const NOTICE_REVEAL_DELAY_MS: u64 = 1000;

/// Delay between marking the notice accepted and hiding it.
pub const NOTICE_DISMISS_DELAY_MS: u64 = 300;

/// Attribute that marks an accept button inside the notice.
pub const NOTICE_ACCEPT_ATTRIBUTE: &str = "data-cookie-accept";

// ── Theme ───────────────────────────────────────────────────────

/// Local storage key for the theme preference.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Attribute set on the document root.
pub const THEME_ROOT_ATTRIBUTE: &str = "data-theme";

/// Class shared by every theme-selection button.
pub const THEME_BUTTON_CLASS: &str = "theme-btn";

/// Attribute naming the theme a button selects.
pub const THEME_BUTTON_ATTRIBUTE: &str = "data-theme";

/// Class marking the button of the applied theme.
pub const THEME_ACTIVE_CLASS: &str = "active";

/// Media query reporting a dark system preference.
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

// ── Bootstrapping ───────────────────────────────────────────────

/// Id of the optional `<script type="application/json">` holding a
/// [`crate::config::SiteConfig`].
pub const CONFIG_ELEMENT_ID: &str = "site-prefs-config";
