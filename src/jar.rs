//! Reading and writing single cookies through a [`CookieJar`].

#[cfg(test)]
#[path = "jar_test.rs"]
mod jar_test;

use cookie::Cookie;
use time::OffsetDateTime;

use crate::host::{CookieJar, log_failure};

/// The instant `days` whole days after `now`, clamped to the last
/// representable date.
#[must_use]
pub fn expiry_after(now: OffsetDateTime, days: u32) -> OffsetDateTime {
    now.saturating_add(time::Duration::days(i64::from(days)))
}

/// Format a root-path cookie record expiring at `expires`, e.g.
/// `cookie_accepted=true; Path=/; Expires=Tue, 19 Oct 2027 08:00:00 GMT`.
#[must_use]
pub fn encode_cookie(name: &str, value: &str, expires: OffsetDateTime) -> String {
    Cookie::build((name, value)).path("/").expires(expires).build().to_string()
}

/// Write `name=value` at path `/`, expiring `days` days from now.
///
/// A refused write is logged and otherwise ignored, the same as the browser
/// does when cookies are disabled.
pub fn set_cookie(jar: &impl CookieJar, name: &str, value: &str, days: u32) {
    let record = encode_cookie(name, value, expiry_after(OffsetDateTime::now_utc(), days));
    log::debug!("set cookie {record}");
    log_failure("cookie write", jar.write(&record));
}

/// Find `name` in a `document.cookie` style string.
///
/// Segments are split on `;` and stripped of leading spaces, so both
/// `a=1;b=2` and `a=1; b=2` work. Returns the value of the first match.
#[must_use]
pub fn read_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    let prefix = format!("{name}=");
    header
        .split(';')
        .map(|segment| segment.trim_start_matches(' '))
        .find_map(|segment| segment.strip_prefix(prefix.as_str()))
}

/// Current value of cookie `name`, if the jar holds one.
#[must_use]
pub fn get_cookie(jar: &impl CookieJar, name: &str) -> Option<String> {
    read_cookie(&jar.cookies(), name).map(str::to_owned)
}
