//! Cookie consent notice controller.
//!
//! Per page load the notice moves through:
//!
//! ```text
//! Pending --[reveal delay, no consent]--> Visible --[accept]--> Dismissing
//!         --[dismiss delay]--> Dismissed
//! Pending --[consent cookie present]--> Suppressed
//! ```
//!
//! Timers are fire-and-forget: once scheduled they always run.

#[cfg(test)]
#[path = "consent_test.rs"]
mod consent_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::config::NoticeConfig;
use crate::consts::CONSENT_ACCEPTED;
use crate::host::{CookieJar, Dom, Timers, log_failure};
use crate::jar::{get_cookie, set_cookie};

/// Where the notice is in its page-load lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoticeState {
    /// Not yet shown; the reveal timer may be pending.
    #[default]
    Pending,
    /// Revealed and waiting for the user.
    Visible,
    /// Accepted; the dismissal transition is playing.
    Dismissing,
    /// Accepted and taken out of layout.
    Dismissed,
    /// Consent was already given, hidden without a transition.
    Suppressed,
}

impl NoticeState {
    /// Whether no further transitions can happen.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Dismissed | Self::Suppressed)
    }
}

pub struct ConsentNotice<J, D, T> {
    config: Rc<NoticeConfig>,
    jar: J,
    dom: Rc<D>,
    timers: T,
    state: Rc<Cell<NoticeState>>,
}

impl<J, D, T> ConsentNotice<J, D, T>
where
    J: CookieJar,
    D: Dom + 'static,
    T: Timers,
{
    pub fn new(config: NoticeConfig, jar: J, dom: Rc<D>, timers: T) -> Self {
        Self {
            config: Rc::new(config),
            jar,
            dom,
            timers,
            state: Rc::new(Cell::new(NoticeState::Pending)),
        }
    }

    #[must_use]
    pub fn state(&self) -> NoticeState {
        self.state.get()
    }

    /// Whether the consent cookie currently holds the accepted value.
    #[must_use]
    pub fn has_consent(&self) -> bool {
        get_cookie(&self.jar, &self.config.cookie_name).as_deref() == Some(CONSENT_ACCEPTED)
    }

    /// Document-ready handler: hide the notice at once when consent exists,
    /// otherwise reveal it after the reveal delay.
    pub fn on_ready(&self) {
        let id = &self.config.element_id;
        if self.has_consent() {
            log::debug!("consent present, suppressing #{id}");
            log_failure("hide notice", self.dom.hide(id));
            self.state.set(NoticeState::Suppressed);
            return;
        }

        let config = Rc::clone(&self.config);
        let dom = Rc::clone(&self.dom);
        let state = Rc::clone(&self.state);
        self.timers.schedule(
            self.config.reveal_delay(),
            Box::new(move || {
                log_failure("reveal notice", dom.add_class(&config.element_id, &config.visible_class));
                if state.get() == NoticeState::Pending {
                    state.set(NoticeState::Visible);
                }
            }),
        );
    }

    /// Record consent and play the dismissal: mark the notice accepted now,
    /// hide it once the dismiss delay has passed.
    pub fn accept(&self) {
        set_cookie(&self.jar, &self.config.cookie_name, CONSENT_ACCEPTED, self.config.expiry_days);
        log_failure(
            "mark notice accepted",
            self.dom.add_class(&self.config.element_id, &self.config.accepted_class),
        );
        self.state.set(NoticeState::Dismissing);

        let config = Rc::clone(&self.config);
        let dom = Rc::clone(&self.dom);
        let state = Rc::clone(&self.state);
        self.timers.schedule(
            self.config.dismiss_delay(),
            Box::new(move || {
                log_failure("hide notice", dom.hide(&config.element_id));
                state.set(NoticeState::Dismissed);
            }),
        );
    }
}
