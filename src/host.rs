//! Browser capabilities the controllers are written against.
//!
//! DESIGN
//! ======
//! Nothing in the controllers touches `window` or `document` directly. Each
//! capability is a trait so the same logic runs against `web-sys` in the
//! browser (see `web`) and against in-memory fakes in tests. Everything is
//! single-threaded; implementations use interior mutability and take `&self`.

use std::rc::Rc;
use std::time::Duration;

use crate::error::HostError;

/// Document access: the notice element, the root element and the theme
/// button group.
pub trait Dom {
    /// Add `class` to the element with id `element_id`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::MissingElement`] if no such element exists.
    fn add_class(&self, element_id: &str, class: &str) -> Result<(), HostError>;

    /// Take the element with id `element_id` out of layout.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::MissingElement`] if no such element exists.
    fn hide(&self, element_id: &str) -> Result<(), HostError>;

    /// Set `name` on the document root element.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::NoDocument`] without a root element.
    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), HostError>;

    /// Current value of `name` on the document root element.
    fn root_attribute(&self, name: &str) -> Option<String>;

    /// Value of `attribute` for every element carrying class `group`, in
    /// document order. Members without the attribute yield `None`.
    fn group_values(&self, group: &str, attribute: &str) -> Vec<Option<String>>;

    /// Add (`on`) or remove `class` on the `index`-th member of `group`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::MissingMember`] if `index` is out of range.
    fn set_group_class(&self, group: &str, index: usize, class: &str, on: bool) -> Result<(), HostError>;
}

/// The page's cookie string, as `document.cookie` exposes it.
pub trait CookieJar {
    /// All visible cookies as `a=1; b=2`.
    fn cookies(&self) -> String;

    /// Store one `name=value; attr...` record.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Cookie`] when the browser refuses the write.
    fn write(&self, record: &str) -> Result<(), HostError>;
}

/// Persistent string key-value storage (`localStorage`).
pub trait KeyValueStore {
    /// # Errors
    ///
    /// Returns [`HostError::Storage`] when storage is inaccessible.
    fn get(&self, key: &str) -> Result<Option<String>, HostError>;

    /// # Errors
    ///
    /// Returns [`HostError::Storage`] when storage is inaccessible or full.
    fn set(&self, key: &str, value: &str) -> Result<(), HostError>;
}

/// One-shot timers. Scheduled tasks cannot be cancelled.
pub trait Timers {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// The environment's color-scheme preference.
pub trait ColorScheme {
    fn prefers_dark(&self) -> bool;
}

impl<T: Dom + ?Sized> Dom for Rc<T> {
    fn add_class(&self, element_id: &str, class: &str) -> Result<(), HostError> {
        (**self).add_class(element_id, class)
    }

    fn hide(&self, element_id: &str) -> Result<(), HostError> {
        (**self).hide(element_id)
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), HostError> {
        (**self).set_root_attribute(name, value)
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        (**self).root_attribute(name)
    }

    fn group_values(&self, group: &str, attribute: &str) -> Vec<Option<String>> {
        (**self).group_values(group, attribute)
    }

    fn set_group_class(&self, group: &str, index: usize, class: &str, on: bool) -> Result<(), HostError> {
        (**self).set_group_class(group, index, class, on)
    }
}

impl<T: CookieJar + ?Sized> CookieJar for Rc<T> {
    fn cookies(&self) -> String {
        (**self).cookies()
    }

    fn write(&self, record: &str) -> Result<(), HostError> {
        (**self).write(record)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, HostError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), HostError> {
        (**self).set(key, value)
    }
}

impl<T: Timers + ?Sized> Timers for Rc<T> {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        (**self).schedule(delay, task);
    }
}

impl<T: ColorScheme + ?Sized> ColorScheme for Rc<T> {
    fn prefers_dark(&self) -> bool {
        (**self).prefers_dark()
    }
}

/// Log a failed host call at `warn` and drop it.
pub(crate) fn log_failure(action: &str, result: Result<(), HostError>) {
    if let Err(e) = result {
        log::warn!("{action}: {e}");
    }
}
