//! Error types for host capabilities, configuration and theme parsing.

/// Failure reported by a browser capability.
///
/// Controllers log these and keep going; none of them reach the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// No element with the given id exists in the document.
    #[error("element #{0} not found")]
    MissingElement(String),

    /// A member index was past the end of an element group.
    #[error("no element at index {index} in group .{group}")]
    MissingMember { group: String, index: usize },

    /// The document has no root element or no window is available.
    #[error("document unavailable")]
    NoDocument,

    /// Local storage rejected a read or write.
    #[error("storage failed: {0}")]
    Storage(String),

    /// The cookie jar rejected a write.
    #[error("cookie write failed: {0}")]
    Cookie(String),

    /// A DOM mutation threw.
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

/// Errors produced while loading a [`crate::config::SiteConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON could not be deserialized.
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the controllers cannot work with.
    #[error("invalid config: {field} {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// A string that is not one of `light`, `dark` or `system`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme: {0:?}")]
pub struct ThemeParseError(pub String);
