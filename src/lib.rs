//! # site-prefs
//!
//! Page-level preference controllers compiled to WebAssembly: the cookie
//! consent notice and the light/dark theme toggle.
//!
//! Both controllers are written against the capability traits in [`host`],
//! so all of their behavior runs natively under test. The `hydrate` feature
//! adds the `web-sys` implementations and the WASM entry point.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`consent`] | Consent notice controller and its lifecycle states |
//! | [`theme`] | [`theme::Theme`] and the theme controller |
//! | [`jar`] | Cookie encoding and lookup |
//! | [`host`] | DOM, cookie, storage, timer and color-scheme traits |
//! | [`config`] | Page configuration with defaults |
//! | [`consts`] | Storage keys, class names and transition timings |
//! | [`error`] | Error types |
//! | `web` | Browser bindings and entry point (`hydrate` only) |

pub mod config;
pub mod consent;
pub mod consts;
pub mod error;
pub mod host;
pub mod jar;
pub mod theme;

#[cfg(feature = "hydrate")]
pub mod web;

#[cfg(test)]
mod testing;
