//! # API Module
//!
//! HTTP endpoints served by the local callback server during the
//! authorization-code flow.
//!
//! - [`callback`] - Receives Spotify's redirect and records the authorization
//!   code (or the denial) for the waiting code provider. Callbacks whose
//!   `state` does not match the pending request are ignored.
//! - [`health`] - Returns status, version and whether the redirect is still
//!   awaited, handy for checking that the server is up before opening the
//!   browser.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use playsplit::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health))
//!     .layer(Extension(pending));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
