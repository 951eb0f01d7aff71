//! HTTP API for the portfolio backend.
//!
//! Routes under `/projects` and `/messages` delegate to the `folio` record
//! accessors. Library errors become `{ "error": { "message", "status" } }`
//! bodies; see [`error::ApiError`].

pub mod app;
pub mod config;
pub mod error;
pub mod recaptcha;
pub mod routes;

pub use app::{AppState, router};
pub use config::{Config, Environment};
pub use recaptcha::Recaptcha;
