//! Authentication middleware extractors.
//!
//! - [`auth::AuthSession`] -- Resolves the `x-api-token` header to an
//!   authenticated session on every request.

pub mod auth;
