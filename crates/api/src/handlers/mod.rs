//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the services in `meshmon-core` and map errors via
//! [`crate::error::AppError`].

pub mod auth;
pub mod repeaters;
pub mod status;
