//! Domain core for the meshmon repeater telemetry backend.
//!
//! Everything in this crate is independent of the HTTP layer. The session
//! service and repeater registry work against the storage adapter traits in
//! [`store`], which model an append-only log with eventual deduplication:
//! duplicate writes are never rejected and physical deletion lags behind
//! logical expiry, so all validity decisions are computed from freshly
//! scanned record content.

pub mod auth;
pub mod clock;
pub mod error;
pub mod models;
pub mod repeaters;
pub mod resolve;
pub mod sessions;
pub mod store;
pub mod token;
pub mod types;
