//! Storage adapter traits.
//!
//! The backing engine is append-only and deduplicates asynchronously: a
//! write is durable once acknowledged but duplicates are never rejected,
//! and a scan may return several physical rows for one logical key. No
//! check-then-insert primitive exists. Implementations live in
//! `meshmon-store`; services in this crate only see these seams.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::owner::OwnerRecord;

/// Append-only log of records sharing a logical-key scheme.
#[async_trait]
pub trait RecordLog<R>: Send + Sync {
    /// Append one record. Durable once `Ok` is returned; never rejects a
    /// record for being a duplicate.
    async fn append(&self, record: R) -> Result<(), StoreError>;

    /// Every physically present record whose logical key equals `key`, in
    /// unspecified order. Zero, one, or many rows per key.
    async fn scan(&self, key: &str) -> Result<Vec<R>, StoreError>;
}

/// Read-only lookup of owner (user) rows for login verification.
#[async_trait]
pub trait OwnerDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<OwnerRecord>, StoreError>;
}

/// Liveness probe for the status endpoint.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}
