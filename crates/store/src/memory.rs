//! Embedded append-only record store.
//!
//! Faithful to the engine contract the services are written against:
//! `append` keeps every row including duplicates, `scan` returns whatever
//! is physically present, and logical uniqueness is only established when
//! [`MemoryStore::compact`] runs (normally from the background maintenance
//! loop, on its own schedule). Nothing in the service layer may depend on
//! compaction or sweeping having happened.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use meshmon_core::error::StoreError;
use meshmon_core::models::owner::OwnerRecord;
use meshmon_core::models::repeater::RepeaterRecord;
use meshmon_core::models::session::SessionRecord;
use meshmon_core::resolve::{resolve_latest, Versioned};
use meshmon_core::store::{OwnerDirectory, RecordLog, StoreHealth};
use meshmon_core::types::Timestamp;

/// In-process append-only store for sessions, repeaters, and owner rows.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: Mutex<Vec<SessionRecord>>,
    repeaters: Mutex<Vec<RepeaterRecord>>,
    owners: Mutex<Vec<OwnerRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an owner row. Owner accounts are provisioned out of band; the
    /// services never write them.
    pub fn seed_owner(&self, owner: OwnerRecord) {
        lock(&self.owners).push(owner);
    }

    /// Apply the dedup half of the engine contract: retain only the
    /// authoritative row per logical key. Returns the number of rows
    /// removed.
    pub fn compact(&self) -> usize {
        compact_log(&mut lock(&self.sessions)) + compact_log(&mut lock(&self.repeaters))
    }

    /// Apply the TTL half of the engine contract: physically remove
    /// session rows past their expiry. Rows are removed whole-key -- only
    /// when the key's authoritative record has itself expired -- so a
    /// sweep can never resurrect a superseded record by deleting its
    /// tombstone first. Returns the number of rows removed.
    pub fn sweep_expired(&self, now: Timestamp) -> usize {
        let mut sessions = lock(&self.sessions);
        let before = sessions.len();

        let mut expired_keys: Vec<String> = Vec::new();
        for record in sessions.iter() {
            let key = record.logical_key();
            if expired_keys.iter().any(|k| k == key) {
                continue;
            }
            let group: Vec<SessionRecord> = sessions
                .iter()
                .filter(|r| r.logical_key() == key)
                .cloned()
                .collect();
            if let Ok(Some(current)) = resolve_latest(&group) {
                if current.expires_at <= now {
                    expired_keys.push(key.to_string());
                }
            }
        }

        sessions.retain(|r| !expired_keys.iter().any(|k| k == r.logical_key()));
        before - sessions.len()
    }

    /// Number of physical session rows, duplicates included.
    pub fn session_rows(&self) -> usize {
        lock(&self.sessions).len()
    }

    /// Number of physical repeater rows, duplicates included.
    pub fn repeater_rows(&self) -> usize {
        lock(&self.repeaters).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().expect("store lock poisoned")
}

/// Retain the authoritative row per key, insertion order of first
/// appearance. Keys whose rows cannot be resolved are left untouched.
fn compact_log<R>(rows: &mut Vec<R>) -> usize
where
    R: Versioned + Clone + PartialEq,
{
    let before = rows.len();
    let snapshot = std::mem::take(rows);

    let mut keys: Vec<&str> = Vec::new();
    for record in &snapshot {
        if !keys.contains(&record.logical_key()) {
            keys.push(record.logical_key());
        }
    }

    for key in &keys {
        let group: Vec<R> = snapshot
            .iter()
            .filter(|r| r.logical_key() == *key)
            .cloned()
            .collect();
        match resolve_latest(&group) {
            Ok(Some(current)) => rows.push(current),
            _ => rows.extend(group),
        }
    }

    before - rows.len()
}

#[async_trait]
impl RecordLog<SessionRecord> for MemoryStore {
    async fn append(&self, record: SessionRecord) -> Result<(), StoreError> {
        lock(&self.sessions).push(record);
        Ok(())
    }

    async fn scan(&self, key: &str) -> Result<Vec<SessionRecord>, StoreError> {
        Ok(lock(&self.sessions)
            .iter()
            .filter(|r| r.logical_key() == key)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RecordLog<RepeaterRecord> for MemoryStore {
    async fn append(&self, record: RepeaterRecord) -> Result<(), StoreError> {
        lock(&self.repeaters).push(record);
        Ok(())
    }

    async fn scan(&self, key: &str) -> Result<Vec<RepeaterRecord>, StoreError> {
        Ok(lock(&self.repeaters)
            .iter()
            .filter(|r| r.logical_key() == key)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OwnerDirectory for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<OwnerRecord>, StoreError> {
        Ok(lock(&self.owners)
            .iter()
            .find(|o| o.email == email)
            .cloned())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
