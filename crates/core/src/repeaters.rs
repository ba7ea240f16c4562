//! Repeater identity registry.

use std::sync::Arc;

use crate::clock::Clock;
use crate::error::CoreError;
use crate::models::repeater::{RepeaterRecord, RepeaterUpdate};
use crate::resolve::resolve_latest;
use crate::store::RecordLog;

/// Keeps repeater identity records logically unique over the append-only
/// log, using the same greatest-version resolution as sessions but with no
/// expiry step.
pub struct RepeaterRegistry {
    repeaters: Arc<dyn RecordLog<RepeaterRecord>>,
    clock: Arc<dyn Clock>,
}

impl RepeaterRegistry {
    pub fn new(repeaters: Arc<dyn RecordLog<RepeaterRecord>>, clock: Arc<dyn Clock>) -> Self {
        Self { repeaters, clock }
    }

    /// Resolve the current record for `id`.
    pub async fn resolve(&self, id: &str) -> Result<RepeaterRecord, CoreError> {
        let records = self.repeaters.scan(id).await?;
        resolve_latest(&records)?.ok_or_else(|| CoreError::NotFound {
            entity: "repeater",
            key: id.to_string(),
        })
    }

    /// Append a new full-snapshot record for `id`.
    ///
    /// Fields absent from `update` are carried over from the current
    /// record, so a concurrent writer that loses the version race never
    /// silently drops fields it did not touch. Creating a record requires
    /// `name`, `public_key`, and `password`; `enabled` defaults to true.
    pub async fn upsert(
        &self,
        id: &str,
        update: RepeaterUpdate,
    ) -> Result<RepeaterRecord, CoreError> {
        let records = self.repeaters.scan(id).await?;
        let current = resolve_latest(&records)?;

        let now = self.clock.now();
        let record = match current {
            Some(current) => RepeaterRecord {
                id: current.id,
                name: update.name.unwrap_or(current.name),
                public_key: update.public_key.unwrap_or(current.public_key),
                password: update.password.unwrap_or(current.password),
                enabled: update.enabled.unwrap_or(current.enabled),
                // Strictly greater than the resolved version, so this
                // snapshot supersedes even within the same millisecond.
                created_at: std::cmp::max(
                    now,
                    current.created_at + chrono::Duration::milliseconds(1),
                ),
            },
            None => RepeaterRecord {
                id: id.to_string(),
                name: require_field(update.name, "name")?,
                public_key: require_field(update.public_key, "public_key")?,
                password: require_field(update.password, "password")?,
                enabled: update.enabled.unwrap_or(true),
                created_at: now,
            },
        };

        if record.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Repeater name must not be empty".to_string(),
            ));
        }

        self.repeaters.append(record.clone()).await?;

        tracing::info!(repeater = %record.id, enabled = record.enabled, "repeater record written");
        Ok(record)
    }
}

/// Unwrap a creation field or report which one is missing.
fn require_field(field: Option<String>, name: &str) -> Result<String, CoreError> {
    field.ok_or_else(|| CoreError::Validation(format!("Missing field for new repeater: {name}")))
}
