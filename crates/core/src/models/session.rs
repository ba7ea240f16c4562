//! Session record model.

use serde::{Deserialize, Serialize};

use crate::resolve::Versioned;
use crate::types::Timestamp;

/// One physical row in the append-only token log.
///
/// `token` is the logical key; several rows may share it (retried appends,
/// racing logins, revocation tombstones). `created_at` doubles as the
/// version column: the greatest value per token reflects current intent.
/// A row is logically invalid once `now >= expires_at`, whether or not the
/// store has physically removed it yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: String,
    pub email: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl Versioned for SessionRecord {
    fn logical_key(&self) -> &str {
        &self.token
    }

    fn version(&self) -> Timestamp {
        self.created_at
    }

    fn fingerprint(&self) -> String {
        serde_json::to_string(self).expect("session record serialization cannot fail")
    }
}
