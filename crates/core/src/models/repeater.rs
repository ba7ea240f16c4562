//! Repeater identity record model and update DTO.

use serde::{Deserialize, Serialize};

use crate::resolve::Versioned;
use crate::types::Timestamp;

/// One physical row in the append-only repeater log.
///
/// `id` is the logical key. Unlike sessions there is no expiry: a record is
/// live until superseded by a newer row with the same `id`. Every write is
/// a full field snapshot; the store has no partial-update primitive.
///
/// `password` holds whatever secret the writer supplied (the HTTP layer
/// hashes it first) -- never serialize this field into API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeaterRecord {
    pub id: String,
    pub name: String,
    pub public_key: String,
    pub password: String,
    pub enabled: bool,
    pub created_at: Timestamp,
}

/// Fields for an upsert. Absent fields are carried over from the current
/// record so a write never drops what it did not intend to touch.
#[derive(Debug, Clone, Default)]
pub struct RepeaterUpdate {
    pub name: Option<String>,
    pub public_key: Option<String>,
    pub password: Option<String>,
    pub enabled: Option<bool>,
}

impl Versioned for RepeaterRecord {
    fn logical_key(&self) -> &str {
        &self.id
    }

    fn version(&self) -> Timestamp {
        self.created_at
    }

    fn fingerprint(&self) -> String {
        serde_json::to_string(self).expect("repeater record serialization cannot fail")
    }
}
