//! Handlers for repeater identity records.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use meshmon_core::auth::hash_password;
use meshmon_core::models::repeater::{RepeaterRecord, RepeaterUpdate};
use meshmon_core::types::Timestamp;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthSession;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Repeater representation for API responses.
///
/// The stored record also carries a `password` field -- never expose it.
#[derive(Debug, Serialize)]
pub struct RepeaterResponse {
    pub id: String,
    pub name: String,
    pub public_key: String,
    pub enabled: bool,
    pub created_at: Timestamp,
}

impl From<RepeaterRecord> for RepeaterResponse {
    fn from(record: RepeaterRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            public_key: record.public_key,
            enabled: record.enabled,
            created_at: record.created_at,
        }
    }
}

/// Request body for `PUT /api/repeaters/{id}`. Absent fields are carried
/// over from the current record; all of `name`, `public_key`, and
/// `password` are required when the id is new.
#[derive(Debug, Deserialize)]
pub struct UpsertRepeaterRequest {
    pub name: Option<String>,
    pub public_key: Option<String>,
    pub password: Option<String>,
    pub enabled: Option<bool>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/repeaters/{id}
///
/// Resolve the current record for a repeater id. 404 when no record
/// exists.
pub async fn get_repeater(
    _session: AuthSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<RepeaterResponse>> {
    let record = state.repeaters.resolve(&id).await?;
    Ok(Json(record.into()))
}

/// PUT /api/repeaters/{id}
///
/// Create or update a repeater record. The password, when present, is
/// Argon2-hashed here so the registry only ever stores the hash.
pub async fn upsert_repeater(
    _session: AuthSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpsertRepeaterRequest>,
) -> AppResult<Json<RepeaterResponse>> {
    let password = match input.password {
        Some(plain) => Some(
            hash_password(&plain)
                .map_err(|e| AppError::Internal(format!("password hashing error: {e}")))?,
        ),
        None => None,
    };

    let update = RepeaterUpdate {
        name: input.name,
        public_key: input.public_key,
        password,
        enabled: input.enabled,
    };
    let record = state.repeaters.upsert(&id, update).await?;

    Ok(Json(record.into()))
}
