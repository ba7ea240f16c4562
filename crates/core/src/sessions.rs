//! Session issuance, validation, and revocation.

use std::sync::Arc;

use crate::auth;
use crate::clock::Clock;
use crate::error::CoreError;
use crate::models::owner::OwnerRecord;
use crate::models::session::SessionRecord;
use crate::resolve::resolve_latest;
use crate::store::{OwnerDirectory, RecordLog};
use crate::token;

/// Issues, validates, and revokes opaque session tokens over the
/// append-only token log.
///
/// Every check scans the log fresh and resolves the greatest-version row;
/// no validity is cached between calls, so a superseding write (re-issue,
/// revocation) changes the outcome of the very next check.
pub struct SessionService {
    sessions: Arc<dyn RecordLog<SessionRecord>>,
    owners: Arc<dyn OwnerDirectory>,
    clock: Arc<dyn Clock>,
    session_ttl: chrono::Duration,
}

impl SessionService {
    pub fn new(
        sessions: Arc<dyn RecordLog<SessionRecord>>,
        owners: Arc<dyn OwnerDirectory>,
        clock: Arc<dyn Clock>,
        session_ttl: chrono::Duration,
    ) -> Self {
        Self {
            sessions,
            owners,
            clock,
            session_ttl,
        }
    }

    /// Authenticate credentials against the owner directory and mint a
    /// session on success.
    ///
    /// Unknown owner, inactive account, and wrong password all collapse to
    /// `AuthFailed`; which case occurred is not observable by the caller.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(SessionRecord, OwnerRecord), CoreError> {
        let owner = self
            .owners
            .find_by_email(email)
            .await?
            .ok_or(CoreError::AuthFailed)?;

        if !owner.active {
            return Err(CoreError::AuthFailed);
        }

        let password_matches = auth::verify_password(password, &owner.password_hash)
            .map_err(|e| CoreError::Internal(format!("password verification error: {e}")))?;
        if !password_matches {
            return Err(CoreError::AuthFailed);
        }

        let record = self.issue(&owner.email).await?;
        Ok((record, owner))
    }

    /// Mint a new session record for `email`: fresh random token,
    /// `created_at = now`, `expires_at = now + ttl`, one durable append.
    ///
    /// No read-before-write; token uniqueness is probabilistic by
    /// construction.
    pub async fn issue(&self, email: &str) -> Result<SessionRecord, CoreError> {
        let now = self.clock.now();
        let record = SessionRecord {
            token: token::generate(),
            email: email.to_string(),
            created_at: now,
            expires_at: now + self.session_ttl,
        };
        self.sessions.append(record.clone()).await?;

        tracing::info!(email, expires_at = %record.expires_at, "issued session token");
        Ok(record)
    }

    /// Resolve the current logical state of `token_value` and decide
    /// validity.
    ///
    /// Scans all physical rows for the token, picks the greatest-version
    /// row, then compares `now` against its `expires_at`. The expiry check
    /// depends only on record content -- never on whether the store has
    /// physically deleted anything -- so deletion lag cannot extend a
    /// session's validity window.
    pub async fn check(&self, token_value: &str) -> Result<SessionRecord, CoreError> {
        if !token::is_well_formed(token_value) {
            return Err(CoreError::NotFound {
                entity: "session",
                key: token_value.to_string(),
            });
        }

        let records = self.sessions.scan(token_value).await?;
        let Some(current) = resolve_latest(&records)? else {
            return Err(CoreError::NotFound {
                entity: "session",
                key: token_value.to_string(),
            });
        };

        if self.clock.now() >= current.expires_at {
            return Err(CoreError::Expired {
                expired_at: current.expires_at,
            });
        }

        Ok(current)
    }

    /// Revoke a token by appending a superseding, already-expired record.
    ///
    /// The tombstone's `created_at` is strictly greater than any version
    /// observed for the token, so the max-version rule resolves it as the
    /// current record even while older copies are still physically present.
    /// Revoking an unknown token is a no-op.
    pub async fn revoke(&self, token_value: &str) -> Result<(), CoreError> {
        let records = self.sessions.scan(token_value).await?;
        let Some(current) = resolve_latest(&records)? else {
            return Ok(());
        };

        let now = self.clock.now();
        let tombstone = SessionRecord {
            token: current.token.clone(),
            email: current.email.clone(),
            created_at: std::cmp::max(now, current.created_at + chrono::Duration::milliseconds(1)),
            expires_at: now,
        };
        self.sessions.append(tombstone).await?;

        tracing::info!(email = %current.email, "revoked session token");
        Ok(())
    }
}
