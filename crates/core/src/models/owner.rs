//! Owner (user) reference record.

/// Read-mostly user row consulted when minting sessions.
///
/// Owned and maintained outside this service; the session layer only ever
/// reads it. `password_hash` is an Argon2id PHC string.
#[derive(Debug, Clone)]
pub struct OwnerRecord {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub active: bool,
    pub access_rights: String,
}
