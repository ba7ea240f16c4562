//! Client-side resolution of duplicate-keyed records.
//!
//! The store retains every appended record until its background merge runs,
//! so a scan for one logical key can return zero, one, or many physical
//! rows. [`resolve_latest`] reduces such a scan to the single authoritative
//! record: greatest version wins, with a deterministic content tiebreak so
//! every worker resolves the same winner from the same rows.

use crate::error::CoreError;
use crate::types::Timestamp;

/// A record that competes for its logical key by version.
pub trait Versioned {
    /// The identifying field shared by all physical copies (token, repeater id).
    fn logical_key(&self) -> &str;

    /// The version column; the greatest value per key is authoritative.
    fn version(&self) -> Timestamp;

    /// Deterministic serialized form, used only to break version ties.
    fn fingerprint(&self) -> String;
}

/// Reduce scanned rows to the current logical record for their key.
///
/// Returns `Ok(None)` for an empty scan. Among rows sharing the greatest
/// version, identical fingerprints are duplicate appends of one write and
/// collapse silently; divergent content picks the lexicographically
/// smallest fingerprint and logs a warning, since duplicate-version writes
/// are not supposed to disagree. A tie the fingerprint cannot break is a
/// `Conflict`.
///
/// Pure and synchronous: same rows in, same winner out, on every call.
pub fn resolve_latest<R>(records: &[R]) -> Result<Option<R>, CoreError>
where
    R: Versioned + Clone + PartialEq,
{
    let Some(max_version) = records.iter().map(|r| r.version()).max() else {
        return Ok(None);
    };

    let mut candidates: Vec<&R> = records
        .iter()
        .filter(|r| r.version() == max_version)
        .collect();
    if candidates.len() == 1 {
        return Ok(Some(candidates[0].clone()));
    }

    candidates.sort_by_key(|r| r.fingerprint());
    let winner = candidates[0];

    // Rows that are not byte-for-byte duplicates of the winner.
    let divergent: Vec<&R> = candidates
        .iter()
        .copied()
        .filter(|r| *r != winner)
        .collect();
    if !divergent.is_empty() {
        if divergent
            .iter()
            .any(|r| r.fingerprint() == winner.fingerprint())
        {
            return Err(CoreError::Conflict(format!(
                "irreconcilable version tie for key {}",
                winner.logical_key()
            )));
        }
        tracing::warn!(
            key = winner.logical_key(),
            version = %max_version,
            candidates = candidates.len(),
            "version tie between divergent records; resolved by smallest fingerprint"
        );
    }

    Ok(Some(winner.clone()))
}
