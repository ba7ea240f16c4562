//! Background merge and TTL sweep for the embedded store.
//!
//! Spawns as a long-running task that periodically applies the engine
//! contract: collapse duplicate-keyed rows to their authoritative record,
//! then physically remove expired sessions. Runs on a fixed interval until
//! cancelled. The service layer stays correct whether or not this loop has
//! ever run; the loop only bounds physical growth.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use meshmon_core::clock::Clock;

use crate::memory::MemoryStore;

/// Run the maintenance loop until `cancel` is triggered.
///
/// Compaction runs before the sweep in each pass so expired tombstones are
/// already the only row for their key by the time rows are removed.
pub async fn run(
    store: Arc<MemoryStore>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "store maintenance job started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("store maintenance job stopping");
                break;
            }
            _ = ticker.tick() => {
                let merged = store.compact();
                let swept = store.sweep_expired(clock.now());
                if merged > 0 || swept > 0 {
                    tracing::debug!(merged, swept, "store maintenance pass");
                }
            }
        }
    }
}
