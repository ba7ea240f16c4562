//! Bounded retry and timeout decorators for the storage adapter traits.
//!
//! Transient failures are retried here, at the adapter boundary, with
//! exponential backoff; the services above only ever see a `StoreError`
//! once the attempt budget is spent. Every individual operation also runs
//! under a timeout, and a timed-out scan surfaces as
//! [`StoreError::Timeout`] -- never as an empty result.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use meshmon_core::error::StoreError;
use meshmon_core::models::owner::OwnerRecord;
use meshmon_core::store::{OwnerDirectory, RecordLog};

/// Attempt budget, backoff seed, and per-operation timeout.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per operation, including the first.
    pub attempts: u32,
    /// Delay before the second attempt; doubles per retry.
    pub backoff: Duration,
    /// Timeout applied to each individual attempt.
    pub op_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_millis(50),
            op_timeout: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    async fn run<T, F, Fut>(&self, what: &'static str, mut op: F) -> Result<T, StoreError>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T, StoreError>> + Send,
        T: Send,
    {
        let mut delay = self.backoff;
        let mut attempt = 1u32;
        loop {
            let outcome = match tokio::time::timeout(self.op_timeout, op()).await {
                Ok(result) => result,
                Err(_) => Err(StoreError::Timeout),
            };
            match outcome {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.attempts => {
                    tracing::warn!(%err, what, attempt, "transient store failure, retrying");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// [`RecordLog`] decorator applying a [`RetryPolicy`] to every call.
pub struct RetryingLog<R> {
    inner: Arc<dyn RecordLog<R>>,
    policy: RetryPolicy,
}

impl<R> RetryingLog<R> {
    pub fn new(inner: Arc<dyn RecordLog<R>>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl<R> RecordLog<R> for RetryingLog<R>
where
    R: Clone + Send + Sync + 'static,
{
    async fn append(&self, record: R) -> Result<(), StoreError> {
        self.policy
            .run("append", || self.inner.append(record.clone()))
            .await
    }

    async fn scan(&self, key: &str) -> Result<Vec<R>, StoreError> {
        self.policy.run("scan", || self.inner.scan(key)).await
    }
}

/// [`OwnerDirectory`] decorator applying a [`RetryPolicy`] to every call.
pub struct RetryingDirectory {
    inner: Arc<dyn OwnerDirectory>,
    policy: RetryPolicy,
}

impl RetryingDirectory {
    pub fn new(inner: Arc<dyn OwnerDirectory>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl OwnerDirectory for RetryingDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<OwnerRecord>, StoreError> {
        self.policy
            .run("find_by_email", || self.inner.find_by_email(email))
            .await
    }
}
