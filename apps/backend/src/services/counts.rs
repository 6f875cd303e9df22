//! Per-group participant counters.
//!
//! `increment` is the only write path and the only operation in the system
//! that needs cross-request ordering. It never issues a blind
//! read-then-write: every write is conditional on the value it read, and a
//! lost race is retried.

use std::time::Duration;

use rand::Rng;
use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::adapters::group_counts_sea as counts_adapter;
use crate::domain::Group;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;

/// Optimistic-retry policy for counter increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountStore {
    max_attempts: u32,
    max_backoff: Duration,
}

impl Default for CountStore {
    fn default() -> Self {
        Self {
            max_attempts: 64,
            max_backoff: Duration::from_millis(20),
        }
    }
}

fn stored_count(raw: i64) -> Result<u64, DomainError> {
    u64::try_from(raw).map_err(|_| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            "group counter is negative",
        )
    })
}

impl CountStore {
    pub fn new(max_attempts: u32, max_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            max_backoff,
        }
    }

    /// Current count for `group`; a group never incremented reads as 0.
    pub async fn read<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        group: Group,
    ) -> Result<u64, DomainError> {
        match counts_adapter::find_by_group(conn, group.as_str())
            .await
            .map_err(map_db_err)?
        {
            Some(row) => stored_count(row.count),
            None => Ok(0),
        }
    }

    /// Atomically add one to `group` and return the new value.
    ///
    /// Each attempt reads the current row and writes `current + 1` only if the
    /// row still holds `current` (or creates it at 1 if absent). A failed
    /// condition means another writer committed in between; back off briefly
    /// and retry from a fresh read.
    ///
    /// Attempts are capped (`max_attempts`, 64 by default). Running out returns
    /// `InfraErrorKind::Contention` without writing. During finalize the record
    /// is already marked used at that point, so exhaustion undercounts that
    /// group by one, the same as a store failure between the two writes.
    pub async fn increment<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        group: Group,
    ) -> Result<u64, DomainError> {
        let name = group.as_str();

        for attempt in 1..=self.max_attempts {
            let now = OffsetDateTime::now_utc();
            let current = counts_adapter::find_by_group(conn, name)
                .await
                .map_err(map_db_err)?;

            let (won, new_count) = match current {
                None => {
                    let created = counts_adapter::insert_first(conn, name, now)
                        .await
                        .map_err(map_db_err)?;
                    (created, 1)
                }
                Some(row) => {
                    let expected = row.count;
                    stored_count(expected)?;
                    let swapped =
                        counts_adapter::compare_and_increment(conn, name, expected, now)
                            .await
                            .map_err(map_db_err)?;
                    (swapped, expected + 1)
                }
            };

            if won {
                if attempt > 1 {
                    debug!(group = name, attempt, "counter_increment_retried");
                }
                return stored_count(new_count);
            }

            self.backoff(attempt).await;
        }

        warn!(group = name, attempts = self.max_attempts, "counter_increment_gave_up");
        Err(DomainError::infra(
            InfraErrorKind::Contention,
            format!(
                "counter for {name} still contended after {} attempts",
                self.max_attempts
            ),
        ))
    }

    async fn backoff(&self, attempt: u32) {
        if attempt == 1 || self.max_backoff.is_zero() {
            tokio::task::yield_now().await;
            return;
        }
        // Full jitter, ceiling grows linearly with the attempt number.
        let ceiling = self
            .max_backoff
            .as_micros()
            .min(250 * u128::from(attempt)) as u64;
        let delay = rand::rng().random_range(0..=ceiling);
        tokio::time::sleep(Duration::from_micros(delay)).await;
    }
}
