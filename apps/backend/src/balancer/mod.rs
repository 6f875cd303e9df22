//! Least-populated group assignment.
//!
//! The balancer reads the three group counters in order and assigns the
//! smallest group, breaking ties uniformly at random. It acts only at
//! assignment time: a participant who is assigned and never finalizes is
//! not compensated for later.

pub mod http_source;

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::Group;

pub use http_source::HttpCountSource;

#[derive(Error, Debug)]
pub enum BalancerError {
    #[error("count request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("count endpoint returned status {0}")]
    Status(u16),
    #[error("count source unavailable: {0}")]
    Unavailable(String),
}

/// Where the balancer reads group counts from.
#[async_trait]
pub trait CountSource: Send + Sync {
    async fn group_count(&self, group: Group) -> Result<u64, BalancerError>;
}

/// Result of a balancer run as seen by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupAssignment {
    /// A count read failed; the caller picks uniformly at random.
    Fallback,
    Assigned(Group),
}

impl GroupAssignment {
    /// Numeric slot used by clients: 0 for fallback, otherwise 1..=3.
    pub fn slot(self) -> u8 {
        match self {
            GroupAssignment::Fallback => 0,
            GroupAssignment::Assigned(group) => group.index(),
        }
    }

    /// The group the client should use, applying the fallback rule.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Group {
        match self {
            GroupAssignment::Assigned(group) => group,
            GroupAssignment::Fallback => random_group(rng),
        }
    }
}

/// Uniform pick among all groups.
pub fn random_group<R: Rng + ?Sized>(rng: &mut R) -> Group {
    Group::ALL[rng.random_range(0..Group::ALL.len())]
}

/// Pick the group with the smallest count; ties are broken uniformly at
/// random among the tied groups. `counts` is indexed in `Group::ALL` order.
pub fn pick_least_populated<R: Rng + ?Sized>(counts: &[u64; 3], rng: &mut R) -> Group {
    let min = counts.iter().copied().min().unwrap_or(0);
    let tied: Vec<Group> = Group::ALL
        .into_iter()
        .zip(counts.iter())
        .filter(|(_, count)| **count == min)
        .map(|(group, _)| group)
        .collect();

    match tied.as_slice() {
        [only] => *only,
        many => many[rng.random_range(0..many.len())],
    }
}

pub struct GroupBalancer<S> {
    source: S,
}

impl<S: CountSource> GroupBalancer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Read all three counts in order, stopping at the first failure.
    pub async fn read_counts(&self) -> Result<[u64; 3], BalancerError> {
        let mut counts = [0u64; 3];
        for (slot, group) in Group::ALL.into_iter().enumerate() {
            counts[slot] = self.source.group_count(group).await.map_err(|e| {
                warn!(group = group.as_str(), error = %e, "balancer_read_failed");
                e
            })?;
        }
        Ok(counts)
    }

    /// Assign a group using the thread-local RNG.
    pub async fn assign_group(&self) -> GroupAssignment {
        match self.read_counts().await {
            Ok(counts) => GroupAssignment::Assigned(self.choose(&counts, &mut rand::rng())),
            Err(_) => GroupAssignment::Fallback,
        }
    }

    /// Assign a group with an injected RNG for the tie-break.
    pub async fn assign_group_with<R: Rng + Send + ?Sized>(&self, rng: &mut R) -> GroupAssignment {
        match self.read_counts().await {
            Ok(counts) => GroupAssignment::Assigned(self.choose(&counts, rng)),
            Err(_) => GroupAssignment::Fallback,
        }
    }

    fn choose<R: Rng + ?Sized>(&self, counts: &[u64; 3], rng: &mut R) -> Group {
        let group = pick_least_populated(counts, rng);
        debug!(
            group = group.as_str(),
            counts = ?counts,
            "balancer_assigned"
        );
        group
    }
}
