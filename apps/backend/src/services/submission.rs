//! Finalize: turn a pending registration into a counted submission, once.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, error, info};

use crate::domain::{decide_finalize, FinalizeStep, Group, ParticipantId, Submission};
use crate::errors::domain::DomainError;
use crate::logging::pii::MaskedId;
use crate::repos::participants;
use crate::services::counts::CountStore;
use crate::state::security_config::SecurityConfig;

/// Raw finalize parameters as received from query string and/or body.
#[derive(Debug, Clone, Default)]
pub struct FinalizeRequest {
    pub token: Option<String>,
    pub id: Option<String>,
    pub group: Option<String>,
    pub direction: Option<String>,
}

/// Both variants are successes; callers (the relay) treat them identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FinalizeOutcome {
    /// This call performed the pending -> used transition and counted it.
    Finalized {
        id: ParticipantId,
        group: Group,
        count: u64,
    },
    /// The record was already used; nothing changed.
    AlreadyProcessed { id: ParticipantId, group: Group },
}

pub struct SubmissionGate<'a> {
    security: &'a SecurityConfig,
    counts: &'a CountStore,
}

impl<'a> SubmissionGate<'a> {
    pub fn new(security: &'a SecurityConfig, counts: &'a CountStore) -> Self {
        Self { security, counts }
    }

    /// Finalize a registration.
    ///
    /// Preconditions run in order and each rejects with no side effect:
    /// token, id, group, direction, record exists, record matches. A
    /// matching record that is already used is reported as success so
    /// retried deliveries are safe.
    ///
    /// The record transition and the counter increment are two separate
    /// writes. The transition is conditional and happens first, so a crash
    /// or store failure between them can undercount but never double count.
    pub async fn finalize<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        request: FinalizeRequest,
    ) -> Result<FinalizeOutcome, DomainError> {
        if !self.security.accepts(request.token.as_deref()) {
            return Err(DomainError::auth("shared token rejected"));
        }

        let submission = Submission::parse(
            request.id.as_deref().unwrap_or_default(),
            request.group.as_deref().unwrap_or_default(),
            request.direction.as_deref().unwrap_or_default(),
        )?;

        let record = participants::find(conn, &submission.id).await?;
        let participant = MaskedId(submission.id.as_str());

        match decide_finalize(record.as_ref(), &submission)? {
            FinalizeStep::AlreadyProcessed => {
                debug!(participant = %participant, "finalize_already_processed");
                return Ok(FinalizeOutcome::AlreadyProcessed {
                    id: submission.id,
                    group: submission.group,
                });
            }
            FinalizeStep::Transition => {}
        }

        let now = OffsetDateTime::now_utc();
        if !participants::mark_used(conn, &submission.id, now).await? {
            // Lost the race to a concurrent finalize of the same id; that
            // call owns the increment.
            debug!(participant = %participant, "finalize_lost_transition_race");
            return Ok(FinalizeOutcome::AlreadyProcessed {
                id: submission.id,
                group: submission.group,
            });
        }

        let count = match self.counts.increment(conn, submission.group).await {
            Ok(count) => count,
            Err(e) => {
                // Record is used but uncounted. Retries will see it as
                // already processed, so this is a permanent undercount.
                error!(
                    participant = %participant,
                    group = submission.group.as_str(),
                    error = %e,
                    "finalize_increment_lost"
                );
                return Err(e);
            }
        };

        info!(
            participant = %participant,
            group = submission.group.as_str(),
            count,
            "participant_finalized"
        );

        Ok(FinalizeOutcome::Finalized {
            id: submission.id,
            group: submission.group,
            count,
        })
    }
}
