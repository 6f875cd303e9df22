use serde::Serialize;
use time::OffsetDateTime;

use super::types::{Direction, Group, ParticipantId};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    Pending,
    Used,
}

/// Persisted registration. Everything except `status`/`used_at` is fixed at
/// creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantRecord {
    pub id: ParticipantId,
    pub status: ParticipantStatus,
    pub direction: Direction,
    pub group: Group,
    pub created_at: OffsetDateTime,
    pub used_at: Option<OffsetDateTime>,
}

impl ParticipantRecord {
    pub fn is_used(&self) -> bool {
        self.status == ParticipantStatus::Used
    }

    pub fn matches(&self, group: Group, direction: Direction) -> bool {
        self.group == group && self.direction == direction
    }
}

/// Validated (id, group, direction) triple shared by register and finalize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: ParticipantId,
    pub group: Group,
    pub direction: Direction,
}

impl Submission {
    /// Validate raw fields in a fixed order: id, then group, then direction.
    /// The first failing field determines the error.
    pub fn parse(id: &str, group: &str, direction: &str) -> Result<Submission, DomainError> {
        let id = ParticipantId::parse(id)?;
        let group = Group::parse(group)?;
        let direction = Direction::parse(direction)?;
        Ok(Submission {
            id,
            group,
            direction,
        })
    }
}

/// What a finalize call must do once the stored record has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeStep {
    /// Record already used: report success, touch nothing.
    AlreadyProcessed,
    /// Record pending and matching: mark used, then increment the group counter.
    Transition,
}

/// Decide the finalize outcome for `submission` against the stored record.
///
/// A mismatched group/direction is rejected whether or not the record has
/// already been used; only an identical retry gets the idempotent success.
pub fn decide_finalize(
    record: Option<&ParticipantRecord>,
    submission: &Submission,
) -> Result<FinalizeStep, DomainError> {
    let record = record.ok_or_else(|| {
        DomainError::validation(
            ValidationKind::UnknownParticipant,
            "no registration exists for this id",
        )
    })?;

    if !record.matches(submission.group, submission.direction) {
        return Err(DomainError::validation(
            ValidationKind::Mismatch,
            "group or direction does not match the registration",
        ));
    }

    if record.is_used() {
        return Ok(FinalizeStep::AlreadyProcessed);
    }

    Ok(FinalizeStep::Transition)
}
