//! Participant repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::participants_sea::{self as participants_adapter, ParticipantCreate};
use crate::domain::{Direction, Group, ParticipantId, ParticipantRecord, ParticipantStatus, Submission};
use crate::entities::participants;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;

impl TryFrom<participants::Model> for ParticipantRecord {
    type Error = DomainError;

    fn try_from(model: participants::Model) -> Result<Self, Self::Error> {
        let corrupt = |field: &str| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("participant row has an unreadable {field}"),
            )
        };

        Ok(Self {
            id: ParticipantId::parse(&model.id).map_err(|_| corrupt("id"))?,
            status: match model.status {
                participants::ParticipantStatus::Pending => ParticipantStatus::Pending,
                participants::ParticipantStatus::Used => ParticipantStatus::Used,
            },
            direction: model
                .direction
                .parse::<Direction>()
                .map_err(|_| corrupt("direction"))?,
            group: model
                .group_name
                .parse::<Group>()
                .map_err(|_| corrupt("group"))?,
            created_at: model.created_at,
            used_at: model.used_at,
        })
    }
}

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &ParticipantId,
) -> Result<Option<ParticipantRecord>, DomainError> {
    participants_adapter::find_by_id(conn, id.as_str())
        .await
        .map_err(map_db_err)?
        .map(ParticipantRecord::try_from)
        .transpose()
}

/// Atomic create-if-absent. `Ok(true)` when this call created the record.
pub async fn create_if_absent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    submission: &Submission,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    let dto = ParticipantCreate::new(
        submission.id.as_str(),
        submission.direction.as_str(),
        submission.group.as_str(),
    )
    .at(now);
    participants_adapter::insert_if_absent(conn, dto)
        .await
        .map_err(map_db_err)
}

/// Conditional pending -> used transition. `Ok(false)` means the record was
/// no longer pending (another finalize won).
pub async fn mark_used<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &ParticipantId,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    participants_adapter::mark_used_if_pending(conn, id.as_str(), now)
        .await
        .map_err(map_db_err)
}
