//! Create-only participant registration.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::domain::{ParticipantRecord, ParticipantStatus, Submission};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::logging::pii::MaskedId;
use crate::repos::participants;
use crate::state::security_config::SecurityConfig;

/// Raw registration fields as received; all validation happens in
/// [`IdentityRegistry::register`].
#[derive(Debug, Clone, Default)]
pub struct RegisterRequest {
    pub token: Option<String>,
    pub id: Option<String>,
    pub direction: Option<String>,
    pub group: Option<String>,
}

pub struct IdentityRegistry<'a> {
    security: &'a SecurityConfig,
}

impl<'a> IdentityRegistry<'a> {
    pub fn new(security: &'a SecurityConfig) -> Self {
        Self { security }
    }

    /// Register a participant as pending.
    ///
    /// Token and field validation complete before any store access. The
    /// store write is a single create-if-absent, so an existing record is
    /// never overwritten and two racing registrations cannot both win.
    /// Never touches any counter.
    pub async fn register<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        request: RegisterRequest,
    ) -> Result<ParticipantRecord, DomainError> {
        if !self.security.accepts(request.token.as_deref()) {
            return Err(DomainError::auth("shared token rejected"));
        }

        let submission = Submission::parse(
            request.id.as_deref().unwrap_or_default(),
            request.group.as_deref().unwrap_or_default(),
            request.direction.as_deref().unwrap_or_default(),
        )?;

        let now = OffsetDateTime::now_utc();
        let created = participants::create_if_absent(conn, &submission, now).await?;

        if !created {
            debug!(
                participant = %MaskedId(submission.id.as_str()),
                "registration_conflict"
            );
            return Err(DomainError::conflict(
                ConflictKind::AlreadyRegistered,
                "A registration already exists for this id",
            ));
        }

        info!(
            participant = %MaskedId(submission.id.as_str()),
            group = submission.group.as_str(),
            direction = submission.direction.as_str(),
            "participant_registered"
        );

        Ok(ParticipantRecord {
            id: submission.id,
            status: ParticipantStatus::Pending,
            direction: submission.direction,
            group: submission.group,
            created_at: now,
            used_at: None,
        })
    }
}
