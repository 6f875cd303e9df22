//! DTOs for participants_sea adapter.

use time::OffsetDateTime;

/// DTO for creating a pending participant row.
#[derive(Debug, Clone)]
pub struct ParticipantCreate {
    pub id: String,
    pub direction: String,
    pub group_name: String,
    pub created_at: OffsetDateTime,
}

impl ParticipantCreate {
    pub fn new(
        id: impl Into<String>,
        direction: impl Into<String>,
        group_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            direction: direction.into(),
            group_name: group_name.into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn at(mut self, created_at: OffsetDateTime) -> Self {
        self.created_at = created_at;
        self
    }
}
