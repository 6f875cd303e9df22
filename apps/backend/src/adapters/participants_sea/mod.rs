//! SeaORM adapter for participant records.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;

use crate::entities::participants::{self, ParticipantStatus};

pub mod dto;

pub use dto::ParticipantCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<participants::Model>, sea_orm::DbErr> {
    participants::Entity::find_by_id(id.to_string()).one(conn).await
}

/// Create a pending row unless one already exists for the id.
///
/// Single statement (`INSERT .. ON CONFLICT (id) DO NOTHING`), so two racing
/// registrations for the same id cannot both succeed. Returns `true` when
/// this call created the row.
pub async fn insert_if_absent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ParticipantCreate,
) -> Result<bool, sea_orm::DbErr> {
    let row = participants::ActiveModel {
        id: Set(dto.id),
        status: Set(ParticipantStatus::Pending),
        direction: Set(dto.direction),
        group_name: Set(dto.group_name),
        created_at: Set(dto.created_at),
        used_at: Set(None),
    };

    let inserted = participants::Entity::insert(row)
        .on_conflict(
            OnConflict::column(participants::Column::Id)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    Ok(inserted == 1)
}

/// Flip a pending row to used. Conditional on the current status, so at most
/// one caller ever observes `true` for a given id.
pub async fn mark_used_if_pending<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
    used_at: OffsetDateTime,
) -> Result<bool, sea_orm::DbErr> {
    let result = participants::Entity::update_many()
        .col_expr(
            participants::Column::Status,
            Expr::val(ParticipantStatus::Used).into(),
        )
        .col_expr(participants::Column::UsedAt, Expr::val(Some(used_at)).into())
        .filter(participants::Column::Id.eq(id))
        .filter(participants::Column::Status.eq(ParticipantStatus::Pending))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}
