//! SeaORM adapter for per-group counters.
//!
//! Only primitive single-statement operations live here; the optimistic
//! retry loop that composes them is `services::counts::CountStore`.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;

use crate::entities::group_counts;

pub async fn find_by_group<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_name: &str,
) -> Result<Option<group_counts::Model>, sea_orm::DbErr> {
    group_counts::Entity::find_by_id(group_name.to_string())
        .one(conn)
        .await
}

/// Create the counter row at 1. Returns `false` if another writer created it
/// first, in which case the caller re-reads and takes the update path.
pub async fn insert_first<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_name: &str,
    now: OffsetDateTime,
) -> Result<bool, sea_orm::DbErr> {
    let row = group_counts::ActiveModel {
        group_name: Set(group_name.to_string()),
        count: Set(1),
        updated_at: Set(now),
    };

    let inserted = group_counts::Entity::insert(row)
        .on_conflict(
            OnConflict::column(group_counts::Column::GroupName)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    Ok(inserted == 1)
}

/// Compare-and-swap: set `count = expected + 1` only if the stored value is
/// still `expected`. Returns `false` when a concurrent writer got there first.
pub async fn compare_and_increment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    group_name: &str,
    expected: i64,
    now: OffsetDateTime,
) -> Result<bool, sea_orm::DbErr> {
    let result = group_counts::Entity::update_many()
        .col_expr(group_counts::Column::Count, Expr::val(expected + 1).into())
        .col_expr(group_counts::Column::UpdatedAt, Expr::val(now).into())
        .filter(group_counts::Column::GroupName.eq(group_name))
        .filter(group_counts::Column::Count.eq(expected))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}
