use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Participants {
    Table,
    Id,
    Status,
    Direction,
    GroupName,
    CreatedAt,
    UsedAt,
}

#[derive(Iden)]
enum GroupCounts {
    Table,
    GroupName,
    Count,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // participants table: one row per registered id, never deleted
        manager
            .create_table(
                Table::create()
                    .table(Participants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Participants::Id)
                            .string_len(128)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Participants::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Participants::Direction)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participants::GroupName)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participants::UsedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_participants_group_status")
                    .table(Participants::Table)
                    .col(Participants::GroupName)
                    .col(Participants::Status)
                    .to_owned(),
            )
            .await?;

        // group_counts table: rows appear lazily on first increment
        manager
            .create_table(
                Table::create()
                    .table(GroupCounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GroupCounts::GroupName)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GroupCounts::Count)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GroupCounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GroupCounts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("ix_participants_group_status")
                    .table(Participants::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Participants::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
