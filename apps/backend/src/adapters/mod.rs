//! SeaORM adapters - generic over ConnectionTrait, returning `DbErr`.
//!
//! Higher layers map `DbErr` to `DomainError` via `infra::db_errors::map_db_err`.

pub mod group_counts_sea;
pub mod participants_sea;
