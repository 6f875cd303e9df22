//! SeaORM -> DomainError translation.
//!
//! Adapters return `sea_orm::DbErr`; services convert here. The raw driver
//! message is logged (redacted) and never placed in the domain error detail,
//! which ends up in HTTP responses.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};
use crate::logging::pii::Redacted;
use crate::web::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

fn is_unique_violation(msg: &str) -> bool {
    mentions_sqlstate(msg, "23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        sea_orm::DbErr::Type(_) | sea_orm::DbErr::TryIntoErr { .. } | sea_orm::DbErr::Json(_) => {
            error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Stored row could not be decoded");
            return DomainError::infra(InfraErrorKind::DataCorruption, "Stored data is unreadable");
        }
        _ => {}
    }

    // Only reachable if a plain insert races the conditional create; the
    // adapters use ON CONFLICT so this is a fallback, not the normal path.
    if is_unique_violation(&error_msg) {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");
        return DomainError::conflict(
            ConflictKind::AlreadyRegistered,
            "A registration already exists for this id",
        );
    }

    if error_msg.contains("timeout")
        || error_msg.contains("database is locked")
        || error_msg.contains("pool")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout or lock contention");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
