//! Repository functions: adapters in, domain types and `DomainError` out.

pub mod participants;
