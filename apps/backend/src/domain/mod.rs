//! Experiment domain: groups, directions, participant records and the
//! pending -> used state machine. Pure logic, no I/O.

pub mod participant;
pub mod types;

pub use participant::{
    decide_finalize, FinalizeStep, ParticipantRecord, ParticipantStatus, Submission,
};
pub use types::{Direction, Group, ParticipantId, MAX_ID_LEN};
