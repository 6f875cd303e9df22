//! Stateless services. Each is cheap to construct and takes the connection
//! per call; nothing here holds mutable state between requests.

pub mod counts;
pub mod registry;
pub mod submission;

pub use counts::CountStore;
pub use registry::{IdentityRegistry, RegisterRequest};
pub use submission::{FinalizeOutcome, FinalizeRequest, SubmissionGate};
