pub mod auth_token;
pub mod body;
pub mod submission_params;
pub mod validated_json;

pub use auth_token::BearerToken;
pub use submission_params::SubmissionParams;
pub use validated_json::ValidatedJson;
